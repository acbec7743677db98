pub struct TierLexicon {
    pub keywords: &'static [&'static str],
    pub patterns: &'static [&'static str],
}

// Repeated entries are counted separately, so a repeat weighs double.
pub const HIGH_RISK: TierLexicon = TierLexicon {
    keywords: &[
        "unlimited liability",
        "sole discretion",
        "without limitation",
        "indemnify",
        "hold harmless",
        "penalty",
        "liquidated damages",
        "automatic renewal",
        "binding arbitration",
        "waiver of rights",
        "exclusive jurisdiction",
        "no refund",
        "as-is",
        "no warranty",
        "force majeure",
        "termination without cause",
        "confidentiality breach",
        "at any time without notice",
        "without prior notice",
        "immediate termination",
        "no recourse",
        "no liability",
        "disclaim all warranties",
        "as-is basis",
        "consequential damages",
        "punitive damages",
        "treble damages",
        "non-compete",
        "non-solicitation",
        "restrictive covenant",
        "assignment prohibited",
        "transfer prohibited",
        "no assignment",
        "confidential information",
        "proprietary information",
        "trade secrets",
        "liquidated damages",
        "penalty clause",
        "forfeiture",
        "right to modify",
        "right to amend",
        "unilateral modification",
        "binding on successors",
        "survival clause",
        "severability",
    ],
    patterns: &[
        // unilateral amendment
        r"unilateral\s+amendment",
        r"reserves\s+the\s+right\s+to\s+modify\s+or\s+amend\s+any\s+term",
        r"landlord.*reserves.*right.*modify",
        r"landlord.*reserves.*right.*amend",
        r"modify.*any\s+term.*at\s+any\s+time",
        r"amend.*any\s+term.*at\s+any\s+time",
        // entry without notice
        r"enter.*at\s+any\s+time.*without\s+(prior\s+)?notice",
        r"enter.*premises.*without\s+(prior\s+)?notice",
        r"right\s+of\s+entry.*without\s+notice",
        r"landlord.*may\s+enter.*at\s+any\s+time",
        // indemnity for the other party's own negligence
        r"indemnify.*own\s+negligence",
        r"hold\s+harmless.*own\s+negligence",
        r"indemnify.*landlord.*negligence",
        r"including\s+claims.*arising\s+from.*own\s+negligence",
        r"indemnify.*including.*landlord.*negligence",
        // distant or exclusive forum
        r"exclusively\s+by\s+the\s+courts\s+located\s+in",
        r"exclusive\s+jurisdiction.*distant",
        r"courts\s+located\s+in.*\(.*city",
        r"jurisdiction.*exclusively",
        // short notice
        r"terminate.*30\s+days.*written\s+notice",
        r"30\s+days.*written\s+notice.*terminate",
        r"termination.*30\s+days.*notice",
        r"vacate.*30\s+days",
        // excessive fees
        r"penalty.*exceed.*monthly\s+rent",
        r"late\s+fee.*per\s+week",
        r"penalty.*uncapped",
        // sale or redevelopment
        r"terminate.*sale.*property",
        r"terminate.*redevelopment",
        r"terminate.*30\s+days.*sale",
    ],
};

pub const MEDIUM_RISK: TierLexicon = TierLexicon {
    keywords: &[
        "termination",
        "breach",
        "default",
        "remedy",
        "dispute",
        "governing law",
        "jurisdiction",
        "assignment",
        "modification",
        "severability",
        "entire agreement",
        "notices",
        "cure period",
        "notice period",
        "grace period",
        "material breach",
        "substantial breach",
        "default under",
        "remedy available",
        "specific performance",
        "injunctive relief",
        "dispute resolution",
        "mediation",
        "arbitration",
        "choice of law",
        "venue",
        "forum selection",
        "assignment and delegation",
        "transfer of rights",
        "amendment",
        "modification",
        "waiver",
        "survival",
        "severability",
        "invalidity",
        "entire agreement",
        "merger clause",
        "integration clause",
        "notices",
        "service of process",
        "communication",
        "confidentiality",
        "non-disclosure",
        "proprietary",
        "intellectual property",
        "work product",
        "derivative works",
    ],
    patterns: &[
        r"security\s+deposit.*deduct",
        r"deposit.*deduct.*damages",
        r"security\s+deposit.*forfeiture",
        r"late\s+payment\s+fee",
        r"late\s+fee.*rent",
        r"penalty.*late\s+payment",
        r"sublet.*without.*prior\s+written\s+consent",
        r"assign.*without.*consent",
        r"no\s+subletting",
        r"no\s+pets.*without.*consent",
        r"pet\s+deposit",
        r"no.*alterations.*without.*consent",
        r"structural\s+alterations.*consent",
        r"terminate.*liable\s+for\s+rent",
        r"early\s+termination.*liable",
        r"terminate.*two\s+months.*rent",
        r"rent\s+escalation",
        r"increase\s+rent.*annually",
        r"rent.*increase.*cpi",
        r"fixtures.*property\s+of\s+landlord",
        r"remove.*fixtures",
    ],
};

pub const BOILERPLATE_ANCHORS: &[&str] = &[
    // rental and lease terms
    r"^rent\s+amount\s+and\s+payment\s+terms",
    r"tenant\s+shall\s+pay\s+monthly\s+rent",
    r"pay.*rent.*on\s+or\s+before",
    r"bank\s+transfer.*landlord",
    r"maintenance\s+and\s+repairs",
    r"tenant.*responsible.*routine\s+upkeep",
    r"landlord.*responsible.*major.*repairs",
    r"utilities\s+and\s+service\s+charges",
    r"tenant.*responsible.*payment.*electricity",
    r"utilities.*unless\s+otherwise\s+stated",
    r"insurance\s+requirement",
    r"tenant.*maintain.*renter.*insurance",
    r"liability\s+coverage",
    r"guarantor",
    r"provide\s+a\s+guarantor",
    r"force\s+majeure",
    r"events\s+beyond.*reasonable\s+control",
    r"natural\s+disasters.*government\s+actions",
    r"confidentiality",
    r"keep.*terms.*confidential",
    r"not\s+disclose.*third\s+parties",
    // generic openers
    r"^this\s+agreement\s+has\s+been\s+made",
    r"^this\s+agreement.*between",
    r"^this\s+agreement\s+is\s+entered\s+into",
    r"^this\s+agreement\s+has\s+been\s+executed",
    r"^this\s+contract\s+is\s+entered\s+into",
    r"^between\s+.*\s+and\s+.*hereinafter",
    r"^between\s+.*\s+and\s+.*incorporated",
    r"^between\s+.*\s+and\s+.*registered",
    // employment
    r"^this\s+employment\s+agreement",
    r"^the\s+employee.*employment.*shall\s+commence",
    r"^the\s+employee\s+shall\s+be\s+employed",
    // non-disclosure
    r"^this\s+non-disclosure\s+agreement",
    r"^confidential\s+information.*shall\s+mean",
    // services
    r"^this\s+service\s+agreement",
    r"^the\s+service\s+provider\s+agrees\s+to\s+provide",
    // purchase
    r"^this\s+purchase\s+agreement",
    r"^the\s+buyer\s+agrees\s+to\s+purchase",
    // lease
    r"^this\s+lease\s+agreement",
    r"^the\s+lessor\s+hereby\s+leases",
    // licensing
    r"^this\s+license\s+agreement",
    r"^the\s+licensor\s+hereby\s+grants.*license",
    r"^this\s+software\s+license\s+agreement",
    r"^these\s+terms\s+of\s+service",
    r"^this\s+privacy\s+policy",
    // recitals
    r"^whereas\s+",
    r"^and\s+whereas",
    r"^now\s+therefore",
    r"^now,\s+therefore",
    r"^in\s+witness\s+whereof",
    // definitions and headings
    r"^definitions?\s*:",
    r"^article\s+\d+",
    r"^section\s+\d+",
    r"^for\s+purposes\s+of\s+this\s+agreement",
    // party identification
    r"hereinafter\s+referred\s+to\s+as",
    r"incorporated\s+as\s+a\s+body",
    r"represented\s+by",
    // consideration and payment
    r"^in\s+consideration\s+of\s+the\s+payments",
    r"^in\s+consideration\s+of\s+the\s+mutual",
    r"^the\s+.*\s+shall\s+pay\s+the\s+.*\s+such\s+sums",
    r"^the\s+.*\s+shall\s+pay.*fees\s+as\s+set\s+forth",
    // execution and structure
    r"^this\s+agreement\s+shall\s+commence\s+on",
    r"^this\s+agreement\s+may\s+be\s+executed\s+in\s+counterparts",
    r"^the\s+headings\s+in\s+this\s+agreement",
    r"^this\s+agreement\s+constitutes\s+the\s+entire\s+agreement",
];

pub const SEVERITY_KEYWORDS: &[&str] = &["liability", "penalty", "indemnify", "damages", "breach"];
