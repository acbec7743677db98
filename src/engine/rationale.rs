use regex::Regex;

use crate::error::AnalysisError;
use crate::model::RiskLabel;

use super::compile_pattern;
use super::signals::{ClauseText, SignalCounts};

const HIGH_EXPLANATION_TAIL: &str = "that may expose parties to significant legal and financial risk. This is particularly unfair to tenants in rental agreements.";
const HIGH_EXPLANATION_FALLBACK: &str = "high-risk language";
const MEDIUM_EXPLANATION_TAIL: &str =
    "Standard legal terms may need clarification or negotiation.";
const LOW_EXPLANATION: &str = "This clause appears to contain standard, low-risk language typical of commercial agreements. However, always review with legal counsel for your specific context.";

const HIGH_MITIGATION_FALLBACK: &str = "Consider revising to limit liability, add exceptions, or include mutual obligations. Consult legal counsel.";
const MEDIUM_MITIGATION_FALLBACK: &str = "Review for clarity and ensure terms are balanced. Consider adding specific conditions, limitations, or mutual obligations. Seek legal review if uncertain.";
const LOW_MITIGATION: &str = "This clause appears acceptable, but always review with legal counsel for your specific context and jurisdiction.";

const PHRASE_JOINER: &str = ", ";
const SUGGESTION_JOINER: &str = "; ";

#[derive(Debug, Clone, Copy)]
enum Trigger {
    Pattern(&'static str),
    AnyKeyword(&'static [&'static str]),
    KeywordWithout {
        any: &'static [&'static str],
        absent: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
struct PhraseRule {
    trigger: Trigger,
    phrase: &'static str,
}

const fn pattern(pattern: &'static str, phrase: &'static str) -> PhraseRule {
    PhraseRule {
        trigger: Trigger::Pattern(pattern),
        phrase,
    }
}

const fn keywords(any: &'static [&'static str], phrase: &'static str) -> PhraseRule {
    PhraseRule {
        trigger: Trigger::AnyKeyword(any),
        phrase,
    }
}

const HIGH_EXPLANATIONS: &[PhraseRule] = &[
    pattern(
        r"unilateral\s+amendment|reserves\s+the\s+right\s+to\s+modify",
        "unilateral amendment rights (landlord can change terms without tenant consent)",
    ),
    pattern(
        r"enter.*without\s+(prior\s+)?notice|at\s+any\s+time.*without\s+notice",
        "entry without prior notice (privacy concerns)",
    ),
    pattern(
        r"indemnify.*own\s+negligence|hold\s+harmless.*own\s+negligence",
        "indemnification including landlord's own negligence (extremely unfair)",
    ),
    pattern(
        r"exclusively\s+by\s+the\s+courts\s+located|exclusive\s+jurisdiction",
        "exclusive jurisdiction in distant location (unfair to tenant)",
    ),
    pattern(
        r"terminate.*30\s+days.*written\s+notice|30\s+days.*terminate",
        "very short termination notice (30 days is insufficient)",
    ),
    PhraseRule {
        trigger: Trigger::KeywordWithout {
            any: &["indemnify", "hold harmless"],
            absent: "own negligence",
        },
        phrase: "indemnification language",
    },
    keywords(&["penalty", "liquidated damages"], "penalty or damage clauses"),
    keywords(&["automatic renewal"], "automatic renewal terms"),
    keywords(
        &["binding arbitration", "waiver of rights"],
        "dispute resolution restrictions",
    ),
    keywords(
        &["unlimited liability", "without limitation"],
        "unlimited liability exposure",
    ),
];

const MEDIUM_EXPLANATIONS: &[PhraseRule] = &[
    pattern(
        r"security\s+deposit.*(deduct|forfeit)|deposit.*deduct",
        "security deposit deductions",
    ),
    pattern(
        r"late\s+(payment\s+)?fee|penalty.*late\s+payment",
        "late payment fees",
    ),
    pattern(
        r"sublet|no\s+subletting|assign.*without.*consent",
        "subletting or assignment restrictions",
    ),
    pattern(r"no\s+pets|pet\s+deposit", "pet restrictions"),
    pattern(r"alterations.*consent", "alteration restrictions"),
    pattern(
        r"terminat.*liable|early\s+termination",
        "liability on early termination",
    ),
    pattern(
        r"rent\s+escalation|increase\s+rent|rent.*increase",
        "rent escalation",
    ),
    pattern(r"fixtures", "fixture ownership on exit"),
    keywords(
        &["termination", "breach", "default"],
        "termination or default provisions",
    ),
    keywords(
        &["governing law", "jurisdiction", "venue", "choice of law", "forum selection"],
        "governing law and forum terms",
    ),
    keywords(
        &["arbitration", "mediation", "dispute"],
        "dispute resolution terms",
    ),
    keywords(
        &["confidentiality", "non-disclosure"],
        "confidentiality obligations",
    ),
];

const HIGH_MITIGATIONS: &[PhraseRule] = &[
    keywords(
        &["indemnify"],
        "Limit indemnification to direct damages and exclude consequential damages",
    ),
    keywords(
        &["penalty", "liquidated damages"],
        "Ensure penalties are reasonable and proportional to actual damages",
    ),
    keywords(
        &["automatic renewal"],
        "Add clear opt-out mechanism and advance notice requirements",
    ),
    keywords(
        &["binding arbitration"],
        "Consider allowing court proceedings for certain disputes",
    ),
    keywords(
        &["unlimited liability"],
        "Cap liability to a reasonable amount (e.g., contract value)",
    ),
];

const MEDIUM_MITIGATIONS: &[PhraseRule] = &[
    keywords(
        &["termination", "breach", "default"],
        "Require written notice and a cure period before termination or default remedies apply",
    ),
    keywords(
        &["governing law", "jurisdiction", "venue", "forum selection"],
        "Negotiate a neutral or mutually convenient venue",
    ),
    pattern(
        r"assign|sublet",
        "Require that consent to assignment or subletting not be unreasonably withheld",
    ),
    keywords(
        &["confidentiality", "non-disclosure"],
        "Limit the duration and scope of confidentiality obligations",
    ),
    pattern(
        r"late\s+(payment\s+)?fee",
        "Cap late fees at a reasonable, fixed amount",
    ),
    pattern(
        r"deposit.*(deduct|forfeit)",
        "Require an itemised list of deposit deductions with supporting receipts",
    ),
];

#[derive(Debug)]
enum CompiledTrigger {
    Pattern(Regex),
    AnyKeyword(&'static [&'static str]),
    KeywordWithout {
        any: &'static [&'static str],
        absent: &'static str,
    },
}

impl CompiledTrigger {
    fn fires(&self, clause: &ClauseText) -> bool {
        match self {
            Self::Pattern(regex) => regex.is_match(&clause.clean),
            Self::AnyKeyword(any) => any.iter().any(|keyword| clause.lower.contains(keyword)),
            Self::KeywordWithout { any, absent } => {
                !clause.lower.contains(absent)
                    && any.iter().any(|keyword| clause.lower.contains(keyword))
            }
        }
    }
}

#[derive(Debug)]
struct PhraseTable {
    rules: Vec<(CompiledTrigger, &'static str)>,
}

impl PhraseTable {
    fn compile(name: &str, rules: &[PhraseRule]) -> Result<Self, AnalysisError> {
        let rules = rules
            .iter()
            .map(|rule| -> Result<(CompiledTrigger, &'static str), AnalysisError> {
                let trigger = match rule.trigger {
                    Trigger::Pattern(source) => {
                        CompiledTrigger::Pattern(compile_pattern(name, &format!("(?i){source}"))?)
                    }
                    Trigger::AnyKeyword(any) => CompiledTrigger::AnyKeyword(any),
                    Trigger::KeywordWithout { any, absent } => {
                        CompiledTrigger::KeywordWithout { any, absent }
                    }
                };
                Ok((trigger, rule.phrase))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    fn matched(&self, clause: &ClauseText) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|(trigger, _)| trigger.fires(clause))
            .map(|(_, phrase)| *phrase)
            .collect()
    }
}

#[derive(Debug)]
pub struct RationaleGenerator {
    high_explanations: PhraseTable,
    medium_explanations: PhraseTable,
    high_mitigations: PhraseTable,
    medium_mitigations: PhraseTable,
}

impl RationaleGenerator {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            high_explanations: PhraseTable::compile("high-risk explanation", HIGH_EXPLANATIONS)?,
            medium_explanations: PhraseTable::compile(
                "medium-risk explanation",
                MEDIUM_EXPLANATIONS,
            )?,
            high_mitigations: PhraseTable::compile("high-risk mitigation", HIGH_MITIGATIONS)?,
            medium_mitigations: PhraseTable::compile(
                "medium-risk mitigation",
                MEDIUM_MITIGATIONS,
            )?,
        })
    }

    pub fn explain(&self, label: RiskLabel, clause: &ClauseText, counts: &SignalCounts) -> String {
        match label {
            RiskLabel::High => {
                let phrases = self.high_explanations.matched(clause);
                let reasons = if phrases.is_empty() {
                    HIGH_EXPLANATION_FALLBACK.to_string()
                } else {
                    phrases.join(PHRASE_JOINER)
                };
                format!("This clause contains {reasons} {HIGH_EXPLANATION_TAIL}")
            }
            RiskLabel::Medium => {
                let phrases = self.medium_explanations.matched(clause);
                if phrases.is_empty() {
                    format!(
                        "This clause contains moderate-risk language that requires careful review. Medium-risk keywords detected: {}. {MEDIUM_EXPLANATION_TAIL}",
                        counts.medium_keywords
                    )
                } else {
                    format!(
                        "This clause contains moderate-risk terms ({}) that require careful review. {MEDIUM_EXPLANATION_TAIL}",
                        phrases.join(PHRASE_JOINER)
                    )
                }
            }
            RiskLabel::Low => LOW_EXPLANATION.to_string(),
        }
    }

    pub fn mitigate(&self, label: RiskLabel, clause: &ClauseText) -> String {
        match label {
            RiskLabel::High => {
                let suggestions = self.high_mitigations.matched(clause);
                if suggestions.is_empty() {
                    HIGH_MITIGATION_FALLBACK.to_string()
                } else {
                    format!(
                        "Consider: {}. Consult legal counsel before signing.",
                        suggestions.join(SUGGESTION_JOINER)
                    )
                }
            }
            RiskLabel::Medium => {
                let suggestions = self.medium_mitigations.matched(clause);
                if suggestions.is_empty() {
                    MEDIUM_MITIGATION_FALLBACK.to_string()
                } else {
                    format!(
                        "Consider: {}. Seek legal review if uncertain.",
                        suggestions.join(SUGGESTION_JOINER)
                    )
                }
            }
            RiskLabel::Low => LOW_MITIGATION.to_string(),
        }
    }
}
