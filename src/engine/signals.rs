use regex::RegexSet;

use crate::error::AnalysisError;

use super::compile_pattern_set;
use super::lexicon::{BOILERPLATE_ANCHORS, HIGH_RISK, MEDIUM_RISK, TierLexicon};
use super::normalize::collapse_whitespace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalCounts {
    pub high_keywords: usize,
    pub high_patterns: usize,
    pub medium_keywords: usize,
    pub medium_patterns: usize,
    pub is_boilerplate: bool,
}

impl SignalCounts {
    pub fn high_total(&self) -> usize {
        self.high_keywords + self.high_patterns
    }

    pub fn medium_total(&self) -> usize {
        self.medium_keywords + self.medium_patterns
    }
}

#[derive(Debug, Clone)]
pub struct ClauseText {
    pub lower: String,
    pub clean: String,
}

impl ClauseText {
    pub fn new(text: &str) -> Self {
        let lower = text.to_lowercase();
        let clean = collapse_whitespace(&lower);
        Self { lower, clean }
    }
}

#[derive(Debug)]
pub struct BoilerplateDetector {
    anchors: RegexSet,
}

impl BoilerplateDetector {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            anchors: compile_pattern_set("boilerplate anchor", BOILERPLATE_ANCHORS)?,
        })
    }

    pub fn is_boilerplate(&self, clause: &ClauseText) -> bool {
        self.anchors.is_match(&clause.clean)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordMatcher {
    keywords: &'static [&'static str],
}

impl KeywordMatcher {
    pub fn new(keywords: &'static [&'static str]) -> Self {
        Self { keywords }
    }

    pub fn count(&self, clause: &ClauseText) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| clause.lower.contains(**keyword))
            .count()
    }
}

#[derive(Debug)]
pub struct PatternMatcher {
    patterns: RegexSet,
}

impl PatternMatcher {
    pub fn new(name: &str, patterns: &[&str]) -> Result<Self, AnalysisError> {
        Ok(Self {
            patterns: compile_pattern_set(name, patterns)?,
        })
    }

    pub fn count(&self, clause: &ClauseText) -> usize {
        self.patterns.matches(&clause.clean).iter().count()
    }
}

#[derive(Debug)]
struct TierMatcher {
    keywords: KeywordMatcher,
    patterns: PatternMatcher,
}

impl TierMatcher {
    fn new(name: &str, lexicon: &TierLexicon) -> Result<Self, AnalysisError> {
        Ok(Self {
            keywords: KeywordMatcher::new(lexicon.keywords),
            patterns: PatternMatcher::new(name, lexicon.patterns)?,
        })
    }
}

#[derive(Debug)]
pub struct SignalDetector {
    boilerplate: BoilerplateDetector,
    high: TierMatcher,
    medium: TierMatcher,
}

impl SignalDetector {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            boilerplate: BoilerplateDetector::new()?,
            high: TierMatcher::new("high-risk", &HIGH_RISK)?,
            medium: TierMatcher::new("medium-risk", &MEDIUM_RISK)?,
        })
    }

    pub fn detect(&self, clause: &ClauseText) -> SignalCounts {
        SignalCounts {
            high_keywords: self.high.keywords.count(clause),
            high_patterns: self.high.patterns.count(clause),
            medium_keywords: self.medium.keywords.count(clause),
            medium_patterns: self.medium.patterns.count(clause),
            is_boilerplate: self.boilerplate.is_boilerplate(clause),
        }
    }
}
