use crate::model::RiskLabel;

use super::signals::SignalCounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionRule {
    Boilerplate,
    HighIndicators,
    MixedIndicators,
    MediumIndicators,
    NoSignalMatched,
}

impl DecisionRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boilerplate => "boilerplate",
            Self::HighIndicators => "high_indicators",
            Self::MixedIndicators => "mixed_indicators",
            Self::MediumIndicators => "medium_indicators",
            Self::NoSignalMatched => "no_signal_matched",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreDecision {
    pub label: RiskLabel,
    pub score: f64,
    pub rule: DecisionRule,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreCalculator;

impl ScoreCalculator {
    pub fn decide(&self, counts: &SignalCounts, clause_chars: usize) -> ScoreDecision {
        let high = counts.high_total();
        let medium = counts.medium_total();
        let high_patterns = counts.high_patterns;
        let medium_patterns = counts.medium_patterns;

        let (label, raw, rule) = if counts.is_boilerplate && high == 0 {
            (
                RiskLabel::Low,
                5 + (clause_chars / 100).min(15),
                DecisionRule::Boilerplate,
            )
        } else if high >= 2 || high_patterns >= 1 || (high >= 1 && clause_chars > 200) {
            (
                RiskLabel::High,
                80 + ((high + high_patterns * 2) * 3).min(20),
                DecisionRule::HighIndicators,
            )
        } else if high >= 1 || medium >= 3 || medium_patterns >= 2 {
            (
                RiskLabel::Medium,
                45 + ((high + medium) * 4).min(25),
                DecisionRule::MixedIndicators,
            )
        } else if medium >= 1 || medium_patterns >= 1 {
            (
                RiskLabel::Medium,
                35 + (medium * 5).min(15),
                DecisionRule::MediumIndicators,
            )
        } else {
            (
                RiskLabel::Low,
                10 + (clause_chars / 50).min(10),
                DecisionRule::NoSignalMatched,
            )
        };

        ScoreDecision {
            label,
            score: finalize_score(raw as f64),
            rule,
        }
    }
}

pub fn finalize_score(raw: f64) -> f64 {
    round2(raw.clamp(0.0, 100.0))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
