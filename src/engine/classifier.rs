use tracing::trace;

use crate::error::AnalysisError;
use crate::model::RiskAssessment;

use super::normalize::char_len;
use super::rationale::RationaleGenerator;
use super::score::{ScoreCalculator, ScoreDecision};
use super::signals::{ClauseText, SignalCounts, SignalDetector};

pub trait ClauseClassifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, clause_text: &str) -> RiskAssessment;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleEvaluation {
    pub counts: SignalCounts,
    pub decision: ScoreDecision,
}

#[derive(Debug)]
pub struct RuleBasedClassifier {
    signals: SignalDetector,
    calculator: ScoreCalculator,
    rationale: RationaleGenerator,
}

impl RuleBasedClassifier {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            signals: SignalDetector::new()?,
            calculator: ScoreCalculator,
            rationale: RationaleGenerator::new()?,
        })
    }

    pub fn evaluate(&self, clause_text: &str) -> RuleEvaluation {
        let clause = ClauseText::new(clause_text);
        self.evaluate_prepared(clause_text, &clause)
    }

    fn evaluate_prepared(&self, clause_text: &str, clause: &ClauseText) -> RuleEvaluation {
        let counts = self.signals.detect(clause);
        let decision = self.calculator.decide(&counts, char_len(clause_text));
        RuleEvaluation { counts, decision }
    }
}

impl ClauseClassifier for RuleBasedClassifier {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn classify(&self, clause_text: &str) -> RiskAssessment {
        let clause = ClauseText::new(clause_text);
        let RuleEvaluation { counts, decision } = self.evaluate_prepared(clause_text, &clause);

        trace!(
            label = decision.label.as_str(),
            score = decision.score,
            rule = decision.rule.as_str(),
            high_keywords = counts.high_keywords,
            high_patterns = counts.high_patterns,
            medium_keywords = counts.medium_keywords,
            medium_patterns = counts.medium_patterns,
            boilerplate = counts.is_boilerplate,
            "classified clause"
        );

        RiskAssessment {
            label: decision.label,
            score: decision.score,
            explanation: self.rationale.explain(decision.label, &clause, &counts),
            mitigation: self.rationale.mitigate(decision.label, &clause),
        }
    }
}
