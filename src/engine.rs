use std::sync::Arc;

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use tracing::info;

use crate::error::AnalysisError;
use crate::model::{AnalysisOutcome, Clause, ClauseAnalysis, Segmentation};

mod aggregate;
mod classifier;
mod lexicon;
mod normalize;
mod predictor;
mod rationale;
mod score;
mod segment;
mod signals;
mod strategies;
#[cfg(test)]
mod tests;
mod validate;

pub use aggregate::{SEVERITY_MULTIPLIER, WeightedScore, aggregate, clause_weight};
pub use classifier::{ClauseClassifier, RuleBasedClassifier, RuleEvaluation};
pub use normalize::{collapse_whitespace, normalize_text};
pub use predictor::{
    LabelPredictor, LabelProbabilities, PredictionEntry, PredictionInput, PredictionTable,
    PredictorClassifier, calibrated_assessment, clause_fingerprint, prepare_model_text,
};
pub use score::{DecisionRule, ScoreCalculator, ScoreDecision};
pub use segment::{ArticleSplitter, SegmentStrategy, SegmentationEngine, Span};
pub use signals::{ClauseText, SignalCounts, SignalDetector};
pub use validate::{
    ClauseValidator, MAX_CLAUSE_CHARS, MIN_CLAUSE_CHARS, TRUNCATION_MARKER, ValidatedClauses,
};

const PATTERN_SIZE_LIMIT: usize = 2 << 20;
const PATTERN_DFA_SIZE_LIMIT: usize = 4 << 20;

pub(crate) fn compile_pattern(name: &str, pattern: &str) -> Result<Regex, AnalysisError> {
    RegexBuilder::new(pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .dfa_size_limit(PATTERN_DFA_SIZE_LIMIT)
        .build()
        .map_err(|source| AnalysisError::PatternCompile {
            name: name.to_string(),
            source,
        })
}

pub(crate) fn compile_pattern_set(name: &str, patterns: &[&str]) -> Result<RegexSet, AnalysisError> {
    RegexSetBuilder::new(patterns)
        .case_insensitive(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .dfa_size_limit(PATTERN_DFA_SIZE_LIMIT)
        .build()
        .map_err(|source| AnalysisError::PatternCompile {
            name: name.to_string(),
            source,
        })
}

pub struct ContractRiskEngine {
    segmenter: SegmentationEngine,
    classifier: Arc<dyn ClauseClassifier>,
}

impl ContractRiskEngine {
    pub fn new(classifier: Arc<dyn ClauseClassifier>) -> Result<Self, AnalysisError> {
        Ok(Self {
            segmenter: SegmentationEngine::new()?,
            classifier,
        })
    }

    pub fn with_rules() -> Result<Self, AnalysisError> {
        Self::new(Arc::new(RuleBasedClassifier::new()?))
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    pub fn segment(&self, text: &str) -> Result<Segmentation, AnalysisError> {
        self.segmenter.segment(text)
    }

    pub fn classify_clauses(&self, clauses: Vec<Clause>) -> Vec<ClauseAnalysis> {
        clauses
            .into_iter()
            .map(|clause| {
                let assessment = self.classifier.classify(&clause.text);
                ClauseAnalysis { clause, assessment }
            })
            .collect()
    }

    pub fn analyze(&self, text: &str) -> Result<AnalysisOutcome, AnalysisError> {
        let segmentation = self.segment(text)?;
        let analysis = aggregate(self.classify_clauses(segmentation.clauses));

        info!(
            classifier = self.classifier.name(),
            clauses = analysis.total_clauses,
            high = analysis.high_count,
            medium = analysis.medium_count,
            low = analysis.low_count,
            global_score = analysis.global_score,
            "analysis complete"
        );

        Ok(AnalysisOutcome {
            analysis,
            strategy: segmentation.strategy,
            classifier: self.classifier.name(),
            advisories: segmentation.advisories,
        })
    }
}
