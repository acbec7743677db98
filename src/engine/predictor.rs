use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::AnalysisError;
use crate::model::{RiskAssessment, RiskLabel};

use super::classifier::{ClauseClassifier, RuleBasedClassifier};
use super::normalize::{char_len, collapse_whitespace};
use super::score::finalize_score;

pub const MIN_MODEL_INPUT_CHARS: usize = 10;
pub const MAX_MODEL_INPUT_CHARS: usize = 2000;

const HIGH_MODEL_MITIGATION: &str = "Consider revising to limit liability, add exceptions, or include mutual obligations. Consult legal counsel.";
const MEDIUM_MODEL_MITIGATION: &str = "Review for clarity and ensure terms are balanced. Consider adding specific conditions or limitations.";
const LOW_MODEL_MITIGATION: &str =
    "This clause appears acceptable, but always review with legal counsel for your specific context.";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelProbabilities {
    #[serde(rename = "LOW")]
    pub low: f64,
    #[serde(rename = "MEDIUM")]
    pub medium: f64,
    #[serde(rename = "HIGH")]
    pub high: f64,
}

impl LabelProbabilities {
    pub fn get(&self, label: RiskLabel) -> f64 {
        match label {
            RiskLabel::Low => self.low,
            RiskLabel::Medium => self.medium,
            RiskLabel::High => self.high,
        }
    }

    // Ties go to the lower label.
    pub fn best(&self) -> (RiskLabel, f64) {
        let mut best = (RiskLabel::Low, self.low);
        for label in [RiskLabel::Medium, RiskLabel::High] {
            let probability = self.get(label);
            if probability > best.1 {
                best = (label, probability);
            }
        }
        best
    }

    fn check(&self) -> Result<(), AnalysisError> {
        let valid = [self.low, self.medium, self.high]
            .iter()
            .all(|value| value.is_finite() && (0.0..=1.0).contains(value));
        if valid {
            Ok(())
        } else {
            Err(AnalysisError::Prediction(format!(
                "label probabilities out of range: {self:?}"
            )))
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PredictionInput<'a> {
    pub clause_text: &'a str,
    pub model_text: &'a str,
}

pub trait LabelPredictor: Send + Sync {
    fn name(&self) -> &'static str;

    fn predict(&self, input: &PredictionInput<'_>) -> Result<LabelProbabilities, AnalysisError>;
}

pub struct PredictorClassifier<P> {
    predictor: P,
    fallback: RuleBasedClassifier,
}

impl<P: LabelPredictor> PredictorClassifier<P> {
    pub fn new(predictor: P) -> Result<Self, AnalysisError> {
        Ok(Self {
            predictor,
            fallback: RuleBasedClassifier::new()?,
        })
    }
}

impl<P: LabelPredictor> ClauseClassifier for PredictorClassifier<P> {
    fn name(&self) -> &'static str {
        self.predictor.name()
    }

    fn classify(&self, clause_text: &str) -> RiskAssessment {
        let processed = prepare_model_text(clause_text);
        if char_len(&processed) < MIN_MODEL_INPUT_CHARS {
            warn!(
                chars = char_len(&processed),
                "clause too short for predictor, using rules"
            );
            return self.fallback.classify(clause_text);
        }

        let model_text = truncate_model_text(processed);
        let input = PredictionInput {
            clause_text,
            model_text: &model_text,
        };

        let prediction = self
            .predictor
            .predict(&input)
            .and_then(|probabilities| probabilities.check().map(|()| probabilities));

        match prediction {
            Ok(probabilities) => calibrated_assessment(&probabilities),
            Err(error) => {
                warn!(
                    predictor = self.predictor.name(),
                    error = %error,
                    "prediction failed, using rules"
                );
                self.fallback.classify(clause_text)
            }
        }
    }
}

pub fn calibrated_assessment(probabilities: &LabelProbabilities) -> RiskAssessment {
    let (label, confidence) = probabilities.best();

    let raw = match label {
        RiskLabel::High => {
            let score = 70.0 + confidence * 30.0;
            if probabilities.medium > 0.3 {
                score * 0.9
            } else {
                score
            }
        }
        RiskLabel::Medium => {
            let score = 30.0 + confidence * 40.0;
            if probabilities.high > 0.25 {
                (score + 10.0).min(100.0)
            } else {
                score
            }
        }
        RiskLabel::Low => confidence * 30.0,
    };

    RiskAssessment {
        label,
        score: finalize_score(raw),
        explanation: confidence_explanation(label, confidence),
        mitigation: model_mitigation(label).to_string(),
    }
}

fn model_mitigation(label: RiskLabel) -> &'static str {
    match label {
        RiskLabel::High => HIGH_MODEL_MITIGATION,
        RiskLabel::Medium => MEDIUM_MODEL_MITIGATION,
        RiskLabel::Low => LOW_MODEL_MITIGATION,
    }
}

fn confidence_explanation(label: RiskLabel, confidence: f64) -> String {
    let percent = confidence * 100.0;
    match label {
        RiskLabel::High => format!(
            "This clause contains high-risk language that may expose parties to significant liability, penalties, or unfavorable terms (confidence: {percent:.2}%)."
        ),
        RiskLabel::Medium => format!(
            "This clause contains moderate-risk language that may require careful review (confidence: {percent:.2}%)."
        ),
        RiskLabel::Low => format!(
            "This clause appears to contain standard, low-risk language (confidence: {percent:.2}%)."
        ),
    }
}

pub fn prepare_model_text(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    let mut output = String::with_capacity(collapsed.len());
    let mut previous: Option<char> = None;

    for ch in collapsed.chars() {
        if matches!(ch, '.' | ',' | ';' | ':' | '!' | '?') && previous == Some(ch) {
            continue;
        }
        previous = Some(ch);

        match ch {
            '\u{201C}' | '\u{201D}' => output.push('"'),
            '\u{2018}' | '\u{2019}' => output.push('\''),
            ch if ch.is_control() => {}
            ch => output.push(ch),
        }
    }

    output.trim().to_string()
}

fn truncate_model_text(text: String) -> String {
    if char_len(&text) <= MAX_MODEL_INPUT_CHARS {
        return text;
    }

    let mut truncated = text.chars().take(MAX_MODEL_INPUT_CHARS).collect::<String>();
    truncated.push_str("...");
    truncated
}

pub fn clause_fingerprint(clause_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(clause_text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionEntry {
    pub clause_sha256: String,
    pub probabilities: LabelProbabilities,
}

#[derive(Debug, Clone, Default)]
pub struct PredictionTable {
    entries: HashMap<String, LabelProbabilities>,
}

impl PredictionTable {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PredictionEntry>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.clause_sha256.to_ascii_lowercase(), entry.probabilities))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LabelPredictor for PredictionTable {
    fn name(&self) -> &'static str {
        "prediction-table"
    }

    fn predict(&self, input: &PredictionInput<'_>) -> Result<LabelProbabilities, AnalysisError> {
        let fingerprint = clause_fingerprint(input.clause_text);
        self.entries
            .get(&fingerprint)
            .copied()
            .ok_or_else(|| AnalysisError::Prediction(format!("no entry for clause {fingerprint}")))
    }
}
