use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    #[serde(rename = "clause_index")]
    pub index: usize,
    #[serde(rename = "clause_text")]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

impl RiskLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn score_band(self) -> (f64, f64) {
        match self {
            Self::Low => (5.0, 20.0),
            Self::Medium => (35.0, 70.0),
            Self::High => (80.0, 100.0),
        }
    }

    pub fn aggregate_weight(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 1.5,
            Self::High => 2.0,
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(rename = "risk_label")]
    pub label: RiskLabel,
    #[serde(rename = "risk_score")]
    pub score: f64,
    pub explanation: String,
    #[serde(rename = "suggested_mitigation")]
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseAnalysis {
    #[serde(flatten)]
    pub clause: Clause,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    #[serde(rename = "global_risk_score")]
    pub global_score: f64,
    pub total_clauses: usize,
    #[serde(rename = "high_risk_count")]
    pub high_count: usize,
    #[serde(rename = "medium_risk_count")]
    pub medium_count: usize,
    #[serde(rename = "low_risk_count")]
    pub low_count: usize,
    pub clauses: Vec<ClauseAnalysis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationStrategy {
    Structured,
    SentenceFallback,
}

impl SegmentationStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::SentenceFallback => "sentence_fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    ClauseTruncated {
        clause_index: usize,
        original_chars: usize,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClauseTruncated {
                clause_index,
                original_chars,
            } => write!(
                f,
                "clause {clause_index} truncated from {original_chars} characters"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub clauses: Vec<Clause>,
    pub strategy: SegmentationStrategy,
    pub advisories: Vec<Advisory>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub analysis: DocumentAnalysis,
    pub strategy: SegmentationStrategy,
    pub classifier: &'static str,
    pub advisories: Vec<Advisory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub report_version: u32,
    pub generated_at: String,
    pub source_path: String,
    pub source_sha256: String,
    pub classifier: String,
    pub segmentation_strategy: SegmentationStrategy,
    pub warnings: Vec<String>,
    pub analysis: DocumentAnalysis,
}
