pub mod engine;
pub mod error;
pub mod model;

pub use engine::{ClauseClassifier, ContractRiskEngine, RuleBasedClassifier};
pub use error::AnalysisError;
pub use model::{
    AnalysisOutcome, Clause, ClauseAnalysis, DocumentAnalysis, RiskAssessment, RiskLabel,
};
