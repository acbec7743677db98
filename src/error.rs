use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no clause of at least {min_chars} characters could be segmented from the document")]
    SegmentationEmpty { min_chars: usize },

    #[error("failed to compile {name} pattern: {source}")]
    PatternCompile {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("prediction failed: {0}")]
    Prediction(String),
}
