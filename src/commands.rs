pub mod analyze;
pub mod classify;
pub mod segment;
#[cfg(test)]
mod tests;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clause_risk::engine::{
    ClauseClassifier, PredictionEntry, PredictionTable, PredictorClassifier, RuleBasedClassifier,
};
use tracing::{info, warn};

use crate::cli::{ClassifierArgs, ClassifierMode};
use crate::util::sha256_bytes;

const PREVIEW_CHARS: usize = 96;

#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub text: String,
    pub sha256: String,
    pub lossy: bool,
}

pub fn read_document(path: &Path) -> Result<SourceDocument> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let sha256 = sha256_bytes(&raw);

    let (text, lossy) = match String::from_utf8(raw) {
        Ok(text) => (text, false),
        Err(err) => {
            warn!(
                path = %path.display(),
                valid_up_to = err.utf8_error().valid_up_to(),
                "input is not valid UTF-8, decoding lossily"
            );
            (String::from_utf8_lossy(err.as_bytes()).into_owned(), true)
        }
    };

    info!(path = %path.display(), bytes = text.len(), "read document");
    Ok(SourceDocument {
        text,
        sha256,
        lossy,
    })
}

pub fn build_classifier(args: &ClassifierArgs) -> Result<Arc<dyn ClauseClassifier>> {
    match args.classifier {
        ClassifierMode::Rules => Ok(Arc::new(RuleBasedClassifier::new()?)),
        ClassifierMode::PredictionTable => {
            let Some(path) = args.prediction_table.as_deref() else {
                bail!(
                    "--prediction-table (or CLAUSE_RISK_PREDICTION_TABLE) is required with --classifier {}",
                    args.classifier.as_str()
                );
            };
            let table = load_prediction_table(path)?;
            Ok(Arc::new(PredictorClassifier::new(table)?))
        }
    }
}

pub fn load_prediction_table(path: &Path) -> Result<PredictionTable> {
    let raw = fs::read(path)
        .with_context(|| format!("failed to read prediction table {}", path.display()))?;
    let entries: Vec<PredictionEntry> = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse prediction table {}", path.display()))?;

    let table = PredictionTable::from_entries(entries);
    if table.is_empty() {
        warn!(path = %path.display(), "prediction table is empty, every clause will be scored by rules");
    } else {
        info!(path = %path.display(), entries = table.len(), "loaded prediction table");
    }

    Ok(table)
}

pub fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }

    let mut preview = text.chars().take(PREVIEW_CHARS).collect::<String>();
    preview.push_str("...");
    preview
}
