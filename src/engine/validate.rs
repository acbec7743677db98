use tracing::{debug, warn};

use crate::model::{Advisory, Clause};

use super::normalize::{char_len, collapse_whitespace};

pub const MIN_CLAUSE_CHARS: usize = 15;
pub const MAX_CLAUSE_CHARS: usize = 10_000;
pub const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Default)]
pub struct ValidatedClauses {
    pub clauses: Vec<Clause>,
    pub advisories: Vec<Advisory>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ClauseValidator;

impl ClauseValidator {
    pub fn validate<I, S>(&self, candidates: I) -> ValidatedClauses
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validated = ValidatedClauses::default();
        let mut dropped = 0usize;

        for candidate in candidates {
            let text = collapse_whitespace(candidate.as_ref());
            let chars = char_len(&text);
            if chars < MIN_CLAUSE_CHARS {
                dropped += 1;
                continue;
            }

            let index = validated.clauses.len();
            let text = if chars > MAX_CLAUSE_CHARS {
                warn!(
                    clause_index = index,
                    original_chars = chars,
                    max_chars = MAX_CLAUSE_CHARS,
                    "clause truncated"
                );
                validated.advisories.push(Advisory::ClauseTruncated {
                    clause_index: index,
                    original_chars: chars,
                });
                let mut truncated = text.chars().take(MAX_CLAUSE_CHARS).collect::<String>();
                truncated.push_str(TRUNCATION_MARKER);
                truncated
            } else {
                text
            };

            validated.clauses.push(Clause { index, text });
        }

        if dropped > 0 {
            debug!(
                dropped,
                kept = validated.clauses.len(),
                "dropped clause candidates below minimum length"
            );
        }

        validated
    }
}
