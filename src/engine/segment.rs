use regex::Regex;
use tracing::{debug, info};

use crate::error::AnalysisError;
use crate::model::{Segmentation, SegmentationStrategy};

use super::compile_pattern;
use super::normalize::normalize_text;
use super::strategies::{DecimalSplitter, IntegerSplitter, ParagraphSplitter, SentenceGrouper};
use super::validate::{ClauseValidator, MIN_CLAUSE_CHARS};

#[derive(Debug, Clone, Copy)]
pub struct Span<'a> {
    pub text: &'a str,
    pub whole_document: bool,
}

pub trait SegmentStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn try_segment(&self, span: Span<'_>) -> Option<Vec<String>>;
}

#[derive(Debug)]
pub struct ArticleSplitter {
    header: Regex,
}

impl ArticleSplitter {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            header: compile_pattern("article header", r"(?i)ARTICLE[—\-\s]+\d+")?,
        })
    }

    pub fn split<'a>(&self, text: &'a str) -> Vec<Span<'a>> {
        let starts = self
            .header
            .find_iter(text)
            .map(|header| header.start())
            .collect::<Vec<usize>>();

        let Some(first) = starts.first().copied() else {
            return vec![Span {
                text,
                whole_document: true,
            }];
        };

        let mut spans = Vec::with_capacity(starts.len() + 1);
        let prefix = text[..first].trim();
        if !prefix.is_empty() {
            spans.push(Span {
                text: prefix,
                whole_document: false,
            });
        }

        for (position, start) in starts.iter().enumerate() {
            let end = starts.get(position + 1).copied().unwrap_or(text.len());
            spans.push(Span {
                text: &text[*start..end],
                whole_document: false,
            });
        }

        spans
    }
}

pub struct SegmentationEngine {
    articles: ArticleSplitter,
    cascade: Vec<Box<dyn SegmentStrategy>>,
    fallback: SentenceGrouper,
    validator: ClauseValidator,
}

impl SegmentationEngine {
    pub fn new() -> Result<Self, AnalysisError> {
        let cascade: Vec<Box<dyn SegmentStrategy>> = vec![
            Box::new(DecimalSplitter::new()?),
            Box::new(IntegerSplitter::new()?),
            Box::new(ParagraphSplitter::new()?),
        ];

        Ok(Self {
            articles: ArticleSplitter::new()?,
            cascade,
            fallback: SentenceGrouper::new()?,
            validator: ClauseValidator,
        })
    }

    pub fn segment(&self, text: &str) -> Result<Segmentation, AnalysisError> {
        let normalized = normalize_text(text);
        if normalized.trim().is_empty() {
            return Err(AnalysisError::SegmentationEmpty {
                min_chars: MIN_CLAUSE_CHARS,
            });
        }

        let structured = self.validator.validate(self.structured_candidates(&normalized));
        if !structured.clauses.is_empty() {
            info!(
                clauses = structured.clauses.len(),
                strategy = SegmentationStrategy::Structured.as_str(),
                "segmented document"
            );
            return Ok(Segmentation {
                clauses: structured.clauses,
                strategy: SegmentationStrategy::Structured,
                advisories: structured.advisories,
            });
        }

        debug!("no structured clause survived validation, grouping sentences");
        let grouped = self.validator.validate(self.fallback.group(&normalized));
        if grouped.clauses.is_empty() {
            return Err(AnalysisError::SegmentationEmpty {
                min_chars: MIN_CLAUSE_CHARS,
            });
        }

        info!(
            clauses = grouped.clauses.len(),
            strategy = SegmentationStrategy::SentenceFallback.as_str(),
            "segmented document"
        );
        Ok(Segmentation {
            clauses: grouped.clauses,
            strategy: SegmentationStrategy::SentenceFallback,
            advisories: grouped.advisories,
        })
    }

    fn structured_candidates(&self, text: &str) -> Vec<String> {
        let spans = self.articles.split(text);
        debug!(spans = spans.len(), "split document into article spans");

        spans
            .into_iter()
            .flat_map(|span| self.segment_span(span))
            .collect()
    }

    fn segment_span(&self, span: Span<'_>) -> Vec<String> {
        for strategy in &self.cascade {
            if let Some(parts) = strategy.try_segment(span) {
                debug!(strategy = strategy.name(), parts = parts.len(), "span segmented");
                return parts;
            }
        }

        debug!(chars = span.text.len(), "span matched no segmentation strategy");
        Vec::new()
    }
}
