use regex::{Captures, Regex, RegexSet};

use crate::error::AnalysisError;

use super::normalize::{char_len, collapse_whitespace};
use super::segment::{SegmentStrategy, Span};
use super::validate::MIN_CLAUSE_CHARS;
use super::{compile_pattern, compile_pattern_set};

pub const LETTERED_SPLIT_MIN_CHARS: usize = 2000;
pub const PARAGRAPH_MIN_CHARS: usize = 50;
pub const SENTENCE_GROUP_CHARS: usize = 200;

const PARAGRAPH_MARKERS: &[&str] = &[
    r"\AARTICLE[—\-\s]+\d+",
    r"\A\d+\.\d+\s+",
    r"\A\d+[.)]\s+",
    r"\A[a-z][.)]\s+",
    r"\AWHEREAS\s+",
    r"\ATHEREFORE\s+",
    r"\ANOW\s+THEREFORE\s+",
    r"\AIN\s+CONSIDERATION\s+",
    r"\ATHE\s+PARTIES\s+AGREE\s+",
    r"\ASection\s+\d+",
    r"\AClause\s+\d+",
];

const OPERATIVE_WORDS: &str = r"(?i)\b(?:shall|must|will|agrees?|warrants?|represents?|agreement|contract|tenant|landlord|party|parties|service|provider|institute)\b";

#[derive(Debug, Clone, Copy)]
struct Marker<'a> {
    start: usize,
    end: usize,
    number: &'a str,
}

fn walk_numbered<'a, F>(span: &'a str, markers: &[Marker<'a>], mut emit: F) -> Vec<String>
where
    F: FnMut(&'a str, &'a str, &mut Vec<String>),
{
    let mut clauses = Vec::new();

    if let Some(first) = markers.first() {
        let prefix = span[..first.start].trim();
        if char_len(prefix) > MIN_CLAUSE_CHARS {
            clauses.push(prefix.to_string());
        }
    }

    for (position, marker) in markers.iter().enumerate() {
        let body_end = markers
            .get(position + 1)
            .map_or(span.len(), |next| next.start);
        let body = span[marker.end..body_end].trim();
        emit(marker.number, body, &mut clauses);
    }

    clauses
}

fn split_points(text: &str, anchored: &Regex) -> Vec<usize> {
    text.match_indices('\n')
        .map(|(offset, _)| offset)
        .filter(|offset| anchored.is_match(&text[*offset..]))
        .collect()
}

fn split_before<'a>(text: &'a str, points: &[usize]) -> Vec<&'a str> {
    let mut parts = Vec::with_capacity(points.len() + 1);
    let mut start = 0usize;
    for point in points {
        parts.push(&text[start..*point]);
        start = *point;
    }
    parts.push(&text[start..]);
    parts
}

#[derive(Debug)]
pub struct DecimalSplitter {
    marker: Regex,
}

impl DecimalSplitter {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            marker: compile_pattern("decimal marker", r"(?m)(?:^|\n)\s*(\d+\.\d+\s+)")?,
        })
    }

    fn markers<'a>(&self, span: &'a str) -> Vec<Marker<'a>> {
        self.marker
            .captures_iter(span)
            .filter_map(|captures| {
                let whole = captures.get(0)?;
                let number = captures.get(1)?;
                Some(Marker {
                    start: whole.start(),
                    end: whole.end(),
                    number: number.as_str(),
                })
            })
            .collect()
    }
}

impl SegmentStrategy for DecimalSplitter {
    fn name(&self) -> &'static str {
        "decimal"
    }

    fn try_segment(&self, span: Span<'_>) -> Option<Vec<String>> {
        let span = span.text;
        let markers = self.markers(span);
        if markers.is_empty() {
            return None;
        }

        // Indented sub-items start a line too, so the marker scan already
        // claims them as clauses of their own.
        Some(walk_numbered(span, &markers, |number, body, clauses| {
            clauses.push(format!("{number}{body}"));
        }))
    }
}

#[derive(Debug)]
pub struct IntegerSplitter {
    marker: Regex,
    lettered_marker: Regex,
    leading_digit: Regex,
}

impl IntegerSplitter {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            marker: compile_pattern("integer marker", r"(?m)(?:^|\n)\s*(\d+[.)])(\s+)")?,
            lettered_marker: compile_pattern("lettered marker", r"(?i)\A\n\s+[a-z][.)]\s+")?,
            leading_digit: compile_pattern("leading digit", r"\A\d")?,
        })
    }

    fn markers<'a>(&self, span: &'a str) -> Vec<Marker<'a>> {
        self.marker
            .captures_iter(span)
            .filter_map(|captures| self.accept_marker(span, &captures))
            .collect()
    }

    // "1. 5 days" is a value, not a marker: the gap must leave one
    // whitespace char in front of the digit.
    fn accept_marker<'a>(&self, span: &'a str, captures: &Captures<'a>) -> Option<Marker<'a>> {
        let whole = captures.get(0)?;
        let number = captures.get(1)?;
        let gap = captures.get(2)?;

        if !self.leading_digit.is_match(&span[whole.end()..]) {
            return Some(Marker {
                start: whole.start(),
                end: whole.end(),
                number: &span[number.start()..gap.end()],
            });
        }

        let last_gap_char = gap.as_str().chars().next_back()?;
        if gap.as_str().chars().count() < 2 {
            return None;
        }

        let end = gap.end() - last_gap_char.len_utf8();
        Some(Marker {
            start: whole.start(),
            end,
            number: &span[number.start()..end],
        })
    }
}

impl SegmentStrategy for IntegerSplitter {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn try_segment(&self, span: Span<'_>) -> Option<Vec<String>> {
        let span = span.text;
        let markers = self.markers(span);
        if markers.is_empty() {
            return None;
        }

        Some(walk_numbered(span, &markers, |number, body, clauses| {
            let points = if char_len(body) > LETTERED_SPLIT_MIN_CHARS {
                split_points(body, &self.lettered_marker)
            } else {
                Vec::new()
            };

            if points.is_empty() {
                clauses.push(format!("{number}{body}"));
                return;
            }

            for part in split_before(body, &points) {
                let part = part.trim();
                if !part.is_empty() {
                    clauses.push(format!("{number}{part}"));
                }
            }
        }))
    }
}

#[derive(Debug)]
pub struct ParagraphSplitter {
    paragraph_break: Regex,
    markers: RegexSet,
    operative_words: Regex,
}

impl ParagraphSplitter {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            paragraph_break: compile_pattern("paragraph break", r"\n\s*\n+")?,
            markers: compile_pattern_set("paragraph marker", PARAGRAPH_MARKERS)?,
            operative_words: compile_pattern("operative word", OPERATIVE_WORDS)?,
        })
    }

    fn keep(&self, paragraph: &str, lenient: bool) -> bool {
        if self.markers.is_match(paragraph) {
            return true;
        }

        lenient
            && char_len(paragraph) > PARAGRAPH_MIN_CHARS
            && self.operative_words.is_match(paragraph)
    }
}

impl SegmentStrategy for ParagraphSplitter {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn try_segment(&self, span: Span<'_>) -> Option<Vec<String>> {
        let paragraphs = self
            .paragraph_break
            .split(span.text)
            .map(collapse_whitespace)
            .filter(|paragraph| !paragraph.is_empty())
            .collect::<Vec<String>>();

        // A whole document without a single blank line has no paragraph
        // structure; only a leading structural marker makes it a clause.
        let lenient = paragraphs.len() > 1 || !span.whole_document;
        let kept = paragraphs
            .into_iter()
            .filter(|paragraph| self.keep(paragraph, lenient))
            .collect::<Vec<String>>();

        if kept.is_empty() { None } else { Some(kept) }
    }
}

#[derive(Debug)]
pub struct SentenceGrouper {
    boundary: Regex,
}

impl SentenceGrouper {
    pub fn new() -> Result<Self, AnalysisError> {
        Ok(Self {
            boundary: compile_pattern("sentence boundary", r"[.!?]+\s+")?,
        })
    }

    pub fn group(&self, text: &str) -> Vec<String> {
        let normalized = collapse_whitespace(text);
        let sentences = self.split_sentences(&normalized);
        let total = sentences.len();

        let mut clauses = Vec::new();
        let mut current = String::new();

        for (position, sentence) in sentences.into_iter().enumerate() {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }

            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(sentence);

            if char_len(&current) > SENTENCE_GROUP_CHARS || position + 1 == total {
                flush_group(&mut clauses, &mut current);
            }
        }

        flush_group(&mut clauses, &mut current);
        clauses
    }

    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0usize;

        for boundary in self.boundary.find_iter(text) {
            let next_is_capital = text[boundary.end()..]
                .chars()
                .next()
                .is_some_and(char::is_uppercase);
            if next_is_capital {
                sentences.push(&text[start..boundary.end()]);
                start = boundary.end();
            }
        }

        if start < text.len() {
            sentences.push(&text[start..]);
        }

        sentences
    }
}

fn flush_group(clauses: &mut Vec<String>, current: &mut String) {
    let group = current.trim();
    if char_len(group) > MIN_CLAUSE_CHARS {
        clauses.push(group.to_string());
    }
    current.clear();
}
