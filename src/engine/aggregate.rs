use crate::model::{ClauseAnalysis, DocumentAnalysis, RiskLabel};

use super::lexicon::SEVERITY_KEYWORDS;
use super::score::round2;

pub const SEVERITY_MULTIPLIER: f64 = 1.3;

pub fn clause_weight(analysis: &ClauseAnalysis) -> f64 {
    let weight = analysis.assessment.label.aggregate_weight();
    let text = analysis.clause.text.to_lowercase();
    if SEVERITY_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        weight * SEVERITY_MULTIPLIER
    } else {
        weight
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedScore {
    pub weighted_sum: f64,
    pub total_weight: f64,
}

impl WeightedScore {
    pub fn add(&mut self, score: f64, weight: f64) {
        self.weighted_sum += score * weight;
        self.total_weight += weight;
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            weighted_sum: self.weighted_sum + other.weighted_sum,
            total_weight: self.total_weight + other.total_weight,
        }
    }

    pub fn global_score(&self) -> f64 {
        if self.total_weight <= 0.0 {
            return 0.0;
        }
        (self.weighted_sum / self.total_weight).clamp(0.0, 100.0)
    }
}

pub fn aggregate(clauses: Vec<ClauseAnalysis>) -> DocumentAnalysis {
    let mut weighted = WeightedScore::default();
    let (mut high_count, mut medium_count, mut low_count) = (0usize, 0usize, 0usize);

    for analysis in &clauses {
        weighted.add(analysis.assessment.score, clause_weight(analysis));
        match analysis.assessment.label {
            RiskLabel::High => high_count += 1,
            RiskLabel::Medium => medium_count += 1,
            RiskLabel::Low => low_count += 1,
        }
    }

    DocumentAnalysis {
        global_score: round2(weighted.global_score()),
        total_clauses: clauses.len(),
        high_count,
        medium_count,
        low_count,
        clauses,
    }
}
