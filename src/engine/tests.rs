use super::strategies::{IntegerSplitter, ParagraphSplitter, SentenceGrouper};
use super::*;
use crate::model::{Advisory, RiskAssessment, RiskLabel, SegmentationStrategy};

fn engine() -> ContractRiskEngine {
    ContractRiskEngine::with_rules().expect("rule engine should build")
}

fn rules() -> RuleBasedClassifier {
    RuleBasedClassifier::new().expect("rule classifier should build")
}

fn clause_texts(text: &str) -> Vec<String> {
    engine()
        .segment(text)
        .expect("segmentation should succeed")
        .clauses
        .into_iter()
        .map(|clause| clause.text)
        .collect()
}

fn scored(index: usize, text: &str, label: RiskLabel, score: f64) -> ClauseAnalysis {
    ClauseAnalysis {
        clause: Clause {
            index,
            text: text.to_string(),
        },
        assessment: RiskAssessment {
            label,
            score,
            explanation: String::new(),
            mitigation: String::new(),
        },
    }
}

struct FixedPredictor(LabelProbabilities);

impl LabelPredictor for FixedPredictor {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn predict(&self, _input: &PredictionInput<'_>) -> Result<LabelProbabilities, AnalysisError> {
        Ok(self.0)
    }
}

#[test]
fn normalize_text_unifies_line_endings_and_caps_blank_runs() {
    assert_eq!(normalize_text("a\r\nb\rc\n\n\n\nd"), "a\nb\nc\n\nd");
    assert_eq!(normalize_text("plain"), "plain");
}

#[test]
fn collapse_whitespace_joins_on_single_spaces() {
    assert_eq!(collapse_whitespace("  one\n\ttwo   three "), "one two three");
}

#[test]
fn decimal_markers_produce_one_clause_each() {
    let clauses = clause_texts("1.0 Tenant shall pay rent monthly.\n1.1 Late fee applies after five days.");

    assert_eq!(
        clauses,
        vec![
            "1.0 Tenant shall pay rent monthly.".to_string(),
            "1.1 Late fee applies after five days.".to_string(),
        ]
    );
}

#[test]
fn indented_decimal_items_are_separate_clauses() {
    let text = "1.1 Payment terms for the premises.\n   1.2 Rent is due on the first day.\n2.1 The landlord maintains the roof.";
    let clauses = clause_texts(text);

    assert_eq!(clauses.len(), 3);
    assert!(clauses[0].starts_with("1.1 Payment"));
    assert!(clauses[1].starts_with("1.2 Rent"));
    assert!(clauses[2].starts_with("2.1 The landlord"));
}

#[test]
fn integer_markers_accept_dot_and_paren() {
    let text = "1. The Tenant shall pay rent on the first day.\n2) The Landlord shall maintain the roof.\n3. Notice period is five days.";
    let clauses = clause_texts(text);

    assert_eq!(clauses.len(), 3);
    assert!(clauses[0].starts_with("1. The Tenant"));
    assert!(clauses[1].starts_with("2) The Landlord"));
    assert!(clauses[2].starts_with("3. Notice"));
}

#[test]
fn integer_followed_by_value_is_not_a_marker() {
    let text = "1. 5 apples are owed by the tenant to the landlord\n2. Payment is due monthly to the landlord.";
    let clauses = clause_texts(text);

    assert_eq!(
        clauses,
        vec![
            "1. 5 apples are owed by the tenant to the landlord".to_string(),
            "2. Payment is due monthly to the landlord.".to_string(),
        ]
    );
}

#[test]
fn integer_marker_with_wide_gap_before_value_is_kept() {
    let splitter = IntegerSplitter::new().expect("integer splitter should build");
    let parts = splitter
        .try_segment(Span {
            text: "1.  5 days notice is required before entry.",
            whole_document: true,
        })
        .expect("marker should be accepted");

    assert_eq!(parts, vec!["1. 5 days notice is required before entry.".to_string()]);
}

#[test]
fn non_ascii_numerals_after_marker_are_body_text() {
    let splitter = IntegerSplitter::new().expect("integer splitter should build");

    for text in ["1. ½ month deposit is held.", "2. ² of the floor area is shared."] {
        let parts = splitter
            .try_segment(Span {
                text,
                whole_document: true,
            })
            .expect("marker should be accepted");
        assert_eq!(parts, vec![text.to_string()]);
    }
}

#[test]
fn long_integer_bodies_split_on_lettered_items() {
    let filler = "The tenant shall keep the premises clean and tidy. ".repeat(25);
    let text = format!(
        "1. General obligations of the tenant follow.\n  a) {filler}\n  b) {filler}\n2. The landlord shall insure the building."
    );
    let clauses = clause_texts(&text);

    assert_eq!(clauses.len(), 4);
    assert_eq!(clauses[0], "1. General obligations of the tenant follow.");
    assert!(clauses[1].starts_with("1. a) The tenant shall keep"));
    assert!(clauses[2].starts_with("1. b) The tenant shall keep"));
    assert_eq!(clauses[3], "2. The landlord shall insure the building.");
}

#[test]
fn short_integer_bodies_keep_lettered_items_together() {
    let text = "1. General obligations of the tenant follow.\n  a) Keep the premises clean.\n  b) Report damage promptly.\n2. The landlord shall insure the building.";
    let clauses = clause_texts(text);

    assert_eq!(clauses.len(), 2);
    assert!(clauses[0].contains("a) Keep the premises clean."));
    assert!(clauses[0].contains("b) Report damage promptly."));
}

#[test]
fn article_headers_split_before_the_cascade() {
    let text = "Lease between the parties named below for the city flat.\nARTICLE 1 Rent\nThe tenant shall pay rent monthly to the landlord.\nARTICLE 2 Repairs\nThe landlord shall carry out structural repairs.";
    let clauses = clause_texts(text);

    assert_eq!(clauses.len(), 3);
    assert!(clauses[0].starts_with("Lease between"));
    assert_eq!(
        clauses[1],
        "ARTICLE 1 Rent The tenant shall pay rent monthly to the landlord."
    );
    assert!(clauses[2].starts_with("ARTICLE 2 Repairs"));
}

#[test]
fn article_splitter_marks_whole_document_only_without_headers() {
    let splitter = ArticleSplitter::new().expect("article splitter should build");

    let plain = splitter.split("no headers here at all");
    assert_eq!(plain.len(), 1);
    assert!(plain[0].whole_document);

    let headed = splitter.split("Preamble text\nArticle-2 Scope of works");
    assert_eq!(headed.len(), 2);
    assert_eq!(headed[0].text, "Preamble text");
    assert!(headed.iter().all(|span| !span.whole_document));
}

#[test]
fn paragraphs_need_a_marker_or_operative_wording() {
    let text = "WHEREAS the parties wish to enter into a lease.\n\nThe tenant shall pay the agreed rent on time every month to the landlord.\n\nShort note.";
    let segmentation = engine().segment(text).expect("segmentation should succeed");

    assert_eq!(segmentation.strategy, SegmentationStrategy::Structured);
    assert_eq!(segmentation.clauses.len(), 2);
    assert!(segmentation.clauses[0].text.starts_with("WHEREAS"));
    assert!(segmentation.clauses[1].text.starts_with("The tenant shall pay"));
}

#[test]
fn unbroken_document_is_not_a_paragraph() {
    let splitter = ParagraphSplitter::new().expect("paragraph splitter should build");
    let prose = "The tenant shall keep the premises in good order throughout the lease term.";

    assert!(
        splitter
            .try_segment(Span {
                text: prose,
                whole_document: true,
            })
            .is_none()
    );
    assert_eq!(
        splitter.try_segment(Span {
            text: prose,
            whole_document: false,
        }),
        Some(vec![prose.to_string()])
    );
}

#[test]
fn unstructured_prose_falls_back_to_sentence_groups() {
    let text = "The Tenant agrees to keep the premises in good and clean order. The Landlord will repair structural defects within a reasonable time. Both parties shall act in good faith in all dealings under this lease. Rent is payable monthly in advance by bank transfer to the Landlord. Any notice must be given in writing to the other party.";
    let segmentation = engine().segment(text).expect("segmentation should succeed");

    assert_eq!(segmentation.strategy, SegmentationStrategy::SentenceFallback);
    assert_eq!(segmentation.clauses.len(), 2);
    assert!(segmentation.clauses[0].text.ends_with("this lease."));
    assert!(segmentation.clauses[1].text.starts_with("Rent is payable"));
    for (position, clause) in segmentation.clauses.iter().enumerate() {
        assert_eq!(clause.index, position);
    }
}

#[test]
fn sentence_boundaries_require_a_capital_letter() {
    let grouper = SentenceGrouper::new().expect("sentence grouper should build");
    let groups = grouper.group("Rent is due on the 1st. of each month unless agreed otherwise. Notice must be written.");

    assert_eq!(
        groups,
        vec!["Rent is due on the 1st. of each month unless agreed otherwise. Notice must be written.".to_string()]
    );
}

#[test]
fn empty_or_tiny_documents_fail_segmentation() {
    let engine = engine();

    assert!(matches!(
        engine.segment("   \n\n  "),
        Err(AnalysisError::SegmentationEmpty { min_chars: 15 })
    ));
    assert!(matches!(
        engine.analyze("too short."),
        Err(AnalysisError::SegmentationEmpty { .. })
    ));
}

#[test]
fn validator_drops_short_and_truncates_long_clauses() {
    let long = "a".repeat(MAX_CLAUSE_CHARS + 50);
    let validated = ClauseValidator.validate(["tiny", long.as_str(), "  a   normal   sized clause  "]);

    assert_eq!(validated.clauses.len(), 2);
    assert_eq!(validated.clauses[0].index, 0);
    assert_eq!(
        validated.clauses[0].text.chars().count(),
        MAX_CLAUSE_CHARS + TRUNCATION_MARKER.len()
    );
    assert!(validated.clauses[0].text.ends_with(TRUNCATION_MARKER));
    assert_eq!(validated.clauses[1].index, 1);
    assert_eq!(validated.clauses[1].text, "a normal sized clause");
    assert_eq!(
        validated.advisories,
        vec![Advisory::ClauseTruncated {
            clause_index: 0,
            original_chars: MAX_CLAUSE_CHARS + 50,
        }]
    );
}

#[test]
fn entry_without_notice_is_high_risk() {
    let evaluation = rules().evaluate(
        "The Landlord or their agents may enter the premises at any time, without prior notice, for inspection.",
    );

    assert!(evaluation.counts.high_patterns >= 1);
    assert_eq!(evaluation.decision.label, RiskLabel::High);
    assert_eq!(evaluation.decision.rule, DecisionRule::HighIndicators);
    assert!(evaluation.decision.score >= 80.0);
}

#[test]
fn repeated_high_keyword_counts_twice() {
    let text = "Tenant shall pay liquidated damages.";
    let evaluation = rules().evaluate(text);

    assert_eq!(evaluation.counts.high_keywords, 2);
    assert_eq!(evaluation.decision.rule, DecisionRule::HighIndicators);
    assert_eq!(rules().classify(text).label, RiskLabel::High);
    assert_eq!(rules().classify(text).score, 86.0);
}

#[test]
fn repeated_medium_keywords_count_twice() {
    let severability = rules().evaluate("The severability of each provision is agreed.");
    assert_eq!(severability.counts.high_keywords, 1);
    assert_eq!(severability.counts.medium_keywords, 2);
    assert_eq!(severability.decision.label, RiskLabel::Medium);
    assert_eq!(severability.decision.score, 57.0);

    let modification = rules().evaluate("Any modification must be signed by both.");
    assert_eq!(modification.counts.medium_keywords, 2);
    assert_eq!(modification.decision.rule, DecisionRule::MediumIndicators);
    assert_eq!(modification.decision.score, 45.0);
}

#[test]
fn boilerplate_opener_is_low_risk() {
    let text = "THIS AGREEMENT has been made on this 10th day of January, 2023 between A and B.";
    let assessment = rules().classify(text);
    let evaluation = rules().evaluate(text);

    assert!(evaluation.counts.is_boilerplate);
    assert_eq!(evaluation.decision.rule, DecisionRule::Boilerplate);
    assert_eq!(assessment.label, RiskLabel::Low);
    let expected = 5 + (text.chars().count() / 100).min(15);
    assert_eq!(assessment.score, expected as f64);
}

#[test]
fn boilerplate_with_one_high_keyword_is_not_overridden() {
    let evaluation = rules().evaluate(
        "Confidentiality: each party shall keep the terms confidential and protect trade secrets.",
    );

    assert!(evaluation.counts.is_boilerplate);
    assert_eq!(evaluation.counts.high_total(), 1);
    assert_eq!(evaluation.decision.label, RiskLabel::Medium);
    assert_eq!(evaluation.decision.rule, DecisionRule::MixedIndicators);
}

#[test]
fn score_calculator_follows_branch_order() {
    let calculator = ScoreCalculator;

    let many_high = SignalCounts {
        high_keywords: 5,
        high_patterns: 4,
        ..SignalCounts::default()
    };
    let decision = calculator.decide(&many_high, 120);
    assert_eq!(decision.label, RiskLabel::High);
    assert_eq!(decision.score, 100.0);

    let long_single_high = SignalCounts {
        high_keywords: 1,
        ..SignalCounts::default()
    };
    assert_eq!(calculator.decide(&long_single_high, 201).label, RiskLabel::High);
    assert_eq!(calculator.decide(&long_single_high, 150).score, 49.0);

    let two_medium_patterns = SignalCounts {
        medium_patterns: 2,
        ..SignalCounts::default()
    };
    let decision = calculator.decide(&two_medium_patterns, 80);
    assert_eq!(decision.rule, DecisionRule::MixedIndicators);
    assert_eq!(decision.score, 53.0);

    let one_medium = SignalCounts {
        medium_keywords: 1,
        ..SignalCounts::default()
    };
    let decision = calculator.decide(&one_medium, 80);
    assert_eq!(decision.rule, DecisionRule::MediumIndicators);
    assert_eq!(decision.score, 40.0);

    let nothing = calculator.decide(&SignalCounts::default(), 2_000);
    assert_eq!(nothing.rule, DecisionRule::NoSignalMatched);
    assert_eq!(nothing.score, 20.0);
}

#[test]
fn rule_scores_stay_inside_label_bands() {
    let classifier = rules();
    let long_plain = "The parties met and discussed the weather. ".repeat(40);
    let samples = [
        "The Landlord reserves the right to modify or amend any term of this lease at any time.",
        "Tenant shall indemnify and hold harmless the Landlord, including claims arising from the Landlord's own negligence.",
        "Any dispute shall be settled by arbitration under the governing law of the state.",
        "The tenant may not sublet without prior written consent of the landlord.",
        "A late payment fee applies.",
        "The tenant shall pay monthly rent on or before the fifth day of each month.",
        "The colour of the front door is blue.",
        long_plain.as_str(),
    ];

    for sample in samples {
        let assessment = classifier.classify(sample);
        let (low, high) = assessment.label.score_band();
        assert!(
            (low..=high).contains(&assessment.score),
            "{sample}: {} scored {}",
            assessment.label,
            assessment.score
        );
        assert!(!assessment.explanation.is_empty());
        assert!(!assessment.mitigation.is_empty());
    }
}

#[test]
fn classification_is_deterministic() {
    let classifier = rules();
    let text = "Tenant shall pay a penalty equal to liquidated damages upon any breach of this lease.";

    assert_eq!(classifier.classify(text), classifier.classify(text));
}

#[test]
fn high_rationale_names_detected_risks() {
    let assessment = rules().classify(
        "Tenant shall indemnify and hold harmless the Landlord, including claims arising from the Landlord's own negligence, and pay liquidated damages.",
    );

    assert_eq!(assessment.label, RiskLabel::High);
    assert!(assessment.explanation.contains("own negligence"));
    assert!(assessment.explanation.contains("penalty or damage clauses"));
    assert!(!assessment.explanation.contains("indemnification language"));
    assert!(assessment.mitigation.starts_with("Consider: Limit indemnification"));
    assert!(assessment.mitigation.ends_with("Consult legal counsel before signing."));
}

#[test]
fn low_rationale_is_generic() {
    let assessment = rules().classify("The colour of the front door is blue.");

    assert_eq!(assessment.label, RiskLabel::Low);
    assert!(assessment.explanation.contains("standard, low-risk language"));
}

#[test]
fn weighted_average_matches_label_weights() {
    let analysis = aggregate(vec![
        scored(0, "The tenant may not keep reptiles.", RiskLabel::High, 90.0),
        scored(1, "The front door is painted blue.", RiskLabel::Low, 10.0),
    ]);

    assert_eq!(analysis.global_score, 63.33);
    assert_eq!(analysis.total_clauses, 2);
    assert_eq!(analysis.high_count, 1);
    assert_eq!(analysis.low_count, 1);
    assert_eq!(analysis.medium_count, 0);
}

#[test]
fn severity_keywords_raise_clause_weight() {
    let severe = scored(0, "Tenant accepts unlimited liability.", RiskLabel::High, 90.0);
    assert!((clause_weight(&severe) - 2.0 * SEVERITY_MULTIPLIER).abs() < 1e-9);

    let analysis = aggregate(vec![
        severe,
        scored(1, "The front door is painted blue.", RiskLabel::Low, 10.0),
    ]);
    assert_eq!(analysis.global_score, 67.78);
}

#[test]
fn empty_aggregate_scores_zero() {
    let analysis = aggregate(Vec::new());

    assert_eq!(analysis.global_score, 0.0);
    assert_eq!(analysis.total_clauses, 0);
}

#[test]
fn partial_weighted_scores_merge_in_any_order() {
    let mut left = WeightedScore::default();
    left.add(90.0, 2.0);
    let mut right = WeightedScore::default();
    right.add(10.0, 1.0);
    right.add(50.0, 1.5);

    assert_eq!(left.merge(right), right.merge(left));
    let merged = left.merge(right);
    assert!((merged.global_score() - 265.0 / 4.5).abs() < 1e-9);
}

#[test]
fn analysis_counts_add_up() {
    let text = "1. The Landlord may enter the premises at any time without prior notice.\n2. Any dispute shall be referred to arbitration.\n3. The colour of the front door is blue.";
    let outcome = engine().analyze(text).expect("analysis should succeed");
    let analysis = &outcome.analysis;

    assert_eq!(outcome.classifier, "rules");
    assert_eq!(outcome.strategy, SegmentationStrategy::Structured);
    assert_eq!(analysis.total_clauses, 3);
    assert_eq!(
        analysis.high_count + analysis.medium_count + analysis.low_count,
        analysis.total_clauses
    );
    assert_eq!(analysis.clauses[0].assessment.label, RiskLabel::High);
    assert_eq!(analysis.clauses[1].assessment.label, RiskLabel::Medium);
    assert_eq!(analysis.clauses[2].assessment.label, RiskLabel::Low);
    assert!((0.0..=100.0).contains(&analysis.global_score));
}

#[test]
fn clause_analysis_serializes_flat() {
    let value = serde_json::to_value(scored(3, "Tenant pays rent.", RiskLabel::Medium, 40.0))
        .expect("clause analysis should serialize");

    assert_eq!(value["clause_index"], 3);
    assert_eq!(value["clause_text"], "Tenant pays rent.");
    assert_eq!(value["risk_label"], "MEDIUM");
    assert_eq!(value["risk_score"], 40.0);
    assert!(value.get("suggested_mitigation").is_some());
}

#[test]
fn calibration_matches_label_formulas() {
    let high = calibrated_assessment(&LabelProbabilities {
        low: 0.1,
        medium: 0.2,
        high: 0.7,
    });
    assert_eq!(high.label, RiskLabel::High);
    assert!((high.score - 91.0).abs() < 1e-9);
    assert!(high.explanation.contains("confidence: 70.00%"));

    let damped = calibrated_assessment(&LabelProbabilities {
        low: 0.05,
        medium: 0.35,
        high: 0.6,
    });
    assert!((damped.score - 79.2).abs() < 1e-9);

    let boosted = calibrated_assessment(&LabelProbabilities {
        low: 0.2,
        medium: 0.5,
        high: 0.3,
    });
    assert_eq!(boosted.label, RiskLabel::Medium);
    assert!((boosted.score - 60.0).abs() < 1e-9);

    let low = calibrated_assessment(&LabelProbabilities {
        low: 0.8,
        medium: 0.1,
        high: 0.1,
    });
    assert_eq!(low.label, RiskLabel::Low);
    assert!((low.score - 24.0).abs() < 1e-9);
}

#[test]
fn calibrated_assessments_use_model_mitigation() {
    let medium = calibrated_assessment(&LabelProbabilities {
        low: 0.2,
        medium: 0.6,
        high: 0.2,
    });
    assert_eq!(
        medium.mitigation,
        "Review for clarity and ensure terms are balanced. Consider adding specific conditions or limitations."
    );

    let low = calibrated_assessment(&LabelProbabilities {
        low: 0.7,
        medium: 0.2,
        high: 0.1,
    });
    assert_eq!(
        low.mitigation,
        "This clause appears acceptable, but always review with legal counsel for your specific context."
    );

    let high = calibrated_assessment(&LabelProbabilities {
        low: 0.0,
        medium: 0.1,
        high: 0.9,
    });
    assert!(high.mitigation.ends_with("Consult legal counsel."));
}

#[test]
fn model_text_is_cleaned() {
    assert_eq!(
        prepare_model_text("Pay  the rent!!  on time,, \u{201C}now\u{201D}\u{0007}"),
        "Pay the rent! on time, \"now\""
    );
}

#[test]
fn prediction_table_looks_up_clause_fingerprint() {
    let text = "The tenant shall pay rent monthly.";
    let table = PredictionTable::from_entries([PredictionEntry {
        clause_sha256: clause_fingerprint(text).to_uppercase(),
        probabilities: LabelProbabilities {
            low: 0.05,
            medium: 0.05,
            high: 0.9,
        },
    }]);
    assert_eq!(table.len(), 1);

    let classifier = PredictorClassifier::new(table).expect("predictor classifier should build");
    assert_eq!(classifier.name(), "prediction-table");

    let assessment = classifier.classify(text);
    assert_eq!(assessment.label, RiskLabel::High);
    assert!((assessment.score - 97.0).abs() < 1e-9);
}

#[test]
fn missing_or_short_predictions_use_rules() {
    let classifier = PredictorClassifier::new(PredictionTable::default())
        .expect("predictor classifier should build");
    let baseline = rules();

    let unknown = "The colour of the front door is blue.";
    assert_eq!(classifier.classify(unknown), baseline.classify(unknown));

    let short = "Pay rent.";
    assert_eq!(classifier.classify(short), baseline.classify(short));
}

#[test]
fn out_of_range_probabilities_use_rules() {
    let classifier = PredictorClassifier::new(FixedPredictor(LabelProbabilities {
        low: 0.1,
        medium: 0.2,
        high: 1.5,
    }))
    .expect("predictor classifier should build");
    let text = "The colour of the front door is blue.";

    assert_eq!(classifier.classify(text), rules().classify(text));
}

#[test]
fn engine_reports_injected_classifier() {
    let predictor = PredictorClassifier::new(FixedPredictor(LabelProbabilities {
        low: 0.6,
        medium: 0.3,
        high: 0.1,
    }))
    .expect("predictor classifier should build");
    let engine = ContractRiskEngine::new(std::sync::Arc::new(predictor))
        .expect("engine should build");

    let outcome = engine
        .analyze("1. The tenant shall pay rent monthly.\n2. The landlord shall repair the roof.")
        .expect("analysis should succeed");

    assert_eq!(engine.classifier_name(), "fixed");
    assert_eq!(outcome.classifier, "fixed");
    assert_eq!(outcome.analysis.low_count, 2);
    assert!((outcome.analysis.global_score - 18.0).abs() < 1e-9);
}

#[test]
fn segmentation_is_repeatable() {
    let engine = engine();
    let text = "ARTICLE 1\n1.1 The tenant shall pay rent.\n1.2 The landlord shall repair the roof.\n\nWHEREAS the parties agree.";

    let first = engine.segment(text).expect("segmentation should succeed");
    let second = engine.segment(text).expect("segmentation should succeed");

    assert_eq!(first, second);
}

#[test]
fn boilerplate_overrides_medium_signals() {
    let evaluation = rules().evaluate(
        "This lease agreement covers termination, breach, default, dispute and arbitration terms.",
    );

    assert!(evaluation.counts.medium_total() >= 3);
    assert_eq!(evaluation.counts.high_total(), 0);
    assert_eq!(evaluation.decision.label, RiskLabel::Low);
    assert_eq!(evaluation.decision.score, 5.0);
}
