use std::fs;

use clap::Parser;
use clause_risk::engine::clause_fingerprint;
use clause_risk::model::{AnalysisReport, SegmentationStrategy};

use super::*;
use crate::cli::{AnalyzeArgs, Cli, Commands};

const LEASE: &str = "1. The Landlord may enter the premises at any time without prior notice.\n2. Any dispute shall be referred to arbitration.\n3. The colour of the front door is blue.\n";

fn rules_args() -> ClassifierArgs {
    ClassifierArgs {
        classifier: ClassifierMode::Rules,
        prediction_table: None,
    }
}

#[test]
fn read_document_hashes_raw_bytes() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("lease.txt");
    fs::write(&path, LEASE).expect("fixture should be written");

    let document = read_document(&path).expect("document should be read");

    assert_eq!(document.text, LEASE);
    assert!(!document.lossy);
    assert_eq!(document.sha256, sha256_bytes(LEASE.as_bytes()));
}

#[test]
fn read_document_decodes_invalid_utf8_lossily() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("broken.txt");
    fs::write(&path, b"Tenant shall pay \xff rent monthly.").expect("fixture should be written");

    let document = read_document(&path).expect("document should be read");

    assert!(document.lossy);
    assert!(document.text.contains('\u{FFFD}'));
    assert!(document.text.ends_with("rent monthly."));
}

#[test]
fn read_document_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let err = read_document(&dir.path().join("absent.txt")).expect_err("missing file should fail");

    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn prediction_table_loads_from_json() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("predictions.json");
    let body = format!(
        r#"[{{"clause_sha256": "{}", "probabilities": {{"LOW": 0.1, "MEDIUM": 0.1, "HIGH": 0.8}}}}]"#,
        clause_fingerprint("The tenant shall pay rent monthly.")
    );
    fs::write(&path, body).expect("fixture should be written");

    let table = load_prediction_table(&path).expect("table should load");

    assert_eq!(table.len(), 1);
}

#[test]
fn malformed_prediction_table_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("predictions.json");
    fs::write(&path, r#"{"not": "a list"}"#).expect("fixture should be written");

    let err = load_prediction_table(&path).expect_err("object should not parse as entries");

    assert!(err.to_string().contains("failed to parse prediction table"));
}

#[test]
fn prediction_table_mode_requires_a_path() {
    let args = ClassifierArgs {
        classifier: ClassifierMode::PredictionTable,
        prediction_table: None,
    };

    let err = build_classifier(&args)
        .err()
        .expect("missing table path should fail");

    assert!(err.to_string().contains("--prediction-table"));
}

#[test]
fn prediction_table_mode_uses_table_classifier() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("predictions.json");
    fs::write(&path, "[]").expect("fixture should be written");

    let classifier = build_classifier(&ClassifierArgs {
        classifier: ClassifierMode::PredictionTable,
        prediction_table: Some(path),
    })
    .expect("classifier should build");

    assert_eq!(classifier.name(), "prediction-table");
}

#[test]
fn analyze_writes_report_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let input = dir.path().join("lease.txt");
    let output = dir.path().join("reports").join("lease.json");
    fs::write(&input, LEASE).expect("fixture should be written");

    analyze::run(AnalyzeArgs {
        input: input.clone(),
        output: Some(output.clone()),
        json: true,
        classifier: rules_args(),
    })
    .expect("analysis should succeed");

    let raw = fs::read(&output).expect("report should be written");
    let report: AnalysisReport = serde_json::from_slice(&raw).expect("report should parse");

    assert_eq!(report.report_version, analyze::REPORT_VERSION);
    assert_eq!(report.classifier, "rules");
    assert_eq!(report.segmentation_strategy, SegmentationStrategy::Structured);
    assert_eq!(report.source_path, input.display().to_string());
    assert_eq!(report.source_sha256, sha256_bytes(LEASE.as_bytes()));
    assert!(report.warnings.is_empty());
    assert_eq!(report.analysis.total_clauses, 3);
    assert_eq!(report.analysis.high_count, 1);
    assert_eq!(report.analysis.medium_count, 1);
    assert_eq!(report.analysis.low_count, 1);
}

#[test]
fn analyze_fails_on_empty_document() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let input = dir.path().join("empty.txt");
    fs::write(&input, "\n\n   \n").expect("fixture should be written");

    let err = analyze::run(AnalyzeArgs {
        input,
        output: None,
        json: false,
        classifier: rules_args(),
    })
    .expect_err("empty document should fail");

    assert!(err.to_string().contains("failed to analyze"));
    assert!(err.chain().any(|cause| cause.to_string().contains("no clause")));
}

#[test]
fn preview_shortens_long_text() {
    assert_eq!(preview("short clause"), "short clause");

    let long = "x".repeat(200);
    let shortened = preview(&long);
    assert_eq!(shortened.chars().count(), 99);
    assert!(shortened.ends_with("..."));
}

#[test]
fn cli_parses_analyze_with_prediction_table() {
    let cli = Cli::try_parse_from([
        "clause-risk",
        "analyze",
        "--input",
        "lease.txt",
        "--classifier",
        "prediction-table",
        "--prediction-table",
        "predictions.json",
        "--json",
    ])
    .expect("arguments should parse");

    let Commands::Analyze(args) = cli.command else {
        panic!("expected analyze command");
    };
    assert_eq!(args.classifier.classifier, ClassifierMode::PredictionTable);
    assert_eq!(
        args.classifier.prediction_table.as_deref(),
        Some(std::path::Path::new("predictions.json"))
    );
    assert!(args.json);
    assert!(args.output.is_none());
}
