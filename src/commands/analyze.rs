use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clause_risk::ContractRiskEngine;
use clause_risk::model::{AnalysisOutcome, AnalysisReport, DocumentAnalysis};
use tracing::info;

use crate::cli::AnalyzeArgs;
use crate::commands::{SourceDocument, build_classifier, preview, read_document};
use crate::util::{now_utc_string, write_json_pretty};

pub const REPORT_VERSION: u32 = 1;
const LOSSY_DECODE_WARNING: &str = "input was not valid UTF-8 and was decoded lossily";

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let document = read_document(&args.input)?;
    let engine = ContractRiskEngine::new(build_classifier(&args.classifier)?)?;

    info!(
        input = %args.input.display(),
        classifier = engine.classifier_name(),
        "analysis requested"
    );

    let outcome = engine
        .analyze(&document.text)
        .with_context(|| format!("failed to analyze {}", args.input.display()))?;
    let report = build_report(&args.input, &document, outcome);

    if let Some(output_path) = &args.output {
        write_json_pretty(output_path, &report)?;
        info!(path = %output_path.display(), "wrote analysis report");
    }

    if args.json {
        write_json_response(&report.analysis)
    } else {
        write_text_response(&report)
    }
}

pub fn build_report(
    source_path: &Path,
    document: &SourceDocument,
    outcome: AnalysisOutcome,
) -> AnalysisReport {
    let mut warnings = Vec::new();
    if document.lossy {
        warnings.push(LOSSY_DECODE_WARNING.to_string());
    }
    warnings.extend(outcome.advisories.iter().map(ToString::to_string));

    AnalysisReport {
        report_version: REPORT_VERSION,
        generated_at: now_utc_string(),
        source_path: source_path.display().to_string(),
        source_sha256: document.sha256.clone(),
        classifier: outcome.classifier.to_string(),
        segmentation_strategy: outcome.strategy,
        warnings,
        analysis: outcome.analysis,
    }
}

fn write_json_response(analysis: &DocumentAnalysis) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, analysis)
        .context("failed to serialize analysis json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(report: &AnalysisReport) -> Result<()> {
    let analysis = &report.analysis;
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Document: {}", report.source_path)?;
    writeln!(
        output,
        "Segmentation: strategy={} classifier={}",
        report.segmentation_strategy.as_str(),
        report.classifier,
    )?;
    writeln!(output, "Global risk score: {:.2}", analysis.global_score)?;
    writeln!(
        output,
        "Clauses: total={} high={} medium={} low={}",
        analysis.total_clauses, analysis.high_count, analysis.medium_count, analysis.low_count,
    )?;
    for warning in &report.warnings {
        writeln!(output, "Warning: {warning}")?;
    }

    for clause in &analysis.clauses {
        writeln!(
            output,
            "{}.\t{}\t{:.2}\t{}",
            clause.clause.index,
            clause.assessment.label,
            clause.assessment.score,
            preview(&clause.clause.text),
        )?;
        writeln!(output, "\t{}", clause.assessment.explanation)?;
        writeln!(output, "\t{}", clause.assessment.mitigation)?;
    }

    output.flush()?;
    Ok(())
}
