use std::io::{self, Write};

use anyhow::{Context, Result};
use clause_risk::engine::SegmentationEngine;
use clause_risk::model::{Clause, Segmentation, SegmentationStrategy};
use serde::Serialize;
use tracing::info;

use crate::cli::SegmentArgs;
use crate::commands::{preview, read_document};

#[derive(Debug, Serialize)]
struct SegmentResponse<'a> {
    source_path: String,
    strategy: SegmentationStrategy,
    total_clauses: usize,
    warnings: Vec<String>,
    clauses: &'a [Clause],
}

pub fn run(args: SegmentArgs) -> Result<()> {
    let document = read_document(&args.input)?;
    let segmenter = SegmentationEngine::new()?;

    let segmentation = segmenter
        .segment(&document.text)
        .with_context(|| format!("failed to segment {}", args.input.display()))?;
    info!(
        input = %args.input.display(),
        clauses = segmentation.clauses.len(),
        "segmentation finished"
    );

    let source_path = args.input.display().to_string();
    if args.json {
        write_json_response(source_path, &segmentation)
    } else {
        write_text_response(&source_path, &segmentation)
    }
}

fn write_json_response(source_path: String, segmentation: &Segmentation) -> Result<()> {
    let response = SegmentResponse {
        source_path,
        strategy: segmentation.strategy,
        total_clauses: segmentation.clauses.len(),
        warnings: segmentation
            .advisories
            .iter()
            .map(ToString::to_string)
            .collect(),
        clauses: &segmentation.clauses,
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, &response)
        .context("failed to serialize segmentation json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(source_path: &str, segmentation: &Segmentation) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Document: {source_path}")?;
    writeln!(
        output,
        "Strategy: {} clauses={}",
        segmentation.strategy.as_str(),
        segmentation.clauses.len(),
    )?;
    for advisory in &segmentation.advisories {
        writeln!(output, "Warning: {advisory}")?;
    }
    for clause in &segmentation.clauses {
        writeln!(output, "{}.\t{}", clause.index, preview(&clause.text))?;
    }

    output.flush()?;
    Ok(())
}
