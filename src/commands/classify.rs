use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clause_risk::engine::collapse_whitespace;
use clause_risk::model::RiskAssessment;
use serde::Serialize;
use tracing::info;

use crate::cli::ClassifyArgs;
use crate::commands::build_classifier;

#[derive(Debug, Serialize)]
struct ClassifyResponse<'a> {
    classifier: &'a str,
    clause_text: &'a str,
    #[serde(flatten)]
    assessment: &'a RiskAssessment,
}

pub fn run(args: ClassifyArgs) -> Result<()> {
    let clause_text = collapse_whitespace(&args.text);
    if clause_text.is_empty() {
        bail!("clause text is empty");
    }

    let classifier = build_classifier(&args.classifier)?;
    let assessment = classifier.classify(&clause_text);
    info!(
        classifier = classifier.name(),
        label = assessment.label.as_str(),
        score = assessment.score,
        "classified clause"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        let response = ClassifyResponse {
            classifier: classifier.name(),
            clause_text: &clause_text,
            assessment: &assessment,
        };
        serde_json::to_writer_pretty(&mut output, &response)
            .context("failed to serialize classification json output")?;
        writeln!(output)?;
    } else {
        writeln!(output, "Label: {}", assessment.label)?;
        writeln!(output, "Score: {:.2}", assessment.score)?;
        writeln!(output, "Explanation: {}", assessment.explanation)?;
        writeln!(output, "Mitigation: {}", assessment.mitigation)?;
    }

    output.flush()?;
    Ok(())
}
