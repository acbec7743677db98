use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "clause-risk",
    version,
    about = "Clause segmentation and rule-based risk scoring for legal documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Analyze(AnalyzeArgs),
    Segment(SegmentArgs),
    Classify(ClassifyArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ClassifierMode {
    Rules,
    PredictionTable,
}

impl ClassifierMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::PredictionTable => "prediction-table",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ClassifierArgs {
    #[arg(
        long,
        value_enum,
        env = "CLAUSE_RISK_CLASSIFIER",
        default_value_t = ClassifierMode::Rules
    )]
    pub classifier: ClassifierMode,

    #[arg(long, env = "CLAUSE_RISK_PREDICTION_TABLE")]
    pub prediction_table: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub classifier: ClassifierArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub text: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub classifier: ClassifierArgs,
}
