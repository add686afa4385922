use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::Severity;

#[derive(Parser, Debug)]
#[command(
    name = "briefcheck",
    version,
    about = "Local brief citation verification rendering and reporting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Render(RenderArgs),
    Show(ShowArgs),
    Stats(StatsArgs),
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(long)]
    pub brief_path: PathBuf,

    /// Citation id to mark as the current selection.
    #[arg(long)]
    pub selected: Option<String>,

    /// Optional JSON override for the status label table.
    #[arg(long)]
    pub labels_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(long)]
    pub brief_path: PathBuf,

    /// Citation id to open.
    #[arg(long)]
    pub citation_id: Option<String>,

    /// 1-based position in the brief's citation list, alternative to an id.
    #[arg(long)]
    pub ordinal: Option<usize>,

    #[arg(long)]
    pub labels_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[arg(long)]
    pub brief_path: PathBuf,

    /// Also locate the first citation occurrence with this severity.
    #[arg(long, value_enum)]
    pub severity: Option<SeverityFilter>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[arg(long)]
    pub brief_path: PathBuf,

    #[arg(long)]
    pub labels_path: Option<PathBuf>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SeverityFilter {
    Valid,
    Warning,
    Critical,
}

impl SeverityFilter {
    pub fn as_severity(self) -> Severity {
        match self {
            Self::Valid => Severity::Valid,
            Self::Warning => Severity::Warning,
            Self::Critical => Severity::Critical,
        }
    }
}
