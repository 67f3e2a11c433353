use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Largest result count a single run may request.
pub const MAX_COUNT: usize = 300;

#[derive(Parser, Debug)]
#[command(name = "dorker")]
#[command(about = "Harvest search results for a query and fingerprint every site found")]
#[command(version)]
pub struct Args {
    /// Search query, including any operators (quote it)
    pub query: String,

    /// Number of results to collect, clamped to 1..=300
    #[arg(allow_negative_numbers = true)]
    pub count: i64,

    /// Result offset to start from
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Output directory (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable record blocks
    Text,
    /// JSON array of records
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

impl Args {
    /// Requested count clamped to `1..=MAX_COUNT`.
    pub fn limit(&self) -> usize {
        match usize::try_from(self.count) {
            Ok(count) => count.clamp(1, MAX_COUNT),
            Err(_) => 1,
        }
    }
}
