use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cyclomap")]
#[command(about = "Calculates code complexity metrics for Python code", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Python file or directory to analyze
    pub path: PathBuf,

    /// Complexity threshold for reporting functions/classes
    #[arg(long, default_value = "10")]
    pub threshold: u32,

    /// Include import statements in the complexity calculation
    #[arg(long = "include-imports")]
    pub include_imports: bool,

    /// Also report raw code metrics (lines of code, comments, etc.)
    #[arg(long = "report-raw")]
    pub report_raw: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show only the N most complex units
    #[arg(long = "top", visible_alias = "head")]
    pub top: Option<usize>,

    /// Glob patterns of paths to skip
    #[arg(long = "ignore", value_delimiter = ',')]
    pub ignore_patterns: Option<Vec<String>>,

    /// Analyze files sequentially instead of in parallel
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
