// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod complexity;
pub mod config;
pub mod core;
pub mod io;
pub mod metrics;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, ComplexitySummary, Error, FileReport, LineIndex, UnitComplexity, UnitKind,
};

pub use crate::analyzers::python::{analyze_file, analyze_source, ParsedModule, PythonAnalyzer};

pub use crate::complexity::{
    count_decision_points, exceeds_threshold, score, AnalysisUnit, DecisionPoints, UnitWalker,
};

pub use crate::config::AnalysisConfig;

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::metrics::raw::RawMetrics;
