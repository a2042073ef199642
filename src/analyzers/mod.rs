pub mod python;

pub use python::{analyze_file, analyze_source, ParsedModule, PythonAnalyzer};
