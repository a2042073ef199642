pub mod errors;
pub mod source;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metrics::raw::RawMetrics;

pub use errors::Error;
pub use source::LineIndex;

/// What kind of definition a scored unit is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Function,
    Method,
    Class,
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnitKind::Function => "function",
            UnitKind::Method => "method",
            UnitKind::Class => "class",
        };
        write!(f, "{s}")
    }
}

/// One scored unit: the decision-point count, the derived complexity
/// score, and its classification against the configured threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitComplexity {
    pub name: String,
    pub kind: UnitKind,
    pub start_line: usize,
    pub end_line: usize,
    pub depth: u32,
    pub decision_points: u32,
    pub complexity: u32,
    pub exceeds_threshold: bool,
}

/// Every scored unit of one file, in traversal order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub units: Vec<UnitComplexity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawMetrics>,
    pub summary: ComplexitySummary,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplexitySummary {
    pub total_units: usize,
    pub average_complexity: f64,
    pub max_complexity: u32,
    pub flagged_count: usize,
}

impl ComplexitySummary {
    pub fn from_units(units: &[UnitComplexity]) -> Self {
        let total_units = units.len();
        let sum: u32 = units.iter().map(|u| u.complexity).sum();
        let average_complexity = if total_units == 0 {
            0.0
        } else {
            f64::from(sum) / total_units as f64
        };
        Self {
            total_units,
            average_complexity,
            max_complexity: units.iter().map(|u| u.complexity).max().unwrap_or(0),
            flagged_count: units.iter().filter(|u| u.exceeds_threshold).count(),
        }
    }
}

/// Full analysis output across all analyzed files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub root: PathBuf,
    pub threshold: u32,
    pub files: Vec<FileReport>,
}

impl AnalysisReport {
    /// All units across all files, paired with the file they came from.
    pub fn all_units(&self) -> impl Iterator<Item = (&FileReport, &UnitComplexity)> {
        self.files
            .iter()
            .flat_map(|file| file.units.iter().map(move |unit| (file, unit)))
    }

    pub fn total_summary(&self) -> ComplexitySummary {
        let units: Vec<UnitComplexity> = self
            .files
            .iter()
            .flat_map(|file| file.units.iter().cloned())
            .collect();
        ComplexitySummary::from_units(&units)
    }
}
