//! Analysis configuration assembled from CLI flags.
//!
//! The configuration travels explicitly through the pipeline; there is no
//! process-wide mutable default.

use serde::{Deserialize, Serialize};

use crate::core::Error;

pub const DEFAULT_THRESHOLD: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Complexity score above which a unit is flagged.
    pub threshold: u32,
    /// Count import statements as decision points.
    pub include_imports: bool,
    /// Also compute raw line metrics per file.
    pub report_raw: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            include_imports: false,
            report_raw: false,
        }
    }
}

impl AnalysisConfig {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn with_imports(mut self, include_imports: bool) -> Self {
        self.include_imports = include_imports;
        self
    }

    pub fn with_raw(mut self, report_raw: bool) -> Self {
        self.report_raw = report_raw;
        self
    }

    /// A threshold of zero could never classify anything; reject it up
    /// front instead of silently clamping.
    pub fn validate(&self) -> Result<(), Error> {
        if self.threshold == 0 {
            return Err(Error::configuration(
                "complexity threshold must be a positive integer",
            ));
        }
        Ok(())
    }
}
