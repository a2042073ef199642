pub mod cyclomatic;
pub mod walker;

pub use cyclomatic::{count_decision_points, DecisionPoints};
pub use walker::{AnalysisUnit, UnitNode, UnitWalker};

/// Cyclomatic complexity of a unit with the given number of decision
/// points. One linearly independent path exists even with zero branches.
pub fn score(decision_points: u32) -> u32 {
    decision_points + 1
}

/// Strict comparison: a unit scoring exactly at the threshold is not
/// flagged.
pub fn exceeds_threshold(score: u32, threshold: u32) -> bool {
    score > threshold
}
