use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a solve attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlannerStatus {
    /// A valid path from a start root to a goal root was found.
    ExactSolution,
    /// The termination condition tripped before the trees connected.
    Timeout,
    /// No start state passed the validity check.
    InvalidStart,
    /// The goal region cannot produce any sample.
    InvalidGoal,
    /// The problem definition carries no sampleable goal region.
    UnrecognizedGoalType,
}

impl PlannerStatus {
    pub fn is_solved(&self) -> bool {
        matches!(self, PlannerStatus::ExactSolution)
    }

    pub fn is_failure(&self) -> bool {
        !self.is_solved()
    }
}

impl fmt::Display for PlannerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlannerStatus::ExactSolution => "ExactSolution",
            PlannerStatus::Timeout => "Timeout",
            PlannerStatus::InvalidStart => "InvalidStart",
            PlannerStatus::InvalidGoal => "InvalidGoal",
            PlannerStatus::UnrecognizedGoalType => "UnrecognizedGoalType",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers() {
        assert!(PlannerStatus::ExactSolution.is_solved());
        assert!(!PlannerStatus::ExactSolution.is_failure());
        assert!(PlannerStatus::Timeout.is_failure());
        assert!(PlannerStatus::InvalidStart.is_failure());
    }

    #[test]
    fn test_display() {
        assert_eq!(PlannerStatus::Timeout.to_string(), "Timeout");
        assert_eq!(
            PlannerStatus::UnrecognizedGoalType.to_string(),
            "UnrecognizedGoalType"
        );
    }
}
