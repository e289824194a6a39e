use std::time::{Duration, Instant};

/// A cooperative stop predicate, polled once per planner iteration (and
/// inside the blocking wait for an initial goal sample). Returning true
/// means the search must stop.
pub trait TerminationCondition {
    fn evaluate(&mut self) -> bool;
}

/// Stops after a fixed number of evaluations.
pub struct IterationLimit {
    evaluations: u64,
    max_evaluations: u64,
}

impl IterationLimit {
    pub fn new(max_evaluations: u64) -> Self {
        Self {
            evaluations: 0,
            max_evaluations,
        }
    }
}

impl TerminationCondition for IterationLimit {
    fn evaluate(&mut self) -> bool {
        if self.evaluations >= self.max_evaluations {
            return true;
        }
        self.evaluations += 1;
        false
    }
}

/// Stops once a wall-clock deadline has passed.
pub struct TimeLimit {
    deadline: Instant,
}

impl TimeLimit {
    pub fn new(duration: Duration) -> Self {
        Self {
            deadline: Instant::now() + duration,
        }
    }
}

impl TerminationCondition for TimeLimit {
    fn evaluate(&mut self) -> bool {
        Instant::now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_limit_counts_evaluations() {
        let mut limit = IterationLimit::new(3);
        assert!(!limit.evaluate());
        assert!(!limit.evaluate());
        assert!(!limit.evaluate());
        assert!(limit.evaluate());
        assert!(limit.evaluate());
    }

    #[test]
    fn test_zero_limit_trips_immediately() {
        let mut limit = IterationLimit::new(0);
        assert!(limit.evaluate());
    }

    #[test]
    fn test_time_limit() {
        let mut expired = TimeLimit::new(Duration::from_secs(0));
        assert!(expired.evaluate());

        let mut generous = TimeLimit::new(Duration::from_secs(3600));
        assert!(!generous.evaluate());
    }
}
