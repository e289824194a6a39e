use crate::est::sampling::uniform_in_ball;
use crate::est::state::RealVectorState;
use num_traits::Float;
use rand::RngCore;

/// A goal region the planner can draw goal states from.
///
/// The planner never inspects the region beyond this capability surface: a
/// problem either carries a sampleable goal or the planner refuses to run.
pub trait GoalRegion<F: Float, const N: usize> {
    /// Returns true if the region could ever produce a goal sample.
    fn could_sample(&self) -> bool;

    /// Draws the next goal sample, or `None` if no further sample is
    /// available right now. Never blocks; the planner polls under its
    /// termination condition when it must wait for a first goal state.
    fn sample_goal(&mut self, rng: &mut dyn RngCore) -> Option<RealVectorState<F, N>>;

    /// Whether the given pair of tree roots is acceptable as a start/goal
    /// pairing for a solution path.
    fn is_start_goal_pair_valid(
        &self,
        _start: &RealVectorState<F, N>,
        _goal: &RealVectorState<F, N>,
    ) -> bool {
        true
    }

    /// Returns the region to its initial sampling state.
    fn reset(&mut self) {}
}

/// A finite set of goal states, each yielded once per planning cycle.
pub struct GoalStates<F: Float, const N: usize> {
    states: Vec<RealVectorState<F, N>>,
    next: usize,
}

impl<F: Float, const N: usize> GoalStates<F, N> {
    pub fn new(states: Vec<RealVectorState<F, N>>) -> Self {
        Self { states, next: 0 }
    }

    pub fn states(&self) -> &[RealVectorState<F, N>] {
        &self.states
    }
}

impl<F: Float, const N: usize> GoalRegion<F, N> for GoalStates<F, N> {
    fn could_sample(&self) -> bool {
        !self.states.is_empty()
    }

    fn sample_goal(&mut self, _rng: &mut dyn RngCore) -> Option<RealVectorState<F, N>> {
        let state = self.states.get(self.next).copied();
        if state.is_some() {
            self.next += 1;
        }
        state
    }

    fn reset(&mut self) {
        self.next = 0;
    }
}

/// A ball-shaped goal region with an unlimited supply of uniform samples.
pub struct GoalBall<F: Float, const N: usize> {
    center: RealVectorState<F, N>,
    radius: F,
}

impl<F: Float, const N: usize> GoalBall<F, N> {
    pub fn new(center: RealVectorState<F, N>, radius: F) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, state: &RealVectorState<F, N>) -> bool {
        self.center.euclidean_distance_squared(state) <= self.radius * self.radius
    }
}

impl<F: Float, const N: usize> GoalRegion<F, N> for GoalBall<F, N> {
    fn could_sample(&self) -> bool {
        true
    }

    fn sample_goal(&mut self, rng: &mut dyn RngCore) -> Option<RealVectorState<F, N>> {
        Some(uniform_in_ball(rng, &self.center, self.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_goal_states_yield_each_once() {
        let mut rng = StdRng::seed_from_u64(5);
        let a = RealVectorState::new([1.0, 0.0]);
        let b = RealVectorState::new([2.0, 0.0]);
        let mut goal = GoalStates::new(vec![a, b]);

        assert!(goal.could_sample());
        assert_eq!(goal.sample_goal(&mut rng), Some(a));
        assert_eq!(goal.sample_goal(&mut rng), Some(b));
        assert_eq!(goal.sample_goal(&mut rng), None);

        goal.reset();
        assert_eq!(goal.sample_goal(&mut rng), Some(a));
    }

    #[test]
    fn test_empty_goal_states_cannot_sample() {
        let goal: GoalStates<f64, 2> = GoalStates::new(Vec::new());
        assert!(!goal.could_sample());
    }

    #[test]
    fn test_goal_ball_samples_inside_region() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut goal = GoalBall::new(RealVectorState::new([5.0, 5.0]), 0.5);
        for _ in 0..100 {
            let sample = goal.sample_goal(&mut rng).unwrap();
            assert!(goal.contains(&sample));
        }
    }

    #[test]
    fn test_pair_validity_defaults_to_accepting() {
        let goal = GoalBall::new(RealVectorState::new([0.0, 0.0]), 1.0);
        let a = RealVectorState::new([9.0, 9.0]);
        let b = RealVectorState::new([0.0, 0.0]);
        assert!(goal.is_start_goal_pair_valid(&a, &b));
    }
}
