use crate::est::state::RealVectorState;
use num_traits::Float;

/// The black-box validity oracle: decides whether a single state, or the
/// straight-line motion between two states, is collision free.
pub trait ValidityChecker<F: Float, const N: usize> {
    /// Checks if a state is valid (i.e., does not collide with obstacles).
    fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool;

    /// Checks if the straight-line motion between two states is valid.
    fn is_edge_valid(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> bool;
}

/// A validity checker that accepts every state and motion.
pub struct AlwaysValid;

impl AlwaysValid {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AlwaysValid {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, const N: usize> ValidityChecker<F, N> for AlwaysValid {
    fn is_state_valid(&self, _state: &RealVectorState<F, N>) -> bool {
        true
    }

    fn is_edge_valid(&self, _a: &RealVectorState<F, N>, _b: &RealVectorState<F, N>) -> bool {
        true
    }
}

/// Combines multiple validity checkers; a state or motion is valid only if
/// every member accepts it.
pub struct UnionValidityChecker<F: Float, const N: usize> {
    checkers: Vec<Box<dyn ValidityChecker<F, N>>>,
}

impl<F: Float, const N: usize> UnionValidityChecker<F, N> {
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }

    pub fn add_checker(&mut self, checker: Box<dyn ValidityChecker<F, N>>) {
        self.checkers.push(checker);
    }
}

impl<F: Float, const N: usize> Default for UnionValidityChecker<F, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, const N: usize> ValidityChecker<F, N> for UnionValidityChecker<F, N> {
    fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool {
        self.checkers
            .iter()
            .all(|checker| checker.is_state_valid(state))
    }

    fn is_edge_valid(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> bool {
        self.checkers
            .iter()
            .all(|checker| checker.is_edge_valid(a, b))
    }
}
