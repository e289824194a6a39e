use crate::est::state::RealVectorState;
use crate::est::validity_checker::ValidityChecker;
use num_traits::Float;

pub mod rectangular;
pub mod spherical;

pub use rectangular::Aabb;
pub use spherical::Sphere;

/// A solid region of configuration space.
pub trait Obstacle<F: Float, const N: usize> {
    /// Returns true if the state lies strictly inside the obstacle.
    fn contains(&self, state: &RealVectorState<F, N>) -> bool;

    /// Returns true if the straight segment between two states passes
    /// through the obstacle.
    fn intersects_segment(
        &self,
        start: &RealVectorState<F, N>,
        end: &RealVectorState<F, N>,
    ) -> bool;
}

/// A collection of obstacles acting as a validity checker: a state is valid
/// if no obstacle contains it, a motion is valid if no obstacle intersects it.
pub struct ObstacleSet<O> {
    obstacles: Vec<O>,
}

impl<O> ObstacleSet<O> {
    pub fn new(obstacles: Vec<O>) -> Self {
        Self { obstacles }
    }

    pub fn obstacles(&self) -> &[O] {
        &self.obstacles
    }
}

impl<F: Float, const N: usize, O: Obstacle<F, N>> ValidityChecker<F, N> for ObstacleSet<O> {
    fn is_state_valid(&self, state: &RealVectorState<F, N>) -> bool {
        !self.obstacles.iter().any(|o| o.contains(state))
    }

    fn is_edge_valid(&self, a: &RealVectorState<F, N>, b: &RealVectorState<F, N>) -> bool {
        !self.obstacles.iter().any(|o| o.intersects_segment(a, b))
    }
}
