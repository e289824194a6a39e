use crate::est::state::RealVectorState;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Side tag for exported vertices: 1 marks the start tree, 2 the goal tree.
pub const START_TREE_TAG: u32 = 1;
pub const GOAL_TREE_TAG: u32 = 2;

/// One exported search-graph vertex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerDataVertex<F: Float, const N: usize> {
    pub state: RealVectorState<F, N>,
    pub tag: u32,
}

/// The search graph of a planning run, for diagnostics and visualization.
///
/// Vertices list the start tree first, then the goal tree. Edges are
/// directed away from the start roots on both sides (goal-tree edges are
/// emitted child to parent to keep the orientation consistent), and the
/// final edge bridges the two trees when a solution was found.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerData<F: Float, const N: usize> {
    pub vertices: Vec<PlannerDataVertex<F, N>>,
    pub start_vertices: Vec<usize>,
    pub goal_vertices: Vec<usize>,
    pub edges: Vec<(usize, usize)>,
}

impl<F: Float, const N: usize> PlannerData<F, N> {
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}
