use crate::est::state::RealVectorState;
use crate::util::ordered_float::OrderedFloat;
use kiddo::float::{distance::SquaredEuclidean, kdtree::Axis, kdtree::KdTree};
use num_traits::Float;

/// A nearest neighbor index over states, keyed by a caller-chosen item
/// (here: the index of a motion in its tree's arena).
///
/// Radius queries must be deterministic given the distance function and the
/// insertion order, so that planning runs are reproducible under a fixed seed.
pub trait NearestNeighbors<F: Float, const N: usize> {
    /// Constructs an empty index.
    fn new() -> Self;

    /// Adds a state with its associated item.
    fn add(&mut self, state: RealVectorState<F, N>, item: usize);

    /// Returns the item of the state nearest to `state`, if the index is non-empty.
    fn nearest_one(&self, state: &RealVectorState<F, N>) -> Option<usize>;

    /// Returns the items of the `k` states nearest to `state`, nearest-first.
    fn nearest_k(&self, state: &RealVectorState<F, N>, k: usize) -> Vec<usize>;

    /// Returns the items of all states within `radius` of `state`, in no
    /// particular order.
    fn within_radius(&self, state: &RealVectorState<F, N>, radius: F) -> Vec<usize>;

    /// Returns the items of all states within `radius` of `state`, nearest-first.
    fn within_radius_sorted(&self, state: &RealVectorState<F, N>, radius: F) -> Vec<usize>;

    /// Returns the number of states in the index.
    fn len(&self) -> usize;

    /// Returns true if the index holds no states.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all states from the index.
    fn clear(&mut self);
}

/// Exhaustive-scan index. Preferable for small trees, where the constant
/// factor of a spatial structure outweighs its asymptotics.
pub struct LinearNearestNeighbors<F: Float, const N: usize> {
    states: Vec<(RealVectorState<F, N>, usize)>,
}

impl<F: Float, const N: usize> NearestNeighbors<F, N> for LinearNearestNeighbors<F, N> {
    fn new() -> Self {
        Self { states: Vec::new() }
    }

    fn add(&mut self, state: RealVectorState<F, N>, item: usize) {
        self.states.push((state, item));
    }

    fn nearest_one(&self, state: &RealVectorState<F, N>) -> Option<usize> {
        self.states
            .iter()
            .min_by_key(|(s, _)| OrderedFloat::from(state.euclidean_distance_squared(s)))
            .map(|&(_, item)| item)
    }

    fn nearest_k(&self, state: &RealVectorState<F, N>, k: usize) -> Vec<usize> {
        let mut by_distance: Vec<(OrderedFloat<F>, usize)> = self
            .states
            .iter()
            .map(|(s, item)| (state.euclidean_distance_squared(s).into(), *item))
            .collect();
        by_distance.sort_by_key(|&(d, _)| d);
        by_distance.into_iter().take(k).map(|(_, item)| item).collect()
    }

    fn within_radius(&self, state: &RealVectorState<F, N>, radius: F) -> Vec<usize> {
        self.states
            .iter()
            .filter(|(s, _)| state.euclidean_distance_squared(s) <= radius * radius)
            .map(|&(_, item)| item)
            .collect()
    }

    fn within_radius_sorted(&self, state: &RealVectorState<F, N>, radius: F) -> Vec<usize> {
        let mut by_distance: Vec<(OrderedFloat<F>, usize)> = self
            .states
            .iter()
            .filter(|(s, _)| state.euclidean_distance_squared(s) <= radius * radius)
            .map(|(s, item)| (state.euclidean_distance_squared(s).into(), *item))
            .collect();
        by_distance.sort_by_key(|&(d, _)| d);
        by_distance.into_iter().map(|(_, item)| item).collect()
    }

    fn len(&self) -> usize {
        self.states.len()
    }

    fn clear(&mut self) {
        self.states.clear();
    }
}

/// kd-tree index backed by kiddo.
pub struct KdTreeNearestNeighbors<F: Float + Axis, const N: usize> {
    kdtree: KdTree<F, usize, N, 32, u32>,
    len: usize,
}

impl<F: Float + Axis, const N: usize> NearestNeighbors<F, N> for KdTreeNearestNeighbors<F, N> {
    fn new() -> Self {
        Self {
            kdtree: KdTree::new(),
            len: 0,
        }
    }

    fn add(&mut self, state: RealVectorState<F, N>, item: usize) {
        self.kdtree.add(state.values(), item);
        self.len += 1;
    }

    fn nearest_one(&self, state: &RealVectorState<F, N>) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let neighbor = self.kdtree.nearest_one::<SquaredEuclidean>(state.values());
        Some(neighbor.item)
    }

    fn nearest_k(&self, state: &RealVectorState<F, N>, k: usize) -> Vec<usize> {
        self.kdtree
            .nearest_n::<SquaredEuclidean>(state.values(), k)
            .iter()
            .map(|n| n.item)
            .collect()
    }

    fn within_radius(&self, state: &RealVectorState<F, N>, radius: F) -> Vec<usize> {
        self.kdtree
            .within_unsorted::<SquaredEuclidean>(state.values(), radius * radius)
            .iter()
            .map(|n| n.item)
            .collect()
    }

    fn within_radius_sorted(&self, state: &RealVectorState<F, N>, radius: F) -> Vec<usize> {
        self.kdtree
            .within::<SquaredEuclidean>(state.values(), radius * radius)
            .iter()
            .map(|n| n.item)
            .collect()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.kdtree = KdTree::new();
        self.len = 0;
    }
}
