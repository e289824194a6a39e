use crate::est::motion::Motion;
use crate::est::neighbors::NearestNeighbors;
use crate::est::pdf::Pdf;
use crate::est::state::RealVectorState;
use num_traits::Float;

/// One side of the bidirectional search: an insertion-ordered arena of
/// motions, a nearest-neighbor index over their states, and a weighted
/// sampler that picks expansion seeds biased toward sparse regions.
///
/// The three structures are kept in lockstep: every motion has exactly one
/// entry in each, and motions are only removed in bulk by `clear`.
pub struct EstTree<F: Float, const N: usize, NN: NearestNeighbors<F, N>> {
    motions: Vec<Motion<F, N>>,
    neighbors: NN,
    pdf: Pdf<usize, F>,
}

impl<F: Float, const N: usize, NN: NearestNeighbors<F, N>> EstTree<F, N, NN> {
    pub fn new() -> Self {
        Self {
            motions: Vec::new(),
            neighbors: NN::new(),
            pdf: Pdf::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    pub fn motions(&self) -> &[Motion<F, N>] {
        &self.motions
    }

    pub fn motion(&self, index: usize) -> &Motion<F, N> {
        &self.motions[index]
    }

    pub fn state(&self, index: usize) -> &RealVectorState<F, N> {
        self.motions[index].state()
    }

    /// The state of the root ancestor of the given motion.
    pub fn root_state(&self, index: usize) -> &RealVectorState<F, N> {
        self.motions[self.motions[index].root()].state()
    }

    /// All motions within `radius` of `state`, unordered.
    pub fn neighbors_within(&self, state: &RealVectorState<F, N>, radius: F) -> Vec<usize> {
        self.neighbors.within_radius(state, radius)
    }

    /// All motions within `radius` of `state`, nearest-first.
    pub fn neighbors_within_sorted(&self, state: &RealVectorState<F, N>, radius: F) -> Vec<usize> {
        self.neighbors.within_radius_sorted(state, radius)
    }

    /// Inserts a new motion and keeps the density weights current: every
    /// existing neighbor's selection weight decays by w/(w+1), and the
    /// newcomer starts at 1/(k+1), so motions in crowded regions are picked
    /// rarely. `neighbors` must come from a radius query at the
    /// neighborhood radius, performed before this call.
    pub fn add(
        &mut self,
        state: RealVectorState<F, N>,
        parent: Option<usize>,
        neighbors: &[usize],
    ) -> usize {
        for &neighbor in neighbors {
            let elem = self.motions[neighbor]
                .pdf_elem()
                .expect("inserted motion has a sampler entry");
            let weight = self.pdf.weight(elem);
            self.pdf.update(elem, weight / (weight + F::one()));
        }

        let index = self.motions.len();
        let root = match parent {
            Some(p) => self.motions[p].root(),
            None => index,
        };
        let mut motion = Motion::new(state, parent, root);

        let k = F::from(neighbors.len()).unwrap();
        motion.set_pdf_elem(self.pdf.add(index, F::one() / (k + F::one())));
        self.neighbors.add(state, index);
        self.motions.push(motion);
        index
    }

    /// Picks a motion with probability proportional to its selection weight.
    /// `u` must be uniform in [0, 1). Panics on an empty tree.
    pub fn sample(&self, u: F) -> usize {
        *self.pdf.sample(u)
    }

    /// The current selection weight of a motion.
    pub fn selection_weight(&self, index: usize) -> F {
        let elem = self.motions[index]
            .pdf_elem()
            .expect("inserted motion has a sampler entry");
        self.pdf.weight(elem)
    }

    pub fn clear(&mut self) {
        self.motions.clear();
        self.neighbors.clear();
        self.pdf.clear();
    }
}

impl<F: Float, const N: usize, NN: NearestNeighbors<F, N>> Default for EstTree<F, N, NN> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::est::neighbors::LinearNearestNeighbors;
    use approx::assert_relative_eq;

    type Tree = EstTree<f64, 2, LinearNearestNeighbors<f64, 2>>;

    /// Inserts the way the planner does: radius query first, then add.
    fn grow(tree: &mut Tree, state: RealVectorState<f64, 2>, parent: Option<usize>) -> usize {
        let neighbors = tree.neighbors_within(&state, 1.0);
        tree.add(state, parent, &neighbors)
    }

    #[test]
    fn test_new_motion_weight_is_one_over_k_plus_one() {
        let mut tree = Tree::new();
        let a = grow(&mut tree, RealVectorState::new([0.0, 0.0]), None);
        assert_relative_eq!(tree.selection_weight(a), 1.0);

        // Lands within the radius of a: k = 1.
        let b = grow(&mut tree, RealVectorState::new([0.5, 0.0]), Some(a));
        assert_relative_eq!(tree.selection_weight(b), 0.5);

        // Within the radius of both: k = 2.
        let c = grow(&mut tree, RealVectorState::new([0.25, 0.0]), Some(a));
        assert_relative_eq!(tree.selection_weight(c), 1.0 / 3.0);
    }

    #[test]
    fn test_neighbor_weights_decay_on_insertion() {
        let mut tree = Tree::new();
        let a = grow(&mut tree, RealVectorState::new([0.0, 0.0]), None);

        let before = tree.selection_weight(a);
        grow(&mut tree, RealVectorState::new([0.5, 0.0]), Some(a));
        let after = tree.selection_weight(a);

        // 1.0 decays to 1.0 / (1.0 + 1.0).
        assert!(after < before);
        assert_relative_eq!(after, 0.5);

        grow(&mut tree, RealVectorState::new([0.25, 0.0]), Some(a));
        assert_relative_eq!(tree.selection_weight(a), 1.0 / 3.0);
    }

    #[test]
    fn test_distant_motion_leaves_weights_untouched() {
        let mut tree = Tree::new();
        let a = grow(&mut tree, RealVectorState::new([0.0, 0.0]), None);
        grow(&mut tree, RealVectorState::new([10.0, 0.0]), Some(a));
        assert_relative_eq!(tree.selection_weight(a), 1.0);
    }

    #[test]
    fn test_root_is_inherited() {
        let mut tree = Tree::new();
        let a = grow(&mut tree, RealVectorState::new([0.0, 0.0]), None);
        let b = grow(&mut tree, RealVectorState::new([2.0, 0.0]), Some(a));
        let c = grow(&mut tree, RealVectorState::new([4.0, 0.0]), Some(b));

        assert!(tree.motion(a).is_root());
        assert_eq!(tree.motion(a).root(), a);
        assert_eq!(tree.motion(b).root(), a);
        assert_eq!(tree.motion(c).root(), a);
        assert_eq!(tree.root_state(c), tree.state(a));

        // A second seed starts its own chain.
        let d = grow(&mut tree, RealVectorState::new([20.0, 0.0]), None);
        let e = grow(&mut tree, RealVectorState::new([22.0, 0.0]), Some(d));
        assert_eq!(tree.motion(e).root(), d);
    }

    #[test]
    fn test_parent_chains_are_acyclic() {
        let mut tree = Tree::new();
        let mut parent = None;
        for i in 0..50 {
            let state = RealVectorState::new([i as f64 * 2.0, 0.0]);
            parent = Some(grow(&mut tree, state, parent));
        }

        for start in 0..tree.len() {
            let mut steps = 0;
            let mut current = start;
            while let Some(p) = tree.motion(current).parent() {
                current = p;
                steps += 1;
                assert!(steps <= tree.len(), "parent chain does not terminate");
            }
            assert!(tree.motion(current).is_root());
        }
    }

    #[test]
    fn test_isolated_motion_dominates_sampling() {
        let mut tree = Tree::new();

        // Ten motions packed inside one neighborhood radius of each other.
        for i in 0..10 {
            let angle = i as f64 * 0.628;
            let state = RealVectorState::new([0.1 * angle.cos(), 0.1 * angle.sin()]);
            grow(&mut tree, state, None);
        }
        // One motion far away from the cluster.
        let isolated = grow(&mut tree, RealVectorState::new([100.0, 100.0]), None);

        // Every clustered motion converges to weight 1/10; the isolated one
        // keeps weight 1.
        for i in 0..10 {
            assert_relative_eq!(tree.selection_weight(i), 0.1, epsilon = 1e-12);
        }
        assert_relative_eq!(tree.selection_weight(isolated), 1.0);

        let draws = 20_000;
        let mut counts = vec![0usize; tree.len()];
        for i in 0..draws {
            let u = i as f64 / draws as f64;
            counts[tree.sample(u)] += 1;
        }

        let cluster_max = counts[..10].iter().copied().max().unwrap();
        assert!(
            counts[isolated] > cluster_max,
            "isolated motion sampled {} times, densest cluster motion {}",
            counts[isolated],
            cluster_max
        );
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut tree = Tree::new();
        grow(&mut tree, RealVectorState::new([0.0, 0.0]), None);
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree
            .neighbors_within(&RealVectorState::new([0.0, 0.0]), 10.0)
            .is_empty());

        // Clearing an empty tree is fine.
        tree.clear();
        assert!(tree.is_empty());
    }
}
