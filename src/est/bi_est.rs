use crate::est::neighbors::NearestNeighbors;
use crate::est::planner_data::{PlannerData, PlannerDataVertex, GOAL_TREE_TAG, START_TREE_TAG};
use crate::est::problem::ProblemDefinition;
use crate::est::sampling::LocalSampler;
use crate::est::state::RealVectorState;
use crate::est::status::PlannerStatus;
use crate::est::termination::TerminationCondition;
use crate::est::tree::EstTree;
use crate::est::validity_checker::ValidityChecker;
use log::{error, info, warn};
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The two motions whose states bridged the trees.
#[derive(Clone, Copy, Debug)]
struct Connection {
    start_motion: usize,
    goal_motion: usize,
}

/// Probability of discarding a candidate with `k` existing motions in its
/// neighborhood: 0 for an empty neighborhood, approaching 1 as it crowds.
fn rejection_probability(k: usize) -> f64 {
    if k == 0 {
        0.0
    } else {
        1.0 - 1.0 / k as f64
    }
}

/// Bidirectional Expansive Space Trees planner.
///
/// Grows one tree from the valid start states and one from sampled goal
/// states. Expansion seeds are drawn with probability inversely related to
/// local crowding, candidates landing in already-dense regions are rejected,
/// and every accepted motion immediately tries to bridge to the other tree.
/// The first valid bridge ends the search.
pub struct BiEst<F: Float, const N: usize, NN: NearestNeighbors<F, N>> {
    problem: ProblemDefinition<F, N>,
    validity_checker: Box<dyn ValidityChecker<F, N>>,
    local_sampler: Box<dyn LocalSampler<F, N>>,
    start_tree: EstTree<F, N, NN>,
    goal_tree: EstTree<F, N, NN>,
    max_distance: F,
    neighborhood_radius: F,
    starts_consumed: usize,
    goal_samples_drawn: usize,
    connection: Option<Connection>,
    rng: StdRng,
}

impl<F: Float, const N: usize, NN: NearestNeighbors<F, N>> BiEst<F, N, NN> {
    /// Constructs a planner with an entropy-seeded random source.
    ///
    /// `range` is the maximum expansion distance and must be positive; it is
    /// also the radius of the bridging search between the trees.
    pub fn new(
        problem: ProblemDefinition<F, N>,
        validity_checker: Box<dyn ValidityChecker<F, N>>,
        local_sampler: Box<dyn LocalSampler<F, N>>,
        range: F,
    ) -> Self {
        Self::with_rng(
            problem,
            validity_checker,
            local_sampler,
            range,
            StdRng::from_entropy(),
        )
    }

    /// Constructs a planner with a deterministic random source.
    pub fn new_with_seed(
        problem: ProblemDefinition<F, N>,
        validity_checker: Box<dyn ValidityChecker<F, N>>,
        local_sampler: Box<dyn LocalSampler<F, N>>,
        range: F,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            problem,
            validity_checker,
            local_sampler,
            range,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        problem: ProblemDefinition<F, N>,
        validity_checker: Box<dyn ValidityChecker<F, N>>,
        local_sampler: Box<dyn LocalSampler<F, N>>,
        range: F,
        rng: StdRng,
    ) -> Self {
        if range <= F::zero() {
            panic!("The expansion range must be positive.");
        }
        Self {
            problem,
            validity_checker,
            local_sampler,
            start_tree: EstTree::new(),
            goal_tree: EstTree::new(),
            max_distance: range,
            neighborhood_radius: Self::neighborhood_radius_for(range),
            starts_consumed: 0,
            goal_samples_drawn: 0,
            connection: None,
            rng,
        }
    }

    /// The neighborhood radius is kept well below the expansion range so the
    /// density-rejection probabilities stay away from saturation.
    fn neighborhood_radius_for(range: F) -> F {
        range / F::from(3.0).unwrap()
    }

    pub fn range(&self) -> F {
        self.max_distance
    }

    /// Sets the maximum expansion distance; the neighborhood radius is
    /// re-derived from it.
    pub fn set_range(&mut self, range: F) {
        if range <= F::zero() {
            panic!("The expansion range must be positive.");
        }
        self.max_distance = range;
        self.neighborhood_radius = Self::neighborhood_radius_for(range);
    }

    pub fn neighborhood_radius(&self) -> F {
        self.neighborhood_radius
    }

    pub fn problem(&self) -> &ProblemDefinition<F, N> {
        &self.problem
    }

    pub fn start_tree(&self) -> &EstTree<F, N, NN> {
        &self.start_tree
    }

    pub fn goal_tree(&self) -> &EstTree<F, N, NN> {
        &self.goal_tree
    }

    pub fn solved(&self) -> bool {
        self.connection.is_some()
    }

    /// Replaces the random source with a deterministically seeded one.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Searches until a path is found or the termination condition trips.
    ///
    /// Tree state persists across repeated calls; use `clear` to restart
    /// from scratch.
    pub fn solve<T: TerminationCondition>(&mut self, termination: &mut T) -> PlannerStatus {
        if self.problem.goal().is_none() {
            error!("BiEST: the problem definition has no sampleable goal region");
            return PlannerStatus::UnrecognizedGoalType;
        }

        // Seed the start tree with any not-yet-consumed valid start states.
        while self.starts_consumed < self.problem.start_states().len() {
            let state = self.problem.start_states()[self.starts_consumed];
            self.starts_consumed += 1;
            if self.validity_checker.is_state_valid(&state) {
                let neighbors = self
                    .start_tree
                    .neighbors_within(&state, self.neighborhood_radius);
                self.start_tree.add(state, None, &neighbors);
            }
        }

        if self.start_tree.is_empty() {
            error!("BiEST: there are no valid initial states");
            return PlannerStatus::InvalidStart;
        }

        if !self.problem.goal().unwrap().could_sample() {
            error!("BiEST: insufficient states in sampleable goal region");
            return PlannerStatus::InvalidGoal;
        }

        info!(
            "BiEST: starting planning with {} states already in datastructure",
            self.start_tree.len() + self.goal_tree.len()
        );

        let mut start_side = true;
        let mut solved = false;

        while !termination.evaluate() && !solved {
            // Make sure the goal tree has states to expand from.
            if self.goal_tree.is_empty()
                || self.goal_samples_drawn < self.goal_tree.len() / 2
            {
                let sampled = if self.goal_tree.is_empty() {
                    self.next_goal_blocking(termination)
                } else {
                    self.next_goal()
                };
                if let Some(state) = sampled {
                    let neighbors = self
                        .goal_tree
                        .neighbors_within(&state, self.neighborhood_radius);
                    self.goal_tree.add(state, None, &neighbors);
                }
                if self.goal_tree.is_empty() {
                    warn!("BiEST: unable to sample any valid states for goal tree");
                    break;
                }
            }

            // The tree being expanded this iteration, and the one we try to
            // bridge to. A candidate rejected before insertion retries the
            // same side next iteration.
            let (tree, other_tree) = if start_side {
                (&mut self.start_tree, &mut self.goal_tree)
            } else {
                (&mut self.goal_tree, &mut self.start_tree)
            };

            // Pick a seed motion biased toward sparsely covered regions.
            let u = F::from(self.rng.gen::<f64>()).unwrap();
            let seed_index = tree.sample(u);
            let seed_state = *tree.state(seed_index);

            // Sample a candidate within the expansion range of the seed.
            let candidate = match self.local_sampler.sample_near(
                &mut self.rng,
                self.validity_checker.as_ref(),
                &seed_state,
                self.max_distance,
            ) {
                Some(state) => state,
                None => continue,
            };

            // Density rejection: the fuller the candidate's neighborhood,
            // the more likely the candidate is discarded.
            let neighbors = tree.neighbors_within(&candidate, self.neighborhood_radius);
            if self.rng.gen::<f64>() < rejection_probability(neighbors.len()) {
                continue;
            }

            if self
                .validity_checker
                .is_edge_valid(&seed_state, &candidate)
            {
                let new_index = tree.add(candidate, Some(seed_index), &neighbors);

                // Try to bridge to the other tree. Everything within the
                // expansion range is a candidate (a larger ball than the
                // density neighborhood).
                let bridge_candidates =
                    other_tree.neighbors_within_sorted(&candidate, self.max_distance);
                let goal = self.problem.goal().expect("checked at solve entry");
                for &other_index in &bridge_candidates {
                    let (start_root, goal_root) = if start_side {
                        (tree.root_state(new_index), other_tree.root_state(other_index))
                    } else {
                        (other_tree.root_state(other_index), tree.root_state(new_index))
                    };
                    if goal.is_start_goal_pair_valid(start_root, goal_root)
                        && self
                            .validity_checker
                            .is_edge_valid(&candidate, other_tree.state(other_index))
                    {
                        self.connection = Some(if start_side {
                            Connection {
                                start_motion: new_index,
                                goal_motion: other_index,
                            }
                        } else {
                            Connection {
                                start_motion: other_index,
                                goal_motion: new_index,
                            }
                        });
                        solved = true;
                        break;
                    }
                }
            }

            // Swap trees for the next iteration.
            start_side = !start_side;
        }

        info!(
            "BiEST: created {} states ({} start + {} goal)",
            self.start_tree.len() + self.goal_tree.len(),
            self.start_tree.len(),
            self.goal_tree.len()
        );

        if solved {
            PlannerStatus::ExactSolution
        } else {
            PlannerStatus::Timeout
        }
    }

    /// Draws one goal sample, counting the draw, and keeps it only if the
    /// sampled state is valid.
    fn next_goal(&mut self) -> Option<RealVectorState<F, N>> {
        let goal = self.problem.goal_mut().expect("checked at solve entry");
        let state = goal.sample_goal(&mut self.rng)?;
        self.goal_samples_drawn += 1;
        if self.validity_checker.is_state_valid(&state) {
            Some(state)
        } else {
            None
        }
    }

    /// Polls for a goal sample until one is produced or the termination
    /// condition trips. This is the only blocking point of the search.
    fn next_goal_blocking<T: TerminationCondition>(
        &mut self,
        termination: &mut T,
    ) -> Option<RealVectorState<F, N>> {
        loop {
            if let Some(state) = self.next_goal() {
                return Some(state);
            }
            if termination.evaluate() {
                return None;
            }
        }
    }

    /// Returns the solution path from a start root to a goal root, if a
    /// solution was found.
    pub fn get_path(&self) -> Option<Vec<RealVectorState<F, N>>> {
        let connection = self.connection?;
        let mut path = Vec::new();

        // Walk the start side from the bridge back to its root, then flip.
        let mut index = Some(connection.start_motion);
        while let Some(i) = index {
            path.push(*self.start_tree.state(i));
            index = self.start_tree.motion(i).parent();
        }
        path.reverse();

        // Append the goal side from the bridge out to its root.
        let mut index = Some(connection.goal_motion);
        while let Some(i) = index {
            path.push(*self.goal_tree.state(i));
            index = self.goal_tree.motion(i).parent();
        }

        Some(path)
    }

    /// Exports both trees and the bridging edge as a vertex/edge graph.
    pub fn planner_data(&self) -> PlannerData<F, N> {
        let mut vertices = Vec::with_capacity(self.start_tree.len() + self.goal_tree.len());
        let mut start_vertices = Vec::new();
        let mut goal_vertices = Vec::new();
        let mut edges = Vec::new();

        for (i, motion) in self.start_tree.motions().iter().enumerate() {
            vertices.push(PlannerDataVertex {
                state: *motion.state(),
                tag: START_TREE_TAG,
            });
            match motion.parent() {
                None => start_vertices.push(i),
                Some(parent) => edges.push((parent, i)),
            }
        }

        let offset = self.start_tree.len();
        for (i, motion) in self.goal_tree.motions().iter().enumerate() {
            vertices.push(PlannerDataVertex {
                state: *motion.state(),
                tag: GOAL_TREE_TAG,
            });
            match motion.parent() {
                None => goal_vertices.push(offset + i),
                // Goal-tree edges run child to parent so their orientation
                // matches the start tree.
                Some(parent) => edges.push((offset + i, offset + parent)),
            }
        }

        if let Some(connection) = self.connection {
            edges.push((connection.start_motion, offset + connection.goal_motion));
        }

        PlannerData {
            vertices,
            start_vertices,
            goal_vertices,
            edges,
        }
    }

    /// Discards both trees, the connection record, and the sampling
    /// bookkeeping, returning the planner to its post-construction state.
    /// Safe to call repeatedly and on an empty planner.
    pub fn clear(&mut self) {
        self.start_tree.clear();
        self.goal_tree.clear();
        self.connection = None;
        self.starts_consumed = 0;
        self.goal_samples_drawn = 0;
        if let Some(goal) = self.problem.goal_mut() {
            goal.reset();
        }
    }
}
