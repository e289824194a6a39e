pub mod bi_est;
pub mod goal;
pub mod motion;
pub mod neighbors;
pub mod pdf;
pub mod planner_data;
pub mod problem;
pub mod sampling;
pub mod state;
pub mod status;
pub mod termination;
pub mod tree;
pub mod validity_checker;

pub use bi_est::BiEst;
pub use goal::{GoalBall, GoalRegion, GoalStates};
pub use motion::Motion;
pub use neighbors::{KdTreeNearestNeighbors, LinearNearestNeighbors, NearestNeighbors};
pub use pdf::Pdf;
pub use planner_data::{PlannerData, PlannerDataVertex};
pub use problem::ProblemDefinition;
pub use sampling::{LocalSampler, UniformLocalSampler};
pub use state::RealVectorState;
pub use status::PlannerStatus;
pub use termination::{IterationLimit, TerminationCondition, TimeLimit};
pub use tree::EstTree;
pub use validity_checker::{AlwaysValid, UnionValidityChecker, ValidityChecker};
