//! Bidirectional Expansive Space Trees (EST) motion planning.
//!
//! Two density-aware trees grow toward each other, one rooted at the valid
//! start states and one at sampled goal states; the first valid motion
//! bridging them completes a path.

pub mod est;
pub mod obstacles;
pub mod util;
