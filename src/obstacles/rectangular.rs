use crate::est::state::RealVectorState;
use crate::obstacles::Obstacle;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A solid axis-aligned hyper-rectangle obstacle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Aabb<F: Float, const N: usize> {
    min_corner: RealVectorState<F, N>,
    max_corner: RealVectorState<F, N>,
}

impl<F: Float, const N: usize> Aabb<F, N> {
    /// Constructs a box from its two extreme corners.
    /// `min_corner` must be coordinate-wise less than or equal to `max_corner`.
    pub fn new(min_corner: RealVectorState<F, N>, max_corner: RealVectorState<F, N>) -> Self {
        for i in 0..N {
            if min_corner[i] > max_corner[i] {
                panic!("Aabb min corner must not exceed max corner on any axis");
            }
        }
        Self {
            min_corner,
            max_corner,
        }
    }

    pub fn min_corner(&self) -> &RealVectorState<F, N> {
        &self.min_corner
    }

    pub fn max_corner(&self) -> &RealVectorState<F, N> {
        &self.max_corner
    }
}

impl<F: Float, const N: usize> Obstacle<F, N> for Aabb<F, N> {
    fn contains(&self, state: &RealVectorState<F, N>) -> bool {
        (0..N).all(|i| state[i] >= self.min_corner[i] && state[i] <= self.max_corner[i])
    }

    /// Liang-Barsky slab test of the segment p(t) = start + t*(end - start),
    /// t in [0, 1], against the box.
    fn intersects_segment(
        &self,
        start: &RealVectorState<F, N>,
        end: &RealVectorState<F, N>,
    ) -> bool {
        let direction = end - start;
        let mut t_min = F::zero();
        let mut t_max = F::one();

        for i in 0..N {
            if direction[i] == F::zero() {
                if start[i] < self.min_corner[i] || start[i] > self.max_corner[i] {
                    return false;
                }
                continue;
            }

            let inv_d = F::one() / direction[i];
            let mut t1 = (self.min_corner[i] - start[i]) * inv_d;
            let mut t2 = (self.max_corner[i] - start[i]) * inv_d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return false;
            }
        }

        true
    }
}
