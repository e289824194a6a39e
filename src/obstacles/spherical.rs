use crate::est::state::RealVectorState;
use crate::obstacles::Obstacle;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A solid N-dimensional ball obstacle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sphere<F: Float, const N: usize> {
    center: RealVectorState<F, N>,
    radius: F,
}

impl<F: Float, const N: usize> Sphere<F, N> {
    pub fn new(center: RealVectorState<F, N>, radius: F) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> &RealVectorState<F, N> {
        &self.center
    }

    pub fn radius(&self) -> F {
        self.radius
    }
}

impl<F: Float, const N: usize> Obstacle<F, N> for Sphere<F, N> {
    fn contains(&self, state: &RealVectorState<F, N>) -> bool {
        self.center.euclidean_distance_squared(state) < self.radius * self.radius
    }

    fn intersects_segment(
        &self,
        start: &RealVectorState<F, N>,
        end: &RealVectorState<F, N>,
    ) -> bool {
        if self.contains(start) || self.contains(end) {
            return true;
        }

        // Solve |start + t*(end - start) - center|^2 = radius^2 for t and
        // test whether a root falls inside the segment parameter range.
        let direction = end - start;
        let center_to_start = start - &self.center;
        let a = direction.dot(&direction);
        let b = F::from(2.0).unwrap() * center_to_start.dot(&direction);
        let c = center_to_start.dot(&center_to_start) - self.radius * self.radius;
        let discriminant = b * b - F::from(4.0).unwrap() * a * c;

        if discriminant < F::zero() || a == F::zero() {
            return false;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let two_a = F::from(2.0).unwrap() * a;
        let t1 = (-b - sqrt_discriminant) / two_a;
        let t2 = (-b + sqrt_discriminant) / two_a;

        (t1 >= F::zero() && t1 <= F::one()) || (t2 >= F::zero() && t2 <= F::one())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let sphere = Sphere::new(RealVectorState::new([0.0, 0.0]), 1.0);
        assert!(sphere.contains(&RealVectorState::new([0.5, 0.0])));
        assert!(!sphere.contains(&RealVectorState::new([1.5, 0.0])));
        // The boundary is not inside.
        assert!(!sphere.contains(&RealVectorState::new([1.0, 0.0])));
    }

    #[test]
    fn test_segment_through_sphere() {
        let sphere = Sphere::new(RealVectorState::new([0.0, 0.0]), 1.0);
        let left = RealVectorState::new([-2.0, 0.0]);
        let right = RealVectorState::new([2.0, 0.0]);
        assert!(sphere.intersects_segment(&left, &right));
    }

    #[test]
    fn test_segment_missing_sphere() {
        let sphere = Sphere::new(RealVectorState::new([0.0, 0.0]), 1.0);
        let a = RealVectorState::new([-2.0, 2.0]);
        let b = RealVectorState::new([2.0, 2.0]);
        assert!(!sphere.intersects_segment(&a, &b));
    }

    #[test]
    fn test_segment_stopping_short() {
        let sphere = Sphere::new(RealVectorState::new([10.0, 0.0]), 1.0);
        let a = RealVectorState::new([0.0, 0.0]);
        let b = RealVectorState::new([5.0, 0.0]);
        assert!(!sphere.intersects_segment(&a, &b));
    }

    #[test]
    fn test_segment_endpoint_inside() {
        let sphere = Sphere::new(RealVectorState::new([0.0, 0.0]), 1.0);
        let inside = RealVectorState::new([0.2, 0.1]);
        let outside = RealVectorState::new([5.0, 5.0]);
        assert!(sphere.intersects_segment(&inside, &outside));
        assert!(sphere.intersects_segment(&outside, &inside));
    }
}
