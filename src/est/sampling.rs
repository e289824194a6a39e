use crate::est::state::RealVectorState;
use crate::est::validity_checker::ValidityChecker;
use num_traits::Float;
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;

/// Produces valid states in the neighborhood of an anchor state.
pub trait LocalSampler<F: Float, const N: usize> {
    /// Returns a valid state within `max_distance` of `anchor`, or `None`
    /// if none could be found.
    fn sample_near(
        &mut self,
        rng: &mut dyn RngCore,
        checker: &dyn ValidityChecker<F, N>,
        anchor: &RealVectorState<F, N>,
        max_distance: F,
    ) -> Option<RealVectorState<F, N>>;
}

/// Draws a state uniformly from the ball of the given radius around `center`:
/// a Gaussian vector fixes the direction and the radius is scaled by u^(1/N).
pub fn uniform_in_ball<F: Float, const N: usize>(
    rng: &mut dyn RngCore,
    center: &RealVectorState<F, N>,
    radius: F,
) -> RealVectorState<F, N> {
    loop {
        let mut direction = [F::zero(); N];
        let mut norm_squared = F::zero();
        for value in direction.iter_mut() {
            let gaussian: f64 = rng.sample(StandardNormal);
            let gaussian = F::from(gaussian).unwrap();
            *value = gaussian;
            norm_squared = norm_squared + gaussian * gaussian;
        }
        if norm_squared == F::zero() {
            continue;
        }

        let u: f64 = rng.gen();
        let scale = radius * F::from(u.powf(1.0 / N as f64)).unwrap() / norm_squared.sqrt();

        let mut values = *center.values();
        for i in 0..N {
            values[i] = values[i] + direction[i] * scale;
        }
        return RealVectorState::new(values);
    }
}

/// Rejection sampler over the uniform ball: draws candidates around the
/// anchor and returns the first one the validity checker accepts.
pub struct UniformLocalSampler {
    attempts: usize,
}

impl UniformLocalSampler {
    const DEFAULT_ATTEMPTS: usize = 10;

    pub fn new() -> Self {
        Self {
            attempts: Self::DEFAULT_ATTEMPTS,
        }
    }

    pub fn with_attempts(attempts: usize) -> Self {
        Self { attempts }
    }
}

impl Default for UniformLocalSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, const N: usize> LocalSampler<F, N> for UniformLocalSampler {
    fn sample_near(
        &mut self,
        rng: &mut dyn RngCore,
        checker: &dyn ValidityChecker<F, N>,
        anchor: &RealVectorState<F, N>,
        max_distance: F,
    ) -> Option<RealVectorState<F, N>> {
        for _ in 0..self.attempts {
            let candidate = uniform_in_ball(rng, anchor, max_distance);
            if checker.is_state_valid(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::est::validity_checker::AlwaysValid;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Accepts only states with a non-negative first coordinate.
    struct RightHalfPlane;

    impl ValidityChecker<f64, 2> for RightHalfPlane {
        fn is_state_valid(&self, state: &RealVectorState<f64, 2>) -> bool {
            state[0] >= 0.0
        }

        fn is_edge_valid(
            &self,
            a: &RealVectorState<f64, 2>,
            b: &RealVectorState<f64, 2>,
        ) -> bool {
            self.is_state_valid(a) && self.is_state_valid(b)
        }
    }

    /// Accepts nothing.
    struct NothingValid;

    impl ValidityChecker<f64, 2> for NothingValid {
        fn is_state_valid(&self, _state: &RealVectorState<f64, 2>) -> bool {
            false
        }

        fn is_edge_valid(
            &self,
            _a: &RealVectorState<f64, 2>,
            _b: &RealVectorState<f64, 2>,
        ) -> bool {
            false
        }
    }

    #[test]
    fn test_samples_stay_within_radius() {
        let mut rng = StdRng::seed_from_u64(1);
        let anchor = RealVectorState::new([3.0, -2.0]);
        for _ in 0..1000 {
            let sample = uniform_in_ball(&mut rng, &anchor, 0.5);
            assert!(anchor.euclidean_distance(&sample) <= 0.5 + 1e-12);
        }
    }

    #[test]
    fn test_sampler_respects_validity() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut sampler = UniformLocalSampler::new();
        let anchor = RealVectorState::new([0.1, 0.0]);
        let mut successes = 0;
        for _ in 0..200 {
            if let Some(sample) =
                sampler.sample_near(&mut rng, &RightHalfPlane, &anchor, 1.0)
            {
                assert!(sample[0] >= 0.0);
                successes += 1;
            }
        }
        // Roughly half the ball is valid, so ten attempts all but always succeed.
        assert!(successes > 150);
    }

    #[test]
    fn test_sampler_reports_failure() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sampler = UniformLocalSampler::new();
        let anchor = RealVectorState::new([0.0, 0.0]);
        assert!(sampler
            .sample_near(&mut rng, &NothingValid, &anchor, 1.0)
            .is_none());
    }

    #[test]
    fn test_always_valid_succeeds_first_attempt() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut sampler = UniformLocalSampler::with_attempts(1);
        let anchor = RealVectorState::new([0.0, 0.0]);
        let sample: Option<RealVectorState<f64, 2>> =
            sampler.sample_near(&mut rng, &AlwaysValid::new(), &anchor, 2.0);
        assert!(sample.is_some());
    }
}
