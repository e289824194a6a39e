use num_traits::Float;
use serde::de::{Deserialize, Deserializer, Error};
use serde::ser::{Serialize, Serializer};
use std::ops::{Add, Div, Index, Mul, Sub};

/// A point in N-dimensional configuration space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealVectorState<F: Float, const N: usize> {
    values: [F; N],
}

impl<F: Float, const N: usize> RealVectorState<F, N> {
    /// Constructs a state from its coordinate values.
    pub fn new(values: [F; N]) -> Self {
        Self { values }
    }

    /// Returns the coordinate values.
    pub fn values(&self) -> &[F; N] {
        &self.values
    }

    /// Returns the dot product of this state and another, both treated as vectors.
    pub fn dot(&self, other: &Self) -> F {
        let mut sum = F::zero();
        for i in 0..N {
            sum = sum + self.values[i] * other.values[i];
        }
        sum
    }

    /// Returns the Euclidean norm of this state, treated as a vector.
    pub fn norm(&self) -> F {
        self.dot(self).sqrt()
    }

    /// Returns the squared Euclidean distance to another state.
    pub fn euclidean_distance_squared(&self, other: &Self) -> F {
        let mut sum = F::zero();
        for i in 0..N {
            let d = self.values[i] - other.values[i];
            sum = sum + d * d;
        }
        sum
    }

    /// Returns the Euclidean distance to another state.
    pub fn euclidean_distance(&self, other: &Self) -> F {
        self.euclidean_distance_squared(other).sqrt()
    }
}

// States serialize as a plain coordinate sequence, keeping N free of
// serde's fixed-size array limits.
impl<F: Float + Serialize, const N: usize> Serialize for RealVectorState<F, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values.iter())
    }
}

impl<'de, F: Float + Deserialize<'de>, const N: usize> Deserialize<'de>
    for RealVectorState<F, N>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<F>::deserialize(deserializer)?;
        if values.len() != N {
            return Err(D::Error::invalid_length(
                values.len(),
                &"as many coordinates as the space has dimensions",
            ));
        }
        let mut array = [F::zero(); N];
        array.copy_from_slice(&values);
        Ok(Self { values: array })
    }
}

impl<F: Float, const N: usize> From<[F; N]> for RealVectorState<F, N> {
    fn from(values: [F; N]) -> Self {
        Self::new(values)
    }
}

impl<F: Float, const N: usize> Index<usize> for RealVectorState<F, N> {
    type Output = F;

    fn index(&self, index: usize) -> &F {
        &self.values[index]
    }
}

impl<F: Float, const N: usize> Add for &RealVectorState<F, N> {
    type Output = RealVectorState<F, N>;

    fn add(self, other: Self) -> RealVectorState<F, N> {
        let mut values = self.values;
        for i in 0..N {
            values[i] = values[i] + other.values[i];
        }
        RealVectorState { values }
    }
}

impl<F: Float, const N: usize> Sub for &RealVectorState<F, N> {
    type Output = RealVectorState<F, N>;

    fn sub(self, other: Self) -> RealVectorState<F, N> {
        let mut values = self.values;
        for i in 0..N {
            values[i] = values[i] - other.values[i];
        }
        RealVectorState { values }
    }
}

impl<F: Float, const N: usize> Mul<F> for &RealVectorState<F, N> {
    type Output = RealVectorState<F, N>;

    fn mul(self, scalar: F) -> RealVectorState<F, N> {
        let mut values = self.values;
        for value in values.iter_mut() {
            *value = *value * scalar;
        }
        RealVectorState { values }
    }
}

impl<F: Float, const N: usize> Div<F> for &RealVectorState<F, N> {
    type Output = RealVectorState<F, N>;

    fn div(self, scalar: F) -> RealVectorState<F, N> {
        let mut values = self.values;
        for value in values.iter_mut() {
            *value = *value / scalar;
        }
        RealVectorState { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arithmetic() {
        let a = RealVectorState::new([1.0, 2.0]);
        let b = RealVectorState::new([4.0, 6.0]);
        assert_eq!(&a + &b, RealVectorState::new([5.0, 8.0]));
        assert_eq!(&b - &a, RealVectorState::new([3.0, 4.0]));
        assert_eq!(&a * 2.0, RealVectorState::new([2.0, 4.0]));
        assert_eq!(&b / 2.0, RealVectorState::new([2.0, 3.0]));
    }

    #[test]
    fn test_distances() {
        let a = RealVectorState::new([0.0, 0.0]);
        let b = RealVectorState::new([3.0, 4.0]);
        assert_relative_eq!(a.euclidean_distance(&b), 5.0);
        assert_relative_eq!(a.euclidean_distance_squared(&b), 25.0);
        assert_relative_eq!(b.norm(), 5.0);
        assert_relative_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn test_indexing() {
        let a = RealVectorState::new([7.0, -1.0, 0.5]);
        assert_eq!(a[0], 7.0);
        assert_eq!(a[2], 0.5);
        assert_eq!(a.values(), &[7.0, -1.0, 0.5]);
    }
}
