use std::ops::{Add, Index, Mul, Sub};

/// The dependent variable `y` of an ODE `dy/dx = f(x, y)`.
///
/// A fixed-length sequence of `f64` values supporting element-wise addition,
/// subtraction, scalar multiplication, and element-wise transforms.
///
/// Cloning copies the underlying values, so a recorded state is never
/// affected by later changes to the current state.
///
/// # Panics
///
/// The arithmetic operators panic if the two operands differ in length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateVector(Vec<f64>);

impl StateVector {
    /// Creates a state vector of `len` zeros.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Returns a new vector with `f` applied to each element.
    #[must_use]
    pub fn map(&self, f: impl FnMut(f64) -> f64) -> Self {
        self.0.iter().copied().map(f).collect()
    }

    /// Returns a new vector with each element squared.
    #[must_use]
    pub fn squared(&self) -> Self {
        self.map(|v| v * v)
    }

    /// Consumes the vector and returns its elements.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    fn zip_with(&self, other: &Self, op: impl Fn(f64, f64) -> f64) -> Self {
        assert_eq!(
            self.len(),
            other.len(),
            "state vectors must have equal length"
        );
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| op(*a, *b))
            .collect()
    }
}

impl From<Vec<f64>> for StateVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[f64; N]> for StateVector {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl FromIterator<f64> for StateVector {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StateVector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Index<usize> for StateVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl Add<&StateVector> for &StateVector {
    type Output = StateVector;

    fn add(self, rhs: &StateVector) -> StateVector {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Add for StateVector {
    type Output = StateVector;

    fn add(self, rhs: StateVector) -> StateVector {
        &self + &rhs
    }
}

impl Sub<&StateVector> for &StateVector {
    type Output = StateVector;

    fn sub(self, rhs: &StateVector) -> StateVector {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Sub for StateVector {
    type Output = StateVector;

    fn sub(self, rhs: StateVector) -> StateVector {
        &self - &rhs
    }
}

impl Mul<f64> for &StateVector {
    type Output = StateVector;

    fn mul(self, rhs: f64) -> StateVector {
        self.map(|v| v * rhs)
    }
}

impl Mul<f64> for StateVector {
    type Output = StateVector;

    fn mul(mut self, rhs: f64) -> StateVector {
        self.0.iter_mut().for_each(|v| *v *= rhs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_wise_arithmetic() {
        let a = StateVector::from([1.0, 2.0, 3.0]);
        let b = StateVector::from([0.5, 0.5, 0.5]);

        assert_eq!(&a + &b, StateVector::from([1.5, 2.5, 3.5]));
        assert_eq!(&a - &b, StateVector::from([0.5, 1.5, 2.5]));
        assert_eq!(&a * 2.0, StateVector::from([2.0, 4.0, 6.0]));
        assert_eq!(a.squared(), StateVector::from([1.0, 4.0, 9.0]));
    }

    #[test]
    fn clones_do_not_alias() {
        let mut current = StateVector::from([1.0, 2.0]);
        let recorded = current.clone();

        current = current * 10.0;

        assert_eq!(recorded, StateVector::from([1.0, 2.0]));
        assert_eq!(current, StateVector::from([10.0, 20.0]));
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn mismatched_lengths_panic() {
        let _ = StateVector::from([1.0]) + StateVector::from([1.0, 2.0]);
    }
}
