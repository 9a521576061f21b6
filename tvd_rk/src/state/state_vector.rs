use std::ops::{AddAssign, Deref, DerefMut, MulAssign};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::Integrable;

// below this length the rayon split costs more than the loop
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 4096;

/// A dynamic-sized state for use with the stage integrator.
///
/// Unlike `StateArray`, this type supports arbitrary lengths and stores its data in a `Vec<f64>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateVector {
    value: Vec<f64>,
}

impl StateVector {
    /// Constructs a new `StateVector` from a `Vec<f64>`.
    pub fn new(value: Vec<f64>) -> Self {
        Self { value }
    }

    /// A vector of `n` zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            value: vec![0.0; n],
        }
    }

    /// Sum of absolute differences between neighbouring entries.
    pub fn total_variation(&self) -> f64 {
        self.value
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .sum()
    }

    fn check_len(&self, rhs: &Self) {
        if self.value.len() != rhs.value.len() {
            panic!(
                "state vectors do not have same length ({} vs {})",
                self.value.len(),
                rhs.value.len()
            )
        }
    }
}

impl From<Vec<f64>> for StateVector {
    fn from(value: Vec<f64>) -> Self {
        Self::new(value)
    }
}

impl AddAssign<&Self> for StateVector {
    /// Performs element-wise addition of two `StateVector`s.
    ///
    /// # Panics
    ///
    /// Panics if the vectors have different lengths.
    fn add_assign(&mut self, rhs: &Self) {
        self.check_len(rhs);
        for (x, y) in self.value.iter_mut().zip(&rhs.value) {
            *x += y;
        }
    }
}

impl MulAssign<f64> for StateVector {
    fn mul_assign(&mut self, rhs: f64) {
        for x in self.value.iter_mut() {
            *x *= rhs;
        }
    }
}

impl Integrable for StateVector {
    /// Fused `self += factor * other` without a temporary vector.
    ///
    /// # Panics
    ///
    /// Panics if the vectors have different lengths.
    fn scaled_add(&mut self, other: &Self, factor: f64) {
        self.check_len(other);
        #[cfg(feature = "parallel")]
        if self.value.len() >= PARALLEL_THRESHOLD {
            self.value
                .par_iter_mut()
                .zip(other.value.par_iter())
                .for_each(|(x, y)| *x += factor * y);
            return;
        }
        for (x, y) in self.value.iter_mut().zip(&other.value) {
            *x += factor * y;
        }
    }
}

impl Deref for StateVector {
    type Target = Vec<f64>;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl DerefMut for StateVector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}
