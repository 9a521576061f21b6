//! State capabilities required by the stage integrator, and a few ready-made states.

use std::ops::{AddAssign, MulAssign};

pub mod model_state;
pub mod state_array;
pub mod state_vector;

/// Capability set a state must offer to be advanced by
/// [`integrate`](crate::integrator::integrate).
///
/// The integrator never looks inside a state. It only accumulates scaled
/// stages and asks the state for its residual at a stage time.
pub trait StageState: Clone {
    /// `self += factor * other`
    fn add_scaled(&mut self, other: &Self, factor: f64);

    /// Returns the residual `R(t, self)` as a state value stamped with `t`.
    ///
    /// This is the only place the residual operator is evaluated.
    fn at_time(&self, t: f64) -> Self;
}

/// Plain vector-space arithmetic, for states that build [`StageState::add_scaled`]
/// out of addition and scalar multiplication.
pub trait Integrable: Clone + MulAssign<f64>
where
    for<'a> Self: AddAssign<&'a Self>,
{
    /// `self += factor * other`, computed through a scaled copy of `other`.
    ///
    /// Types that can fuse the two operations should override this.
    fn scaled_add(&mut self, other: &Self, factor: f64) {
        let mut scaled = other.clone();
        scaled *= factor;
        *self += &scaled;
    }
}

/// Residual operator `R(t, U)` of an ODE system `U_t = R(t, U)`.
pub trait OdeModel {
    type State: Integrable;

    /// Compute the derivative at time `t` and state `state`, storing the result in `derivative`.
    fn f(&self, t: f64, state: &Self::State, derivative: &mut Self::State);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scalar with arithmetic only, relying on the provided `scaled_add`.
    #[derive(Clone, Debug, PartialEq)]
    struct Scalar(f64);

    impl AddAssign<&Scalar> for Scalar {
        fn add_assign(&mut self, rhs: &Scalar) {
            self.0 += rhs.0;
        }
    }

    impl MulAssign<f64> for Scalar {
        fn mul_assign(&mut self, rhs: f64) {
            self.0 *= rhs;
        }
    }

    impl Integrable for Scalar {}

    #[test]
    fn test_default_scaled_add() {
        let mut x = Scalar(1.5);
        let y = Scalar(-2.0);
        x.scaled_add(&y, 0.25);
        assert_eq!(x, Scalar(1.0));
        assert_eq!(y, Scalar(-2.0));
    }
}
