//! Explicit TVD / SSP Runge-Kutta time integration for `U_t = R(t, U)`.
//!
//! A [`Tableau`] is picked from a closed catalogue of 1, 2, 3 and 5 stage
//! schemes (orders 1 to 4). [`integrate`] then advances any [`StageState`]
//! by one step, writing the stage residuals into a caller-owned buffer.
//!
//! ```
//! use tvd_rk::{StageState, TvdRungeKutta};
//!
//! #[derive(Clone)]
//! struct Decay(f64);
//!
//! impl StageState for Decay {
//!     fn add_scaled(&mut self, other: &Self, factor: f64) {
//!         self.0 += factor * other.0;
//!     }
//!     fn at_time(&self, _t: f64) -> Self {
//!         Decay(-self.0)
//!     }
//! }
//!
//! let integrator = TvdRungeKutta::with_stages(2)?;
//! let mut u = Decay(1.0);
//! let mut stages = vec![Decay(0.0); integrator.stages()];
//! integrator.integrate(&mut u, &mut stages, 0.1, 0.0)?;
//! assert!((u.0 - 0.905).abs() < 1e-12);
//! # Ok::<(), tvd_rk::IntegratorError>(())
//! ```

pub mod config;
pub mod error;
pub mod integrator;
pub mod state;
pub mod tableau;

pub use config::SchemeConfig;
pub use error::{IntegratorError, Result};
pub use integrator::{TvdRungeKutta, describe, integrate};
pub use state::{
    Integrable, OdeModel, StageState, model_state::ModelState, state_array::StateArray,
    state_vector::StateVector,
};
pub use tableau::{SUPPORTED_STAGES, Scheme, Tableau, is_supported, max_stages, min_stages};
