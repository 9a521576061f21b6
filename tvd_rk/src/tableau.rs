//! Butcher tableaux for the explicit TVD/SSP Runge-Kutta family.
//!
//! Only stage counts 1, 2, 3 and 5 have a scheme. The tableaux are filled from
//! literal coefficients and are never modified afterwards, so a single
//! [`Tableau`] can be shared by any number of integration calls.

use serde::{Deserialize, Serialize};

use crate::error::{IntegratorError, Result};

/// Human readable set of admissible stage counts.
pub const SUPPORTED_STAGES: &str = "1-3,5";

const ADMISSIBLE_STAGES: [i64; 4] = [1, 2, 3, 5];
const MIN_STAGES: i64 = 1;
const MAX_STAGES: i64 = 5;

/// True iff a scheme with `stages` stages exists. Four stages is not one of them.
pub fn is_supported(stages: i64) -> bool {
    ADMISSIBLE_STAGES.contains(&stages)
}

/// Lower bound of the stage range, regardless of which counts inside it are supported.
pub fn min_stages() -> i64 {
    MIN_STAGES
}

/// Upper bound of the stage range, regardless of which counts inside it are supported.
pub fn max_stages() -> i64 {
    MAX_STAGES
}

/// Builds the tableau for `stages`, or fails with [`IntegratorError::BadStagesNumber`].
pub fn init(stages: i64, stop_on_fail: bool) -> Result<Tableau> {
    let mut tableau = Tableau::default();
    tableau.init(stages, stop_on_fail)?;
    Ok(tableau)
}

/// Clears `tableau` back to the uninitialized, zero-stage state.
pub fn destroy(tableau: &mut Tableau) {
    tableau.destroy();
}

/// The closed set of schemes in the catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    /// Forward Euler, first order.
    ForwardEuler,
    /// SSPRK(2,2), second order.
    SspRk22,
    /// SSPRK(3,3), third order.
    SspRk33,
    /// SSPRK(5,4), fourth order (Gottlieb, Ketcheson & Shu 2009).
    SspRk54,
}

struct Coefficients {
    // strictly lower triangular rows, row s holds alpha[s][0..s]
    alpha: &'static [&'static [f64]],
    beta: &'static [f64],
    gamma: &'static [f64],
}

const FORWARD_EULER: Coefficients = Coefficients {
    alpha: &[&[]],
    beta: &[1.0],
    gamma: &[0.0],
};

const SSPRK22: Coefficients = Coefficients {
    alpha: &[&[], &[1.0]],
    beta: &[1. / 2., 1. / 2.],
    gamma: &[0.0, 1.0],
};

const SSPRK33: Coefficients = Coefficients {
    alpha: &[&[], &[1.0], &[1. / 4., 1. / 4.]],
    beta: &[1. / 6., 1. / 6., 2. / 3.],
    gamma: &[0.0, 1.0, 1. / 2.],
};

const SSPRK54: Coefficients = Coefficients {
    alpha: &[
        &[],
        &[0.39175222700392],
        &[0.21766909633821, 0.36841059262959],
        &[0.08269208670950, 0.13995850206999, 0.25189177424738],
        &[
            0.06796628370320,
            0.11503469844438,
            0.20703489864929,
            0.54497475021237,
        ],
    ],
    beta: &[
        0.14681187618661,
        0.24848290924556,
        0.10425883036650,
        0.27443890091960,
        0.22600748319395,
    ],
    gamma: &[
        0.0,
        0.39175222700392,
        0.58607968896780,
        0.47454236302687,
        0.93501063100924,
    ],
};

impl Scheme {
    pub const ALL: [Scheme; 4] = [
        Scheme::ForwardEuler,
        Scheme::SspRk22,
        Scheme::SspRk33,
        Scheme::SspRk54,
    ];

    /// Catalogue entry with `stages` stages, `None` for unsupported counts.
    pub fn from_stages(stages: i64) -> Option<Self> {
        match stages {
            1 => Some(Scheme::ForwardEuler),
            2 => Some(Scheme::SspRk22),
            3 => Some(Scheme::SspRk33),
            5 => Some(Scheme::SspRk54),
            _ => None,
        }
    }

    /// Number of stages, which is also the number of residual evaluations per step.
    pub fn stages(&self) -> usize {
        self.coefficients().beta.len()
    }

    /// Formal order of accuracy.
    pub fn order(&self) -> usize {
        match self {
            Scheme::ForwardEuler => 1,
            Scheme::SspRk22 => 2,
            Scheme::SspRk33 => 3,
            Scheme::SspRk54 => 4,
        }
    }

    /// Short display name, e.g. `SSPRK(3,3)`.
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::ForwardEuler => "Forward Euler",
            Scheme::SspRk22 => "SSPRK(2,2)",
            Scheme::SspRk33 => "SSPRK(3,3)",
            Scheme::SspRk54 => "SSPRK(5,4)",
        }
    }

    /// Builds the tableau from the literal coefficients of this scheme.
    pub fn tableau(&self) -> Tableau {
        let coefficients = self.coefficients();
        let mut tableau = Tableau::zeroed(self.stages());
        for (s, row) in coefficients.alpha.iter().enumerate() {
            for (i, a) in row.iter().enumerate() {
                tableau.alpha[s * tableau.stages + i] = *a;
            }
        }
        tableau.beta.copy_from_slice(coefficients.beta);
        tableau.gamma.copy_from_slice(coefficients.gamma);
        tableau
    }

    fn coefficients(&self) -> &'static Coefficients {
        match self {
            Scheme::ForwardEuler => &FORWARD_EULER,
            Scheme::SspRk22 => &SSPRK22,
            Scheme::SspRk33 => &SSPRK33,
            Scheme::SspRk54 => &SSPRK54,
        }
    }
}

/// Coefficients `(alpha, beta, gamma)` of one scheme.
///
/// `alpha` is stored row-major as a `stages x stages` matrix. A tableau with
/// zero stages is uninitialized and cannot be used to integrate.
///
/// Deserializing rebuilds the catalogue entry for the stored stage count and
/// rejects documents whose coefficients differ from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTableau")]
pub struct Tableau {
    stages: usize,
    alpha: Vec<f64>,
    beta: Vec<f64>,
    gamma: Vec<f64>,
}

#[derive(Deserialize)]
struct RawTableau {
    stages: usize,
    alpha: Vec<f64>,
    beta: Vec<f64>,
    gamma: Vec<f64>,
}

impl TryFrom<RawTableau> for Tableau {
    type Error = IntegratorError;

    fn try_from(raw: RawTableau) -> Result<Self> {
        let tableau = Tableau {
            stages: raw.stages,
            alpha: raw.alpha,
            beta: raw.beta,
            gamma: raw.gamma,
        };
        if tableau == Tableau::default() {
            return Ok(tableau);
        }
        let stages = i64::try_from(tableau.stages).unwrap_or(i64::MAX);
        let Some(scheme) = Scheme::from_stages(stages) else {
            return Err(IntegratorError::BadStagesNumber {
                stages,
                fatal: false,
            });
        };
        if tableau != scheme.tableau() {
            return Err(IntegratorError::Config(format!(
                "coefficients do not match the {} tableau",
                scheme.name()
            )));
        }
        Ok(tableau)
    }
}

impl Tableau {
    fn zeroed(stages: usize) -> Self {
        Self {
            stages,
            alpha: vec![0.0; stages * stages],
            beta: vec![0.0; stages],
            gamma: vec![0.0; stages],
        }
    }

    /// Replaces this tableau with the scheme for `stages`.
    ///
    /// The previous coefficients are cleared first, so on failure the tableau
    /// is left uninitialized. `stop_on_fail` only marks the returned error as
    /// fatal; the caller decides what to do with it.
    pub fn init(&mut self, stages: i64, stop_on_fail: bool) -> Result<()> {
        self.destroy();
        let Some(scheme) = Scheme::from_stages(stages) else {
            if stop_on_fail {
                tracing::error!(stages, supported = SUPPORTED_STAGES, "bad number of stages");
            } else {
                tracing::warn!(stages, supported = SUPPORTED_STAGES, "bad number of stages");
            }
            return Err(IntegratorError::BadStagesNumber {
                stages,
                fatal: stop_on_fail,
            });
        };
        *self = scheme.tableau();
        tracing::debug!(
            scheme = scheme.name(),
            stages = self.stages,
            order = scheme.order(),
            "initialized tableau"
        );
        Ok(())
    }

    /// Drops all coefficients and resets the stage count to zero. Idempotent.
    pub fn destroy(&mut self) {
        if self.stages > 0 {
            tracing::debug!(stages = self.stages, "destroying tableau");
        }
        *self = Self::default();
    }

    pub fn stages(&self) -> usize {
        self.stages
    }

    pub fn is_initialized(&self) -> bool {
        self.stages > 0
    }

    /// The catalogue entry this tableau was built from.
    pub fn scheme(&self) -> Option<Scheme> {
        Scheme::from_stages(self.stages as i64)
    }

    /// `alpha[s][i]`, zero-based. Entries outside the matrix read as zero.
    pub fn alpha(&self, s: usize, i: usize) -> f64 {
        if s >= self.stages || i >= self.stages {
            return 0.0;
        }
        self.alpha[s * self.stages + i]
    }

    /// Row `s` of `alpha` up to (not including) the diagonal. Rows outside the matrix are empty.
    pub fn alpha_row(&self, s: usize) -> &[f64] {
        if s >= self.stages {
            return &[];
        }
        let start = s * self.stages;
        &self.alpha[start..start + s]
    }

    pub fn beta(&self) -> &[f64] {
        &self.beta
    }

    pub fn gamma(&self) -> &[f64] {
        &self.gamma
    }

    /// Checks explicitness, `gamma[s] == sum(alpha[s])` and `sum(beta) == 1`.
    pub fn validate(&self, tol: f64) -> bool {
        if !self.is_initialized() || !self.has_consistent_shape() {
            return false;
        }
        for s in 0..self.stages {
            if (s..self.stages).any(|i| self.alpha(s, i) != 0.0) {
                return false;
            }
            let row_sum: f64 = self.alpha_row(s).iter().sum();
            if (row_sum - self.gamma[s]).abs() > tol {
                return false;
            }
        }
        let beta_sum: f64 = self.beta.iter().sum();
        (beta_sum - 1.0).abs() <= tol
    }

    fn has_consistent_shape(&self) -> bool {
        self.alpha.len() == self.stages * self.stages
            && self.beta.len() == self.stages
            && self.gamma.len() == self.stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    const TOL: f64 = 1e-12;
    // the published SSPRK(5,4) weights are rounded to 14 digits
    const BETA_TOL: f64 = 1e-10;

    #[test]
    fn test_supported_stage_counts() {
        for stages in [1, 2, 3, 5] {
            assert!(is_supported(stages));
        }
        for stages in [-1, 0, 4, 6, 100] {
            assert!(!is_supported(stages));
        }
        assert_eq!(min_stages(), 1);
        assert_eq!(max_stages(), 5);
    }

    #[test]
    fn test_gamma_is_alpha_row_sum() {
        for scheme in Scheme::ALL {
            let tableau = scheme.tableau();
            for s in 0..tableau.stages() {
                let row_sum: f64 = (0..tableau.stages()).map(|i| tableau.alpha(s, i)).sum();
                assert_abs_diff_eq!(tableau.gamma()[s], row_sum, epsilon = TOL);
            }
        }
    }

    #[test]
    fn test_alpha_strictly_lower_triangular() {
        for scheme in Scheme::ALL {
            let tableau = scheme.tableau();
            for s in 0..tableau.stages() {
                for i in s..tableau.stages() {
                    assert_eq!(tableau.alpha(s, i), 0.0, "{} alpha[{s}][{i}]", scheme.name());
                }
            }
        }
    }

    #[test]
    fn test_beta_sums_to_one() {
        for scheme in Scheme::ALL {
            let sum: f64 = scheme.tableau().beta().iter().sum();
            assert_abs_diff_eq!(sum, 1.0, epsilon = BETA_TOL);
        }
    }

    #[test]
    fn test_validate() {
        for scheme in Scheme::ALL {
            assert!(scheme.tableau().validate(BETA_TOL));
        }
        assert!(!Tableau::default().validate(BETA_TOL));
    }

    #[test]
    fn test_ssprk33_coefficients() {
        let tableau = init(3, false).unwrap();
        assert_eq!(tableau.alpha_row(1), &[1.0]);
        assert_eq!(tableau.alpha_row(2), &[0.25, 0.25]);
        assert_abs_diff_eq!(tableau.beta()[2], 2.0 / 3.0, epsilon = TOL);
        assert_eq!(tableau.gamma(), &[0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_ssprk54_literals() {
        let tableau = init(5, false).unwrap();
        let alpha: [&[f64]; 5] = [
            &[],
            &[0.39175222700392],
            &[0.21766909633821, 0.36841059262959],
            &[0.08269208670950, 0.13995850206999, 0.25189177424738],
            &[0.06796628370320, 0.11503469844438, 0.20703489864929, 0.54497475021237],
        ];
        for (s, row) in alpha.iter().enumerate() {
            assert_eq!(tableau.alpha_row(s), *row, "alpha row {s}");
        }
        assert_eq!(
            tableau.gamma(),
            &[0.0, 0.39175222700392, 0.58607968896780, 0.47454236302687, 0.93501063100924]
        );
        assert_eq!(
            tableau.beta(),
            &[0.14681187618661, 0.24848290924556, 0.10425883036650, 0.27443890091960, 0.22600748319395]
        );
        let nonzero = (0..5)
            .flat_map(|s| (0..5).map(move |i| (s, i)))
            .filter(|&(s, i)| tableau.alpha(s, i) != 0.0)
            .count();
        assert_eq!(nonzero, 10);
    }

    #[test]
    fn test_init_four_stages_fails() {
        let err = init(4, false).unwrap_err();
        assert_eq!(
            err,
            IntegratorError::BadStagesNumber {
                stages: 4,
                fatal: false
            }
        );
        assert!(!err.is_fatal());
        assert!(init(0, true).unwrap_err().is_fatal());
    }

    #[test]
    fn test_failed_init_clears_previous_tableau() {
        let mut tableau = init(3, false).unwrap();
        assert!(tableau.init(4, false).is_err());
        assert_eq!(tableau.stages(), 0);
        assert_eq!(tableau, Tableau::default());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut tableau = init(5, false).unwrap();
        destroy(&mut tableau);
        let once = tableau.clone();
        destroy(&mut tableau);
        assert_eq!(tableau, once);
        assert_eq!(tableau.stages(), 0);
        assert!(tableau.beta().is_empty());
    }

    #[test]
    fn test_reinit_matches_fresh_tableau() {
        let mut tableau = init(5, false).unwrap();
        tableau.destroy();
        tableau.init(2, false).unwrap();
        assert_eq!(tableau, Scheme::SspRk22.tableau());
        assert_eq!(tableau.scheme(), Some(Scheme::SspRk22));
    }

    #[test]
    fn test_scheme_metadata() {
        for scheme in Scheme::ALL {
            assert_eq!(Scheme::from_stages(scheme.stages() as i64), Some(scheme));
        }
        let orders: Vec<usize> = Scheme::ALL.iter().map(Scheme::order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_alpha_row_out_of_range_is_empty() {
        let tableau = init(3, false).unwrap();
        assert!(tableau.alpha_row(3).is_empty());
        assert!(tableau.alpha_row(10).is_empty());
        assert!(Tableau::default().alpha_row(0).is_empty());
        assert_eq!(tableau.alpha(3, 0), 0.0);
    }

    #[test]
    fn test_deserialize_rebuilds_catalogue_tableau() {
        for scheme in Scheme::ALL {
            let text = ron::to_string(&scheme.tableau()).unwrap();
            let tableau: Tableau = ron::from_str(&text).unwrap();
            assert_eq!(tableau, scheme.tableau());
        }
        let empty: Tableau = ron::from_str("(stages: 0, alpha: [], beta: [], gamma: [])").unwrap();
        assert_eq!(empty, Tableau::default());
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_tableau() {
        let short = ron::from_str::<Tableau>("(stages: 2, alpha: [], beta: [], gamma: [])");
        assert!(short.is_err());
        let unsupported = ron::from_str::<Tableau>("(stages: 4, alpha: [], beta: [], gamma: [])");
        assert!(unsupported.is_err());
        let altered = ron::from_str::<Tableau>(
            "(stages: 1, alpha: [0.0], beta: [0.5], gamma: [0.0])",
        );
        assert!(altered.is_err());
    }

    #[test]
    fn test_validate_rejects_mismatched_lengths() {
        let tableau = Tableau {
            stages: 2,
            alpha: Vec::new(),
            beta: vec![1.0],
            gamma: Vec::new(),
        };
        assert!(!tableau.validate(BETA_TOL));
    }

    proptest! {
        #[test]
        fn prop_init_succeeds_iff_supported(stages in -50i64..50) {
            let result = init(stages, false);
            prop_assert_eq!(result.is_ok(), is_supported(stages));
            if let Ok(tableau) = result {
                prop_assert_eq!(tableau.stages() as i64, stages);
            }
        }
    }
}
