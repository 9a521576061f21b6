use crate::{
    error::{IntegratorError, Result},
    state::StageState,
    tableau::{self, SUPPORTED_STAGES, Scheme, Tableau},
};

/// Advances `u` from `t` to `t + dt` with one step of the scheme in `tableau`.
///
/// `stages` is caller-owned scratch space with exactly one slot per stage.
/// On return it holds the residual of every stage, in stage order. The
/// residual is evaluated exactly `tableau.stages()` times, once per stage
/// through [`StageState::at_time`].
///
/// # Errors
///
/// * [`IntegratorError::NotInitialized`] if the tableau has zero stages.
/// * [`IntegratorError::DimensionMismatch`] if `stages.len()` differs from the stage count.
///
/// Neither `u` nor `stages` is touched when an error is returned.
pub fn integrate<S: StageState>(
    tableau: &Tableau,
    u: &mut S,
    stages: &mut [S],
    dt: f64,
    t: f64,
) -> Result<()> {
    if !tableau.is_initialized() {
        return Err(IntegratorError::NotInitialized);
    }
    if stages.len() != tableau.stages() {
        return Err(IntegratorError::DimensionMismatch {
            expected: tableau.stages(),
            found: stages.len(),
        });
    }
    tracing::trace!(stages = tableau.stages(), dt, t, "integrating step");

    // stage s only reads stages 0..s, so each one is split off from those already computed
    for s in 0..stages.len() {
        let (computed, rest) = stages.split_at_mut(s);
        let stage = &mut rest[0];
        stage.clone_from(u);
        for (prior, alpha) in computed.iter().zip(tableau.alpha_row(s)) {
            stage.add_scaled(prior, dt * alpha);
        }
        *stage = stage.at_time(t + tableau.gamma()[s] * dt);
    }

    for (stage, beta) in stages.iter().zip(tableau.beta()) {
        u.add_scaled(stage, dt * beta);
    }
    Ok(())
}

/// Two-line summary of the integrator family, each line starting with `prefix`.
pub fn describe(prefix: &str) -> String {
    format!("{prefix}TVD Runge-Kutta time integrator\n{prefix}Supported stages: {SUPPORTED_STAGES}")
}

/// TVD Runge-Kutta integrator owning its tableau.
///
/// A freshly constructed integrator has no stages and refuses to integrate
/// until [`init`](Self::init) succeeds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TvdRungeKutta {
    tableau: Tableau,
}

impl TvdRungeKutta {
    /// An uninitialized integrator with zero stages.
    pub fn new() -> Self {
        Self::default()
    }

    /// An integrator for the scheme with `stages` stages.
    ///
    /// # Errors
    ///
    /// [`IntegratorError::BadStagesNumber`] (non-fatal) if `stages` is not 1, 2, 3 or 5.
    pub fn with_stages(stages: i64) -> Result<Self> {
        Ok(Self {
            tableau: tableau::init(stages, false)?,
        })
    }

    /// An integrator for a catalogue entry, which cannot fail.
    pub fn from_scheme(scheme: Scheme) -> Self {
        Self {
            tableau: scheme.tableau(),
        }
    }

    /// Re-initializes with `stages` stages. See [`Tableau::init`].
    pub fn init(&mut self, stages: i64, stop_on_fail: bool) -> Result<()> {
        self.tableau.init(stages, stop_on_fail)
    }

    /// Returns the integrator to the uninitialized state.
    pub fn destroy(&mut self) {
        self.tableau.destroy();
    }

    pub fn stages(&self) -> usize {
        self.tableau.stages()
    }

    pub fn scheme(&self) -> Option<Scheme> {
        self.tableau.scheme()
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// One step of size `dt` from `t`. See [`integrate`].
    pub fn integrate<S: StageState>(&self, u: &mut S, stages: &mut [S], dt: f64, t: f64) -> Result<()> {
        integrate(&self.tableau, u, stages, dt, t)
    }

    pub fn describe(&self, prefix: &str) -> String {
        describe(prefix)
    }
}
