use std::fmt;

use super::{Integrable, OdeModel, StageState};

/// A state value paired with the model that owns its residual.
///
/// `at_time` calls [`OdeModel::f`], which makes any `OdeModel` usable with
/// [`integrate`](crate::integrator::integrate). The model is borrowed, so a
/// stage buffer of `ModelState`s costs one value per stage.
pub struct ModelState<'m, M: OdeModel> {
    pub value: M::State,
    model: &'m M,
}

impl<'m, M: OdeModel> ModelState<'m, M> {
    pub fn new(model: &'m M, value: M::State) -> Self {
        Self { value, model }
    }

    pub fn model(&self) -> &'m M {
        self.model
    }

    pub fn into_value(self) -> M::State {
        self.value
    }

    /// A buffer of `stages` slots, each a copy of this state.
    pub fn stage_buffer(&self, stages: usize) -> Vec<Self> {
        vec![self.clone(); stages]
    }
}

impl<M: OdeModel> Clone for ModelState<'_, M> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            model: self.model,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.value.clone_from(&source.value);
        self.model = source.model;
    }
}

impl<M: OdeModel> fmt::Debug for ModelState<'_, M>
where
    M::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelState")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<M: OdeModel> StageState for ModelState<'_, M> {
    fn add_scaled(&mut self, other: &Self, factor: f64) {
        self.value.scaled_add(&other.value, factor);
    }

    fn at_time(&self, t: f64) -> Self {
        let mut derivative = self.value.clone();
        self.model.f(t, &self.value, &mut derivative);
        Self {
            value: derivative,
            model: self.model,
        }
    }
}
