use thiserror::Error;

use crate::tableau::SUPPORTED_STAGES;

pub type Result<T> = std::result::Result<T, IntegratorError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegratorError {
    #[error("bad number of stages {stages}, supported stages are {supported}", supported = SUPPORTED_STAGES)]
    BadStagesNumber { stages: i64, fatal: bool },
    #[error("integrator has not been initialized with a stage count")]
    NotInitialized,
    #[error("stage buffer holds {found} stages but the tableau has {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("invalid scheme configuration: {0}")]
    Config(String),
}

impl IntegratorError {
    /// True when the error was raised by an `init` call that asked to stop on failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, IntegratorError::BadStagesNumber { fatal: true, .. })
    }
}

impl From<ron::error::SpannedError> for IntegratorError {
    fn from(e: ron::error::SpannedError) -> Self {
        IntegratorError::Config(e.to_string())
    }
}

impl From<ron::Error> for IntegratorError {
    fn from(e: ron::Error) -> Self {
        IntegratorError::Config(e.to_string())
    }
}
