use ron::ser::{PrettyConfig, to_string_pretty};
use serde::{Deserialize, Serialize};

use crate::{error::Result, integrator::TvdRungeKutta};

/// Serializable choice of scheme, e.g. `(stages: 5, stop_on_fail: true)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    pub stages: i64,
    /// Marks a rejected stage count as fatal for the caller.
    pub stop_on_fail: bool,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            stages: 3,
            stop_on_fail: false,
        }
    }
}

impl SchemeConfig {
    pub fn new(stages: i64) -> Self {
        Self {
            stages,
            ..Default::default()
        }
    }

    pub fn with_stop_on_fail(mut self, stop_on_fail: bool) -> Self {
        self.stop_on_fail = stop_on_fail;
        self
    }

    pub fn from_ron(contents: &str) -> Result<Self> {
        Ok(ron::from_str(contents)?)
    }

    pub fn to_ron(&self) -> Result<String> {
        Ok(to_string_pretty(self, PrettyConfig::new())?)
    }

    /// Initializes an integrator with the configured stage count.
    pub fn build(&self) -> Result<TvdRungeKutta> {
        let mut integrator = TvdRungeKutta::new();
        integrator.init(self.stages, self.stop_on_fail)?;
        Ok(integrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::IntegratorError, tableau::Scheme};

    #[test]
    fn test_parse_and_build() {
        let config = SchemeConfig::from_ron("(stages: 5, stop_on_fail: true)").unwrap();
        assert_eq!(config, SchemeConfig::new(5).with_stop_on_fail(true));
        let integrator = config.build().unwrap();
        assert_eq!(integrator.scheme(), Some(Scheme::SspRk54));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = SchemeConfig::from_ron("(stages: 2)").unwrap();
        assert!(!config.stop_on_fail);
        let config = SchemeConfig::from_ron("(stop_on_fail: true)").unwrap();
        assert_eq!(config.stages, SchemeConfig::default().stages);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = SchemeConfig::new(1);
        let text = config.to_ron().unwrap();
        assert_eq!(SchemeConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_stages_carry_stop_on_fail() {
        let err = SchemeConfig::new(4).with_stop_on_fail(true).build().unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, IntegratorError::BadStagesNumber { stages: 4, .. }));
    }

    #[test]
    fn test_malformed_document() {
        let err = SchemeConfig::from_ron("(stages: \"three\")").unwrap_err();
        assert!(matches!(err, IntegratorError::Config(_)));
    }
}
