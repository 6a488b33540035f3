//! Plan store configuration.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable naming the plan directory.
pub const PLAN_DIR_ENV: &str = "EVACPLAN_PLAN_DIR";

/// Plan directory used when nothing else is configured.
pub const DEFAULT_PLAN_DIR: &str = "data/migration-plans";

/// Where plan files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root directory every plan name is resolved against.
    pub plan_dir: PathBuf,
}

impl StoreConfig {
    /// Create a config rooted at `plan_dir`.
    pub fn new(plan_dir: impl Into<PathBuf>) -> Self {
        Self {
            plan_dir: plan_dir.into(),
        }
    }

    /// Read the plan directory from `EVACPLAN_PLAN_DIR`, falling back to
    /// [`DEFAULT_PLAN_DIR`] when the variable is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_value(std::env::var(PLAN_DIR_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Result<Self> {
        match value {
            None => Ok(Self::default()),
            Some(v) if v.trim().is_empty() => Err(Error::Config(format!(
                "{} is set but empty",
                PLAN_DIR_ENV
            ))),
            Some(v) => {
                tracing::debug!("Plan directory from {}: {}", PLAN_DIR_ENV, v);
                Ok(Self::new(v))
            }
        }
    }

    /// The configured root directory.
    pub fn plan_dir(&self) -> &Path {
        &self.plan_dir
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PLAN_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_uses_default() {
        let config = StoreConfig::from_value(None).unwrap();
        assert_eq!(config.plan_dir(), Path::new(DEFAULT_PLAN_DIR));
    }

    #[test]
    fn test_explicit_value() {
        let config = StoreConfig::from_value(Some("/srv/plans".to_string())).unwrap();
        assert_eq!(config.plan_dir(), Path::new("/srv/plans"));
    }

    #[test]
    fn test_empty_value_rejected() {
        let err = StoreConfig::from_value(Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
