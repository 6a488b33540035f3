//! Common error types for evacplan.

use thiserror::Error;

/// Common error type for plan operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid plan document: {0}")]
    PlanFormat(String),

    #[error("Invalid plan name: {0:?}")]
    InvalidPlanName(String),

    #[error("Plan not found for name {0}")]
    PlanNotFound(String),

    #[error("Failed to write plan {name}: {source}")]
    WritePlan {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list plans: {0}")]
    ListPlans(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias using common Error.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::PlanFormat(e.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e.to_string())
    }
}

impl Error {
    /// Whether this error means the named plan does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PlanNotFound(_))
    }
}
