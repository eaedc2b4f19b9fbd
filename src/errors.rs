use serde::{Deserialize, Serialize};
use std::fmt;

/// The three ordered remote writes of the purchase submission workflow.
///
/// Errors raised while a step is running carry this tag so the caller can
/// tell the user which stage failed and offer a retry of that stage alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStep {
    Header,
    Items,
    Lots,
}

impl fmt::Display for SubmissionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionStep::Header => write!(f, "header"),
            SubmissionStep::Items => write!(f, "items"),
            SubmissionStep::Lots => write!(f, "lots"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Line index {index} out of range ({len} lines)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid lot count: {0}")]
    InvalidCount(String),

    #[error("Invalid meter length: {0}")]
    InvalidLength(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    /// The header save response did not include a durable purchase id, so
    /// line items and lots have nothing to attach to.
    #[error("Backend response did not include a purchase id")]
    MissingPurchaseId,

    #[error("{step} step failed: {source}")]
    StepFailed {
        step: SubmissionStep,
        #[source]
        source: Box<LedgerError>,
    },

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl LedgerError {
    /// Tag an error with the workflow step it occurred in. Already-tagged
    /// errors are passed through unchanged so nested calls do not stack tags.
    pub fn in_step(self, step: SubmissionStep) -> Self {
        match self {
            LedgerError::StepFailed { .. } => self,
            other => LedgerError::StepFailed {
                step,
                source: Box::new(other),
            },
        }
    }

    /// The step tag, if this error was raised inside the submission workflow.
    pub fn step(&self) -> Option<SubmissionStep> {
        match self {
            LedgerError::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        match self {
            LedgerError::ValidationError(_)
            | LedgerError::InvalidCount(_)
            | LedgerError::InvalidLength(_)
            | LedgerError::IndexOutOfRange { .. } => true,
            LedgerError::StepFailed { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for LedgerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            LedgerError::NetworkError(err.to_string())
        } else {
            LedgerError::ExternalApiError(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for LedgerError {
    fn from(err: validator::ValidationErrors) -> Self {
        LedgerError::ValidationError(err.to_string())
    }
}
