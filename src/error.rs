//! Error types.
//!
//! Two layers:
//! - `PipelineError` is the typed failure of a single submission
//!   (load → encode → assemble → scale → predict).
//! - `AppError` is the process-level error the binary turns into an exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for a submission that ended in a `PipelineError`.
pub const EXIT_SUBMISSION: u8 = 1;
/// Exit code for configuration and file-system problems outside a submission.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for terminal (TUI) failures.
pub const EXIT_TERMINAL: u8 = 4;

/// Failure of one prediction attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The artifact file is absent, unreadable, or not a valid artifact document.
    #[error("failed to load artifact '{}': {reason}", .path.display())]
    ArtifactMissing { path: PathBuf, reason: String },

    /// The artifact parsed but lacks a member or is internally inconsistent.
    #[error("malformed artifact: {0}")]
    ArtifactMalformed(String),

    /// A categorical label is outside the active vocabulary.
    #[error("unknown {feature} label '{label}'")]
    UnknownCategory { feature: String, label: String },

    /// The feature vector width does not match the scaler's trained width.
    #[error("scaler expects {expected} features, got {actual}")]
    ScalingError { expected: usize, actual: usize },

    /// The model could not produce a usable prediction.
    #[error("prediction failed: {0}")]
    PredictionError(String),
}

impl PipelineError {
    /// Stable short name of the error category (used in logs).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ArtifactMissing { .. } => "artifact_missing",
            Self::ArtifactMalformed(_) => "artifact_malformed",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::ScalingError { .. } => "scaling_error",
            Self::PredictionError(_) => "prediction_error",
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        Self::new(EXIT_SUBMISSION, crate::report::format_error(&err.to_string()))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
