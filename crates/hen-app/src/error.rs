//! Error types for the hen-app service layer.

use hen_core::HenError;

/// Application error wrapping the engine's taxonomy with the
/// service-level failures the frontends need.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A targeting or design computation rejected its inputs; the
    /// engine's own taxonomy is preserved for the caller to match on.
    #[error("Engine error: {0}")]
    Engine(#[from] HenError),

    #[error("Project error: {0}")]
    Project(#[from] hen_project::ProjectError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for hen-app operations.
pub type AppResult<T> = Result<T, AppError>;
