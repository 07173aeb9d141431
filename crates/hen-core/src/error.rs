use thiserror::Error;

pub type HenResult<T> = Result<T, HenError>;

/// Shared error taxonomy for the analysis and design crates.
///
/// All failures are synchronous and surfaced directly to the caller;
/// nothing is retried internally. A stream set with no feasible pinch
/// is not an error and is reported as `pinch: None` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HenError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Value outside correlation range: {what}")]
    InvalidRange { what: String },

    #[error("Infeasible design: {what}")]
    InfeasibleDesign { what: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Conflict: {what}")]
    Conflict { what: String },
}

impl HenError {
    pub fn invalid_input(what: impl Into<String>) -> Self {
        Self::InvalidInput { what: what.into() }
    }

    pub fn invalid_range(what: impl Into<String>) -> Self {
        Self::InvalidRange { what: what.into() }
    }

    pub fn infeasible(what: impl Into<String>) -> Self {
        Self::InfeasibleDesign { what: what.into() }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn conflict(what: impl Into<String>) -> Self {
        Self::Conflict { what: what.into() }
    }
}
