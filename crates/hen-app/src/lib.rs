//! Shared application service layer for the pinch-analysis engine.
//!
//! Frontends (CLI today, a GUI tomorrow) talk to [`Setup`] instead of
//! the engine crates directly: it owns the input tables, keeps the
//! derived targeting state consistent across edits, and scopes the
//! design ledgers to the current partitions.

pub mod error;
pub mod project_service;
pub mod setup;

pub use error::{AppError, AppResult};
pub use project_service::{load_setup, project_from_setup, save_setup, setup_from_project};
pub use setup::{DEFAULT_DT, Derived, Setup};
