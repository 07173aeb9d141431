//! hen-core: stable foundation for henflow.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - stream (process stream and film-coefficient tables)
//! - units (SI/US display unit sets)
//! - error (shared error taxonomy)

pub mod error;
pub mod numeric;
pub mod stream;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HenError, HenResult};
pub use numeric::*;
pub use stream::*;
pub use units::*;
