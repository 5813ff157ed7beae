//! rp-core: stable foundation for resiplot.
//!
//! Contains:
//! - units (uom SI area/length types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::RpError;
pub use numeric::*;
pub use units::*;
