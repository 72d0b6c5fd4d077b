//! sld-core: stable foundation for the single-line-diagram engine.
//!
//! Contains:
//! - ids (dense segment handles)
//! - switch (switch positions and their conduction rule)
//! - provenance (phase/side tags carried from feeds)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod provenance;
pub mod switch;

// Re-exports: nice ergonomics for downstream crates
pub use error::{SldError, SldResult};
pub use ids::*;
pub use provenance::Provenance;
pub use switch::SwitchState;
