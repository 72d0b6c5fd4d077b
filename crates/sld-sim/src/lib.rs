//! Energization engine for single-line diagrams.
//!
//! Provides:
//! - Switch state store (toggle, bulk scenario overwrite, snapshots)
//! - Feed points, the only seeds of energization
//! - Breadth-first propagation of energization and phase/side provenance
//!   through closed switches
//! - The output contract consumed by renderers

pub mod energization;
pub mod feed;
pub mod propagate;
pub mod switches;

// Re-exports for public API
pub use energization::{EnergizationReport, Energization, EnergyState, SegmentEnergy, SegmentReport};
pub use feed::Feed;
pub use propagate::propagate;
pub use switches::{SwitchEntry, SwitchTable};
