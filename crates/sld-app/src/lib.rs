//! Shared application service layer for the single-line-diagram engine.
//!
//! This crate gives frontends one entry point: load documents, compile them
//! into a network, own the simulation context, and answer queries. Frontends
//! mutate through `Simulation`/`Session` and pull the latest result after
//! each mutation.

pub mod compile;
pub mod documents;
pub mod error;
pub mod query;
pub mod session;
pub mod simulation;

// Re-export key types for convenience
pub use compile::{Network, compile_topology};
pub use documents::{
    load_scenarios, load_switch_states, load_topology, save_switch_states, save_topology,
};
pub use error::{AppError, AppResult};
pub use query::{EnergizationSummary, StationSummary, list_stations, summarize};
pub use session::{LoadRequest, Session};
pub use simulation::Simulation;
