//! sld-graph: segment graph for single-line diagrams.
//!
//! Provides:
//! - Core graph data structures (Segment, SegmentKind, Graph)
//! - Name-driven graph builder that resolves switch endpoints
//! - Name <-> id indexing over the shared segment keyspace
//!
//! # Example
//!
//! ```
//! use sld_graph::{GraphBuilder, NodeKind};
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_node("w_feed", NodeKind::Busbar, ["s_1"]).unwrap();
//! builder.add_node("w_load", NodeKind::wire(), ["s_1"]).unwrap();
//! builder.add_switch("s_1", "w_feed", "w_load").unwrap();
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.segments().len(), 3);
//! let feed = graph.lookup("w_feed").unwrap();
//! let sw = graph.lookup("s_1").unwrap();
//! assert_eq!(graph.far_end(sw, feed), graph.lookup("w_load"));
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod indexing;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::{BuildDiagnostic, GraphBuilder};
pub use error::GraphError;
pub use graph::{Graph, NodeKind, Segment, SegmentKind};
pub use indexing::NameIndex;
