//! Strongly connected components and condensation graphs.
//!
//! Layers:
//! - domain: graph store, result types, ports
//! - usecase: condensation, analysis pipeline, progress events, validation
//! - infrastructure: Kosaraju detector, file formats, NDJSON events
//! - interface: CLI wiring

pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod usecase;

pub use domain::graph::{build_graph, CondensationGraph, Graph, GraphError, SccResult};
pub use infrastructure::scc_kosaraju::{find_strongly_connected_components, KosarajuSccDetector};
pub use usecase::condense::build_condensation;
