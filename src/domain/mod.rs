//! Domain layer: graph types and ports. Pure and synchronous.

pub mod graph;
pub mod traits;
