//! Binary entrypoint.
//!
//! The library is split into layers:
//! - domain: graph store and result types, pure and synchronous
//! - usecase: condensation + analysis pipeline + progress events
//! - infrastructure: Kosaraju detector, file formats, NDJSON printer
//! - interface: CLI wiring

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    graph_condensation::interface::cli::run().await
}
