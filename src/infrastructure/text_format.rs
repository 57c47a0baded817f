//! Plain-text edge lists and reports.
//!
//! Input: a vertex count `n`, then `n` records `v t1 t2 ... -1`, one per vertex,
//! each listing a vertex followed by its targets and closed by `-1`.
//! Records may come in any vertex order. A vertex may head several records,
//! in which case its targets accumulate; a vertex with no record has no
//! outgoing edges.
//! Output: `SCC i: ...` lines followed by the `Meta-graph:` adjacency.

use crate::domain::graph::{build_graph, Graph, GraphError};
use crate::usecase::analyze::GraphAnalysis;
use anyhow::{anyhow, Context, Result};
use std::fmt::Write as _;
use tokio::fs;

const RECORD_END: i64 = -1;

pub fn parse_edge_list(raw: &str) -> Result<Graph> {
    let mut tokens = raw.split_whitespace().enumerate().map(|(i, tok)| {
        tok.parse::<i64>()
            .with_context(|| format!("token {} is not an integer: {tok:?}", i + 1))
    });
    let mut next = |what: &str| -> Result<i64> {
        tokens
            .next()
            .ok_or_else(|| anyhow!("unexpected end of input, expected {what}"))?
    };

    let n = next("vertex count")?;
    let mut edges: Vec<(i64, i64)> = Vec::new();

    for record in 0..n.max(0) {
        let v = next(&format!("vertex of record {record}"))?;
        if v >= n || v < 0 {
            return Err(GraphError::UnknownVertex {
                vertex: v,
                vertex_count: n as usize,
            }
            .into());
        }
        loop {
            let t = next(&format!("target or -1 in record {record}"))?;
            if t == RECORD_END {
                break;
            }
            edges.push((v, t));
        }
    }

    Ok(build_graph(n, &edges)?)
}

pub async fn read_edge_list_file(path: &str) -> Result<Graph> {
    let raw = fs::read_to_string(path).await?;
    parse_edge_list(&raw)
}

pub fn render_report(analysis: &GraphAnalysis) -> String {
    let mut out = String::new();

    for (cid, comp) in analysis.scc.components.iter().enumerate() {
        let _ = write!(out, "SCC {cid}:");
        for v in comp {
            let _ = write!(out, " {v}");
        }
        out.push('\n');
    }

    out.push_str("Meta-graph:\n");
    for c in 0..analysis.condensation.node_count() {
        let _ = write!(out, "{c}");
        for d in analysis.condensation.successors(c) {
            let _ = write!(out, " {d}");
        }
        out.push('\n');
    }

    out
}
