use crate::domain::graph::{CondensationGraph, Graph, SccResult};
use crate::domain::traits::SccDetector;
use crate::usecase::condense::build_condensation;
use crate::usecase::event::AppEvent;
use crate::usecase::stats::AnalyzeStats;
use anyhow::{Context, Result};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphAnalysis {
    pub scc: SccResult,
    pub condensation: CondensationGraph,
}

/// Runs SCC detection and condensation over an already built graph.
///
/// The computation itself is synchronous; the function is async only so that
/// progress events can be pushed into `sink` as phases complete.
pub async fn analyze_graph(
    graph: &Graph,
    scc: &dyn SccDetector,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<(GraphAnalysis, AnalyzeStats)> {
    let mut stats = AnalyzeStats {
        vertices: graph.node_count(),
        edges: graph.edge_count(),
        ..AnalyzeStats::default()
    };

    emit(
        &sink,
        AppEvent::GraphLoaded {
            nodes: stats.vertices,
            edges: stats.edges,
        },
    )
    .await;

    emit(&sink, AppEvent::PhaseStarted { name: "scc".into() }).await;
    let scc_res = scc.compute_scc(graph);
    stats.components = scc_res.component_count();
    stats.cyclic_components = scc_res.cyclic_count();
    stats.largest_component = scc_res.largest_component();
    emit(
        &sink,
        AppEvent::SccComputed {
            nodes: stats.vertices,
            edges: stats.edges,
            components: stats.components,
            cyclic_components: stats.cyclic_components,
        },
    )
    .await;
    emit(&sink, AppEvent::PhaseFinished { name: "scc".into() }).await;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "condensation".into(),
        },
    )
    .await;
    let condensation = build_condensation(graph, &scc_res.component_of, stats.components)
        .context("building condensation graph")?;
    stats.condensation_edges = condensation.edge_count();
    stats.sources = condensation.sources().len();
    stats.sinks = condensation.sinks().len();
    emit(
        &sink,
        AppEvent::CondensationBuilt {
            components: condensation.node_count(),
            edges: stats.condensation_edges,
            sources: stats.sources,
            sinks: stats.sinks,
        },
    )
    .await;
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "condensation".into(),
        },
    )
    .await;

    emit(
        &sink,
        AppEvent::Finished {
            stats: stats.clone(),
        },
    )
    .await;

    Ok((
        GraphAnalysis {
            scc: scc_res,
            condensation,
        },
        stats,
    ))
}

async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}
