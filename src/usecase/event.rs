use crate::usecase::stats::AnalyzeStats;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
    },

    GraphLoaded {
        nodes: usize,
        edges: usize,
    },

    SccComputed {
        nodes: usize,
        edges: usize,
        components: usize,
        cyclic_components: usize,
    },

    CondensationBuilt {
        components: usize,
        edges: usize,
        sources: usize,
        sinks: usize,
    },

    Finished {
        stats: AnalyzeStats,
    },
}
