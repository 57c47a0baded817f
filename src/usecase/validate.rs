use crate::domain::graph::Graph;
use crate::usecase::analyze::GraphAnalysis;
use anyhow::{anyhow, ensure, Result};

/// Checks a computed analysis against the graph it came from.
///
/// Verifies that the components partition the vertices, that the membership map
/// agrees with the component list, that every crossing edge is present in the
/// condensation (and nothing else is), and that the condensation is acyclic.
/// Mutual reachability is not rechecked here; that is quadratic.
pub fn validate_analysis(graph: &Graph, analysis: &GraphAnalysis) -> Result<()> {
    let n = graph.node_count();
    let scc = &analysis.scc;
    let k = scc.component_count();

    ensure!(
        scc.component_of.len() == n,
        "membership covers {} vertices, graph has {n}",
        scc.component_of.len()
    );
    ensure!(
        scc.cyclic_component.len() == k,
        "cyclic flags cover {} components, found {k}",
        scc.cyclic_component.len()
    );

    let mut seen = vec![false; n];
    for (cid, comp) in scc.components.iter().enumerate() {
        ensure!(!comp.is_empty(), "component {cid} is empty");
        for &v in comp {
            ensure!(v < n, "component {cid} lists unknown vertex {v}");
            ensure!(!seen[v], "vertex {v} appears in more than one component");
            seen[v] = true;
            ensure!(
                scc.component_of[v] == cid,
                "vertex {v} is listed in component {cid} but mapped to {}",
                scc.component_of[v]
            );
        }
    }
    if let Some(missing) = seen.iter().position(|&s| !s) {
        return Err(anyhow!("vertex {missing} is not in any component"));
    }

    let condensation = &analysis.condensation;
    ensure!(
        condensation.node_count() == k,
        "condensation has {} nodes, expected {k}",
        condensation.node_count()
    );

    let mut expected = vec![Vec::new(); k];
    for (u, v) in graph.edges() {
        let (cu, cv) = (scc.component_of[u], scc.component_of[v]);
        if cu != cv {
            ensure!(
                condensation.has_edge(cu, cv),
                "edge {u} -> {v} crosses {cu} -> {cv} but the condensation lacks it"
            );
            expected[cu].push(cv);
        }
    }

    for (c, mut targets) in expected.into_iter().enumerate() {
        targets.sort_unstable();
        targets.dedup();
        let mut actual = condensation.successors(c).to_vec();
        actual.sort_unstable();
        actual.dedup();
        ensure!(
            actual.len() == condensation.successors(c).len(),
            "component {c} has duplicate condensation edges"
        );
        ensure!(
            !actual.contains(&c),
            "condensation has a self-loop on component {c}"
        );
        ensure!(
            actual == targets,
            "component {c} has condensation successors {actual:?}, expected {targets:?}"
        );
    }

    ensure!(condensation.is_acyclic(), "condensation graph has a cycle");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::{CondensationGraph, SccResult};
    use crate::infrastructure::scc_kosaraju::find_strongly_connected_components;
    use crate::usecase::condense::build_condensation;

    fn analysis_for(g: &Graph) -> GraphAnalysis {
        let scc = find_strongly_connected_components(g);
        let condensation =
            build_condensation(g, &scc.component_of, scc.component_count()).expect("condense");
        GraphAnalysis { scc, condensation }
    }

    #[test]
    fn accepts_computed_analysis() {
        let g = Graph::from_edges(5, [(0, 1), (1, 0), (1, 2), (2, 3), (3, 2), (4, 4)])
            .expect("graph");
        validate_analysis(&g, &analysis_for(&g)).expect("valid");
    }

    #[test]
    fn rejects_overlapping_components() {
        let g = Graph::from_edges(2, [(0, 1)]).expect("graph");
        let mut a = analysis_for(&g);
        let extra = a.scc.components[1][0];
        a.scc.components[0].push(extra);

        let err = validate_analysis(&g, &a).unwrap_err().to_string();
        assert!(err.contains("more than one component") || err.contains("mapped to"));
    }

    #[test]
    fn rejects_missing_condensation_edge() {
        let g = Graph::from_edges(2, [(0, 1)]).expect("graph");
        let mut a = analysis_for(&g);
        a.condensation = CondensationGraph::from_successors(vec![Vec::new(), Vec::new()]);

        let err = validate_analysis(&g, &a).unwrap_err().to_string();
        assert!(err.contains("lacks it"));
    }

    #[test]
    fn rejects_cyclic_condensation() {
        // Two vertices wrongly split into two components.
        let g = Graph::from_edges(2, [(0, 1), (1, 0)]).expect("graph");
        let scc = SccResult {
            component_of: vec![0, 1],
            components: vec![vec![0], vec![1]],
            cyclic_component: vec![false, false],
        };
        let condensation = build_condensation(&g, &scc.component_of, 2).expect("condense");
        let a = GraphAnalysis { scc, condensation };

        let err = validate_analysis(&g, &a).unwrap_err().to_string();
        assert!(err.contains("cycle"));
    }
}
