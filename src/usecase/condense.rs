use crate::domain::graph::{CondensationGraph, Graph, GraphError};

/// Collapses every component to one node and keeps one edge per ordered pair
/// of distinct components.
///
/// Duplicate targets are filtered with a stamp array: `stamp[c] == source + 1`
/// means `source -> c` was already recorded, so nothing is cleared between
/// components.
pub fn build_condensation(
    graph: &Graph,
    membership: &[usize],
    component_count: usize,
) -> Result<CondensationGraph, GraphError> {
    let n = graph.node_count();
    if membership.len() != n {
        return Err(GraphError::MembershipLength {
            expected: n,
            actual: membership.len(),
        });
    }

    let members = group_by_component(membership, component_count)?;

    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); component_count];
    let mut stamp = vec![0usize; component_count];

    for (source, vertices) in members.iter().enumerate() {
        let mark = source + 1;
        for &v in vertices {
            for &e in graph.neighbors(v) {
                let target = membership[e];
                if target != source && stamp[target] != mark {
                    stamp[target] = mark;
                    successors[source].push(target);
                }
            }
        }
    }

    Ok(CondensationGraph::from_successors(successors))
}

fn group_by_component(
    membership: &[usize],
    component_count: usize,
) -> Result<Vec<Vec<usize>>, GraphError> {
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); component_count];
    for (vertex, &component) in membership.iter().enumerate() {
        let bucket = members
            .get_mut(component)
            .ok_or(GraphError::ComponentOutOfRange {
                vertex,
                component,
                component_count,
            })?;
        bucket.push(vertex);
    }
    Ok(members)
}
