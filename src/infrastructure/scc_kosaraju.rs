use crate::domain::graph::{Graph, SccResult};
use crate::domain::traits::SccDetector;

pub struct KosarajuSccDetector;

impl SccDetector for KosarajuSccDetector {
    fn compute_scc(&self, graph: &Graph) -> SccResult {
        find_strongly_connected_components(graph)
    }
}

pub fn find_strongly_connected_components(graph: &Graph) -> SccResult {
    let order = finish_order(graph);
    extract_components(graph, &order)
}

/// Reverse-postorder of a DFS over the transposed graph, seeded from `0..n`.
///
/// A vertex is finished only after every vertex reachable from it in the
/// transposed graph has been finished; the returned sequence lists the latest
/// finisher first.
pub fn finish_order(graph: &Graph) -> Vec<usize> {
    let n = graph.node_count();
    let rev = graph.transpose();

    let mut postorder: Vec<usize> = Vec::with_capacity(n);
    let mut seen = vec![false; n];

    for start in 0..n {
        if seen[start] {
            continue;
        }
        iterative_finish_order(start, &rev, &mut seen, &mut postorder);
    }

    postorder.reverse();
    postorder
}

/// Seeds a DFS over the original graph from each unvisited vertex of `order`;
/// every seeded traversal collects exactly one component.
///
/// `order` must be a permutation of `0..n`, as produced by [`finish_order`].
///
/// # Panics
///
/// Panics if `order` names a vertex outside the graph or leaves a vertex out.
pub fn extract_components(graph: &Graph, order: &[usize]) -> SccResult {
    let n = graph.node_count();
    let mut component_of = vec![usize::MAX; n];
    let mut components: Vec<Vec<usize>> = Vec::new();

    for &v in order {
        if component_of[v] != usize::MAX {
            continue;
        }

        let cid = components.len();
        let mut stack = vec![v];
        component_of[v] = cid;
        let mut comp = Vec::new();

        while let Some(x) = stack.pop() {
            comp.push(x);
            for &w in graph.neighbors(x) {
                if component_of[w] == usize::MAX {
                    component_of[w] = cid;
                    stack.push(w);
                }
            }
        }

        comp.sort_unstable();
        components.push(comp);
    }

    assert!(
        component_of.iter().all(|&c| c != usize::MAX),
        "order must be a permutation of 0..{n}"
    );

    let cyclic_component = components
        .iter()
        .map(|comp| match comp.as_slice() {
            [only] => graph.neighbors(*only).contains(only),
            _ => true,
        })
        .collect();

    SccResult {
        component_of,
        components,
        cyclic_component,
    }
}

fn iterative_finish_order(
    start: usize,
    graph: &Graph,
    seen: &mut [bool],
    order: &mut Vec<usize>,
) {
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
    seen[start] = true;

    while let Some((v, next_i)) = stack.pop() {
        let outs = graph.neighbors(v);
        if next_i < outs.len() {
            let to = outs[next_i];
            stack.push((v, next_i + 1));
            if !seen[to] {
                seen[to] = true;
                stack.push((to, 0));
            }
            continue;
        }

        // Every neighbor is done.
        order.push(v);
    }
}
