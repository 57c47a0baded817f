use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex count must not be negative: {0}")]
    NegativeVertexCount(i64),
    #[error("edge {from} -> {to} references a vertex outside [0, {vertex_count})")]
    VertexOutOfRange {
        from: i64,
        to: i64,
        vertex_count: usize,
    },
    #[error("vertex count {0} is too large to allocate")]
    TooManyVertices(usize),
    #[error("vertex {vertex} is outside [0, {vertex_count})")]
    UnknownVertex { vertex: i64, vertex_count: usize },
    #[error("membership map covers {actual} vertices, graph has {expected}")]
    MembershipLength { expected: usize, actual: usize },
    #[error("vertex {vertex} is assigned component {component}, only {component_count} exist")]
    ComponentOutOfRange {
        vertex: usize,
        component: usize,
        component_count: usize,
    },
}

/// Directed graph over dense vertex ids `0..n`, stored as adjacency lists.
///
/// The vertex count is fixed at construction; only edges are added afterwards.
/// Parallel edges and self-loops are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    edges: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new(node_count: usize) -> Self {
        Self {
            edges: vec![Vec::new(); node_count],
        }
    }

    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut g = Self::new(node_count);
        for (from, to) in edges {
            g.add_edge(from, to)?;
        }
        Ok(g)
    }

    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<(), GraphError> {
        let n = self.node_count();
        if from >= n || to >= n {
            return Err(GraphError::VertexOutOfRange {
                from: from as i64,
                to: to as i64,
                vertex_count: n,
            });
        }
        self.edges[from].push(to);
        Ok(())
    }

    /// Outgoing targets of `v` in insertion order.
    ///
    /// Panics if `v` is not a vertex of this graph.
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.edges[v]
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|v| v.len()).sum()
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .flat_map(|(u, outs)| outs.iter().map(move |&v| (u, v)))
    }

    /// Same vertices, every edge reversed. One output edge per input edge.
    pub fn transpose(&self) -> Graph {
        let mut rev = Graph::new(self.node_count());
        for (u, v) in self.edges() {
            rev.edges[v].push(u);
        }
        rev
    }
}

/// Builds a graph from untrusted counts and endpoints.
///
/// Nothing is returned unless every edge is valid.
pub fn build_graph(vertex_count: i64, edges: &[(i64, i64)]) -> Result<Graph, GraphError> {
    let n = usize::try_from(vertex_count)
        .map_err(|_| GraphError::NegativeVertexCount(vertex_count))?;
    let in_range = |x: i64| usize::try_from(x).ok().filter(|&x| x < n);

    let mut adjacency: Vec<Vec<usize>> = Vec::new();
    adjacency
        .try_reserve_exact(n)
        .map_err(|_| GraphError::TooManyVertices(n))?;
    adjacency.resize_with(n, Vec::new);

    let mut g = Graph { edges: adjacency };
    for &(from, to) in edges {
        match (in_range(from), in_range(to)) {
            (Some(u), Some(v)) => g.edges[u].push(v),
            _ => {
                return Err(GraphError::VertexOutOfRange {
                    from,
                    to,
                    vertex_count: n,
                })
            }
        }
    }
    Ok(g)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccResult {
    /// Membership map: vertex -> component id.
    pub component_of: Vec<usize>,
    /// Component list, each sorted ascending; together they partition the vertices.
    pub components: Vec<Vec<usize>>,
    /// True when the component contains a cycle (size > 1 or a self-loop).
    pub cyclic_component: Vec<bool>,
}

impl SccResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn cyclic_count(&self) -> usize {
        self.cyclic_component.iter().filter(|&&b| b).count()
    }

    pub fn largest_component(&self) -> usize {
        self.components.iter().map(|c| c.len()).max().unwrap_or(0)
    }
}

/// Metagraph over component ids `0..k`: one edge per ordered pair of distinct
/// components joined by at least one original edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CondensationGraph {
    successors: Vec<Vec<usize>>,
}

impl CondensationGraph {
    pub(crate) fn from_successors(successors: Vec<Vec<usize>>) -> Self {
        Self { successors }
    }

    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(|s| s.len()).sum()
    }

    pub fn successors(&self, component: usize) -> &[usize] {
        &self.successors[component]
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.successors
            .get(from)
            .map_or(false, |outs| outs.contains(&to))
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(c, outs)| outs.iter().map(move |&d| (c, d)))
    }

    /// Components with no incoming condensation edge.
    pub fn sources(&self) -> Vec<usize> {
        let indegree = self.indegrees();
        (0..self.node_count()).filter(|&c| indegree[c] == 0).collect()
    }

    /// Components with no outgoing condensation edge.
    pub fn sinks(&self) -> Vec<usize> {
        (0..self.node_count())
            .filter(|&c| self.successors[c].is_empty())
            .collect()
    }

    /// Kahn's algorithm: acyclic iff every node can be peeled off.
    pub fn is_acyclic(&self) -> bool {
        let mut indegree = self.indegrees();
        let mut ready: Vec<usize> = (0..self.node_count())
            .filter(|&c| indegree[c] == 0)
            .collect();
        let mut peeled = 0;

        while let Some(c) = ready.pop() {
            peeled += 1;
            for &d in &self.successors[c] {
                indegree[d] -= 1;
                if indegree[d] == 0 {
                    ready.push(d);
                }
            }
        }

        peeled == self.node_count()
    }

    pub fn into_successors(self) -> Vec<Vec<usize>> {
        self.successors
    }

    fn indegrees(&self) -> Vec<usize> {
        let mut indegree = vec![0usize; self.node_count()];
        for (_, d) in self.edges() {
            indegree[d] += 1;
        }
        indegree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_rejects_out_of_range_endpoint() {
        let mut g = Graph::new(2);
        g.add_edge(0, 1).expect("valid edge");
        let err = g.add_edge(1, 2).unwrap_err();
        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                from: 1,
                to: 2,
                vertex_count: 2
            }
        );
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn neighbors_preserve_insertion_order_and_parallel_edges() {
        let g = Graph::from_edges(3, [(0, 2), (0, 1), (0, 2)]).expect("graph");
        assert_eq!(g.neighbors(0), &[2, 1, 2]);
        assert!(g.neighbors(1).is_empty());
    }

    #[test]
    fn transpose_flips_every_edge_once() {
        let g = Graph::from_edges(3, [(0, 1), (1, 2), (2, 2), (0, 1)]).expect("graph");
        let t = g.transpose();

        assert_eq!(t.node_count(), 3);
        assert_eq!(t.edge_count(), g.edge_count());
        assert_eq!(t.neighbors(1), &[0, 0]);
        assert_eq!(t.neighbors(2), &[1, 2]);
        assert!(t.neighbors(0).is_empty());
        assert_eq!(t.transpose(), g);
    }

    #[test]
    fn build_graph_rejects_negative_count() {
        assert_eq!(
            build_graph(-1, &[]).unwrap_err(),
            GraphError::NegativeVertexCount(-1)
        );
    }

    #[test]
    fn build_graph_rejects_unallocatable_count() {
        assert_eq!(
            build_graph(i64::MAX, &[(0, 1)]).unwrap_err(),
            GraphError::TooManyVertices(i64::MAX as usize)
        );
    }

    #[test]
    fn build_graph_rejects_negative_and_large_endpoints() {
        let err = build_graph(3, &[(0, 1), (-1, 2)]).unwrap_err();
        assert!(matches!(err, GraphError::VertexOutOfRange { from: -1, .. }));

        let err = build_graph(3, &[(0, 3)]).unwrap_err();
        assert!(err.to_string().contains("0 -> 3"));
    }

    #[test]
    fn build_graph_accepts_empty_graph() {
        let g = build_graph(0, &[]).expect("empty graph");
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn condensation_sources_sinks_and_cycle_check() {
        let dag = CondensationGraph::from_successors(vec![vec![1, 2], vec![2], vec![]]);
        assert_eq!(dag.edge_count(), 3);
        assert_eq!(dag.sources(), vec![0]);
        assert_eq!(dag.sinks(), vec![2]);
        assert!(dag.is_acyclic());
        assert!(dag.has_edge(0, 2));
        assert!(!dag.has_edge(2, 0));
        assert!(!dag.has_edge(9, 0));

        let cyclic = CondensationGraph::from_successors(vec![vec![1], vec![0]]);
        assert!(!cyclic.is_acyclic());
    }
}
