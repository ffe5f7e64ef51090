//! Traversal helpers over [`Graph`].
//!
//! Everything here is deterministic: ties are broken by vertex index and edge insertion order.

use super::{EdgeIx, Graph, NodeIx};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("graph contains a cycle through vertex {}", node.0)]
pub struct CycleError {
    /// A vertex that lies on (or behind) a cycle.
    pub node: NodeIx,
}

/// Kahn topological sort. Sources are seeded in index order and successors are released in edge
/// insertion order.
pub fn topsort<N, E>(g: &Graph<N, E>) -> Result<Vec<NodeIx>, CycleError> {
    let mut indegree: Vec<usize> = g.node_indices().map(|v| g.in_degree(v)).collect();
    let mut queue: VecDeque<NodeIx> = g
        .node_indices()
        .filter(|v| indegree[v.0] == 0)
        .collect();

    let mut out: Vec<NodeIx> = Vec::with_capacity(g.node_count());
    while let Some(v) = queue.pop_front() {
        out.push(v);
        for w in g.successors(v) {
            indegree[w.0] -= 1;
            if indegree[w.0] == 0 {
                queue.push_back(w);
            }
        }
    }

    if out.len() != g.node_count() {
        let stuck = g
            .node_indices()
            .find(|v| indegree[v.0] > 0)
            .unwrap_or(NodeIx(0));
        return Err(CycleError { node: stuck });
    }
    Ok(out)
}

pub fn is_acyclic<N, E>(g: &Graph<N, E>) -> bool {
    topsort(g).is_ok()
}

/// Weakly connected components in order of their lowest vertex index.
pub fn components<N, E>(g: &Graph<N, E>) -> Vec<Vec<NodeIx>> {
    components_where(g, |_, _, _| true)
}

/// Weakly connected components using only the edges accepted by `keep`
/// (`keep(edge, source, target)`). Vertices inside a component are listed in BFS order.
pub fn components_where<N, E, F>(g: &Graph<N, E>, keep: F) -> Vec<Vec<NodeIx>>
where
    F: Fn(EdgeIx, NodeIx, NodeIx) -> bool,
{
    let mut seen = vec![false; g.node_count()];
    let mut out: Vec<Vec<NodeIx>> = Vec::new();

    for start in g.node_indices() {
        if seen[start.0] {
            continue;
        }
        seen[start.0] = true;
        let mut comp: Vec<NodeIx> = Vec::new();
        let mut q: VecDeque<NodeIx> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for &e in g.out_edges(v) {
                let Some((_, w)) = g.endpoints(e) else {
                    continue;
                };
                if !seen[w.0] && keep(e, v, w) {
                    seen[w.0] = true;
                    q.push_back(w);
                }
            }
            for &e in g.in_edges(v) {
                let Some((u, _)) = g.endpoints(e) else {
                    continue;
                };
                if !seen[u.0] && keep(e, u, v) {
                    seen[u.0] = true;
                    q.push_back(u);
                }
            }
        }
        out.push(comp);
    }

    out
}
