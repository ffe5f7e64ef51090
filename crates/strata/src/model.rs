//! Input graph and arena vertex types.
//!
//! The host hands over a [`TreeGraph`] of real nodes only. The pipeline turns it into a
//! [`LayoutGraph`] (arena-indexed) and owns every dummy vertex it adds to that graph.

use crate::error::{Error, Result};
use crate::graphlib::{Graph, NodeIx};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    pub id: String,
    /// Initial row used to seed the ordering. Defaults to the node's insertion index.
    pub row_hint: Option<f64>,
    /// Ordinal class; with `separate_weight_classes` every class gets its own layer range.
    pub weight_class: Option<u32>,
    /// Origin tag (e.g. the package that contributed the node), used for grouping.
    pub origin: Option<String>,
    /// Overrides the degree-based priority used by coordinate assignment.
    pub priority: Option<f64>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_row_hint(mut self, row: f64) -> Self {
        self.row_hint = Some(row);
        self
    }

    pub fn with_weight_class(mut self, class: u32) -> Self {
        self.weight_class = Some(class);
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl TreeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> &mut Self {
        self.edges.push(Edge {
            source: source.into(),
            target: target.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks ids and endpoints. Cycles longer than a self-loop are reported by layering.
    pub fn validate(&self) -> Result<()> {
        let mut ids: FxHashSet<&str> = FxHashSet::default();
        for n in &self.nodes {
            if !ids.insert(n.id.as_str()) {
                return Err(Error::DuplicateNode { id: n.id.clone() });
            }
        }
        for e in &self.edges {
            if !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()) {
                return Err(Error::MissingEndpoint {
                    from: e.source.clone(),
                    to: e.target.clone(),
                });
            }
            if e.source == e.target {
                return Err(Error::Cycle {
                    id: e.source.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    /// Index into [`TreeGraph::nodes`].
    Real { node: usize },
    /// Index of the long edge this vertex routes (see `normalize::DummyChain`).
    Dummy { chain: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub kind: VertexKind,
    pub layer: usize,
    pub row_hint: f64,
    pub priority: Option<f64>,
}

impl Vertex {
    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, VertexKind::Dummy { .. })
    }
}

pub type LayoutGraph = Graph<Vertex, ()>;

/// Builds the arena graph for `input`. Vertex `i` is `input.nodes[i]`.
pub fn build_graph(input: &TreeGraph) -> Result<LayoutGraph> {
    input.validate()?;

    let mut g: LayoutGraph = Graph::with_capacity(input.nodes.len(), input.edges.len());
    for (i, n) in input.nodes.iter().enumerate() {
        g.set_node(
            n.id.clone(),
            Vertex {
                kind: VertexKind::Real { node: i },
                layer: 0,
                row_hint: n.row_hint.unwrap_or(i as f64),
                priority: n.priority,
            },
        );
    }
    for e in &input.edges {
        let (Some(v), Some(w)) = (g.node_ix(&e.source), g.node_ix(&e.target)) else {
            continue;
        };
        g.set_edge(v, w, ());
    }
    Ok(g)
}

#[derive(Clone, Copy)]
enum Walk {
    Up,
    Down,
}

fn step(g: &LayoutGraph, v: NodeIx, walk: Walk) -> Vec<NodeIx> {
    match walk {
        Walk::Up => g.predecessors(v).collect(),
        Walk::Down => g.successors(v).collect(),
    }
}

fn nearest_real(g: &LayoutGraph, v: NodeIx, walk: Walk) -> Vec<NodeIx> {
    let mut out: Vec<NodeIx> = Vec::new();
    let mut seen: FxHashSet<NodeIx> = FxHashSet::default();
    let mut stack: Vec<NodeIx> = step(g, v, walk);
    stack.reverse();

    while let Some(x) = stack.pop() {
        if !seen.insert(x) {
            continue;
        }
        if g.node(x).is_dummy() {
            let mut next = step(g, x, walk);
            next.reverse();
            stack.extend(next);
        } else {
            out.push(x);
        }
    }
    out
}

/// Real successors of `v`, looking through dummy chains.
pub fn real_successors(g: &LayoutGraph, v: NodeIx) -> Vec<NodeIx> {
    nearest_real(g, v, Walk::Down)
}

/// Real predecessors of `v`, looking through dummy chains.
pub fn real_predecessors(g: &LayoutGraph, v: NodeIx) -> Vec<NodeIx> {
    nearest_real(g, v, Walk::Up)
}
