//! Normalize long edges by inserting dummy vertices.
//!
//! After [`run`] every edge connects two adjacent layers. Each replaced edge is recorded as a
//! [`DummyChain`] so the output can hand renderers a multi-segment path.

use crate::graphlib::NodeIx;
use crate::model::{LayoutGraph, Vertex, VertexKind};

/// A long edge `source -> target` and the dummies that now carry it, in layer order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DummyChain {
    pub source: NodeIx,
    pub target: NodeIx,
    pub dummies: Vec<NodeIx>,
}

pub const DUMMY_PREFIX: &str = "_d";

pub fn run(g: &mut LayoutGraph) -> Vec<DummyChain> {
    let mut chains: Vec<DummyChain> = Vec::new();
    let edges: Vec<_> = g.edges().collect();

    for (e, v, w) in edges {
        let v_layer = g.node(v).layer;
        let w_layer = g.node(w).layer;
        assert!(
            w_layer > v_layer,
            "edge {} -> {} does not point to a later layer ({v_layer} -> {w_layer})",
            g.node_id(v),
            g.node_id(w),
        );
        if w_layer == v_layer + 1 {
            continue;
        }

        let _ = g.remove_edge(e);

        let span = (w_layer - v_layer) as f64;
        let v_hint = g.node(v).row_hint;
        let w_hint = g.node(w).row_hint;
        let chain = chains.len();

        let mut prev = v;
        let mut dummies: Vec<NodeIx> = Vec::with_capacity(w_layer - v_layer - 1);
        for layer in v_layer + 1..w_layer {
            let t = (layer - v_layer) as f64 / span;
            let dummy = g.add_unique_node(
                DUMMY_PREFIX,
                Vertex {
                    kind: VertexKind::Dummy { chain },
                    layer,
                    row_hint: v_hint + (w_hint - v_hint) * t,
                    priority: None,
                },
            );
            g.set_edge(prev, dummy, ());
            dummies.push(dummy);
            prev = dummy;
        }
        g.set_edge(prev, w, ());

        chains.push(DummyChain {
            source: v,
            target: w,
            dummies,
        });
    }

    tracing::debug!(
        chains = chains.len(),
        dummies = chains.iter().map(|c| c.dummies.len()).sum::<usize>(),
        "normalized long edges"
    );
    chains
}

/// Panics if an edge spans more than one layer or a dummy is not a simple pass-through.
pub fn check(g: &LayoutGraph) {
    for (_, v, w) in g.edges() {
        assert_eq!(
            g.node(w).layer,
            g.node(v).layer + 1,
            "edge {} -> {} is not unit-span after normalization",
            g.node_id(v),
            g.node_id(w),
        );
    }
    for (v, vertex) in g.nodes() {
        if vertex.is_dummy() {
            assert!(
                g.in_degree(v) == 1 && g.out_degree(v) == 1,
                "dummy {} must have exactly one incoming and one outgoing edge",
                g.node_id(v),
            );
        }
    }
}
