//! Property-based invariants of the layout pipeline over random DAGs.
//!
//! 1. Every edge of the normalized graph spans exactly one layer.
//! 2. Ordering only permutes the vertices of a layer.
//! 3. The ordering result is never worse than the insertion order.
//! 4. Vertices of a layer keep the minimum spacing and never sit above `min_layer`.
//! 5. Identical input gives identical output.

use proptest::prelude::*;
use strata::layering;
use strata::layers::LayerGraph;
use strata::model::build_graph;
use strata::normalize;
use strata::order::{self, OrderOptions};
use strata::{AlignBias, Layout, LayoutOptions, Node, TreeGraph};

// ── Helpers ─────────────────────────────────────────────────────────────

/// Per-node attributes: row hint, priority, weight class, origin.
type NodeAttrs = (Option<u8>, Option<u8>, Option<u32>, Option<u8>);

fn node_attrs_strategy() -> impl Strategy<Value = NodeAttrs> {
    (
        prop::option::of(0u8..12),
        prop::option::of(0u8..6),
        prop::option::of(0u32..3),
        prop::option::of(0u8..3),
    )
}

/// Random DAGs: edges always point from a lower to a higher node index.
fn dag_strategy() -> impl Strategy<Value = TreeGraph> {
    (1usize..24)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(node_attrs_strategy(), n),
                prop::collection::vec((0..n, 0..n), 0..n * 2),
            )
        })
        .prop_map(|(attrs, pairs)| {
            let mut g = TreeGraph::new();
            for (i, (hint, priority, class, origin)) in attrs.into_iter().enumerate() {
                let mut node = Node::new(format!("n{i}"));
                if let Some(hint) = hint {
                    node = node.with_row_hint(f64::from(hint) * 0.5);
                }
                if let Some(priority) = priority {
                    node = node.with_priority(f64::from(priority));
                }
                if let Some(class) = class {
                    node = node.with_weight_class(class);
                }
                if let Some(origin) = origin {
                    node = node.with_origin(format!("o{origin}"));
                }
                g.add_node(node);
            }
            for (a, b) in pairs {
                if a != b {
                    g.add_edge(format!("n{}", a.min(b)), format!("n{}", a.max(b)));
                }
            }
            g
        })
}

fn options_strategy() -> impl Strategy<Value = LayoutOptions> {
    (
        (any::<bool>(), any::<bool>(), any::<bool>()),
        prop_oneof![Just(1.0f64), Just(2.0), Just(0.5), Just(0.75), Just(1.5)],
        (any::<bool>(), any::<bool>(), 0usize..4),
        prop_oneof![Just(AlignBias::Ancestors), Just(AlignBias::Descendants)],
        0i32..3,
    )
        .prop_map(
            |(
                (isolate_singletons, compact_rows, final_lower_pass),
                min_spacing,
                (separate_weight_classes, group_by_origin, origin_group_threshold),
                bias,
                min_layer,
            )| LayoutOptions {
                isolate_singletons,
                compact_rows,
                final_lower_pass,
                min_spacing,
                separate_weight_classes,
                group_by_origin,
                origin_group_threshold,
                bias,
                min_layer,
                ..Default::default()
            },
        )
}

fn layer_rows(layout: &Layout, l: usize) -> Vec<f64> {
    layout
        .layer(l)
        .iter()
        .filter_map(|id| layout.position(id))
        .map(|(_, row)| row)
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Unit-span edges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalized_edges_span_one_layer(input in dag_strategy(), options in options_strategy()) {
        let layout = strata::layout(&input, &options).unwrap();
        for e in &layout.edges {
            let (ls, _) = layout.position(&e.source).unwrap();
            let (lt, _) = layout.position(&e.target).unwrap();
            prop_assert_eq!(lt, ls + 1, "{} -> {}", e.source, e.target);
        }
        for chain in &layout.chains {
            let (ls, _) = layout.position(&chain.source).unwrap();
            let (lt, _) = layout.position(&chain.target).unwrap();
            prop_assert_eq!(chain.dummies.len(), lt - ls - 1);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2 + 3. Ordering is a permutation and never worse than the start
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ordering_permutes_layers_and_never_regresses(input in dag_strategy()) {
        let options = LayoutOptions::default();
        let mut g = build_graph(&input).unwrap();
        layering::run(&mut g, &input, &options).unwrap();
        normalize::run(&mut g);
        let layer_count = g.nodes().map(|(_, v)| v.layer).max().unwrap_or(0) + 1;
        let all: Vec<_> = g.node_indices().collect();

        let mut lg = LayerGraph::from_part(&g, &all, layer_count);
        let sorted = |lg: &LayerGraph| -> Vec<Vec<usize>> {
            (0..lg.layer_count())
                .map(|l| {
                    let mut vs = lg.layer(l).to_vec();
                    vs.sort_unstable();
                    vs
                })
                .collect()
        };
        let before = sorted(&lg);
        let initial = lg.crossings();

        let stats = order::minimize(&mut lg, &OrderOptions::from(&options));
        lg.check_order();
        prop_assert_eq!(sorted(&lg), before);
        prop_assert_eq!(stats.initial.crossings, initial);
        prop_assert!(stats.result.crossings <= initial);
        prop_assert_eq!(lg.crossings(), stats.result.crossings);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Spacing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rows_keep_minimum_spacing(input in dag_strategy(), options in options_strategy()) {
        let layout = strata::layout(&input, &options).unwrap();
        prop_assert_eq!(layout.vertices.len(), input.nodes.len() + layout.dummy_count());
        for l in 0..=layout.size.max_layer {
            let rows = layer_rows(&layout, l);
            for w in rows.windows(2) {
                prop_assert!(
                    w[1] - w[0] >= options.min_spacing - 1e-9,
                    "layer {} rows {:?}", l, rows
                );
            }
        }
        for v in layout.vertices.values() {
            prop_assert!(v.layer >= options.min_layer as usize);
            prop_assert!(v.row >= 0.0);
            prop_assert!(v.row <= layout.size.max_row);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_deterministic(input in dag_strategy(), options in options_strategy()) {
        let first = strata::layout(&input, &options).unwrap();
        let second = strata::layout(&input, &options).unwrap();
        prop_assert_eq!(first, second);
    }
}
