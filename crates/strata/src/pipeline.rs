//! End-to-end layout run.

use crate::compact;
use crate::error::Result;
use crate::graphlib::NodeIx;
use crate::layering::{self, ClassBounds};
use crate::layers::LayerGraph;
use crate::model::{self, LayoutGraph, TreeGraph, VertexKind};
use crate::normalize::{self, DummyChain};
use crate::options::LayoutOptions;
use crate::order::{self, OrderOptions};
use crate::output::{EdgeChain, Layout, LayoutEdge, PlacedKind, PlacedVertex, Size};
use crate::position;
use crate::split::{self, Placement, Stacker};
use indexmap::IndexMap;

pub fn run(input: &TreeGraph, options: &LayoutOptions) -> Result<Layout> {
    options.validate()?;
    let mut g = model::build_graph(input)?;
    if g.node_count() == 0 {
        return Ok(Layout::default());
    }

    let class_bounds = layering::run(&mut g, input, options)?;
    let chains = normalize::run(&mut g);
    normalize::check(&g);
    debug_assert!(
        keeps_input_edges(&g, input),
        "normalization lost an input edge"
    );

    let spacing = options.min_spacing;
    let layer_count = g.nodes().map(|(_, v)| v.layer).max().unwrap_or(0) + 1;
    let partition = split::partition(&g, input, &chains, options);

    let order_options = OrderOptions::from(options);
    let mut placement = Placement::new(&g);
    let mut stacker = Stacker::new(layer_count, spacing);
    for part in &partition.parts {
        let mut lg = LayerGraph::from_part(&g, part, layer_count);
        order::minimize(&mut lg, &order_options);
        position::assign(&mut lg, options);

        let offset = stacker.place(&lg);
        for v in 0..lg.len() {
            placement.row[lg.global(v).0] = lg.row(v) + offset;
        }
    }

    let main: Vec<NodeIx> = partition.main_flow().collect();
    if options.compact_rows {
        compact::remove_empty_rows(&mut placement, &main, spacing);
    }
    split::place_singletons(&mut placement, &main, &partition.singletons, options);
    placement.check_spacing(&g, spacing);

    let crossings = placement.crossings(&g);
    let layout = snapshot(&g, &placement, &chains, class_bounds, crossings);
    tracing::debug!(
        vertices = layout.vertices.len(),
        dummies = layout.dummy_count(),
        parts = partition.parts.len(),
        singletons = partition.singletons.len(),
        crossings,
        max_layer = layout.size.max_layer,
        max_row = layout.size.max_row,
        "layout finished"
    );
    Ok(layout)
}

fn keeps_input_edges(g: &LayoutGraph, input: &TreeGraph) -> bool {
    input.edges.iter().all(|e| {
        match (g.node_ix(&e.source), g.node_ix(&e.target)) {
            (Some(v), Some(w)) => model::real_successors(g, v).contains(&w),
            _ => false,
        }
    })
}

fn snapshot(
    g: &LayoutGraph,
    placement: &Placement,
    chains: &[DummyChain],
    class_bounds: Vec<ClassBounds>,
    crossings: usize,
) -> Layout {
    let mut vertices: IndexMap<String, PlacedVertex> = IndexMap::with_capacity(g.node_count());
    let mut size = Size::default();
    for (v, vertex) in g.nodes() {
        let kind = match vertex.kind {
            VertexKind::Real { .. } => PlacedKind::Real,
            VertexKind::Dummy { chain } => PlacedKind::Dummy { chain },
        };
        let (layer, row) = (placement.layer[v.0], placement.row[v.0]);
        size.max_layer = size.max_layer.max(layer);
        size.max_row = size.max_row.max(row);
        vertices.insert(g.node_id(v).to_string(), PlacedVertex { kind, layer, row });
    }

    let edges = g
        .edges()
        .map(|(_, v, w)| LayoutEdge {
            source: g.node_id(v).to_string(),
            target: g.node_id(w).to_string(),
        })
        .collect();

    let chains = chains
        .iter()
        .map(|c| EdgeChain {
            source: g.node_id(c.source).to_string(),
            target: g.node_id(c.target).to_string(),
            dummies: c.dummies.iter().map(|&d| g.node_id(d).to_string()).collect(),
        })
        .collect();

    Layout {
        vertices,
        edges,
        chains,
        class_bounds,
        size,
        crossings,
    }
}
