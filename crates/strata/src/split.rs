//! Splitting the graph into independently laid out parts, and merging them back.
//!
//! Parts are weakly connected components, optionally inside origin groups. Each part is laid out
//! on its own, then stacked below the parts placed before it. Vertices without any edge are kept
//! out of the main flow and placed in a compact grid underneath.

use crate::graphlib::{NodeIx, alg};
use crate::layers::LayerGraph;
use crate::model::{LayoutGraph, TreeGraph, VertexKind};
use crate::normalize::DummyChain;
use crate::options::LayoutOptions;
use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Main-flow parts in stacking order.
    pub parts: Vec<Vec<NodeIx>>,
    /// Real vertices without edges, in input order.
    pub singletons: Vec<NodeIx>,
}

impl Partition {
    pub fn main_flow(&self) -> impl Iterator<Item = NodeIx> + '_ {
        self.parts.iter().flatten().copied()
    }
}

fn origin_of<'a>(
    g: &LayoutGraph,
    input: &'a TreeGraph,
    chains: &[DummyChain],
    v: NodeIx,
) -> Option<&'a str> {
    let real = match g.node(v).kind {
        VertexKind::Real { node } => node,
        VertexKind::Dummy { chain } => match g.node(chains[chain].source).kind {
            VertexKind::Real { node } => node,
            VertexKind::Dummy { .. } => return None,
        },
    };
    input.nodes.get(real).and_then(|n| n.origin.as_deref())
}

/// Group index per vertex. Groups below the size threshold share one catch-all group.
fn groups(
    g: &LayoutGraph,
    input: &TreeGraph,
    chains: &[DummyChain],
    options: &LayoutOptions,
) -> Vec<usize> {
    if !options.group_by_origin {
        return vec![0; g.node_count()];
    }

    let origins: Vec<Option<&str>> = g
        .node_indices()
        .map(|v| origin_of(g, input, chains, v))
        .collect();

    let mut sizes: IndexMap<Option<&str>, usize> = IndexMap::new();
    for v in g.node_indices() {
        let counted = usize::from(!g.node(v).is_dummy());
        *sizes.entry(origins[v.0]).or_insert(0) += counted;
    }

    let catch_all = sizes.len();
    let mut merged = 0usize;
    let resolved: Vec<usize> = sizes
        .values()
        .enumerate()
        .map(|(i, &size)| {
            if size < options.origin_group_threshold {
                merged += 1;
                catch_all
            } else {
                i
            }
        })
        .collect();
    tracing::debug!(
        groups = sizes.len(),
        merged,
        threshold = options.origin_group_threshold,
        "grouped by origin"
    );

    origins
        .iter()
        .map(|o| sizes.get_index_of(o).map(|i| resolved[i]).unwrap_or(catch_all))
        .collect()
}

pub fn partition(
    g: &LayoutGraph,
    input: &TreeGraph,
    chains: &[DummyChain],
    options: &LayoutOptions,
) -> Partition {
    let singletons: Vec<NodeIx> = if options.isolate_singletons {
        g.node_indices()
            .filter(|&v| !g.node(v).is_dummy() && g.in_degree(v) == 0 && g.out_degree(v) == 0)
            .collect()
    } else {
        Vec::new()
    };
    let mut isolated = vec![false; g.node_count()];
    for v in &singletons {
        isolated[v.0] = true;
    }

    let group_of = groups(g, input, chains, options);
    let components = alg::components_where(g, |_, v, w| group_of[v.0] == group_of[w.0]);

    // Groups keep the order of their first component; both levels are then sorted by size.
    let mut grouped: IndexMap<usize, Vec<Vec<NodeIx>>> = IndexMap::new();
    for comp in components {
        if comp.iter().all(|v| isolated[v.0]) {
            continue;
        }
        grouped.entry(group_of[comp[0].0]).or_default().push(comp);
    }

    let mut groups: Vec<Vec<Vec<NodeIx>>> = grouped.into_values().collect();
    for comps in &mut groups {
        comps.sort_by_key(|c| c.len());
    }
    groups.sort_by_key(|comps| comps.iter().map(|c| c.len()).sum::<usize>());

    let parts: Vec<Vec<NodeIx>> = groups.into_iter().flatten().collect();
    tracing::debug!(
        parts = parts.len(),
        singletons = singletons.len(),
        "partitioned graph"
    );
    Partition { parts, singletons }
}

/// Final `(layer, row)` of every vertex of the full graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub layer: Vec<usize>,
    pub row: Vec<f64>,
}

impl Placement {
    pub fn new(g: &LayoutGraph) -> Self {
        Self {
            layer: g.nodes().map(|(_, v)| v.layer).collect(),
            row: vec![0.0; g.node_count()],
        }
    }

    /// Members of `vs` grouped by layer and sorted by row.
    pub fn by_layer(&self, vs: impl IntoIterator<Item = NodeIx>) -> Vec<Vec<NodeIx>> {
        let mut layers: Vec<Vec<NodeIx>> = Vec::new();
        for v in vs {
            let l = self.layer[v.0];
            if l >= layers.len() {
                layers.resize(l + 1, Vec::new());
            }
            layers[l].push(v);
        }
        for vs in &mut layers {
            vs.sort_by(|a, b| self.row[a.0].total_cmp(&self.row[b.0]).then(a.cmp(b)));
        }
        layers
    }

    pub fn max_row(&self, vs: impl IntoIterator<Item = NodeIx>) -> Option<f64> {
        vs.into_iter().map(|v| self.row[v.0]).reduce(f64::max)
    }

    /// Crossings of the final layout over all unit-span edges of `g`.
    pub fn crossings(&self, g: &LayoutGraph) -> usize {
        let layers = self.by_layer(g.node_indices());
        let mut pos = vec![0usize; g.node_count()];
        for vs in &layers {
            for (i, v) in vs.iter().enumerate() {
                pos[v.0] = i;
            }
        }

        let mut cc = 0usize;
        for l in 1..layers.len() {
            let targets: Vec<Vec<usize>> = layers[l - 1]
                .iter()
                .map(|&v| {
                    let mut t: Vec<usize> = g
                        .successors(v)
                        .filter(|w| self.layer[w.0] == l)
                        .map(|w| pos[w.0])
                        .collect();
                    t.sort_unstable();
                    t
                })
                .collect();
            cc += crate::order::cross_count::bilayer(layers[l].len(), &targets);
        }
        cc
    }

    /// Panics if two vertices of a layer are closer than `spacing`.
    pub fn check_spacing(&self, g: &LayoutGraph, spacing: f64) {
        for (l, vs) in self.by_layer(g.node_indices()).iter().enumerate() {
            for w in vs.windows(2) {
                let gap = self.row[w[1].0] - self.row[w[0].0];
                assert!(
                    gap >= spacing - 1e-9,
                    "{} and {} on layer {l} are {gap} apart (minimum {spacing})",
                    g.node_id(w[0]),
                    g.node_id(w[1]),
                );
            }
        }
    }
}

/// Stacks parts top to bottom. Each part moves down by the largest amount any of its layers needs
/// to clear what is already placed in that layer.
#[derive(Debug, Clone)]
pub struct Stacker {
    bottom: Vec<f64>,
    spacing: f64,
}

impl Stacker {
    pub fn new(layer_count: usize, spacing: f64) -> Self {
        Self {
            bottom: vec![0.0; layer_count],
            spacing,
        }
    }

    /// Places `lg` and returns the offset to add to its rows.
    pub fn place(&mut self, lg: &LayerGraph) -> f64 {
        let top = (0..lg.len())
            .map(|v| lg.row(v))
            .reduce(f64::min)
            .unwrap_or(0.0);

        if lg.layer_count() > self.bottom.len() {
            self.bottom.resize(lg.layer_count(), 0.0);
        }

        let mut shift = 0.0f64;
        for l in 0..lg.layer_count() {
            if let Some(&first) = lg.layer(l).first() {
                shift = shift.max(self.bottom[l] - (lg.row(first) - top));
            }
        }

        for l in 0..lg.layer_count() {
            if let Some(&last) = lg.layer(l).last() {
                let end = lg.row(last) - top + shift + self.spacing;
                self.bottom[l] = self.bottom[l].max(end);
            }
        }
        shift - top
    }
}

/// Places `singletons` below the main flow.
///
/// With weight classes each singleton keeps its layer and stacks inside it. Otherwise they fill
/// the main flow's layer span row by row (a square-ish grid when there is no main flow).
pub fn place_singletons(
    placement: &mut Placement,
    main: &[NodeIx],
    singletons: &[NodeIx],
    options: &LayoutOptions,
) {
    if singletons.is_empty() {
        return;
    }
    let spacing = options.min_spacing;
    let base = placement
        .max_row(main.iter().copied())
        .map(|r| r + spacing)
        .unwrap_or(0.0);

    if options.separate_weight_classes {
        let mut used: Vec<usize> = Vec::new();
        for &v in singletons {
            let l = placement.layer[v.0];
            if l >= used.len() {
                used.resize(l + 1, 0);
            }
            placement.row[v.0] = base + used[l] as f64 * spacing;
            used[l] += 1;
        }
        return;
    }

    let span = main.iter().map(|v| placement.layer[v.0]).fold(None, |acc, l| {
        Some(match acc {
            Some((lo, hi)) => (l.min(lo), l.max(hi)),
            None => (l, l),
        })
    });
    let (first, columns) = match span {
        Some((lo, hi)) => (lo, hi - lo + 1),
        None => (
            options.first_layer(),
            (singletons.len() as f64).sqrt().ceil().max(1.0) as usize,
        ),
    };

    for (i, &v) in singletons.iter().enumerate() {
        placement.layer[v.0] = first + i % columns;
        placement.row[v.0] = base + (i / columns) as f64 * spacing;
    }
}
