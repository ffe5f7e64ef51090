//! Layer assignment.
//!
//! `layer(v) = max(start, 1 + max(layer(p)))` over the direct predecessors `p`, i.e. the longest
//! path from any root. Roots land on `start`. With weight classes every class is laid out in its
//! own range of layers, one class after the other.

use crate::error::{Error, Result};
use crate::graphlib::{NodeIx, alg};
use crate::model::{LayoutGraph, TreeGraph, VertexKind};
use crate::options::LayoutOptions;
use serde::Serialize;
use std::collections::BTreeSet;

/// Layers occupied by one weight class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassBounds {
    pub class: u32,
    pub first_layer: usize,
    pub last_layer: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

pub fn run(
    g: &mut LayoutGraph,
    input: &TreeGraph,
    options: &LayoutOptions,
) -> Result<Vec<ClassBounds>> {
    let topo = alg::topsort(g).map_err(|e| Error::Cycle {
        id: g.node_id(e.node).to_string(),
    })?;

    let start = options.first_layer();
    let mut layers: Vec<Option<usize>> = vec![None; g.node_count()];

    let bounds = if options.separate_weight_classes {
        let classes = effective_classes(g, input, &topo);
        let distinct: BTreeSet<u32> = classes.iter().copied().collect();

        let mut bounds: Vec<ClassBounds> = Vec::with_capacity(distinct.len());
        let mut next = start;
        for class in distinct {
            let last = assign_filtered(g, next, |v| classes[v.0] == class, &mut layers)?;
            bounds.push(ClassBounds {
                class,
                first_layer: next,
                last_layer: last,
            });
            next = last + 1;
        }
        bounds
    } else {
        assign_filtered(g, start, |_| true, &mut layers)?;
        Vec::new()
    };

    for v in g.node_indices() {
        g.node_mut(v).layer = layers[v.0].unwrap_or(start);
    }

    tracing::debug!(
        vertices = g.node_count(),
        classes = bounds.len(),
        max_layer = layers.iter().flatten().max().copied().unwrap_or(start),
        "assigned layers"
    );
    Ok(bounds)
}

/// A vertex is promoted to the highest class among its ancestors, so edges never point back into
/// an earlier class range.
fn effective_classes(g: &LayoutGraph, input: &TreeGraph, topo: &[NodeIx]) -> Vec<u32> {
    let mut classes: Vec<u32> = g
        .node_indices()
        .map(|v| match g.node(v).kind {
            VertexKind::Real { node } => input
                .nodes
                .get(node)
                .and_then(|n| n.weight_class)
                .unwrap_or(0),
            VertexKind::Dummy { .. } => 0,
        })
        .collect();

    for &v in topo {
        let inherited = g.predecessors(v).map(|p| classes[p.0]).max().unwrap_or(0);
        classes[v.0] = classes[v.0].max(inherited);
    }
    classes
}

/// Assigns every vertex accepted by `include`, visiting predecessors first with an explicit
/// stack. Predecessors outside the filter contribute their layer if they already have one.
/// Returns the highest layer assigned (or `start` when nothing matched).
fn assign_filtered<F>(
    g: &LayoutGraph,
    start: usize,
    include: F,
    layers: &mut [Option<usize>],
) -> Result<usize>
where
    F: Fn(NodeIx) -> bool,
{
    let mut state = vec![Visit::Unvisited; g.node_count()];
    let mut max_layer = start;

    for root in g.node_indices() {
        if !include(root) || state[root.0] == Visit::Done {
            continue;
        }

        let mut stack: Vec<(NodeIx, bool)> = vec![(root, false)];
        while let Some((v, expanded)) = stack.pop() {
            if expanded {
                let layer = g
                    .predecessors(v)
                    .filter_map(|p| layers[p.0])
                    .map(|l| l + 1)
                    .max()
                    .unwrap_or(start)
                    .max(start);
                layers[v.0] = Some(layer);
                max_layer = max_layer.max(layer);
                state[v.0] = Visit::Done;
                continue;
            }

            match state[v.0] {
                Visit::Done => continue,
                Visit::InProgress => {
                    return Err(Error::Cycle {
                        id: g.node_id(v).to_string(),
                    });
                }
                Visit::Unvisited => {}
            }

            state[v.0] = Visit::InProgress;
            stack.push((v, true));
            for p in g.predecessors(v) {
                if !include(p) {
                    continue;
                }
                match state[p.0] {
                    Visit::Unvisited => stack.push((p, false)),
                    Visit::InProgress => {
                        return Err(Error::Cycle {
                            id: g.node_id(p).to_string(),
                        });
                    }
                    Visit::Done => {}
                }
            }
        }
    }

    Ok(max_layer)
}
