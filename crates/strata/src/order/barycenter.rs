//! Barycenter sweeps and tie-break reversal.

use super::Best;
use crate::layers::LayerGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Top to bottom, keyed on predecessors in the layer above.
    Down,
    /// Bottom to top, keyed on successors in the layer below.
    Up,
}

impl Sweep {
    fn flip(self) -> Self {
        match self {
            Sweep::Down => Sweep::Up,
            Sweep::Up => Sweep::Down,
        }
    }
}

/// Mean order of `v`'s neighbours on the side `sweep` looks at, `None` without neighbours.
pub fn barycenter(lg: &LayerGraph, v: usize, sweep: Sweep) -> Option<f64> {
    let neighbors = match sweep {
        Sweep::Down => lg.preds(v),
        Sweep::Up => lg.succs(v),
    };
    if neighbors.is_empty() {
        return None;
    }
    let sum: usize = neighbors.iter().map(|&u| lg.order(u)).sum();
    Some(sum as f64 / neighbors.len() as f64)
}

fn layers_in(lg: &LayerGraph, sweep: Sweep) -> Vec<usize> {
    let n = lg.layer_count();
    match sweep {
        Sweep::Down => (1..n).collect(),
        Sweep::Up => (0..n.saturating_sub(1)).rev().collect(),
    }
}

/// Stable sort of layer `l` by barycenter. Vertices without neighbours keep their index as key.
pub fn sort_layer(lg: &mut LayerGraph, l: usize, sweep: Sweep) -> bool {
    let mut keyed: Vec<(f64, usize)> = lg
        .layer(l)
        .iter()
        .map(|&v| (barycenter(lg, v, sweep).unwrap_or(lg.order(v) as f64), v))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let sorted: Vec<usize> = keyed.into_iter().map(|(_, v)| v).collect();
    if sorted.as_slice() == lg.layer(l) {
        return false;
    }
    lg.reorder(l, sorted);
    true
}

pub fn sweep(lg: &mut LayerGraph, sweep: Sweep) -> bool {
    let mut changed = false;
    for l in layers_in(lg, sweep) {
        changed |= sort_layer(lg, l, sweep);
    }
    changed
}

/// `iterations` rounds of a down sweep followed by an up sweep.
pub fn barycenter_phase(lg: &mut LayerGraph, iterations: usize, best: &mut Best) {
    for i in 0..iterations {
        let down = sweep(lg, Sweep::Down);
        best.offer(lg);
        let up = sweep(lg, Sweep::Up);
        best.offer(lg);
        tracing::trace!(iteration = i, down, up, "barycenter sweep");
        if !down && !up {
            break;
        }
    }
}

/// Reverses every run of consecutive vertices in layer `l` that share a barycenter.
pub fn reverse_ties(lg: &mut LayerGraph, l: usize, sweep: Sweep) -> bool {
    let keys: Vec<Option<f64>> = lg
        .layer(l)
        .iter()
        .map(|&v| barycenter(lg, v, sweep))
        .collect();
    let mut vs: Vec<usize> = lg.layer(l).to_vec();

    let mut changed = false;
    let mut start = 0;
    while start < vs.len() {
        let mut end = start + 1;
        if keys[start].is_some() {
            while end < vs.len() && keys[end] == keys[start] {
                end += 1;
            }
        }
        if end - start > 1 {
            vs[start..end].reverse();
            changed = true;
        }
        start = end;
    }

    if changed {
        lg.reorder(l, vs);
    }
    changed
}

/// Whether layer `l` is still ascending by its barycenter towards the side `sweep` looks at.
pub fn is_sorted(lg: &LayerGraph, l: usize, sweep: Sweep) -> bool {
    let keys: Vec<f64> = lg
        .layer(l)
        .iter()
        .filter_map(|&v| barycenter(lg, v, sweep))
        .collect();
    keys.windows(2).all(|w| w[0] <= w[1])
}

/// Alternates down/up passes of [`reverse_ties`]. When a reversal leaves the next layer of the
/// pass unsorted, the barycenter phase runs again before the next pass.
pub fn tie_break_phase(
    lg: &mut LayerGraph,
    iterations: usize,
    barycenter_iterations: usize,
    best: &mut Best,
) {
    let mut direction = Sweep::Down;
    for i in 0..iterations {
        let mut disturbed = false;
        let mut reversed = 0usize;
        let n = lg.layer_count();
        for l in layers_in(lg, direction) {
            if !reverse_ties(lg, l, direction) {
                continue;
            }
            reversed += 1;
            let next = match direction {
                Sweep::Down => (l + 1 < n).then_some(l + 1),
                Sweep::Up => l.checked_sub(1),
            };
            if let Some(next) = next {
                if !is_sorted(lg, next, direction) {
                    disturbed = true;
                }
            }
        }
        best.offer(lg);
        tracing::trace!(iteration = i, reversed, disturbed, "tie-break pass");

        if disturbed {
            barycenter_phase(lg, barycenter_iterations, best);
        }
        direction = direction.flip();
    }
}
