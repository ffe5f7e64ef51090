//! Priority-driven alignment towards neighbours in an adjacent layer.
//!
//! Vertices are visited by descending priority. Each one moves towards the rounded mean row of
//! its neighbours, pushing lower-priority vertices out of the way and stopping short of the
//! nearest vertex whose priority is at least its own (the blocker).

use super::Direction;
use crate::layers::LayerGraph;

/// Descending priority; ties by layer, then order.
pub fn processing_order(lg: &LayerGraph) -> Vec<usize> {
    let mut vs: Vec<usize> = (0..lg.len()).collect();
    vs.sort_by(|&a, &b| {
        lg.priority(b)
            .total_cmp(&lg.priority(a))
            .then(lg.layer_of(a).cmp(&lg.layer_of(b)))
            .then(lg.order(a).cmp(&lg.order(b)))
    });
    vs
}

/// Rounded mean row of `v`'s neighbours in `direction`.
pub fn target(lg: &LayerGraph, v: usize, direction: Direction) -> Option<f64> {
    let neighbors = match direction {
        Direction::Upper => lg.preds(v),
        Direction::Lower => lg.succs(v),
    };
    if neighbors.is_empty() {
        return None;
    }
    let sum: f64 = neighbors.iter().map(|&u| lg.row(u)).sum();
    Some((sum / neighbors.len() as f64).round())
}

/// One alignment pass. Returns how many vertices moved.
pub fn pass(lg: &mut LayerGraph, direction: Direction, spacing: f64) -> usize {
    let mut moved = 0usize;
    for v in processing_order(lg) {
        let Some(target) = target(lg, v, direction) else {
            continue;
        };
        let current = lg.row(v);
        let did_move = if target > current {
            push_down(lg, v, target, spacing)
        } else if target < current {
            push_up(lg, v, target, spacing)
        } else {
            false
        };
        if did_move {
            moved += 1;
        }
    }
    tracing::trace!(?direction, moved, "alignment pass");
    moved
}

/// Moves `v` towards a larger row. Vertices between `v` and its blocker are pushed along.
pub fn push_down(lg: &mut LayerGraph, v: usize, target: f64, spacing: f64) -> bool {
    let layer: Vec<usize> = lg.layer(lg.layer_of(v)).to_vec();
    let i = lg.order(v);
    let priority = lg.priority(v);

    let blocker = (i + 1..layer.len()).find(|&j| lg.priority(layer[j]) >= priority);
    let limit = match blocker {
        Some(j) => lg.row(layer[j]) - (j - i) as f64 * spacing,
        None => f64::INFINITY,
    };
    let row = target.min(limit);
    if row <= lg.row(v) {
        return false;
    }
    lg.set_row(v, row);

    let mut prev = row;
    for &u in &layer[i + 1..blocker.unwrap_or(layer.len())] {
        let min = prev + spacing;
        if lg.row(u) >= min {
            break;
        }
        lg.set_row(u, min);
        prev = min;
    }
    true
}

/// Moves `v` towards a smaller row. Without a blocker the vertices above can be compressed up
/// to row 0.
pub fn push_up(lg: &mut LayerGraph, v: usize, target: f64, spacing: f64) -> bool {
    let layer: Vec<usize> = lg.layer(lg.layer_of(v)).to_vec();
    let i = lg.order(v);
    let priority = lg.priority(v);

    let blocker = (0..i).rev().find(|&j| lg.priority(layer[j]) >= priority);
    let limit = match blocker {
        Some(j) => lg.row(layer[j]) + (i - j) as f64 * spacing,
        None => i as f64 * spacing,
    };
    let row = target.max(limit);
    if row >= lg.row(v) {
        return false;
    }
    lg.set_row(v, row);

    let start = blocker.map(|j| j + 1).unwrap_or(0);
    let mut next = row;
    for &u in layer[start..i].iter().rev() {
        let max = next - spacing;
        if lg.row(u) <= max {
            break;
        }
        lg.set_row(u, max);
        next = max;
    }
    true
}
