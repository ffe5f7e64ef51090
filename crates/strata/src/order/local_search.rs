//! Bounded local search over adjacent pairs.
//!
//! Swapping two neighbours `a`, `b` of a layer only changes the crossings between `a`'s edges
//! and `b`'s edges and the lengths of those edges, so the pair's local cost is enough to decide
//! whether the swap improves the whole layout.

use super::Cost;
use crate::layers::LayerGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

fn neighbors(lg: &LayerGraph, v: usize, side: Side) -> &[usize] {
    match side {
        Side::Above => lg.preds(v),
        Side::Below => lg.succs(v),
    }
}

/// Crossings between the edges of `a` and the edges of `b` (same layer) on one side. Two edges
/// cross when the row delta of their endpoints disagrees in sign with the row delta of `a` and
/// `b`.
pub fn pair_crossings(lg: &LayerGraph, a: usize, b: usize, side: Side) -> usize {
    let d = lg.order(b) as i64 - lg.order(a) as i64;
    let mut cc = 0usize;
    for &x in neighbors(lg, a, side) {
        for &y in neighbors(lg, b, side) {
            let e = lg.order(y) as i64 - lg.order(x) as i64;
            if d * e < 0 {
                cc += 1;
            }
        }
    }
    cc
}

pub fn local_cost(lg: &LayerGraph, a: usize, b: usize) -> Cost {
    Cost {
        crossings: pair_crossings(lg, a, b, Side::Above) + pair_crossings(lg, a, b, Side::Below),
        length: lg.vertex_length(a) + lg.vertex_length(b),
    }
}

/// Up to `iterations` passes over every adjacent pair of every layer. A swap is kept only if
/// it strictly lowers the pair's (crossings, length). Stops early after a pass without swaps.
/// Returns the number of swaps kept.
pub fn run(lg: &mut LayerGraph, iterations: usize) -> usize {
    let mut swaps = 0usize;
    for i in 0..iterations {
        let mut kept = 0usize;
        for l in 0..lg.layer_count() {
            for pos in 0..lg.layer(l).len().saturating_sub(1) {
                let (a, b) = (lg.layer(l)[pos], lg.layer(l)[pos + 1]);
                let before = local_cost(lg, a, b);
                lg.swap_adjacent(l, pos);
                let after = local_cost(lg, a, b);
                if after.better_than(&before) {
                    kept += 1;
                } else {
                    lg.swap_adjacent(l, pos);
                }
            }
        }
        tracing::trace!(iteration = i, kept, "local search pass");
        swaps += kept;
        if kept == 0 {
            break;
        }
    }
    swaps
}
