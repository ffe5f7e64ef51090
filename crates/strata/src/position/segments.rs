//! Segment straightening.
//!
//! A segment is a maximal chain `v1 -> v2 -> ... -> vk` over consecutive layers where every link
//! is the only out-edge of its source and the only in-edge of its target, and both ends of the
//! link share a row. Long dummy chains end up as segments; shifting them as one keeps them
//! straight while pulling them towards their upstream and downstream neighbours.

use crate::layers::LayerGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub vertices: Vec<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStats {
    /// Segments that reached their full target shift in the last pass run.
    pub aligned: usize,
    /// Non-zero shifts applied over all passes.
    pub shifts: usize,
    pub passes: usize,
}

fn same_row(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// The single aligned successor continuing a segment from `v`.
fn next_link(lg: &LayerGraph, v: usize) -> Option<usize> {
    let [w] = lg.succs(v) else {
        return None;
    };
    (lg.preds(*w).len() == 1 && same_row(lg.row(v), lg.row(*w))).then_some(*w)
}

fn continues_from_predecessor(lg: &LayerGraph, v: usize) -> bool {
    match lg.preds(v) {
        [p] => next_link(lg, *p) == Some(v),
        _ => false,
    }
}

/// Every segment, by the layer and order of its first vertex. Each vertex is in exactly one.
pub fn find(lg: &LayerGraph) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    for l in 0..lg.layer_count() {
        for &v in lg.layer(l) {
            if continues_from_predecessor(lg, v) {
                continue;
            }
            let mut vertices = vec![v];
            let mut cur = v;
            while let Some(w) = next_link(lg, cur) {
                vertices.push(w);
                cur = w;
            }
            out.push(Segment { vertices });
        }
    }
    out
}

/// Rounds to the nearest integer, with exact halves going towards zero.
pub fn round_half_toward_zero(x: f64) -> f64 {
    if (x - x.trunc()).abs() == 0.5 {
        x.trunc()
    } else {
        x.round()
    }
}

fn mean_row(lg: &LayerGraph, vs: &[usize]) -> Option<f64> {
    if vs.is_empty() {
        return None;
    }
    Some(vs.iter().map(|&u| lg.row(u)).sum::<f64>() / vs.len() as f64)
}

/// Unclamped shift for `seg`. When the upstream and downstream deltas point the same way the
/// smaller one wins; otherwise the deltas are averaged.
pub fn target_shift(lg: &LayerGraph, seg: &Segment) -> Option<f64> {
    let first = *seg.vertices.first()?;
    let last = *seg.vertices.last()?;
    let up = mean_row(lg, lg.preds(first)).map(|r| r - lg.row(first));
    let down = mean_row(lg, lg.succs(last)).map(|r| r - lg.row(last));

    let raw = match (up, down) {
        (Some(u), Some(d)) => {
            if u != 0.0 && d != 0.0 && u.signum() == d.signum() {
                if u.abs() < d.abs() { u } else { d }
            } else {
                (u + d) / 2.0
            }
        }
        (Some(u), None) => u,
        (None, Some(d)) => d,
        (None, None) => return None,
    };
    Some(round_half_toward_zero(raw))
}

/// Free room above and below `v` in its own layer. Row 0 is the top wall.
fn slack(lg: &LayerGraph, v: usize, spacing: f64) -> (f64, f64) {
    let layer = lg.layer(lg.layer_of(v));
    let i = lg.order(v);
    let above = match i.checked_sub(1) {
        Some(j) => lg.row(v) - lg.row(layer[j]) - spacing,
        None => lg.row(v),
    };
    let below = match layer.get(i + 1) {
        Some(&w) => lg.row(w) - lg.row(v) - spacing,
        None => f64::INFINITY,
    };
    (above.max(0.0), below.max(0.0))
}

/// Shifts `seg` as far towards its target as the surrounding rows allow. Returns the applied
/// shift and whether the full target was reached.
pub fn shift(lg: &mut LayerGraph, seg: &Segment, spacing: f64) -> (f64, bool) {
    let Some(target) = target_shift(lg, seg) else {
        return (0.0, false);
    };
    if target == 0.0 {
        return (0.0, true);
    }

    let (mut max_up, mut max_down) = (f64::INFINITY, f64::INFINITY);
    for &v in &seg.vertices {
        let (above, below) = slack(lg, v, spacing);
        max_up = max_up.min(above);
        max_down = max_down.min(below);
    }

    let applied = target.clamp(-max_up, max_down);
    if applied != 0.0 {
        for &v in &seg.vertices {
            lg.set_row(v, lg.row(v) + applied);
        }
    }
    (applied, applied == target)
}

/// Up to `passes` rounds over all segments, stopping after a round that shifts nothing.
pub fn align(lg: &mut LayerGraph, spacing: f64, passes: usize) -> SegmentStats {
    let mut stats = SegmentStats::default();
    for pass in 0..passes {
        let mut aligned = 0usize;
        let mut shifts = 0usize;
        for seg in find(lg) {
            let (applied, full) = shift(lg, &seg, spacing);
            if full {
                aligned += 1;
            }
            if applied != 0.0 {
                shifts += 1;
            }
        }
        stats.aligned = aligned;
        stats.shifts += shifts;
        stats.passes = pass + 1;
        tracing::trace!(pass, aligned, shifts, "segment pass");
        if shifts == 0 {
            break;
        }
    }
    stats
}
