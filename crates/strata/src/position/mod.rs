//! Row coordinates.
//!
//! Once the order of every layer is fixed, rows start out as `order * spacing` and are refined by
//! priority-driven alignment passes ([`align`]) followed by segment straightening
//! ([`segments`]). Order within a layer never changes here and neighbours always stay at least
//! `spacing` apart.

pub mod align;
pub mod segments;

use crate::layers::LayerGraph;
use crate::options::{AlignBias, LayoutOptions};

/// Which neighbours a pass aligns with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Predecessors in the layer before.
    Upper,
    /// Successors in the layer after.
    Lower,
}

/// The pass sequence for `bias`; the fourth pass only runs when `trailing` is set.
pub fn passes(bias: AlignBias, trailing: bool) -> Vec<Direction> {
    let (first, second) = match bias {
        AlignBias::Ancestors => (Direction::Upper, Direction::Lower),
        AlignBias::Descendants => (Direction::Lower, Direction::Upper),
    };
    let mut out = vec![first, second, first];
    if trailing {
        out.push(second);
    }
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionStats {
    pub moves: usize,
    pub segments_aligned: usize,
    pub segment_shifts: usize,
}

pub fn assign(lg: &mut LayerGraph, options: &LayoutOptions) -> PositionStats {
    let spacing = options.min_spacing;
    lg.init_rows(spacing);

    let mut stats = PositionStats::default();
    for direction in passes(options.bias, options.final_lower_pass) {
        stats.moves += align::pass(lg, direction, spacing);
    }

    let seg = segments::align(lg, spacing, options.alignment_passes);
    stats.segments_aligned = seg.aligned;
    stats.segment_shifts = seg.shifts;

    lg.check_spacing(spacing);
    tracing::debug!(
        vertices = lg.len(),
        moves = stats.moves,
        segments_aligned = stats.segments_aligned,
        segment_shifts = stats.segment_shifts,
        "positioned part"
    );
    stats
}
