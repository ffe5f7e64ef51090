//! Empty-row removal.
//!
//! A row band `[r, r + 1)` is empty when no member vertex of any layer has `floor(row) == r`.
//! Interior empty bands are closed by moving everything below them up, one unit per band, as far
//! as the minimum spacing inside every layer allows.

use crate::graphlib::NodeIx;
use crate::split::Placement;
use std::collections::BTreeSet;

/// Closes empty bands between the rows of `members`. Returns how many bands were removed.
pub fn remove_empty_rows(placement: &mut Placement, members: &[NodeIx], spacing: f64) -> usize {
    let occupied: BTreeSet<i64> = members
        .iter()
        .map(|v| placement.row[v.0].floor() as i64)
        .collect();
    let bands: Vec<i64> = occupied.into_iter().collect();

    let mut removed = 0usize;
    // Bottom-up, so closing a gap never moves the bands still to be visited.
    for pair in bands.windows(2).rev() {
        let (above, below) = (pair[0], pair[1]);
        let empty = below - above - 1;
        if empty <= 0 {
            continue;
        }

        let room = slack_across(placement, members, above, spacing);
        let k = empty.min(room.floor().max(0.0) as i64);
        if k == 0 {
            tracing::trace!(above, below, "gap kept, spacing would break");
            continue;
        }

        for v in members {
            if placement.row[v.0].floor() as i64 >= below {
                placement.row[v.0] -= k as f64;
            }
        }
        removed += k as usize;
    }

    if removed > 0 {
        tracing::debug!(removed, "compacted rows");
    }
    removed
}

/// Smallest `gap - spacing` over the pairs of same-layer vertices straddling band `above`.
fn slack_across(placement: &Placement, members: &[NodeIx], above: i64, spacing: f64) -> f64 {
    let mut room = f64::INFINITY;
    for vs in placement.by_layer(members.iter().copied()) {
        for w in vs.windows(2) {
            let (a, b) = (placement.row[w[0].0], placement.row[w[1].0]);
            if a.floor() as i64 <= above && b.floor() as i64 > above {
                room = room.min(b - a - spacing);
            }
        }
    }
    room
}
