//! Edge crossing counts between adjacent layers.
//!
//! Uses the accumulator tree of Barth, Jünger and Mutzel: walk the north layer in order, insert
//! each edge's south position into the tree, and add up how many already-inserted edges end to
//! its right.

use crate::layers::LayerGraph;

/// Total crossings of `lg`, summed over every pair of adjacent layers.
pub fn count(lg: &LayerGraph) -> usize {
    let mut cc = 0usize;
    let mut targets: Vec<Vec<usize>> = Vec::new();
    for l in 1..lg.layer_count() {
        targets.clear();
        for &v in lg.layer(l - 1) {
            let mut pos: Vec<usize> = lg.succs(v).iter().map(|&w| lg.order(w)).collect();
            pos.sort_unstable();
            targets.push(pos);
        }
        cc += bilayer(lg.layer(l).len(), &targets);
    }
    cc
}

/// Crossings between two layers. `targets[i]` lists the south positions reached from the
/// `i`-th north vertex.
pub fn bilayer(south_len: usize, targets: &[Vec<usize>]) -> usize {
    if south_len == 0 {
        return 0;
    }

    let mut first_index: usize = 1;
    while first_index < south_len {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc = 0usize;
    for pos in targets.iter().flat_map(|t| t.iter().copied()) {
        let mut index = pos + first_index;
        tree[index] += 1;
        let mut weight_sum = 0usize;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }
    cc
}
