//! Node ordering / crossing minimization.
//!
//! Three phases run on one [`LayerGraph`]: barycenter sweeps, tie-break reversal, and a bounded
//! local search over adjacent pairs. The best ordering seen so far (initial one included) is
//! tracked throughout, so the result never has more crossings than the order it started from.

pub mod barycenter;
pub mod cross_count;
pub mod local_search;

use crate::layers::LayerGraph;
use crate::options::LayoutOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderOptions {
    pub barycenter_iterations: usize,
    pub tie_break_iterations: usize,
    pub local_search_iterations: usize,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self::from(&LayoutOptions::default())
    }
}

impl From<&LayoutOptions> for OrderOptions {
    fn from(options: &LayoutOptions) -> Self {
        Self {
            barycenter_iterations: options.barycenter_iterations,
            tie_break_iterations: options.tie_break_iterations,
            local_search_iterations: options.local_search_iterations,
        }
    }
}

/// Objective of the ordering phase: crossings first, weighted squared edge length second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cost {
    pub crossings: usize,
    pub length: f64,
}

impl Cost {
    pub fn of(lg: &LayerGraph) -> Self {
        Self {
            crossings: lg.crossings(),
            length: lg.edge_length(),
        }
    }

    pub fn better_than(&self, other: &Cost) -> bool {
        const EPS: f64 = 1e-9;
        self.crossings < other.crossings
            || (self.crossings == other.crossings && self.length < other.length - EPS)
    }
}

/// Lowest-cost ordering seen so far.
#[derive(Debug, Clone)]
pub struct Best {
    cost: Cost,
    layers: Vec<Vec<usize>>,
}

impl Best {
    pub fn new(lg: &LayerGraph) -> Self {
        Self {
            cost: Cost::of(lg),
            layers: lg.order_snapshot(),
        }
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Remembers the current order of `lg` if it beats the best one so far.
    pub fn offer(&mut self, lg: &LayerGraph) -> bool {
        let cost = Cost::of(lg);
        if !cost.better_than(&self.cost) {
            return false;
        }
        self.cost = cost;
        self.layers = lg.order_snapshot();
        true
    }

    pub fn restore(&self, lg: &mut LayerGraph) {
        lg.restore_order(&self.layers);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderStats {
    pub initial: Cost,
    pub result: Cost,
    pub swaps: usize,
}

pub fn minimize(lg: &mut LayerGraph, opts: &OrderOptions) -> OrderStats {
    let mut best = Best::new(lg);
    let initial = best.cost();

    barycenter::barycenter_phase(lg, opts.barycenter_iterations, &mut best);
    barycenter::tie_break_phase(
        lg,
        opts.tie_break_iterations,
        opts.barycenter_iterations,
        &mut best,
    );
    best.restore(lg);

    let swaps = local_search::run(lg, opts.local_search_iterations);
    best.offer(lg);
    best.restore(lg);
    lg.check_order();

    let result = best.cost();
    tracing::debug!(
        vertices = lg.len(),
        initial_crossings = initial.crossings,
        crossings = result.crossings,
        length = result.length,
        swaps,
        "ordered part"
    );
    OrderStats {
        initial,
        result,
        swaps,
    }
}
