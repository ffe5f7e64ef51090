//! Per-part layer container.
//!
//! A [`LayerGraph`] is a self-contained copy of one component or group: local vertex indices,
//! adjacency restricted to the part, the vertices of every layer in order, and the scratch
//! buffers (order index, row) that ordering and positioning work on. It keeps the full layer
//! count of the parent graph so parts can be stacked without remapping layers.

use crate::graphlib::NodeIx;
use crate::model::LayoutGraph;
use rustc_hash::FxHashMap;

/// Edges touching a dummy count this much more towards edge length.
pub const DUMMY_EDGE_WEIGHT: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct LayerGraph {
    global: Vec<NodeIx>,
    dummy: Vec<bool>,
    layer: Vec<usize>,
    priority: Vec<Option<f64>>,
    preds: Vec<Vec<usize>>,
    succs: Vec<Vec<usize>>,

    layers: Vec<Vec<usize>>,
    order: Vec<usize>,
    row: Vec<f64>,
}

impl LayerGraph {
    #[doc(hidden)]
    pub fn new(layer_count: usize) -> Self {
        Self {
            global: Vec::new(),
            dummy: Vec::new(),
            layer: Vec::new(),
            priority: Vec::new(),
            preds: Vec::new(),
            succs: Vec::new(),
            layers: vec![Vec::new(); layer_count],
            order: Vec::new(),
            row: Vec::new(),
        }
    }

    /// Copies `part` out of `g`. Each layer starts out sorted by row hint, then by arena index.
    pub fn from_part(g: &LayoutGraph, part: &[NodeIx], layer_count: usize) -> Self {
        let mut sorted: Vec<NodeIx> = part.to_vec();
        sorted.sort_by(|&a, &b| {
            let (va, vb) = (g.node(a), g.node(b));
            va.layer
                .cmp(&vb.layer)
                .then(va.row_hint.total_cmp(&vb.row_hint))
                .then(a.cmp(&b))
        });

        let mut lg = Self::new(layer_count);
        let mut local: FxHashMap<NodeIx, usize> = FxHashMap::default();
        for &v in &sorted {
            let vertex = g.node(v);
            let ix = lg.push_vertex(v, vertex.layer, vertex.is_dummy(), vertex.priority);
            local.insert(v, ix);
        }
        for &v in &sorted {
            let u = local[&v];
            for w in g.successors(v) {
                if let Some(&lw) = local.get(&w) {
                    lg.add_edge(u, lw);
                }
            }
        }
        lg
    }

    fn push_vertex(
        &mut self,
        global: NodeIx,
        layer: usize,
        dummy: bool,
        priority: Option<f64>,
    ) -> usize {
        if layer >= self.layers.len() {
            self.layers.resize(layer + 1, Vec::new());
        }
        let v = self.global.len();
        let pos = self.layers[layer].len();
        self.global.push(global);
        self.dummy.push(dummy);
        self.layer.push(layer);
        self.priority.push(priority);
        self.preds.push(Vec::new());
        self.succs.push(Vec::new());
        self.layers[layer].push(v);
        self.order.push(pos);
        self.row.push(pos as f64);
        v
    }

    /// Appends a free-standing vertex at the end of `layer`, for hand-built layer graphs in
    /// tests. Its global index is a placeholder and does not refer to any `LayoutGraph` vertex.
    #[doc(hidden)]
    pub fn add_vertex(&mut self, layer: usize, dummy: bool) -> usize {
        let next = NodeIx(self.global.len());
        self.push_vertex(next, layer, dummy, None)
    }

    pub fn set_priority(&mut self, v: usize, priority: Option<f64>) {
        self.priority[v] = priority;
    }

    /// Adds `u -> v`; `v` must sit on the layer right after `u`.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        debug_assert_eq!(self.layer[v], self.layer[u] + 1, "edges must be unit-span");
        if self.succs[u].contains(&v) {
            return;
        }
        self.succs[u].push(v);
        self.preds[v].push(u);
    }

    pub fn len(&self) -> usize {
        self.global.len()
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, l: usize) -> &[usize] {
        &self.layers[l]
    }

    pub fn layer_of(&self, v: usize) -> usize {
        self.layer[v]
    }

    pub fn order(&self, v: usize) -> usize {
        self.order[v]
    }

    pub fn row(&self, v: usize) -> f64 {
        self.row[v]
    }

    pub(crate) fn set_row(&mut self, v: usize, row: f64) {
        self.row[v] = row;
    }

    pub fn preds(&self, v: usize) -> &[usize] {
        &self.preds[v]
    }

    pub fn succs(&self, v: usize) -> &[usize] {
        &self.succs[v]
    }

    pub fn is_dummy(&self, v: usize) -> bool {
        self.dummy[v]
    }

    pub fn global(&self, v: usize) -> NodeIx {
        self.global[v]
    }

    /// Explicit priority, otherwise the degree inside this part.
    pub fn priority(&self, v: usize) -> f64 {
        self.priority[v].unwrap_or((self.preds[v].len() + self.succs[v].len()) as f64)
    }

    /// Replaces the order of layer `l` with `vs` (a permutation of the current layer).
    pub(crate) fn reorder(&mut self, l: usize, vs: Vec<usize>) {
        debug_assert_eq!(vs.len(), self.layers[l].len());
        for (i, &v) in vs.iter().enumerate() {
            self.order[v] = i;
        }
        self.layers[l] = vs;
    }

    pub(crate) fn swap_adjacent(&mut self, l: usize, i: usize) {
        self.layers[l].swap(i, i + 1);
        let (a, b) = (self.layers[l][i], self.layers[l][i + 1]);
        self.order[a] = i;
        self.order[b] = i + 1;
    }

    pub(crate) fn order_snapshot(&self) -> Vec<Vec<usize>> {
        self.layers.clone()
    }

    pub(crate) fn restore_order(&mut self, layers: &[Vec<usize>]) {
        for (l, vs) in layers.iter().enumerate() {
            self.reorder(l, vs.clone());
        }
    }

    /// Sets every row to `order * spacing`.
    pub fn init_rows(&mut self, spacing: f64) {
        for v in 0..self.len() {
            self.row[v] = self.order[v] as f64 * spacing;
        }
    }

    pub fn crossings(&self) -> usize {
        crate::order::cross_count::count(self)
    }

    /// Sum of squared order distances over all edges, dummy edges weighted up.
    pub fn edge_length(&self) -> f64 {
        (0..self.len()).map(|v| self.out_length(v)).sum()
    }

    fn edge_weight(&self, u: usize, v: usize) -> f64 {
        if self.dummy[u] || self.dummy[v] {
            DUMMY_EDGE_WEIGHT
        } else {
            1.0
        }
    }

    fn out_length(&self, v: usize) -> f64 {
        self.succs[v]
            .iter()
            .map(|&w| {
                let d = self.order[w] as f64 - self.order[v] as f64;
                self.edge_weight(v, w) * d * d
            })
            .sum()
    }

    /// Length of every edge incident to `v`.
    pub(crate) fn vertex_length(&self, v: usize) -> f64 {
        let incoming: f64 = self.preds[v]
            .iter()
            .map(|&u| {
                let d = self.order[v] as f64 - self.order[u] as f64;
                self.edge_weight(u, v) * d * d
            })
            .sum();
        incoming + self.out_length(v)
    }

    /// Panics unless every layer's order indices are exactly `0..n`.
    pub fn check_order(&self) {
        for (l, vs) in self.layers.iter().enumerate() {
            for (i, &v) in vs.iter().enumerate() {
                assert_eq!(self.layer[v], l, "vertex {v} listed on the wrong layer");
                assert_eq!(self.order[v], i, "order index of vertex {v} is stale");
            }
        }
    }

    /// Panics if two neighbours in a layer are closer than `spacing` or out of order.
    pub fn check_spacing(&self, spacing: f64) {
        for (l, vs) in self.layers.iter().enumerate() {
            for w in vs.windows(2) {
                let gap = self.row[w[1]] - self.row[w[0]];
                assert!(
                    gap >= spacing - 1e-9,
                    "rows {} and {} on layer {l} are {gap} apart (minimum {spacing})",
                    self.row[w[0]],
                    self.row[w[1]],
                );
            }
        }
    }
}
