#![forbid(unsafe_code)]

//! Arena graph container used by `strata`.
//!
//! Vertices and edges live in `Vec`s and are addressed by [`NodeIx`] / [`EdgeIx`]. Adjacency is
//! kept as per-vertex edge lists, so `successors` / `predecessors` never scan the edge set and
//! traversals never chase heap pointers. The graph is directed and simple: setting an edge that
//! already exists replaces its label.

pub mod alg;

use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Index of a vertex in a [`Graph`]. Stable for the lifetime of the graph (vertices are never
/// removed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIx(pub usize);

impl NodeIx {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of an edge in a [`Graph`]. Removed edges leave a hole; indices are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeIx(pub usize);

impl EdgeIx {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    v: NodeIx,
    w: NodeIx,
    label: E,
}

#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, NodeIx>,

    edges: Vec<Option<EdgeEntry<E>>>,
    edge_index: HashMap<(NodeIx, NodeIx), EdgeIx>,
    live_edges: usize,

    out: Vec<Vec<EdgeIx>>,
    in_: Vec<Vec<EdgeIx>>,

    /// Next suffix to try per `add_unique_node` prefix.
    unique_next: HashMap<String, usize>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut node_index = HashMap::default();
        node_index.reserve(nodes);
        let mut edge_index = HashMap::default();
        edge_index.reserve(edges);
        Self {
            nodes: Vec::with_capacity(nodes),
            node_index,
            edges: Vec::with_capacity(edges),
            edge_index,
            live_edges: 0,
            out: Vec::with_capacity(nodes),
            in_: Vec::with_capacity(nodes),
            unique_next: HashMap::default(),
        }
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn node_ix(&self, id: &str) -> Option<NodeIx> {
        self.node_index.get(id).copied()
    }

    /// Inserts a vertex, or replaces the label of an existing vertex with the same id.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> NodeIx {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            self.nodes[ix.0].label = label;
            return ix;
        }
        let ix = NodeIx(self.nodes.len());
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.out.push(Vec::new());
        self.in_.push(Vec::new());
        self.node_index.insert(id, ix);
        ix
    }

    /// Inserts a vertex under a fresh id derived from `prefix` (`prefix`, `prefix1`, ...).
    ///
    /// Suffixes are handed out from a per-prefix counter, so repeated calls stay linear; ids
    /// already taken by `set_node` are skipped.
    pub fn add_unique_node(&mut self, prefix: &str, label: N) -> NodeIx {
        let mut i = self.unique_next.get(prefix).copied().unwrap_or(0);
        let id = loop {
            let id = if i == 0 {
                prefix.to_string()
            } else {
                format!("{prefix}{i}")
            };
            i += 1;
            if !self.has_node(&id) {
                break id;
            }
        };
        self.unique_next.insert(prefix.to_string(), i);
        self.set_node(id, label)
    }

    pub fn node(&self, v: NodeIx) -> &N {
        &self.nodes[v.0].label
    }

    pub fn node_mut(&mut self, v: NodeIx) -> &mut N {
        &mut self.nodes[v.0].label
    }

    pub fn node_by_id(&self, id: &str) -> Option<&N> {
        self.node_ix(id).map(|ix| self.node(ix))
    }

    pub fn node_id(&self, v: NodeIx) -> &str {
        self.nodes[v.0].id.as_str()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIx> + use<N, E> {
        (0..self.nodes.len()).map(NodeIx)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIx, &N)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIx(i), &n.label))
    }

    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    /// Inserts the edge `v -> w`, or replaces its label if it already exists.
    pub fn set_edge(&mut self, v: NodeIx, w: NodeIx, label: E) -> EdgeIx {
        if let Some(&e) = self.edge_index.get(&(v, w)) {
            if let Some(entry) = self.edges[e.0].as_mut() {
                entry.label = label;
            }
            return e;
        }
        let e = EdgeIx(self.edges.len());
        self.edges.push(Some(EdgeEntry { v, w, label }));
        self.edge_index.insert((v, w), e);
        self.out[v.0].push(e);
        self.in_[w.0].push(e);
        self.live_edges += 1;
        e
    }

    pub fn has_edge(&self, v: NodeIx, w: NodeIx) -> bool {
        self.edge_index.contains_key(&(v, w))
    }

    pub fn find_edge(&self, v: NodeIx, w: NodeIx) -> Option<EdgeIx> {
        self.edge_index.get(&(v, w)).copied()
    }

    pub fn remove_edge(&mut self, e: EdgeIx) -> Option<E> {
        let entry = self.edges.get_mut(e.0)?.take()?;
        self.edge_index.remove(&(entry.v, entry.w));
        self.out[entry.v.0].retain(|&x| x != e);
        self.in_[entry.w.0].retain(|&x| x != e);
        self.live_edges -= 1;
        Some(entry.label)
    }

    pub fn endpoints(&self, e: EdgeIx) -> Option<(NodeIx, NodeIx)> {
        self.edges
            .get(e.0)
            .and_then(|entry| entry.as_ref())
            .map(|entry| (entry.v, entry.w))
    }

    pub fn edge(&self, e: EdgeIx) -> Option<&E> {
        self.edges
            .get(e.0)
            .and_then(|entry| entry.as_ref())
            .map(|entry| &entry.label)
    }

    /// Live edges in insertion order as `(edge, source, target)`.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIx, NodeIx, NodeIx)> {
        self.edges.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|entry| (EdgeIx(i), entry.v, entry.w))
        })
    }

    pub fn out_edges(&self, v: NodeIx) -> &[EdgeIx] {
        &self.out[v.0]
    }

    pub fn in_edges(&self, v: NodeIx) -> &[EdgeIx] {
        &self.in_[v.0]
    }

    pub fn out_degree(&self, v: NodeIx) -> usize {
        self.out[v.0].len()
    }

    pub fn in_degree(&self, v: NodeIx) -> usize {
        self.in_[v.0].len()
    }

    pub fn successors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> {
        self.out[v.0]
            .iter()
            .filter_map(|e| self.edges[e.0].as_ref().map(|entry| entry.w))
    }

    pub fn predecessors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> {
        self.in_[v.0]
            .iter()
            .filter_map(|e| self.edges[e.0].as_ref().map(|entry| entry.v))
    }

    /// Successors followed by predecessors.
    pub fn neighbors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> {
        self.successors(v).chain(self.predecessors(v))
    }

    pub fn sources(&self) -> Vec<NodeIx> {
        self.node_indices()
            .filter(|&v| self.in_[v.0].is_empty())
            .collect()
    }

    pub fn sinks(&self) -> Vec<NodeIx> {
        self.node_indices()
            .filter(|&v| self.out[v.0].is_empty())
            .collect()
    }
}
