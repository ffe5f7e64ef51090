//! The published layout snapshot.

use crate::layering::ClassBounds;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlacedKind {
    Real,
    /// `chain` indexes [`Layout::chains`].
    Dummy { chain: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedVertex {
    pub kind: PlacedKind,
    pub layer: usize,
    pub row: f64,
}

impl PlacedVertex {
    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, PlacedKind::Dummy { .. })
    }
}

/// A unit-span edge of the normalized graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
}

/// A long input edge and the dummies routing it, in layer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeChain {
    pub source: String,
    pub target: String,
    pub dummies: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    pub max_layer: usize,
    pub max_row: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    /// Real vertices in input order, then dummies.
    pub vertices: IndexMap<String, PlacedVertex>,
    pub edges: Vec<LayoutEdge>,
    pub chains: Vec<EdgeChain>,
    pub class_bounds: Vec<ClassBounds>,
    pub size: Size,
    pub crossings: usize,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// `(layer, row)` of vertex `id`.
    pub fn position(&self, id: &str) -> Option<(usize, f64)> {
        self.vertices.get(id).map(|v| (v.layer, v.row))
    }

    pub fn vertex(&self, id: &str) -> Option<&PlacedVertex> {
        self.vertices.get(id)
    }

    /// Ids on layer `l`, top to bottom.
    pub fn layer(&self, l: usize) -> Vec<&str> {
        let mut ids: Vec<(&str, f64)> = self
            .vertices
            .iter()
            .filter(|(_, v)| v.layer == l)
            .map(|(id, v)| (id.as_str(), v.row))
            .collect();
        ids.sort_by(|a, b| a.1.total_cmp(&b.1));
        ids.into_iter().map(|(id, _)| id).collect()
    }

    pub fn real_vertices(&self) -> impl Iterator<Item = (&str, &PlacedVertex)> {
        self.vertices
            .iter()
            .filter(|(_, v)| !v.is_dummy())
            .map(|(id, v)| (id.as_str(), v))
    }

    pub fn dummy_count(&self) -> usize {
        self.vertices.values().filter(|v| v.is_dummy()).count()
    }
}
