#![forbid(unsafe_code)]

//! Layered (Sugiyama-style) layout for prerequisite DAGs.
//!
//! Given a directed acyclic graph of prerequisites, [`layout`] assigns every vertex a discrete
//! layer (horizontal position) and a row (vertical position):
//!
//! 1. longest-path layering, optionally one layer range per weight class ([`layering`]);
//! 2. long edges split into chains of dummy vertices ([`normalize`]);
//! 3. the graph split into components or origin groups ([`split`]);
//! 4. per part, barycenter ordering with tie-break reversal and local search ([`order`]);
//! 5. per part, priority-driven row assignment and segment straightening ([`position`]);
//! 6. parts stacked, empty rows removed ([`compact`]), edgeless vertices placed in a grid.
//!
//! The result is an immutable [`Layout`] snapshot. [`LayoutSession`] keeps the current snapshot
//! for concurrent readers and can recompute it on a background thread.

pub use strata_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod compact;
pub mod error;
pub mod layering;
pub mod layers;
pub mod model;
pub mod normalize;
pub mod options;
pub mod order;
pub mod output;
pub mod pipeline;
pub mod position;
pub mod session;
pub mod split;

pub use error::{Error, Result};
pub use layering::ClassBounds;
pub use model::{Edge, Node, TreeGraph};
pub use options::{AlignBias, LayoutOptions};
pub use output::{EdgeChain, Layout, LayoutEdge, PlacedKind, PlacedVertex, Size};
pub use session::{LayoutSession, PendingLayout};

/// Lays out `input`. Options are validated before the graph is touched.
pub fn layout(input: &TreeGraph, options: &LayoutOptions) -> Result<Layout> {
    pipeline::run(input, options)
}
