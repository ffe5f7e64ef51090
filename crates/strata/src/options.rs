//! Layout configuration.
//!
//! Every field has a default, so hosts can deserialize a partial JSON object (or nothing at all)
//! and still get a complete set of options.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which neighbours win when the coordinate passes disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignBias {
    /// Start and end with passes towards predecessors.
    #[default]
    Ancestors,
    /// Start and end with passes towards successors.
    Descendants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Layer assigned to roots.
    pub min_layer: i32,
    /// Give every weight class its own range of layers, left to right by class.
    pub separate_weight_classes: bool,
    /// Lay out origin groups independently and stack them.
    pub group_by_origin: bool,
    /// Origin groups with fewer nodes than this are merged into one catch-all group.
    pub origin_group_threshold: usize,
    pub bias: AlignBias,
    pub barycenter_iterations: usize,
    pub tie_break_iterations: usize,
    pub local_search_iterations: usize,
    pub alignment_passes: usize,
    /// Run the trailing pass of the coordinate sequence (see [`AlignBias`]).
    pub final_lower_pass: bool,
    /// Minimum distance between two rows of the same layer.
    pub min_spacing: f64,
    /// Move nodes without any edge into a grid below the main flow.
    pub isolate_singletons: bool,
    /// Remove rows that are empty in every layer.
    pub compact_rows: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_layer: 1,
            separate_weight_classes: false,
            group_by_origin: false,
            origin_group_threshold: 5,
            bias: AlignBias::Ancestors,
            barycenter_iterations: 4,
            tie_break_iterations: 3,
            local_search_iterations: 3,
            alignment_passes: 3,
            final_lower_pass: true,
            min_spacing: 1.0,
            isolate_singletons: true,
            compact_rows: true,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<()> {
        if self.min_layer < 0 {
            return Err(Error::OptionOutOfRange {
                option: "min_layer",
                reason: format!("must not be negative, got {}", self.min_layer),
            });
        }

        let bounds = [
            ("barycenter_iterations", self.barycenter_iterations),
            ("tie_break_iterations", self.tie_break_iterations),
            ("local_search_iterations", self.local_search_iterations),
            ("alignment_passes", self.alignment_passes),
        ];
        for (option, value) in bounds {
            if value == 0 {
                return Err(Error::OptionOutOfRange {
                    option,
                    reason: "must be positive".to_string(),
                });
            }
        }

        if !self.min_spacing.is_finite() || self.min_spacing <= 0.0 {
            return Err(Error::OptionOutOfRange {
                option: "min_spacing",
                reason: format!("must be a positive number, got {}", self.min_spacing),
            });
        }
        Ok(())
    }

    pub(crate) fn first_layer(&self) -> usize {
        self.min_layer.max(0) as usize
    }
}
