//! Annotator configuration
//!
//! Every field has a default, so the JS host can pass a partial object
//! (or nothing at all).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotatorConfig {
    /// Text shown on the hint layer while hovering the image
    pub hint_message: String,

    /// Vertical gap between a selection's bottom edge and the editor
    pub editor_gap: f64,

    /// Vertical gap between a highlight's bottom edge and its popup
    pub popup_gap: f64,

    pub view_opacity_hover: f64,
    pub view_opacity_idle: f64,
    pub hint_opacity_hover: f64,
    pub hint_opacity_idle: f64,

    /// Selections smaller than this on either axis are discarded on release.
    /// The default of 0 accepts degenerate selections.
    pub min_selection_size: f64,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            hint_message: "Click and Drag to Annotate".to_string(),
            editor_gap: 4.0,
            popup_gap: 4.0,
            view_opacity_hover: 1.0,
            view_opacity_idle: 0.4,
            hint_opacity_hover: 0.8,
            hint_opacity_idle: 0.0,
            min_selection_size: 0.0,
        }
    }
}
