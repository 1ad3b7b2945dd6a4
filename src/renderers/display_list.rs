//! Display list for the overlay
//!
//! Everything the host needs to paint one annotator: the shared layout, the
//! three surfaces with their resolved visibility and opacity, highlight
//! regions, the provisional selection, and the popup/editor if open. The host
//! does no geometry of its own.

use serde::Serialize;

use crate::editor::EditorInfo;
use crate::models::{StateKind, Surface, SurfaceLayout};
use crate::selection::SelectionInfo;
use crate::viewer::{Highlight, PopupInfo};

/// A surface plus its rendered markup
#[derive(Serialize, Clone, Debug)]
pub struct RenderSurface {
    #[serde(flatten)]
    pub surface: Surface,
    pub markup: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct RenderPopup {
    #[serde(flatten)]
    pub popup: PopupInfo,
    pub markup: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct RenderEditor {
    #[serde(flatten)]
    pub editor: EditorInfo,
    pub markup: String,
}

/// Top-level display list for one annotator
#[derive(Serialize, Clone, Debug)]
pub struct OverlayDisplayList {
    pub state: StateKind,
    pub layout: SurfaceLayout,
    pub hint: RenderSurface,
    pub view: RenderSurface,
    pub edit: RenderSurface,

    /// One region per committed annotation, in insertion order
    pub highlights: Vec<Highlight>,

    /// Provisional rectangle on the edit surface
    pub selection: Option<SelectionInfo>,

    pub popup: Option<RenderPopup>,
    pub editor: Option<RenderEditor>,
}
