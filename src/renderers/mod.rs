//! Overlay rendering: mustache templates and the display list handed to the host

pub mod display_list;
pub mod templates;

pub use display_list::{OverlayDisplayList, RenderEditor, RenderPopup, RenderSurface};
pub use templates::{render_surface, SurfaceTemplate};
