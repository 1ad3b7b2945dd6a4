//! Mustache templates for the overlay markup
//!
//! Each surface (and the popup/editor it hosts) is described by a template
//! plus a small context struct. The host inserts the rendered markup as-is;
//! positions and sizes are already resolved here.

use serde::Serialize;

use crate::error::AnnotatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTemplate {
    Hint,
    Canvas,
    Popup,
    Editor,
}

#[derive(Debug, Clone, Serialize)]
pub struct HintContext {
    pub msg: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CanvasContext {
    /// `view` or `edit`
    pub kind: String,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopupContext {
    pub id: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditorContext {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Get template content by type
pub fn get_template_content(template: SurfaceTemplate) -> &'static str {
    match template {
        SurfaceTemplate::Hint => include_str!("templates/hint.html.mustache"),
        SurfaceTemplate::Canvas => include_str!("templates/canvas.html.mustache"),
        SurfaceTemplate::Popup => include_str!("templates/popup.html.mustache"),
        SurfaceTemplate::Editor => include_str!("templates/editor.html.mustache"),
    }
}

/// Render one template with its context
pub fn render_surface<T: Serialize>(
    template: SurfaceTemplate,
    context: &T,
) -> Result<String, AnnotatorError> {
    let compiled = mustache::compile_str(get_template_content(template))?;
    Ok(compiled.render_to_string(context)?)
}
