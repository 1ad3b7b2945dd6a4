//! The three stacked overlay surfaces

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Static "click and drag" hint
    Hint,
    /// Committed annotation highlights
    View,
    /// Active selection and editor host
    Edit,
}

/// Presentation state of one surface. Geometry is shared through
/// `SurfaceLayout` and not stored per surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub visible: bool,
    pub opacity: f64,
}

impl Surface {
    pub fn new(kind: SurfaceKind, visible: bool, opacity: f64) -> Self {
        Self {
            kind,
            visible,
            opacity,
        }
    }

    pub fn show(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}
