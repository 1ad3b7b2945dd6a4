//! Data models for the annotator
//!
//! Geometry, annotations, surfaces, configuration and interaction state.

pub mod annotation;
pub mod config;
pub mod geometry;
pub mod state;
pub mod surface;

// Re-export commonly used types
pub use annotation::{Annotation, AnnotationId, Shape, ShapeType};
pub use config::AnnotatorConfig;
pub use geometry::{Geometry, ImageHandle, Point, SurfaceLayout};
pub use state::{AnnotatorState, StateKind};
pub use surface::{Surface, SurfaceKind};
