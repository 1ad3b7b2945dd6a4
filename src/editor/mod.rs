//! Inline editor for a provisional shape
//!
//! One editor exists per completed selection. It collects descriptive text
//! and produces exactly one terminal event: the annotator stores the editor
//! inside its `Editing` state and drops it when that event is processed, so
//! an editor cannot save after cancelling or vice versa.

use serde::Serialize;

use crate::events::Event;
use crate::models::{Annotation, Point, Shape};

#[derive(Debug, Clone)]
pub struct Editor {
    shape: Shape,
    /// Page coordinates of the editor's top-left corner
    anchor: Point,
    text: String,
}

/// Editor state for the display list
#[derive(Debug, Clone, Serialize)]
pub struct EditorInfo {
    pub shape: Shape,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl Editor {
    pub fn new(shape: Shape, anchor: Point) -> Self {
        Self {
            shape,
            anchor,
            text: String::new(),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// `ANNOTATION_EDIT_SAVE` carrying a new annotation built from the shape
    pub fn save(&self) -> Event {
        Event::AnnotationEditSave {
            annotation: Annotation::new(self.shape.clone(), self.text.clone()),
        }
    }

    pub fn cancel(&self) -> Event {
        Event::AnnotationEditCancel
    }

    pub fn info(&self) -> EditorInfo {
        EditorInfo {
            shape: self.shape.clone(),
            x: self.anchor.x,
            y: self.anchor.y,
            text: self.text.clone(),
        }
    }
}
