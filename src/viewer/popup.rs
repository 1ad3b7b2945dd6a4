//! Popup shown next to a hovered annotation
//!
//! A view over at most one annotation. The only intent it produces is the
//! delete button press.

use serde::Serialize;

use crate::events::Event;
use crate::models::{Annotation, Point};

#[derive(Debug, Clone, Default)]
pub struct Popup {
    annotation: Option<Annotation>,
    /// Page coordinates of the popup's top-left corner
    anchor: Point,
}

/// Popup state for the display list
#[derive(Debug, Clone, Serialize)]
pub struct PopupInfo {
    pub annotation: Annotation,
    pub x: f64,
    pub y: f64,
}

impl Popup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show for `annotation`, replacing whatever was shown before
    pub fn show(&mut self, annotation: Annotation, anchor: Point) {
        self.annotation = Some(annotation);
        self.anchor = anchor;
    }

    pub fn hide(&mut self) {
        self.annotation = None;
    }

    pub fn is_visible(&self) -> bool {
        self.annotation.is_some()
    }

    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Delete button pressed: the `POPUP_BTN_DELETE` event for the shown
    /// annotation, or `None` if the popup is hidden
    pub fn delete_clicked(&self) -> Option<Event> {
        self.annotation.clone().map(|annotation| Event::PopupBtnDelete { annotation })
    }

    pub fn info(&self) -> Option<PopupInfo> {
        self.annotation.clone().map(|annotation| PopupInfo {
            annotation,
            x: self.anchor.x,
            y: self.anchor.y,
        })
    }
}
