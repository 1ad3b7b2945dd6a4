//! Committed annotations and their highlight regions on the view surface
//!
//! The viewer keeps one ordered list of annotations; highlight regions are
//! derived from it, so a region can never outlive its annotation.

pub mod popup;

use serde::Serialize;

use crate::events::Event;
use crate::models::{Annotation, AnnotationId, Geometry, Point, SurfaceLayout};

pub use popup::{Popup, PopupInfo};

/// A rendered highlight region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub id: AnnotationId,
    pub geometry: Geometry,
    /// The popup is currently open for this region
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct Viewer {
    layout: SurfaceLayout,
    annotations: Vec<Annotation>,
    popup: Popup,
    popup_gap: f64,
}

impl Viewer {
    pub fn new(layout: SurfaceLayout, popup: Popup, popup_gap: f64) -> Self {
        Self {
            layout,
            annotations: Vec::new(),
            popup,
            popup_gap,
        }
    }

    /// Register and render an annotation.
    ///
    /// Re-adding an annotation with a known id updates it in place instead of
    /// rendering a second region. An open popup on it follows the update.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        if self.popup.annotation().map(|a| a.id) == Some(annotation.id) {
            let anchor = self.popup_anchor(&annotation);
            self.popup.show(annotation.clone(), anchor);
        }

        match self.annotations.iter_mut().find(|a| a.id == annotation.id) {
            Some(existing) => {
                log::debug!("annotation {} already shown, updating", annotation.id);
                *existing = annotation;
            }
            None => {
                log::debug!("annotation {} added", annotation.id);
                self.annotations.push(annotation);
            }
        }
    }

    /// Remove an annotation and its region. Returns whether anything was
    /// removed; absent annotations are a no-op.
    pub fn remove_annotation(&mut self, annotation: &Annotation) -> bool {
        let before = self.annotations.len();
        self.annotations.retain(|a| a.id != annotation.id);
        let removed = self.annotations.len() != before;

        if removed {
            log::debug!("annotation {} removed", annotation.id);
            if self.popup.annotation().map(|a| a.id) == Some(annotation.id) {
                self.popup.hide();
            }
        }
        removed
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn contains(&self, annotation: &Annotation) -> bool {
        self.annotations.iter().any(|a| a.id == annotation.id)
    }

    /// Annotations whose region contains `point`, smallest area first
    pub fn annotations_at(&self, point: Point) -> Vec<&Annotation> {
        let mut hits: Vec<&Annotation> = self
            .annotations
            .iter()
            .filter(|a| a.shape.contains(point))
            .collect();
        hits.sort_by(|a, b| a.geometry().area().total_cmp(&b.geometry().area()));
        hits
    }

    /// Hover or click at a surface-local point: open the popup on the
    /// smallest region under the pointer, or close it when there is none.
    /// Returns whether the popup is now visible.
    pub fn pointer_at(&mut self, point: Point) -> bool {
        let hit = self.annotations_at(point).first().map(|a| (*a).clone());

        match hit {
            Some(annotation) => {
                if self.popup.annotation().map(|a| a.id) != Some(annotation.id) {
                    let anchor = self.popup_anchor(&annotation);
                    self.popup.show(annotation, anchor);
                }
                true
            }
            None => {
                self.popup.hide();
                false
            }
        }
    }

    /// `popup_gap` below the region, in page coordinates
    fn popup_anchor(&self, annotation: &Annotation) -> Point {
        annotation
            .geometry()
            .below(self.popup_gap)
            .offset(self.layout.origin.x, self.layout.origin.y)
    }

    pub fn hide_popup(&mut self) {
        self.popup.hide();
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    /// The popup's delete button was pressed
    pub fn popup_delete(&self) -> Option<Event> {
        self.popup.delete_clicked()
    }

    pub fn highlights(&self) -> Vec<Highlight> {
        let active = self.popup.annotation().map(|a| a.id);
        self.annotations
            .iter()
            .map(|a| Highlight {
                id: a.id,
                geometry: *a.geometry(),
                active: Some(a.id) == active,
            })
            .collect()
    }
}
