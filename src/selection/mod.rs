//! Drag selection on the edit surface
//!
//! The selector turns a press/move/release gesture into a provisional
//! rectangle. It owns no surface and no broker: release hands back the
//! `SELECTION_COMPLETED` event and the annotator fires it.

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::models::{Geometry, Point, Shape};

/// Snapshot of the selector for rendering on the edit surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionInfo {
    pub geometry: Geometry,
    /// True while the pointer is still held down
    pub tracking: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DragSelector {
    anchor: Option<Point>,
    current: Point,
    /// Rectangle kept on the edit surface after release, until stopped
    completed: Option<Geometry>,
}

impl DragSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin tracking at an edit-surface-local point.
    ///
    /// Restarting while already tracking discards the previous anchor.
    pub fn start_selection(&mut self, x: f64, y: f64) {
        let anchor = Point::new(x, y);
        if self.anchor.is_some() {
            log::debug!("selection restarted at ({}, {})", x, y);
        }
        self.anchor = Some(anchor);
        self.current = anchor;
        self.completed = None;
    }

    /// Observe pointer movement; returns the provisional rectangle while tracking
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<Geometry> {
        let anchor = self.anchor?;
        self.current = Point::new(x, y);
        Some(Geometry::from_corners(anchor, self.current))
    }

    /// Finish the gesture. Returns the completion event, or `None` when
    /// nothing was being tracked. Degenerate rectangles are not rejected here.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<Event> {
        let anchor = self.anchor.take()?;
        self.current = Point::new(x, y);
        let geometry = Geometry::from_corners(anchor, self.current);
        self.completed = Some(geometry);

        Some(Event::SelectionCompleted {
            shape: Shape::rect(geometry),
        })
    }

    /// End tracking without emitting completion and clear the drawn rectangle
    pub fn stop_selection(&mut self) {
        self.anchor = None;
        self.completed = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }

    /// The in-progress or just-completed rectangle, if any
    pub fn selection(&self) -> Option<SelectionInfo> {
        match self.anchor {
            Some(anchor) => Some(SelectionInfo {
                geometry: Geometry::from_corners(anchor, self.current),
                tracking: true,
            }),
            None => self.completed.map(|geometry| SelectionInfo {
                geometry,
                tracking: false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_geometry(event: Option<Event>) -> Geometry {
        match event {
            Some(Event::SelectionCompleted { shape }) => shape.geometry,
            other => panic!("expected SELECTION_COMPLETED, got {:?}", other),
        }
    }

    #[test]
    fn test_drag_down_right() {
        let mut selector = DragSelector::new();
        selector.start_selection(10.0, 10.0);
        assert_eq!(
            selector.pointer_move(30.0, 20.0),
            Some(Geometry::new(10.0, 10.0, 20.0, 10.0))
        );

        let geometry = completed_geometry(selector.pointer_up(60.0, 40.0));
        assert_eq!(geometry, Geometry::new(10.0, 10.0, 50.0, 30.0));
        assert!(!selector.is_tracking());
    }

    #[test]
    fn test_drag_up_left_normalizes_origin() {
        let mut selector = DragSelector::new();
        selector.start_selection(60.0, 40.0);
        selector.pointer_move(35.0, 25.0);

        let geometry = completed_geometry(selector.pointer_up(10.0, 10.0));
        assert_eq!(geometry, Geometry::new(10.0, 10.0, 50.0, 30.0));
    }

    #[test]
    fn test_restart_discards_prior_anchor() {
        let mut selector = DragSelector::new();
        selector.start_selection(0.0, 0.0);
        selector.pointer_move(100.0, 100.0);

        selector.start_selection(50.0, 50.0);
        let geometry = completed_geometry(selector.pointer_up(70.0, 60.0));
        assert_eq!(geometry, Geometry::new(50.0, 50.0, 20.0, 10.0));
    }

    #[test]
    fn test_zero_area_selection_is_emitted() {
        let mut selector = DragSelector::new();
        selector.start_selection(5.0, 5.0);

        let geometry = completed_geometry(selector.pointer_up(5.0, 5.0));
        assert!(geometry.is_degenerate());
    }

    #[test]
    fn test_release_without_start_emits_nothing() {
        let mut selector = DragSelector::new();
        assert_eq!(selector.pointer_move(3.0, 3.0), None);
        assert!(selector.pointer_up(3.0, 3.0).is_none());
    }

    #[test]
    fn test_stop_clears_without_completion() {
        let mut selector = DragSelector::new();
        selector.start_selection(1.0, 1.0);
        selector.pointer_move(9.0, 9.0);
        selector.stop_selection();

        assert!(!selector.is_tracking());
        assert!(selector.selection().is_none());
        assert!(selector.pointer_up(9.0, 9.0).is_none());
    }

    #[test]
    fn test_completed_rectangle_stays_until_stopped() {
        let mut selector = DragSelector::new();
        selector.start_selection(1.0, 1.0);
        selector.pointer_up(4.0, 5.0);

        let info = selector.selection().unwrap();
        assert!(!info.tracking);
        assert_eq!(info.geometry, Geometry::new(1.0, 1.0, 3.0, 4.0));

        selector.stop_selection();
        assert!(selector.selection().is_none());
    }
}
