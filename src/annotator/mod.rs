//! Annotation interaction controller for one image
//!
//! The annotator owns the overlay (hint, view and edit surfaces over the
//! image), the selector, the viewer and the single editor slot. Host pointer
//! notifications come in through the `pointer_*` methods; everything else is
//! driven by events fired on the annotator's broker.
//!
//! State machine:
//!
//! ```text
//! IDLE --pointer down--> SELECTING --SELECTION_COMPLETED--> EDITING
//!   ^                        |                                 |
//!   +--ANNOTATION_EDIT_CANCEL+---ANNOTATION_EDIT_SAVE/CANCEL---+
//! ```
//!
//! Every event goes through `transition` before any external handler sees it.
//! Illegal transitions are rejected with `AnnotatorError::IllegalTransition`
//! and leave the state untouched. Hover and delete events are legal in every
//! state.

use crate::editor::Editor;
use crate::error::AnnotatorError;
use crate::events::{dispatch, Event, EventBroker, EventType};
use crate::models::{
    Annotation, AnnotatorConfig, AnnotatorState, Geometry, ImageHandle, Point, Shape, StateKind,
    Surface, SurfaceKind, SurfaceLayout,
};
use crate::renderers::templates::{CanvasContext, EditorContext, HintContext, PopupContext};
use crate::renderers::{
    render_surface, OverlayDisplayList, RenderEditor, RenderPopup, RenderSurface, SurfaceTemplate,
};
use crate::selection::{DragSelector, SelectionInfo};
use crate::viewer::{Popup, Viewer};

pub struct Annotator {
    image: ImageHandle,
    layout: SurfaceLayout,
    config: AnnotatorConfig,
    broker: EventBroker<Annotator>,
    hint: Surface,
    view_surface: Surface,
    edit_surface: Surface,
    selector: DragSelector,
    viewer: Viewer,
    state: AnnotatorState,
    hovered: bool,
}

impl Annotator {
    pub fn new(image: ImageHandle) -> Self {
        Self::with_config(image, AnnotatorConfig::default())
    }

    pub fn with_config(image: ImageHandle, config: AnnotatorConfig) -> Self {
        let layout = SurfaceLayout::from_image(&image);
        let viewer = Viewer::new(layout, Popup::new(), config.popup_gap);

        log::info!(
            "annotator bound to image '{}' ({}x{} at {},{})",
            image.src,
            image.width,
            image.height,
            image.offset_left,
            image.offset_top
        );

        Self {
            hint: Surface::new(SurfaceKind::Hint, true, config.hint_opacity_idle),
            view_surface: Surface::new(SurfaceKind::View, true, config.view_opacity_idle),
            edit_surface: Surface::new(SurfaceKind::Edit, false, 1.0),
            image,
            layout,
            config,
            broker: EventBroker::new(),
            selector: DragSelector::new(),
            viewer,
            state: AnnotatorState::Idle,
            hovered: false,
        }
    }

    // ------------------------------------------------------------------
    // Public contract
    // ------------------------------------------------------------------

    /// The image this annotator is responsible for
    pub fn get_image(&self) -> &ImageHandle {
        &self.image
    }

    /// Register a lifecycle handler. Handlers get the annotator itself as an
    /// explicit argument and run after the built-in transition for the event.
    pub fn add_handler<F>(&mut self, event_type: EventType, handler: F)
    where
        F: FnMut(&mut Annotator, &Event) + 'static,
    {
        self.broker.add_handler(event_type, handler);
    }

    /// Fire an event: apply its transition, then run external handlers in
    /// registration order. A rejected event reaches no handler.
    pub fn fire_event(&mut self, event: Event) -> Result<(), AnnotatorError> {
        let event_type = event.event_type();
        log::debug!("{} in {}", event_type, self.state.kind());

        if let Err(e) = self.transition(&event) {
            log::warn!("rejected {}: {}", event_type, e);
            return Err(e);
        }

        let handlers = self.broker.snapshot(event_type);
        dispatch(&handlers, self, &event);
        Ok(())
    }

    /// Show an annotation programmatically, as if it had been saved
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.viewer.add_annotation(annotation);
    }

    /// Remove an annotation programmatically, as if it had been deleted.
    /// Unknown annotations are ignored.
    pub fn remove_annotation(&mut self, annotation: &Annotation) -> bool {
        self.viewer.remove_annotation(annotation)
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.viewer.annotations()
    }

    /// Annotations under a surface-local point, smallest first
    pub fn annotations_at(&self, x: f64, y: f64) -> Vec<&Annotation> {
        self.viewer.annotations_at(Point::new(x, y))
    }

    pub fn state(&self) -> &AnnotatorState {
        &self.state
    }

    pub fn state_kind(&self) -> StateKind {
        self.state.kind()
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    pub fn layout(&self) -> SurfaceLayout {
        self.layout
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.state.editor()
    }

    pub fn selection(&self) -> Option<SelectionInfo> {
        self.selector.selection()
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn hint(&self) -> &Surface {
        &self.hint
    }

    pub fn view_surface(&self) -> &Surface {
        &self.view_surface
    }

    pub fn edit_surface(&self) -> &Surface {
        &self.edit_surface
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    // ------------------------------------------------------------------
    // Pointer input (surface-local coordinates)
    // ------------------------------------------------------------------

    /// Pointer entered the overlay
    pub fn pointer_enter(&mut self) -> Result<(), AnnotatorError> {
        self.fire_event(Event::MouseOverAnnotatableMedia)
    }

    /// Pointer left the overlay
    pub fn pointer_leave(&mut self) -> Result<(), AnnotatorError> {
        self.fire_event(Event::MouseOutOfAnnotatableMedia)
    }

    /// Button pressed on the view surface: arm the edit surface and start a
    /// selection. Blocked while an editor is open.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<(), AnnotatorError> {
        if let AnnotatorState::Editing(_) = self.state {
            log::warn!("pointer down at ({}, {}) ignored while editing", x, y);
            return Err(AnnotatorError::illegal(StateKind::Editing, "POINTER_DOWN"));
        }

        self.edit_surface.show(true);
        self.viewer.hide_popup();
        self.selector.start_selection(x, y);
        self.state = AnnotatorState::Selecting;
        log::debug!("selecting from ({}, {})", x, y);
        Ok(())
    }

    /// Pointer moved: drag the selection while selecting, otherwise hover
    /// the committed annotations
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        match self.state {
            AnnotatorState::Selecting => {
                self.selector.pointer_move(x, y);
            }
            AnnotatorState::Idle => {
                self.viewer.pointer_at(Point::new(x, y));
            }
            AnnotatorState::Editing(_) => {}
        }
    }

    /// Button released: complete the selection. Selections smaller than
    /// `min_selection_size` are treated as a cancelled drag.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Result<(), AnnotatorError> {
        if !matches!(self.state, AnnotatorState::Selecting) {
            return Ok(());
        }

        let Some(event) = self.selector.pointer_up(x, y) else {
            return Ok(());
        };

        if let Event::SelectionCompleted { shape } = &event {
            if self.is_too_small(&shape.geometry) {
                log::debug!("selection {:?} below minimum size, discarding", shape.geometry);
                return self.fire_event(Event::AnnotationEditCancel);
            }
        }

        self.fire_event(event)
    }

    /// Click on the popup's delete button
    pub fn popup_delete(&mut self) -> Result<(), AnnotatorError> {
        match self.viewer.popup_delete() {
            Some(event) => self.fire_event(event),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Editor operations
    // ------------------------------------------------------------------

    pub fn set_editor_text(&mut self, text: impl Into<String>) -> Result<(), AnnotatorError> {
        let editor = self
            .state
            .editor_mut()
            .ok_or(AnnotatorError::NoActiveEditor)?;
        editor.set_text(text);
        Ok(())
    }

    /// Save the open editor's content as a new annotation
    pub fn save_edit(&mut self) -> Result<(), AnnotatorError> {
        let event = self
            .state
            .editor()
            .map(Editor::save)
            .ok_or(AnnotatorError::NoActiveEditor)?;
        self.fire_event(event)
    }

    pub fn cancel_edit(&mut self) -> Result<(), AnnotatorError> {
        let event = self
            .state
            .editor()
            .map(Editor::cancel)
            .ok_or(AnnotatorError::NoActiveEditor)?;
        self.fire_event(event)
    }

    /// The host abandoned the editor (focus lost, Escape, image removed).
    /// Mapped to cancel; a no-op when nothing is open.
    pub fn dismiss_editor(&mut self) -> Result<(), AnnotatorError> {
        match self.state {
            AnnotatorState::Editing(_) => self.cancel_edit(),
            _ => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Transition function
    // ------------------------------------------------------------------

    fn transition(&mut self, event: &Event) -> Result<(), AnnotatorError> {
        let state = self.state.kind();

        match event {
            Event::MouseOverAnnotatableMedia => self.set_hovered(true),
            Event::MouseOutOfAnnotatableMedia => self.set_hovered(false),

            Event::PopupBtnDelete { annotation } => {
                self.viewer.remove_annotation(annotation);
            }

            Event::SelectionCompleted { shape } => {
                if state == StateKind::Editing {
                    return Err(AnnotatorError::illegal(state, event.event_type().as_str()));
                }
                self.open_editor(shape.clone());
            }

            Event::AnnotationEditCancel => {
                if state == StateKind::Idle {
                    return Err(AnnotatorError::illegal(state, event.event_type().as_str()));
                }
                self.finish_edit();
            }

            Event::AnnotationEditSave { annotation } => {
                if state != StateKind::Editing {
                    return Err(AnnotatorError::illegal(state, event.event_type().as_str()));
                }
                self.finish_edit();
                self.viewer.add_annotation(annotation.clone());
            }
        }

        if state != self.state.kind() {
            log::debug!("{} -> {}", state, self.state.kind());
        }
        Ok(())
    }

    fn open_editor(&mut self, shape: Shape) {
        let anchor = self
            .image
            .to_page(shape.geometry.below(self.config.editor_gap));

        self.edit_surface.show(true);
        self.viewer.hide_popup();
        self.state = AnnotatorState::Editing(Editor::new(shape, anchor));
    }

    /// Shared exit for save and cancel: hide the edit surface, reset the
    /// selector and drop the editor
    fn finish_edit(&mut self) {
        self.edit_surface.show(false);
        self.selector.stop_selection();
        self.state = AnnotatorState::Idle;
    }

    fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        if hovered {
            self.view_surface.set_opacity(self.config.view_opacity_hover);
            self.hint.set_opacity(self.config.hint_opacity_hover);
        } else {
            self.view_surface.set_opacity(self.config.view_opacity_idle);
            self.hint.set_opacity(self.config.hint_opacity_idle);
            self.viewer.hide_popup();
        }
    }

    fn is_too_small(&self, geometry: &Geometry) -> bool {
        let min = self.config.min_selection_size;
        min > 0.0 && (geometry.width < min || geometry.height < min)
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Snapshot of the overlay for the host to paint
    pub fn display_list(&self) -> Result<OverlayDisplayList, AnnotatorError> {
        let hint = RenderSurface {
            surface: self.hint,
            markup: render_surface(
                SurfaceTemplate::Hint,
                &HintContext {
                    msg: self.config.hint_message.clone(),
                    opacity: self.hint.opacity,
                },
            )?,
        };

        let view = self.render_canvas(self.view_surface, "view")?;
        let edit = self.render_canvas(self.edit_surface, "edit")?;

        let popup = match self.viewer.popup().info() {
            Some(info) => {
                let markup = render_surface(
                    SurfaceTemplate::Popup,
                    &PopupContext {
                        id: info.annotation.id.to_string(),
                        text: info.annotation.text.clone(),
                        x: info.x,
                        y: info.y,
                    },
                )?;
                Some(RenderPopup { popup: info, markup })
            }
            None => None,
        };

        let editor = match self.state.editor() {
            Some(editor) => {
                let info = editor.info();
                let markup = render_surface(
                    SurfaceTemplate::Editor,
                    &EditorContext {
                        text: info.text.clone(),
                        x: info.x,
                        y: info.y,
                    },
                )?;
                Some(RenderEditor { editor: info, markup })
            }
            None => None,
        };

        Ok(OverlayDisplayList {
            state: self.state.kind(),
            layout: self.layout,
            hint,
            view,
            edit,
            highlights: self.viewer.highlights(),
            selection: self.selector.selection(),
            popup,
            editor,
        })
    }

    fn render_canvas(&self, surface: Surface, kind: &str) -> Result<RenderSurface, AnnotatorError> {
        let markup = render_surface(
            SurfaceTemplate::Canvas,
            &CanvasContext {
                kind: kind.to_string(),
                width: self.layout.width,
                height: self.layout.height,
                opacity: surface.opacity,
                visible: surface.visible,
            },
        )?;
        Ok(RenderSurface { surface, markup })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotator() -> Annotator {
        Annotator::new(ImageHandle::new("photo.jpg", 400.0, 300.0).with_offset(100.0, 50.0))
    }

    fn drag(annotator: &mut Annotator, from: (f64, f64), to: (f64, f64)) {
        annotator.pointer_down(from.0, from.1).unwrap();
        annotator.pointer_move((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
        annotator.pointer_up(to.0, to.1).unwrap();
    }

    #[test]
    fn test_starts_idle_with_hidden_edit_surface() {
        let annotator = annotator();
        assert_eq!(annotator.state_kind(), StateKind::Idle);
        assert!(!annotator.edit_surface().visible);
        assert!(annotator.editor().is_none());
        assert_eq!(annotator.get_image().src, "photo.jpg");
    }

    #[test]
    fn test_pointer_down_arms_edit_surface() {
        let mut annotator = annotator();
        annotator.pointer_down(10.0, 10.0).unwrap();

        assert_eq!(annotator.state_kind(), StateKind::Selecting);
        assert!(annotator.edit_surface().visible);
        assert!(annotator.selection().unwrap().tracking);
    }

    #[test]
    fn test_editor_anchored_below_selection_in_page_coordinates() {
        let mut annotator = annotator();
        drag(&mut annotator, (10.0, 10.0), (60.0, 40.0));

        let editor = annotator.editor().expect("editor should be open");
        assert_eq!(editor.shape().geometry, Geometry::new(10.0, 10.0, 50.0, 30.0));
        assert_eq!(editor.anchor(), Point::new(10.0 + 100.0, 10.0 + 30.0 + 4.0 + 50.0));
    }

    #[test]
    fn test_second_selection_completed_while_editing_is_rejected() {
        let mut annotator = annotator();
        drag(&mut annotator, (10.0, 10.0), (60.0, 40.0));

        let result = annotator.fire_event(Event::SelectionCompleted {
            shape: Shape::rect(Geometry::new(0.0, 0.0, 5.0, 5.0)),
        });

        assert!(matches!(
            result,
            Err(AnnotatorError::IllegalTransition { state: StateKind::Editing, .. })
        ));
        let editor = annotator.editor().unwrap();
        assert_eq!(editor.shape().geometry, Geometry::new(10.0, 10.0, 50.0, 30.0));
    }

    #[test]
    fn test_pointer_down_blocked_while_editing() {
        let mut annotator = annotator();
        drag(&mut annotator, (10.0, 10.0), (60.0, 40.0));

        assert!(annotator.pointer_down(200.0, 200.0).is_err());
        assert_eq!(annotator.state_kind(), StateKind::Editing);
    }

    #[test]
    fn test_save_without_editor() {
        let mut annotator = annotator();
        assert!(matches!(annotator.save_edit(), Err(AnnotatorError::NoActiveEditor)));
        assert!(matches!(annotator.cancel_edit(), Err(AnnotatorError::NoActiveEditor)));
        assert!(annotator.dismiss_editor().is_ok());
    }

    #[test]
    fn test_injected_save_while_idle_is_rejected() {
        let mut annotator = annotator();
        let annotation = Annotation::new(Shape::rect(Geometry::new(0.0, 0.0, 1.0, 1.0)), "");

        assert!(annotator
            .fire_event(Event::AnnotationEditSave { annotation })
            .is_err());
        assert!(annotator.annotations().is_empty());
    }

    #[test]
    fn test_cancel_while_selecting_aborts_drag() {
        let mut annotator = annotator();
        annotator.pointer_down(10.0, 10.0).unwrap();
        annotator.fire_event(Event::AnnotationEditCancel).unwrap();

        assert_eq!(annotator.state_kind(), StateKind::Idle);
        assert!(!annotator.edit_surface().visible);
        assert!(annotator.selection().is_none());
    }

    #[test]
    fn test_min_selection_size_discards_small_drag() {
        let config = AnnotatorConfig {
            min_selection_size: 5.0,
            ..AnnotatorConfig::default()
        };
        let mut annotator = Annotator::with_config(ImageHandle::new("a.png", 100.0, 100.0), config);
        drag(&mut annotator, (10.0, 10.0), (12.0, 40.0));

        assert_eq!(annotator.state_kind(), StateKind::Idle);
        assert!(!annotator.edit_surface().visible);
    }

    #[test]
    fn test_hover_adjusts_opacity() {
        let mut annotator = annotator();
        assert_eq!(annotator.view_surface().opacity, 0.4);

        annotator.pointer_enter().unwrap();
        assert!(annotator.is_hovered());
        assert_eq!(annotator.view_surface().opacity, 1.0);
        assert_eq!(annotator.hint().opacity, 0.8);

        annotator.pointer_leave().unwrap();
        assert_eq!(annotator.view_surface().opacity, 0.4);
        assert_eq!(annotator.hint().opacity, 0.0);
    }

    #[test]
    fn test_mouse_out_closes_popup() {
        let mut annotator = annotator();
        annotator.add_annotation(Annotation::new(
            Shape::rect(Geometry::new(0.0, 0.0, 20.0, 20.0)),
            "door",
        ));

        annotator.pointer_enter().unwrap();
        annotator.pointer_move(5.0, 5.0);
        assert!(annotator.viewer().popup().is_visible());

        annotator.pointer_leave().unwrap();
        assert!(!annotator.viewer().popup().is_visible());
        assert!(annotator.display_list().unwrap().popup.is_none());
        assert!(annotator.viewer().highlights().iter().all(|h| !h.active));
    }

    #[test]
    fn test_display_list_while_editing() {
        let mut annotator = annotator();
        drag(&mut annotator, (10.0, 10.0), (60.0, 40.0));
        annotator.set_editor_text("a window").unwrap();

        let list = annotator.display_list().unwrap();
        assert_eq!(list.state, StateKind::Editing);
        assert!(list.edit.surface.visible);
        assert!(list.hint.markup.contains("Click and Drag to Annotate"));

        let editor = list.editor.expect("editor should be listed");
        assert_eq!(editor.editor.x, 110.0);
        assert_eq!(editor.editor.y, 94.0);
        assert!(editor.markup.contains("a window"));

        let selection = list.selection.expect("selection stays drawn while editing");
        assert!(!selection.tracking);
    }
}
