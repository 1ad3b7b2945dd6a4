//! JavaScript-facing annotator class
//!
//! One `ImageAnnotator` per image. The host forwards pointer notifications
//! in surface-local coordinates, reads `getDisplayList()` after each call and
//! paints it. Lifecycle handlers registered with `addHandler` receive the
//! serialized event object.
//!
//! Handlers run synchronously inside the call that fired the event, while the
//! annotator is borrowed; a JS handler must not call back into the same
//! `ImageAnnotator` synchronously (defer with `queueMicrotask` instead).

use wasm_bindgen::prelude::*;

use crate::annotator::Annotator;
use crate::api::helpers::{annotator_error, deserialize, deserialize_or_default, serialize};
use crate::events::{Event, EventType};
use crate::models::{Annotation, AnnotatorConfig, ImageHandle};
use crate::{wasm_info, wasm_log, wasm_warn};

#[wasm_bindgen]
pub struct ImageAnnotator {
    inner: Annotator,
}

#[wasm_bindgen]
impl ImageAnnotator {
    /// Create an annotator from an image description
    /// `{ src, width, height, offsetLeft, offsetTop }` and an optional config
    #[wasm_bindgen(constructor)]
    pub fn new(image_js: JsValue, config_js: JsValue) -> Result<ImageAnnotator, JsValue> {
        let image: ImageHandle = deserialize(image_js, "Invalid image")?;
        let config: AnnotatorConfig = deserialize_or_default(config_js, "Invalid config")?;

        wasm_info!("ImageAnnotator created for '{}'", image.src);
        Ok(ImageAnnotator {
            inner: Annotator::with_config(image, config),
        })
    }

    /// Create an annotator for a live `<img>` element
    #[wasm_bindgen(js_name = fromElement)]
    pub fn from_element(
        image: &web_sys::HtmlImageElement,
        config_js: JsValue,
    ) -> Result<ImageAnnotator, JsValue> {
        let config: AnnotatorConfig = deserialize_or_default(config_js, "Invalid config")?;
        let image = ImageHandle::from_element(image);

        wasm_info!("ImageAnnotator created for element '{}'", image.src);
        Ok(ImageAnnotator {
            inner: Annotator::with_config(image, config),
        })
    }

    #[wasm_bindgen(js_name = getImage)]
    pub fn get_image(&self) -> Result<JsValue, JsValue> {
        serialize(self.inner.get_image(), "Failed to serialize image")
    }

    /// Current state name: `IDLE`, `SELECTING` or `EDITING`
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.inner.state_kind().to_string()
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = pointerEnter)]
    pub fn pointer_enter(&mut self) -> Result<(), JsValue> {
        self.inner
            .pointer_enter()
            .map_err(|e| annotator_error("pointerEnter", e))
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> Result<(), JsValue> {
        self.inner
            .pointer_leave()
            .map_err(|e| annotator_error("pointerLeave", e))
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        wasm_log!("pointerDown at ({}, {})", x, y);
        self.inner
            .pointer_down(x, y)
            .map_err(|e| annotator_error("pointerDown", e))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(x, y);
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        wasm_log!("pointerUp at ({}, {})", x, y);
        self.inner
            .pointer_up(x, y)
            .map_err(|e| annotator_error("pointerUp", e))
    }

    #[wasm_bindgen(js_name = popupDelete)]
    pub fn popup_delete(&mut self) -> Result<(), JsValue> {
        self.inner
            .popup_delete()
            .map_err(|e| annotator_error("popupDelete", e))
    }

    // ------------------------------------------------------------------
    // Editor
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = setEditorText)]
    pub fn set_editor_text(&mut self, text: String) -> Result<(), JsValue> {
        self.inner
            .set_editor_text(text)
            .map_err(|e| annotator_error("setEditorText", e))
    }

    #[wasm_bindgen(js_name = saveEdit)]
    pub fn save_edit(&mut self) -> Result<(), JsValue> {
        self.inner
            .save_edit()
            .map_err(|e| annotator_error("saveEdit", e))
    }

    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&mut self) -> Result<(), JsValue> {
        self.inner
            .cancel_edit()
            .map_err(|e| annotator_error("cancelEdit", e))
    }

    /// Call when the editor is abandoned (blur, Escape, image removed)
    #[wasm_bindgen(js_name = dismissEditor)]
    pub fn dismiss_editor(&mut self) -> Result<(), JsValue> {
        self.inner
            .dismiss_editor()
            .map_err(|e| annotator_error("dismissEditor", e))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register `callback(event)` for an event type name such as
    /// `"ANNOTATION_EDIT_SAVE"`
    #[wasm_bindgen(js_name = addHandler)]
    pub fn add_handler(&mut self, event_type: &str, callback: js_sys::Function) -> Result<(), JsValue> {
        let event_type: EventType = event_type
            .parse()
            .map_err(|e| annotator_error("addHandler", e))?;

        self.inner.add_handler(event_type, move |_, event: &Event| {
            let payload = match serialize(event, "Failed to serialize event") {
                Ok(payload) => payload,
                Err(_) => return,
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
                wasm_warn!("{} handler threw: {:?}", event.event_type(), e);
            }
        });
        Ok(())
    }

    /// Fire an event by type name with an optional payload object
    #[wasm_bindgen(js_name = fireEvent)]
    pub fn fire_event(&mut self, event_type: &str, payload_js: JsValue) -> Result<(), JsValue> {
        let event_type: EventType = event_type
            .parse()
            .map_err(|e| annotator_error("fireEvent", e))?;
        let payload: serde_json::Value = deserialize_or_default(payload_js, "Invalid event payload")?;
        let event = Event::from_parts(event_type, payload).map_err(|e| annotator_error("fireEvent", e))?;

        self.inner
            .fire_event(event)
            .map_err(|e| annotator_error("fireEvent", e))
    }

    // ------------------------------------------------------------------
    // Annotations
    // ------------------------------------------------------------------

    /// Returns the stored annotation, including its id. An object without an
    /// `id` gets one derived from its content.
    #[wasm_bindgen(js_name = addAnnotation)]
    pub fn add_annotation(&mut self, annotation_js: JsValue) -> Result<JsValue, JsValue> {
        let annotation: Annotation = deserialize(annotation_js, "Invalid annotation")?;
        let stored = serialize(&annotation, "Failed to serialize annotation")?;
        self.inner.add_annotation(annotation);
        Ok(stored)
    }

    /// Returns whether the annotation was present
    #[wasm_bindgen(js_name = removeAnnotation)]
    pub fn remove_annotation(&mut self, annotation_js: JsValue) -> Result<bool, JsValue> {
        let annotation: Annotation = deserialize(annotation_js, "Invalid annotation")?;
        Ok(self.inner.remove_annotation(&annotation))
    }

    #[wasm_bindgen(js_name = getAnnotations)]
    pub fn get_annotations(&self) -> Result<JsValue, JsValue> {
        serialize(&self.inner.annotations(), "Failed to serialize annotations")
    }

    #[wasm_bindgen(js_name = getAnnotationsAt)]
    pub fn get_annotations_at(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        serialize(&self.inner.annotations_at(x, y), "Failed to serialize annotations")
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = getDisplayList)]
    pub fn get_display_list(&self) -> Result<JsValue, JsValue> {
        let list = self
            .inner
            .display_list()
            .map_err(|e| annotator_error("getDisplayList", e))?;
        serialize(&list, "Failed to serialize display list")
    }
}
