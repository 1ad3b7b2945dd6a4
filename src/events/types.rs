//! Lifecycle event vocabulary
//!
//! The set of event types is closed. Each `Event` variant carries the payload
//! its type requires, so a `SELECTION_COMPLETED` without a shape cannot be
//! constructed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnnotatorError;
use crate::models::{Annotation, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    MouseOverAnnotatableMedia,
    MouseOutOfAnnotatableMedia,
    SelectionCompleted,
    AnnotationEditCancel,
    AnnotationEditSave,
    PopupBtnDelete,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::MouseOverAnnotatableMedia,
        EventType::MouseOutOfAnnotatableMedia,
        EventType::SelectionCompleted,
        EventType::AnnotationEditCancel,
        EventType::AnnotationEditSave,
        EventType::PopupBtnDelete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::MouseOverAnnotatableMedia => "MOUSE_OVER_ANNOTATABLE_MEDIA",
            EventType::MouseOutOfAnnotatableMedia => "MOUSE_OUT_OF_ANNOTATABLE_MEDIA",
            EventType::SelectionCompleted => "SELECTION_COMPLETED",
            EventType::AnnotationEditCancel => "ANNOTATION_EDIT_CANCEL",
            EventType::AnnotationEditSave => "ANNOTATION_EDIT_SAVE",
            EventType::PopupBtnDelete => "POPUP_BTN_DELETE",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = AnnotatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| AnnotatorError::UnknownEventType(s.to_string()))
    }
}

/// An event with its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    MouseOverAnnotatableMedia,
    MouseOutOfAnnotatableMedia,
    SelectionCompleted { shape: Shape },
    AnnotationEditCancel,
    AnnotationEditSave { annotation: Annotation },
    PopupBtnDelete { annotation: Annotation },
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::MouseOverAnnotatableMedia => EventType::MouseOverAnnotatableMedia,
            Event::MouseOutOfAnnotatableMedia => EventType::MouseOutOfAnnotatableMedia,
            Event::SelectionCompleted { .. } => EventType::SelectionCompleted,
            Event::AnnotationEditCancel => EventType::AnnotationEditCancel,
            Event::AnnotationEditSave { .. } => EventType::AnnotationEditSave,
            Event::PopupBtnDelete { .. } => EventType::PopupBtnDelete,
        }
    }

    /// Annotation carried by the event, if its type has one
    pub fn annotation(&self) -> Option<&Annotation> {
        match self {
            Event::AnnotationEditSave { annotation } | Event::PopupBtnDelete { annotation } => {
                Some(annotation)
            }
            _ => None,
        }
    }

    /// Build an event from a type name and a JSON payload object.
    ///
    /// Payload-free types ignore `payload`.
    pub fn from_parts(event_type: EventType, payload: serde_json::Value) -> Result<Self, AnnotatorError> {
        let mut object = match payload {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => serde_json::Map::new(),
            other => {
                return Err(AnnotatorError::InvalidPayload(format!(
                    "{} payload must be an object, got {}",
                    event_type, other
                )))
            }
        };
        object.insert(
            "type".to_string(),
            serde_json::Value::String(event_type.as_str().to_string()),
        );

        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| AnnotatorError::InvalidPayload(format!("{}: {}", event_type, e)))
    }
}
