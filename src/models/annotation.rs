//! Annotation data model
//!
//! The host application owns annotations; the annotator only needs the
//! `shape.geometry` record to render a highlight, plus an identity so the
//! viewer can tell two values apart. Any extra descriptive content the host
//! attaches round-trips untouched through `properties`.
//!
//! Host values without an `id` get one derived from their content, so the
//! same JSON object always maps to the same annotation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::geometry::{Geometry, Point};

/// Identity of an annotation; two annotations are "the same" iff ids match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(pub Uuid);

impl AnnotationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Name-based id over the serialized shape, text and properties
    pub fn from_content(
        shape: &Shape,
        text: &str,
        properties: &serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        let content = serde_json::to_vec(&(shape, text, properties)).unwrap_or_default();
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, &content))
    }
}

impl Default for AnnotationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Only axis-aligned rectangles are modeled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Rect,
}

/// Shape record exposed by every annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type", default)]
    pub kind: ShapeType,
    pub geometry: Geometry,
}

impl Shape {
    pub fn rect(geometry: Geometry) -> Self {
        Self {
            kind: ShapeType::Rect,
            geometry,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.geometry.contains(point)
    }
}

/// Wire form of an annotation, where the id is optional
#[derive(Deserialize)]
struct AnnotationRecord {
    #[serde(default)]
    id: Option<AnnotationId>,
    #[serde(default)]
    text: String,
    shape: Shape,
    #[serde(flatten)]
    properties: serde_json::Map<String, serde_json::Value>,
}

impl From<AnnotationRecord> for Annotation {
    fn from(record: AnnotationRecord) -> Self {
        let id = record.id.unwrap_or_else(|| {
            AnnotationId::from_content(&record.shape, &record.text, &record.properties)
        });
        Self {
            id,
            text: record.text,
            shape: record.shape,
            properties: record.properties,
        }
    }
}

/// A committed region annotation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "AnnotationRecord")]
pub struct Annotation {
    pub id: AnnotationId,

    /// Descriptive text typed into the editor
    pub text: String,

    pub shape: Shape,

    /// Host-defined content carried alongside the annotation
    #[serde(flatten)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl Annotation {
    /// Create a fresh annotation with a newly generated id
    pub fn new(shape: Shape, text: impl Into<String>) -> Self {
        Self {
            id: AnnotationId::new(),
            text: text.into(),
            shape,
            properties: serde_json::Map::new(),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.shape.geometry
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Annotation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_identity() {
        let shape = Shape::rect(Geometry::new(1.0, 2.0, 3.0, 4.0));
        let a = Annotation::new(shape.clone(), "cat");
        let b = Annotation::new(shape, "cat");

        assert_ne!(a, b);

        let mut a_edited = a.clone();
        a_edited.text = "a different cat".to_string();
        assert_eq!(a, a_edited);
    }

    #[test]
    fn test_deserialize_host_annotation() {
        let json = r#"{
            "text": "a tree",
            "shape": { "type": "rect", "geometry": { "x": 1, "y": 2, "width": 30, "height": 40 } },
            "author": "host"
        }"#;

        let annotation: Annotation = serde_json::from_str(json).unwrap();
        assert_eq!(annotation.text, "a tree");
        assert_eq!(*annotation.geometry(), Geometry::new(1.0, 2.0, 30.0, 40.0));
        assert_eq!(annotation.properties.get("author").unwrap(), "host");
    }

    #[test]
    fn test_idless_annotation_has_stable_identity() {
        let json = r#"{
            "text": "a tree",
            "shape": { "geometry": { "x": 1, "y": 2, "width": 30, "height": 40 } }
        }"#;

        let first: Annotation = serde_json::from_str(json).unwrap();
        let second: Annotation = serde_json::from_str(json).unwrap();
        assert_eq!(first, second);

        let other: Annotation = serde_json::from_str(&json.replace("a tree", "a bush")).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_explicit_id_is_kept() {
        let original = Annotation::new(Shape::rect(Geometry::new(0.0, 0.0, 2.0, 2.0)), "kept");
        let json = serde_json::to_string(&original).unwrap();

        let parsed: Annotation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, original.id);
        assert!(parsed.properties.is_empty());
    }

    #[test]
    fn test_serialize_keeps_properties_flat() {
        let mut annotation = Annotation::new(Shape::rect(Geometry::default()), "");
        annotation
            .properties
            .insert("tag".to_string(), serde_json::json!("bird"));

        let value = serde_json::to_value(&annotation).unwrap();
        assert_eq!(value["tag"], "bird");
        assert_eq!(value["shape"]["type"], "rect");
        assert_eq!(value["id"], annotation.id.to_string());
    }
}
