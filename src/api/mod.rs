//! Annotator WASM API
//!
//! The JavaScript-facing surface of the crate.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, serialization and error conversion
//! - `annotator`: the `ImageAnnotator` class, one instance per image

pub mod helpers;
pub mod annotator;

pub use annotator::ImageAnnotator;
