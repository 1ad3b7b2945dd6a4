//! Event fabric linking the selector, editor, viewer and annotator

pub mod broker;
pub mod types;

pub use broker::{dispatch, EventBroker, Handler};
pub use types::{Event, EventType};
