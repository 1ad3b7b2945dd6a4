//! Image Annotator WASM Module
//!
//! Draw, edit, view and delete rectangular region annotations over an image.
//! The Rust side owns all interaction state and geometry; the JavaScript
//! host forwards pointer input and paints the returned display list.

pub mod annotator;
pub mod api;
pub mod editor;
pub mod error;
pub mod events;
pub mod models;
pub mod renderers;
pub mod selection;
pub mod viewer;

// Re-export commonly used types
pub use annotator::Annotator;
pub use error::AnnotatorError;
pub use events::{Event, EventBroker, EventType};
pub use models::*;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();

    log::info!("Image Annotator WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("[WASM] logger already initialized: {}", e).into());
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
