//! Geometry primitives shared by every overlay surface
//!
//! All rectangles are axis-aligned and expressed in surface-local pixels,
//! i.e. relative to the top-left corner of the bound image. Page coordinates
//! (used to place the editor and popup) are obtained by adding the image's
//! on-page offset.

use serde::{Deserialize, Serialize};

/// A point in surface-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by an offset (used for surface-local -> page conversion)
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned rectangle `{x, y, width, height}`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanned by two arbitrary corners.
    ///
    /// The top-left is the component-wise minimum, so dragging in any of the
    /// four directions from `anchor` produces the same rectangle.
    pub fn from_corners(anchor: Point, current: Point) -> Self {
        Self {
            x: anchor.x.min(current.x),
            y: anchor.y.min(current.y),
            width: (current.x - anchor.x).abs(),
            height: (current.y - anchor.y).abs(),
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Zero width or zero height
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Point directly below the rectangle's bottom-left corner, `gap` pixels down
    pub fn below(&self, gap: f64) -> Point {
        Point::new(self.x, self.y + self.height + gap)
    }
}

/// Handle to the source image the annotator is bound to.
///
/// Carries what the layout collaborator reports about the element: its pixel
/// dimensions and its offset within the page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageHandle {
    #[serde(default)]
    pub src: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub offset_left: f64,
    #[serde(default)]
    pub offset_top: f64,
}

impl ImageHandle {
    pub fn new(src: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            src: src.into(),
            width,
            height,
            offset_left: 0.0,
            offset_top: 0.0,
        }
    }

    pub fn with_offset(mut self, offset_left: f64, offset_top: f64) -> Self {
        self.offset_left = offset_left;
        self.offset_top = offset_top;
        self
    }

    /// Read dimensions and page offset from a live `<img>` element
    pub fn from_element(image: &web_sys::HtmlImageElement) -> Self {
        let element: &web_sys::HtmlElement = image;
        Self {
            src: image.src(),
            width: image.width() as f64,
            height: image.height() as f64,
            offset_left: element.offset_left() as f64,
            offset_top: element.offset_top() as f64,
        }
    }

    /// Convert a surface-local point into page coordinates
    pub fn to_page(&self, point: Point) -> Point {
        point.offset(self.offset_left, self.offset_top)
    }
}

/// Shared geometry of the three stacked surfaces.
///
/// Computed once from the image; hint, view and edit surfaces all sit at the
/// same origin with the image's pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl SurfaceLayout {
    pub fn from_image(image: &ImageHandle) -> Self {
        Self {
            origin: Point::new(image.offset_left, image.offset_top),
            width: image.width,
            height: image.height,
        }
    }
}
