//! The primitive rasterization layer.
//!
//! This is the capability set the drawing context consumes: a path object,
//! a paint descriptor, a device canvas with save/restore and
//! matrix-concatenation semantics, and factories for images, blurs, and
//! text blobs. Any engine exposing an equivalent contract could back the
//! context; this one is built on tiny-skia (rasterization) and kurbo
//! (curve geometry).

pub mod blur;
pub mod canvas;
pub mod image;
pub mod paint;
pub mod path;
pub mod text;

pub use canvas::Canvas;
pub use image::{Image, ImageData};
pub use paint::Paint;
pub use path::{Path, StrokeProps};
pub use text::{TextBlob, TextMetrics};
