//! Canvas 2D API emulation over a primitive raster engine.
//!
//! This crate reproduces the stateful Canvas 2D drawing contract — paths,
//! fills, strokes, text, gradients, patterns, transforms, compositing,
//! shadows — on top of a lower-level rasterization layer that knows only
//! about path objects, paint descriptors, and a device canvas. It uses:
//! - `tiny-skia` for rasterization
//! - `kurbo` for curve geometry (arcs, stroking, containment)
//! - `cosmic-text` + `fontdb` for text shaping and measurement
//!
//! # Example
//!
//! ```rust,ignore
//! use canvas2d::HtmlCanvas;
//!
//! let mut canvas = HtmlCanvas::new(400, 300)?;
//! let ctx = canvas.get_context();
//! ctx.set_fill_style("#ff0000")?;
//! ctx.fill_rect(10.0, 10.0, 100.0, 50.0);
//! let png = canvas.to_png()?;
//! ```

mod color;
mod context;
mod error;
mod font;
mod gradient;
mod htmlcanvas;
mod matrix;
mod path2d;
mod pattern;
pub mod raster;
mod style;
mod util;

// Re-export public API
pub use color::{color_to_string, multiply_by_alpha, parse_color, Color};
pub use context::{CanvasRenderingContext2D, StyleValue};
pub use error::{CanvasError, CanvasResult};
pub use font::{parse_font_string, FontSpec};
pub use gradient::{CanvasGradient, GradientStop};
pub use htmlcanvas::HtmlCanvas;
pub use matrix::Matrix;
pub use path2d::Path2D;
pub use pattern::CanvasPattern;
pub use raster::image::{Image, ImageData};
pub use raster::text::{TextBlob, TextMetrics};
pub use style::{BlendMode, FillRule, LineCap, LineJoin, PaintStyle, Repetition};
