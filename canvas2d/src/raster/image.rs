//! Decoded images and raw pixel buffers.

use std::fmt;

use crate::error::{CanvasError, CanvasResult};

/// A decoded, ready-to-draw image.
pub struct Image {
    pixmap: tiny_skia::Pixmap,
}

impl Image {
    /// Decode encoded image bytes (PNG).
    ///
    /// Failure is an expected, recoverable condition tied to external
    /// data: it is reported as an `Err`, never a panic.
    pub fn decode(data: &[u8]) -> CanvasResult<Self> {
        let pixmap = tiny_skia::Pixmap::decode_png(data)
            .map_err(|e| CanvasError::ImageDecode(e.to_string()))?;
        Ok(Self { pixmap })
    }

    /// Build an image from unpremultiplied RGBA bytes, 4 per pixel.
    pub fn from_rgba(data: &[u8], width: u32, height: u32) -> CanvasResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CanvasError::InvalidArgument(format!(
                "expected {} bytes of RGBA data, got {}",
                expected,
                data.len()
            )));
        }
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(CanvasError::InvalidDimensions { width, height })?;
        for (pixel, rgba) in pixmap.pixels_mut().iter_mut().zip(data.chunks_exact(4)) {
            *pixel = tiny_skia::ColorU8::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3]).premultiply();
        }
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub(crate) fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.pixmap
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// A rectangle of unpremultiplied RGBA pixels.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// A transparent-black buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * 4],
            width,
            height,
        }
    }
}
