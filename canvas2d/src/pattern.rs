//! Image pattern style objects.

use std::fmt;
use std::rc::Rc;

use crate::matrix::Matrix;
use crate::raster::image::Image;
use crate::style::Repetition;

struct PatternInner {
    pixmap: tiny_skia::Pixmap,
    repetition: Repetition,
}

/// Shared handle to an image pattern.
///
/// Like gradients, patterns resolve to a shader per draw, under the
/// transform current at that moment.
#[derive(Clone)]
pub struct CanvasPattern {
    inner: Rc<PatternInner>,
}

impl CanvasPattern {
    pub(crate) fn new(image: &Image, repetition: Repetition) -> Self {
        Self {
            inner: Rc::new(PatternInner {
                pixmap: image.pixmap().clone(),
                repetition,
            }),
        }
    }

    pub fn repetition(&self) -> Repetition {
        self.inner.repetition
    }

    /// The pixmap the tiling shader samples.
    ///
    /// tiny-skia has one spread mode for both axes, so directions that do
    /// not repeat are padded with transparency out to the canvas size; a
    /// Repeat spread then shows a single copy along them. The padded
    /// pixmap is a transient scoped to the draw call.
    pub(crate) fn tile_pixmap(
        &self,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Option<tiny_skia::Pixmap> {
        let source = &self.inner.pixmap;
        let (width, height) = match self.inner.repetition {
            Repetition::Repeat => return Some(source.clone()),
            Repetition::RepeatX => (source.width(), canvas_height.max(source.height())),
            Repetition::RepeatY => (canvas_width.max(source.width()), source.height()),
            Repetition::NoRepeat => (
                canvas_width.max(source.width()),
                canvas_height.max(source.height()),
            ),
        };
        let mut padded = tiny_skia::Pixmap::new(width, height)?;
        padded.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &tiny_skia::PixmapPaint::default(),
            tiny_skia::Transform::identity(),
            None,
        );
        Some(padded)
    }

    /// Build the tiling shader over a tile pixmap produced by
    /// [`tile_pixmap`](Self::tile_pixmap).
    pub(crate) fn shader_for<'a>(
        &self,
        tile: &'a tiny_skia::Pixmap,
        transform: &Matrix,
        opacity: f32,
    ) -> tiny_skia::Shader<'a> {
        tiny_skia::Pattern::new(
            tile.as_ref(),
            tiny_skia::SpreadMode::Repeat,
            tiny_skia::FilterQuality::Bilinear,
            opacity,
            transform.to_transform(),
        )
    }
}

impl fmt::Debug for CanvasPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasPattern")
            .field("width", &self.inner.pixmap.width())
            .field("height", &self.inner.pixmap.height())
            .field("repetition", &self.inner.repetition)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_image() -> Image {
        let mut data = vec![0u8; 4 * 4 * 4];
        // opaque red top-left pixel
        data[0] = 255;
        data[3] = 255;
        Image::from_rgba(&data, 4, 4).unwrap()
    }

    #[test]
    fn test_repeat_tile_is_the_source() {
        let pattern = CanvasPattern::new(&checker_image(), Repetition::Repeat);
        let tile = pattern.tile_pixmap(100, 100).unwrap();
        assert_eq!((tile.width(), tile.height()), (4, 4));
    }

    #[test]
    fn test_no_repeat_tile_is_canvas_sized() {
        let pattern = CanvasPattern::new(&checker_image(), Repetition::NoRepeat);
        let tile = pattern.tile_pixmap(100, 80).unwrap();
        assert_eq!((tile.width(), tile.height()), (100, 80));
        // padding is transparent
        assert_eq!(tile.pixel(50, 50).unwrap().alpha(), 0);
    }

    #[test]
    fn test_repeat_x_pads_vertically_only() {
        let pattern = CanvasPattern::new(&checker_image(), Repetition::RepeatX);
        let tile = pattern.tile_pixmap(100, 80).unwrap();
        assert_eq!((tile.width(), tile.height()), (4, 80));
    }
}
