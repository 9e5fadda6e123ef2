//! The device canvas: a pixmap plus a save/restore stack of matrix and
//! clip state.
//!
//! Path geometry reaches this layer in its own local space; the canvas
//! carries the active transform and applies it at rasterization time.

use tiny_skia::{Mask, Pixmap, PixmapPaint, Transform};

use super::blur::gaussian_blur;
use super::image::Image;
use super::paint::Paint;
use super::path::Path;
use super::text::TextBlob;
use crate::error::{CanvasError, CanvasResult};
use crate::matrix::Matrix;
use crate::style::{BlendMode, PaintStyle};
use crate::util::all_finite;

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

pub struct Canvas {
    pixmap: Pixmap,
    total: Matrix,
    clip: Option<Mask>,
    stack: Vec<(Matrix, Option<Mask>)>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        let pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;
        Ok(Self {
            pixmap,
            total: Matrix::identity(),
            clip: None,
            stack: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn save(&mut self) {
        self.stack.push((self.total, self.clip.clone()));
    }

    /// Pop matrix and clip. Unbalanced restores are a no-op.
    pub fn restore(&mut self) {
        if let Some((total, clip)) = self.stack.pop() {
            self.total = total;
            self.clip = clip;
        }
    }

    /// Concatenate `matrix` into the total: points map through `matrix`
    /// first, then the previous total.
    pub fn concat(&mut self, matrix: &Matrix) {
        self.total = self.total.multiply(matrix);
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.concat(&Matrix::translated(dx, dy));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(&Matrix::scaled(sx, sy, 0.0, 0.0));
    }

    pub fn rotate(&mut self, radians: f32) {
        self.concat(&Matrix::rotated(radians, 0.0, 0.0));
    }

    pub fn set_matrix(&mut self, matrix: &Matrix) {
        self.total = *matrix;
    }

    pub fn total_matrix(&self) -> Matrix {
        self.total
    }

    /// Intersect the clip region with `path` (under the current matrix,
    /// using the path's fill rule).
    pub fn clip_path(&mut self, path: &Path, anti_alias: bool) {
        let Some(ts_path) = path.to_tiny_skia() else {
            return;
        };
        let transform = self.total.to_transform();
        match &mut self.clip {
            Some(mask) => {
                mask.intersect_path(&ts_path, path.fill_rule().into(), anti_alias, transform);
            }
            None => {
                if let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) {
                    mask.fill_path(&ts_path, path.fill_rule().into(), anti_alias, transform);
                    self.clip = Some(mask);
                }
            }
        }
    }

    /// Draw `path` with `paint` under the current matrix.
    ///
    /// A paint with a positive blur sigma renders through an offscreen
    /// layer that is blurred and then composited; the layer is a transient
    /// scoped to this call.
    pub fn draw_path(&mut self, path: &Path, paint: &Paint) {
        let Some(ts_path) = path.to_tiny_skia() else {
            return;
        };
        let transform = self.total.to_transform();
        if paint.blur_sigma > 0.0 {
            let Some(mut layer) = Pixmap::new(self.pixmap.width(), self.pixmap.height()) else {
                return;
            };
            let mut layer_paint = paint.clone();
            layer_paint.blend_mode = BlendMode::SourceOver;
            Self::rasterize(&mut layer, &ts_path, path, &layer_paint, transform, None);
            gaussian_blur(&mut layer, paint.blur_sigma);
            self.pixmap.draw_pixmap(
                0,
                0,
                layer.as_ref(),
                &PixmapPaint {
                    opacity: 1.0,
                    blend_mode: paint.blend_mode.into(),
                    quality: tiny_skia::FilterQuality::Nearest,
                },
                Transform::identity(),
                self.clip.as_ref(),
            );
        } else {
            Self::rasterize(
                &mut self.pixmap,
                &ts_path,
                path,
                paint,
                transform,
                self.clip.as_ref(),
            );
        }
    }

    fn rasterize(
        pixmap: &mut Pixmap,
        ts_path: &tiny_skia::Path,
        path: &Path,
        paint: &Paint,
        transform: Transform,
        clip: Option<&Mask>,
    ) {
        let ts_paint = paint.to_tiny_skia();
        match paint.style {
            PaintStyle::Fill => {
                pixmap.fill_path(
                    ts_path,
                    &ts_paint,
                    path.fill_rule().into(),
                    transform,
                    clip,
                );
            }
            PaintStyle::Stroke => {
                pixmap.stroke_path(ts_path, &ts_paint, &paint.to_stroke(), transform, clip);
            }
        }
    }

    /// Draw the rectangle `(x, y, width, height)` (user space).
    pub fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: &Paint) {
        if !all_finite(&[x, y, width, height]) {
            return;
        }
        let mut path = Path::new();
        path.move_to(x, y);
        path.line_to(x + width, y);
        path.line_to(x + width, y + height);
        path.line_to(x, y + height);
        path.close();
        self.draw_path(&path, paint);
    }

    /// Draw a text blob with its baseline origin at `(x, y)`.
    pub fn draw_text_blob(&mut self, blob: &TextBlob, x: f32, y: f32, paint: &Paint) {
        if blob.path.is_empty() {
            return;
        }
        let mut path = blob.path.clone();
        path.transform(&Matrix::translated(x, y));
        self.draw_path(&path, paint);
    }

    /// Draw `src` (or the whole image) into the user-space rectangle
    /// `dst`, scaled to fit.
    pub fn draw_image_rect(
        &mut self,
        image: &Image,
        src: Option<(f32, f32, f32, f32)>,
        dst: (f32, f32, f32, f32),
        opacity: f32,
        blend_mode: BlendMode,
    ) {
        let full = (0.0, 0.0, image.width() as f32, image.height() as f32);
        let (sx, sy, sw, sh) = src.unwrap_or(full);
        let (dx, dy, dw, dh) = dst;
        if sw <= 0.0 || sh <= 0.0 || dw == 0.0 || dh == 0.0 {
            return;
        }

        // crop to the source rectangle when one was requested
        let cropped;
        let pixmap_ref = if (sx, sy, sw, sh) == full {
            image.pixmap().as_ref()
        } else {
            let Some(rect) = tiny_skia::IntRect::from_xywh(
                sx.floor() as i32,
                sy.floor() as i32,
                (sw.ceil() as u32).max(1),
                (sh.ceil() as u32).max(1),
            ) else {
                return;
            };
            let Some(sub) = image.pixmap().clone_rect(rect) else {
                return;
            };
            cropped = sub;
            cropped.as_ref()
        };

        let transform = self
            .total
            .to_transform()
            .pre_concat(Transform::from_translate(dx, dy))
            .pre_concat(Transform::from_scale(dw / sw, dh / sh));
        self.pixmap.draw_pixmap(
            0,
            0,
            pixmap_ref,
            &PixmapPaint {
                opacity,
                blend_mode: blend_mode.into(),
                quality: tiny_skia::FilterQuality::Bilinear,
            },
            transform,
            self.clip.as_ref(),
        );
    }

    /// Read a rectangle of unpremultiplied RGBA pixels in device space.
    /// Pixels outside the canvas read as transparent black.
    pub fn read_pixels(&self, x: i32, y: i32, width: u32, height: u32) -> Option<Vec<u8>> {
        if width == 0 || height == 0 {
            return None;
        }
        let mut out = vec![0u8; width as usize * height as usize * 4];
        for row in 0..height {
            for col in 0..width {
                let px = x + col as i32;
                let py = y + row as i32;
                if px < 0 || py < 0 || px >= self.width() as i32 || py >= self.height() as i32 {
                    continue;
                }
                let pixel = self.pixmap.pixel(px as u32, py as u32)?;
                let color = pixel.demultiply();
                let idx = (row as usize * width as usize + col as usize) * 4;
                out[idx] = color.red();
                out[idx + 1] = color.green();
                out[idx + 2] = color.blue();
                out[idx + 3] = color.alpha();
            }
        }
        Some(out)
    }

    /// Encode the canvas contents to PNG.
    pub fn encode_png(&self) -> CanvasResult<Vec<u8>> {
        self.pixmap.encode_png().map_err(CanvasError::from)
    }

    #[cfg(test)]
    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn red_fill() -> Paint<'static> {
        Paint {
            color: Color::RED,
            ..Paint::default()
        }
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(CanvasError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Canvas::new(10, 40000),
            Err(CanvasError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_draw_rect_under_transform() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        canvas.concat(&Matrix::translated(20.0, 20.0));
        canvas.draw_rect(0.0, 0.0, 10.0, 10.0, &red_fill());
        let pixels = canvas.read_pixels(25, 25, 1, 1).unwrap();
        assert_eq!(&pixels[..4], &[255, 0, 0, 255]);
        let outside = canvas.read_pixels(5, 5, 1, 1).unwrap();
        assert_eq!(outside[3], 0);
    }

    #[test]
    fn test_save_restore_matrix_and_clip() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        canvas.save();
        canvas.concat(&Matrix::translated(10.0, 10.0));
        let mut clip = Path::new();
        clip.move_to(0.0, 0.0);
        clip.line_to(5.0, 0.0);
        clip.line_to(5.0, 5.0);
        clip.line_to(0.0, 5.0);
        clip.close();
        canvas.clip_path(&clip, true);
        canvas.restore();
        assert_eq!(canvas.total_matrix(), Matrix::identity());
        // clip was dropped with the restore
        canvas.draw_rect(0.0, 0.0, 40.0, 40.0, &red_fill());
        let pixels = canvas.read_pixels(30, 30, 1, 1).unwrap();
        assert_eq!(pixels[3], 255);
    }

    #[test]
    fn test_clip_limits_drawing() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        let mut clip = Path::new();
        clip.move_to(0.0, 0.0);
        clip.line_to(10.0, 0.0);
        clip.line_to(10.0, 10.0);
        clip.line_to(0.0, 10.0);
        clip.close();
        canvas.clip_path(&clip, true);
        canvas.draw_rect(0.0, 0.0, 40.0, 40.0, &red_fill());
        assert_eq!(canvas.read_pixels(5, 5, 1, 1).unwrap()[3], 255);
        assert_eq!(canvas.read_pixels(20, 20, 1, 1).unwrap()[3], 0);
    }

    #[test]
    fn test_blurred_paint_spreads_past_shape() {
        let mut canvas = Canvas::new(41, 41).unwrap();
        let paint = Paint {
            color: Color::BLACK,
            blur_sigma: 3.0,
            ..Paint::default()
        };
        canvas.draw_rect(15.0, 15.0, 10.0, 10.0, &paint);
        // coverage bleeds outside the rect bounds
        let outside = canvas.read_pixels(13, 20, 1, 1).unwrap();
        assert!(outside[3] > 0);
        let far = canvas.read_pixels(1, 1, 1, 1).unwrap();
        assert_eq!(far[3], 0);
    }
}
