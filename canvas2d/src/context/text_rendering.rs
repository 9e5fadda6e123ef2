//! Text drawing and measurement.
//!
//! A string becomes a blob of positioned glyph outlines, which then goes
//! through the same paint and shadow machinery as any other path.

use super::CanvasRenderingContext2D;
use crate::raster::text::{self, TextMetrics};

impl CanvasRenderingContext2D {
    /// Measure `text` under the current font: the sum of the shaped glyph
    /// advance widths.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        TextMetrics {
            width: text::measure(&mut self.font_system, text, &self.state.font),
        }
    }

    /// Fill `text` with its baseline starting at `(x, y)`.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText {:?} {} {}", text, x, y);
        let blob = text::make_blob(
            &mut self.font_system,
            &mut self.swash_cache,
            text,
            &self.state.font,
        );
        self.with_fill_paint(|ctx, paint| {
            if let Some(shadow) = ctx.shadow_paint(paint) {
                ctx.canvas.save();
                ctx.apply_shadow_offset_matrix();
                ctx.canvas.draw_text_blob(&blob, x, y, &shadow);
                ctx.canvas.restore();
            }
            ctx.canvas.draw_text_blob(&blob, x, y, paint);
        });
    }

    /// Stroke `text` with its baseline starting at `(x, y)`, using the
    /// current stroke settings on the glyph outlines.
    pub fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "strokeText {:?} {} {}", text, x, y);
        let blob = text::make_blob(
            &mut self.font_system,
            &mut self.swash_cache,
            text,
            &self.state.font,
        );
        self.with_stroke_paint(|ctx, paint| {
            if let Some(shadow) = ctx.shadow_paint(paint) {
                ctx.canvas.save();
                ctx.apply_shadow_offset_matrix();
                ctx.canvas.draw_text_blob(&blob, x, y, &shadow);
                ctx.canvas.restore();
            }
            ctx.canvas.draw_text_blob(&blob, x, y, paint);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_context() -> CanvasRenderingContext2D {
        // empty font database: shaping yields nothing, but every call
        // must stay well-defined
        CanvasRenderingContext2D::new(100, 100, fontdb::Database::new()).unwrap()
    }

    #[test]
    fn test_measure_text_empty_database() {
        let mut ctx = new_context();
        let metrics = ctx.measure_text("hello");
        assert_eq!(metrics.width, 0.0);
    }

    #[test]
    fn test_measure_empty_string() {
        let mut ctx = new_context();
        assert_eq!(ctx.measure_text("").width, 0.0);
    }

    #[test]
    fn test_text_draws_without_fonts_are_noops() {
        let mut ctx = new_context();
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.fill_text("hello", 10.0, 50.0);
        ctx.stroke_text("hello", 10.0, 80.0);
        let data = ctx.get_image_data(0, 0, 100, 100).unwrap();
        assert!(data.data.iter().all(|&b| b == 0));
    }
}
