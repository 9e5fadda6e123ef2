//! The paint descriptor consumed by the device canvas.

use crate::color::Color;
use crate::style::{BlendMode, LineCap, LineJoin, PaintStyle};

/// Everything a single draw needs: source (color or shader), geometry
/// parameters for strokes, blend mode, and an optional blur mask sigma.
///
/// Paints are transient: one is synthesized per draw call from context
/// state and dropped when the call returns. A shader may borrow pixel data
/// (patterns), hence the lifetime.
#[derive(Clone)]
pub struct Paint<'a> {
    pub style: PaintStyle,
    pub color: Color,
    pub shader: Option<tiny_skia::Shader<'a>>,
    pub blend_mode: BlendMode,
    pub anti_alias: bool,
    pub stroke_width: f32,
    pub miter_limit: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Dash intervals and offset.
    pub dash: Option<(Vec<f32>, f32)>,
    /// Gaussian blur sigma; zero means no mask filter.
    pub blur_sigma: f32,
}

impl Default for Paint<'_> {
    fn default() -> Self {
        Self {
            style: PaintStyle::Fill,
            color: Color::BLACK,
            shader: None,
            blend_mode: BlendMode::SourceOver,
            anti_alias: true,
            stroke_width: 1.0,
            miter_limit: 10.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            dash: None,
            blur_sigma: 0.0,
        }
    }
}

impl<'a> Paint<'a> {
    /// The tiny-skia paint for this descriptor. A shader takes precedence
    /// over the solid color, as in the engine contract.
    pub(crate) fn to_tiny_skia(&self) -> tiny_skia::Paint<'a> {
        let mut paint = tiny_skia::Paint {
            anti_alias: self.anti_alias,
            blend_mode: self.blend_mode.into(),
            ..tiny_skia::Paint::default()
        };
        match &self.shader {
            Some(shader) => paint.shader = shader.clone(),
            None => paint.set_color(self.color.into()),
        }
        paint
    }

    pub(crate) fn to_stroke(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.stroke_width,
            miter_limit: self.miter_limit,
            line_cap: self.line_cap.into(),
            line_join: self.line_join.into(),
            dash: self
                .dash
                .as_ref()
                .and_then(|(intervals, offset)| {
                    tiny_skia::StrokeDash::new(intervals.clone(), *offset)
                }),
        }
    }
}
