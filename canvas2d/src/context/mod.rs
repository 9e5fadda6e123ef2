//! The Canvas 2D rendering context: style state, the transform, the
//! current path, and a save/restore stack.

mod drawing;
mod image_ops;
mod path_ops;
mod text_rendering;
mod transform;

use cosmic_text::{FontSystem, SwashCache};

use crate::color::{color_to_string, parse_color, Color};
use crate::error::CanvasResult;
use crate::font::{parse_font_string, FontSpec};
use crate::gradient::CanvasGradient;
use crate::matrix::Matrix;
use crate::pattern::CanvasPattern;
use crate::raster;
use crate::raster::image::Image;
use crate::style::{BlendMode, LineCap, LineJoin, Repetition};
use crate::util::all_finite;

/// A fill or stroke style: a resolved color, or a live reference to a
/// gradient/pattern that produces a shader at draw time.
#[derive(Debug, Clone)]
pub enum StyleValue {
    Color(Color),
    Gradient(CanvasGradient),
    Pattern(CanvasPattern),
}

/// Everything `save` snapshots and `restore` reapplies atomically.
///
/// The current path is deliberately not part of this snapshot: its
/// lifecycle spans saves and restores.
#[derive(Debug, Clone)]
pub(crate) struct ContextState {
    pub(crate) fill_style: StyleValue,
    pub(crate) stroke_style: StyleValue,
    pub(crate) line_width: f32,
    pub(crate) line_cap: LineCap,
    pub(crate) line_join: LineJoin,
    pub(crate) miter_limit: f32,
    pub(crate) line_dash: Vec<f32>,
    pub(crate) line_dash_offset: f32,
    pub(crate) shadow_color: Color,
    pub(crate) shadow_blur: f32,
    pub(crate) shadow_offset_x: f32,
    pub(crate) shadow_offset_y: f32,
    pub(crate) global_alpha: f32,
    pub(crate) blend_mode: BlendMode,
    pub(crate) font: FontSpec,
    pub(crate) font_string: String,
    pub(crate) transform: Matrix,
}

impl Default for ContextState {
    fn default() -> Self {
        Self {
            fill_style: StyleValue::Color(Color::BLACK),
            stroke_style: StyleValue::Color(Color::BLACK),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            shadow_color: Color::TRANSPARENT,
            shadow_blur: 0.0,
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
            global_alpha: 1.0,
            blend_mode: BlendMode::SourceOver,
            font: FontSpec::default(),
            font_string: "10px monospace".to_string(),
            transform: Matrix::identity(),
        }
    }
}

/// The 2D drawing context for a surface.
///
/// Single-threaded and synchronous: no operation suspends, and none is
/// safe to call concurrently with another on the same context.
pub struct CanvasRenderingContext2D {
    pub(crate) canvas: raster::Canvas,
    pub(crate) font_system: FontSystem,
    pub(crate) swash_cache: SwashCache,
    pub(crate) state: ContextState,
    state_stack: Vec<ContextState>,
    pub(crate) current_path: raster::Path,
}

impl CanvasRenderingContext2D {
    pub(crate) fn new(width: u32, height: u32, font_db: fontdb::Database) -> CanvasResult<Self> {
        Ok(Self {
            canvas: raster::Canvas::new(width, height)?,
            font_system: FontSystem::new_with_locale_and_db("en".to_string(), font_db),
            swash_cache: SwashCache::new(),
            state: ContextState::default(),
            state_stack: Vec::new(),
            current_path: raster::Path::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Push a snapshot of the style/transform state (not the current
    /// path); the device matrix and clip are saved alongside.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
        self.canvas.save();
    }

    /// Pop and reapply the most recent snapshot. An unbalanced restore is
    /// a reported no-op.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        let Some(state) = self.state_stack.pop() else {
            log::warn!(target: "canvas", "restore without matching save");
            return;
        };
        self.state = state;
        self.canvas.restore();
    }

    // --- style properties ---

    /// Set the fill style from a CSS color string. Unparseable input is
    /// reported and leaves the style unchanged.
    pub fn set_fill_style(&mut self, style: &str) -> CanvasResult<()> {
        self.state.fill_style = StyleValue::Color(parse_color(style)?);
        Ok(())
    }

    pub fn set_fill_style_gradient(&mut self, gradient: &CanvasGradient) {
        self.state.fill_style = StyleValue::Gradient(gradient.clone());
    }

    pub fn set_fill_style_pattern(&mut self, pattern: &CanvasPattern) {
        self.state.fill_style = StyleValue::Pattern(pattern.clone());
    }

    /// The serialised fill color, or `None` for gradient/pattern styles.
    pub fn fill_style(&self) -> Option<String> {
        match &self.state.fill_style {
            StyleValue::Color(c) => Some(color_to_string(*c)),
            _ => None,
        }
    }

    /// Set the stroke style from a CSS color string.
    pub fn set_stroke_style(&mut self, style: &str) -> CanvasResult<()> {
        self.state.stroke_style = StyleValue::Color(parse_color(style)?);
        Ok(())
    }

    pub fn set_stroke_style_gradient(&mut self, gradient: &CanvasGradient) {
        self.state.stroke_style = StyleValue::Gradient(gradient.clone());
    }

    pub fn set_stroke_style_pattern(&mut self, pattern: &CanvasPattern) {
        self.state.stroke_style = StyleValue::Pattern(pattern.clone());
    }

    /// The serialised stroke color, or `None` for gradient/pattern styles.
    pub fn stroke_style(&self) -> Option<String> {
        match &self.state.stroke_style {
            StyleValue::Color(c) => Some(color_to_string(*c)),
            _ => None,
        }
    }

    /// Set the line width. Accepts finite values > 0; anything else is
    /// silently ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    pub fn line_width(&self) -> f32 {
        self.state.line_width
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    pub fn line_cap(&self) -> LineCap {
        self.state.line_cap
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    pub fn line_join(&self) -> LineJoin {
        self.state.line_join
    }

    /// Set the miter limit. Accepts finite values > 0; anything else is
    /// silently ignored.
    pub fn set_miter_limit(&mut self, limit: f32) {
        if limit.is_finite() && limit > 0.0 {
            self.state.miter_limit = limit;
        }
    }

    pub fn miter_limit(&self) -> f32 {
        self.state.miter_limit
    }

    /// Set the global alpha. Accepts finite values in [0, 1]; anything
    /// else is silently ignored.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    pub fn global_alpha(&self) -> f32 {
        self.state.global_alpha
    }

    /// Set the shadow blur radius. Accepts finite values >= 0 (zero is
    /// valid); anything else is silently ignored.
    pub fn set_shadow_blur(&mut self, blur: f32) {
        if blur.is_finite() && blur >= 0.0 {
            self.state.shadow_blur = blur;
        }
    }

    pub fn shadow_blur(&self) -> f32 {
        self.state.shadow_blur
    }

    pub fn set_shadow_color(&mut self, color: &str) -> CanvasResult<()> {
        self.state.shadow_color = parse_color(color)?;
        Ok(())
    }

    pub fn shadow_color(&self) -> String {
        color_to_string(self.state.shadow_color)
    }

    /// Set the horizontal shadow offset. Non-finite values are silently
    /// ignored.
    pub fn set_shadow_offset_x(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.shadow_offset_x = offset;
        }
    }

    pub fn shadow_offset_x(&self) -> f32 {
        self.state.shadow_offset_x
    }

    /// Set the vertical shadow offset. Non-finite values are silently
    /// ignored.
    pub fn set_shadow_offset_y(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.shadow_offset_y = offset;
        }
    }

    pub fn shadow_offset_y(&self) -> f32 {
        self.state.shadow_offset_y
    }

    /// Set the dash pattern. The whole call is ignored if any entry is
    /// negative or non-finite; an odd-length list is concatenated with
    /// itself to force an even length.
    pub fn set_line_dash(&mut self, mut dashes: Vec<f32>) {
        if dashes.iter().any(|&d| !d.is_finite() || d < 0.0) {
            return;
        }
        if dashes.len() % 2 == 1 {
            let copy = dashes.clone();
            dashes.extend(copy);
        }
        self.state.line_dash = dashes;
    }

    pub fn line_dash(&self) -> Vec<f32> {
        self.state.line_dash.clone()
    }

    /// Set the dash offset. Non-finite values are silently ignored.
    pub fn set_line_dash_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.line_dash_offset = offset;
        }
    }

    pub fn line_dash_offset(&self) -> f32 {
        self.state.line_dash_offset
    }

    /// Set the composite operation by name. Unrecognized names leave the
    /// mode unchanged; `plus-darker` is recognized but unsupported and is
    /// reported as an error.
    pub fn set_global_composite_operation(&mut self, operation: &str) -> CanvasResult<()> {
        if let Some(mode) = BlendMode::from_composite_operation(operation)? {
            self.state.blend_mode = mode;
        }
        Ok(())
    }

    pub fn global_composite_operation(&self) -> &'static str {
        self.state.blend_mode.composite_operation()
    }

    /// Set the font from a CSS shorthand. A string that does not parse
    /// leaves the current font unchanged.
    pub fn set_font(&mut self, font: &str) {
        if let Some(spec) = parse_font_string(font) {
            self.state.font = spec;
            self.state.font_string = font.to_string();
        }
    }

    pub fn font(&self) -> &str {
        &self.state.font_string
    }

    // --- gradients & patterns ---

    pub fn create_linear_gradient(
        &self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
    ) -> CanvasResult<CanvasGradient> {
        if !all_finite(&[x0, y0, x1, y1]) {
            return Err(crate::error::CanvasError::InvalidArgument(
                "createLinearGradient requires finite coordinates".to_string(),
            ));
        }
        Ok(CanvasGradient::new_linear(x0, y0, x1, y1))
    }

    pub fn create_radial_gradient(
        &self,
        x0: f32,
        y0: f32,
        r0: f32,
        x1: f32,
        y1: f32,
        r1: f32,
    ) -> CanvasResult<CanvasGradient> {
        if !all_finite(&[x0, y0, r0, x1, y1, r1]) {
            return Err(crate::error::CanvasError::InvalidArgument(
                "createRadialGradient requires finite coordinates".to_string(),
            ));
        }
        if r0 < 0.0 || r1 < 0.0 {
            return Err(crate::error::CanvasError::NegativeRadius(r0.min(r1)));
        }
        Ok(CanvasGradient::new_radial(x0, y0, r0, x1, y1, r1))
    }

    pub fn create_pattern(
        &self,
        image: &Image,
        repetition: &str,
    ) -> CanvasResult<CanvasPattern> {
        let repetition: Repetition = repetition.parse()?;
        Ok(CanvasPattern::new(image, repetition))
    }
}
