//! Text shaping: glyph-outline blobs and advance measurement.
//!
//! Glyph outlines come from cosmic-text's swash cache; a blob is the
//! union of the positioned outlines for a string, with its origin at the
//! start of the baseline. Drawing a blob is then just drawing a path,
//! which lets text share the fill/stroke/shadow machinery.

use cosmic_text::{Attrs, Buffer, Command, Family, FontSystem, Metrics, Shaping, SwashCache};

use super::path::Path;
use crate::font::FontSpec;

/// Metrics returned by measureText.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMetrics {
    /// Total advance width in pixels.
    pub width: f32,
}

/// Positioned glyph outlines for a shaped string.
#[derive(Debug, Clone)]
pub struct TextBlob {
    pub(crate) path: Path,
    pub(crate) width: f32,
}

impl TextBlob {
    pub fn width(&self) -> f32 {
        self.width
    }
}

fn generic_family(name: &str) -> Family<'_> {
    match name {
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        other => Family::Name(other),
    }
}

fn shape(font_system: &mut FontSystem, text: &str, spec: &FontSpec) -> Buffer {
    let metrics = Metrics::new(spec.size_px, spec.size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);
    let family = spec
        .families
        .first()
        .map(|f| generic_family(f))
        .unwrap_or(Family::Monospace);
    let attrs = Attrs::new()
        .family(family)
        .weight(spec.weight)
        .style(spec.style);
    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);
    buffer
}

/// Sum of the shaped glyph advance widths.
pub fn measure(font_system: &mut FontSystem, text: &str, spec: &FontSpec) -> f32 {
    let buffer = shape(font_system, text, spec);
    let mut width = 0.0f32;
    for run in buffer.layout_runs() {
        let run_width: f32 = run.glyphs.iter().map(|g| g.w).sum();
        width = width.max(run_width);
    }
    width
}

/// Build a blob of positioned glyph outlines for `text`.
///
/// Glyphs with no outline (missing from every loaded face) contribute
/// nothing; an empty blob draws nothing.
pub fn make_blob(
    font_system: &mut FontSystem,
    cache: &mut SwashCache,
    text: &str,
    spec: &FontSpec,
) -> TextBlob {
    let buffer = shape(font_system, text, spec);
    let mut path = Path::new();
    let mut width = 0.0f32;

    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        for glyph in run.glyphs.iter() {
            let physical = glyph.physical((0.0, 0.0), 1.0);
            let glyph_x = glyph.x + glyph.font_size * glyph.x_offset;
            let glyph_y = glyph.y - glyph.font_size * glyph.y_offset;

            let Some(commands) = cache.get_outline_commands(font_system, physical.cache_key)
            else {
                continue;
            };
            // font outlines have y up, the canvas has y down
            for cmd in commands {
                match cmd {
                    Command::MoveTo(p) => path.move_to(glyph_x + p.x, glyph_y - p.y),
                    Command::LineTo(p) => path.line_to(glyph_x + p.x, glyph_y - p.y),
                    Command::QuadTo(c, p) => path.quad_to(
                        glyph_x + c.x,
                        glyph_y - c.y,
                        glyph_x + p.x,
                        glyph_y - p.y,
                    ),
                    Command::CurveTo(c1, c2, p) => path.cubic_to(
                        glyph_x + c1.x,
                        glyph_y - c1.y,
                        glyph_x + c2.x,
                        glyph_y - c2.y,
                        glyph_x + p.x,
                        glyph_y - p.y,
                    ),
                    Command::Close => path.close(),
                }
            }
        }
    }

    TextBlob { path, width }
}
