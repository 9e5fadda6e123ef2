//! Color parsing and serialisation.
//!
//! Colors are four float channels, each conceptually in [0, 1]. Parsing is
//! delegated to `csscolorparser` (hex, functional and named forms);
//! serialisation reproduces the canvas rules exactly:
//! <https://html.spec.whatwg.org/multipage/canvas.html#serialisation-of-a-color>

use crate::error::{CanvasError, CanvasResult};

/// An RGBA color with float channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0, 1.0);
}

impl From<Color> for tiny_skia::Color {
    fn from(c: Color) -> Self {
        tiny_skia::Color::from_rgba(
            c.r.clamp(0.0, 1.0),
            c.g.clamp(0.0, 1.0),
            c.b.clamp(0.0, 1.0),
            c.a.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::BLACK)
    }
}

/// Parse a CSS color string.
///
/// Unparseable input is a recoverable failure; callers pick the fallback
/// (property setters keep the previous value).
pub fn parse_color(s: &str) -> CanvasResult<Color> {
    let parsed =
        csscolorparser::parse(s).map_err(|e| CanvasError::ColorParse(format!("{}: {}", s, e)))?;
    let [r, g, b, a] = parsed.to_array();
    Ok(Color::new(r, g, b, a))
}

/// Serialise a color the way the canvas contract requires: lowercase
/// `#rrggbb` when the color is opaque, otherwise `rgba(r, g, b, a)` with
/// the alpha formatted as `0`, `1`, or fixed to 8 decimal places.
pub fn color_to_string(color: Color) -> String {
    let r = (color.r * 255.0).clamp(0.0, 255.0).round() as u8;
    let g = (color.g * 255.0).clamp(0.0, 255.0).round() as u8;
    let b = (color.b * 255.0).clamp(0.0, 255.0).round() as u8;
    if color.a == 1.0 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        let a = if color.a == 0.0 || color.a == 1.0 {
            format!("{}", color.a as i32)
        } else {
            format!("{:.8}", color.a)
        };
        format!("rgba({}, {}, {}, {})", r, g, b, a)
    }
}

/// A copy of `color` with its alpha scaled by `alpha` and clamped to
/// [0, 1]. Pure: style properties may be shared, so the input is never
/// mutated.
pub fn multiply_by_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: (color.a * alpha).clamp(0.0, 1.0),
        ..color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#ff0000", "#ff0000")]
    #[case("#f00", "#ff0000")]
    #[case("rgb(0, 128, 255)", "#0080ff")]
    #[case("red", "#ff0000")]
    #[case("black", "#000000")]
    fn test_opaque_colors_serialise_as_hex(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(color_to_string(parse_color(input).unwrap()), expected);
    }

    #[test]
    fn test_translucent_colors_serialise_as_rgba() {
        let c = parse_color("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(color_to_string(c), "rgba(255, 0, 0, 0.50000000)");

        let transparent = parse_color("rgba(10, 20, 30, 0)").unwrap();
        assert_eq!(color_to_string(transparent), "rgba(10, 20, 30, 0)");
    }

    #[test]
    fn test_parse_failure_is_recoverable() {
        assert!(matches!(
            parse_color("definitely not a color"),
            Err(CanvasError::ColorParse(_))
        ));
    }

    #[test]
    fn test_multiply_by_alpha_is_pure_and_clamped() {
        let c = Color::new(0.5, 0.5, 0.5, 0.8);
        let half = multiply_by_alpha(c, 0.5);
        assert_eq!(half.a, 0.4);
        assert_eq!(c.a, 0.8);

        assert_eq!(multiply_by_alpha(c, 10.0).a, 1.0);
        assert_eq!(multiply_by_alpha(c, -1.0).a, 0.0);
    }

    #[test]
    fn test_constants() {
        assert_eq!(color_to_string(Color::RED), "#ff0000");
        assert_eq!(color_to_string(Color::TRANSPARENT), "rgba(0, 0, 0, 0)");
    }
}
