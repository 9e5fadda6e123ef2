//! CSS font shorthand parsing.
//!
//! Parses strings like `"12px monospace"` or
//! `"italic bold 14pt 'Times New Roman', serif"` into the descriptors the
//! text layer matches against the font database. Line-height is ignored,
//! per the contract.

use std::sync::OnceLock;

use cosmic_text::{Style, Weight};
use regex::Regex;

/// Parsed font descriptors from a CSS font shorthand.
#[derive(Debug, Clone)]
pub struct FontSpec {
    /// Font style (normal, italic, oblique).
    pub style: Style,
    /// Font weight (100-900 or keywords like bold).
    pub weight: Weight,
    /// Font size in px; this is the em width.
    pub size_px: f32,
    /// Font families in order of preference.
    pub families: Vec<String>,
}

impl Default for FontSpec {
    fn default() -> Self {
        // the context starts out with "10px monospace"
        Self {
            style: Style::Normal,
            weight: Weight::NORMAL,
            size_px: 10.0,
            families: vec!["monospace".to_string()],
        }
    }
}

/// Em size used for relative units.
const DEFAULT_HEIGHT: f32 = 16.0;

fn font_string_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(italic|oblique|normal|)\s*",                // style
            r"(small-caps|normal|)\s*",                    // variant
            r"(bold|bolder|lighter|[1-9]00|normal|)\s*",   // weight
            r"([\d\.]+)",                                  // size
            r"(px|pt|pc|in|cm|mm|%|em|ex|ch|rem|q)",       // unit
            r"(.+)",                                       // family
        ))
        .expect("font shorthand pattern is a valid regex")
    })
}

/// Parse a CSS font shorthand.
///
/// Returns `None` when the string does not match the shorthand grammar;
/// the font setter then keeps the previous font, as the contract requires.
pub fn parse_font_string(font_str: &str) -> Option<FontSpec> {
    let caps = font_string_regex().captures(font_str)?;

    let size: f32 = caps[4].parse().ok()?;
    let size_px = match &caps[5] {
        "em" | "rem" => size * DEFAULT_HEIGHT,
        "pt" => size * 4.0 / 3.0,
        "px" => size,
        "pc" => size * DEFAULT_HEIGHT,
        "in" => size * 96.0,
        "cm" => size * 96.0 / 2.54,
        "mm" => size * 96.0 / 25.4,
        // quarter millimeters
        "q" => size * 96.0 / 25.4 / 4.0,
        "%" => size * DEFAULT_HEIGHT / 75.0,
        _ => DEFAULT_HEIGHT,
    };

    let style = match &caps[1] {
        "italic" => Style::Italic,
        "oblique" => Style::Oblique,
        _ => Style::Normal,
    };

    let weight = match &caps[3] {
        "bold" => Weight::BOLD,
        "bolder" => Weight::EXTRA_BOLD,
        "lighter" => Weight::LIGHT,
        numeric => numeric
            .parse::<u16>()
            .map(Weight)
            .unwrap_or(Weight::NORMAL),
    };

    let families: Vec<String> = caps[6]
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|f| !f.is_empty())
        .collect();
    if families.is_empty() {
        return None;
    }

    Some(FontSpec {
        style,
        weight,
        size_px,
        families,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_simple() {
        let spec = parse_font_string("10px monospace").unwrap();
        assert_eq!(spec.size_px, 10.0);
        assert_eq!(spec.families, vec!["monospace"]);
        assert_eq!(spec.style, Style::Normal);
        assert_eq!(spec.weight, Weight::NORMAL);
    }

    #[test]
    fn test_parse_full_shorthand() {
        let spec = parse_font_string("italic bold 12pt 'Times New Roman', serif").unwrap();
        assert_eq!(spec.style, Style::Italic);
        assert_eq!(spec.weight, Weight::BOLD);
        assert_eq!(spec.size_px, 16.0);
        assert_eq!(spec.families, vec!["Times New Roman", "serif"]);
    }

    #[test]
    fn test_parse_numeric_weight() {
        let spec = parse_font_string("300 20px sans-serif").unwrap();
        assert_eq!(spec.weight, Weight(300));
    }

    #[rstest]
    #[case("2em Arial", 32.0)]
    #[case("1.5rem Arial", 24.0)]
    #[case("1in Arial", 96.0)]
    #[case("2.54cm Arial", 96.0)]
    #[case("25.4mm Arial", 96.0)]
    #[case("75% Arial", 16.0)]
    fn test_unit_conversions(#[case] input: &str, #[case] expected_px: f32) {
        let spec = parse_font_string(input).unwrap();
        assert!(
            (spec.size_px - expected_px).abs() < 1e-3,
            "{}: got {}",
            input,
            spec.size_px
        );
    }

    #[test]
    fn test_invalid_strings_return_none() {
        assert!(parse_font_string("").is_none());
        assert!(parse_font_string("monospace").is_none());
        assert!(parse_font_string("bold italic").is_none());
    }
}
