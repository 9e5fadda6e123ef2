//! Style enumerations and their string tables.
//!
//! The canvas contract speaks strings ("round", "evenodd", "source-over");
//! the raster layer speaks closed enums. The bidirectional tables live here
//! so both directions stay in one place.

use std::str::FromStr;

use crate::error::CanvasError;

/// Whether a paint fills or strokes geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

/// Line cap style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat edge at the endpoint.
    #[default]
    Butt,
    /// Rounded edge extending past the endpoint.
    Round,
    /// Square edge extending past the endpoint.
    Square,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }

    /// Parse a lineCap keyword; unrecognized values yield `None` so the
    /// setter can leave the previous cap unchanged.
    pub fn parse(s: &str) -> Option<LineCap> {
        match s {
            "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }
}

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        }
    }
}

impl From<LineCap> for kurbo::Cap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => kurbo::Cap::Butt,
            LineCap::Round => kurbo::Cap::Round,
            LineCap::Square => kurbo::Cap::Square,
        }
    }
}

/// Line join style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Sharp corner.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Beveled corner.
    Bevel,
}

impl LineJoin {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }

    /// Parse a lineJoin keyword; unrecognized values yield `None`.
    pub fn parse(s: &str) -> Option<LineJoin> {
        match s {
            "miter" => Some(LineJoin::Miter),
            "round" => Some(LineJoin::Round),
            "bevel" => Some(LineJoin::Bevel),
            _ => None,
        }
    }
}

impl From<LineJoin> for tiny_skia::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        }
    }
}

impl From<LineJoin> for kurbo::Join {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => kurbo::Join::Miter,
            LineJoin::Round => kurbo::Join::Round,
            LineJoin::Bevel => kurbo::Join::Bevel,
        }
    }
}

/// Fill rule determining inside/outside for self-intersecting paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Non-zero winding rule (default).
    #[default]
    NonZero,
    /// Even-odd rule.
    EvenOdd,
}

impl FillRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            FillRule::NonZero => "nonzero",
            FillRule::EvenOdd => "evenodd",
        }
    }
}

impl FromStr for FillRule {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nonzero" => Ok(FillRule::NonZero),
            "evenodd" => Ok(FillRule::EvenOdd),
            other => Err(CanvasError::InvalidFillRule(other.to_string())),
        }
    }
}

impl From<FillRule> for tiny_skia::FillRule {
    fn from(rule: FillRule) -> Self {
        match rule {
            FillRule::NonZero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        }
    }
}

/// Pixel-combination function used when drawing over existing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    Clear,
    Source,
    Destination,
    #[default]
    SourceOver,
    DestinationOver,
    SourceIn,
    DestinationIn,
    SourceOut,
    DestinationOut,
    SourceAtop,
    DestinationAtop,
    Xor,
    Plus,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Multiply,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// Map a globalCompositeOperation name to a blend mode.
    ///
    /// `Ok(None)` for an unrecognized name (the setter leaves state
    /// unchanged); `Err` for `plus-darker`, which is recognized but has no
    /// backend equivalent and must be reported rather than swallowed.
    pub fn from_composite_operation(op: &str) -> Result<Option<BlendMode>, CanvasError> {
        let mode = match op {
            // composite modes
            "source-over" => BlendMode::SourceOver,
            "destination-over" => BlendMode::DestinationOver,
            "copy" => BlendMode::Source,
            "destination" => BlendMode::Destination,
            "clear" => BlendMode::Clear,
            "source-in" => BlendMode::SourceIn,
            "destination-in" => BlendMode::DestinationIn,
            "source-out" => BlendMode::SourceOut,
            "destination-out" => BlendMode::DestinationOut,
            "source-atop" => BlendMode::SourceAtop,
            "destination-atop" => BlendMode::DestinationAtop,
            "xor" => BlendMode::Xor,
            "lighter" | "plus-lighter" => BlendMode::Plus,
            "plus-darker" => {
                return Err(CanvasError::UnsupportedCompositeOperation(op.to_string()))
            }
            // blend modes
            "multiply" => BlendMode::Multiply,
            "screen" => BlendMode::Screen,
            "overlay" => BlendMode::Overlay,
            "darken" => BlendMode::Darken,
            "lighten" => BlendMode::Lighten,
            "color-dodge" => BlendMode::ColorDodge,
            "color-burn" => BlendMode::ColorBurn,
            "hard-light" => BlendMode::HardLight,
            "soft-light" => BlendMode::SoftLight,
            "difference" => BlendMode::Difference,
            "exclusion" => BlendMode::Exclusion,
            "hue" => BlendMode::Hue,
            "saturation" => BlendMode::Saturation,
            "color" => BlendMode::Color,
            "luminosity" => BlendMode::Luminosity,
            _ => return Ok(None),
        };
        Ok(Some(mode))
    }

    /// The globalCompositeOperation name for this mode.
    pub fn composite_operation(&self) -> &'static str {
        match self {
            BlendMode::SourceOver => "source-over",
            BlendMode::DestinationOver => "destination-over",
            BlendMode::Source => "copy",
            BlendMode::Destination => "destination",
            BlendMode::Clear => "clear",
            BlendMode::SourceIn => "source-in",
            BlendMode::DestinationIn => "destination-in",
            BlendMode::SourceOut => "source-out",
            BlendMode::DestinationOut => "destination-out",
            BlendMode::SourceAtop => "source-atop",
            BlendMode::DestinationAtop => "destination-atop",
            BlendMode::Xor => "xor",
            BlendMode::Plus => "lighter",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
            BlendMode::Hue => "hue",
            BlendMode::Saturation => "saturation",
            BlendMode::Color => "color",
            BlendMode::Luminosity => "luminosity",
        }
    }
}

impl From<BlendMode> for tiny_skia::BlendMode {
    fn from(mode: BlendMode) -> Self {
        match mode {
            BlendMode::Clear => tiny_skia::BlendMode::Clear,
            BlendMode::Source => tiny_skia::BlendMode::Source,
            BlendMode::Destination => tiny_skia::BlendMode::Destination,
            BlendMode::SourceOver => tiny_skia::BlendMode::SourceOver,
            BlendMode::DestinationOver => tiny_skia::BlendMode::DestinationOver,
            BlendMode::SourceIn => tiny_skia::BlendMode::SourceIn,
            BlendMode::DestinationIn => tiny_skia::BlendMode::DestinationIn,
            BlendMode::SourceOut => tiny_skia::BlendMode::SourceOut,
            BlendMode::DestinationOut => tiny_skia::BlendMode::DestinationOut,
            BlendMode::SourceAtop => tiny_skia::BlendMode::SourceAtop,
            BlendMode::DestinationAtop => tiny_skia::BlendMode::DestinationAtop,
            BlendMode::Xor => tiny_skia::BlendMode::Xor,
            BlendMode::Plus => tiny_skia::BlendMode::Plus,
            BlendMode::Screen => tiny_skia::BlendMode::Screen,
            BlendMode::Overlay => tiny_skia::BlendMode::Overlay,
            BlendMode::Darken => tiny_skia::BlendMode::Darken,
            BlendMode::Lighten => tiny_skia::BlendMode::Lighten,
            BlendMode::ColorDodge => tiny_skia::BlendMode::ColorDodge,
            BlendMode::ColorBurn => tiny_skia::BlendMode::ColorBurn,
            BlendMode::HardLight => tiny_skia::BlendMode::HardLight,
            BlendMode::SoftLight => tiny_skia::BlendMode::SoftLight,
            BlendMode::Difference => tiny_skia::BlendMode::Difference,
            BlendMode::Exclusion => tiny_skia::BlendMode::Exclusion,
            BlendMode::Multiply => tiny_skia::BlendMode::Multiply,
            BlendMode::Hue => tiny_skia::BlendMode::Hue,
            BlendMode::Saturation => tiny_skia::BlendMode::Saturation,
            BlendMode::Color => tiny_skia::BlendMode::Color,
            BlendMode::Luminosity => tiny_skia::BlendMode::Luminosity,
        }
    }
}

/// How a pattern tiles its source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repetition {
    /// Tile in both directions (default).
    #[default]
    Repeat,
    /// Tile horizontally only.
    RepeatX,
    /// Tile vertically only.
    RepeatY,
    /// Draw the image once.
    NoRepeat,
}

impl FromStr for Repetition {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // the empty string selects the default, per the contract
            "repeat" | "" => Ok(Repetition::Repeat),
            "repeat-x" => Ok(Repetition::RepeatX),
            "repeat-y" => Ok(Repetition::RepeatY),
            "no-repeat" => Ok(Repetition::NoRepeat),
            other => Err(CanvasError::InvalidRepetition(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rule_round_trip() {
        assert_eq!("nonzero".parse::<FillRule>().unwrap(), FillRule::NonZero);
        assert_eq!("evenodd".parse::<FillRule>().unwrap(), FillRule::EvenOdd);
        assert!(matches!(
            "EvenOdd".parse::<FillRule>(),
            Err(CanvasError::InvalidFillRule(_))
        ));
        assert_eq!(FillRule::EvenOdd.as_str(), "evenodd");
    }

    #[test]
    fn test_composite_operation_table_round_trips() {
        for name in [
            "source-over",
            "destination-over",
            "copy",
            "destination",
            "clear",
            "source-in",
            "destination-in",
            "source-out",
            "destination-out",
            "source-atop",
            "destination-atop",
            "xor",
            "lighter",
            "multiply",
            "screen",
            "overlay",
            "darken",
            "lighten",
            "color-dodge",
            "color-burn",
            "hard-light",
            "soft-light",
            "difference",
            "exclusion",
            "hue",
            "saturation",
            "color",
            "luminosity",
        ] {
            let mode = BlendMode::from_composite_operation(name)
                .unwrap()
                .unwrap_or_else(|| panic!("{} should be recognized", name));
            assert_eq!(mode.composite_operation(), name);
        }
    }

    #[test]
    fn test_plus_lighter_aliases_lighter() {
        let mode = BlendMode::from_composite_operation("plus-lighter")
            .unwrap()
            .unwrap();
        assert_eq!(mode, BlendMode::Plus);
        assert_eq!(mode.composite_operation(), "lighter");
    }

    #[test]
    fn test_plus_darker_is_an_error_not_a_silent_ignore() {
        assert!(matches!(
            BlendMode::from_composite_operation("plus-darker"),
            Err(CanvasError::UnsupportedCompositeOperation(_))
        ));
    }

    #[test]
    fn test_unknown_composite_operation_is_none() {
        assert!(BlendMode::from_composite_operation("not-a-mode")
            .unwrap()
            .is_none());
        assert!(BlendMode::from_composite_operation("").unwrap().is_none());
    }

    #[test]
    fn test_line_cap_join_keywords() {
        assert_eq!(LineCap::parse("round"), Some(LineCap::Round));
        assert_eq!(LineCap::parse("ROUND"), None);
        assert_eq!(LineJoin::parse("bevel"), Some(LineJoin::Bevel));
        assert_eq!(LineJoin::parse(""), None);
    }

    #[test]
    fn test_repetition_keywords() {
        assert_eq!("repeat".parse::<Repetition>().unwrap(), Repetition::Repeat);
        assert_eq!("".parse::<Repetition>().unwrap(), Repetition::Repeat);
        assert_eq!(
            "no-repeat".parse::<Repetition>().unwrap(),
            Repetition::NoRepeat
        );
        assert!("diagonal".parse::<Repetition>().is_err());
    }
}
