use std::{convert::TryFrom, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::color::{parse_hex, ColorError, Hsl};

/// A rule for deriving related colors from a base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Harmony {
    Analogous,
    Monochromatic,
    Complementary,
    Triadic,
    SplitComplementary,
    Tetradic,
}

impl Harmony {
    pub const ALL: [Harmony; 6] = [
        Harmony::Analogous,
        Harmony::Monochromatic,
        Harmony::Complementary,
        Harmony::Triadic,
        Harmony::SplitComplementary,
        Harmony::Tetradic,
    ];

    pub fn name(&self) -> &'static str {
        match *self {
            Harmony::Analogous => "Analogous",
            Harmony::Monochromatic => "Monochromatic",
            Harmony::Complementary => "Complementary",
            Harmony::Triadic => "Triadic",
            Harmony::SplitComplementary => "Split Complementary",
            Harmony::Tetradic => "Tetradic",
        }
    }

    pub fn description(&self) -> &'static str {
        match *self {
            Harmony::Analogous => "Colors that are adjacent to each other on the color wheel",
            Harmony::Monochromatic => "Various shades and tints of a single color",
            Harmony::Complementary => "Colors that are opposite each other on the color wheel",
            Harmony::Triadic => "Three colors that are evenly spaced around the color wheel",
            Harmony::SplitComplementary => "A color and two colors adjacent to its complement",
            Harmony::Tetradic => "Four colors arranged into two complementary pairs",
        }
    }
}

impl Default for Harmony {
    fn default() -> Self {
        Harmony::Analogous
    }
}

impl std::fmt::Display for Harmony {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts the display name as well as kebab or snake case, ignoring case.
impl FromStr for Harmony {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(|c: char| c == '-' || c == '_', " ");
        Harmony::ALL
            .iter()
            .find(|h| h.name().to_lowercase() == normalized)
            .copied()
            .ok_or_else(|| ColorError::UnknownHarmony(s.to_owned()))
    }
}

impl TryFrom<String> for Harmony {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Harmony {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A generated set of colors, the base color is always included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub base: String,
    pub harmony: Harmony,
    pub colors: Vec<String>,
}

impl Palette {
    /// All colors in a single copyable line, e.g. `#aaaaaa, #bbbbbb`.
    pub fn joined(&self) -> String {
        self.colors.join(", ")
    }
}

/// Generate a five color palette for the provided base color.
pub fn generate_palette(base: &str, harmony: Harmony) -> Result<Palette, ColorError> {
    let rgb = parse_hex(base)?;
    let base_hex = rgb.to_hex();
    let hsl = Hsl::from(rgb);

    let shifted = |degrees: f64| hsl.rotate(degrees).to_hex();

    let colors = match harmony {
        Harmony::Analogous => vec![
            shifted(-30.0),
            base_hex.clone(),
            shifted(30.0),
            shifted(60.0),
            shifted(90.0),
        ],
        Harmony::Monochromatic => vec![
            hsl.lighten(-30.0).to_hex(),
            hsl.lighten(-15.0).to_hex(),
            base_hex.clone(),
            hsl.lighten(15.0).to_hex(),
            hsl.lighten(30.0).to_hex(),
        ],
        Harmony::Complementary => vec![
            hsl.lighten(-10.0).to_hex(),
            base_hex.clone(),
            hsl.saturate(-20.0).to_hex(),
            hsl.rotate(180.0).saturate(-20.0).to_hex(),
            shifted(180.0),
        ],
        Harmony::Triadic => vec![
            base_hex.clone(),
            shifted(120.0),
            shifted(240.0),
            shifted(60.0),
            shifted(300.0),
        ],
        Harmony::SplitComplementary => vec![
            base_hex.clone(),
            shifted(150.0),
            shifted(210.0),
            shifted(30.0),
            shifted(330.0),
        ],
        Harmony::Tetradic => vec![
            base_hex.clone(),
            shifted(90.0),
            shifted(180.0),
            shifted(270.0),
            shifted(45.0),
        ],
    };

    Ok(Palette {
        base: base_hex,
        harmony,
        colors,
    })
}
