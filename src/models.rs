//! Request and response bodies for the api.

use colors::{Gradient, Harmony, Palette};
use config::Config;
use converter::{ConversionError, ConversionOptions};
use matcher::{LineResult, MatchLimits, Segment};
use password::Strength;
use serde::{Deserialize, Serialize};

/// An entry in the catalogue of tools served by the api.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Tool {
    pub name: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

pub const TOOLS: [Tool; 8] = [
    Tool {
        name: "Password Generator",
        path: "/api/v1/password",
        description: "Generate strong, random passwords with custom options",
    },
    Tool {
        name: "Color Palette",
        path: "/api/v1/palette",
        description: "Create harmonious color palettes from a base color",
    },
    Tool {
        name: "CSS Gradient",
        path: "/api/v1/gradient",
        description: "Build linear and radial css gradients",
    },
    Tool {
        name: "CSV / JSON Converter",
        path: "/api/v1/convert/<from>/<to>",
        description: "Convert between csv and json",
    },
    Tool {
        name: "Image to Data URI",
        path: "/api/v1/data-uri",
        description: "Encode an image as a base64 data uri",
    },
    Tool {
        name: "Markdown Previewer",
        path: "/api/v1/markdown",
        description: "Render markdown as html",
    },
    Tool {
        name: "Regex Tester",
        path: "/api/v1/regex",
        description: "Test regular expressions against text, line by line",
    },
    Tool {
        name: "URL Shortener",
        path: "/api/v1/shorten",
        description: "Create short links (demo only, links are not stored)",
    },
];

#[derive(Debug, Serialize)]
pub struct PasswordResponse {
    pub password: String,
    pub length: usize,
    pub strength: Strength,
}

#[derive(Debug, Deserialize)]
pub struct PaletteRequest {
    pub color: String,
    #[serde(default)]
    pub harmony: Harmony,
}

#[derive(Debug, Serialize)]
pub struct PaletteResponse {
    #[serde(flatten)]
    pub palette: Palette,
    pub joined: String,
}

impl From<Palette> for PaletteResponse {
    fn from(palette: Palette) -> Self {
        PaletteResponse {
            joined: palette.joined(),
            palette,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HarmonyInfo {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GradientResponse {
    pub css: String,
    pub code: String,
    pub gradient: Gradient,
}

impl From<Gradient> for GradientResponse {
    fn from(gradient: Gradient) -> Self {
        GradientResponse {
            css: gradient.css(),
            code: gradient.css_code(),
            gradient,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub name: &'static str,
    pub css: String,
    pub gradient: Gradient,
}

fn default_delimiter() -> String {
    String::from(",")
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub input: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "enabled")]
    pub has_header: bool,
}

impl ConvertRequest {
    /// Build conversion options, limiting the input to `max_input_bytes`.
    pub fn options(&self, max_input_bytes: usize) -> Result<ConversionOptions, ConversionError> {
        Ok(ConversionOptions {
            delimiter: ConversionOptions::parse_delimiter(&self.delimiter)?,
            has_header: self.has_header,
            max_input_bytes: Some(max_input_bytes),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub from: String,
    pub to: String,
    pub output: String,
}

#[derive(Debug, Deserialize)]
pub struct MarkdownRequest {
    pub markdown: String,
}

#[derive(Debug, Serialize)]
pub struct MarkdownResponse {
    pub html: String,
}

fn default_flags() -> String {
    String::from("g")
}

#[derive(Debug, Deserialize)]
pub struct RegexRequest {
    pub pattern: String,
    #[serde(default = "default_flags")]
    pub flags: String,
    #[serde(default)]
    pub text: String,
}

impl RegexRequest {
    pub fn limits(cfg: &Config) -> MatchLimits {
        MatchLimits {
            max_pattern_length: cfg.REGEX_MAX_PATTERN_LENGTH(),
            size_limit: cfg.REGEX_SIZE_LIMIT_BYTES(),
        }
    }
}

/// A tested line, along with the segments needed to highlight it.
#[derive(Debug, Serialize)]
pub struct LineView {
    #[serde(flatten)]
    pub result: LineResult,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Serialize)]
pub struct RegexResponse {
    pub match_count: usize,
    pub lines: Vec<LineView>,
}

impl From<Vec<LineResult>> for RegexResponse {
    fn from(results: Vec<LineResult>) -> Self {
        let lines: Vec<LineView> = results
            .into_iter()
            .map(|result| LineView {
                segments: result.segments(),
                result,
            })
            .collect();

        RegexResponse {
            match_count: lines.iter().map(|l| l.result.matches.len()).sum(),
            lines,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}
