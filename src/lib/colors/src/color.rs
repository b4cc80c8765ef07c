use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    InvalidHex(String),
    UnknownHarmony(String),
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ColorError::InvalidHex(ref s) => write!(f, "Invalid hex color ({})", s),
            ColorError::UnknownHarmony(ref s) => write!(f, "Unknown color harmony ({})", s),
        }
    }
}

impl std::error::Error for ColorError {}

/// Rounds halves towards positive infinity, so `-7.5` becomes `-7` and `2.5` becomes `3`.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// An 8-bit per channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Lower-case `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The per-channel midpoint of two colors, rounded down.
    pub fn blend(&self, other: &Rgb) -> Rgb {
        let mid = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
        Rgb {
            r: mid(self.r, other.r),
            g: mid(self.g, other.g),
            b: mid(self.b, other.b),
        }
    }
}

/// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb`, ignoring case and surrounding whitespace.
pub fn parse_hex(input: &str) -> Result<Rgb, ColorError> {
    let invalid = || ColorError::InvalidHex(input.to_owned());
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        6 => digits.to_owned(),
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => return Err(invalid()),
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

/// Hue in whole degrees `[0, 360)`, saturation and lightness as percentages with one decimal place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Hsl { h, s, l }
    }

    /// Rotate the hue by `degrees`, wrapping around the color wheel.
    pub fn rotate(&self, degrees: f64) -> Hsl {
        Hsl {
            h: (self.h + degrees).rem_euclid(360.0),
            ..*self
        }
    }

    /// Shift the saturation by `amount` percentage points, clamped to `[0, 100]`.
    pub fn saturate(&self, amount: f64) -> Hsl {
        Hsl {
            s: (self.s + amount).clamp(0.0, 100.0),
            ..*self
        }
    }

    /// Shift the lightness by `amount` percentage points, clamped to `[0, 100]`.
    pub fn lighten(&self, amount: f64) -> Hsl {
        Hsl {
            l: (self.l + amount).clamp(0.0, 100.0),
            ..*self
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        let h = self.h.rem_euclid(360.0);
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        let channel = |v: f64| round_half_up((v + m) * 255.0).clamp(0.0, 255.0) as u8;
        Rgb {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    pub fn to_hex(&self) -> String {
        self.to_rgb().to_hex()
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r as f64 / 255.0;
        let g = rgb.g as f64 / 255.0;
        let b = rgb.b as f64 / 255.0;

        let cmin = r.min(g).min(b);
        let cmax = r.max(g).max(b);
        let delta = cmax - cmin;

        let h = if delta == 0.0 {
            0.0
        } else if cmax == r {
            ((g - b) / delta) % 6.0
        } else if cmax == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        let h = round_half_up(h * 60.0).rem_euclid(360.0);
        let l = (cmax + cmin) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * l - 1.0).abs())
        };

        Hsl {
            h,
            s: round_to_tenth(s * 100.0),
            l: round_to_tenth(l * 100.0),
        }
    }
}
