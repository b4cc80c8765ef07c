use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use utils::generate_random_from;

use crate::color::{parse_hex, ColorError};

/// The fewest stops a gradient can be made of.
pub const MIN_STOPS: usize = 2;

const HEX_DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradientError {
    TooFewStops,
    TooManyStops { max: usize },
    AngleOutOfRange(u16),
    NoSuchStop(usize),
    InvalidColor(ColorError),
}

impl std::fmt::Display for GradientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            GradientError::TooFewStops => {
                write!(f, "A gradient needs at least {} color stops", MIN_STOPS)
            }
            GradientError::TooManyStops { max } => {
                write!(f, "A gradient can have at most {} color stops", max)
            }
            GradientError::AngleOutOfRange(a) => {
                write!(f, "Angle ({}) must be between 0 and 360 degrees", a)
            }
            GradientError::NoSuchStop(i) => write!(f, "Color stop {} does not exist", i),
            GradientError::InvalidColor(ref e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GradientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            GradientError::InvalidColor(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<ColorError> for GradientError {
    fn from(e: ColorError) -> Self {
        GradientError::InvalidColor(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialShape {
    Circle,
    Ellipse,
}

impl Default for RadialShape {
    fn default() -> Self {
        RadialShape::Circle
    }
}

impl std::fmt::Display for RadialShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            RadialShape::Circle => write!(f, "circle"),
            RadialShape::Ellipse => write!(f, "ellipse"),
        }
    }
}

fn default_angle() -> u16 {
    90
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GradientKind {
    Linear {
        #[serde(default = "default_angle")]
        angle: u16,
    },
    Radial {
        #[serde(default)]
        shape: RadialShape,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: String,
    /// Percentage along the gradient, `[0, 100]`.
    pub position: f64,
}

/// Clamp into `[0, 100]`, `-0.0` is normalized so it never renders as `-0%`.
fn clamp_position(position: f64) -> f64 {
    position.clamp(0.0, 100.0) + 0.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    #[serde(flatten)]
    pub kind: GradientKind,
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    /// Checks stop count, angle and colors, and clamps every position into range.
    pub fn validated(mut self, max_stops: usize) -> Result<Self, GradientError> {
        if self.stops.len() < MIN_STOPS {
            return Err(GradientError::TooFewStops);
        }
        if self.stops.len() > max_stops {
            return Err(GradientError::TooManyStops { max: max_stops });
        }
        if let GradientKind::Linear { angle } = self.kind {
            if angle > 360 {
                return Err(GradientError::AngleOutOfRange(angle));
            }
        }

        for stop in self.stops.iter_mut() {
            parse_hex(&stop.color)?;
            stop.color = stop.color.trim().to_owned();
            stop.position = clamp_position(stop.position);
        }

        Ok(self)
    }

    /// Stops in ascending position order, ties keep their original order.
    pub fn sorted_stops(&self) -> Vec<&ColorStop> {
        let mut stops: Vec<&ColorStop> = self.stops.iter().collect();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        stops
    }

    /// The gradient function, e.g. `linear-gradient(90deg, #FF512F 0%, #F09819 100%)`.
    pub fn css(&self) -> String {
        let color_stops = self
            .sorted_stops()
            .iter()
            .map(|s| format!("{} {}%", s.color, s.position))
            .collect::<Vec<String>>()
            .join(", ");

        match self.kind {
            GradientKind::Linear { angle } => format!("linear-gradient({}deg, {})", angle, color_stops),
            GradientKind::Radial { shape } => format!("radial-gradient({}, {})", shape, color_stops),
        }
    }

    /// A copyable css snippet, including the vendor prefixed forms.
    pub fn css_code(&self) -> String {
        let gradient = self.css();
        format!(
            "background: {g};\nbackground: -webkit-{g};\nbackground: -moz-{g};",
            g = gradient
        )
    }

    pub fn add_stop(&mut self, max_stops: usize) -> Result<(), GradientError> {
        self.add_stop_with_rng(max_stops, &mut thread_rng())
    }

    /// Append a stop past the current last one. With two or more stops the new color is the blend
    /// of the last two, otherwise a random color is placed at the midpoint.
    pub fn add_stop_with_rng<R: Rng + ?Sized>(
        &mut self,
        max_stops: usize,
        rng: &mut R,
    ) -> Result<(), GradientError> {
        if self.stops.len() >= max_stops {
            return Err(GradientError::TooManyStops { max: max_stops });
        }

        let stop = match self.sorted_stops().as_slice() {
            [.., second_last, last] => {
                let position = (last.position + (last.position - second_last.position) / 2.0).min(100.0);
                let color = parse_hex(&last.color)?
                    .blend(&parse_hex(&second_last.color)?)
                    .to_hex();
                ColorStop { color, position }
            }
            _ => ColorStop {
                color: random_color(rng),
                position: 50.0,
            },
        };

        self.stops.push(stop);
        Ok(())
    }

    /// Remove the stop at `index`, a gradient never drops below two stops.
    pub fn remove_stop(&mut self, index: usize) -> Result<ColorStop, GradientError> {
        if index >= self.stops.len() {
            return Err(GradientError::NoSuchStop(index));
        }
        if self.stops.len() <= MIN_STOPS {
            return Err(GradientError::TooFewStops);
        }
        Ok(self.stops.remove(index))
    }

    pub fn set_position(&mut self, index: usize, position: f64) -> Result<(), GradientError> {
        let stop = self
            .stops
            .get_mut(index)
            .ok_or(GradientError::NoSuchStop(index))?;
        stop.position = clamp_position(position);
        Ok(())
    }
}

/// A random upper-case `#RRGGBB` color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{}", generate_random_from(&HEX_DIGITS, 6, rng))
}

/// A named, ready made gradient.
#[derive(Debug, Clone, Copy)]
pub struct GradientTemplate {
    pub name: &'static str,
    pub colors: &'static [&'static str],
    pub kind: GradientKind,
}

impl GradientTemplate {
    /// Build the gradient, spreading the colors evenly from 0% to 100%.
    pub fn gradient(&self) -> Gradient {
        let step = 100.0 / (self.colors.len().max(2) - 1) as f64;
        let stops = self
            .colors
            .iter()
            .enumerate()
            .map(|(i, c)| ColorStop {
                color: String::from(*c),
                position: i as f64 * step,
            })
            .collect();

        Gradient {
            kind: self.kind,
            stops,
        }
    }
}

pub const TEMPLATES: [GradientTemplate; 7] = [
    GradientTemplate {
        name: "Sunset",
        colors: &["#FF512F", "#F09819"],
        kind: GradientKind::Linear { angle: 90 },
    },
    GradientTemplate {
        name: "Blue Lagoon",
        colors: &["#43C6AC", "#191654"],
        kind: GradientKind::Linear { angle: 45 },
    },
    GradientTemplate {
        name: "Purple Love",
        colors: &["#CC2B5E", "#753A88"],
        kind: GradientKind::Linear { angle: 135 },
    },
    GradientTemplate {
        name: "Green to Blue",
        colors: &["#11998e", "#38ef7d"],
        kind: GradientKind::Linear { angle: 90 },
    },
    GradientTemplate {
        name: "Rainbow",
        colors: &[
            "#FF0000", "#FF7F00", "#FFFF00", "#00FF00", "#0000FF", "#4B0082", "#8B00FF",
        ],
        kind: GradientKind::Linear { angle: 90 },
    },
    GradientTemplate {
        name: "Ocean",
        colors: &["#1A2980", "#26D0CE"],
        kind: GradientKind::Radial {
            shape: RadialShape::Circle,
        },
    },
    GradientTemplate {
        name: "Peach",
        colors: &["#ED4264", "#FFEDBC"],
        kind: GradientKind::Linear { angle: 315 },
    },
];
