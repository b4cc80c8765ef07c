//! Random password generation with selectable character classes.

use std::ops::RangeInclusive;

use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize, Serializer};
use utils::generate_random_from;

pub const UPPERCASE_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBER_CHARS: &str = "0123456789";
pub const SYMBOL_CHARS: &str = "!@#$%^&*()_-+={}[]|:;<>,.?/~";

/// A group of characters that a password may be required to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Uppercase,
    Lowercase,
    Number,
    Symbol,
}

impl CharClass {
    pub fn chars(&self) -> &'static str {
        match *self {
            CharClass::Uppercase => UPPERCASE_CHARS,
            CharClass::Lowercase => LOWERCASE_CHARS,
            CharClass::Number => NUMBER_CHARS,
            CharClass::Symbol => SYMBOL_CHARS,
        }
    }

    fn found_in(&self, password: &str) -> bool {
        let set = self.chars();
        password.chars().any(|c| set.contains(c))
    }
}

fn default_length() -> usize {
    16
}

fn enabled() -> bool {
    true
}

/// The options a user may select when generating a password. Every class is enabled by default.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PasswordOptions {
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default = "enabled")]
    pub uppercase: bool,
    #[serde(default = "enabled")]
    pub lowercase: bool,
    #[serde(default = "enabled")]
    pub numbers: bool,
    #[serde(default = "enabled")]
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        PasswordOptions {
            length: default_length(),
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

impl PasswordOptions {
    /// The character classes selected, in a stable order.
    pub fn classes(&self) -> Vec<CharClass> {
        [
            (self.uppercase, CharClass::Uppercase),
            (self.lowercase, CharClass::Lowercase),
            (self.numbers, CharClass::Number),
            (self.symbols, CharClass::Symbol),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, class)| *class)
        .collect()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PasswordError {
    NoCharacterClass,
    InvalidLength { min: usize, max: usize },
    /// Every selected class must appear at least once, which cannot fit in the requested length.
    TooShortForClasses { length: usize, classes: usize },
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            PasswordError::NoCharacterClass => write!(f, "Please select at least one character type"),
            PasswordError::InvalidLength { min, max } => write!(
                f,
                "Password length must be between {} and {} characters",
                min, max
            ),
            PasswordError::TooShortForClasses { length, classes } => write!(
                f,
                "A password of {} characters cannot contain all {} selected character types",
                length, classes
            ),
        }
    }
}

impl std::error::Error for PasswordError {}

/// Generate a password using the thread-local rng.
pub fn generate(
    options: &PasswordOptions,
    allowed_lengths: RangeInclusive<usize>,
) -> Result<String, PasswordError> {
    generate_with_rng(options, allowed_lengths, &mut thread_rng())
}

/// Generate a password, drawing every character uniformly from the union of the selected classes.
/// The draw is repeated until the password holds at least one character of every selected class.
pub fn generate_with_rng<R: Rng + ?Sized>(
    options: &PasswordOptions,
    allowed_lengths: RangeInclusive<usize>,
    rng: &mut R,
) -> Result<String, PasswordError> {
    let classes = options.classes();
    if classes.is_empty() {
        return Err(PasswordError::NoCharacterClass);
    }

    if !allowed_lengths.contains(&options.length) {
        return Err(PasswordError::InvalidLength {
            min: *allowed_lengths.start(),
            max: *allowed_lengths.end(),
        });
    }
    if options.length < classes.len() {
        return Err(PasswordError::TooShortForClasses {
            length: options.length,
            classes: classes.len(),
        });
    }

    let pool: Vec<char> = classes.iter().flat_map(|c| c.chars().chars()).collect();

    loop {
        let candidate = generate_random_from(&pool, options.length, rng);
        if classes.iter().all(|c| c.found_in(&candidate)) {
            return Ok(candidate);
        }
    }
}

/// A rough strength rating, based solely on the length of a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_length(length: usize) -> Self {
        match length {
            0..=7 => Strength::VeryWeak,
            8..=11 => Strength::Weak,
            12..=15 => Strength::Medium,
            16..=19 => Strength::Strong,
            _ => Strength::VeryStrong,
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match *self {
            Strength::VeryWeak => "Very Weak",
            Strength::Weak => "Weak",
            Strength::Medium => "Medium",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        };
        write!(f, "{}", text)
    }
}

impl Serialize for Strength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn respects_length_and_classes() {
        let mut rng = StdRng::seed_from_u64(42);

        for length in 4..=100 {
            let options = PasswordOptions {
                length,
                ..Default::default()
            };
            let password = generate_with_rng(&options, 4..=100, &mut rng).expect("a password");

            assert_eq!(password.chars().count(), length);
            assert!(password.chars().any(|c| c.is_ascii_uppercase()));
            assert!(password.chars().any(|c| c.is_ascii_lowercase()));
            assert!(password.chars().any(|c| c.is_ascii_digit()));
            assert!(password.chars().any(|c| SYMBOL_CHARS.contains(c)));
        }
    }

    #[test]
    fn only_selected_classes_are_used() {
        let options = PasswordOptions {
            length: 40,
            uppercase: false,
            lowercase: false,
            numbers: true,
            symbols: false,
        };

        let password = generate(&options, 4..=100).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn rejects_invalid_options() {
        let none = PasswordOptions {
            uppercase: false,
            lowercase: false,
            numbers: false,
            symbols: false,
            ..Default::default()
        };
        assert_eq!(generate(&none, 4..=100), Err(PasswordError::NoCharacterClass));

        let short = PasswordOptions {
            length: 3,
            ..Default::default()
        };
        let err = generate(&short, 4..=100).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Password length must be between 4 and 100 characters"
        );

        let long = PasswordOptions {
            length: 101,
            ..Default::default()
        };
        assert!(generate(&long, 4..=100).is_err());

        let cramped = PasswordOptions {
            length: 2,
            ..Default::default()
        };
        assert_eq!(
            generate(&cramped, 1..=100),
            Err(PasswordError::TooShortForClasses {
                length: 2,
                classes: 4
            })
        );
    }

    #[test]
    fn strength_thresholds() {
        assert_eq!(Strength::from_length(4), Strength::VeryWeak);
        assert_eq!(Strength::from_length(8), Strength::Weak);
        assert_eq!(Strength::from_length(12), Strength::Medium);
        assert_eq!(Strength::from_length(16), Strength::Strong);
        assert_eq!(Strength::from_length(19), Strength::Strong);
        assert_eq!(Strength::from_length(20), Strength::VeryStrong);
        assert_eq!(
            serde_json::to_string(&Strength::VeryStrong).unwrap(),
            "\"Very Strong\""
        );
    }

    #[test]
    fn options_default_when_omitted() {
        let options: PasswordOptions = serde_json::from_str("{\"length\": 20}").unwrap();
        assert_eq!(
            options,
            PasswordOptions {
                length: 20,
                ..Default::default()
            }
        );
    }
}
