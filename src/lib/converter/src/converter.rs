use rocket::{
    error,
    fairing::AdHoc,
    http::Status,
    info,
    request::{self, FromRequest},
    Request,
};
use std::collections::HashMap;
use utils::format_bytes;

#[derive(Debug)]
pub enum ConversionError {
    EmptyCsv,
    NotArrayOfObjects,
    InvalidJson(serde_json::Error),
    InvalidDelimiter(String),
    InputTooLarge { max: usize },
    Unsupported { from: String, to: String },
    NotImage,
    EmptyFile,
    TooLarge { max: u64 },
    Other(String),
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::EmptyCsv => write!(f, "CSV is empty"),
            Self::NotArrayOfObjects => write!(f, "JSON must be an array of objects"),
            Self::InvalidJson(ref e) => write!(f, "Invalid JSON: {}", e),
            Self::InvalidDelimiter(ref d) => {
                write!(f, "Delimiter must be a single character other than a quote or newline, found ({})", d)
            }
            Self::InputTooLarge { max } => {
                write!(f, "Input exceeds the maximum size of {}", format_bytes(max as u64, 2))
            }
            Self::Unsupported { ref from, ref to } => {
                write!(f, "Conversion from {} to {} is not supported", from, to)
            }
            Self::NotImage => write!(f, "Please select an image file."),
            Self::EmptyFile => write!(f, "The selected file is empty."),
            Self::TooLarge { max } => write!(f, "File size exceeds {} limit.", format_bytes(max, 2)),
            Self::Other(ref s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Self::InvalidJson(ref e) => Some(e),
            _ => None,
        }
    }
}

impl ConversionError {
    /// Whether the error was caused by the input, rather than by the server.
    pub fn is_user_error(&self) -> bool {
        !matches!(*self, Self::Other(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    pub delimiter: char,
    pub has_header: bool,
    /// Inputs longer than this many bytes are refused, if set.
    pub max_input_bytes: Option<usize>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            delimiter: ',',
            has_header: true,
            max_input_bytes: None,
        }
    }
}

impl ConversionOptions {
    /// Parse a user supplied delimiter, which must be exactly one character.
    pub fn parse_delimiter(delimiter: &str) -> Result<char, ConversionError> {
        let mut chars = delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '"' && c != '\n' && c != '\r' => Ok(c),
            _ => Err(ConversionError::InvalidDelimiter(delimiter.to_owned())),
        }
    }
}

/// A single text to text conversion, such as csv to json.
pub trait Conversion: Send + Sync {
    fn name(&self) -> &str;
    /// The input format, e.g. `csv`.
    fn from(&self) -> &str;
    /// The output format, e.g. `json`.
    fn to(&self) -> &str;
    fn convert(&self, input: &str, options: &ConversionOptions) -> Result<String, ConversionError>;
}

pub struct Converter {
    subs: HashMap<(String, String), Box<dyn Conversion>>,
}

impl Converter {
    pub fn new(subs: Vec<Box<dyn Conversion>>) -> Self {
        let subs = subs
            .into_iter()
            .map(|s| ((s.from().to_lowercase(), s.to().to_lowercase()), s))
            .collect();
        Converter { subs }
    }

    pub fn fairing(subs: Vec<Box<dyn Conversion>>) -> AdHoc {
        AdHoc::on_ignite("Format Converter", |rocket| {
            Box::pin(async move {
                let converter = Converter::new(subs);
                for (from, to) in converter.supported() {
                    info!("registered conversion {} -> {}", from, to);
                }
                rocket.manage(converter)
            })
        })
    }

    /// All supported `(from, to)` pairs, sorted.
    pub fn supported(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .subs
            .keys()
            .map(|(f, t)| (f.as_str(), t.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn is_supported(&self, from: &str, to: &str) -> bool {
        self.subs
            .contains_key(&(from.to_lowercase(), to.to_lowercase()))
    }

    pub fn convert(
        &self,
        from: &str,
        to: &str,
        input: &str,
        options: &ConversionOptions,
    ) -> Result<String, ConversionError> {
        let sub = self
            .subs
            .get(&(from.to_lowercase(), to.to_lowercase()))
            .ok_or_else(|| ConversionError::Unsupported {
                from: from.to_owned(),
                to: to.to_owned(),
            })?;

        if let Some(max) = options.max_input_bytes {
            if input.len() > max {
                return Err(ConversionError::InputTooLarge { max });
            }
        }

        sub.convert(input, options).map_err(|e| {
            error!("Error in converter `{}` occured: {}", sub.name(), e);
            e
        })
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for &'r Converter {
    type Error = ();
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, ()> {
        match req.rocket().state::<Converter>() {
            Some(state) => request::Outcome::Success(state),
            None => {
                error!("converter requested but the fairing is not attached");
                request::Outcome::Error((Status::InternalServerError, ()))
            }
        }
    }
}
