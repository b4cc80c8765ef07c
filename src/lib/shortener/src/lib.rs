//! Short link generation. Links are never stored, a short code is fabricated for every request and
//! visiting it only shows a notice before returning to the home page.

use chrono::{DateTime, Utc};
use rand::{thread_rng, Rng};
use serde::Serialize;
use url::Url;
use utils::{escape_html, generate_random_from};

/// Url safe characters a short code is made from.
pub const CODE_ALPHABET: [char; 64] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l',
    'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9', '_', '-',
];

#[derive(Debug, PartialEq, Eq)]
pub enum ShortenError {
    Empty,
    InvalidUrl,
}

impl std::fmt::Display for ShortenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ShortenError::Empty => write!(f, "Please enter a URL"),
            ShortenError::InvalidUrl => {
                write!(f, "Please enter a valid URL including http:// or https://")
            }
        }
    }
}

impl std::error::Error for ShortenError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortLink {
    pub original: String,
    pub code: String,
    pub short_url: String,
    pub created: DateTime<Utc>,
}

pub fn generate_code<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
    generate_random_from(&CODE_ALPHABET, length, rng)
}

/// Check that the input is an absolute http(s) url, returning it trimmed.
pub fn validate_url(input: &str) -> Result<&str, ShortenError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ShortenError::Empty);
    }

    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(trimmed),
        _ => Err(ShortenError::InvalidUrl),
    }
}

pub fn shorten(url: &str, base_url: &str, code_length: usize) -> Result<ShortLink, ShortenError> {
    shorten_with_rng(url, base_url, code_length, &mut thread_rng())
}

pub fn shorten_with_rng<R: Rng + ?Sized>(
    url: &str,
    base_url: &str,
    code_length: usize,
    rng: &mut R,
) -> Result<ShortLink, ShortenError> {
    let original = validate_url(url)?;
    let code = generate_code(code_length, rng);

    Ok(ShortLink {
        original: original.to_owned(),
        short_url: format!("{}/s/{}", base_url.trim_end_matches('/'), code),
        code,
        created: Utc::now(),
    })
}

/// The page shown when a short link is visited. It explains that the code would be resolved here,
/// then returns to `/` after `delay_seconds`.
pub fn redirect_page(code: &str, delay_seconds: u64) -> String {
    let code = escape_html(code);
    format!(
        "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<meta http-equiv=\"refresh\" content=\"{delay};url=/\">
<title>Redirecting...</title>
</head>
<body>
<h1>Redirecting...</h1>
<p>A stored link would be resolved here for the code <code>{code}</code>.</p>
<p>You will be returned to the home page in {delay} seconds.</p>
</body>
</html>",
        delay = delay_seconds,
        code = code
    )
}
