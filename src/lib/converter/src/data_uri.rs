//! Encoding of uploaded images as `data:` URIs.

use std::collections::HashSet;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use utils::format_bytes;

use crate::ConversionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataUri {
    pub uri: String,
    pub file_name: String,
    /// Human readable size, e.g. `1.5 KB`.
    pub file_size: String,
    pub file_type: String,
    pub bytes: usize,
}

/// Strip any parameters from a media type and normalize its case, `Image/PNG; q=1 -> image/png`.
fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Check that a media type is an allowed `image/` type, returning it without parameters.
pub fn check_media_type(media_type: &str, allowed: &HashSet<String>) -> Result<String, ConversionError> {
    let file_type = essence(media_type);
    if !file_type.starts_with("image/") || !allowed.contains(&file_type) {
        return Err(ConversionError::NotImage);
    }
    Ok(file_type)
}

/// Encode an image as a base64 data uri.
///
/// The media type must be an `image/` type present in `allowed`, the file must not be empty and must
/// be no larger than `max_size` bytes.
pub fn encode(
    bytes: &[u8],
    media_type: &str,
    file_name: &str,
    max_size: u64,
    allowed: &HashSet<String>,
) -> Result<DataUri, ConversionError> {
    let file_type = check_media_type(media_type, allowed)?;
    if bytes.is_empty() {
        return Err(ConversionError::EmptyFile);
    }
    if bytes.len() as u64 > max_size {
        return Err(ConversionError::TooLarge { max: max_size });
    }

    Ok(DataUri {
        uri: format!("data:{};base64,{}", file_type, STANDARD.encode(bytes)),
        file_name: file_name.to_owned(),
        file_size: format_bytes(bytes.len() as u64, 2),
        file_type,
        bytes: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> HashSet<String> {
        ["image/png", "image/svg+xml"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn encodes_images() {
        let res = encode(b"\x89PNG", "image/png", "dot.png", 1024, &allowed()).unwrap();
        assert_eq!(res.uri, "data:image/png;base64,iVBORw==");
        assert_eq!(res.file_name, "dot.png");
        assert_eq!(res.file_size, "4 Bytes");
        assert_eq!(res.file_type, "image/png");
        assert_eq!(res.bytes, 4);

        let svg = encode(b"<svg/>", "Image/SVG+XML; charset=utf-8", "a.svg", 1024, &allowed()).unwrap();
        assert!(svg.uri.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn rejects_non_images() {
        for media_type in ["text/plain", "image/bmp", "", "application/octet-stream"] {
            let err = encode(b"abc", media_type, "a", 1024, &allowed()).unwrap_err();
            assert_eq!(err.to_string(), "Please select an image file.");
        }
    }

    #[test]
    fn size_limits() {
        assert!(matches!(
            encode(b"", "image/png", "a.png", 1024, &allowed()),
            Err(ConversionError::EmptyFile)
        ));

        let big = vec![0u8; 2049];
        let err = encode(&big, "image/png", "a.png", 2048, &allowed()).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 2 KB limit.");

        let exact = vec![0u8; 2048];
        assert!(encode(&exact, "image/png", "a.png", 2048, &allowed()).is_ok());
    }
}
