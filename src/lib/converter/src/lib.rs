//! This library handles conversions from one text format to another, such as csv to json or markdown to html.
//! Each conversion is registered with the [Converter], which is attached to rocket as managed state.
//! Images are handled separately by [data_uri::encode], as they are binary rather than text.

mod converter;
mod csv;
pub mod data_uri;
mod json;
mod markdown;
mod samples;

pub use crate::converter::*;
pub use crate::csv::*;
pub use crate::json::*;
pub use crate::markdown::*;
pub use crate::samples::*;

/// Every text conversion this crate provides.
pub fn all_conversions() -> Vec<Box<dyn Conversion>> {
    vec![
        Box::new(CsvToJson),
        Box::new(JsonToCsv),
        Box::new(MarkdownToHtml),
    ]
}
