pub const SAMPLE_CSV: &str = "name,email,age,city
John Doe,john@example.com,32,New York
Jane Smith,jane@example.com,28,San Francisco
Mike Johnson,mike@example.com,45,Chicago
Sarah Williams,sarah@example.com,36,Boston";

pub const SAMPLE_JSON: &str = r#"[
  {
    "name": "John Doe",
    "email": "john@example.com",
    "age": "32",
    "city": "New York"
  },
  {
    "name": "Jane Smith",
    "email": "jane@example.com",
    "age": "28",
    "city": "San Francisco"
  }
]"#;

pub const SAMPLE_MARKDOWN: &str = "# Welcome to the Markdown Previewer

## What is Markdown?

Markdown is a lightweight markup language for adding formatting to plain text.

### Basic Syntax

* **Bold text** with double asterisks
* *Italic text* with single asterisks
* [Links](https://example.com) with brackets and parentheses

### Code Example

```
fn main() {
    println!(\"Hello, world!\");
}
```

> This is a blockquote.

1. First ordered list item
2. Second ordered list item
";

/// Example input for a format, if there is one.
pub fn sample(format: &str) -> Option<&'static str> {
    match format.to_lowercase().as_str() {
        "csv" => Some(SAMPLE_CSV),
        "json" => Some(SAMPLE_JSON),
        "markdown" | "md" => Some(SAMPLE_MARKDOWN),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Conversion, ConversionOptions, CsvToJson, JsonToCsv};

    #[test]
    fn samples_convert() {
        let options = ConversionOptions::default();
        let json = CsvToJson.convert(SAMPLE_CSV, &options).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 4);

        let csv = JsonToCsv.convert(SAMPLE_JSON, &options).unwrap();
        assert_eq!(csv.lines().next(), Some("name,email,age,city"));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn lookup() {
        assert_eq!(sample("CSV"), Some(SAMPLE_CSV));
        assert_eq!(sample("md"), Some(SAMPLE_MARKDOWN));
        assert_eq!(sample("yaml"), None);
    }
}
