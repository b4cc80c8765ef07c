use serde_json::{Map, Value};

use crate::{Conversion, ConversionError, ConversionOptions};

/// Split a single csv line on `delimiter`. A `"` toggles quoting, `""` inside a quoted value is a
/// literal quote, and every field is trimmed.
pub fn parse_csv_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if c == delimiter && !in_quotes {
            fields.push(current.trim().to_owned());
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(current.trim().to_owned());

    fields
}

/// Converts csv text into a pretty printed json array of objects with string values.
pub struct CsvToJson;

impl Conversion for CsvToJson {
    fn name(&self) -> &str {
        "csv to json"
    }

    fn from(&self) -> &str {
        "csv"
    }

    fn to(&self) -> &str {
        "json"
    }

    fn convert(&self, input: &str, options: &ConversionOptions) -> Result<String, ConversionError> {
        let lines: Vec<&str> = input
            .split(|c: char| c == '\n' || c == '\r')
            .filter(|l| !l.trim().is_empty())
            .collect();

        let first = lines.first().ok_or(ConversionError::EmptyCsv)?;

        let (headers, rows) = if options.has_header {
            (parse_csv_line(first, options.delimiter), &lines[1..])
        } else {
            let width = parse_csv_line(first, options.delimiter).len();
            let generated: Vec<String> = (1..=width).map(|i| format!("column{}", i)).collect();
            (generated, &lines[..])
        };

        let objects: Vec<Value> = rows
            .iter()
            .map(|line| parse_csv_line(line, options.delimiter))
            .filter(|fields| fields.len() == headers.len())
            .map(|fields| {
                let object: Map<String, Value> = headers
                    .iter()
                    .cloned()
                    .zip(fields.into_iter().map(Value::String))
                    .collect();
                Value::Object(object)
            })
            .collect();

        serde_json::to_string_pretty(&objects).map_err(|e| ConversionError::Other(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(input: &str, options: &ConversionOptions) -> Result<String, ConversionError> {
        CsvToJson.convert(input, options)
    }

    #[test]
    fn line_parsing() {
        assert_eq!(parse_csv_line("a, b ,c", ','), vec!["a", "b", "c"]);
        assert_eq!(
            parse_csv_line("\"Doe, John\",\"say \"\"hi\"\"\",", ','),
            vec!["Doe, John", "say \"hi\"", ""]
        );
        assert_eq!(parse_csv_line("a;b,c", ';'), vec!["a", "b,c"]);
        assert_eq!(parse_csv_line("", ','), vec![""]);
    }

    #[test]
    fn with_header() {
        let json = convert(
            "name,age\r\nJohn Doe,32\n\n  \nJane,28\r",
            &ConversionOptions::default(),
        )
        .unwrap();
        assert_eq!(
            json,
            "[\n  {\n    \"name\": \"John Doe\",\n    \"age\": \"32\"\n  },\n  {\n    \"name\": \"Jane\",\n    \"age\": \"28\"\n  }\n]"
        );
    }

    #[test]
    fn header_order_is_kept() {
        let json = convert("z,a,m\n1,2,3", &ConversionOptions::default()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<&String> = value[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn without_header() {
        let options = ConversionOptions {
            has_header: false,
            delimiter: ';',
            ..Default::default()
        };
        let json = convert("1;2\n3;4", &options).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"column1": "1", "column2": "2"},
                {"column1": "3", "column2": "4"}
            ])
        );
    }

    #[test]
    fn ragged_rows_are_skipped() {
        let json = convert("a,b\n1,2,3\n4\n5,6", &ConversionOptions::default()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!([{"a": "5", "b": "6"}]));
    }

    #[test]
    fn empty_input() {
        for input in ["", "   ", "\n\r\n  \n"] {
            let err = convert(input, &ConversionOptions::default()).unwrap_err();
            assert_eq!(err.to_string(), "CSV is empty");
        }
        assert_eq!(convert("a,b", &ConversionOptions::default()).unwrap(), "[]");
    }
}
