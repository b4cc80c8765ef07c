use serde_json::{Map, Number, Value};

use crate::{Conversion, ConversionError, ConversionOptions};

/// Quote a csv field if it holds the delimiter, a quote or a line break. Quotes are doubled.
fn escape_field(field: &str, delimiter: char) -> String {
    if field.contains(|c: char| c == delimiter || c == '"' || c == '\n' || c == '\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Whole floats print without a fraction (`1.0` becomes `1`), up to where exponent notation takes over.
fn render_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => String::from("0"),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => render_number(n),
        nested => nested.to_string(),
    }
}

/// Converts a json array of objects into csv, with a header row made from every key seen.
pub struct JsonToCsv;

impl Conversion for JsonToCsv {
    fn name(&self) -> &str {
        "json to csv"
    }

    fn from(&self) -> &str {
        "json"
    }

    fn to(&self) -> &str {
        "csv"
    }

    fn convert(&self, input: &str, options: &ConversionOptions) -> Result<String, ConversionError> {
        let value: Value = serde_json::from_str(input).map_err(ConversionError::InvalidJson)?;

        let rows: Vec<&Map<String, Value>> = match value {
            Value::Array(ref items) if !items.is_empty() => items
                .iter()
                .map(Value::as_object)
                .collect::<Option<_>>()
                .ok_or(ConversionError::NotArrayOfObjects)?,
            _ => return Err(ConversionError::NotArrayOfObjects),
        };

        let mut headers: Vec<&str> = Vec::new();
        for key in rows.iter().flat_map(|r| r.keys()) {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }

        let delimiter = options.delimiter.to_string();
        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(
            headers
                .iter()
                .map(|h| escape_field(h, options.delimiter))
                .collect::<Vec<String>>()
                .join(&delimiter),
        );

        for row in rows {
            let line = headers
                .iter()
                .map(|h| {
                    row.get(*h)
                        .map(|v| escape_field(&render_value(v), options.delimiter))
                        .unwrap_or_default()
                })
                .collect::<Vec<String>>()
                .join(&delimiter);
            lines.push(line);
        }

        Ok(lines.join("\n"))
    }
}
