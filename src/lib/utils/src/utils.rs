use rand::{seq::SliceRandom, Rng};

/// Generate a string of the requested length, drawing every char uniformly from `alphabet`.
/// Returns an empty string if the alphabet is empty.
pub fn generate_random_from<R: Rng + ?Sized>(alphabet: &[char], length: usize, rng: &mut R) -> String {
    (0..length)
        .filter_map(|_| alphabet.choose(rng))
        .collect()
}

const BYTE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Formats a byte count into a human readable size using 1024 as the base, e.g. `1536 -> "1.5 KB"`.
/// Trailing zeros in the fractional part are dropped.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return String::from("0 Bytes");
    }

    const K: f64 = 1024.0;
    let i = ((bytes as f64).ln() / K.ln()).floor() as usize;
    let i = i.min(BYTE_UNITS.len() - 1);

    let value = bytes as f64 / K.powi(i as i32);
    let fixed = format!("{:.*}", decimals, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    format!("{} {}", trimmed, BYTE_UNITS[i])
}

/// Escape text so that it can be placed inside html content or a quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut res = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            _ => res.push(c),
        }
    }
    res
}
