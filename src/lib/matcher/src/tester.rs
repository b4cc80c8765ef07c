use fancy_regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::Flags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    UnknownFlag(char),
    DuplicateFlag(char),
    PatternTooLong { max: usize },
    InvalidPattern(String),
    MatchFailed(String),
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            MatchError::UnknownFlag(c) => write!(f, "Unsupported flag ({})", c),
            MatchError::DuplicateFlag(c) => write!(f, "Flag ({}) was provided more than once", c),
            MatchError::PatternTooLong { max } => {
                write!(f, "Pattern must be at most {} characters long", max)
            }
            MatchError::InvalidPattern(ref s) => write!(f, "Invalid regular expression: {}", s),
            MatchError::MatchFailed(ref s) => write!(f, "Matching was abandoned: {}", s),
        }
    }
}

impl std::error::Error for MatchError {}

/// Bounds placed on user supplied patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimits {
    /// Maximum pattern length, in chars.
    pub max_pattern_length: usize,
    /// Maximum compiled size of the plain regex parts of a pattern, in bytes.
    pub size_limit: usize,
}

/// A single match, `start` and `end` are char offsets into the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub value: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineResult {
    pub line: String,
    pub line_index: usize,
    pub matches: Vec<MatchSpan>,
    pub is_match: bool,
}

impl LineResult {
    pub fn segments(&self) -> Vec<Segment> {
        segments(&self.line, &self.matches)
    }
}

/// A piece of a line, either plain text or part of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

pub fn compile(pattern: &str, flags: &Flags, limits: &MatchLimits) -> Result<Regex, MatchError> {
    if pattern.chars().count() > limits.max_pattern_length {
        return Err(MatchError::PatternTooLong {
            max: limits.max_pattern_length,
        });
    }

    let inline: String = [
        (flags.ignore_case, 'i'),
        (flags.multi_line, 'm'),
        (flags.dot_all, 's'),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, c)| *c)
    .collect();
    let pattern = if inline.is_empty() {
        pattern.to_owned()
    } else {
        format!("(?{}){}", inline, pattern)
    };

    RegexBuilder::new(&pattern)
        .delegate_size_limit(limits.size_limit)
        .build()
        .map_err(|e| MatchError::InvalidPattern(e.to_string()))
}

/// Every match in a single line. After an empty match the search resumes one char further on,
/// so an empty match directly after a non-empty one is still reported.
fn find_all(regex: &Regex, line: &str) -> Result<Vec<MatchSpan>, MatchError> {
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos <= line.len() {
        let m = match regex.find_from_pos(line, pos) {
            Ok(Some(m)) => m,
            Ok(None) => break,
            Err(e) => return Err(MatchError::MatchFailed(e.to_string())),
        };

        let start = line[..m.start()].chars().count();
        matches.push(MatchSpan {
            value: m.as_str().to_owned(),
            start,
            end: start + m.as_str().chars().count(),
        });

        pos = if m.end() > m.start() {
            m.end()
        } else {
            m.end() + line[m.end()..].chars().next().map_or(1, char::len_utf8)
        };
    }

    Ok(matches)
}

/// Find every match of `pattern` in each line of `text`. An empty pattern matches nothing.
pub fn test(
    pattern: &str,
    flags: &str,
    text: &str,
    limits: &MatchLimits,
) -> Result<Vec<LineResult>, MatchError> {
    if pattern.is_empty() {
        return Ok(Vec::new());
    }

    let flags: Flags = flags.parse()?;
    let regex = compile(pattern, &flags, limits)?;

    let mut results = Vec::new();
    for (line_index, line) in text.split('\n').enumerate() {
        let matches = find_all(&regex, line)?;
        results.push(LineResult {
            line: line.to_owned(),
            line_index,
            is_match: !matches.is_empty(),
            matches,
        });
    }

    Ok(results)
}

/// Split a line into alternating plain and matched segments. Empty segments are left out, as are
/// spans that overlap an earlier one.
pub fn segments(line: &str, matches: &[MatchSpan]) -> Vec<Segment> {
    let offsets: Vec<usize> = line
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(line.len()))
        .collect();
    let byte_at = |c: usize| offsets.get(c).copied().unwrap_or(line.len());

    let mut res = Vec::new();
    let mut push = |text: &str, matched: bool| {
        if !text.is_empty() {
            res.push(Segment {
                text: text.to_owned(),
                matched,
            });
        }
    };

    let mut last = 0;
    for span in matches {
        let (start, end) = (byte_at(span.start), byte_at(span.end));
        if start < last || end < start {
            continue;
        }
        push(&line[last..start], false);
        push(&line[start..end], true);
        last = end;
    }
    push(&line[last..], false);

    res
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Example {
    pub pattern: &'static str,
    pub description: &'static str,
}

pub const EXAMPLES: [Example; 5] = [
    Example {
        pattern: r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$",
        description: "Email address",
    },
    Example {
        pattern: r"^(?=.*[A-Za-z])(?=.*\d)[A-Za-z\d]{8,}$",
        description: "Password with minimum 8 characters, at least one letter and one number",
    },
    Example {
        pattern: r"^(0[1-9]|1[0-2])/(0[1-9]|[12][0-9]|3[01])/\d{4}$",
        description: "Date in MM/DD/YYYY format",
    },
    Example {
        pattern: r"^(\+\d{1,3}( )?)?((\(\d{3}\))|\d{3})[- .]?\d{3}[- .]?\d{4}$",
        description: "Phone number with optional country code",
    },
    Example {
        pattern: r"^#?([a-fA-F0-9]{6}|[a-fA-F0-9]{3})$",
        description: "Hex color code",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: MatchLimits = MatchLimits {
        max_pattern_length: 1000,
        size_limit: 1_000_000,
    };

    fn span(value: &str, start: usize, end: usize) -> MatchSpan {
        MatchSpan {
            value: value.to_owned(),
            start,
            end,
        }
    }

    #[test]
    fn matches_per_line() {
        let results = test(r"\d+", "g", "a1b22\nnone\n333", &LIMITS).unwrap();
        assert_eq!(results.len(), 3);

        assert_eq!(results[0].matches, vec![span("1", 1, 2), span("22", 3, 5)]);
        assert!(results[0].is_match);
        assert!(!results[1].is_match);
        assert_eq!(results[1].line_index, 1);
        assert_eq!(results[2].matches, vec![span("333", 0, 3)]);
    }

    #[test]
    fn offsets_count_chars() {
        let results = test("b", "", "äöb", &LIMITS).unwrap();
        assert_eq!(results[0].matches, vec![span("b", 2, 3)]);
    }

    #[test]
    fn flags_change_matching() {
        assert!(!test("abc", "", "ABC", &LIMITS).unwrap()[0].is_match);
        assert!(test("abc", "i", "ABC", &LIMITS).unwrap()[0].is_match);
        assert_eq!(
            test("x", "gy", "x", &LIMITS),
            Err(MatchError::UnknownFlag('y'))
        );
    }

    #[test]
    fn empty_matches_step_one_char() {
        let results = test("a*", "g", "bab", &LIMITS).unwrap();
        assert_eq!(
            results[0].matches,
            vec![span("", 0, 0), span("a", 1, 2), span("", 2, 2), span("", 3, 3)]
        );

        let results = test("(?=ö)", "g", "äö", &LIMITS).unwrap();
        assert_eq!(results[0].matches, vec![span("", 1, 1)]);
    }

    #[test]
    fn bad_patterns() {
        assert_eq!(test("", "g", "anything", &LIMITS), Ok(Vec::new()));
        assert!(matches!(
            test("(unclosed", "g", "x", &LIMITS),
            Err(MatchError::InvalidPattern(_))
        ));

        let tight = MatchLimits {
            max_pattern_length: 3,
            ..LIMITS
        };
        assert_eq!(
            test("abcd", "", "abcd", &tight),
            Err(MatchError::PatternTooLong { max: 3 })
        );
    }

    #[test]
    fn segmenting() {
        let results = test("o", "g", "foo bar", &LIMITS).unwrap();
        let segs = results[0].segments();
        let texts: Vec<(&str, bool)> = segs
            .iter()
            .map(|s| (s.text.as_str(), s.matched))
            .collect();
        assert_eq!(
            texts,
            vec![("f", false), ("o", true), ("o", true), (" bar", false)]
        );

        assert_eq!(
            segments("äx", &[span("x", 1, 2)]),
            vec![
                Segment {
                    text: String::from("ä"),
                    matched: false
                },
                Segment {
                    text: String::from("x"),
                    matched: true
                }
            ]
        );
        assert!(segments("", &[]).is_empty());
    }

    #[test]
    fn examples_compile_and_match() {
        let samples = [
            "jane.doe@example.com",
            "abc12345",
            "12/31/2024",
            "+1 (555) 123-4567",
            "#6366f1",
        ];
        for (example, sample) in EXAMPLES.iter().zip(samples.iter()) {
            let results = test(example.pattern, "", sample, &LIMITS).unwrap();
            assert!(results[0].is_match, "{} should match {}", example.pattern, sample);
        }
        assert!(!test(EXAMPLES[1].pattern, "", "short1", &LIMITS).unwrap()[0].is_match);
        assert!(!test(EXAMPLES[1].pattern, "", "abcdefgh", &LIMITS).unwrap()[0].is_match);
        assert!(!test(EXAMPLES[1].pattern, "", "12345678", &LIMITS).unwrap()[0].is_match);
    }

    #[test]
    fn lookaround_and_backreferences() {
        let results = test(r"\w+(?=!)", "g", "hey you!", &LIMITS).unwrap();
        assert_eq!(results[0].matches, vec![span("you", 4, 7)]);

        let results = test(r"(?<!\$)\b\d+", "g", "$5 and 7", &LIMITS).unwrap();
        assert_eq!(results[0].matches, vec![span("7", 7, 8)]);

        let results = test(r"(\w)\1", "g", "book keeper", &LIMITS).unwrap();
        assert_eq!(
            results[0].matches,
            vec![span("oo", 1, 3), span("ee", 6, 8)]
        );
    }

    #[test]
    fn flags_apply_to_whole_pattern() {
        let results = test("a|b", "i", "AB", &LIMITS).unwrap();
        assert_eq!(results[0].matches, vec![span("A", 0, 1), span("B", 1, 2)]);
        assert!(test("^b", "m", "ab", &LIMITS).unwrap()[0].matches.is_empty());
    }
}
