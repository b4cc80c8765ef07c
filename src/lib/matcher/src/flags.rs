use std::str::FromStr;

use crate::MatchError;

/// Matching options, written as a string of single letter flags such as `gi`.
///
/// `g` and `u` are accepted for familiarity only, every line is always searched for all matches
/// and patterns are always unicode aware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub global: bool,
    pub ignore_case: bool,
    pub multi_line: bool,
    pub dot_all: bool,
    pub unicode: bool,
}

impl FromStr for Flags {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::default();
        for c in s.trim().chars() {
            let flag = match c {
                'g' => &mut flags.global,
                'i' => &mut flags.ignore_case,
                'm' => &mut flags.multi_line,
                's' => &mut flags.dot_all,
                'u' => &mut flags.unicode,
                _ => return Err(MatchError::UnknownFlag(c)),
            };
            if *flag {
                return Err(MatchError::DuplicateFlag(c));
            }
            *flag = true;
        }
        Ok(flags)
    }
}

impl std::fmt::Display for Flags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letters = [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
        ];
        for (_, c) in letters.iter().filter(|(on, _)| *on) {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing() {
        assert_eq!("".parse::<Flags>().unwrap(), Flags::default());
        let flags: Flags = "gim".parse().unwrap();
        assert!(flags.global && flags.ignore_case && flags.multi_line);
        assert!(!flags.dot_all && !flags.unicode);
        assert_eq!("usmig".parse::<Flags>().unwrap().to_string(), "gimsu");

        assert_eq!("gy".parse::<Flags>(), Err(MatchError::UnknownFlag('y')));
        assert_eq!("gig".parse::<Flags>(), Err(MatchError::DuplicateFlag('g')));
    }
}
