use regex_automata::util::syntax;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Regex flags applied uniformly to all patterns of a state.
///
/// Free-spacing mode is not part of the flags. It is always enabled.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RegexFlags {
    /// `(?i)`: letters match both upper and lower case.
    pub case_insensitive: bool,
    /// `(?m)`: `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `(?s)`: `.` matches `\n`.
    pub dot_matches_new_line: bool,
    /// `(?R)`: `\r\n` is treated as line terminator in multi line mode.
    pub crlf: bool,
    /// `(?U)`: greedy and lazy quantifiers swap their meaning.
    pub swap_greed: bool,
    /// `(?u)`: Unicode aware character classes.
    pub unicode: bool,
}

impl Default for RegexFlags {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            crlf: false,
            swap_greed: false,
            unicode: true,
        }
    }
}

impl RegexFlags {
    /// Create the default flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the case insensitive flag.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Set the multi line flag.
    pub fn multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    /// Set the dot matches new line flag.
    pub fn dot_matches_new_line(mut self, yes: bool) -> Self {
        self.dot_matches_new_line = yes;
        self
    }

    /// Set the CRLF flag.
    pub fn crlf(mut self, yes: bool) -> Self {
        self.crlf = yes;
        self
    }

    /// Set the swap greed flag.
    pub fn swap_greed(mut self, yes: bool) -> Self {
        self.swap_greed = yes;
        self
    }

    /// Set the Unicode flag.
    pub fn unicode(mut self, yes: bool) -> Self {
        self.unicode = yes;
        self
    }

    pub(crate) fn syntax_config(&self) -> syntax::Config {
        syntax::Config::new()
            .ignore_whitespace(true)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .crlf(self.crlf)
            .swap_greed(self.swap_greed)
            .unicode(self.unicode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let flags = RegexFlags::new();
        assert!(flags.unicode);
        assert!(!flags.case_insensitive);
        assert_eq!(flags, RegexFlags::default().case_insensitive(false));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_flags_deserialization() {
        let flags: RegexFlags = serde_json::from_str(r#"{ "case_insensitive": true }"#).unwrap();
        assert_eq!(flags, RegexFlags::new().case_insensitive(true));
    }
}
