//! Module with the pattern type and the transform callback contract.
use std::{fmt, sync::Arc};

use crate::{Result, Scanner, Token};

/// The outcome of a transform callback.
#[derive(Clone, Debug, PartialEq)]
pub enum Transform<V = String, C = ()> {
    /// Emit the given token as-is. The callback owns kind, value and position.
    Replace(Token<V, C>),
    /// Emit the matched token with its value replaced.
    Value(V),
    /// Emit nothing. Scanning continues at the (possibly repositioned) cursor.
    Suppress,
}

/// A callback that is invoked on every match of its pattern.
///
/// It receives the candidate token and the live scanner. The cursor is already advanced past the
/// match, so the callback can reposition it or change the state stack.
pub type TransformFn<V, C> =
    Arc<dyn Fn(Token<V, C>, &mut Scanner<V, C>) -> Result<Transform<V, C>> + Send + Sync>;

/// A named regular expression the scanner can match.
///
/// The name is used as the token kind and as capture group name in the composite regex of the
/// state, so it must be a valid group name (`[_0-9a-zA-Z.\[\]]`, not starting with a digit).
/// The regex is compiled in free-spacing mode: whitespace is insignificant and `#` starts a
/// comment, escape both to match them literally.
pub struct Pattern<V = String, C = ()> {
    name: String,
    pattern: String,
    transform: Option<TransformFn<V, C>>,
    ignore: bool,
}

impl<V, C> Pattern<V, C> {
    /// Create a new pattern.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            transform: None,
            ignore: false,
        }
    }

    /// Create a pattern that matches `text` verbatim.
    pub fn literal(name: impl Into<String>, text: &str) -> Self {
        let mut pattern = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_whitespace() {
                // Whitespace is insignificant in free-spacing mode.
                pattern.push_str(&format!("\\x{{{:x}}}", c as u32));
            } else {
                regex_syntax::escape_into(c.encode_utf8(&mut [0; 4]), &mut pattern);
            }
        }
        Self::new(name, pattern)
    }

    /// Attach a transform callback to the pattern.
    pub fn with_transform<F>(self, transform: F) -> Self
    where
        F: Fn(Token<V, C>, &mut Scanner<V, C>) -> Result<Transform<V, C>> + Send + Sync + 'static,
    {
        Self {
            transform: Some(Arc::new(transform)),
            ..self
        }
    }

    /// Mark the pattern as ignored. Matches are consumed without emitting a token unless a
    /// transform callback is attached.
    pub fn ignored(self) -> Self {
        Self {
            ignore: true,
            ..self
        }
    }

    /// Get the name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the pattern.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Get the transform callback.
    #[inline]
    pub fn transform(&self) -> Option<&TransformFn<V, C>> {
        self.transform.as_ref()
    }

    /// Check if matches are discarded.
    #[inline]
    pub fn is_ignored(&self) -> bool {
        self.ignore
    }

    /// The named sub-expression this pattern contributes to the composite regex.
    // The newline keeps a trailing comment from swallowing the closing parenthesis.
    pub(crate) fn group_expression(&self) -> String {
        format!("(?P<{}>{}\n)", self.name, self.pattern)
    }
}

impl<V, C> Clone for Pattern<V, C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            pattern: self.pattern.clone(),
            transform: self.transform.clone(),
            ignore: self.ignore,
        }
    }
}

impl<V, C> fmt::Debug for Pattern<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("transform", &self.transform.is_some())
            .field("ignore", &self.ignore)
            .finish()
    }
}

impl<V, C> fmt::Display for Pattern<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.pattern.escape_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_expression() {
        let pattern: Pattern = Pattern::new("number", r"\d+");
        assert_eq!(pattern.group_expression(), "(?P<number>\\d+\n)");
        assert!(!pattern.is_ignored());
        assert!(pattern.transform().is_none());
    }

    #[test]
    fn test_literal_is_escaped() {
        let pattern: Pattern = Pattern::literal("plus", "+");
        assert_eq!(pattern.pattern(), r"\+");
        assert_eq!(pattern.to_string(), r"plus: \\+");
        let pattern: Pattern = Pattern::literal("note", "a #b");
        assert_eq!(pattern.pattern(), r"a\x{20}\#b");
    }

    #[test]
    fn test_builder_methods() {
        let pattern: Pattern = Pattern::new("ws", r"\s+")
            .ignored()
            .with_transform(|_, _| Ok(Transform::Suppress));
        assert!(pattern.is_ignored());
        assert!(pattern.transform().is_some());
        assert_eq!(
            format!("{:?}", pattern),
            r#"Pattern { name: "ws", pattern: "\\s+", transform: true, ignore: true }"#
        );
    }
}
