use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a token.
///
/// Tokens produced by a pattern carry the name of that pattern. Tokens handed to an error hook
/// carry the [`TokenKind::Error`] sentinel, which displays as `error`.
/// Serialized, a kind is its name. The name `error` is read back as the sentinel.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum TokenKind {
    /// The name of the pattern that matched.
    Named(String),
    /// Unmatched input passed to an error hook.
    Error,
}

impl TokenKind {
    /// The textual name of the kind.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            TokenKind::Named(name) => name,
            TokenKind::Error => "error",
        }
    }

    /// Check if this is the error sentinel.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, TokenKind::Error)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for TokenKind {
    fn from(name: &str) -> Self {
        TokenKind::Named(name.to_string())
    }
}

impl From<String> for TokenKind {
    fn from(name: String) -> Self {
        if name == "error" {
            TokenKind::Error
        } else {
            TokenKind::Named(name)
        }
    }
}

impl From<TokenKind> for String {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Named(name) => name,
            TokenKind::Error => "error".to_string(),
        }
    }
}

impl PartialEq<str> for TokenKind {
    fn eq(&self, other: &str) -> bool {
        self.name() == other
    }
}

impl PartialEq<&str> for TokenKind {
    fn eq(&self, other: &&str) -> bool {
        self.name() == *other
    }
}

/// A token produced by the scanner.
///
/// `V` is the value type. Unless a transform callback says otherwise the value is built from the
/// matched text. `C` is the caller supplied context, cloned into every token.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token<V = String, C = ()> {
    /// The kind of the token.
    pub kind: TokenKind,
    /// The value of the token.
    pub value: V,
    /// The byte offset of the token in the input.
    pub position: usize,
    /// The context the scanner was fed with.
    pub context: C,
}

impl<V, C> Token<V, C> {
    /// Create a new token.
    pub fn new(kind: impl Into<TokenKind>, value: V, position: usize, context: C) -> Self {
        Self {
            kind: kind.into(),
            value,
            position,
            context,
        }
    }

    /// Create a token of kind [`TokenKind::Error`].
    pub fn error(value: V, position: usize, context: C) -> Self {
        Self::new(TokenKind::Error, value, position, context)
    }

    /// Replaces the value of the token, keeping kind, position and context.
    pub fn with_value<W>(self, value: W) -> Token<W, C> {
        Token {
            kind: self.kind,
            value,
            position: self.position,
            context: self.context,
        }
    }
}

impl<V: fmt::Debug, C> fmt::Display for Token<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Token kind=\"{}\" value=\"{:?}\" pos=\"{}\">",
            self.kind, self.value, self.position
        )
    }
}
