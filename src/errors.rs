use thiserror::Error;

use crate::Position;

/// The result type for the `stacklex` crate.
pub type Result<T> = std::result::Result<T, ScannerError>;

/// The error type for the `stacklex` crate.
#[derive(Error, Debug)]
pub struct ScannerError {
    /// The source of the error.
    pub source: Box<ScannerErrorKind>,
}

impl ScannerError {
    /// Create a new `ScannerError`.
    pub fn new(kind: ScannerErrorKind) -> Self {
        ScannerError {
            source: Box::new(kind),
        }
    }

    /// Wraps an error raised by user code inside a transform callback or an error hook.
    pub fn callback<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ScannerError::new(ScannerErrorKind::Callback(error.into()))
    }

    /// Get the kind of the error.
    #[inline]
    pub fn kind(&self) -> &ScannerErrorKind {
        &self.source
    }

    /// Returns true if the error is a scanning failure, i.e. input at the cursor could not be
    /// matched and no error hook consumed it.
    pub fn is_scan_failure(&self) -> bool {
        matches!(
            *self.source,
            ScannerErrorKind::IllegalCharacter { .. } | ScannerErrorKind::ErrorHookStalled { .. }
        )
    }
}

impl std::fmt::Display for ScannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum ScannerErrorKind {
    /// A state name was used that is not part of the scanner's registry.
    #[error("Undefined state: {0}")]
    UndefinedState(String),

    /// The input at the cursor matches no active pattern and no error hook is registered.
    #[error("Illegal character {character:?} at index {offset} ({position})")]
    IllegalCharacter {
        /// The character at the cursor.
        character: char,
        /// The byte offset of the character.
        offset: usize,
        /// Line and column of the character.
        position: Position,
        /// The unconsumed rest of the input.
        remainder: String,
    },

    /// The error hook returned without advancing the cursor.
    #[error("Scanning error. Illegal character {character:?} at index {offset} ({position})")]
    ErrorHookStalled {
        /// The character at the cursor.
        character: char,
        /// The byte offset of the character.
        offset: usize,
        /// Line and column of the character.
        position: Position,
        /// The unconsumed rest of the input.
        remainder: String,
    },

    /// A pop operation would have removed the last state from the state stack.
    #[error("Cannot pop state '{0}': the state stack must not become empty")]
    StateStackUnderflow(String),

    /// A scanner was built without any state.
    #[error("At least one state is required to build a scanner")]
    EmptyRegistry,

    /// A single pattern could not be compiled.
    #[error("Pattern '{pattern}' of state '{state}': {source}")]
    Pattern {
        /// The name of the state the pattern belongs to.
        state: String,
        /// The name of the pattern.
        pattern: String,
        /// The error of the regex engine.
        source: regex_automata::meta::BuildError,
    },

    /// A pattern matched the empty string and the cursor did not move. This leads to an infinite
    /// loop. Avoid regexes that match empty tokens.
    #[error("Pattern '{pattern}' of state '{state}' matched an empty token at index {offset}")]
    EmptyMatch {
        /// The name of the state the pattern belongs to.
        state: String,
        /// The name of the pattern.
        pattern: String,
        /// The byte offset of the empty match.
        offset: usize,
    },

    /// A transform callback or an error hook failed.
    #[error("Callback failed: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A state definition could not be read.
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<ScannerErrorKind> for ScannerError {
    fn from(kind: ScannerErrorKind) -> Self {
        ScannerError::new(kind)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for ScannerError {
    fn from(error: serde_json::Error) -> Self {
        ScannerError::new(ScannerErrorKind::Json(error))
    }
}
