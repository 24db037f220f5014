#![forbid(missing_docs)]
//! # `stacklex`
//! The `stacklex` crate is a table-driven lexical scanner. It converts text into a stream of
//! typed, positioned tokens. It is meant to be the layer underneath a parser.
//!
//! Patterns are named regular expressions. They are grouped into states, and the scanner keeps a
//! stack of states. Only the patterns of the state on top of the stack are matched, plus those of
//! the states below it as long as the states are *inclusive*. An *exclusive* state hides
//! everything below it. Callbacks attached to patterns can rewrite tokens, move the cursor and
//! push or pop states, which makes context sensitive scanning possible.
//!
//! All patterns of a state are compiled into one composite regex with the `regex-automata`
//! crate. If the regex engine rejects the composite, it is split into halves recursively.
//! The compiled form is cached in the state, so a state shared between scanners with an
//! [`std::sync::Arc`] is compiled only once.
//!
//! # Example
//! ```rust
//! use stacklex::{Pattern, Scanner, ScannerError, State, Transform};
//!
//! #[derive(Debug, PartialEq)]
//! enum Value {
//!     Number(i64),
//!     Text(String),
//! }
//!
//! impl From<&str> for Value {
//!     fn from(text: &str) -> Self {
//!         Value::Text(text.to_string())
//!     }
//! }
//!
//! fn main() -> stacklex::Result<()> {
//!     let number = Pattern::new("number", r"\d+").with_transform(|token, scanner| {
//!         let text = &scanner.input()[token.position..scanner.offset()];
//!         let number = text.parse::<i64>().map_err(ScannerError::callback)?;
//!         Ok(Transform::Value(Value::Number(number)))
//!     });
//!     let base = State::new(
//!         "base",
//!         [
//!             number,
//!             Pattern::literal("plus", "+"),
//!             Pattern::literal("eq", "="),
//!             Pattern::literal("lbrack", "[").with_transform(|_, scanner| {
//!                 scanner.push_state("brackets")?;
//!                 Ok(Transform::Suppress)
//!             }),
//!             Pattern::literal("rbrack", "]").with_transform(|_, scanner| {
//!                 scanner.pop_state()?;
//!                 Ok(Transform::Suppress)
//!             }),
//!         ],
//!     )
//!     .ignore(" ");
//!     // Multiplication is only valid between brackets.
//!     let brackets = State::new("brackets", [Pattern::literal("mult", "*")]).inclusive(true);
//!
//!     let mut scanner: Scanner<Value> = Scanner::new([base, brackets])?;
//!     scanner.feed("1 + [2 * 3] = 7");
//!     for token in scanner.tokens() {
//!         let token = token?;
//!         println!("{} {:?} at {}", token.kind, token.value, token.position);
//!     }
//!     Ok(())
//! }
//! ```
//! The output of the example is:
//! ```text
//! number Number(1) at 0
//! plus Text("+") at 2
//! number Number(2) at 5
//! mult Text("*") at 7
//! number Number(3) at 9
//! eq Text("=") at 12
//! number Number(7) at 14
//! ```
//!
//! # Crate features
//! - `serde`: Enabled by default. Adds `Serialize` and `Deserialize` to the token and position
//!   types and provides [`StateDefinition`]s, callback free states that can be read from JSON.

/// Module with error definitions
mod errors;
pub use errors::{Result, ScannerError, ScannerErrorKind};

/// The module with internal implementation details.
mod internal;

/// Module that provides a Pattern type
mod pattern;
pub use pattern::{Pattern, Transform, TransformFn};

/// Module that provides a position type
mod position;
pub use position::Position;

/// Module that provides the regex flags of a state
mod regex_flags;
pub use regex_flags::RegexFlags;

/// The module with the scanner.
mod scanner;
pub use scanner::Scanner;

/// The module with the scanner builder.
mod scanner_builder;
pub use scanner_builder::ScannerBuilder;

/// The module with the state.
mod state;
pub use state::{ErrorFn, State};

/// Module with serializable state descriptions
#[cfg(feature = "serde")]
mod state_definition;
#[cfg(feature = "serde")]
pub use state_definition::{states_from_json, PatternDefinition, StateDefinition};

/// Module that provides a Token type
mod token;
pub use token::{Token, TokenKind};

/// Module that provides a Tokens iterator
mod tokens;
pub use tokens::Tokens;
