//! Patterns of a small calculator language shared by the integration tests.
#![allow(dead_code)]

use stacklex::{Pattern, Result, Scanner, ScannerError, Token, Transform};

/// Token values are either parsed numbers or the matched text.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Int(number)
    }
}

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn number() -> Pattern<Value> {
    Pattern::new("number", r"\d+").with_transform(
        |token: Token<Value>, scanner: &mut Scanner<Value>| {
            let text = &scanner.input()[token.position..scanner.offset()];
            let number = text.parse::<i64>().map_err(ScannerError::callback)?;
            Ok(Transform::Value(Value::Int(number)))
        },
    )
}

pub fn plus() -> Pattern<Value> {
    Pattern::new("plus", r"\+")
}

pub fn minus() -> Pattern<Value> {
    Pattern::new("minus", "-")
}

pub fn mult() -> Pattern<Value> {
    Pattern::new("mult", r"\*")
}

pub fn divide() -> Pattern<Value> {
    Pattern::new("divide", "/")
}

pub fn eq() -> Pattern<Value> {
    Pattern::new("eq", "=")
}

pub fn lparen() -> Pattern<Value> {
    Pattern::new("lparen", r"\(")
}

pub fn rparen() -> Pattern<Value> {
    Pattern::new("rparen", r"\)")
}

/// A `[` that runs the given stack operation and emits nothing.
pub fn lbrack<F>(enter: F) -> Pattern<Value>
where
    F: Fn(&mut Scanner<Value>) -> Result<()> + Send + Sync + 'static,
{
    Pattern::new("lbrack", r"\[").with_transform(move |_, scanner: &mut Scanner<Value>| {
        enter(scanner)?;
        Ok(Transform::Suppress)
    })
}

/// A `]` that pops the state stack and emits nothing.
pub fn rbrack() -> Pattern<Value> {
    Pattern::new("rbrack", r"\]").with_transform(|_, scanner: &mut Scanner<Value>| {
        scanner.pop_state()?;
        Ok(Transform::Suppress)
    })
}

pub fn kinds(scanner: &mut Scanner<Value>) -> Result<Vec<String>> {
    scanner
        .tokens()
        .map(|token| token.map(|token| token.kind.to_string()))
        .collect()
}

pub fn values(scanner: &mut Scanner<Value>) -> Result<Vec<Value>> {
    scanner
        .tokens()
        .map(|token| token.map(|token| token.value))
        .collect()
}
