// Scanning with a stack of inclusive and exclusive states.
// Run with `cargo test --test multistate_test`

mod common;

use common::{
    divide, eq, init, kinds, lbrack, lparen, minus, mult, number, plus, rbrack, rparen, Value,
};
use rstest::rstest;
use stacklex::{Pattern, Scanner, ScannerErrorKind, State, Token};

/// The base state of all scanners in this file. Brackets switch to the state `brackets`.
fn base(enter: Pattern<Value>) -> State<Value> {
    State::new(
        "base",
        [number(), plus(), minus(), eq(), lparen(), rparen(), enter, rbrack()],
    )
    .ignore(" ")
}

fn inclusive_scanner() -> Scanner<Value> {
    Scanner::new([
        base(lbrack(|scanner| scanner.push_state("brackets"))),
        State::new("brackets", [mult(), divide()])
            .inclusive(true)
            .ignore(" "),
    ])
    .unwrap()
}

fn exclusive_scanner() -> Scanner<Value> {
    Scanner::new([
        base(lbrack(|scanner| scanner.push_state("brackets"))),
        State::new("brackets", [number(), mult(), divide(), rbrack()]).ignore(" "),
    ])
    .unwrap()
}

fn set_exclusive_scanner() -> Scanner<Value> {
    Scanner::new([
        base(lbrack(|scanner| scanner.set_state("brackets"))),
        State::new("brackets", [number(), mult(), divide(), rbrack()]).ignore(" "),
    ])
    .unwrap()
}

/// Replaces one unmatched character with a `?` error token.
fn with_placeholder_hook(state: State<Value>) -> State<Value> {
    state.with_error_hook(|token: Token<Value>, scanner: &mut Scanner<Value>| {
        scanner.skip(1);
        Ok(Some(Token::error(
            Value::from("?"),
            token.position,
            token.context,
        )))
    })
}

#[rstest]
#[case::inclusive(
    inclusive_scanner(),
    "1 + [1 + 2 * 4] = 2",
    &["number", "plus", "number", "plus", "number", "mult", "number", "eq", "number"]
)]
#[case::exclusive(
    exclusive_scanner(),
    "1 + [2 * 4] = 2",
    &["number", "plus", "number", "mult", "number", "eq", "number"]
)]
#[case::nested(
    inclusive_scanner(),
    "[[2 * 4]] / 2",
    &["number", "mult", "number"]
)]
fn test_multistate_kinds(
    #[case] mut scanner: Scanner<Value>,
    #[case] input: &str,
    #[case] expected: &[&str],
) {
    init();
    scanner.feed(input);
    let mut found = Vec::new();
    for token in scanner.tokens() {
        match token {
            Ok(token) => found.push(token.kind.to_string()),
            Err(err) => {
                // Division is only valid between brackets.
                assert!(err.is_scan_failure());
                break;
            }
        }
    }
    assert_eq!(found, expected);
}

#[test]
fn test_inclusive_state_outside_brackets() {
    init();
    let mut scanner = inclusive_scanner();
    scanner.feed("1 * 2");
    let err = kinds(&mut scanner).unwrap_err();
    assert!(matches!(
        err.kind(),
        ScannerErrorKind::IllegalCharacter { offset: 2, .. }
    ));
}

#[test]
fn test_exclusive_state_hides_base() {
    init();
    let mut scanner = exclusive_scanner();
    scanner.feed("1 + [1 + 2 * 4] = 2");
    let err = kinds(&mut scanner).unwrap_err();
    assert!(matches!(
        err.kind(),
        ScannerErrorKind::IllegalCharacter {
            character: '+',
            offset: 7,
            ..
        }
    ));
}

#[test]
fn test_state_stack_follows_brackets() {
    init();
    let mut scanner = inclusive_scanner();
    scanner.feed("[[1]]");
    assert_eq!(scanner.current_state(), "base");
    let token = scanner.next_token().unwrap().unwrap();
    assert_eq!(token.value, Value::Int(1));
    assert_eq!(
        scanner.state_stack().collect::<Vec<_>>(),
        ["base", "brackets", "brackets"]
    );
    assert!(scanner.next_token().unwrap().is_none());
    assert_eq!(scanner.state_stack().collect::<Vec<_>>(), ["base"]);
}

#[test]
fn test_set_state_replaces_stack() {
    init();
    let mut scanner = set_exclusive_scanner();
    scanner.feed("1 + [2 * 4");
    assert_eq!(
        kinds(&mut scanner).unwrap(),
        ["number", "plus", "number", "mult", "number"]
    );
    assert_eq!(scanner.state_stack().collect::<Vec<_>>(), ["brackets"]);
}

#[test]
fn test_pop_after_set_state_underflows() {
    init();
    let mut scanner = set_exclusive_scanner();
    scanner.feed("1 + [2 * 4] + 1");
    let err = kinds(&mut scanner).unwrap_err();
    assert!(!err.is_scan_failure());
    assert!(matches!(
        err.kind(),
        ScannerErrorKind::StateStackUnderflow(name) if name == "brackets"
    ));
}

#[test]
fn test_set_undefined_state() {
    init();
    let mut scanner = Scanner::new([base(lbrack(|scanner| scanner.set_state("invalid")))])
        .unwrap();
    scanner.feed("1 + [2 * 4]");
    let mut tokens = scanner.tokens();
    assert!(tokens.next().unwrap().is_ok());
    assert!(tokens.next().unwrap().is_ok());
    let err = tokens.next().unwrap().unwrap_err();
    assert!(!err.is_scan_failure());
    assert!(matches!(
        err.kind(),
        ScannerErrorKind::UndefinedState(name) if name == "invalid"
    ));
    assert!(tokens.next().is_none());
}

#[test]
fn test_feed_with_start_state() {
    init();
    let mut scanner = exclusive_scanner();
    scanner.feed_with("2 * 4", (), Some("brackets")).unwrap();
    assert_eq!(
        kinds(&mut scanner).unwrap(),
        ["number", "mult", "number"]
    );
    let err = scanner.feed_with("2", (), Some("invalid")).unwrap_err();
    assert!(matches!(err.kind(), ScannerErrorKind::UndefinedState(_)));
}

#[test]
fn test_error_hook_found_below_inclusive_state() {
    init();
    let mut scanner = Scanner::new([
        with_placeholder_hook(base(lbrack(|scanner| scanner.push_state("brackets")))),
        State::new("brackets", [mult(), divide()])
            .inclusive(true)
            .ignore(" "),
    ])
    .unwrap();
    scanner.feed("[2 * q] = 1");
    let tokens = scanner
        .tokens()
        .collect::<stacklex::Result<Vec<_>>>()
        .unwrap();
    assert_eq!(
        tokens
            .iter()
            .map(|token| token.kind.to_string())
            .collect::<Vec<_>>(),
        ["number", "mult", "error", "eq", "number"]
    );
    assert_eq!(tokens[2].value, Value::from("?"));
    assert_eq!(tokens[2].position, 5);
}

#[test]
fn test_error_hook_hidden_by_exclusive_state() {
    init();
    let mut scanner = Scanner::new([
        with_placeholder_hook(base(lbrack(|scanner| scanner.push_state("brackets")))),
        State::new("brackets", [number(), mult(), divide(), rbrack()]).ignore(" "),
    ])
    .unwrap();
    scanner.feed("[2 * q] = 1");
    let err = kinds(&mut scanner).unwrap_err();
    assert!(matches!(
        err.kind(),
        ScannerErrorKind::IllegalCharacter {
            character: 'q',
            offset: 5,
            ..
        }
    ));
}
