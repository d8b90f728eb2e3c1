use protean_core::Interner;

use super::element::{Element, describe, parse_spec};
use super::error::GrammarError;
use crate::scanner::TokenKind;

#[test]
fn parses_all_specifier_forms() {
    let mut interner = Interner::new();
    let elements = parse_spec("'set @target $number $identifier $end", &mut interner).unwrap();

    let target = interner.get("target").unwrap();
    let number = interner.get("number").unwrap();
    assert_eq!(
        elements,
        [
            Element::Literal("set".to_owned()),
            Element::Reference(target),
            Element::Variable(TokenKind::Variable(number)),
            Element::Variable(TokenKind::Identifier),
            Element::EndOfInput,
        ]
    );
}

#[test]
fn whitespace_is_flexible() {
    let mut interner = Interner::new();
    let elements = parse_spec("  'a\t\n'b  ", &mut interner).unwrap();
    assert_eq!(elements.len(), 2);
}

#[test]
fn literal_keeps_punctuation() {
    let mut interner = Interner::new();
    let elements = parse_spec("'( '' ')", &mut interner).unwrap();
    assert_eq!(
        elements,
        [
            Element::Literal("(".to_owned()),
            Element::Literal("'".to_owned()),
            Element::Literal(")".to_owned()),
        ]
    );
}

#[test]
fn rejects_unknown_prefix() {
    let mut interner = Interner::new();
    let err = parse_spec("'a word", &mut interner).unwrap_err();
    insta::assert_snapshot!(err, @"invalid element `word`: expected `@rule`, `$kind` or `'literal`");
}

#[test]
fn rejects_bare_prefix() {
    let mut interner = Interner::new();
    let err = parse_spec("@", &mut interner).unwrap_err();
    assert_eq!(
        err,
        GrammarError::InvalidElement {
            element: "@".to_owned(),
            reason: "missing name after prefix",
        }
    );
}

#[test]
fn describe_round_trips_notation() {
    let mut interner = Interner::new();
    let spec = "'set @target $number $identifier $end";
    let rendered: Vec<_> = parse_spec(spec, &mut interner)
        .unwrap()
        .iter()
        .map(|e| describe(e, &interner))
        .collect();
    assert_eq!(rendered.join(" "), spec);
}
