use super::{Grammar, GrammarError, Value};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::scanner::TokenKind;

#[test]
fn define_records_patterns_and_flags() {
    let mut grammar = Grammar::new();
    let id = grammar
        .define("items")
        .pattern("'item $identifier")
        .pattern_with("'skip", |_, _| Ok(Value::Null))
        .optional()
        .repeatable()
        .finish()
        .unwrap();

    let rule = grammar.rule(id);
    assert_eq!(grammar.rule_name(id), "items");
    assert_eq!(rule.patterns().len(), 2);
    assert!(!rule.patterns()[0].has_action());
    assert!(rule.patterns()[1].has_action());
    assert!(rule.is_optional());
    assert!(rule.is_repeatable());
}

#[test]
fn duplicate_rule_is_rejected() {
    let mut grammar = Grammar::new();
    grammar.add_rule("stmt").unwrap();

    let err = grammar.define("stmt").pattern("'x").finish().unwrap_err();
    assert_eq!(err, GrammarError::DuplicateRule("stmt".to_owned()));
}

#[test]
fn builder_keeps_first_error() {
    let mut grammar = Grammar::new();
    let err = grammar
        .define("broken")
        .pattern("nope")
        .pattern("'fine")
        .finish()
        .unwrap_err();

    assert!(matches!(err, GrammarError::InvalidElement { .. }));
    let id = grammar.rule_id("broken").unwrap();
    assert!(grammar.rule(id).patterns().is_empty());
}

#[test]
fn empty_pattern_is_rejected() {
    let mut grammar = Grammar::new();
    let id = grammar.add_rule("r").unwrap();
    let err = grammar.add_pattern(id, "   ", None).unwrap_err();
    insta::assert_snapshot!(err, @"invalid element ``: a pattern needs at least one element");
}

#[test]
fn mark_flags_apply_to_last_declared_rule() {
    let mut grammar = Grammar::new();
    assert_eq!(grammar.mark_optional(), Err(GrammarError::NoRuleDeclared));

    let first = grammar.add_rule("first").unwrap();
    let second = grammar.add_rule("second").unwrap();
    grammar.mark_repeatable().unwrap();

    assert!(!grammar.rule(first).is_repeatable());
    assert!(grammar.rule(second).is_repeatable());
}

#[test]
fn reserved_kinds() {
    let mut grammar = Grammar::new();
    assert_eq!(
        grammar.declare_kind("identifier"),
        Err(GrammarError::ReservedKind("identifier".to_owned()))
    );
    assert_eq!(
        grammar.declare_kind("end"),
        Err(GrammarError::ReservedKind("end".to_owned()))
    );
    assert_eq!(grammar.kind("identifier"), Some(TokenKind::Identifier));
    assert_eq!(grammar.kind("end"), Some(TokenKind::EndOfInput));
}

#[test]
fn kind_lookup_requires_declaration() {
    let mut grammar = Grammar::new();
    grammar.define("r").pattern("$money").finish().unwrap();

    // Interned by the pattern, but never declared.
    assert_eq!(grammar.kind("money"), None);

    let money = grammar.declare_kind("money").unwrap();
    assert_eq!(grammar.kind("money"), Some(money));
    assert_eq!(grammar.declare_kind("money").unwrap(), money);
    assert_eq!(grammar.kind_name(money), "money");
    assert_eq!(grammar.kinds().collect::<Vec<_>>(), [money]);
}

#[test]
fn mutation_invalidates_tables() {
    let mut grammar = Grammar::new();
    grammar.define("r").pattern("'a").finish().unwrap();

    grammar.rebuild().unwrap();
    assert!(!grammar.is_dirty());
    let generation = grammar.generation();

    grammar.extend("r", "'b", None).unwrap();
    assert!(grammar.is_dirty());
    assert!(grammar.generation() > generation);

    grammar.ensure_transitions().unwrap();
    assert!(!grammar.is_dirty());
}

#[test]
fn extend_unknown_rule() {
    let mut grammar = Grammar::new();
    let err = grammar.extend("missing", "'x", None).unwrap_err();
    insta::assert_snapshot!(err, @"rule `missing` is not defined");
}

#[test]
fn check_reports_undeclared_kind_and_continues() {
    let mut grammar = Grammar::new();
    grammar.define("price").pattern("$money").finish().unwrap();
    grammar.define("other").pattern("'x").finish().unwrap();

    let mut diagnostics = Diagnostics::new();
    grammar.check(&mut diagnostics).unwrap();

    assert_eq!(diagnostics.len(), 1);
    let diag = diagnostics.last().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::UnknownTokenKind);
    insta::assert_snapshot!(diag.message(), @"`$money` is not a declared token kind");
    assert_eq!(
        diag.hints(),
        [
            "declare the kind before using it in a pattern",
            "used by rule `price`"
        ]
    );
}

#[test]
fn check_fails_on_undefined_reference() {
    let mut grammar = Grammar::new();
    grammar.define("stmt").pattern("@expr").finish().unwrap();

    let mut diagnostics = Diagnostics::new();
    let err = grammar.check(&mut diagnostics).unwrap_err();
    insta::assert_snapshot!(err, @"rule `stmt` references undefined rule `expr`");
}
