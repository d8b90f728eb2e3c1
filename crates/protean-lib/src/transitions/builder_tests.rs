use super::{FirstKey, build};
use crate::grammar::{Grammar, GrammarError};
use crate::scanner::TokenKind;

fn keys_of(grammar: &Grammar, rule: &str) -> Vec<String> {
    let transitions = build(grammar).unwrap();
    let table = transitions.table(grammar.rule_id(rule).unwrap()).unwrap();
    table.keys().map(|k| k.describe(grammar)).collect()
}

#[test]
fn literal_and_variable_keys() {
    let mut grammar = Grammar::new();
    grammar.declare_kind("number").unwrap();
    grammar
        .define("stmt")
        .pattern("'set $identifier")
        .pattern("$number")
        .pattern("$identifier '=")
        .finish()
        .unwrap();

    assert_eq!(keys_of(&grammar, "stmt"), ["'set", "$number", "$identifier"]);

    let transitions = build(&grammar).unwrap();
    let table = transitions.table(grammar.rule_id("stmt").unwrap()).unwrap();
    assert_eq!(table.lookup(&FirstKey::Literal("set".into())), Some(0));
    assert_eq!(table.lookup(&FirstKey::Variable(TokenKind::Identifier)), Some(2));
    assert_eq!(table.lookup(&FirstKey::Literal("get".into())), None);
}

#[test]
fn references_contribute_target_keys() {
    let mut grammar = Grammar::new();
    grammar
        .define("stmt")
        .pattern("@assign")
        .pattern("'print @assign")
        .finish()
        .unwrap();
    grammar
        .define("assign")
        .pattern("'let $identifier")
        .pattern("'var $identifier")
        .finish()
        .unwrap();

    assert_eq!(keys_of(&grammar, "stmt"), ["'let", "'var", "'print"]);
}

#[test]
fn optional_reference_continues_scanning() {
    let mut grammar = Grammar::new();
    grammar
        .define("decl")
        .pattern("@modifier 'fn $identifier")
        .finish()
        .unwrap();
    grammar
        .define("modifier")
        .pattern("'pub")
        .optional()
        .finish()
        .unwrap();

    assert_eq!(keys_of(&grammar, "decl"), ["'pub", "'fn"]);
}

#[test]
fn end_of_input_is_a_key() {
    let mut grammar = Grammar::new();
    grammar
        .define("doc")
        .pattern("$end")
        .pattern("'item")
        .finish()
        .unwrap();

    assert_eq!(keys_of(&grammar, "doc"), ["end of input", "'item"]);
}

#[test]
fn ambiguous_patterns_are_rejected() {
    let mut grammar = Grammar::new();
    grammar
        .define("stmt")
        .pattern("'go $identifier")
        .pattern("@jump")
        .finish()
        .unwrap();
    grammar.define("jump").pattern("'go 'to $identifier").finish().unwrap();

    let err = build(&grammar).unwrap_err();
    insta::assert_snapshot!(err, @"rule `stmt` is ambiguous: 'go starts both pattern #0 and pattern #1");
}

#[test]
fn identifier_and_literal_keys_do_not_collide() {
    let mut grammar = Grammar::new();
    grammar
        .define("stmt")
        .pattern("'if @stmt")
        .pattern("$identifier")
        .finish()
        .unwrap();

    assert!(build(&grammar).is_ok());
}

#[test]
fn self_recursion_terminates() {
    let mut grammar = Grammar::new();
    grammar
        .define("nested")
        .pattern("'( @nested ')")
        .pattern("'x")
        .finish()
        .unwrap();

    assert_eq!(keys_of(&grammar, "nested"), ["'(", "'x"]);
}

#[test]
fn mutual_recursion_terminates() {
    let mut grammar = Grammar::new();
    grammar
        .define("expr")
        .pattern("'[ @list")
        .pattern("$identifier")
        .finish()
        .unwrap();
    grammar
        .define("list")
        .pattern("@expr")
        .pattern("']")
        .repeatable()
        .finish()
        .unwrap();

    assert_eq!(keys_of(&grammar, "list"), ["'[", "$identifier", "']"]);
}

#[test]
fn left_recursion_terminates() {
    let mut grammar = Grammar::new();
    grammar
        .define("sum")
        .pattern("@sum '+ $identifier")
        .pattern("'zero")
        .finish()
        .unwrap();

    // The in-progress rule contributes what it has so far, which is nothing.
    assert_eq!(keys_of(&grammar, "sum"), ["'zero"]);
}

#[test]
fn undefined_reference_is_rejected() {
    let mut grammar = Grammar::new();
    grammar.define("stmt").pattern("@expr").finish().unwrap();

    assert_eq!(
        build(&grammar).unwrap_err(),
        GrammarError::UnknownRule {
            rule: "stmt".to_owned(),
            referenced: "expr".to_owned(),
        }
    );
}

#[test]
fn empty_rule_is_rejected() {
    let mut grammar = Grammar::new();
    grammar.add_rule("hollow").unwrap();

    insta::assert_snapshot!(build(&grammar).unwrap_err(), @"rule `hollow` has no patterns");
}

#[test]
fn extension_is_visible_after_rebuild() {
    let mut grammar = Grammar::new();
    grammar.define("cmd").pattern("'quit").finish().unwrap();
    grammar.rebuild().unwrap();

    grammar.extend("cmd", "'help", None).unwrap();
    assert!(grammar.is_dirty());

    let cmd = grammar.rule_id("cmd").unwrap();
    let transitions = grammar.ensure_transitions().unwrap();
    let table = transitions.table(cmd).unwrap();
    assert_eq!(table.lookup(&FirstKey::Literal("help".into())), Some(1));
}
