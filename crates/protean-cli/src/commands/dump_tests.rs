use protean_core::Colors;
use protean_core::grammar::GrammarDef;

use super::dump::render;
use super::run_common::check_grammar;

fn dump(json: &str) -> String {
    let def = GrammarDef::from_json(json).unwrap();
    let (grammar, _) = check_grammar(&def).unwrap();
    render(&grammar, Colors::OFF)
}

#[test]
fn lists_rules_with_keys() {
    let out = dump(
        r#"{
            "name": "calc",
            "kinds": ["number"],
            "rules": {
                "stmt": {
                    "patterns": [
                        "'let $identifier @value",
                        { "elements": "'print @value", "action": "tree" }
                    ]
                },
                "value": {
                    "optional": true,
                    "patterns": ["$number", "$identifier"]
                }
            }
        }"#,
    );

    insta::assert_snapshot!(out, @r"
    grammar calc
    kinds $number

    stmt
      #0 'let $identifier @value <- 'let
      #1 'print @value [action] <- 'print

    value (optional)
      #0 $number <- $number
      #1 $identifier <- $identifier
    ");
}

#[test]
fn references_show_their_targets_keys() {
    let out = dump(
        r#"{
            "name": "list",
            "rules": {
                "items": {
                    "optional": true,
                    "repeatable": true,
                    "patterns": ["@item"]
                },
                "item": {
                    "patterns": ["'a", "'b $end"]
                }
            }
        }"#,
    );

    insta::assert_snapshot!(out, @r"
    grammar list

    items (optional, repeatable)
      #0 @item <- 'a, 'b

    item
      #0 'a <- 'a
      #1 'b $end <- 'b
    ");
}

#[test]
fn colors_rule_names() {
    let def = GrammarDef::from_json(r#"{ "rules": { "go": { "patterns": ["'go"] } } }"#).unwrap();
    let (grammar, _) = check_grammar(&def).unwrap();
    let out = render(&grammar, Colors::new(true));

    assert!(out.contains("\x1b[34mgo\x1b[0m"), "{out:?}");
}
