use std::io::Write;

use super::*;

#[test]
fn parse_minimal_definition() {
    let json = r#"{
        "name": "greetings",
        "rules": {
            "greeting": { "patterns": ["'hello $identifier"] }
        }
    }"#;

    let def = GrammarDef::from_json(json).unwrap();
    assert_eq!(def.name, "greetings");
    assert_eq!(def.rules.len(), 1);
    assert_eq!(def.start_rule(), Some("greeting"));
}

#[test]
fn short_and_long_patterns() {
    let json = r#"{
        "kinds": ["string"],
        "rules": {
            "item": {
                "patterns": [
                    "'a",
                    { "elements": "'b $string", "action": "last" }
                ]
            }
        }
    }"#;

    let def = GrammarDef::from_json(json).unwrap();
    let (_, rule) = &def.rules[0];
    assert_eq!(
        rule.patterns[0],
        PatternDef {
            elements: "'a".into(),
            action: None
        }
    );
    assert_eq!(rule.patterns[1].action.as_deref(), Some("last"));
    assert_eq!(def.kinds, ["string"]);
}

#[test]
fn flags_default_to_false() {
    let json = r#"{
        "rules": {
            "list": { "repeatable": true, "patterns": ["'x"] },
            "plain": { "patterns": ["'y"] }
        }
    }"#;

    let def = GrammarDef::from_json(json).unwrap();
    assert!(def.rules[0].1.repeatable);
    assert!(!def.rules[0].1.optional);
    assert!(!def.rules[1].1.repeatable);
}

#[test]
fn preserves_rule_order() {
    let json = r#"{
        "rules": {
            "zeta": { "patterns": ["'z"] },
            "alpha": { "patterns": ["'a"] },
            "mid": { "patterns": ["'m"] }
        }
    }"#;

    let def = GrammarDef::from_json(json).unwrap();
    let names: Vec<_> = def.rules.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
}

#[test]
fn explicit_start_wins() {
    let json = r#"{
        "start": "file",
        "rules": {
            "line": { "patterns": ["'x"] },
            "file": { "patterns": ["@line $end"] }
        }
    }"#;

    let def = GrammarDef::from_json(json).unwrap();
    assert_eq!(def.start_rule(), Some("file"));
}

#[test]
fn unknown_field_is_rejected() {
    let json = r#"{ "rules": {}, "tokens": [] }"#;

    let err = GrammarDef::from_json(json).unwrap_err();
    assert!(matches!(err, DefinitionError::Json(_)));
}

#[test]
fn load_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "rules": {{ "r": {{ "patterns": ["'x"] }} }} }}"#).unwrap();

    let def = GrammarDef::from_path(file.path()).unwrap();
    assert_eq!(def.rules[0].0, "r");
}

#[test]
fn missing_file_reports_path() {
    let err = GrammarDef::from_path(std::path::Path::new("/nonexistent/grammar.json"))
        .unwrap_err();
    assert!(err.to_string().starts_with("cannot read /nonexistent/grammar.json"));
}

#[test]
fn serializes_in_loadable_shape() {
    let json = r#"{
        "name": "g",
        "rules": {
            "b": { "optional": true, "patterns": ["'x", { "elements": "'y", "action": "tree" }] },
            "a": { "patterns": ["@b"] }
        }
    }"#;

    let def = GrammarDef::from_json(json).unwrap();
    let out = serde_json::to_string(&def).unwrap();
    assert_eq!(
        out,
        r#"{"name":"g","kinds":[],"rules":{"b":{"optional":true,"repeatable":false,"patterns":[{"elements":"'x"},{"elements":"'y","action":"tree"}]},"a":{"optional":false,"repeatable":false,"patterns":[{"elements":"@b"}]}}}"#
    );

    let reloaded = GrammarDef::from_json(&out).unwrap();
    assert_eq!(reloaded.rules[1].1.patterns, def.rules[1].1.patterns);
}
