use std::io::Write;
use std::path::{Path, PathBuf};

use indoc::indoc;
use protean_core::Colors;
use protean_core::grammar::GrammarDef;
use protean_lib::scanner::TextScanner;
use protean_lib::{Error, GrammarError, ParseLimits, Parser};

use super::check::is_valid;
use super::run_common::{
    CliError, InputArgs, check_grammar, load_definition, load_input, prepare, resolve_start,
};

const DEMO_GRAMMAR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/ledger.json");
const DEMO_INPUT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/ledger.txt");

const LEDGER: &str = indoc! {r#"
    {
      "name": "ledger",
      "kinds": ["number"],
      "rules": {
        "entries": {
          "repeatable": true,
          "patterns": ["@entry"]
        },
        "entry": {
          "patterns": [
            { "elements": "'pay $number 'to $identifier", "action": "tree" }
          ]
        }
      }
    }
"#};

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
    tmpfile.write_all(contents.as_bytes()).unwrap();
    tmpfile.flush().unwrap();
    tmpfile
}

fn input_args(grammar_path: &Path) -> InputArgs {
    InputArgs {
        grammar_path: grammar_path.to_path_buf(),
        input_path: None,
        source_text: None,
        start: None,
        limits: ParseLimits::default(),
    }
}

#[test]
fn loads_definition_from_file() {
    let file = write_temp(LEDGER);
    let def = load_definition(file.path()).unwrap();

    assert_eq!(def.name, "ledger");
    assert_eq!(def.kinds, vec!["number".to_owned()]);
    assert_eq!(def.start_rule(), Some("entries"));
}

#[test]
fn missing_definition_file() {
    let err = load_definition(Path::new("/nonexistent/ledger.json")).unwrap_err();

    assert!(matches!(err, CliError::Definition(_)));
    assert!(
        err.to_string()
            .starts_with("cannot read /nonexistent/ledger.json:"),
        "unexpected message: {err}"
    );
}

#[test]
fn malformed_definition_file() {
    let file = write_temp(r#"{ "rules": 3 }"#);
    let err = load_definition(file.path()).unwrap_err();

    assert!(err.to_string().starts_with("invalid grammar definition:"));
}

#[test]
fn check_grammar_builds_tables() {
    let def = GrammarDef::from_json(LEDGER).unwrap();
    let (grammar, diagnostics) = check_grammar(&def).unwrap();

    assert!(diagnostics.is_empty());
    assert!(!grammar.is_dirty());
}

#[test]
fn check_grammar_reports_undeclared_kinds() {
    let def = GrammarDef::from_json(r#"{ "rules": { "price": { "patterns": ["$money"] } } }"#)
        .unwrap();
    let (_, diagnostics) = check_grammar(&def).unwrap();

    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn undeclared_kinds_fail_only_strict_checks() {
    let def = GrammarDef::from_json(r#"{ "rules": { "price": { "patterns": ["$money"] } } }"#)
        .unwrap();
    let (_, diagnostics) = check_grammar(&def).unwrap();

    assert_eq!(diagnostics.warning_count(), 1);
    assert!(is_valid(&diagnostics, false));
    assert!(!is_valid(&diagnostics, true));
}

#[test]
fn clean_grammar_passes_strict_check() {
    let def = GrammarDef::from_json(LEDGER).unwrap();
    let (_, diagnostics) = check_grammar(&def).unwrap();

    assert!(is_valid(&diagnostics, true));
}

#[test]
fn check_grammar_rejects_ambiguity() {
    let def = GrammarDef::from_json(r#"{ "rules": { "stmt": { "patterns": ["'go", "'go 'home"] } } }"#)
        .unwrap();
    let err = check_grammar(&def).unwrap_err();

    assert!(matches!(
        err,
        CliError::Grammar(GrammarError::Ambiguous { first: 0, second: 1, .. })
    ));
}

#[test]
fn check_grammar_rejects_unknown_start() {
    let def = GrammarDef::from_json(r#"{ "start": "main", "rules": { "stmt": { "patterns": ["'go"] } } }"#)
        .unwrap();
    let err = check_grammar(&def).unwrap_err();

    assert_eq!(err.to_string(), "start rule `main` is not defined");
}

#[test]
fn resolve_start_prefers_explicit_rule() {
    let def = GrammarDef::from_json(LEDGER).unwrap();

    assert_eq!(resolve_start(&def, Some("entry")).unwrap(), "entry");
    assert_eq!(resolve_start(&def, None).unwrap(), "entries");
}

#[test]
fn resolve_start_without_rules() {
    let def = GrammarDef::from_json(r#"{ "rules": {} }"#).unwrap();
    let err = resolve_start(&def, None).unwrap_err();

    assert!(matches!(err, CliError::NoStartRule));
    assert_eq!(
        err.to_string(),
        "grammar defines no rules, nothing to start from"
    );
}

#[test]
fn inline_input_wins() {
    let source = load_input(Some("pay 1 to bob"), Some(Path::new("ignored.txt"))).unwrap();
    assert_eq!(source, "pay 1 to bob");
}

#[test]
fn input_from_file() {
    let file = write_temp("pay 2 to carol");
    let source = load_input(None, Some(file.path())).unwrap();
    assert_eq!(source, "pay 2 to carol");
}

#[test]
fn missing_input_file() {
    let err = load_input(None, Some(Path::new("/nonexistent/march.txt"))).unwrap_err();

    assert!(matches!(err, CliError::Input { .. }));
    assert!(
        err.to_string()
            .starts_with("failed to read '/nonexistent/march.txt':"),
        "unexpected message: {err}"
    );
}

#[test]
fn prepare_labels_inline_input() {
    let grammar_file = write_temp(LEDGER);
    let mut args = input_args(grammar_file.path());
    args.source_text = Some("pay 3 to dave".to_owned());
    args.start = Some("entry".to_owned());

    let prepared = prepare(&args).unwrap();

    assert_eq!(prepared.label, "<inline>");
    assert!(prepared.grammar_diagnostics.is_empty());
    assert_eq!(prepared.start, "entry");
    assert_eq!(prepared.source, "pay 3 to dave");
    assert!(prepared.grammar.rule_id("entries").is_some());
}

#[test]
fn prepare_labels_input_file() {
    let grammar_file = write_temp(LEDGER);
    let input_file = write_temp("pay 4 to erin");
    let mut args = input_args(grammar_file.path());
    args.input_path = Some(input_file.path().to_path_buf());

    let prepared = prepare(&args).unwrap();

    assert_eq!(PathBuf::from(&prepared.label), input_file.path());
    assert_eq!(prepared.start, "entries");
    assert_eq!(prepared.source, "pay 4 to erin");
}

#[test]
fn prepare_keeps_grammar_warnings_apart() {
    let grammar_file =
        write_temp(r#"{ "rules": { "price": { "patterns": ["'free", "'pay $money"] } } }"#);
    let mut args = input_args(grammar_file.path());
    args.source_text = Some("free".to_owned());

    let mut prepared = prepare(&args).unwrap();
    assert_eq!(prepared.grammar_diagnostics.warning_count(), 1);

    let mut scanner = TextScanner::new(&prepared.source, &prepared.grammar);
    let (_, diagnostics) = Parser::new(&mut prepared.grammar)
        .parse(&prepared.start, &mut scanner)
        .unwrap();
    assert!(diagnostics.is_empty());
}

#[test]
fn demo_ledger_parses_its_sample() {
    let def = load_definition(Path::new(DEMO_GRAMMAR)).unwrap();
    let (mut grammar, _) = check_grammar(&def).unwrap();
    let start = resolve_start(&def, None).unwrap();
    let source = load_input(None, Some(Path::new(DEMO_INPUT))).unwrap();

    let mut scanner = TextScanner::new(&source, &grammar);
    let (value, diagnostics) = Parser::new(&mut grammar)
        .parse(&start, &mut scanner)
        .unwrap();

    assert_eq!(start, "ledger");
    assert!(!diagnostics.has_errors());
    assert!(value.format(false, Colors::OFF).contains("refund"));
}

#[test]
fn demo_ledger_rejects_trailing_input() {
    let def = load_definition(Path::new(DEMO_GRAMMAR)).unwrap();
    let (mut grammar, _) = check_grammar(&def).unwrap();
    let start = resolve_start(&def, None).unwrap();
    let source = "pay 1 to bob oops pay 2 to carol";

    let mut scanner = TextScanner::new(source, &grammar);
    let result = Parser::new(&mut grammar).parse(&start, &mut scanner);

    let Err(Error::ParseFailed(diagnostics)) = result else {
        panic!("expected a failed parse, got {result:?}");
    };
    let last = diagnostics.last().unwrap();
    assert_eq!(last.kind().code(), "garbage-at-end");
}
