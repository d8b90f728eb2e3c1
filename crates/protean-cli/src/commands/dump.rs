//! Human-readable listing of a grammar and its dispatch keys.

use std::fmt::{self, Write};
use std::path::PathBuf;

use protean_core::Colors;
use protean_lib::Grammar;

use super::run_common::{check_grammar, exit_with, load_definition};

pub struct DumpArgs {
    pub grammar_path: PathBuf,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let def = load_definition(&args.grammar_path).unwrap_or_else(|e| exit_with(e));

    if args.json {
        match serde_json::to_string_pretty(&def) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let (grammar, _) = check_grammar(&def).unwrap_or_else(|e| exit_with(e));
    print!("{}", render(&grammar, Colors::new(args.color)));
}

/// One block per rule: flags, then each pattern with the keys that select it.
pub fn render(grammar: &Grammar, colors: Colors) -> String {
    let mut out = String::new();
    write_grammar(&mut out, grammar, &colors).expect("String write never fails");
    out
}

fn write_grammar(w: &mut impl Write, grammar: &Grammar, c: &Colors) -> fmt::Result {
    if !grammar.name().is_empty() {
        writeln!(w, "{} {}", c.paint(c.dim, "grammar"), grammar.name())?;
    }
    let kinds: Vec<_> = grammar
        .kinds()
        .map(|k| format!("${}", grammar.kind_name(k)))
        .collect();
    if !kinds.is_empty() {
        writeln!(w, "{} {}", c.paint(c.dim, "kinds"), kinds.join(" "))?;
    }

    let transitions = grammar.transitions();
    for (id, rule) in grammar.rules() {
        let mut flags = Vec::new();
        if rule.is_optional() {
            flags.push("optional");
        }
        if rule.is_repeatable() {
            flags.push("repeatable");
        }

        writeln!(w)?;
        write!(w, "{}", c.paint(c.blue, grammar.rule_name(id)))?;
        if !flags.is_empty() {
            write!(w, " {}", c.paint(c.dim, &format!("({})", flags.join(", "))))?;
        }
        writeln!(w)?;

        let table = transitions.and_then(|t| t.table(id));
        for (index, pattern) in rule.patterns().iter().enumerate() {
            let spec: Vec<_> = pattern
                .elements()
                .iter()
                .map(|e| grammar.describe_element(e))
                .collect();
            write!(w, "  {} {}", c.paint(c.dim, &format!("#{index}")), spec.join(" "))?;
            if pattern.has_action() {
                write!(w, " {}", c.paint(c.dim, "[action]"))?;
            }
            if let Some(keys) = table.and_then(|t| t.pattern_keys(index)) {
                let keys: Vec<_> = keys.iter().map(|k| k.describe(grammar)).collect();
                write!(w, " {} {}", c.paint(c.dim, "<-"), c.paint(c.green, &keys.join(", ")))?;
            }
            writeln!(w)?;
        }
    }

    Ok(())
}
