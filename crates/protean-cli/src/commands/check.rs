use std::path::PathBuf;

use protean_lib::Diagnostics;

use super::run_common::{check_grammar, exit_with, load_definition, print_grammar_diagnostics};

pub struct CheckArgs {
    pub grammar_path: PathBuf,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let def = load_definition(&args.grammar_path).unwrap_or_else(|e| exit_with(e));
    let (_, diagnostics) = check_grammar(&def).unwrap_or_else(|e| exit_with(e));

    print_grammar_diagnostics(&diagnostics, args.color);

    if !is_valid(&diagnostics, args.strict) {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

/// Strict mode also fails on warnings.
pub fn is_valid(diagnostics: &Diagnostics, strict: bool) -> bool {
    if strict {
        diagnostics.is_empty()
    } else {
        !diagnostics.has_errors()
    }
}
