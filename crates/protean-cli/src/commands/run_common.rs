//! Shared logic for the commands: loading grammars and input, reporting.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use protean_core::grammar::{DefinitionError, GrammarDef};
use protean_lib::{Diagnostics, Error, Grammar, GrammarError, ParseLimits};

/// Failures before the engine runs. All exit with status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("failed to read '{}': {source}", path.display())]
    Input { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("grammar defines no rules, nothing to start from")]
    NoStartRule,
}

/// Input flags shared by `parse` and `trace`.
pub struct InputArgs {
    pub grammar_path: PathBuf,
    pub input_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub start: Option<String>,
    pub limits: ParseLimits,
}

/// A grammar with its input and start rule, ready to parse.
pub struct PreparedParse {
    pub grammar: Grammar,
    pub start: String,
    pub source: String,
    /// Shown in diagnostics.
    pub label: String,
    /// Warnings about the grammar itself, not tied to the input.
    pub grammar_diagnostics: Diagnostics,
}

pub fn load_definition(path: &Path) -> Result<GrammarDef, CliError> {
    Ok(GrammarDef::from_path(path)?)
}

/// Build the grammar, validate it and compute its tables.
///
/// Undeclared kinds are returned as diagnostics; every other problem is an
/// error.
pub fn check_grammar(def: &GrammarDef) -> Result<(Grammar, Diagnostics), CliError> {
    let mut grammar = Grammar::from_def(def)?;
    let mut diagnostics = Diagnostics::new();
    grammar.check(&mut diagnostics)?;
    grammar.rebuild()?;

    if let Some(start) = &def.start
        && grammar.rule_id(start).is_none()
    {
        return Err(GrammarError::UnknownStartRule(start.clone()).into());
    }

    Ok((grammar, diagnostics))
}

/// Input from inline text, a file, or stdin (no path, or `-`).
pub fn load_input(source_text: Option<&str>, input_path: Option<&Path>) -> Result<String, CliError> {
    if let Some(text) = source_text {
        return Ok(text.to_owned());
    }
    match input_path {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).map_err(|source| CliError::Input {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(CliError::Stdin)?;
            Ok(buf)
        }
    }
}

/// Explicit `--start`, else the definition's start rule, else its first rule.
pub fn resolve_start(def: &GrammarDef, start: Option<&str>) -> Result<String, CliError> {
    start
        .or_else(|| def.start_rule())
        .map(str::to_owned)
        .ok_or(CliError::NoStartRule)
}

pub fn prepare(args: &InputArgs) -> Result<PreparedParse, CliError> {
    let def = load_definition(&args.grammar_path)?;
    let start = resolve_start(&def, args.start.as_deref())?;
    let (grammar, grammar_diagnostics) = check_grammar(&def)?;
    let source = load_input(args.source_text.as_deref(), args.input_path.as_deref())?;

    let label = match (&args.source_text, &args.input_path) {
        (Some(_), _) => "<inline>".to_owned(),
        (None, Some(path)) if path.as_os_str() != "-" => path.display().to_string(),
        _ => "<stdin>".to_owned(),
    };

    Ok(PreparedParse {
        grammar,
        start,
        source,
        label,
        grammar_diagnostics,
    })
}

/// Print `error: ...` and exit with status 1.
pub fn exit_with(err: CliError) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(1);
}

/// Grammar diagnostics have no position in the input, so render them plain.
pub fn print_grammar_diagnostics(diagnostics: &Diagnostics, color: bool) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!("{}", diagnostics.printer().colored(color).render());
}

/// Render diagnostics against the parsed input to stderr.
pub fn print_diagnostics(diagnostics: &Diagnostics, source: &str, label: &str, color: bool) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!(
        "{}",
        diagnostics
            .printer()
            .source(source)
            .path(label)
            .colored(color)
            .render()
    );
}

/// Report a failed parse and exit: 1 for bad input, 2 for fatal errors.
pub fn exit_with_parse_error(err: Error, source: &str, label: &str, color: bool) -> ! {
    match err {
        Error::ParseFailed(diagnostics) => {
            print_diagnostics(&diagnostics, source, label, color);
            std::process::exit(1);
        }
        fatal => {
            eprintln!("error: {}", fatal);
            std::process::exit(2);
        }
    }
}
