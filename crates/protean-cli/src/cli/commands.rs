//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! All commands accept the parse and trace flags, with irrelevant ones hidden
//! from `--help`, so switching between `parse` and `trace` or `check` never
//! requires editing the rest of the command line.

use clap::Command;

use super::args::*;

/// Add hidden input args (for commands that don't parse input).
fn with_hidden_input_args(cmd: Command) -> Command {
    cmd.arg(input_path_arg().hide(true))
        .arg(source_text_arg().hide(true))
        .arg(start_arg().hide(true))
}

/// Add hidden limit args (for commands that don't run the engine).
fn with_hidden_limit_args(cmd: Command) -> Command {
    cmd.arg(fuel_arg().hide(true))
        .arg(recursion_limit_arg().hide(true))
}

/// Add hidden output args (for commands that don't print a result).
fn with_hidden_output_args(cmd: Command) -> Command {
    cmd.arg(compact_arg().hide(true))
}

/// Add hidden trace args (for commands that don't trace).
fn with_hidden_trace_args(cmd: Command) -> Command {
    cmd.arg(verbose_arg().hide(true))
        .arg(no_result_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("protean")
        .about("Self-extensible grammar engine")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(parse_command())
        .subcommand(trace_command())
}

/// Validate a grammar definition.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a grammar definition")
        .override_usage("  protean check <GRAMMAR> [--strict]")
        .after_help(
            r#"EXAMPLES:
  protean check ledger.json            # references, kinds, ambiguity
  protean check ledger.json --strict   # warnings fail too"#,
        )
        .arg(grammar_path_arg())
        .arg(strict_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_trace_args(with_hidden_output_args(with_hidden_limit_args(
        with_hidden_input_args(cmd),
    )))
}

/// Show rules, patterns and their first-token keys.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show rules, patterns and dispatch keys")
        .override_usage("  protean dump <GRAMMAR> [--json]")
        .after_help(
            r#"EXAMPLES:
  protean dump ledger.json             # rules with first-token keys
  protean dump ledger.json --json      # normalized definition"#,
        )
        .arg(grammar_path_arg())
        .arg(json_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_trace_args(with_hidden_output_args(with_hidden_limit_args(
        with_hidden_input_args(cmd),
    )))
}

/// Parse input and print the result as JSON.
pub fn parse_command() -> Command {
    let cmd = Command::new("parse")
        .about("Parse input and print the result as JSON")
        .override_usage(
            "\
  protean parse <GRAMMAR> [INPUT]
  protean parse <GRAMMAR> -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  protean parse ledger.json march.txt          # input file
  protean parse ledger.json -s 'pay 10 to bob' # inline input
  cat march.txt | protean parse ledger.json    # stdin"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(source_text_arg())
        .arg(start_arg())
        .arg(compact_arg())
        .arg(fuel_arg())
        .arg(recursion_limit_arg())
        .arg(color_arg());

    // Hidden unified flags
    with_hidden_trace_args(cmd)
}

/// Trace a parse for debugging.
pub fn trace_command() -> Command {
    Command::new("trace")
        .about("Trace rule dispatch while parsing")
        .override_usage(
            "\
  protean trace <GRAMMAR> [INPUT]
  protean trace <GRAMMAR> -s <TEXT> [-v|-vv]",
        )
        .after_help(
            r#"EXAMPLES:
  protean trace ledger.json march.txt          # rule entry and exit
  protean trace ledger.json march.txt -v       # also dispatch and tokens
  protean trace ledger.json -s 'pay 10' -vv    # also action results"#,
        )
        .arg(grammar_path_arg())
        .arg(input_path_arg())
        .arg(source_text_arg())
        .arg(start_arg())
        .arg(verbose_arg())
        .arg(no_result_arg())
        .arg(fuel_arg())
        .arg(recursion_limit_arg())
        .arg(color_arg())
        .arg(compact_arg().hide(true))
}
