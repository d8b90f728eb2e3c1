//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields, ignoring hidden ones
//! - `Into<*Args>` impls bridge dispatch and command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use protean_lib::ParseLimits;
use protean_lib::engine::Verbosity;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::parse::ParseArgs;
use crate::commands::run_common::InputArgs;
use crate::commands::trace::TraceArgs;

pub struct CheckParams {
    pub grammar_path: PathBuf,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub grammar_path: PathBuf,
    pub json: bool,
    pub color: ColorChoice,
    // Note: input, start, limits and trace flags are parsed but not extracted
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            grammar_path: grammar_path(m),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

/// Input and engine flags shared by `parse` and `trace`.
pub struct InputParams {
    pub grammar_path: PathBuf,
    pub input_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub start: Option<String>,
    pub fuel: u32,
    pub recursion_limit: u32,
}

impl InputParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let defaults = ParseLimits::default();
        Self {
            grammar_path: grammar_path(m),
            input_path: m.get_one::<PathBuf>("input_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            start: m.get_one::<String>("start").cloned(),
            fuel: m
                .get_one::<u32>("fuel")
                .copied()
                .unwrap_or(defaults.get_exec_fuel()),
            recursion_limit: m
                .get_one::<u32>("recursion_limit")
                .copied()
                .unwrap_or(defaults.get_recursion_limit()),
        }
    }
}

impl From<InputParams> for InputArgs {
    fn from(p: InputParams) -> Self {
        Self {
            grammar_path: p.grammar_path,
            input_path: p.input_path,
            source_text: p.source_text,
            start: p.start,
            limits: ParseLimits::new()
                .exec_fuel(p.fuel)
                .recursion_limit(p.recursion_limit),
        }
    }
}

pub struct ParseParams {
    pub input: InputParams,
    pub compact: bool,
    pub color: ColorChoice,
    // Note: verbose and no_result are parsed but not extracted (unified flags)
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            input: p.input.into(),
            pretty,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub input: InputParams,
    pub verbose: u8,
    pub no_result: bool,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            verbose: m.get_count("verbose"),
            no_result: m.get_flag("no_result"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            input: p.input.into(),
            verbosity,
            no_result: p.no_result,
            color: p.color.should_colorize(),
        }
    }
}

fn grammar_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("grammar_path")
        .cloned()
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
