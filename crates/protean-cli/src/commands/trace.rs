//! Trace rule dispatch for debugging.

use protean_core::Colors;
use protean_lib::Parser;
use protean_lib::engine::{PrintTracer, Verbosity};
use protean_lib::scanner::TextScanner;

use super::run_common::{
    self, InputArgs, PreparedParse, exit_with, exit_with_parse_error, print_diagnostics,
    print_grammar_diagnostics,
};

pub struct TraceArgs {
    pub input: InputArgs,
    pub verbosity: Verbosity,
    pub no_result: bool,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let PreparedParse {
        mut grammar,
        start,
        source,
        label,
        grammar_diagnostics,
    } = run_common::prepare(&args.input).unwrap_or_else(|e| exit_with(e));
    print_grammar_diagnostics(&grammar_diagnostics, args.color);

    let colors = Colors::new(args.color);
    let mut tracer = PrintTracer::new(args.verbosity, colors);
    let mut scanner = TextScanner::new(&source, &grammar);
    let result = Parser::new(&mut grammar)
        .limits(args.input.limits)
        .parse_traced(&start, &mut scanner, &mut tracer);

    // The trace is most useful when the parse fails, so print it first.
    tracer.print();

    let value = match result {
        Ok((value, diagnostics)) => {
            print_diagnostics(&diagnostics, &source, &label, args.color);
            value
        }
        Err(e) => exit_with_parse_error(e, &source, &label, args.color),
    };

    if args.no_result {
        return;
    }

    println!("{}---{}", colors.dim, colors.reset);
    println!("{}", value.format(true, colors));
}
