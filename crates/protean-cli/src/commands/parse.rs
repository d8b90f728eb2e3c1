//! Parse input against a grammar and print the result.

use protean_core::Colors;
use protean_lib::Parser;
use protean_lib::scanner::TextScanner;

use super::run_common::{
    self, InputArgs, PreparedParse, exit_with, exit_with_parse_error, print_diagnostics,
    print_grammar_diagnostics,
};

pub struct ParseArgs {
    pub input: InputArgs,
    pub pretty: bool,
    pub color: bool,
}

pub fn run(args: ParseArgs) {
    let PreparedParse {
        mut grammar,
        start,
        source,
        label,
        grammar_diagnostics,
    } = run_common::prepare(&args.input).unwrap_or_else(|e| exit_with(e));
    print_grammar_diagnostics(&grammar_diagnostics, args.color);

    let mut scanner = TextScanner::new(&source, &grammar);
    let result = Parser::new(&mut grammar)
        .limits(args.input.limits)
        .parse(&start, &mut scanner);

    match result {
        Ok((value, diagnostics)) => {
            print_diagnostics(&diagnostics, &source, &label, args.color);
            println!("{}", value.format(args.pretty, Colors::new(args.color)));
        }
        Err(e) => exit_with_parse_error(e, &source, &label, args.color),
    }
}
