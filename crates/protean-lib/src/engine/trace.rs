//! Tracing for debugging parses.
//!
//! The engine is generic over [`Tracer`]. With [`NoopTracer`] every method is
//! an `#[inline(always)]` empty function, so an untraced parse carries no
//! tracing cost. [`PrintTracer`] collects one line per event; it keeps its own
//! indentation state so the engine's structures stay free of tracing concerns.

use protean_core::Colors;

use crate::grammar::{Element, Grammar, RuleId, Value};
use crate::scanner::{Token, TokenKind};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Rule entry and exit, failed dispatches, unwinds and rebuilds.
    #[default]
    Default,
    /// (-v) Also pattern selection and every consumed token.
    Verbose,
    /// (-vv) Also every action result.
    VeryVerbose,
}

/// Parse instrumentation.
///
/// Methods receive raw ids plus the grammar, which may have grown since the
/// previous call. Name resolution happens in the implementation.
pub trait Tracer {
    /// Called after tables are rebuilt because the grammar changed.
    fn trace_rebuild(&mut self, grammar: &Grammar);

    /// Called when a rule invocation begins.
    fn trace_enter(&mut self, grammar: &Grammar, rule: RuleId, depth: usize);

    /// Called when the lookahead selects a pattern.
    fn trace_dispatch(&mut self, grammar: &Grammar, rule: RuleId, pattern: usize, token: &Token);

    /// Called when no pattern matches. `accepted` is true when the rule may
    /// stop here without error.
    fn trace_no_match(&mut self, grammar: &Grammar, rule: RuleId, token: &Token, accepted: bool);

    /// Called when an element consumes a token.
    fn trace_consume(&mut self, grammar: &Grammar, element: &Element, token: &Token);

    /// Called after a pattern's action produced its value.
    fn trace_reduce(&mut self, grammar: &Grammar, rule: RuleId, pattern: usize, value: &Value);

    /// Called when a rule invocation returns successfully.
    fn trace_exit(&mut self, grammar: &Grammar, rule: RuleId, value: &Value);

    /// Called for every rule invocation abandoned by an error.
    fn trace_unwind(&mut self, grammar: &Grammar, rule: RuleId, fatal: bool);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_rebuild(&mut self, _grammar: &Grammar) {}

    #[inline(always)]
    fn trace_enter(&mut self, _grammar: &Grammar, _rule: RuleId, _depth: usize) {}

    #[inline(always)]
    fn trace_dispatch(&mut self, _grammar: &Grammar, _rule: RuleId, _pattern: usize, _token: &Token) {}

    #[inline(always)]
    fn trace_no_match(&mut self, _grammar: &Grammar, _rule: RuleId, _token: &Token, _accepted: bool) {}

    #[inline(always)]
    fn trace_consume(&mut self, _grammar: &Grammar, _element: &Element, _token: &Token) {}

    #[inline(always)]
    fn trace_reduce(&mut self, _grammar: &Grammar, _rule: RuleId, _pattern: usize, _value: &Value) {}

    #[inline(always)]
    fn trace_exit(&mut self, _grammar: &Grammar, _rule: RuleId, _value: &Value) {}

    #[inline(always)]
    fn trace_unwind(&mut self, _grammar: &Grammar, _rule: RuleId, _fatal: bool) {}
}

/// Tracer that collects an indented, optionally colored event log.
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Vec<String>,
    indent: usize,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Vec::new(),
            indent: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all collected lines to stdout.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }

    fn push(&mut self, text: String) {
        self.lines.push(format!("{}{text}", "  ".repeat(self.indent)));
    }

    fn token(&self, grammar: &Grammar, token: &Token) -> String {
        let c = &self.colors;
        match token.kind {
            TokenKind::EndOfInput => c.paint(c.dim, "<end>"),
            TokenKind::Identifier => c.paint(c.green, &format!("{:?}", token.text)),
            kind => format!(
                "{} {}",
                c.paint(c.green, &format!("{:?}", token.text)),
                c.paint(c.dim, &format!("${}", grammar.kind_name(kind)))
            ),
        }
    }
}

impl Tracer for PrintTracer {
    fn trace_rebuild(&mut self, grammar: &Grammar) {
        let c = self.colors;
        self.push(c.paint(
            c.dim,
            &format!("~ tables rebuilt ({} rules)", grammar.rule_count()),
        ));
    }

    fn trace_enter(&mut self, grammar: &Grammar, rule: RuleId, _depth: usize) {
        let c = self.colors;
        self.push(format!("{} {}", c.paint(c.dim, ">"), c.paint(c.blue, grammar.rule_name(rule))));
        self.indent += 1;
    }

    fn trace_dispatch(&mut self, grammar: &Grammar, _rule: RuleId, pattern: usize, token: &Token) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let c = self.colors;
        let line = format!("{} {}", c.paint(c.dim, &format!("#{pattern} on")), self.token(grammar, token));
        self.push(line);
    }

    fn trace_no_match(&mut self, grammar: &Grammar, _rule: RuleId, token: &Token, accepted: bool) {
        let c = self.colors;
        let label = if accepted {
            c.paint(c.dim, "no match, done")
        } else {
            c.paint(c.red, "no match")
        };
        let line = format!("{label} {}", self.token(grammar, token));
        self.push(line);
    }

    fn trace_consume(&mut self, grammar: &Grammar, element: &Element, token: &Token) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let c = self.colors;
        let line = format!(
            "{} {}",
            self.token(grammar, token),
            c.paint(c.dim, &format!("as {}", grammar.describe_element(element)))
        );
        self.push(line);
    }

    fn trace_reduce(&mut self, _grammar: &Grammar, _rule: RuleId, pattern: usize, value: &Value) {
        if self.verbosity < Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        self.push(format!(
            "{} {}",
            c.paint(c.dim, &format!("#{pattern} =>")),
            value.format(false, c)
        ));
    }

    fn trace_exit(&mut self, grammar: &Grammar, rule: RuleId, _value: &Value) {
        self.indent = self.indent.saturating_sub(1);
        let c = self.colors;
        self.push(format!("{} {}", c.paint(c.dim, "<"), c.paint(c.blue, grammar.rule_name(rule))));
    }

    fn trace_unwind(&mut self, grammar: &Grammar, rule: RuleId, fatal: bool) {
        self.indent = self.indent.saturating_sub(1);
        let c = self.colors;
        let what = if fatal { "abort" } else { "unwind" };
        self.push(format!("{} {}", c.paint(c.red, what), c.paint(c.blue, grammar.rule_name(rule))));
    }
}
