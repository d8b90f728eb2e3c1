//! The parse driver.
//!
//! Every rule invocation loops through: fetch a lookahead, dispatch on it,
//! walk the selected pattern's elements, reduce, and repeat while the rule is
//! repeatable. Invocations and frames live on [`ParseStack`], and a reference
//! is a [`Step::Call`] rather than a native call, so deep input cannot
//! overflow the thread's stack. Errors unwind to [`Parser::parse`] through
//! `Result`.

use std::rc::Rc;

use indexmap::IndexSet;
use rowan::TextRange;

use super::context::{ActionContext, TokenFilter};
use super::error::Unwind;
use super::frame::{Frame, Invocation, ParseStack};
use super::limits::ParseLimits;
use super::trace::{NoopTracer, Tracer};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grammar::{Element, Grammar, GrammarError, RuleId, Value};
use crate::scanner::{Scanner, Token, TokenBuffer, TokenKind};
use crate::transitions::FirstKey;
use crate::{Error, PassResult};

/// Parses token streams against a mutable grammar.
///
/// The parser borrows the grammar mutably, so no other parse can run over it
/// at the same time. All per-parse state lives in a session created by each
/// call to [`parse`](Self::parse).
pub struct Parser<'g> {
    grammar: &'g mut Grammar,
    limits: ParseLimits,
    allowed: Option<Vec<TokenKind>>,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g mut Grammar) -> Self {
        Self {
            grammar,
            limits: ParseLimits::default(),
            allowed: None,
        }
    }

    pub fn limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Restrict which declared kinds the next parses accept.
    pub fn limit_token_set(&mut self, allowed: &[TokenKind]) -> &mut Self {
        self.allowed = Some(allowed.to_vec());
        self
    }

    pub fn allow_all_tokens(&mut self) -> &mut Self {
        self.allowed = None;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &*self.grammar
    }

    /// Parse from `start` until the start rule returns.
    ///
    /// On success the value is returned together with any diagnostics that did
    /// not stop the parse, such as skipped characters.
    pub fn parse(&mut self, start: &str, scanner: &mut dyn Scanner) -> PassResult<Value> {
        self.parse_traced(start, scanner, &mut NoopTracer)
    }

    pub fn parse_traced<T: Tracer>(
        &mut self,
        start: &str,
        scanner: &mut dyn Scanner,
        tracer: &mut T,
    ) -> PassResult<Value> {
        // Grammar warnings have no position in the input; `Grammar::check`
        // surfaces them to callers that want them.
        self.grammar.check(&mut Diagnostics::new())?;
        self.grammar.rebuild()?;
        let start = self
            .grammar
            .rule_id(start)
            .ok_or_else(|| GrammarError::UnknownStartRule(start.to_owned()))?;

        let mut filter = TokenFilter::default();
        if let Some(allowed) = &self.allowed {
            filter.limit(self.grammar, allowed);
        }

        let mut session = Session {
            grammar: &mut *self.grammar,
            diagnostics: Diagnostics::new(),
            tokens: TokenBuffer::new(scanner),
            stack: ParseStack::default(),
            expected: IndexSet::new(),
            filter,
            limits: self.limits,
            fuel: self.limits.exec_fuel,
            tracer,
        };
        session.sync_filter();

        match session.run(start) {
            Ok(value) => Ok((value, session.diagnostics)),
            Err(Unwind::Reported) => Err(Error::ParseFailed(session.diagnostics)),
            Err(Unwind::Fatal(e)) => Err(e),
        }
    }
}

/// State of one parse. Never shared between parses.
struct Session<'p, 's, T: Tracer> {
    grammar: &'p mut Grammar,
    diagnostics: Diagnostics,
    tokens: TokenBuffer<'s>,
    stack: ParseStack,
    /// Keys that would have been accepted since the last consumed token.
    expected: IndexSet<FirstKey>,
    filter: TokenFilter,
    limits: ParseLimits,
    fuel: u32,
    tracer: &'p mut T,
}

/// What the driver does next.
enum Step {
    /// Begin an invocation of a rule.
    Call(RuleId),
    /// Fetch a lookahead and select a pattern for the innermost invocation.
    Dispatch,
    /// Match the innermost frame's remaining elements.
    Advance,
    /// The innermost frame's action produced a value.
    Reduced(Value),
    /// The innermost invocation is finished.
    Return(Value),
    Done(Value),
}

impl<T: Tracer> Session<'_, '_, T> {
    fn run(&mut self, start: RuleId) -> Result<Value, Unwind> {
        let mut step = Step::Call(start);
        loop {
            let next = match step {
                Step::Call(rule) => Ok(self.call(rule)),
                Step::Dispatch => self.select(),
                Step::Advance => self.advance(),
                Step::Reduced(value) => self.reduced(value),
                Step::Return(value) => self.return_to_caller(value),
                Step::Done(value) => return Ok(value),
            };
            step = match next {
                Ok(step) => step,
                Err(unwind) => {
                    self.abandon(unwind.is_fatal());
                    return Err(unwind);
                }
            };
        }
    }

    fn call(&mut self, rule: RuleId) -> Step {
        self.tracer.trace_enter(self.grammar, rule, self.stack.depth());
        self.stack.push_call(Invocation::new(rule));
        Step::Dispatch
    }

    fn select(&mut self) -> Result<Step, Unwind> {
        let (rule, first) = {
            let call = self.top_call()?;
            (call.rule, call.first)
        };

        let token = self.tokens.next(&mut self.diagnostics);
        self.check_allowed(&token)?;
        self.consume_fuel()?;
        self.refresh_tables()?;

        // Flags are read per iteration: an action may have changed them.
        let (optional, repeatable) = {
            let r = self.grammar.rule(rule);
            (r.is_optional(), r.is_repeatable())
        };

        let Some(index) = self.dispatch(rule, &token)? else {
            self.note_expected(rule)?;
            let accepted = optional || (repeatable && !first);
            self.tracer
                .trace_no_match(self.grammar, rule, &token, accepted);
            if !accepted {
                return Err(self.unexpected(&token));
            }
            self.tokens.return_token(token)?;
            let acc = std::mem::take(&mut self.top_call()?.acc);
            return Ok(Step::Return(if repeatable {
                Value::List(acc)
            } else {
                Value::Null
            }));
        };

        self.tracer.trace_dispatch(self.grammar, rule, index, &token);
        self.top_call()?.repeatable = repeatable;

        let pattern = self
            .grammar
            .pattern(rule, index)
            .ok_or_else(|| Error::Internal(format!("pattern #{index} vanished")))?;
        if self.stack.depth() >= self.limits.recursion_limit as usize {
            return Err(Unwind::Fatal(Error::RecursionLimitExceeded));
        }
        self.stack.push(Frame::new(rule, index, pattern, token.span));

        // The first element matches the selecting token again.
        self.tokens.return_token(token)?;
        Ok(Step::Advance)
    }

    fn advance(&mut self) -> Result<Step, Unwind> {
        loop {
            let (rule, pattern, cursor) = {
                let frame = self.top_frame()?;
                (frame.rule, Rc::clone(&frame.pattern), frame.cursor)
            };
            let Some(element) = pattern.elements().get(cursor) else {
                let frame = self
                    .stack
                    .pop()
                    .ok_or_else(|| Error::Internal("parse stack underflow".to_owned()))?;
                return Ok(Step::Reduced(self.reduce(frame)?));
            };
            self.top_frame()?.cursor += 1;

            let (value, span) = match element {
                Element::Reference(sym) => {
                    let target = self.grammar.rule_by_symbol(*sym).ok_or_else(|| {
                        GrammarError::UnknownRule {
                            rule: self.grammar.rule_name(rule).to_owned(),
                            referenced: self.grammar.resolve(*sym).to_owned(),
                        }
                    })?;
                    let at = self.tokens.position();
                    self.top_frame()?.call_start = at;
                    return Ok(Step::Call(target));
                }
                Element::Literal(text) => {
                    let t = self.take()?;
                    if t.text != *text {
                        return Err(self.keyword_expected(text, &t));
                    }
                    self.consumed(element, &t);
                    (Value::String(t.text), t.span)
                }
                Element::Variable(kind) => {
                    let t = self.take()?;
                    if t.kind != *kind {
                        return Err(self.token_type_expected(*kind, &t));
                    }
                    self.consumed(element, &t);
                    (Value::String(t.text), t.span)
                }
                Element::EndOfInput => {
                    let t = self.take()?;
                    if !t.is_end() {
                        self.diagnostics
                            .report(DiagnosticKind::GarbageAtEnd, t.span)
                            .message(format!("found `{}`", t.text))
                            .emit();
                        return Err(Unwind::Reported);
                    }
                    self.consumed(element, &t);
                    (Value::Null, t.span)
                }
            };
            self.top_frame()?.collect(value, span);
        }
    }

    fn reduced(&mut self, value: Value) -> Result<Step, Unwind> {
        let call = self.top_call()?;
        if !call.repeatable {
            return Ok(Step::Return(value));
        }
        value.append_to(&mut call.acc);
        call.first = false;
        Ok(Step::Dispatch)
    }

    /// Hand a finished invocation's value to the frame that referenced it.
    fn return_to_caller(&mut self, value: Value) -> Result<Step, Unwind> {
        let call = self
            .stack
            .pop_call()
            .ok_or_else(|| Error::Internal("no active rule to return from".to_owned()))?;
        self.tracer.trace_exit(self.grammar, call.rule, &value);
        if !self.stack.has_calls() {
            return Ok(Step::Done(value));
        }

        let end = self.tokens.position();
        let frame = self.top_frame()?;
        let span = TextRange::new(frame.call_start, end.max(frame.call_start));
        frame.collect(value, span);
        Ok(Step::Advance)
    }

    /// Drop every active invocation, innermost first.
    fn abandon(&mut self, fatal: bool) {
        while let Some(call) = self.stack.pop_call() {
            self.tracer.trace_unwind(self.grammar, call.rule, fatal);
        }
        self.stack.clear_frames();
    }

    fn reduce(&mut self, frame: Frame) -> Result<Value, Unwind> {
        let span = frame.span();
        let Frame {
            rule,
            pattern_index,
            pattern,
            values,
            spans,
            ..
        } = frame;

        let mut cx = ActionContext {
            grammar: &mut *self.grammar,
            diagnostics: &mut self.diagnostics,
            filter: &mut self.filter,
            rule,
            span,
            spans: &spans,
            depth: self.stack.depth() + 1,
        };
        let value = pattern.reduce(&mut cx, values)?;
        self.sync_filter();

        self.tracer
            .trace_reduce(self.grammar, rule, pattern_index, &value);
        Ok(value)
    }

    fn take(&mut self) -> Result<Token, Unwind> {
        let t = self.tokens.next(&mut self.diagnostics);
        self.check_allowed(&t)?;
        Ok(t)
    }

    fn consumed(&mut self, element: &Element, token: &Token) {
        self.expected.clear();
        self.tracer.trace_consume(self.grammar, element, token);
    }

    fn top_frame(&mut self) -> Result<&mut Frame, Unwind> {
        self.stack
            .top_mut()
            .ok_or_else(|| Unwind::Fatal(Error::Internal("parse stack underflow".to_owned())))
    }

    fn top_call(&mut self) -> Result<&mut Invocation, Unwind> {
        self.stack
            .top_call_mut()
            .ok_or_else(|| Unwind::Fatal(Error::Internal("no active rule".to_owned())))
    }

    fn check_allowed(&mut self, token: &Token) -> Result<(), Unwind> {
        if !self.filter.is_disallowed(token.kind) {
            return Ok(());
        }
        self.diagnostics
            .report(DiagnosticKind::UnsupportedToken, token.span)
            .message(format!(
                "`{}` (${}) is not allowed here",
                token.text,
                self.grammar.kind_name(token.kind)
            ))
            .emit();
        Err(Unwind::Reported)
    }

    fn consume_fuel(&mut self) -> Result<(), Unwind> {
        if self.fuel == 0 {
            return Err(Unwind::Fatal(Error::ExecFuelExhausted));
        }
        self.fuel -= 1;
        Ok(())
    }

    /// Rebuild every table if an action changed the grammar.
    fn refresh_tables(&mut self) -> Result<(), Unwind> {
        if !self.grammar.is_dirty() {
            return Ok(());
        }
        self.grammar.rebuild()?;
        self.tracer.trace_rebuild(self.grammar);
        Ok(())
    }

    fn sync_filter(&mut self) {
        if let Some(kinds) = self.filter.take_change(self.grammar) {
            self.tokens.scanner_mut().limit_token_set(&kinds);
        }
    }

    fn note_expected(&mut self, rule: RuleId) -> Result<(), Unwind> {
        let table = self
            .grammar
            .transitions()
            .and_then(|t| t.table(rule))
            .ok_or_else(|| Error::Internal("tables missing after dispatch".to_owned()))?;
        self.expected.extend(table.keys().cloned());
        Ok(())
    }

    fn expected_list(&self) -> String {
        self.expected
            .iter()
            .map(|k| k.describe(self.grammar))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn describe_token(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::EndOfInput => "end of input".to_owned(),
            TokenKind::Identifier => format!("`{}`", token.text),
            kind => format!("`{}` (${})", token.text, self.grammar.kind_name(kind)),
        }
    }

    fn unexpected(&mut self, token: &Token) -> Unwind {
        let found = self.describe_token(token);
        let expected = self.expected_list();
        let mut report = self.diagnostics.report(DiagnosticKind::UnexpectedToken, token.span);
        report = if expected.is_empty() {
            report.message(found)
        } else {
            report.message(format!("{found}, expecting one of: {expected}"))
        };
        report.emit();
        Unwind::Reported
    }

    fn keyword_expected(&mut self, text: &str, token: &Token) -> Unwind {
        let found = self.describe_token(token);
        let expected = self.expected_list();
        let mut report = self
            .diagnostics
            .report(DiagnosticKind::KeywordExpected, token.span)
            .message(format!("'{text}', found {found}"));
        if !expected.is_empty() {
            report = report.hint(format!("also acceptable here: {expected}"));
        }
        report.emit();
        Unwind::Reported
    }

    fn token_type_expected(&mut self, kind: TokenKind, token: &Token) -> Unwind {
        let found = self.describe_token(token);
        let wanted = self.grammar.kind_name(kind).to_owned();
        self.diagnostics
            .report(DiagnosticKind::TokenTypeExpected, token.span)
            .message(format!("${wanted}, found {found}"))
            .emit();
        Unwind::Reported
    }
}
