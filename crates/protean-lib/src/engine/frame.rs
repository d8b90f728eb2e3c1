//! Parse stack: active rule invocations and the patterns they are matching.
//!
//! Both live on the heap, so input nesting never grows the native stack.

use std::rc::Rc;

use rowan::{TextRange, TextSize};

use crate::grammar::{Pattern, RuleId, Value};

/// One matched pattern that is still collecting values.
#[derive(Debug)]
pub struct Frame {
    pub rule: RuleId,
    pub pattern_index: usize,
    pub pattern: Rc<Pattern>,
    pub values: Vec<Value>,
    /// Position of each collected value.
    pub spans: Vec<TextRange>,
    pub start: TextSize,
    pub end: TextSize,
    /// Next element to match.
    pub cursor: usize,
    /// Where the reference being parsed started.
    pub call_start: TextSize,
}

impl Frame {
    pub fn new(rule: RuleId, pattern_index: usize, pattern: Rc<Pattern>, at: TextRange) -> Self {
        let capacity = pattern.elements().len();
        Self {
            rule,
            pattern_index,
            pattern,
            values: Vec::with_capacity(capacity),
            spans: Vec::with_capacity(capacity),
            start: at.start(),
            end: at.start(),
            cursor: 0,
            call_start: at.start(),
        }
    }

    pub fn collect(&mut self, value: Value, span: TextRange) {
        self.values.push(value);
        self.spans.push(span);
        self.end = self.end.max(span.end());
    }

    pub fn span(&self) -> TextRange {
        TextRange::new(self.start, self.end.max(self.start))
    }
}

/// One rule invocation awaiting its value.
#[derive(Debug)]
pub struct Invocation {
    pub rule: RuleId,
    /// Values of earlier matches of a repeatable rule.
    pub acc: Vec<Value>,
    pub first: bool,
    /// Read when the current pattern was selected.
    pub repeatable: bool,
}

impl Invocation {
    pub fn new(rule: RuleId) -> Self {
        Self {
            rule,
            acc: Vec::new(),
            first: true,
            repeatable: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct ParseStack {
    frames: Vec<Frame>,
    calls: Vec<Invocation>,
}

impl ParseStack {
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    /// Number of active frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_call(&mut self, call: Invocation) {
        self.calls.push(call);
    }

    pub fn pop_call(&mut self) -> Option<Invocation> {
        self.calls.pop()
    }

    pub fn top_call_mut(&mut self) -> Option<&mut Invocation> {
        self.calls.last_mut()
    }

    pub fn has_calls(&self) -> bool {
        !self.calls.is_empty()
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }
}
