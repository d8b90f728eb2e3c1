use std::rc::Rc;

use super::error::GrammarError;
use super::registry::Grammar;
use super::rule::RuleId;
use super::value::Value;
use crate::engine::{ActionContext, Unwind};

/// Fluent rule declaration, returned by [`Grammar::define`].
///
/// The first error is kept and reported by [`finish`](Self::finish); later
/// calls become no-ops.
#[must_use = "rule builder does nothing until .finish() is called"]
pub struct RuleBuilder<'g> {
    grammar: &'g mut Grammar,
    rule: Result<RuleId, GrammarError>,
}

impl<'g> RuleBuilder<'g> {
    pub(crate) fn new(grammar: &'g mut Grammar, name: &str) -> Self {
        let rule = grammar.add_rule(name);
        Self { grammar, rule }
    }

    /// Add a pattern whose result is the default reduction.
    pub fn pattern(mut self, spec: &str) -> Self {
        if let Ok(id) = self.rule {
            if let Err(e) = self.grammar.add_pattern(id, spec, None) {
                self.rule = Err(e);
            }
        }
        self
    }

    /// Add a pattern with a semantic action.
    pub fn pattern_with<F>(mut self, spec: &str, action: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>, Vec<Value>) -> Result<Value, Unwind> + 'static,
    {
        if let Ok(id) = self.rule {
            if let Err(e) = self.grammar.add_pattern(id, spec, Some(Rc::new(action))) {
                self.rule = Err(e);
            }
        }
        self
    }

    pub fn optional(self) -> Self {
        if let Ok(id) = self.rule {
            self.grammar.set_optional(id, true);
        }
        self
    }

    pub fn repeatable(self) -> Self {
        if let Ok(id) = self.rule {
            self.grammar.set_repeatable(id, true);
        }
        self
    }

    pub fn finish(self) -> Result<RuleId, GrammarError> {
        self.rule
    }
}
