use indexmap::IndexSet;
use rowan::TextRange;

use super::error::Unwind;
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics};
use crate::grammar::{Action, Grammar, GrammarError, RuleId};
use crate::scanner::TokenKind;

/// Context-sensitive token filtering, owned by one parse session.
///
/// Only declared variable kinds can be disallowed; identifiers and the end of
/// input always pass.
#[derive(Debug, Default)]
pub(crate) struct TokenFilter {
    disallowed: IndexSet<TokenKind>,
    changed: bool,
}

impl TokenFilter {
    pub fn limit(&mut self, grammar: &Grammar, allowed: &[TokenKind]) {
        self.disallowed = grammar.kinds().filter(|k| !allowed.contains(k)).collect();
        self.changed = true;
    }

    pub fn allow_all(&mut self) {
        self.disallowed.clear();
        self.changed = true;
    }

    #[inline]
    pub fn is_disallowed(&self, kind: TokenKind) -> bool {
        self.disallowed.contains(&kind)
    }

    /// Kinds to advertise to the scanner, if the filter changed since last asked.
    pub fn take_change(&mut self, grammar: &Grammar) -> Option<Vec<TokenKind>> {
        if !std::mem::take(&mut self.changed) {
            return None;
        }
        let mut kinds = vec![TokenKind::EndOfInput, TokenKind::Identifier];
        kinds.extend(grammar.kinds().filter(|k| !self.disallowed.contains(k)));
        Some(kinds)
    }
}

/// What a semantic action can see and do.
pub struct ActionContext<'a> {
    pub(crate) grammar: &'a mut Grammar,
    pub(crate) diagnostics: &'a mut Diagnostics,
    pub(crate) filter: &'a mut TokenFilter,
    pub(crate) rule: RuleId,
    pub(crate) span: TextRange,
    pub(crate) spans: &'a [TextRange],
    pub(crate) depth: usize,
}

impl<'a> ActionContext<'a> {
    /// Source range covered by the pattern.
    pub fn span(&self) -> TextRange {
        self.span
    }

    /// Position of the `index`th collected value.
    pub fn value_span(&self, index: usize) -> Option<TextRange> {
        self.spans.get(index).copied()
    }

    pub fn rule(&self) -> RuleId {
        self.rule
    }

    pub fn rule_name(&self) -> &str {
        self.grammar.rule_name(self.rule)
    }

    /// Number of active frames, this one included.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn grammar(&self) -> &Grammar {
        &*self.grammar
    }

    /// Mutable grammar access. Any change triggers a full table rebuild before
    /// the engine dispatches again.
    pub fn grammar_mut(&mut self) -> &mut Grammar {
        &mut *self.grammar
    }

    /// Add a pattern to an existing rule.
    pub fn extend(
        &mut self,
        rule: &str,
        spec: &str,
        action: Option<Action>,
    ) -> Result<usize, GrammarError> {
        self.grammar.extend(rule, spec, action)
    }

    /// Report a diagnostic at this pattern's span.
    pub fn report(&mut self, kind: DiagnosticKind) -> DiagnosticBuilder<'_> {
        self.diagnostics.report(kind, self.span)
    }

    /// Report an error and return the unwind that aborts the parse.
    pub fn fail(&mut self, kind: DiagnosticKind, message: impl Into<String>) -> Unwind {
        self.report(kind).message(message).emit();
        Unwind::Reported
    }

    /// Disallow every declared kind not in `allowed` until changed again.
    pub fn limit_token_set(&mut self, allowed: &[TokenKind]) {
        self.filter.limit(self.grammar, allowed);
    }

    pub fn allow_all_tokens(&mut self) {
        self.filter.allow_all();
    }
}
