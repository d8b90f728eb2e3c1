//! The rule registry.
//!
//! Rules are owned here and refer to each other by interned name, so cycles in
//! the rule graph never become ownership cycles. Every mutation drops the
//! transition tables; they are rebuilt in full before the next dispatch.

use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use protean_core::{Interner, Symbol};

use super::builder::RuleBuilder;
use super::element::{self, END_KIND, Element, IDENTIFIER_KIND};
use super::error::GrammarError;
use super::pattern::{Action, Pattern};
use super::rule::{Rule, RuleId};
use crate::diagnostics::Diagnostics;
use crate::scanner::TokenKind;
use crate::transitions::{self, Transitions};

#[derive(Debug, Default)]
pub struct Grammar {
    name: String,
    interner: Interner,
    rules: Vec<Rule>,
    by_name: IndexMap<Symbol, RuleId>,
    kinds: IndexSet<Symbol>,
    transitions: Option<Transitions>,
    last_declared: Option<RuleId>,
    /// Bumped on every mutation.
    generation: u64,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    /// Intern a name for use in hand-built [`Element`]s.
    pub fn intern(&mut self, name: &str) -> Symbol {
        self.interner.intern(name)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // --- token kinds -------------------------------------------------------

    /// Declare a variable token kind. Declaring twice returns the same kind.
    pub fn declare_kind(&mut self, name: &str) -> Result<TokenKind, GrammarError> {
        if name == IDENTIFIER_KIND || name == END_KIND {
            return Err(GrammarError::ReservedKind(name.to_owned()));
        }
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(GrammarError::InvalidElement {
                element: name.to_owned(),
                reason: "kind names must be non-empty and contain no whitespace",
            });
        }
        let sym = self.interner.intern(name);
        if self.kinds.insert(sym) {
            self.invalidate();
        }
        Ok(TokenKind::Variable(sym))
    }

    /// Look up a kind by name, including the reserved `identifier` and `end`.
    pub fn kind(&self, name: &str) -> Option<TokenKind> {
        match name {
            IDENTIFIER_KIND => Some(TokenKind::Identifier),
            END_KIND => Some(TokenKind::EndOfInput),
            _ => self
                .interner
                .get(name)
                .filter(|sym| self.kinds.contains(sym))
                .map(TokenKind::Variable),
        }
    }

    pub fn is_declared(&self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Variable(sym) => self.kinds.contains(&sym),
            TokenKind::Identifier | TokenKind::EndOfInput => true,
        }
    }

    /// Declared variable kinds, in declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.kinds.iter().copied().map(TokenKind::Variable)
    }

    pub fn kind_name(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::EndOfInput => END_KIND,
            TokenKind::Identifier => IDENTIFIER_KIND,
            TokenKind::Variable(sym) => self.interner.resolve(sym),
        }
    }

    // --- rules -------------------------------------------------------------

    /// Declare a new, empty rule and make it the most recently declared one.
    pub fn add_rule(&mut self, name: &str) -> Result<RuleId, GrammarError> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(GrammarError::InvalidElement {
                element: name.to_owned(),
                reason: "rule names must be non-empty and contain no whitespace",
            });
        }
        let sym = self.interner.intern(name);
        if self.by_name.contains_key(&sym) {
            return Err(GrammarError::DuplicateRule(name.to_owned()));
        }
        let id = RuleId::new(self.rules.len());
        self.rules.push(Rule::new(sym));
        self.by_name.insert(sym, id);
        self.last_declared = Some(id);
        self.invalidate();
        Ok(id)
    }

    /// Declare a rule and add its patterns fluently.
    pub fn define(&mut self, name: &str) -> RuleBuilder<'_> {
        RuleBuilder::new(self, name)
    }

    /// Append a pattern written in specifier notation. Returns its index.
    pub fn add_pattern(
        &mut self,
        rule: RuleId,
        spec: &str,
        action: Option<Action>,
    ) -> Result<usize, GrammarError> {
        let elements = element::parse_spec(spec, &mut self.interner)?;
        self.push_pattern(rule, Pattern::new(elements, action))
    }

    /// Append a prebuilt pattern. Returns its index.
    pub fn push_pattern(&mut self, rule: RuleId, pattern: Pattern) -> Result<usize, GrammarError> {
        if pattern.elements().is_empty() {
            return Err(GrammarError::InvalidElement {
                element: String::new(),
                reason: "a pattern needs at least one element",
            });
        }
        let index = self.rules[rule.index()].push(pattern);
        self.invalidate();
        Ok(index)
    }

    /// Add a pattern to an existing rule by name.
    ///
    /// This is the self-extension entry point: semantic actions call it
    /// mid-parse, and the engine rebuilds all tables before its next dispatch.
    pub fn extend(
        &mut self,
        rule: &str,
        spec: &str,
        action: Option<Action>,
    ) -> Result<usize, GrammarError> {
        let id = self
            .rule_id(rule)
            .ok_or_else(|| GrammarError::UndefinedRule(rule.to_owned()))?;
        self.add_pattern(id, spec, action)
    }

    pub fn mark_optional(&mut self) -> Result<(), GrammarError> {
        let id = self.last_declared.ok_or(GrammarError::NoRuleDeclared)?;
        self.set_optional(id, true);
        Ok(())
    }

    pub fn mark_repeatable(&mut self) -> Result<(), GrammarError> {
        let id = self.last_declared.ok_or(GrammarError::NoRuleDeclared)?;
        self.set_repeatable(id, true);
        Ok(())
    }

    pub fn set_optional(&mut self, rule: RuleId, value: bool) {
        self.rules[rule.index()].set_optional(value);
        self.invalidate();
    }

    pub fn set_repeatable(&mut self, rule: RuleId, value: bool) {
        self.rules[rule.index()].set_repeatable(value);
        self.invalidate();
    }

    pub fn rule_id(&self, name: &str) -> Option<RuleId> {
        let sym = self.interner.get(name)?;
        self.rule_by_symbol(sym)
    }

    pub fn rule_by_symbol(&self, sym: Symbol) -> Option<RuleId> {
        self.by_name.get(&sym).copied()
    }

    /// # Panics
    /// Panics if `id` was not issued by this grammar.
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    pub fn rule_name(&self, id: RuleId) -> &str {
        self.interner.resolve(self.rule(id).name())
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (RuleId::new(i), rule))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub(crate) fn pattern(&self, rule: RuleId, index: usize) -> Option<Rc<Pattern>> {
        self.rule(rule).pattern(index).cloned()
    }

    /// Render an element in specifier notation.
    pub fn describe_element(&self, element: &Element) -> String {
        element::describe(element, &self.interner)
    }

    // --- transition tables -------------------------------------------------

    /// Whether the tables must be rebuilt before dispatching.
    pub fn is_dirty(&self) -> bool {
        self.transitions.is_none()
    }

    pub fn transitions(&self) -> Option<&Transitions> {
        self.transitions.as_ref()
    }

    /// Recompute every rule's table from scratch.
    pub fn rebuild(&mut self) -> Result<&Transitions, GrammarError> {
        self.transitions = None;
        self.ensure_transitions()
    }

    /// Rebuild only when a mutation invalidated the tables.
    pub fn ensure_transitions(&mut self) -> Result<&Transitions, GrammarError> {
        let built = match self.transitions.take() {
            Some(built) => built,
            None => transitions::build(self)?,
        };
        Ok(self.transitions.insert(built))
    }

    /// Validate references and token kinds of every rule.
    ///
    /// Undeclared kinds are reported to `diagnostics`; undefined rules are fatal.
    pub fn check(&self, diagnostics: &mut Diagnostics) -> Result<(), GrammarError> {
        for (id, _) in self.rules() {
            transitions::check_rule(self, id, diagnostics)?;
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.transitions = None;
        self.generation += 1;
    }
}
