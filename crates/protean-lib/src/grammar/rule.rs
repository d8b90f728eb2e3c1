use std::rc::Rc;

use protean_core::Symbol;

use super::pattern::Pattern;

/// Stable handle to a rule. Rules are never removed, so ids stay valid across
/// grammar extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(u32);

impl RuleId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub struct Rule {
    name: Symbol,
    // Shared so a frame can keep walking a pattern while an action extends the rule.
    patterns: Vec<Rc<Pattern>>,
    optional: bool,
    repeatable: bool,
}

impl Rule {
    pub(crate) fn new(name: Symbol) -> Self {
        Self {
            name,
            patterns: Vec::new(),
            optional: false,
            repeatable: false,
        }
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    pub fn patterns(&self) -> &[Rc<Pattern>] {
        &self.patterns
    }

    pub fn pattern(&self, index: usize) -> Option<&Rc<Pattern>> {
        self.patterns.get(index)
    }

    /// May match zero times without error.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Matches its patterns repeatedly, accumulating a list.
    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub(crate) fn push(&mut self, pattern: Pattern) -> usize {
        self.patterns.push(Rc::new(pattern));
        self.patterns.len() - 1
    }

    pub(crate) fn set_optional(&mut self, value: bool) {
        self.optional = value;
    }

    pub(crate) fn set_repeatable(&mut self, value: bool) {
        self.repeatable = value;
    }
}
