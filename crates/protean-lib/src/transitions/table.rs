use indexmap::{IndexMap, IndexSet};

use crate::grammar::{Grammar, LITERAL_PREFIX, RuleId, VARIABLE_PREFIX};
use crate::scanner::TokenKind;

/// Concrete signature of the token that selects a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FirstKey {
    Literal(String),
    Variable(TokenKind),
    EndOfInput,
}

impl FirstKey {
    /// Human-readable form for messages: `'hello`, `$string`, `end of input`.
    pub fn describe(&self, grammar: &Grammar) -> String {
        match self {
            FirstKey::Literal(text) => format!("{LITERAL_PREFIX}{text}"),
            FirstKey::Variable(kind) => format!("{VARIABLE_PREFIX}{}", grammar.kind_name(*kind)),
            FirstKey::EndOfInput => "end of input".to_owned(),
        }
    }
}

/// Dispatch table of one rule.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    /// First keys of each pattern, in pattern order.
    patterns: Vec<IndexSet<FirstKey>>,
    dispatch: IndexMap<FirstKey, usize>,
}

impl RuleTable {
    pub(crate) fn new(patterns: Vec<IndexSet<FirstKey>>, dispatch: IndexMap<FirstKey, usize>) -> Self {
        Self { patterns, dispatch }
    }

    /// Pattern selected by `key`.
    pub fn lookup(&self, key: &FirstKey) -> Option<usize> {
        self.dispatch.get(key).copied()
    }

    pub fn pattern_keys(&self, pattern: usize) -> Option<&IndexSet<FirstKey>> {
        self.patterns.get(pattern)
    }

    /// Every key this rule can start with.
    pub fn keys(&self) -> impl Iterator<Item = &FirstKey> {
        self.dispatch.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.dispatch.is_empty()
    }
}

/// Dispatch tables for every rule of a grammar, indexed by [`RuleId`].
#[derive(Debug, Clone, Default)]
pub struct Transitions {
    tables: Vec<RuleTable>,
}

impl Transitions {
    pub(crate) fn new(tables: Vec<RuleTable>) -> Self {
        Self { tables }
    }

    pub fn table(&self, rule: RuleId) -> Option<&RuleTable> {
        self.tables.get(rule.index())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
