//! First-key computation.
//!
//! Each rule is visited once. A reference to a rule that is still being
//! computed reuses the keys gathered for it so far, which terminates both
//! self-reference and mutual recursion.

use indexmap::{IndexMap, IndexSet};

use super::table::{FirstKey, RuleTable, Transitions};
use crate::grammar::{Element, Grammar, GrammarError, Pattern, RuleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    InProgress,
    Done,
}

struct Builder<'g> {
    grammar: &'g Grammar,
    state: Vec<State>,
    /// Per rule, per pattern key sets. Partial while the rule is in progress.
    keys: Vec<Vec<IndexSet<FirstKey>>>,
}

/// Build the tables for every rule from scratch.
pub fn build(grammar: &Grammar) -> Result<Transitions, GrammarError> {
    let count = grammar.rule_count();
    let mut builder = Builder {
        grammar,
        state: vec![State::NotStarted; count],
        keys: vec![Vec::new(); count],
    };

    for (id, _) in grammar.rules() {
        builder.rule_keys(id)?;
    }

    let tables = builder
        .keys
        .into_iter()
        .enumerate()
        .map(|(index, patterns)| {
            let id = RuleId::new(index);
            dispatch_table(grammar, id, patterns)
        })
        .collect::<Result<_, _>>()?;

    Ok(Transitions::new(tables))
}

impl Builder<'_> {
    /// Union of all keys of `id`.
    fn rule_keys(&mut self, id: RuleId) -> Result<IndexSet<FirstKey>, GrammarError> {
        let index = id.index();
        if self.state[index] == State::NotStarted {
            self.compute(id)?;
        }
        Ok(self.keys[index].iter().flatten().cloned().collect())
    }

    fn compute(&mut self, id: RuleId) -> Result<(), GrammarError> {
        let grammar = self.grammar;
        let rule = grammar.rule(id);
        if rule.patterns().is_empty() {
            return Err(GrammarError::EmptyRule(grammar.rule_name(id).to_owned()));
        }

        self.state[id.index()] = State::InProgress;
        for pattern in rule.patterns() {
            let keys = self.pattern_keys(id, pattern)?;
            self.keys[id.index()].push(keys);
        }
        self.state[id.index()] = State::Done;
        Ok(())
    }

    fn pattern_keys(
        &mut self,
        owner: RuleId,
        pattern: &Pattern,
    ) -> Result<IndexSet<FirstKey>, GrammarError> {
        let grammar = self.grammar;
        let mut keys = IndexSet::new();

        for element in pattern.elements() {
            match element {
                Element::Literal(text) => {
                    keys.insert(FirstKey::Literal(text.clone()));
                    break;
                }
                Element::Variable(kind) => {
                    keys.insert(FirstKey::Variable(*kind));
                    break;
                }
                Element::EndOfInput => {
                    keys.insert(FirstKey::EndOfInput);
                    break;
                }
                Element::Reference(sym) => {
                    let target = grammar.rule_by_symbol(*sym).ok_or_else(|| {
                        GrammarError::UnknownRule {
                            rule: grammar.rule_name(owner).to_owned(),
                            referenced: grammar.resolve(*sym).to_owned(),
                        }
                    })?;
                    keys.extend(self.rule_keys(target)?);
                    if !grammar.rule(target).is_optional() {
                        break;
                    }
                }
            }
        }

        Ok(keys)
    }
}

fn dispatch_table(
    grammar: &Grammar,
    id: RuleId,
    patterns: Vec<IndexSet<FirstKey>>,
) -> Result<RuleTable, GrammarError> {
    let mut dispatch: IndexMap<FirstKey, usize> = IndexMap::new();
    for (index, keys) in patterns.iter().enumerate() {
        for key in keys {
            if let Some(&first) = dispatch.get(key) {
                return Err(GrammarError::Ambiguous {
                    rule: grammar.rule_name(id).to_owned(),
                    key: key.describe(grammar),
                    first,
                    second: index,
                });
            }
            dispatch.insert(key.clone(), index);
        }
    }
    Ok(RuleTable::new(patterns, dispatch))
}
