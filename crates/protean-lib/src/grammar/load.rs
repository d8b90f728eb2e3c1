//! Building a [`Grammar`] from a definition file.

use protean_core::grammar::GrammarDef;

use super::actions::BuiltinAction;
use super::error::GrammarError;
use super::registry::Grammar;

impl Grammar {
    /// Declare the kinds and rules of `def`, in file order.
    ///
    /// Rules are not checked here; references may point forward, and
    /// undefined ones surface when tables are built.
    pub fn from_def(def: &GrammarDef) -> Result<Self, GrammarError> {
        let mut grammar = Grammar::with_name(def.name.as_str());

        for kind in &def.kinds {
            grammar.declare_kind(kind)?;
        }

        for (name, rule) in &def.rules {
            let id = grammar.add_rule(name)?;
            for pattern in &rule.patterns {
                let action = match pattern.action.as_deref() {
                    None => None,
                    Some(action) => BuiltinAction::from_name(action)
                        .ok_or_else(|| GrammarError::UnknownAction {
                            rule: name.clone(),
                            action: action.to_owned(),
                        })?
                        .action(),
                };
                grammar.add_pattern(id, &pattern.elements, action)?;
            }
            if rule.optional {
                grammar.mark_optional()?;
            }
            if rule.repeatable {
                grammar.mark_repeatable()?;
            }
        }

        Ok(grammar)
    }
}

impl TryFrom<&GrammarDef> for Grammar {
    type Error = GrammarError;

    fn try_from(def: &GrammarDef) -> Result<Self, Self::Error> {
        Self::from_def(def)
    }
}
