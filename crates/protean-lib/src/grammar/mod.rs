//! Rule and pattern data model.
//!
//! A [`Grammar`] owns its [`Rule`]s; each rule owns an ordered list of
//! [`Pattern`]s. Rules may be added and extended at any time, including from a
//! semantic action in the middle of a parse.

mod actions;
mod builder;
mod element;
mod error;
mod load;
mod pattern;
mod registry;
mod rule;
mod value;

#[cfg(test)]
mod element_tests;
#[cfg(test)]
mod registry_tests;

pub use actions::BuiltinAction;
pub use builder::RuleBuilder;
pub use element::{
    END_KIND, Element, IDENTIFIER_KIND, LITERAL_PREFIX, REFERENCE_PREFIX, VARIABLE_PREFIX,
};
pub use error::GrammarError;
pub use pattern::{Action, Pattern};
pub use registry::Grammar;
pub use rule::{Rule, RuleId};
pub use value::Value;
