//! Grammar definition files.
//!
//! A definition file describes a grammar declaratively: token kinds, rules,
//! and patterns written with the element specifier convention. Semantic
//! actions are referenced by name and resolved by the engine.

mod json;
mod types;

#[cfg(test)]
mod json_tests;

pub use json::DefinitionError;
pub use types::{GrammarDef, PatternDef, RuleDef};
