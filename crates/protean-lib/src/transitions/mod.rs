//! Per-rule dispatch tables.
//!
//! For every pattern the builder computes the set of tokens it can start with
//! and maps each of them to the pattern. Two patterns of one rule sharing a key
//! is a grammar error, found here and never during a parse.
//!
//! Tables are always rebuilt for the whole grammar. There is no incremental
//! update after a rule is extended.

mod builder;
mod check;
mod table;

#[cfg(test)]
mod builder_tests;

pub use builder::build;
pub use check::check_rule;
pub use table::{FirstKey, RuleTable, Transitions};
