#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the Protean engine and CLI.
//!
//! - [`Interner`]/[`Symbol`]: name interning for rule and token-kind names
//! - [`Colors`]: ANSI palette for trace and value output
//! - [`grammar`]: on-disk grammar definition format

pub mod grammar;

mod colors;
mod interner;


pub use colors::Colors;
pub use interner::{Interner, Symbol};
