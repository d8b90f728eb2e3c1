pub mod check;
pub mod dump;
pub mod parse;
pub mod run_common;
pub mod trace;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod run_common_tests;
