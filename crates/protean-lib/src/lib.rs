//! Protean: a self-extensible grammar engine.
//!
//! Rules are matched by recursive descent over a live token stream. Semantic
//! actions may add patterns to existing rules while the input is being parsed;
//! the new syntax is accepted from the next dispatch on.
//!
//! # Example
//!
//! ```
//! use protean_lib::grammar::{Grammar, Value};
//! use protean_lib::scanner::TextScanner;
//! use protean_lib::Parser;
//!
//! let mut grammar = Grammar::new();
//! grammar
//!     .define("greeting")
//!     .pattern_with("'hello $identifier", |_, mut values| Ok(values.remove(1)))
//!     .finish()
//!     .expect("valid rule");
//!
//! let mut scanner = TextScanner::new("hello world", &grammar);
//! let (value, _) = Parser::new(&mut grammar)
//!     .parse("greeting", &mut scanner)
//!     .expect("parses");
//! assert_eq!(value, Value::string("world"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod engine;
pub mod grammar;
pub mod scanner;
pub mod transitions;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use engine::{ActionContext, ParseLimits, Parser, Unwind};
pub use grammar::{Grammar, GrammarError, Value};

/// Result of a pass that can succeed with diagnostics attached.
///
/// Diagnostics that did not stop the pass travel with the output. Failures
/// use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Errors returned by the engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The grammar is malformed. Fix the grammar, not the input.
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// The input does not match; details were reported to the diagnostics.
    #[error("parse failed with {} errors", .0.error_count())]
    ParseFailed(Diagnostics),

    /// Input nested deeper than the configured frame limit.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// Too many dispatch decisions for one parse.
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Engine invariant broken.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this is a configuration or engine failure rather than bad input.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::ParseFailed(_))
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::ParseFailed(d) => Some(d),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
