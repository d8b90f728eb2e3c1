use crate::Error;
use crate::grammar::GrammarError;

/// Why a rule invocation stopped early.
///
/// Both variants unwind every active frame back to the top-level parse.
#[derive(Debug)]
pub enum Unwind {
    /// A user-input error that has already been reported to diagnostics.
    Reported,
    /// Grammar misconfiguration or an engine fault. Never reported twice.
    Fatal(Error),
}

impl Unwind {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Unwind::Fatal(_))
    }
}

impl From<Error> for Unwind {
    fn from(e: Error) -> Self {
        Unwind::Fatal(e)
    }
}

impl From<GrammarError> for Unwind {
    fn from(e: GrammarError) -> Self {
        Unwind::Fatal(Error::Grammar(e))
    }
}
