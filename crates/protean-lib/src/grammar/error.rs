/// A malformed grammar.
///
/// These abort table building. They describe the grammar, not the input, so
/// callers should treat them as configuration failures rather than parse errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("rule `{rule}` references undefined rule `{referenced}`")]
    UnknownRule { rule: String, referenced: String },

    #[error("rule `{0}` is not defined")]
    UndefinedRule(String),

    #[error("start rule `{0}` is not defined")]
    UnknownStartRule(String),

    #[error("rule `{0}` has no patterns")]
    EmptyRule(String),

    #[error("rule `{rule}` is ambiguous: {key} starts both pattern #{first} and pattern #{second}")]
    Ambiguous {
        rule: String,
        key: String,
        first: usize,
        second: usize,
    },

    #[error("rule `{0}` is already defined")]
    DuplicateRule(String),

    #[error("invalid element `{element}`: {reason}")]
    InvalidElement { element: String, reason: &'static str },

    #[error("token kind `{0}` is reserved")]
    ReservedKind(String),

    #[error("no rule has been declared yet")]
    NoRuleDeclared,

    #[error("rule `{rule}` uses unknown action `{action}`")]
    UnknownAction { rule: String, action: String },
}
