//! Grammar definition types.

use serde::{Serialize, Serializer};

/// Complete grammar definition.
///
/// Serializes to the same shape it is read from, with every pattern in the
/// long form.
#[derive(Debug, Clone, Serialize)]
pub struct GrammarDef {
    /// Grammar name, used in messages only.
    pub name: String,
    /// Start rule; defaults to the first rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Declared variable token kinds (e.g. `string`, `number`).
    pub kinds: Vec<String>,
    /// Rules, preserving definition order.
    #[serde(serialize_with = "rules_as_map")]
    pub rules: Vec<(String, RuleDef)>,
}

impl GrammarDef {
    /// The explicit start rule, or the first rule in definition order.
    pub fn start_rule(&self) -> Option<&str> {
        self.start
            .as_deref()
            .or_else(|| self.rules.first().map(|(name, _)| name.as_str()))
    }
}

fn rules_as_map<S>(rules: &[(String, RuleDef)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(rules.iter().map(|(name, rule)| (name, rule)))
}

/// One rule with its alternatives.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleDef {
    pub optional: bool,
    pub repeatable: bool,
    pub patterns: Vec<PatternDef>,
}

/// One alternative: element specifiers plus an optional action name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternDef {
    /// Whitespace-separated specifiers: `@rule`, `$kind`, `'literal`.
    pub elements: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}
