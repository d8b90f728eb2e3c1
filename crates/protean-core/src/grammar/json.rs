//! JSON deserialization for grammar definition files.
//!
//! Patterns accept a short form (a bare spec string) and a long form
//! (`{ "elements": ..., "action": ... }`).

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{GrammarDef, PatternDef, RuleDef};

/// Error while loading a grammar definition.
#[derive(Debug)]
pub enum DefinitionError {
    Json(serde_json::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid grammar definition: {e}"),
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for DefinitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl GrammarDef {
    /// Parse a definition from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let raw: RawGrammar = serde_json::from_str(json).map_err(DefinitionError::Json)?;
        Ok(raw.into())
    }

    /// Read and parse a definition file.
    pub fn from_path(path: &Path) -> Result<Self, DefinitionError> {
        let text = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGrammar {
    #[serde(default)]
    name: String,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    kinds: Vec<String>,
    rules: IndexMap<String, RawRule>,
}

impl From<RawGrammar> for GrammarDef {
    fn from(raw: RawGrammar) -> Self {
        // IndexMap keeps file order, which is also declaration order.
        Self {
            name: raw.name,
            start: raw.start,
            kinds: raw.kinds,
            rules: raw.rules.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    repeatable: bool,
    #[serde(default)]
    patterns: Vec<RawPattern>,
}

impl From<RawRule> for RuleDef {
    fn from(raw: RawRule) -> Self {
        Self {
            optional: raw.optional,
            repeatable: raw.repeatable,
            patterns: raw.patterns.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPattern {
    Short(String),
    Long {
        elements: String,
        #[serde(default)]
        action: Option<String>,
    },
}

impl From<RawPattern> for PatternDef {
    fn from(raw: RawPattern) -> Self {
        match raw {
            RawPattern::Short(elements) => PatternDef {
                elements,
                action: None,
            },
            RawPattern::Long { elements, action } => PatternDef { elements, action },
        }
    }
}
