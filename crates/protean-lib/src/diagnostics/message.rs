use rowan::TextRange;

/// Diagnostic kinds reported during scanning, grammar checking and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Scanner
    UnterminatedString,
    InvalidCharacter,

    // Parse driver
    UnexpectedToken,
    UnsupportedToken,
    KeywordExpected,
    TokenTypeExpected,
    GarbageAtEnd,

    // Grammar checks that do not abort table building
    UnknownTokenKind,

    // Raised by semantic actions
    ExtensionFailed,
    ActionFailed,
}

impl DiagnosticKind {
    /// Stable identifier shown next to the severity.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated-string",
            Self::InvalidCharacter => "invalid-character",
            Self::UnexpectedToken => "unexpected-token",
            Self::UnsupportedToken => "unsupported-token",
            Self::KeywordExpected => "keyword-expected",
            Self::TokenTypeExpected => "token-type-expected",
            Self::GarbageAtEnd => "garbage-at-end",
            Self::UnknownTokenKind => "unknown-token-kind",
            Self::ExtensionFailed => "extension-failed",
            Self::ActionFailed => "action-failed",
        }
    }

    /// Default severity for this kind. Can be overridden per diagnostic.
    pub fn default_severity(&self) -> Severity {
        match self {
            // Skipped input and unusable kinds leave the rest recoverable.
            Self::UnterminatedString | Self::InvalidCharacter | Self::UnknownTokenKind => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnterminatedString => Some("strings end with `\"` on the same line"),
            Self::UnknownTokenKind => Some("declare the kind before using it in a pattern"),
            _ => None,
        }
    }

    /// Base message, used when no custom detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string",
            Self::InvalidCharacter => "invalid character",
            Self::UnexpectedToken => "unexpected token",
            Self::UnsupportedToken => "token not supported here",
            Self::KeywordExpected => "keyword expected",
            Self::TokenTypeExpected => "token type expected",
            Self::GarbageAtEnd => "garbage at end of input",
            Self::UnknownTokenKind => "unknown token kind",
            Self::ExtensionFailed => "cannot extend grammar",
            Self::ActionFailed => "action failed",
        }
    }

    /// Template for custom messages; `{}` is replaced by the caller's detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownTokenKind => "`${}` is not a declared token kind".to_string(),
            Self::ActionFailed => "{}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → `fallback_message()`
    /// - `Some(detail)` → `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Severity {
    Warning,
    #[default]
    Error,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            range,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}] at {}..{}: {}",
            self.severity,
            self.kind.code(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
