//! Pattern elements and the specifier notation used to write them.
//!
//! A pattern is written as whitespace-separated specifiers:
//!
//! | Specifier     | Element                      |
//! |---------------|------------------------------|
//! | `@rule`       | reference to another rule    |
//! | `$kind`       | token of a declared kind     |
//! | `$identifier` | any identifier token         |
//! | `$end`        | end of input                 |
//! | `'text`       | literal keyword or symbol    |

use protean_core::{Interner, Symbol};

use super::error::GrammarError;
use crate::scanner::TokenKind;

pub const REFERENCE_PREFIX: char = '@';
pub const VARIABLE_PREFIX: char = '$';
pub const LITERAL_PREFIX: char = '\'';

/// Reserved kind names.
pub const IDENTIFIER_KIND: &str = "identifier";
pub const END_KIND: &str = "end";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    Reference(Symbol),
    Literal(String),
    Variable(TokenKind),
    EndOfInput,
}

/// Parse a whitespace-separated pattern spec.
///
/// Names are interned as they are seen; whether they resolve to declared
/// rules and kinds is checked later, before tables are built.
pub(crate) fn parse_spec(
    spec: &str,
    interner: &mut Interner,
) -> Result<Vec<Element>, GrammarError> {
    spec.split_whitespace()
        .map(|item| parse_element(item, interner))
        .collect()
}

fn parse_element(item: &str, interner: &mut Interner) -> Result<Element, GrammarError> {
    let invalid = |reason| GrammarError::InvalidElement {
        element: item.to_owned(),
        reason,
    };

    let mut chars = item.chars();
    let Some(prefix) = chars.next() else {
        return Err(invalid("empty specifier"));
    };
    let body = chars.as_str();
    if body.is_empty() {
        return Err(invalid("missing name after prefix"));
    }

    match prefix {
        REFERENCE_PREFIX => Ok(Element::Reference(interner.intern(body))),
        LITERAL_PREFIX => Ok(Element::Literal(body.to_owned())),
        VARIABLE_PREFIX => Ok(match body {
            END_KIND => Element::EndOfInput,
            IDENTIFIER_KIND => Element::Variable(TokenKind::Identifier),
            name => Element::Variable(TokenKind::Variable(interner.intern(name))),
        }),
        _ => Err(invalid("expected `@rule`, `$kind` or `'literal`")),
    }
}

/// Render an element back in specifier notation.
pub(crate) fn describe(element: &Element, interner: &Interner) -> String {
    match element {
        Element::Reference(sym) => format!("{REFERENCE_PREFIX}{}", interner.resolve(*sym)),
        Element::Literal(text) => format!("{LITERAL_PREFIX}{text}"),
        Element::Variable(TokenKind::Identifier) => format!("{VARIABLE_PREFIX}{IDENTIFIER_KIND}"),
        Element::Variable(TokenKind::Variable(sym)) => {
            format!("{VARIABLE_PREFIX}{}", interner.resolve(*sym))
        }
        Element::Variable(TokenKind::EndOfInput) | Element::EndOfInput => {
            format!("{VARIABLE_PREFIX}{END_KIND}")
        }
    }
}
