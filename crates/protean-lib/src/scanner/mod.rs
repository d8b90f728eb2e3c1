//! Token source consumed by the parse engine.
//!
//! The engine never produces tokens. It pulls them from a [`Scanner`] through a
//! [`TokenBuffer`], which allows exactly one token to be pushed back.

mod buffer;
mod lexer;


use protean_core::Symbol;
use rowan::{TextRange, TextSize};

use crate::diagnostics::Diagnostics;

pub use buffer::TokenBuffer;
pub use lexer::TextScanner;

/// Token kind as seen by the dispatcher.
///
/// `Identifier` covers both bare names and keywords: the scanner cannot tell
/// them apart, so the grammar's literal patterns get the first look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    EndOfInput,
    Identifier,
    /// A grammar-declared kind such as `string` or `number`.
    Variable(Symbol),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: TextRange,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: TextRange) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn end_of_input(at: TextSize) -> Self {
        Self::new(TokenKind::EndOfInput, "", TextRange::empty(at))
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

/// A live token source.
pub trait Scanner {
    /// Next token, or the end-of-input sentinel once input is exhausted.
    ///
    /// Must keep returning the sentinel on further calls. Lexical problems are
    /// reported to `diagnostics` with their source position.
    fn next_token(&mut self, diagnostics: &mut Diagnostics) -> Token;

    /// Restrict the kinds the scanner should produce in the current context.
    ///
    /// Purely advisory: the engine enforces the restriction itself.
    fn limit_token_set(&mut self, _allowed: &[TokenKind]) {}
}

impl<S: Scanner + ?Sized> Scanner for &mut S {
    fn next_token(&mut self, diagnostics: &mut Diagnostics) -> Token {
        (**self).next_token(diagnostics)
    }

    fn limit_token_set(&mut self, allowed: &[TokenKind]) {
        (**self).limit_token_set(allowed)
    }
}

/// Scanner over a prepared token sequence.
#[derive(Debug, Clone, Default)]
pub struct VecScanner {
    tokens: std::collections::VecDeque<Token>,
    end: TextSize,
}

impl VecScanner {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map_or(TextSize::from(0), |t| t.span.end());
        Self {
            tokens: tokens.into(),
            end,
        }
    }

    /// Lay out `(kind, text)` pairs as if separated by single spaces.
    pub fn synthetic<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = (TokenKind, T)>,
        T: Into<String>,
    {
        let mut offset = TextSize::from(0);
        let tokens = items
            .into_iter()
            .map(|(kind, text)| {
                let text = text.into();
                let span = TextRange::at(offset, TextSize::of(text.as_str()));
                offset = span.end() + TextSize::from(1);
                Token::new(kind, text, span)
            })
            .collect();
        Self::new(tokens)
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl Scanner for VecScanner {
    fn next_token(&mut self, _diagnostics: &mut Diagnostics) -> Token {
        self.tokens
            .pop_front()
            .unwrap_or_else(|| Token::end_of_input(self.end))
    }
}
