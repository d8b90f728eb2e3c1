//! Reference scanner for plain text input.
//!
//! Words and punctuation become identifiers. Quoted strings, dates and numbers
//! become the grammar's `string`, `date` and `number` kinds when it declares
//! them, and identifiers otherwise.
//!
//! Consecutive characters the lexer cannot recognize are coalesced into one
//! diagnostic rather than one per character.

use std::collections::VecDeque;
use std::ops::Range;

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::{Scanner, Token, TokenKind};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::grammar::Grammar;

pub const STRING_KIND: &str = "string";
pub const DATE_KIND: &str = "date";
pub const NUMBER_KIND: &str = "number";

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme {
    #[regex(r#""(?:[^"\\\n]|\\[^\n])*""#)]
    String,

    #[regex(r#""(?:[^"\\\n]|\\[^\n])*"#)]
    UnterminatedString,

    #[regex(r"[0-9]{4}-[0-9]{2}-[0-9]{2}")]
    Date,

    #[regex(r"[0-9]+(?:\.[0-9]+)?")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[(){}\[\],;:=+\-*/.<>!?&|%^~@$']")]
    Punct,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    /// Coalesced run of unrecognized characters.
    Garbage,
}

#[derive(Debug, Clone, Copy)]
struct Lexed {
    lexeme: Lexeme,
    span: TextRange,
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

fn lex(source: &str) -> VecDeque<Lexed> {
    let mut out = VecDeque::new();
    let mut lexer = Lexeme::lexer(source);
    // Skipped whitespace ends a run of garbage, so track the run's end explicitly.
    let mut garbage: Option<Range<usize>> = None;

    let flush = |garbage: &mut Option<Range<usize>>, out: &mut VecDeque<Lexed>| {
        if let Some(range) = garbage.take() {
            out.push_back(Lexed {
                lexeme: Lexeme::Garbage,
                span: range_to_text_range(range),
            });
        }
    };

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(lexeme) => {
                flush(&mut garbage, &mut out);
                if lexeme != Lexeme::Comment {
                    out.push_back(Lexed {
                        lexeme,
                        span: range_to_text_range(span),
                    });
                }
            }
            Err(()) => match &mut garbage {
                Some(range) if range.end == span.start => range.end = span.end,
                _ => {
                    flush(&mut garbage, &mut out);
                    garbage = Some(span);
                }
            },
        }
    }
    flush(&mut garbage, &mut out);

    out
}

/// Scanner over source text, using the kinds declared by a grammar.
pub struct TextScanner<'src> {
    source: &'src str,
    lexed: VecDeque<Lexed>,
    string: TokenKind,
    date: TokenKind,
    number: TokenKind,
}

impl<'src> TextScanner<'src> {
    pub fn new(source: &'src str, grammar: &Grammar) -> Self {
        let kind = |name| {
            grammar
                .kind(name)
                .filter(|k| matches!(k, TokenKind::Variable(_)))
                .unwrap_or(TokenKind::Identifier)
        };
        Self {
            source,
            lexed: lex(source),
            string: kind(STRING_KIND),
            date: kind(DATE_KIND),
            number: kind(NUMBER_KIND),
        }
    }

    fn text(&self, span: TextRange) -> &'src str {
        &self.source[Range::<usize>::from(span)]
    }
}

impl Scanner for TextScanner<'_> {
    fn next_token(&mut self, diagnostics: &mut Diagnostics) -> Token {
        while let Some(Lexed { lexeme, span }) = self.lexed.pop_front() {
            let text = self.text(span);
            let kind = match lexeme {
                Lexeme::Word | Lexeme::Punct => TokenKind::Identifier,
                Lexeme::Date => self.date,
                Lexeme::Number => self.number,
                Lexeme::String => {
                    let body = &text[1..text.len() - 1];
                    return Token::new(self.string, unescape(body), span);
                }
                Lexeme::UnterminatedString => {
                    diagnostics
                        .report(DiagnosticKind::UnterminatedString, span)
                        .emit();
                    continue;
                }
                Lexeme::Garbage => {
                    diagnostics
                        .report(DiagnosticKind::InvalidCharacter, span)
                        .message(format!("`{text}`"))
                        .emit();
                    continue;
                }
                Lexeme::Comment => continue,
            };
            return Token::new(kind, text, span);
        }
        Token::end_of_input(TextSize::of(self.source))
    }
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
