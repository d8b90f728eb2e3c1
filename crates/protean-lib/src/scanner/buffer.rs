use rowan::TextSize;

use super::{Scanner, Token};
use crate::Error;
use crate::diagnostics::Diagnostics;

/// One-token push-back over a scanner.
pub struct TokenBuffer<'s> {
    scanner: &'s mut dyn Scanner,
    returned: Option<Token>,
    /// End of the most recently fetched token.
    position: TextSize,
}

impl<'s> TokenBuffer<'s> {
    pub fn new(scanner: &'s mut dyn Scanner) -> Self {
        Self {
            scanner,
            returned: None,
            position: TextSize::from(0),
        }
    }

    pub fn next(&mut self, diagnostics: &mut Diagnostics) -> Token {
        if let Some(token) = self.returned.take() {
            return token;
        }
        let token = self.scanner.next_token(diagnostics);
        self.position = token.span.end();
        token
    }

    /// Push a token back. Only one token may be held at a time.
    pub fn return_token(&mut self, token: Token) -> Result<(), Error> {
        if let Some(held) = &self.returned {
            return Err(Error::Internal(format!(
                "cannot return `{}`: `{}` is already pushed back",
                token.text, held.text
            )));
        }
        self.returned = Some(token);
        Ok(())
    }

    pub fn has_returned(&self) -> bool {
        self.returned.is_some()
    }

    /// Start of the pending token if one is held, else the end of the last fetched one.
    pub fn position(&self) -> TextSize {
        self.returned
            .as_ref()
            .map_or(self.position, |t| t.span.start())
    }

    pub fn scanner_mut(&mut self) -> &mut dyn Scanner {
        &mut *self.scanner
    }
}
