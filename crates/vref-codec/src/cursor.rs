use tracing::trace;

use crate::artefact::DELIMITER;
use crate::error::{ParseError, Result};

/// Sequential reader over the tokens of an encoded reference.
///
/// A cursor only moves forward. It is owned by the parse that created it;
/// error positions are taken from [`position`](Cursor::position) before the
/// failing token is consumed.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    tokens: Vec<&'a str>,
    i: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over pre-split tokens.
    pub fn new(tokens: Vec<&'a str>) -> Self {
        Self { tokens, i: 0 }
    }

    /// Split an encoded reference on [`DELIMITER`].
    pub fn tokenize(encoded: &'a str) -> Self {
        Self::new(encoded.split(DELIMITER).collect())
    }

    /// Return the next token and advance.
    pub fn next_token(&mut self) -> Result<&'a str> {
        let token = self
            .tokens
            .get(self.i)
            .copied()
            .ok_or(ParseError::Exhausted { position: self.i })?;
        trace!(position = self.i, token, "token");
        self.i += 1;
        Ok(token)
    }

    /// Index of the next token to be read.
    pub fn position(&self) -> usize {
        self.i
    }

    /// Number of tokens not yet read.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.i
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail if any token is left unread.
    pub fn expect_end(&self) -> Result<()> {
        if self.is_exhausted() {
            Ok(())
        } else {
            Err(ParseError::TrailingTokens {
                position: self.i,
                remaining: self.remaining(),
            })
        }
    }
}
