//! Lexer error types.

use sdb_types::Span;
use thiserror::Error;

use crate::token::MAX_TOKEN_LEN;

/// Errors that stop tokenization of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// None of the lexical rules matches at this byte offset.
    #[error("no rule matches at position {0}")]
    NoRuleMatches(usize),

    /// A rule matched, but the lexeme does not fit in a token.
    #[error("token at position {position} is {len} bytes long (limit {})", MAX_TOKEN_LEN)]
    TokenTooLong { position: usize, len: usize },
}

impl LexError {
    /// Where in the input the error occurred.
    pub fn span(&self) -> Span {
        match *self {
            Self::NoRuleMatches(position) => Span::point(position),
            Self::TokenTooLong { position, len } => Span::new(position, position + len),
        }
    }
}

/// Lexer result type alias.
pub type LexResult<T> = Result<T, LexError>;
