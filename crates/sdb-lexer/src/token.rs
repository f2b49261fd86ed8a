//! Token types for the SDB lexer.
//!
//! Defines [`TokenKind`] covering every lexeme an expression may contain
//! and [`Token`], which pairs a kind with its stored text and [`Span`].

use sdb_types::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capacity of a token's text, in bytes.
///
/// A lexeme longer than this fails with
/// [`LexError::TokenTooLong`](crate::LexError::TokenTooLong).
pub const MAX_TOKEN_LEN: usize = 31;

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the SDB lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Stored text: hex digits without `0x`, register names without `$`,
    /// decimal digits without the `u` suffix.
    pub text: String,
    /// Byte range of the full lexeme in the input.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Renders the token in a form the lexer reads back as the same token.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::DecNumber => f.write_str(&self.text),
            TokenKind::HexNumber => write!(f, "0x{}", self.text),
            TokenKind::Register => write!(f, "${}", self.text),
            kind => f.write_str(kind.symbol().unwrap_or_default()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // ── Operands ─────────────────────────────────────────────

    /// Decimal literal: `42`, `42u`
    DecNumber,
    /// Hexadecimal literal: `0x1F`
    HexNumber,
    /// Register reference: `$sp`, `$s10`
    Register,

    // ── Operators ────────────────────────────────────────────

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `==`
    EqEq,

    // ── Punctuation ──────────────────────────────────────────

    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl TokenKind {
    /// Fixed spelling of operator and punctuation tokens; `None` for operands.
    pub fn symbol(self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::EqEq => "==",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::DecNumber | TokenKind::HexNumber | TokenKind::Register => return None,
        })
    }

    /// Returns `true` for literals and registers.
    pub fn is_operand(self) -> bool {
        matches!(
            self,
            TokenKind::DecNumber | TokenKind::HexNumber | TokenKind::Register
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::DecNumber => f.write_str("decimal number"),
            TokenKind::HexNumber => f.write_str("hex number"),
            TokenKind::Register => f.write_str("register"),
            other => write!(f, "'{}'", other.symbol().unwrap_or_default()),
        }
    }
}
