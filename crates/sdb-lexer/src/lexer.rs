//! Core SDB lexer: converts an expression string to a token sequence.
//!
//! Scanning is first-match over [`RULES`]: at each position the first
//! rule in table order that matches wins. Whitespace is consumed without
//! producing a token. Unlike a compiler front end there is no error
//! recovery: the first position no rule matches ends lexing.

use sdb_types::Span;
use tracing::trace;

use crate::error::{LexError, LexResult};
use crate::rules::{Rule, RULES};
use crate::token::{Token, MAX_TOKEN_LEN};

/// The SDB lexer.
///
/// Borrows the input for the duration of one [`Lexer::lex`] call and
/// returns an owned token vector; no state survives between calls.
pub struct Lexer<'src> {
    /// The full expression as bytes.
    source: &'src [u8],
    /// Current byte offset into `source`.
    pos: usize,
    /// Rule table, in priority order.
    rules: &'src [Rule],
}

impl<'src> Lexer<'src> {
    /// Create a lexer over `source` using the standard rule table.
    pub fn new(source: &'src str) -> Self {
        Self::with_rules(source, RULES)
    }

    /// Create a lexer with a custom rule table.
    pub fn with_rules(source: &'src str, rules: &'src [Rule]) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
            rules,
        }
    }

    /// Lex the entire expression.
    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while !self.at_end() {
            if let Some(token) = self.scan()? {
                tokens.push(token);
            }
        }
        Ok(tokens)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Apply the first matching rule at the current position.
    ///
    /// Returns `Ok(None)` for a discarded lexeme (whitespace).
    fn scan(&mut self) -> LexResult<Option<Token>> {
        let source = self.source;
        let rules = self.rules;
        let rest = &source[self.pos..];
        let (index, rule, lexeme) = rules
            .iter()
            .enumerate()
            .find_map(|(i, rule)| rule.matches(rest).map(|m| (i, rule, m)))
            .ok_or(LexError::NoRuleMatches(self.pos))?;

        let start = self.pos;
        let text = String::from_utf8_lossy(&rest[lexeme.text.clone()]).into_owned();
        trace!(
            rule = index,
            name = rule.name,
            position = start,
            len = lexeme.len,
            text = %text,
            "matched lexical rule"
        );

        let Some(kind) = rule.kind else {
            self.pos += lexeme.len;
            return Ok(None);
        };
        if lexeme.len > MAX_TOKEN_LEN {
            return Err(LexError::TokenTooLong {
                position: start,
                len: lexeme.len,
            });
        }

        self.pos += lexeme.len;
        Ok(Some(Token::new(kind, text, Span::new(start, self.pos))))
    }
}

/// Tokenize `input` with the standard rule table.
pub fn tokenize(input: &str) -> LexResult<Vec<Token>> {
    Lexer::new(input).lex()
}
