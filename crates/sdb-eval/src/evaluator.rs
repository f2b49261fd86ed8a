//! Recursive evaluation over token ranges.
//!
//! Each call works on a slice of the token sequence:
//! 1. an empty slice is a missing operand,
//! 2. a single literal or register is its own value,
//! 3. a slice wrapped in one matching `(` … `)` pair is its interior,
//! 4. anything else must be parenthesis-balanced and is split on every
//!    depth-0 operator sharing the precedence of its
//!    [`main_operator`](crate::precedence::main_operator); the pieces
//!    are folded left to right.
//!
//! Recursion only goes into parenthesized interiors and tighter-binding
//! operands, so a flat chain like `1+1+...+1` costs one level.

use sdb_lexer::{tokenize, Token, TokenKind};
use sdb_types::{RegisterLookup, Word};
use tracing::trace;

use crate::error::{EvalError, EvalResult, ExprError};
use crate::precedence::operator_chain;

/// Limit on parenthesis and precedence nesting for one evaluation.
pub const MAX_NESTING: usize = 1024;

/// Evaluates token sequences against a register file.
pub struct Evaluator<'r> {
    regs: &'r dyn RegisterLookup,
}

impl<'r> Evaluator<'r> {
    pub fn new(regs: &'r dyn RegisterLookup) -> Self {
        Self { regs }
    }

    /// Evaluate a full token sequence.
    pub fn evaluate(&self, tokens: &[Token]) -> EvalResult<Word> {
        self.eval_range(tokens, 0)
    }

    /// Lex and evaluate `input`.
    pub fn eval_str(&self, input: &str) -> Result<Word, ExprError> {
        let tokens = tokenize(input)?;
        Ok(self.evaluate(&tokens)?)
    }

    fn eval_range(&self, tokens: &[Token], depth: usize) -> EvalResult<Word> {
        if depth > MAX_NESTING {
            return Err(EvalError::NestingTooDeep(MAX_NESTING));
        }

        match tokens {
            [] => Err(EvalError::EmptyRange),
            [single] if single.kind.is_operand() => self.operand(single),
            [_, interior @ .., _] if is_wrapped(tokens) => self.eval_range(interior, depth + 1),
            _ => {
                check_balanced(tokens)?;
                let chain = operator_chain(tokens);
                let Some(&(first, _)) = chain.first() else {
                    return Err(EvalError::NoMainOperator);
                };
                trace!(operators = chain.len(), len = tokens.len(), "split on main operator");

                let mut acc = self.eval_range(&tokens[..first], depth + 1)?;
                for (n, &(index, op)) in chain.iter().enumerate() {
                    let end = chain.get(n + 1).map_or(tokens.len(), |&(next, _)| next);
                    let rhs = self.eval_range(&tokens[index + 1..end], depth + 1)?;
                    acc = op.apply(acc, rhs)?;
                }
                Ok(acc)
            }
        }
    }

    fn operand(&self, token: &Token) -> EvalResult<Word> {
        match token.kind {
            TokenKind::DecNumber => Ok(parse_word(&token.text, 10)),
            TokenKind::HexNumber => Ok(parse_word(&token.text, 16)),
            TokenKind::Register => self
                .regs
                .lookup(&token.text)
                .ok_or_else(|| EvalError::UnknownRegister(token.text.clone())),
            _ => Err(EvalError::NoMainOperator),
        }
    }
}

/// Lex and evaluate `input` against `regs`.
pub fn expr(input: &str, regs: &dyn RegisterLookup) -> Result<Word, ExprError> {
    Evaluator::new(regs).eval_str(input)
}

/// Digits to a word, wrapping modulo 2^32 like an unsigned C literal
/// converted to `uint32_t`.
fn parse_word(digits: &str, radix: u32) -> Word {
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0, |acc: Word, d| acc.wrapping_mul(radix).wrapping_add(d))
}

/// `true` when the first and last tokens are a matching pair enclosing a
/// non-empty, balanced interior. `(1)+(2)` is not wrapped: its interior
/// `1)+(2` closes a paren it never opened.
fn is_wrapped(tokens: &[Token]) -> bool {
    match tokens {
        [first, interior @ .., last]
            if first.is(TokenKind::LParen) && last.is(TokenKind::RParen) =>
        {
            !interior.is_empty() && balance(interior)
        }
        _ => false,
    }
}

fn check_balanced(tokens: &[Token]) -> EvalResult<()> {
    if balance(tokens) {
        Ok(())
    } else {
        Err(EvalError::UnbalancedParens)
    }
}

/// Depth scan: never close below zero, end at zero.
fn balance(tokens: &[Token]) -> bool {
    let mut depth = 0usize;
    for token in tokens {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
