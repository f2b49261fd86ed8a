//! Binary operators and main-operator selection.

use sdb_lexer::{Token, TokenKind};
use sdb_types::Word;

use crate::error::{EvalError, EvalResult};

/// Binding strength, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// `+ -`
    Additive = 0,
    /// `* /`
    Multiplicative = 1,
}

/// An arithmetic operator the evaluator can split on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOp::Add | BinaryOp::Sub => Precedence::Additive,
            BinaryOp::Mul | BinaryOp::Div => Precedence::Multiplicative,
        }
    }

    /// Combine two words with 32-bit wraparound; `/` truncates.
    pub fn apply(self, lhs: Word, rhs: Word) -> EvalResult<Word> {
        match self {
            BinaryOp::Add => Ok(lhs.wrapping_add(rhs)),
            BinaryOp::Sub => Ok(lhs.wrapping_sub(rhs)),
            BinaryOp::Mul => Ok(lhs.wrapping_mul(rhs)),
            BinaryOp::Div => lhs.checked_div(rhs).ok_or(EvalError::DivisionByZero),
        }
    }
}

/// Pick the operator to split `tokens` on.
///
/// Only operators at parenthesis depth 0 are candidates. The lowest
/// precedence wins, and among equals the rightmost one, so `a - b - c`
/// splits before `c` and evaluates as `(a - b) - c`.
pub fn main_operator(tokens: &[Token]) -> Option<(usize, BinaryOp)> {
    top_level_operators(tokens).fold(None, |best, (i, op)| match best {
        Some((_, b)) if op.precedence() > b.precedence() => best,
        _ => Some((i, op)),
    })
}

/// Every depth-0 operator sharing the main operator's precedence, left
/// to right. Splitting on all of them and folding from the left gives
/// the same result as repeated splits on the rightmost one.
pub fn operator_chain(tokens: &[Token]) -> Vec<(usize, BinaryOp)> {
    let Some((_, main)) = main_operator(tokens) else {
        return Vec::new();
    };
    top_level_operators(tokens)
        .filter(|(_, op)| op.precedence() == main.precedence())
        .collect()
}

/// Binary operators outside any parentheses, with their indices.
fn top_level_operators(tokens: &[Token]) -> impl Iterator<Item = (usize, BinaryOp)> + '_ {
    let mut depth = 0usize;
    tokens
        .iter()
        .enumerate()
        .filter_map(move |(i, token)| match token.kind {
            TokenKind::LParen => {
                depth += 1;
                None
            }
            TokenKind::RParen => {
                depth = depth.saturating_sub(1);
                None
            }
            kind if depth == 0 => BinaryOp::from_kind(kind).map(|op| (i, op)),
            _ => None,
        })
}
