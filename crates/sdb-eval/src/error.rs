//! Evaluation error types.

use sdb_lexer::LexError;
use sdb_types::Span;
use thiserror::Error;

/// Errors raised while evaluating a token range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An operator has nothing on one of its sides, e.g. `1 +` or `-1`.
    #[error("missing operand")]
    EmptyRange,

    /// A `)` without a matching `(`, or an unclosed `(`.
    #[error("unbalanced parentheses")]
    UnbalancedParens,

    /// No `+ - * /` outside parentheses to split the range on, e.g. `1 2`.
    #[error("no operator to split the expression on")]
    NoMainOperator,

    /// The register lookup does not know this name.
    #[error("unknown register: ${0}")]
    UnknownRegister(String),

    /// Right operand of `/` evaluated to zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Parentheses or operands nested past [`MAX_NESTING`](crate::MAX_NESTING).
    #[error("expression nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// Evaluator result type alias.
pub type EvalResult<T> = Result<T, EvalError>;

/// Failure of the full text → value pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl ExprError {
    /// Input location, when the error has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lex(e) => Some(e.span()),
            Self::Eval(_) => None,
        }
    }
}
