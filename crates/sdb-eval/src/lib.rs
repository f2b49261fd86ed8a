//! SDB expression evaluator.
//!
//! Evaluates debugger expressions (`p $sp + 0x10`) to a 32-bit machine
//! word. Tokens come from `sdb-lexer`; registers are resolved through a
//! caller-supplied [`RegisterLookup`](sdb_types::RegisterLookup).

pub mod error;
pub mod evaluator;
pub mod precedence;

pub use error::{EvalError, EvalResult, ExprError};
pub use evaluator::{expr, Evaluator, MAX_NESTING};
pub use precedence::{main_operator, operator_chain, BinaryOp, Precedence};
