//! Shared types for the SDB monitor.
//!
//! This crate defines the machine word, source spans into an expression
//! string, and the collaborator contracts (register lookup, halt signal)
//! that the lexer, evaluator and watchpoint pool are written against.

mod halt;
mod register;
mod span;

pub use halt::HaltSignal;
pub use register::RegisterLookup;
pub use span::Span;

/// The machine word every expression evaluates to.
pub type Word = u32;
