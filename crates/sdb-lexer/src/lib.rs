//! SDB lexer: converts a debugger expression into a token sequence.

pub mod error;
pub mod lexer;
pub mod rules;
pub mod token;

pub use error::{LexError, LexResult};
pub use lexer::{tokenize, Lexer};
pub use rules::{Lexeme, Rule, RULES};
pub use token::{Token, TokenKind, MAX_TOKEN_LEN};
