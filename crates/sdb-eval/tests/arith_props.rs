//! Property tests: evaluation of random arithmetic expressions.
//!
//! A proptest strategy builds random expression trees, renders them the way
//! a user would type them, and folds them independently with unsigned 32-bit
//! C semantics. The evaluator must agree with the fold on every tree.

use proptest::prelude::*;
use sdb_eval::{expr, EvalError, ExprError};
use sdb_lexer::{tokenize, TokenKind};

// ─────────────────────────────────────────────────────────────────────
// Reference model
// ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Tree {
    Num { value: u32, suffix: bool },
    Paren(Box<Tree>),
    Bin(Box<Tree>, char, Box<Tree>),
}

impl Tree {
    /// Unsigned C evaluation; `None` on division by zero.
    fn fold(&self) -> Option<u32> {
        match self {
            Tree::Num { value, .. } => Some(*value),
            Tree::Paren(inner) => inner.fold(),
            Tree::Bin(l, op, r) => {
                let (l, r) = (l.fold()?, r.fold()?);
                match op {
                    '+' => Some(l.wrapping_add(r)),
                    '-' => Some(l.wrapping_sub(r)),
                    '*' => Some(l.wrapping_mul(r)),
                    _ => l.checked_div(r),
                }
            }
        }
    }

    /// Render with just enough parentheses to keep the tree's shape.
    fn render(&self) -> String {
        match self {
            Tree::Num { value, suffix } => {
                format!("{value}{}", if *suffix { "u" } else { "" })
            }
            Tree::Paren(inner) => format!("({})", inner.render()),
            Tree::Bin(l, op, r) => {
                let lhs = l.render_operand(*op, false);
                let rhs = r.render_operand(*op, true);
                format!("{lhs} {op} {rhs}")
            }
        }
    }

    fn render_operand(&self, parent: char, right: bool) -> String {
        let needs_parens = match self {
            Tree::Bin(_, op, _) => {
                let (mine, theirs) = (rank(*op), rank(parent));
                mine < theirs || (right && mine == theirs)
            }
            _ => false,
        };
        if needs_parens {
            format!("({})", self.render())
        } else {
            self.render()
        }
    }
}

fn rank(op: char) -> u8 {
    if op == '+' || op == '-' {
        0
    } else {
        1
    }
}

fn tree() -> impl Strategy<Value = Tree> {
    let leaf = (0u32..=100, any::<bool>()).prop_map(|(value, suffix)| Tree::Num { value, suffix });
    leaf.prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| Tree::Paren(Box::new(t))),
            (inner.clone(), prop::sample::select(vec!['+', '-', '*', '/']), inner)
                .prop_map(|(l, op, r)| Tree::Bin(Box::new(l), op, Box::new(r))),
        ]
    })
}

// ─────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────

proptest! {
    /// Evaluation matches unsigned 32-bit C arithmetic.
    #[test]
    fn prop_matches_reference(t in tree()) {
        let source = t.render();
        let got = expr(&source, &());
        match t.fold() {
            Some(want) => prop_assert_eq!(got, Ok(want), "source: {}", source),
            None => prop_assert_eq!(
                got,
                Err(ExprError::Eval(EvalError::DivisionByZero)),
                "source: {}",
                source
            ),
        }
    }

    /// Spacing never changes the token sequence.
    #[test]
    fn prop_whitespace_insensitive(t in tree()) {
        let spaced = t.render();
        let packed: String = spaced.chars().filter(|c| *c != ' ').collect();
        let a = tokenize(&spaced).unwrap();
        let b = tokenize(&packed).unwrap();
        let a: Vec<(TokenKind, String)> = a.into_iter().map(|t| (t.kind, t.text)).collect();
        let b: Vec<(TokenKind, String)> = b.into_iter().map(|t| (t.kind, t.text)).collect();
        prop_assert_eq!(a, b);
    }

    /// Every operator and parenthesis in the text becomes exactly one token.
    #[test]
    fn prop_symbol_skeleton_preserved(t in tree()) {
        let source = t.render();
        let from_text: String = source.chars().filter(|c| "+-*/()".contains(*c)).collect();
        let from_tokens: String = tokenize(&source)
            .unwrap()
            .iter()
            .filter_map(|t| t.kind.symbol())
            .collect();
        prop_assert_eq!(from_text, from_tokens);
    }
}
