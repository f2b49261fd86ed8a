//! The ordered lexical rule table.
//!
//! At every position the lexer tries [`RULES`] from first to last and
//! takes the first rule that matches at that position, even when a later
//! rule would match a longer span. The order is part of the language:
//! `hex` sits before `decimal`, otherwise `0x1F` would lex as `0`
//! followed by an unmatched `x`.

use std::fmt;
use std::ops::Range;

use crate::token::TokenKind;

/// What a rule matched at the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// Bytes consumed from the input.
    pub len: usize,
    /// Sub-range of the consumed bytes kept as the token's text.
    pub text: Range<usize>,
}

impl Lexeme {
    fn whole(len: usize) -> Self {
        Self { len, text: 0..len }
    }
}

/// One entry of the rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short name used in logs and tests.
    pub name: &'static str,
    /// Token produced on a match; `None` discards the lexeme.
    pub kind: Option<TokenKind>,
    /// Anchored matcher: inspects the remaining input from its first byte.
    pub matcher: fn(&[u8]) -> Option<Lexeme>,
}

impl Rule {
    /// Try this rule against the start of `rest`.
    pub fn matches(&self, rest: &[u8]) -> Option<Lexeme> {
        (self.matcher)(rest).filter(|lexeme| lexeme.len > 0)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Rule table in priority order.
pub const RULES: &[Rule] = &[
    Rule { name: "whitespace", kind: None, matcher: match_spaces },
    Rule { name: "hex", kind: Some(TokenKind::HexNumber), matcher: match_hex },
    Rule { name: "decimal", kind: Some(TokenKind::DecNumber), matcher: match_decimal },
    Rule { name: "register", kind: Some(TokenKind::Register), matcher: match_register },
    Rule { name: "plus", kind: Some(TokenKind::Plus), matcher: match_plus },
    Rule { name: "eq", kind: Some(TokenKind::EqEq), matcher: match_eq },
    Rule { name: "minus", kind: Some(TokenKind::Minus), matcher: match_minus },
    Rule { name: "star", kind: Some(TokenKind::Star), matcher: match_star },
    Rule { name: "slash", kind: Some(TokenKind::Slash), matcher: match_slash },
    Rule { name: "lparen", kind: Some(TokenKind::LParen), matcher: match_lparen },
    Rule { name: "rparen", kind: Some(TokenKind::RParen), matcher: match_rparen },
];

/// Sigil that introduces a register reference.
pub const REGISTER_SIGIL: u8 = b'$';

// ─────────────────────────────────────────────────────────────────────
// Matchers
// ─────────────────────────────────────────────────────────────────────

fn count_while(s: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    s.iter().take_while(|&&b| pred(b)).count()
}

/// ` +`
fn match_spaces(s: &[u8]) -> Option<Lexeme> {
    let n = count_while(s, |b| b == b' ');
    (n > 0).then(|| Lexeme::whole(n))
}

/// `0[xX][0-9a-fA-F]+`, stored without the prefix.
fn match_hex(s: &[u8]) -> Option<Lexeme> {
    if !(s.first() == Some(&b'0') && matches!(s.get(1), Some(b'x' | b'X'))) {
        return None;
    }
    let digits = count_while(&s[2..], |b| b.is_ascii_hexdigit());
    (digits > 0).then(|| Lexeme {
        len: 2 + digits,
        text: 2..2 + digits,
    })
}

/// `[0-9]+[uU]?`, stored without the suffix.
fn match_decimal(s: &[u8]) -> Option<Lexeme> {
    let digits = count_while(s, |b| b.is_ascii_digit());
    if digits == 0 {
        return None;
    }
    let suffix = usize::from(matches!(s.get(digits), Some(b'u' | b'U')));
    Some(Lexeme {
        len: digits + suffix,
        text: 0..digits,
    })
}

/// `\$[0-9a-zA-Z]{2,3}`, stored without the sigil.
fn match_register(s: &[u8]) -> Option<Lexeme> {
    if s.first() != Some(&REGISTER_SIGIL) {
        return None;
    }
    let name = count_while(&s[1..], |b| b.is_ascii_alphanumeric()).min(3);
    (name >= 2).then(|| Lexeme {
        len: 1 + name,
        text: 1..1 + name,
    })
}

fn match_literal(s: &[u8], lit: &[u8]) -> Option<Lexeme> {
    s.starts_with(lit).then(|| Lexeme::whole(lit.len()))
}

fn match_plus(s: &[u8]) -> Option<Lexeme> {
    match_literal(s, b"+")
}

fn match_eq(s: &[u8]) -> Option<Lexeme> {
    match_literal(s, b"==")
}

fn match_minus(s: &[u8]) -> Option<Lexeme> {
    match_literal(s, b"-")
}

fn match_star(s: &[u8]) -> Option<Lexeme> {
    match_literal(s, b"*")
}

fn match_slash(s: &[u8]) -> Option<Lexeme> {
    match_literal(s, b"/")
}

fn match_lparen(s: &[u8]) -> Option<Lexeme> {
    match_literal(s, b"(")
}

fn match_rparen(s: &[u8]) -> Option<Lexeme> {
    match_literal(s, b")")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> Rule {
        *RULES.iter().find(|r| r.name == name).expect("rule exists")
    }

    fn position(name: &str) -> usize {
        RULES.iter().position(|r| r.name == name).expect("rule exists")
    }

    #[test]
    fn test_hex_before_decimal() {
        assert!(position("hex") < position("decimal"));
    }

    #[test]
    fn test_rule_names_unique() {
        for (i, a) in RULES.iter().enumerate() {
            for b in &RULES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_hex_strips_prefix() {
        let m = rule("hex").matches(b"0x1fG").unwrap();
        assert_eq!(m, Lexeme { len: 4, text: 2..4 });
        assert!(rule("hex").matches(b"0x").is_none());
        assert!(rule("hex").matches(b"12").is_none());
    }

    #[test]
    fn test_decimal_strips_suffix() {
        assert_eq!(
            rule("decimal").matches(b"42u+1"),
            Some(Lexeme { len: 3, text: 0..2 })
        );
        assert_eq!(
            rule("decimal").matches(b"7"),
            Some(Lexeme { len: 1, text: 0..1 })
        );
        assert!(rule("decimal").matches(b"u7").is_none());
    }

    #[test]
    fn test_register_length_bounds() {
        assert!(rule("register").matches(b"$a").is_none());
        assert_eq!(
            rule("register").matches(b"$sp"),
            Some(Lexeme { len: 3, text: 1..3 })
        );
        assert_eq!(
            rule("register").matches(b"$s10"),
            Some(Lexeme { len: 4, text: 1..4 })
        );
        // Longest allowed name is three characters; the rest is left over.
        assert_eq!(
            rule("register").matches(b"$abcd"),
            Some(Lexeme { len: 4, text: 1..4 })
        );
    }

    #[test]
    fn test_decimal_would_win_without_hex_rule() {
        // The decimal rule alone only consumes the leading zero of a hex literal.
        assert_eq!(
            rule("decimal").matches(b"0x10"),
            Some(Lexeme { len: 1, text: 0..1 })
        );
    }

    #[test]
    fn test_spaces_only() {
        assert_eq!(rule("whitespace").matches(b"   1"), Some(Lexeme::whole(3)));
        assert!(rule("whitespace").matches(b"\t1").is_none());
    }
}
