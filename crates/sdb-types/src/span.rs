use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte range inside a single expression string.
///
/// Offsets are 0-based; `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a zero-width span at a single position.
    pub fn point(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// Render `source` with a caret under the start of this span:
    ///
    /// ```text
    /// 1 + @2
    ///     ^
    /// ```
    pub fn caret(&self, source: &str) -> String {
        let pad = source
            .get(..self.start)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(self.start);
        format!("{source}\n{}^", " ".repeat(pad))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}
