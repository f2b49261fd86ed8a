//! Replay of expression test corpora.
//!
//! A corpus is plain text, one case per line: the expected value as an
//! unsigned decimal, a single space, then the expression. This is the
//! format produced by random expression generators and lets a corpus
//! be checked against the evaluator in bulk.

use std::fmt;

use sdb_eval::{expr, ExprError};
use sdb_types::{RegisterLookup, Word};
use serde::{Serialize, Serializer};

/// Outcome of replaying a corpus.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusReport {
    pub total: usize,
    pub passed: usize,
    pub failures: Vec<CorpusFailure>,
}

impl CorpusReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A corpus line that did not check out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusFailure {
    /// 1-based line number.
    pub line: usize,
    pub kind: FailureKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// No leading integer, or no expression after it.
    Malformed { text: String },
    Mismatch {
        expression: String,
        expected: Word,
        actual: Word,
    },
    Error {
        expression: String,
        expected: Word,
        #[serde(serialize_with = "display")]
        error: ExprError,
    },
}

impl fmt::Display for CorpusFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FailureKind::Malformed { text } => write!(f, "line {}: malformed: {text}", self.line),
            FailureKind::Mismatch {
                expression,
                expected,
                actual,
            } => write!(
                f,
                "line {}: {expression}: expected {expected}, got {actual}",
                self.line
            ),
            FailureKind::Error {
                expression,
                expected,
                error,
            } => write!(
                f,
                "line {}: {expression}: expected {expected}, error: {error}",
                self.line
            ),
        }
    }
}

impl fmt::Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(f, "{failure}")?;
        }
        write!(f, "{}/{} expressions passed", self.passed, self.total)
    }
}

/// Evaluate every case in `text` and compare against its expected value.
/// Blank lines are skipped.
pub fn replay_corpus(text: &str, regs: &dyn RegisterLookup) -> CorpusReport {
    let mut report = CorpusReport::default();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        report.total += 1;

        let kind = match split_case(line) {
            None => Some(FailureKind::Malformed {
                text: line.to_string(),
            }),
            Some((expected, expression)) => match expr(expression, regs) {
                Ok(actual) if actual == expected => None,
                Ok(actual) => Some(FailureKind::Mismatch {
                    expression: expression.to_string(),
                    expected,
                    actual,
                }),
                Err(error) => Some(FailureKind::Error {
                    expression: expression.to_string(),
                    expected,
                    error,
                }),
            },
        };

        match kind {
            None => report.passed += 1,
            Some(kind) => report.failures.push(CorpusFailure { line: i + 1, kind }),
        }
    }
    report
}

fn display<S: Serializer>(error: &ExprError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

fn split_case(line: &str) -> Option<(Word, &str)> {
    let (expected, expression) = line.trim_start().split_once(' ')?;
    let expected = expected.parse::<Word>().ok()?;
    (!expression.trim().is_empty()).then_some((expected, expression))
}
