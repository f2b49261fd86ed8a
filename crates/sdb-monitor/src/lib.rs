//! SDB monitor.
//!
//! The debugger shell: command parsing, a [`Session`] driving a
//! [`Target`] with watchpoints, configuration, and expression corpus
//! replay.

pub mod commands;
pub mod config;
pub mod corpus;
pub mod error;
pub mod registers;
pub mod session;
pub mod target;

pub use commands::{parse, Command, InfoKind};
pub use config::MonitorConfig;
pub use corpus::{replay_corpus, CorpusFailure, CorpusReport, FailureKind};
pub use error::{CommandError, MonitorError, MonitorResult};
pub use registers::Riscv32Registers;
pub use session::Session;
pub use target::{StepOutcome, StubTarget, Target};
