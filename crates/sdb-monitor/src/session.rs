//! Interactive debugging session.
//!
//! A [`Session`] owns the target, the watchpoint pool and the halt signal
//! that connects them. Commands come in through [`Session::execute`];
//! everything the session prints is also kept in an output buffer.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use sdb_eval::{expr, ExprError};
use sdb_types::{HaltSignal, Word};
use sdb_watch::{WatchpointId, WatchpointPool, WpError};
use tracing::debug;

use crate::commands::{self, Command, InfoKind, COMMANDS};
use crate::config::MonitorConfig;
use crate::error::CommandError;
use crate::target::{StepOutcome, Target};

/// A debugging session over a [`Target`].
pub struct Session<T: Target> {
    target: T,
    watchpoints: WatchpointPool,
    halt: HaltSignal,
    prompt: String,
    /// Mirror output to stdout as well as the buffer.
    stdout: bool,
    /// Captured output lines
    output: Vec<String>,
}

impl<T: Target> Session<T> {
    pub fn new(target: T, config: &MonitorConfig) -> Self {
        Self {
            target,
            watchpoints: WatchpointPool::with_capacity(config.watchpoints.capacity),
            halt: HaltSignal::new(),
            prompt: config.prompt.clone(),
            stdout: true,
            output: Vec::new(),
        }
    }

    /// Keep output in the buffer only.
    pub fn quiet(mut self) -> Self {
        self.stdout = false;
        self
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn watchpoints(&self) -> &WatchpointPool {
        &self.watchpoints
    }

    /// Every line printed so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    fn println(&mut self, msg: impl Into<String>) {
        let s = msg.into();
        if self.stdout {
            println!("{s}");
        }
        self.output.push(s);
    }

    /// Parse and run one line. Returns `true` when the session should end.
    pub fn execute_line(&mut self, line: &str) -> bool {
        self.execute(commands::parse(line))
    }

    /// Run a command. Returns `true` when the session should end.
    pub fn execute(&mut self, cmd: Command) -> bool {
        let source = match &cmd {
            Command::Print(e) | Command::Watch(e) => e.clone(),
            Command::Examine { expr, .. } => expr.clone(),
            _ => String::new(),
        };
        let result = match cmd {
            Command::Quit => return true,
            Command::Empty => Ok(()),
            Command::Help(name) => {
                self.cmd_help(name.as_deref());
                Ok(())
            }
            Command::Continue => self.cmd_run(None),
            Command::Step(n) => self.cmd_run(Some(n)),
            Command::Info(InfoKind::Registers) => {
                self.cmd_info_registers();
                Ok(())
            }
            Command::Info(InfoKind::Watchpoints) => {
                self.cmd_info_watchpoints();
                Ok(())
            }
            Command::Examine { count, expr } => self.cmd_examine(count, &expr),
            Command::Print(e) => self.cmd_print(&e),
            Command::Watch(e) => self.cmd_watch(&e),
            Command::Delete(n) => self.cmd_delete(n),
            Command::Usage(usage) => Err(CommandError::Usage(usage)),
            Command::Unknown(name) => {
                self.println(format!("Unknown command '{name}'"));
                Ok(())
            }
        };
        if let Err(err) = result {
            self.report(&source, &err);
        }
        false
    }

    fn report(&mut self, source: &str, err: &CommandError) {
        self.println(format!("error: {err}"));
        let span = match err {
            CommandError::Expr(e) | CommandError::Watch(WpError::InitialEvalFailed(e)) => e.span(),
            _ => None,
        };
        if let Some(span) = span {
            for line in span.caret(source).lines() {
                self.println(format!("  {line}"));
            }
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    fn cmd_help(&mut self, name: Option<&str>) {
        match name {
            None => {
                for (_, usage, description) in COMMANDS {
                    self.println(format!("{usage:<10} - {description}"));
                }
            }
            Some(name) => match COMMANDS.iter().find(|(n, _, _)| *n == name) {
                Some((_, usage, description)) => {
                    self.println(format!("{usage} - {description}"));
                }
                None => self.println(format!("Unknown command '{name}'")),
            },
        }
    }

    /// Step `limit` instructions, or until the target ends when `None`.
    fn cmd_run(&mut self, limit: Option<u64>) -> Result<(), CommandError> {
        if self.target.has_ended() {
            self.println("The program has ended. Restart the monitor to run it again.");
            return Ok(());
        }
        self.halt.clear();

        let mut warned: BTreeSet<WatchpointId> = BTreeSet::new();
        let mut steps = 0u64;
        while limit.map_or(true, |n| steps < n) {
            let outcome = self.target.step()?;
            steps += 1;

            let report = self
                .watchpoints
                .check_all(self.target.registers(), &self.halt);
            for failure in report.failures {
                if warned.insert(failure.id) {
                    self.println(format!(
                        "warning: watchpoint {}: {}: {}",
                        failure.id, failure.expression, failure.error
                    ));
                }
            }
            if let Some(hit) = report.hit {
                self.println(format!("watchpoint {}: {}", hit.id, hit.expression));
                self.println(format!("old value = {}", hit.old_value));
                self.println(format!("new value = {}", hit.new_value));
            }

            if let StepOutcome::Ended { pc } = outcome {
                self.println(format!(
                    "Program ended at pc = {pc:#010x} after {} instructions",
                    self.target.instructions()
                ));
                break;
            }
            if self.halt.take() {
                break;
            }
        }
        debug!(steps, pc = self.target.registers().pc, "stepping stopped");
        Ok(())
    }

    fn cmd_info_registers(&mut self) {
        for line in self.target.registers().display_lines() {
            self.println(line);
        }
    }

    fn cmd_info_watchpoints(&mut self) {
        let list = self.watchpoints.list();
        if list.is_empty() {
            self.println("no watchpoints");
            return;
        }
        self.println(format!("{:<6}{:<24}{}", "Num", "What", "Value"));
        for wp in list {
            self.println(format!("{:<6}{:<24}{:#x}", wp.id, wp.expression, wp.value));
        }
    }

    fn cmd_examine(&mut self, count: u32, source: &str) -> Result<(), CommandError> {
        let base = self.eval(source)?;
        for i in 0..count {
            let addr = base.wrapping_add(i.wrapping_mul(4));
            let value = self.target.paddr_read(addr, 4)?;
            self.println(format!("{addr:#010x}: {value:#010x}"));
        }
        Ok(())
    }

    fn cmd_print(&mut self, source: &str) -> Result<(), CommandError> {
        let value = self.eval(source)?;
        self.println(format!("{value}(dec), {value:#x}"));
        Ok(())
    }

    fn cmd_watch(&mut self, source: &str) -> Result<(), CommandError> {
        let id = self.watchpoints.allocate(source, self.target.registers())?;
        self.println(format!("Watchpoint {id}: {source}"));
        Ok(())
    }

    fn cmd_delete(&mut self, n: usize) -> Result<(), CommandError> {
        self.watchpoints.release(WatchpointId(n))?;
        self.println(format!("Deleted watchpoint {n}"));
        Ok(())
    }

    fn eval(&self, source: &str) -> Result<Word, ExprError> {
        expr(source, self.target.registers())
    }

    // ── Drivers ──────────────────────────────────────────────────────

    /// Run `c` once, as batch mode does.
    pub fn run_batch(&mut self) {
        self.execute(Command::Continue);
    }

    /// Run commands from `input` until it is exhausted or `q`.
    ///
    /// With `echo`, each command is printed after the prompt, as when
    /// replaying a script.
    pub fn run_script(&mut self, input: impl BufRead, echo: bool) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let cmd = commands::parse(&line);
            if cmd == Command::Empty {
                continue;
            }
            if echo {
                self.println(format!("{}{}", self.prompt, line.trim()));
            }
            if self.execute(cmd) {
                break;
            }
        }
        Ok(())
    }

    /// Interactive loop on stdin.
    pub fn run_repl(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut line = String::new();
        loop {
            print!("{}", self.prompt);
            stdout.flush()?;
            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                println!();
                return Ok(());
            }
            if self.execute_line(&line) {
                return Ok(());
            }
        }
    }
}
