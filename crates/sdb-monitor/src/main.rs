//! `sdb`: simple debugger for an RV32 target.
//!
//! ```bash
//! # Interactive
//! sdb --image prog.bin
//!
//! # Replay a command script, echoing each command
//! sdb --script session.sdb
//!
//! # Check the evaluator against an expression corpus
//! sdb --expr-tests input.txt
//! sdb --expr-tests input.txt --json
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use sdb_monitor::{
    replay_corpus, MonitorConfig, MonitorError, MonitorResult, Riscv32Registers, Session,
    StubTarget,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sdb")]
#[command(version, about = "Simple debugger for an RV32 target", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run to completion without a prompt
    #[arg(short, long)]
    batch: bool,

    /// Raw image loaded at the memory base
    #[arg(short, long, value_name = "FILE")]
    image: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Read commands from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Replay an expression corpus and exit
    #[arg(long, value_name = "FILE")]
    expr_tests: Option<PathBuf>,

    /// Print the corpus report as JSON
    #[arg(long, requires = "expr_tests")]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match MonitorConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => MonitorConfig::default(),
    };
    if cli.batch {
        config.batch = true;
    }
    if cli.image.is_some() {
        config.memory.image = cli.image.clone();
    }
    if cli.verbose {
        config.log_level = "debug".to_string();
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &MonitorConfig) -> MonitorResult<ExitCode> {
    if let Some(path) = &cli.expr_tests {
        let text = read_to_string(path)?;
        let regs = Riscv32Registers::new(config.memory.base);
        let report = replay_corpus(&text, &regs);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{report}");
        }
        return Ok(if report.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let mut target = StubTarget::new(config.memory.base, config.memory.size);
    if let Some(path) = &config.memory.image {
        let image = std::fs::read(path).map_err(|source| MonitorError::Read {
            path: path.clone(),
            source,
        })?;
        target.load_image(&image)?;
        tracing::info!(path = %path.display(), bytes = image.len(), "image loaded");
    }

    let mut session = Session::new(target, config);
    if let Some(path) = &cli.script {
        let file = File::open(path).map_err(|source| MonitorError::Read {
            path: path.clone(),
            source,
        })?;
        session.run_script(BufReader::new(file), true)?;
    } else if config.batch {
        session.run_batch();
    } else {
        session.run_repl()?;
    }
    Ok(ExitCode::SUCCESS)
}

fn read_to_string(path: &Path) -> MonitorResult<String> {
    std::fs::read_to_string(path).map_err(|source| MonitorError::Read {
        path: path.to_path_buf(),
        source,
    })
}
