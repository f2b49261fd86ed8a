//! Command parsing for the monitor

/// A parsed monitor command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List commands, or describe one
    Help(Option<String>),
    /// Run until the target ends or a watchpoint fires
    Continue,
    /// Quit the monitor
    Quit,
    /// Step N instructions
    Step(u64),
    /// Show registers or watchpoints
    Info(InfoKind),
    /// Dump `count` words of memory starting at an expression
    Examine { count: u32, expr: String },
    /// Evaluate and print an expression
    Print(String),
    /// Set a watchpoint on an expression
    Watch(String),
    /// Delete a watchpoint by number
    Delete(usize),
    /// Malformed arguments; carries the usage line
    Usage(&'static str),
    /// Empty line or comment
    Empty,
    /// Unknown command
    Unknown(String),
}

/// Kind of info to display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoKind {
    Registers,
    Watchpoints,
}

/// Name, usage and description of every command, in `help` order.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("help", "help [CMD]", "Display information about all supported commands"),
    ("c", "c", "Continue the execution of the program"),
    ("q", "q", "Exit the monitor"),
    ("si", "si [N]", "Step N instructions (default 1)"),
    ("info", "info r|w", "Print registers (r) or watchpoints (w)"),
    ("x", "x N EXPR", "Print N words of memory starting at EXPR"),
    ("p", "p EXPR", "Evaluate EXPR and print it in decimal and hex"),
    ("w", "w EXPR", "Stop when the value of EXPR changes"),
    ("d", "d N", "Delete watchpoint N"),
];

fn usage(name: &str) -> &'static str {
    COMMANDS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map_or("help", |(_, u, _)| *u)
}

/// Parse a command line into a Command
pub fn parse(line: &str) -> Command {
    let line = line.trim();

    // Handle comments
    if line.starts_with('#') || line.is_empty() {
        return Command::Empty;
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    match cmd {
        "help" | "h" => Command::Help((!args.is_empty()).then(|| args.to_string())),
        "c" | "continue" => Command::Continue,
        "q" | "quit" => Command::Quit,
        "si" => parse_step(args),
        "info" | "i" => parse_info(args),
        "x" => parse_examine(args),
        "p" | "print" => parse_expr_arg(args, Command::Print, "p"),
        "w" | "watch" => parse_expr_arg(args, Command::Watch, "w"),
        "d" | "delete" => match args.parse::<usize>() {
            Ok(n) => Command::Delete(n),
            Err(_) => Command::Usage(usage("d")),
        },
        _ => Command::Unknown(cmd.to_string()),
    }
}

fn parse_step(args: &str) -> Command {
    if args.is_empty() {
        return Command::Step(1);
    }
    match args.parse::<u64>() {
        Ok(n) => Command::Step(n),
        Err(_) => Command::Usage(usage("si")),
    }
}

fn parse_info(args: &str) -> Command {
    match args {
        "r" | "registers" => Command::Info(InfoKind::Registers),
        "w" | "watchpoints" => Command::Info(InfoKind::Watchpoints),
        _ => Command::Usage(usage("info")),
    }
}

fn parse_examine(args: &str) -> Command {
    let mut parts = args.splitn(2, char::is_whitespace);
    let count = parts.next().unwrap_or("").parse::<u32>();
    let expr = parts.next().unwrap_or("").trim();
    match count {
        Ok(count) if !expr.is_empty() => Command::Examine {
            count,
            expr: expr.to_string(),
        },
        _ => Command::Usage(usage("x")),
    }
}

fn parse_expr_arg(args: &str, make: fn(String) -> Command, name: &str) -> Command {
    if args.is_empty() {
        Command::Usage(usage(name))
    } else {
        make(args.to_string())
    }
}
