//! Transcript tests for the debugger shell.
//!
//! Each test drives a [`Session`] over a 64-byte [`StubTarget`] at
//! `0x1000` (sixteen instructions before `pc` leaves memory) and checks
//! the captured output.

use sdb_monitor::{MonitorConfig, Session, StubTarget, Target};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

const BASE: u32 = 0x1000;
const MEM: usize = 64;

fn session() -> Session<StubTarget> {
    session_with(&MonitorConfig::default())
}

fn session_with(config: &MonitorConfig) -> Session<StubTarget> {
    Session::new(StubTarget::new(BASE, MEM), config).quiet()
}

fn run(s: &mut Session<StubTarget>, lines: &[&str]) -> Vec<String> {
    s.clear_output();
    for line in lines {
        s.execute_line(line);
    }
    s.output().to_vec()
}

fn set_reg(s: &mut Session<StubTarget>, name: &str, value: u32) {
    assert!(s.target_mut().registers_mut().set(name, value));
}

// ─────────────────────────────────────────────────────────────────────
// Expressions
// ─────────────────────────────────────────────────────────────────────

#[test]
fn print_arithmetic_and_registers() {
    let mut s = session();
    set_reg(&mut s, "sp", 0x100);
    let out = run(&mut s, &["p 1 + 2 * 3", "p $sp + 8", "p $pc", "p 0 - 1"]);
    assert_eq!(
        out,
        [
            "7(dec), 0x7",
            "264(dec), 0x108",
            "4096(dec), 0x1000",
            "4294967295(dec), 0xffffffff",
        ]
    );
}

#[test]
fn print_reports_errors_and_continues() {
    let mut s = session();
    let out = run(&mut s, &["p $zz", "p 1 / 0", "p (1 + 2", "p 4"]);
    assert_eq!(
        out,
        [
            "error: unknown register: $zz",
            "error: division by zero",
            "error: unbalanced parentheses",
            "4(dec), 0x4",
        ]
    );
}

#[test]
fn lex_error_in_watch_shows_caret() {
    let mut s = session();
    let out = run(&mut s, &["w $pc # 1"]);
    assert_eq!(out[0], "error: cannot evaluate watched expression: no rule matches at position 4");
    assert_eq!(out[1], "  $pc # 1");
    assert_eq!(out[2], "      ^");
    assert!(s.watchpoints().is_empty());
}

// ─────────────────────────────────────────────────────────────────────
// Stepping
// ─────────────────────────────────────────────────────────────────────

#[test]
fn continue_runs_to_end() {
    let mut s = session();
    let out = run(&mut s, &["c"]);
    assert_eq!(out, ["Program ended at pc = 0x00001040 after 16 instructions"]);
    assert!(s.target().has_ended());

    let out = run(&mut s, &["si", "c"]);
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|l| l.starts_with("The program has ended")));
    assert_eq!(s.target().instructions(), 16);
}

#[test]
fn step_counts_instructions() {
    let mut s = session();
    run(&mut s, &["si", "si 3", "si 0"]);
    assert_eq!(s.target().instructions(), 4);
    assert_eq!(s.target().registers().pc, BASE + 16);
}

#[test]
fn batch_mode_runs_to_end() {
    let mut s = session();
    s.run_batch();
    assert_eq!(s.target().instructions(), 16);
}

// ─────────────────────────────────────────────────────────────────────
// Watchpoints
// ─────────────────────────────────────────────────────────────────────

#[test]
fn watchpoint_on_pc_stops_after_one_step() {
    let mut s = session();
    let out = run(&mut s, &["w $pc", "si 5"]);
    assert_eq!(
        out,
        [
            "Watchpoint 0: $pc",
            "watchpoint 0: $pc",
            "old value = 4096",
            "new value = 4100",
        ]
    );
    assert_eq!(s.target().instructions(), 1);

    run(&mut s, &["c"]);
    assert_eq!(s.target().instructions(), 2);
}

#[test]
fn unchanged_watchpoint_does_not_stop() {
    let mut s = session();
    let out = run(&mut s, &["w $sp + 1", "si 3"]);
    assert_eq!(out, ["Watchpoint 0: $sp + 1"]);
    assert_eq!(s.target().instructions(), 3);
}

#[test]
fn register_change_triggers_watchpoint() {
    let mut s = session();
    run(&mut s, &["w $a0"]);
    set_reg(&mut s, "a0", 5);
    let out = run(&mut s, &["c"]);
    assert_eq!(out, ["watchpoint 0: $a0", "old value = 0", "new value = 5"]);
    assert_eq!(s.target().instructions(), 1);
}

#[test]
fn failing_watchpoint_warns_once_and_keeps_stepping() {
    let mut s = session();
    set_reg(&mut s, "a0", 2);
    run(&mut s, &["w 8 / $a0"]);
    set_reg(&mut s, "a0", 0);
    let out = run(&mut s, &["si 3"]);
    assert_eq!(out, ["warning: watchpoint 0: 8 / $a0: division by zero"]);
    assert_eq!(s.target().instructions(), 3);
}

#[test]
fn info_and_delete() {
    let mut s = session();
    assert_eq!(run(&mut s, &["info w"]), ["no watchpoints"]);

    run(&mut s, &["w $pc", "w 1 + 1"]);
    let out = run(&mut s, &["info w"]);
    assert_eq!(out.len(), 3);
    assert!(out[0].starts_with("Num"));
    assert!(out[1].starts_with("1 ") && out[1].contains("1 + 1") && out[1].ends_with("0x2"));
    assert!(out[2].starts_with("0 ") && out[2].contains("$pc") && out[2].ends_with("0x1000"));

    let out = run(&mut s, &["d 0", "d 0", "d 7"]);
    assert_eq!(
        out,
        [
            "Deleted watchpoint 0",
            "error: no watchpoint number 0",
            "error: no watchpoint number 7",
        ]
    );
    assert_eq!(s.watchpoints().active_len(), 1);
}

#[test]
fn pool_capacity_comes_from_config() {
    let mut config = MonitorConfig::default();
    config.watchpoints.capacity = 2;
    let mut s = session_with(&config);
    let out = run(&mut s, &["w 1", "w 2", "w 3"]);
    assert_eq!(out[2], "error: no free watchpoint (all 2 in use)");
}

// ─────────────────────────────────────────────────────────────────────
// Memory & registers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn examine_reads_words() {
    let mut s = session();
    s.target_mut()
        .load_image(&[0x78, 0x56, 0x34, 0x12, 0xef, 0xbe, 0xad, 0xde])
        .unwrap();
    let out = run(&mut s, &["x 2 $pc"]);
    assert_eq!(out, ["0x00001000: 0x12345678", "0x00001004: 0xdeadbeef"]);
}

#[test]
fn examine_out_of_bounds_is_reported() {
    let mut s = session();
    let out = run(&mut s, &["x 1 0", "x 2 $pc + 60"]);
    assert_eq!(
        out,
        [
            "error: address 0x00000000 is outside physical memory (64 bytes)",
            "0x0000103c: 0x00000000",
            "error: address 0x00001040 is outside physical memory (64 bytes)",
        ]
    );
}

#[test]
fn info_registers_table() {
    let mut s = session();
    set_reg(&mut s, "ra", 0x10);
    let out = run(&mut s, &["info r"]);
    assert_eq!(out.len(), 17);
    assert!(out[0].starts_with("$0"));
    assert!(out[0].contains("ra") && out[0].ends_with("0x00000010"));
    assert!(out[16].starts_with("pc") && out[16].ends_with("0x00001000"));
}

// ─────────────────────────────────────────────────────────────────────
// Shell
// ─────────────────────────────────────────────────────────────────────

#[test]
fn help_and_unknown_commands() {
    let mut s = session();
    assert_eq!(run(&mut s, &["help"]).len(), 9);
    assert_eq!(
        run(&mut s, &["help d", "help zap", "zap"]),
        [
            "d N - Delete watchpoint N",
            "Unknown command 'zap'",
            "Unknown command 'zap'",
        ]
    );
}

#[test]
fn script_echoes_commands_and_stops_at_quit() {
    let mut s = session();
    let script = "# setup\np 1 + 2\n\nw $pc\nsi\nq\np 99\n";
    s.run_script(script.as_bytes(), true).unwrap();
    assert_eq!(
        s.output(),
        [
            "(sdb) p 1 + 2",
            "3(dec), 0x3",
            "(sdb) w $pc",
            "Watchpoint 0: $pc",
            "(sdb) si",
            "watchpoint 0: $pc",
            "old value = 4096",
            "new value = 4100",
            "(sdb) q",
        ]
    );
}
