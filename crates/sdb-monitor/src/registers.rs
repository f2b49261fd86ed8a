//! RV32 register file as seen by the monitor.

use sdb_types::{RegisterLookup, Word};

/// ABI names of the 32 general-purpose registers, indexed by number.
/// Register 0 is shown as `$0`.
pub const ABI_NAMES: [&str; 32] = [
    "$0", "ra", "sp", "gp", "tp", "t0", "t1", "t2",
    "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5",
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7",
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6",
];

/// General-purpose registers plus `pc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Riscv32Registers {
    pub gpr: [Word; 32],
    pub pc: Word,
}

impl Riscv32Registers {
    pub fn new(pc: Word) -> Self {
        Self { gpr: [0; 32], pc }
    }

    /// Register number for an ABI name (`sp`) or numeric alias (`x2`).
    pub fn index_of(name: &str) -> Option<usize> {
        if let Some(i) = ABI_NAMES.iter().position(|&n| n == name) {
            return Some(i);
        }
        if name == "zero" {
            return Some(0);
        }
        let digits = name.strip_prefix('x')?;
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        digits.parse::<usize>().ok().filter(|&i| i < 32)
    }

    /// Write a register by name. `x0` stays zero. Returns `false` for
    /// unknown names.
    pub fn set(&mut self, name: &str, value: Word) -> bool {
        if name == "pc" {
            self.pc = value;
            return true;
        }
        match Self::index_of(name) {
            Some(0) => true,
            Some(i) => {
                self.gpr[i] = value;
                true
            }
            None => false,
        }
    }

    /// `info r` table: two registers per line, then `pc`.
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .gpr
            .chunks(2)
            .enumerate()
            .map(|(row, pair)| {
                let (a, b) = (row * 2, row * 2 + 1);
                format!(
                    "{:<4}{:<12}{:#010x}    {:<4}{:<12}{:#010x}",
                    ABI_NAMES[a], pair[0], pair[0], ABI_NAMES[b], pair[1], pair[1]
                )
            })
            .collect();
        lines.push(format!("{:<4}{:<12}{:#010x}", "pc", self.pc, self.pc));
        lines
    }
}

impl RegisterLookup for Riscv32Registers {
    fn lookup(&self, name: &str) -> Option<Word> {
        if name == "pc" {
            return Some(self.pc);
        }
        Self::index_of(name).map(|i| self.gpr[i])
    }
}
