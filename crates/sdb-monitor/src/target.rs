//! The machine the monitor drives.
//!
//! [`Target`] is the seam to an instruction-set simulator. [`StubTarget`]
//! stands in for one: it owns a register file and a flat physical memory
//! but does not decode instructions. Each step only advances `pc` by one
//! instruction width, which is enough to drive watchpoints on `$pc` and
//! to inspect loaded images with `x`.

use sdb_types::Word;
use tracing::debug;

use crate::error::{MonitorError, MonitorResult};
use crate::registers::Riscv32Registers;

/// Bytes per instruction.
pub const INSTR_LEN: Word = 4;

/// Result of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The target can keep stepping.
    Running,
    /// The target stopped for good at this `pc`.
    Ended { pc: Word },
}

/// A steppable machine with registers and physical memory.
pub trait Target {
    fn registers(&self) -> &Riscv32Registers;

    /// Execute one instruction.
    fn step(&mut self) -> MonitorResult<StepOutcome>;

    /// `true` once a step has returned [`StepOutcome::Ended`].
    fn has_ended(&self) -> bool;

    /// Number of instructions executed so far.
    fn instructions(&self) -> u64;

    /// Little-endian read of `len` (1, 2 or 4) bytes at `addr`.
    fn paddr_read(&self, addr: Word, len: usize) -> MonitorResult<Word>;
}

/// Register file plus memory, no instruction decoding.
#[derive(Debug, Clone)]
pub struct StubTarget {
    regs: Riscv32Registers,
    base: Word,
    memory: Vec<u8>,
    instructions: u64,
    ended: bool,
}

impl StubTarget {
    /// Zeroed memory of `size` bytes at `base`; `pc` starts at `base`.
    pub fn new(base: Word, size: usize) -> Self {
        Self {
            regs: Riscv32Registers::new(base),
            base,
            memory: vec![0; size],
            instructions: 0,
            ended: false,
        }
    }

    /// Copy a raw image to the start of memory.
    pub fn load_image(&mut self, image: &[u8]) -> MonitorResult<()> {
        if image.len() > self.memory.len() {
            return Err(MonitorError::ImageTooLarge {
                size: image.len(),
                capacity: self.memory.len(),
            });
        }
        self.memory[..image.len()].copy_from_slice(image);
        debug!(bytes = image.len(), base = self.base, "image loaded");
        Ok(())
    }

    pub fn registers_mut(&mut self) -> &mut Riscv32Registers {
        &mut self.regs
    }

    fn in_memory(&self, addr: Word) -> bool {
        addr.checked_sub(self.base)
            .is_some_and(|off| (off as usize) < self.memory.len())
    }
}

impl Target for StubTarget {
    fn registers(&self) -> &Riscv32Registers {
        &self.regs
    }

    fn step(&mut self) -> MonitorResult<StepOutcome> {
        if self.ended {
            return Ok(StepOutcome::Ended { pc: self.regs.pc });
        }
        self.regs.pc = self.regs.pc.wrapping_add(INSTR_LEN);
        self.instructions += 1;
        if self.in_memory(self.regs.pc) {
            Ok(StepOutcome::Running)
        } else {
            self.ended = true;
            debug!(pc = self.regs.pc, instructions = self.instructions, "target ended");
            Ok(StepOutcome::Ended { pc: self.regs.pc })
        }
    }

    fn has_ended(&self) -> bool {
        self.ended
    }

    fn instructions(&self) -> u64 {
        self.instructions
    }

    fn paddr_read(&self, addr: Word, len: usize) -> MonitorResult<Word> {
        let out_of_bounds = || MonitorError::AddressOutOfBounds {
            addr,
            len: self.memory.len(),
        };
        if !matches!(len, 1 | 2 | 4) {
            return Err(out_of_bounds());
        }
        let start = addr.checked_sub(self.base).ok_or_else(out_of_bounds)? as usize;
        let bytes = start
            .checked_add(len)
            .and_then(|end| self.memory.get(start..end))
            .ok_or_else(out_of_bounds)?;
        Ok(bytes
            .iter()
            .rev()
            .fold(0, |acc: Word, &b| (acc << 8) | Word::from(b)))
    }
}
