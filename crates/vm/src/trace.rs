//! Defines the [`Trace`] trait, used to gather information about the execution of a program
//! within the machine.

use crate::cpu::Registers;
use crate::instr::Instruction;

/// A collection of callbacks to be called during the execution of a program.
#[allow(unused_variables)]
pub trait Trace {
    /// Called right before `instruction`, fetched at `pc`, is executed.
    fn instruction(&mut self, pc: usize, instruction: &Instruction, registers: &Registers) {}

    /// Called whenever a digit is emitted.
    fn output(&mut self, digit: u8) {}
}

/// An implementation of [`Trace`] that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;
impl Trace for NoopTrace {}

/// An implementation of [`Trace`] forwarding every event to the [`log`] facade at the `trace`
/// level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn instruction(&mut self, pc: usize, instruction: &Instruction, registers: &Registers) {
        log::trace!("{pc:>4}: {instruction} | {registers}");
    }

    fn output(&mut self, digit: u8) {
        log::trace!("      out -> {digit}");
    }
}

/// An implementation of [`Trace`] recording the program counters it sees, in order.
#[derive(Debug, Default, Clone)]
pub struct PcTrace {
    /// The visited program counters.
    pub visited: Vec<usize>,
}

impl Trace for PcTrace {
    fn instruction(&mut self, pc: usize, _instruction: &Instruction, _registers: &Registers) {
        self.visited.push(pc);
    }
}
