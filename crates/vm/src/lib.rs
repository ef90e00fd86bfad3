//! # Chronospatial
//!
//! A three-bit register machine, and a search for the initial value of its **A** register that
//! makes a program output itself.
//!
//! # Overview
//!
//! - [`Program`]: an immutable, validated sequence of three-bit values read as
//!   `(opcode, operand)` pairs.
//!
//! - [`Computer`]: a [`Cpu`] (registers and program counter) bound to a [`Program`]. It can be
//!   stepped manually, drained lazily through [`Outputs`], or run to completion with
//!   [`execute`].
//!
//! - [`search`]: the backward, digit-at-a-time search for self-replicating seeds.

#![warn(missing_docs, missing_debug_implementations)]

use num_bigint::BigInt;

use cpu::{Cpu, Registers};
use error::Error;
use instr::{Effect, Instruction};
use program::Program;
use run::{Outputs, Run};
use trace::{NoopTrace, Trace};

pub mod cpu;
pub mod error;
pub mod instr;
pub mod program;
pub mod run;
pub mod search;
pub mod shape;
pub mod trace;

pub use search::find_min_self_replicating_seed;

/// Contains the full state of one execution of a [`Program`].
///
/// A [`Computer`] is created fresh for every run and discarded afterwards. Nothing is shared
/// between two computers except the read-only program they borrow.
///
/// # Halting
///
/// There is no halt instruction. The machine halts as soon as the program counter no longer
/// points to a full `(opcode, operand)` pair.
#[derive(Debug, Clone)]
pub struct Computer<'p> {
    /// The central processing unit, holding the registers and the program counter.
    cpu: Cpu,
    /// The program being executed.
    program: &'p Program,
    /// The number of instructions executed so far.
    steps: u64,
}

impl<'p> Computer<'p> {
    /// Creates a new [`Computer`] ready to execute the first instruction of `program`.
    pub fn new(program: &'p Program, registers: Registers) -> Self {
        Self {
            cpu: Cpu::new(registers),
            program,
            steps: 0,
        }
    }

    /// Returns the current state of the [`Cpu`].
    #[inline(always)]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Returns the program being executed.
    #[inline(always)]
    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// Returns the number of instructions executed so far.
    #[inline(always)]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns whether the machine has halted.
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.program.fetch(self.cpu.pc).is_none()
    }

    /// Advances the machine by a single step, tracing events using the provided [`Trace`]
    /// implementation.
    ///
    /// # Returns
    ///
    /// The digit emitted by the instruction, if any. Stepping a halted machine does nothing
    /// and returns `Ok(None)`.
    pub fn step<T>(&mut self, trace: &mut T) -> Result<Option<u8>, Error>
    where
        T: ?Sized + Trace,
    {
        let Some(instruction) = fetch_instruction(&self.cpu, self.program)? else {
            return Ok(None);
        };

        trace.instruction(self.cpu.pc, &instruction, &self.cpu.registers);

        let effect = instruction.evaluate(&self.cpu.registers)?;
        self.steps += 1;

        match effect {
            Effect::None => self.cpu.pc += 2,
            Effect::Write(register, value) => {
                *self.cpu.registers.get_mut(register) = value;
                self.cpu.pc += 2;
            }
            Effect::Output(digit) => {
                trace.output(digit);
                self.cpu.pc += 2;
                return Ok(Some(digit));
            }
            Effect::Jump(target) => self.cpu.pc = target,
        }

        Ok(None)
    }

    /// Turns this [`Computer`] into a lazy generator of the digits it emits.
    ///
    /// When `max_steps` is provided, the generator stops after that many instructions even if
    /// the machine has not halted. [`Outputs::status`] tells both cases apart.
    pub fn outputs(self, max_steps: Option<u64>) -> Outputs<'p, NoopTrace> {
        Outputs::new(self, max_steps, NoopTrace)
    }

    /// Like [`Computer::outputs`], but every event is reported to `trace`.
    pub fn outputs_traced<T: Trace>(self, max_steps: Option<u64>, trace: T) -> Outputs<'p, T> {
        Outputs::new(self, max_steps, trace)
    }

    /// Runs the machine until it halts or executes `max_steps` instructions.
    pub fn run(self, max_steps: Option<u64>) -> Result<Run, Error> {
        Run::collect(self.outputs(max_steps))
    }
}

/// Executes `program` with the provided initial registers and collects everything it emits.
///
/// Without a `max_steps` ceiling, a program that never halts makes this function loop forever.
pub fn execute(
    program: &Program,
    a: impl Into<BigInt>,
    b: impl Into<BigInt>,
    c: impl Into<BigInt>,
    max_steps: Option<u64>,
) -> Result<Run, Error> {
    Computer::new(program, Registers::new(a, b, c)).run(max_steps)
}

/// Attempts to fetch and decode the instruction referenced by the **Program Counter** of the
/// provided [`Cpu`].
///
/// `Ok(None)` is returned when the machine has halted.
#[inline]
fn fetch_instruction(cpu: &Cpu, program: &Program) -> Result<Option<Instruction>, Error> {
    match program.fetch(cpu.pc) {
        Some((opcode, operand)) => Instruction::decode(opcode, operand).map(Some),
        None => Ok(None),
    }
}
