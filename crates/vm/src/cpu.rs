//! Defines the [`Cpu`] type, responsible for describing the state of the CPU.
//!
//! More information in the documentation for [`Cpu`].

use std::fmt;

use num_bigint::BigInt;
use num_traits::Zero;

/// One of the three general purpose registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    /// The accumulator, driving loop counts and output digit selection.
    A = 4,
    /// A scratch register.
    B = 5,
    /// A scratch register.
    C = 6,
}

/// The register file of the machine.
///
/// Registers hold arbitrary precision signed integers and are never clamped or truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Registers {
    /// The **A** register.
    pub a: BigInt,
    /// The **B** register.
    pub b: BigInt,
    /// The **C** register.
    pub c: BigInt,
}

impl Registers {
    /// Creates a new register file from the provided values.
    pub fn new(a: impl Into<BigInt>, b: impl Into<BigInt>, c: impl Into<BigInt>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        }
    }

    /// Creates a register file where only **A** is set, **B** and **C** being zero.
    pub fn with_a(a: impl Into<BigInt>) -> Self {
        Self {
            a: a.into(),
            b: BigInt::zero(),
            c: BigInt::zero(),
        }
    }

    /// Returns the value of the provided register.
    #[inline(always)]
    pub fn get(&self, register: Register) -> &BigInt {
        match register {
            Register::A => &self.a,
            Register::B => &self.b,
            Register::C => &self.c,
        }
    }

    /// Returns a mutable reference to the provided register.
    #[inline(always)]
    pub fn get_mut(&mut self, register: Register) -> &mut BigInt {
        match register {
            Register::A => &mut self.a,
            Register::B => &mut self.b,
            Register::C => &mut self.c,
        }
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A: {}, B: {}, C: {}", self.a, self.b, self.c)
    }
}

/// The Central Processing Unit (CPU) executing three-bit instructions.
///
/// By itself, a [`Cpu`] is not enough to execute anything. It has to be paired with a
/// [`Program`](crate::program::Program) inside of a [`Computer`](crate::Computer).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cpu {
    /// The Program Counter of the CPU, the index of the next opcode to be fetched from the
    /// program.
    ///
    /// It starts at zero and moves forward by two after every instruction, except for taken
    /// jumps which set it directly.
    pub pc: usize,
    /// The register file.
    pub registers: Registers,
}

impl Cpu {
    /// Creates a new [`Cpu`] whose program counter points to the first instruction.
    #[inline]
    pub fn new(registers: Registers) -> Self {
        Self { pc: 0, registers }
    }
}
