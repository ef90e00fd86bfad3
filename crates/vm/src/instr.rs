//! Defines the [`Instruction`] type, responsible for representing a single decoded
//! `(opcode, operand)` pair, and the [`Effect`] it has on the machine.

use std::borrow::Cow;
use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::cpu::{Register, Registers};
use crate::error::Error;

/// A combo operand, whose numeric meaning depends on its raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Raw values `0..=3` stand for themselves.
    Literal(u8),
    /// Raw values `4`, `5` and `6` refer to the **A**, **B** and **C** registers.
    Register(Register),
}

impl Operand {
    /// Decodes a raw combo operand.
    ///
    /// The value `7` is reserved and fails with [`Error::ReservedOperand`].
    pub fn combo(raw: u8) -> Result<Self, Error> {
        match raw {
            0..=3 => Ok(Self::Literal(raw)),
            4 => Ok(Self::Register(Register::A)),
            5 => Ok(Self::Register(Register::B)),
            6 => Ok(Self::Register(Register::C)),
            _ => Err(Error::ReservedOperand),
        }
    }

    /// Returns the numeric value of the operand given the current state of the registers.
    #[inline]
    pub fn value<'a>(&self, registers: &'a Registers) -> Cow<'a, BigInt> {
        match *self {
            Self::Literal(value) => Cow::Owned(BigInt::from(value)),
            Self::Register(register) => Cow::Borrowed(registers.get(register)),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Register(Register::A) => f.write_str("A"),
            Self::Register(Register::B) => f.write_str("B"),
            Self::Register(Register::C) => f.write_str("C"),
        }
    }
}

/// A single decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `A <- A / 2^operand`, truncated toward zero.
    Adv(Operand),
    /// `B <- B xor literal`.
    Bxl(u8),
    /// `B <- operand mod 8`.
    Bst(Operand),
    /// Jumps to `literal` when **A** is not zero.
    Jnz(u8),
    /// `B <- B xor C`. The operand is read but ignored.
    Bxc,
    /// Outputs `operand mod 8`.
    Out(Operand),
    /// `B <- A / 2^operand`, truncated toward zero.
    Bdv(Operand),
    /// `C <- A / 2^operand`, truncated toward zero.
    Cdv(Operand),
}

impl Instruction {
    /// Decodes an `(opcode, operand)` pair.
    ///
    /// Whether `operand` is read as a literal or as a combo operand depends on `opcode`, so a
    /// raw operand of `7` only fails for the opcodes that read a combo operand.
    pub fn decode(opcode: u8, operand: u8) -> Result<Self, Error> {
        match opcode {
            0 => Ok(Self::Adv(Operand::combo(operand)?)),
            1 => Ok(Self::Bxl(operand)),
            2 => Ok(Self::Bst(Operand::combo(operand)?)),
            3 => Ok(Self::Jnz(operand)),
            4 => Ok(Self::Bxc),
            5 => Ok(Self::Out(Operand::combo(operand)?)),
            6 => Ok(Self::Bdv(Operand::combo(operand)?)),
            7 => Ok(Self::Cdv(Operand::combo(operand)?)),
            _ => Err(Error::UndefinedOpCode(opcode)),
        }
    }

    /// Computes the effect of the instruction on the provided registers, without applying it.
    pub fn evaluate(&self, registers: &Registers) -> Result<Effect, Error> {
        match *self {
            Self::Adv(operand) => Ok(Effect::Write(
                Register::A,
                divide_by_power_of_two(&registers.a, &operand.value(registers))?,
            )),
            Self::Bxl(literal) => Ok(Effect::Write(
                Register::B,
                &registers.b ^ &BigInt::from(literal),
            )),
            Self::Bst(operand) => Ok(Effect::Write(
                Register::B,
                BigInt::from(low_three_bits(&operand.value(registers))),
            )),
            Self::Jnz(target) => {
                if registers.a.is_zero() {
                    Ok(Effect::None)
                } else {
                    Ok(Effect::Jump(target as usize))
                }
            }
            Self::Bxc => Ok(Effect::Write(Register::B, &registers.b ^ &registers.c)),
            Self::Out(operand) => Ok(Effect::Output(low_three_bits(&operand.value(registers)))),
            Self::Bdv(operand) => Ok(Effect::Write(
                Register::B,
                divide_by_power_of_two(&registers.a, &operand.value(registers))?,
            )),
            Self::Cdv(operand) => Ok(Effect::Write(
                Register::C,
                divide_by_power_of_two(&registers.a, &operand.value(registers))?,
            )),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adv(operand) => write!(f, "adv {operand}"),
            Self::Bxl(literal) => write!(f, "bxl {literal}"),
            Self::Bst(operand) => write!(f, "bst {operand}"),
            Self::Jnz(target) => write!(f, "jnz {target}"),
            Self::Bxc => f.write_str("bxc"),
            Self::Out(operand) => write!(f, "out {operand}"),
            Self::Bdv(operand) => write!(f, "bdv {operand}"),
            Self::Cdv(operand) => write!(f, "cdv {operand}"),
        }
    }
}

/// The outcome of evaluating an [`Instruction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing but moving the **Program Counter** to the next instruction.
    None,
    /// A register is overwritten, then the **Program Counter** moves to the next instruction.
    Write(Register, BigInt),
    /// A digit is emitted, then the **Program Counter** moves to the next instruction.
    Output(u8),
    /// The **Program Counter** is set to an absolute position.
    Jump(usize),
}

/// Computes `dividend / 2^exponent`, truncating toward zero.
///
/// This is a true division rather than an arithmetic shift, which would round toward negative
/// infinity for negative dividends.
pub fn divide_by_power_of_two(dividend: &BigInt, exponent: &BigInt) -> Result<BigInt, Error> {
    if exponent.is_negative() {
        return Err(Error::NegativeShift);
    }

    // `|dividend| < 2^bits`, so any larger exponent truncates to zero.
    match exponent.to_u64() {
        Some(exponent) if exponent <= dividend.bits() => Ok(dividend / &(BigInt::one() << exponent)),
        _ => Ok(BigInt::zero()),
    }
}

/// Returns `value mod 8`, always in `0..8` even for negative values.
pub fn low_three_bits(value: &BigInt) -> u8 {
    let (_, digits) = value.mod_floor(&BigInt::from(8u8)).to_u32_digits();
    // Zero has no digits at all.
    digits.first().copied().unwrap_or(0) as u8
}
