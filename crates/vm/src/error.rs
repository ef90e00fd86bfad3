//! Defines the [`Error`] type of the crate.

use std::fmt;

/// An error that might occur when loading or executing a program.
///
/// Only hard faults are represented here. Running out of steps and failing to find a seed are
/// expected outcomes and are reported through [`Status`](crate::run::Status) and
/// [`SearchOutcome`](crate::search::SearchOutcome) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The program contained no instruction at all.
    EmptyProgram,
    /// The program had an odd number of values, leaving an opcode without its operand.
    OddProgramLength {
        /// The number of values in the rejected program.
        length: usize,
    },
    /// A program value did not fit in three bits.
    ValueOutOfRange {
        /// The position of the offending value.
        index: usize,
        /// The offending value.
        value: u8,
    },
    /// A program listing contained something that is not a three-bit number.
    InvalidDigit(String),

    // These are contract violations of the program being executed. They abort the run.
    //
    /// An opcode outside of `0..=7` was decoded.
    UndefinedOpCode(u8),
    /// A combo operand of value `7` was decoded. That value is reserved and does not refer to
    /// anything.
    ReservedOperand,
    /// A division instruction was asked to divide by two to the power of a negative number.
    NegativeShift,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyProgram => f.write_str("the program is empty"),
            Self::OddProgramLength { length } => {
                write!(f, "the program has an odd length ({length})")
            }
            Self::ValueOutOfRange { index, value } => {
                write!(f, "program value {value} at index {index} is not in 0..=7")
            }
            Self::InvalidDigit(token) => write!(f, "`{token}` is not a three-bit number"),
            Self::UndefinedOpCode(opcode) => write!(f, "undefined opcode {opcode}"),
            Self::ReservedOperand => f.write_str("the reserved combo operand 7 was decoded"),
            Self::NegativeShift => f.write_str("division by a negative power of two"),
        }
    }
}

impl std::error::Error for Error {}
