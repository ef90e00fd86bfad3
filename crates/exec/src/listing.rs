//! Defines the [`Listing`] type, the textual description of a machine's initial state.
//!
//! A listing looks like this:
//!
//! ```text
//! Register A: 729
//! Register B: 0
//! Register C: 0
//!
//! Program: 0,1,5,4,3,0
//! ```

use std::fmt;

use chronospatial_vm::cpu::{Register, Registers};
use chronospatial_vm::error::Error;
use chronospatial_vm::program::Program;
use num_bigint::BigInt;

/// An error that might occur when parsing a [`Listing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// A line did not look like anything a listing may contain.
    UnexpectedLine {
        /// The one-based number of the offending line.
        line: usize,
    },
    /// A register value was not an integer.
    InvalidRegister {
        /// The one-based number of the offending line.
        line: usize,
    },
    /// The same register was given twice.
    DuplicateRegister(Register),
    /// A register was never given.
    MissingRegister(Register),
    /// The listing had no `Program:` line.
    MissingProgram,
    /// The program itself was malformed.
    Program(Error),
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedLine { line } => write!(f, "unexpected content on line {line}"),
            Self::InvalidRegister { line } => write!(f, "invalid register value on line {line}"),
            Self::DuplicateRegister(register) => write!(f, "register {register:?} given twice"),
            Self::MissingRegister(register) => write!(f, "register {register:?} is missing"),
            Self::MissingProgram => f.write_str("the listing has no program"),
            Self::Program(err) => write!(f, "invalid program: {err}"),
        }
    }
}

impl std::error::Error for ListingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Program(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Error> for ListingError {
    #[inline(always)]
    fn from(value: Error) -> Self {
        Self::Program(value)
    }
}

/// The initial state of a machine: its registers and the program it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// The initial registers.
    pub registers: Registers,
    /// The program.
    pub program: Program,
}

impl Listing {
    /// Parses a listing.
    ///
    /// Blank lines are ignored and lines may come in any order, but every register and the
    /// program must be given exactly once.
    pub fn parse(text: &str) -> Result<Self, ListingError> {
        let mut a = None;
        let mut b = None;
        let mut c = None;
        let mut program = None;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let raw = raw.trim();

            if raw.is_empty() {
                continue;
            }

            if let Some(values) = raw.strip_prefix("Program:") {
                if program.is_some() {
                    return Err(ListingError::UnexpectedLine { line });
                }
                program = Some(values.trim().parse::<Program>()?);
                continue;
            }

            let Some(rest) = raw.strip_prefix("Register ") else {
                return Err(ListingError::UnexpectedLine { line });
            };
            let Some((name, value)) = rest.split_once(':') else {
                return Err(ListingError::UnexpectedLine { line });
            };

            let (register, slot) = match name.trim() {
                "A" => (Register::A, &mut a),
                "B" => (Register::B, &mut b),
                "C" => (Register::C, &mut c),
                _ => return Err(ListingError::UnexpectedLine { line }),
            };

            if slot.is_some() {
                return Err(ListingError::DuplicateRegister(register));
            }

            let value = value
                .trim()
                .parse::<BigInt>()
                .map_err(|_| ListingError::InvalidRegister { line })?;
            *slot = Some(value);
        }

        Ok(Self {
            registers: Registers {
                a: a.ok_or(ListingError::MissingRegister(Register::A))?,
                b: b.ok_or(ListingError::MissingRegister(Register::B))?,
                c: c.ok_or(ListingError::MissingRegister(Register::C))?,
            },
            program: program.ok_or(ListingError::MissingProgram)?,
        })
    }
}

/// Joins emitted digits with commas, the way listings write programs.
pub fn format_output(digits: &[u8]) -> String {
    digits
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
