//! Defines the [`Program`] type, the immutable instruction stream executed by a
//! [`Computer`](crate::Computer).

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The largest value a three-bit program cell can hold.
pub const MAX_VALUE: u8 = 7;

/// A validated sequence of three-bit values.
///
/// Values are read in non-overlapping pairs: the value at an even index is an opcode and the
/// value right after it is its operand.
///
/// # Invariants
///
/// A [`Program`] is never empty, always has an even length, and only holds values in `0..=7`.
/// Those properties are checked once in [`Program::new`] so that nothing downstream has to
/// re-validate them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Program {
    values: Box<[u8]>,
}

impl Program {
    /// Validates `values` and wraps them into a [`Program`].
    pub fn new(values: Vec<u8>) -> Result<Self, Error> {
        if values.is_empty() {
            return Err(Error::EmptyProgram);
        }

        if values.len() % 2 != 0 {
            return Err(Error::OddProgramLength {
                length: values.len(),
            });
        }

        if let Some((index, &value)) = values.iter().enumerate().find(|&(_, &v)| v > MAX_VALUE) {
            return Err(Error::ValueOutOfRange { index, value });
        }

        Ok(Self {
            values: values.into_boxed_slice(),
        })
    }

    /// Returns the number of values in the program (twice its number of instructions).
    #[inline(always)]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns the raw values of the program.
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }

    /// Returns the `(opcode, operand)` pair starting at `pc`.
    ///
    /// `None` is returned once no full pair remains at `pc`, which is exactly the condition
    /// under which the machine halts.
    #[inline]
    pub fn fetch(&self, pc: usize) -> Option<(u8, u8)> {
        let opcode = *self.values.get(pc)?;
        let operand = *self.values.get(pc.checked_add(1)?)?;
        Some((opcode, operand))
    }

    /// Iterates over the `(opcode, operand)` pairs of the program, in order.
    pub fn pairs(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.values.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i != 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl FromStr for Program {
    type Err = Error;

    /// Parses a comma separated list of values such as `0,3,5,4,3,0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(str::trim)
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|_| Error::InvalidDigit(token.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_programs() {
        assert_eq!(Program::new(vec![]), Err(Error::EmptyProgram));
        assert_eq!(
            Program::new(vec![0, 3, 5]),
            Err(Error::OddProgramLength { length: 3 })
        );
        assert_eq!(
            Program::new(vec![0, 3, 5, 8]),
            Err(Error::ValueOutOfRange { index: 3, value: 8 })
        );
    }

    #[test]
    fn fetch_stops_before_an_incomplete_pair() {
        let program = Program::new(vec![0, 3, 5, 4]).unwrap();
        assert_eq!(program.fetch(0), Some((0, 3)));
        assert_eq!(program.fetch(2), Some((5, 4)));
        assert_eq!(program.fetch(3), None);
        assert_eq!(program.fetch(4), None);
        assert_eq!(program.fetch(usize::MAX), None);
    }

    #[test]
    fn parses_and_displays_listings() {
        let program: Program = "0, 3,5,4 ,3,0".parse().unwrap();
        assert_eq!(program.as_slice(), &[0, 3, 5, 4, 3, 0]);
        assert_eq!(program.to_string(), "0,3,5,4,3,0");
        assert_eq!(program.pairs().count(), 3);

        assert_eq!(
            "0,x".parse::<Program>(),
            Err(Error::InvalidDigit("x".to_owned()))
        );
        assert_eq!(
            "0,9".parse::<Program>(),
            Err(Error::ValueOutOfRange { index: 1, value: 9 })
        );
    }
}
