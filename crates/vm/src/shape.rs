//! Structural analysis of a [`Program`], used to decide whether the self-replicating seed
//! search can be trusted on it.
//!
//! The search fixes the seed three bits at a time, starting from its most significant digit.
//! That only works for programs that consume exactly one octal digit of **A** per loop and emit
//! exactly one digit per loop, looping back to the start until **A** runs out. Every loop
//! must also compute **B** and **C** afresh, so that a digit only depends on what is left of
//! **A** and not on values carried over from the previous loop.

use bitflags::bitflags;

use crate::cpu::Register;
use crate::instr::{Instruction, Operand};
use crate::program::Program;

bitflags! {
    /// The structural properties of a program the seed search relies on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShapeFlags: u8 {
        /// **A** is only ever written by a single `adv 3`, dropping one octal digit per loop.
        const SHIFTS_BY_EIGHT = 1 << 0;
        /// The program contains exactly one `out` instruction.
        const SINGLE_OUTPUT = 1 << 1;
        /// The last instruction is `jnz 0`.
        const LOOPS_TO_START = 1 << 2;
        /// No jump other than the final one exists.
        const NO_INNER_JUMPS = 1 << 3;
        /// **B** and **C** are always written before being read within the loop body.
        const NO_CARRIED_STATE = 1 << 4;

        /// Every property the search needs.
        const SEARCHABLE = Self::SHIFTS_BY_EIGHT.bits()
            | Self::SINGLE_OUTPUT.bits()
            | Self::LOOPS_TO_START.bits()
            | Self::NO_INNER_JUMPS.bits()
            | Self::NO_CARRIED_STATE.bits();
    }
}

const ADV: u8 = 0;
const JNZ: u8 = 3;
const OUT: u8 = 5;

impl ShapeFlags {
    /// Computes the properties that `program` exhibits.
    pub fn analyze(program: &Program) -> Self {
        let mut flags = Self::empty();

        let pairs: Vec<(u8, u8)> = program.pairs().collect();
        let count = |opcode: u8| pairs.iter().filter(|(op, _)| *op == opcode).count();

        let shifts_by_eight = pairs.iter().filter(|&&pair| pair == (ADV, 3)).count();
        if shifts_by_eight == 1 && count(ADV) == 1 {
            flags.insert(Self::SHIFTS_BY_EIGHT);
        }

        if count(OUT) == 1 {
            flags.insert(Self::SINGLE_OUTPUT);
        }

        if pairs.last() == Some(&(JNZ, 0)) {
            flags.insert(Self::LOOPS_TO_START);
            if count(JNZ) == 1 {
                flags.insert(Self::NO_INNER_JUMPS);
            }
        } else if count(JNZ) == 0 {
            flags.insert(Self::NO_INNER_JUMPS);
        }

        if !carries_state(&pairs) {
            flags.insert(Self::NO_CARRIED_STATE);
        }

        flags
    }

    /// Returns whether every property required by the seed search is present.
    #[inline(always)]
    pub const fn is_searchable(self) -> bool {
        self.contains(Self::SEARCHABLE)
    }
}

/// Returns whether a register among **B** and **C** is read before being written, walking
/// the pairs in order.
///
/// Pairs that fail to decode are skipped: they fault when reached, which the search reports
/// on its own.
fn carries_state(pairs: &[(u8, u8)]) -> bool {
    let mut written_b = false;
    let mut written_c = false;

    let reads = |operand: Operand| match operand {
        Operand::Register(Register::B) => Some(Register::B),
        Operand::Register(Register::C) => Some(Register::C),
        Operand::Register(Register::A) | Operand::Literal(_) => None,
    };

    for &(opcode, operand) in pairs {
        let Ok(instr) = Instruction::decode(opcode, operand) else {
            continue;
        };

        let (read, also_read, written) = match instr {
            Instruction::Adv(operand) | Instruction::Out(operand) => (reads(operand), None, None),
            Instruction::Bst(operand) | Instruction::Bdv(operand) => {
                (reads(operand), None, Some(Register::B))
            }
            Instruction::Cdv(operand) => (reads(operand), None, Some(Register::C)),
            Instruction::Bxl(_) => (Some(Register::B), None, Some(Register::B)),
            Instruction::Bxc => (Some(Register::B), Some(Register::C), Some(Register::B)),
            Instruction::Jnz(_) => (None, None, None),
        };

        for register in [read, also_read].into_iter().flatten() {
            let written = match register {
                Register::B => written_b,
                _ => written_c,
            };
            if !written {
                return true;
            }
        }

        match written {
            Some(Register::B) => written_b = true,
            Some(Register::C) => written_c = true,
            _ => (),
        }
    }

    false
}
