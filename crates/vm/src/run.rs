//! Lazy and eager ways of driving a [`Computer`] to completion.

use crate::cpu::Registers;
use crate::error::Error;
use crate::trace::Trace;
use crate::Computer;

/// How an execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The program counter moved past the last instruction.
    Halted,
    /// The step ceiling was reached before the machine halted.
    ///
    /// This is not an error: a program is free to loop forever, callers simply stopped
    /// waiting for it.
    Diverged,
}

/// The state of an [`Outputs`] generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Finished(Status),
    Faulted,
}

/// A lazy generator over the digits emitted by a [`Computer`].
///
/// Instructions are only executed when the next digit is requested, which lets callers stop
/// a run as soon as they have seen enough of its output without materializing the rest.
///
/// Once the iterator returns `None`, [`Outputs::status`] reports whether the machine halted or
/// ran out of steps. If an [`Error`] is yielded, the iterator is fused and no status is ever
/// reported.
#[derive(Debug, Clone)]
pub struct Outputs<'p, T> {
    computer: Computer<'p>,
    trace: T,
    max_steps: Option<u64>,
    state: State,
}

impl<'p, T: Trace> Outputs<'p, T> {
    pub(crate) fn new(computer: Computer<'p>, max_steps: Option<u64>, trace: T) -> Self {
        Self {
            computer,
            trace,
            max_steps,
            state: State::Running,
        }
    }

    /// Returns how the execution ended, or `None` while it is still running (or if it faulted).
    #[inline]
    pub fn status(&self) -> Option<Status> {
        match self.state {
            State::Finished(status) => Some(status),
            State::Running | State::Faulted => None,
        }
    }

    /// Returns the number of instructions executed so far.
    #[inline(always)]
    pub fn steps(&self) -> u64 {
        self.computer.steps()
    }

    /// Returns the underlying [`Computer`], in whatever state it was left.
    #[inline]
    pub fn into_computer(self) -> Computer<'p> {
        self.computer
    }

    /// Returns the [`Trace`] implementation that was used.
    #[inline]
    pub fn into_trace(self) -> T {
        self.trace
    }
}

impl<T: Trace> Iterator for Outputs<'_, T> {
    type Item = Result<u8, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state != State::Running {
                return None;
            }

            // A program halting exactly on its last allowed step did halt.
            if self.computer.is_halted() {
                self.state = State::Finished(Status::Halted);
                return None;
            }

            if self
                .max_steps
                .is_some_and(|max| self.computer.steps() >= max)
            {
                self.state = State::Finished(Status::Diverged);
                return None;
            }

            match self.computer.step(&mut self.trace) {
                Ok(Some(digit)) => return Some(Ok(digit)),
                Ok(None) => (),
                Err(err) => {
                    self.state = State::Faulted;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<T: Trace> std::iter::FusedIterator for Outputs<'_, T> {}

/// The fully materialized result of an execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Every digit emitted, in order.
    pub output: Vec<u8>,
    /// How the execution ended.
    pub status: Status,
    /// The number of instructions executed.
    pub steps: u64,
    /// The registers as they were when the execution ended.
    pub registers: Registers,
}

impl Run {
    /// Drains `outputs` and summarizes the execution.
    pub fn collect<T: Trace>(mut outputs: Outputs<'_, T>) -> Result<Self, Error> {
        let output = outputs.by_ref().collect::<Result<Vec<_>, _>>()?;

        // The iterator can only stop without an error once it has a status.
        let status = outputs.status().unwrap_or(Status::Diverged);
        let steps = outputs.steps();
        let registers = outputs.into_computer().cpu().registers.clone();

        log::trace!(
            "run ended ({status:?}) after {steps} steps with {} digits",
            output.len()
        );

        Ok(Self {
            output,
            status,
            steps,
            registers,
        })
    }

    /// Returns whether the machine halted on its own.
    #[inline]
    pub fn halted(&self) -> bool {
        self.status == Status::Halted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Program;
    use crate::trace::PcTrace;

    #[test]
    fn self_jump_diverges_within_budget() {
        let program = Program::new(vec![3, 0]).unwrap();
        let run = Computer::new(&program, Registers::with_a(1))
            .run(Some(1_000))
            .unwrap();

        assert_eq!(run.status, Status::Diverged);
        assert_eq!(run.steps, 1_000);
        assert!(run.output.is_empty());
        assert!(!run.halted());
    }

    #[test]
    fn halting_on_the_last_allowed_step_is_not_divergence() {
        let program = Program::new(vec![5, 4, 5, 4]).unwrap();
        let run = Computer::new(&program, Registers::with_a(3))
            .run(Some(2))
            .unwrap();

        assert_eq!(run.status, Status::Halted);
        assert_eq!(run.output, vec![3, 3]);
    }

    #[test]
    fn infinite_output_can_be_consumed_lazily() {
        // Outputs A forever.
        let program = Program::new(vec![5, 4, 3, 0]).unwrap();
        let outputs = Computer::new(&program, Registers::with_a(13)).outputs(None);

        let digits = outputs.take(5).collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(digits, vec![5; 5]);
    }

    #[test]
    fn status_is_only_known_once_drained() {
        let program = Program::new(vec![5, 4, 5, 4]).unwrap();
        let mut outputs = Computer::new(&program, Registers::with_a(1)).outputs(None);

        assert_eq!(outputs.next(), Some(Ok(1)));
        assert_eq!(outputs.status(), None);
        assert_eq!(outputs.next(), Some(Ok(1)));
        assert_eq!(outputs.next(), None);
        assert_eq!(outputs.status(), Some(Status::Halted));
        assert_eq!(outputs.next(), None);
    }

    #[test]
    fn faults_fuse_the_generator() {
        let program = Program::new(vec![5, 4, 5, 7, 5, 4]).unwrap();
        let mut outputs = Computer::new(&program, Registers::with_a(2)).outputs(None);

        assert_eq!(outputs.next(), Some(Ok(2)));
        assert_eq!(outputs.next(), Some(Err(Error::ReservedOperand)));
        assert_eq!(outputs.next(), None);
        assert_eq!(outputs.status(), None);
    }

    #[test]
    fn traced_outputs_hand_back_their_trace() {
        let program = Program::new(vec![0, 1, 3, 0]).unwrap();
        let mut outputs =
            Computer::new(&program, Registers::with_a(4)).outputs_traced(None, PcTrace::default());

        assert_eq!(outputs.next(), None);
        assert_eq!(outputs.into_trace().visited, vec![0, 2, 0, 2, 0, 2]);
    }
}
