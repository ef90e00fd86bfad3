//! The search for self-replicating seeds.
//!
//! A self-replicating seed is an initial value for **A** (with **B** and **C** at zero) that
//! makes a program output its own values, in order, and nothing else.
//!
//! # Algorithm
//!
//! For programs with the shape described in [`shape`](crate::shape), every loop drops the lowest
//! octal digit of **A** and emits one digit computed from what remains. The *last* digit
//! emitted therefore only depends on the *most significant* octal digit of the seed, the one
//! before it on the two most significant digits, and so on.
//!
//! The search exploits this by fixing the seed one octal digit at a time, most significant
//! first. A candidate with `k` fixed digits is kept only if its run ends with the last `k`
//! values of the program. Candidates are explored depth first, in ascending digit order, using
//! an explicit stack of frames. Since every complete candidate has exactly as many digits as
//! the program has values, that order is also ascending numeric order: the first seed found is
//! the smallest one.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::cpu::Registers;
use crate::error::Error;
use crate::program::{Program, MAX_VALUE};
use crate::run::Status;
use crate::shape::ShapeFlags;
use crate::Computer;

/// The number of trial runs a default search may perform.
pub const DEFAULT_MAX_TRIALS: u64 = 1 << 20;

/// Extra steps granted to every trial on top of what the loop structure requires.
const TRIAL_STEP_SLACK: u64 = 64;

/// The limits applied to a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// The step ceiling applied to every trial run. Trials reaching it are rejected.
    ///
    /// When `None`, the ceiling is derived from the length of the program, see
    /// [`SearchConfig::trial_steps`].
    pub max_steps_per_trial: Option<u64>,
    /// The maximum number of trial runs before the search gives up, if any.
    pub max_trials: Option<u64>,
}

impl SearchConfig {
    /// Returns the step ceiling of a single trial run of `program`.
    ///
    /// A supported program executes all of its instructions once per emitted digit, and a
    /// trial is cut short once it emitted one digit more than the program has values. The
    /// derived ceiling covers that many loops, so well-formed trials never reach it.
    pub fn trial_steps(&self, program: &Program) -> u64 {
        self.max_steps_per_trial.unwrap_or_else(|| {
            let len = program.len() as u64;
            (len + 1)
                .saturating_mul(len / 2)
                .saturating_add(TRIAL_STEP_SLACK)
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_steps_per_trial: None,
            max_trials: Some(DEFAULT_MAX_TRIALS),
        }
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The smallest self-replicating seed.
    Found(BigUint),
    /// The whole search space was explored without finding a seed, or the program does not
    /// have a shape the search supports.
    NotFound,
    /// The search ran out of trials before reaching a conclusion.
    BudgetExhausted,
}

/// A pending position of the depth first search.
#[derive(Debug, Clone)]
struct Frame {
    /// The number of octal digits fixed in `partial`.
    depth: usize,
    /// The most significant digits of the seed fixed so far.
    partial: BigInt,
    /// The next digit to append to `partial`.
    next_digit: u8,
}

/// An iterator over every self-replicating seed of a program, in ascending order.
///
/// # Errors
///
/// Trials that diverge or emit more values than the program has are silently rejected. Hard
/// faults such as [`Error::ReservedOperand`] are yielded once, after which the iterator stops.
#[derive(Debug, Clone)]
pub struct Seeds<'p> {
    program: &'p Program,
    config: SearchConfig,
    trial_steps: u64,
    stack: Vec<Frame>,
    trials: u64,
    exhausted: bool,
}

impl<'p> Seeds<'p> {
    /// Prepares a search over `program`.
    ///
    /// Programs whose shape is not supported yield nothing.
    pub fn new(program: &'p Program, config: SearchConfig) -> Self {
        let flags = ShapeFlags::analyze(program);
        let stack = if flags.is_searchable() {
            vec![Frame {
                depth: 0,
                partial: BigInt::zero(),
                next_digit: 0,
            }]
        } else {
            log::warn!(
                "program {program} has an unsupported shape ({flags:?}), no seed can be searched for"
            );
            Vec::new()
        };

        let trial_steps = config.trial_steps(program);
        log::debug!("searching seeds of {program} with at most {trial_steps} steps per trial");

        Self {
            program,
            config,
            trial_steps,
            stack,
            trials: 0,
            exhausted: false,
        }
    }

    /// Returns the number of trial runs performed so far.
    #[inline(always)]
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Returns whether the search stopped because it ran out of trials.
    #[inline(always)]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Runs the program with `candidate` in **A**.
    ///
    /// `Ok(None)` is returned when the run is rejected without looking at its output.
    fn trial(&self, candidate: &BigInt) -> Result<Option<Vec<u8>>, Error> {
        let limit = self.program.len();
        let mut outputs = Computer::new(self.program, Registers::with_a(candidate.clone()))
            .outputs(Some(self.trial_steps));

        let output = outputs
            .by_ref()
            .take(limit + 1)
            .collect::<Result<Vec<_>, _>>()?;

        if output.len() > limit || outputs.status() != Some(Status::Halted) {
            return Ok(None);
        }

        Ok(Some(output))
    }
}

impl Iterator for Seeds<'_> {
    type Item = Result<BigUint, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let program = self.program;
        let target = program.as_slice();

        while let Some(frame) = self.stack.last_mut() {
            if frame.next_digit > MAX_VALUE {
                self.stack.pop();
                continue;
            }

            let digit = frame.next_digit;
            frame.next_digit += 1;
            let depth = frame.depth + 1;
            let candidate = (&frame.partial << 3u8) + BigInt::from(digit);

            if self.config.max_trials.is_some_and(|max| self.trials >= max) {
                log::warn!("seed search gave up after {} trials", self.trials);
                self.exhausted = true;
                self.stack.clear();
                return None;
            }
            self.trials += 1;

            let output = match self.trial(&candidate) {
                Ok(Some(output)) => output,
                Ok(None) => continue,
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            };

            if depth == target.len() {
                if output == target {
                    log::debug!("found seed {candidate} after {} trials", self.trials);
                    return Some(Ok(candidate.into_parts().1));
                }
                continue;
            }

            if output.len() >= depth && output[output.len() - depth..] == target[target.len() - depth..]
            {
                log::debug!("depth {depth}: {candidate:o} reproduces the last {depth} values");
                self.stack.push(Frame {
                    depth,
                    partial: candidate,
                    next_digit: 0,
                });
            }
        }

        None
    }
}

impl std::iter::FusedIterator for Seeds<'_> {}

/// Searches for the smallest self-replicating seed of `program`.
pub fn search(program: &Program, config: &SearchConfig) -> Result<SearchOutcome, Error> {
    let mut seeds = Seeds::new(program, config.clone());

    match seeds.next() {
        Some(Ok(seed)) => Ok(SearchOutcome::Found(seed)),
        Some(Err(err)) => Err(err),
        None if seeds.is_exhausted() => Ok(SearchOutcome::BudgetExhausted),
        None => Ok(SearchOutcome::NotFound),
    }
}

/// Returns the smallest value of **A** making `program` output itself, using the default
/// [`SearchConfig`].
///
/// `Ok(None)` means that no seed was found within the search space. This is always the case for
/// programs that do not have the shape the search relies on (see
/// [`ShapeFlags`](crate::shape::ShapeFlags)), even if such a seed happens to exist. In
/// particular, a program whose loop reads **B** or **C** before writing it carries state from
/// one digit to the next, which the digit by digit search cannot account for.
pub fn find_min_self_replicating_seed(program: &Program) -> Result<Option<BigUint>, Error> {
    match search(program, &SearchConfig::default())? {
        SearchOutcome::Found(seed) => Ok(Some(seed)),
        SearchOutcome::NotFound | SearchOutcome::BudgetExhausted => Ok(None),
    }
}
