use chronospatial_vm::cpu::Registers;
use chronospatial_vm::error::Error;
use chronospatial_vm::program::Program;
use chronospatial_vm::run::Status;
use chronospatial_vm::search::{search, SearchConfig, SearchOutcome, Seeds};
use chronospatial_vm::trace::LogTrace;
use chronospatial_vm::{execute, find_min_self_replicating_seed, Computer};
use num_bigint::{BigInt, BigUint};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn program(listing: &str) -> Program {
    listing.parse().expect("invalid test program")
}

#[test]
fn emits_octal_digits_until_a_runs_out() {
    init();
    let program = program("0,3,5,4,3,0");
    let run = execute(&program, 729, 0, 0, None).unwrap();

    // 729 is 0o1331: the lowest digit is dropped before the first output.
    assert_eq!(run.output, vec![3, 3, 1, 0]);
    assert_eq!(run.status, Status::Halted);
    assert_eq!(run.registers, Registers::new(0, 0, 0));
}

#[test]
fn execution_is_deterministic() {
    init();
    let program = program("2,4,1,1,7,5,4,4,1,4,0,3,5,5,3,0");

    for a in [0u64, 1, 7, 64, 729, 2024, 117_440, 1 << 40] {
        let first = execute(&program, a, 0, 0, Some(10_000)).unwrap();
        let second = execute(&program, a, 0, 0, Some(10_000)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn single_pair_programs() {
    init();
    let run = execute(&program("5,4"), 13, 0, 0, None).unwrap();
    assert_eq!(run.output, vec![5]);
    assert_eq!(run.steps, 1);

    let run = execute(&program("1,3"), 13, 0, 0, None).unwrap();
    assert!(run.output.is_empty());
    assert_eq!(run.steps, 1);
}

#[test]
fn unconditional_self_jump_reports_divergence() {
    init();
    let program = program("0,0,3,2");
    let run = execute(&program, 1, 0, 0, Some(1_000)).unwrap();

    assert_eq!(run.status, Status::Diverged);
    assert_eq!(run.steps, 1_000);
}

#[test]
fn malformed_programs_are_rejected_before_running() {
    assert_eq!("".parse::<Program>(), Err(Error::InvalidDigit(String::new())));
    assert_eq!(Program::new(vec![]), Err(Error::EmptyProgram));
    assert_eq!(
        "0,3,5".parse::<Program>(),
        Err(Error::OddProgramLength { length: 3 })
    );
    assert_eq!(
        Program::new(vec![0, 3, 5, 9]),
        Err(Error::ValueOutOfRange { index: 3, value: 9 })
    );
}

#[test]
fn traced_runs_match_untraced_ones() {
    init();
    let program = program("0,1,5,4,3,0");
    let traced = Computer::new(&program, Registers::with_a(2024))
        .outputs_traced(None, LogTrace)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let plain = execute(&program, 2024, 0, 0, None).unwrap();

    assert_eq!(traced, plain.output);
}

#[test]
fn found_seed_is_the_minimum() {
    init();
    let program = program("0,3,5,4,3,0");
    let seed = find_min_self_replicating_seed(&program).unwrap().unwrap();
    assert_eq!(seed, BigUint::from(117_440u32));

    // Nothing smaller replicates the program.
    for a in 0..117_440u32 {
        let run = execute(&program, a, 0, 0, Some(1_000)).unwrap();
        assert_ne!(run.output, program.as_slice(), "{a} replicates the program");
    }
}

#[test]
fn found_seed_round_trips() {
    init();
    for (listing, expected) in [
        ("0,3,5,4,3,0", 117_440u64),
        ("2,4,1,1,7,5,4,4,1,4,0,3,5,5,3,0", 202_991_746_427_434),
        ("2,4,1,3,7,5,0,3,1,5,4,4,5,5,3,0", 236_539_226_447_469),
        ("2,4,1,2,7,5,4,5,1,3,5,5,0,3,3,0", 37_221_270_076_916),
    ] {
        let program = program(listing);
        let seed = find_min_self_replicating_seed(&program)
            .unwrap()
            .unwrap_or_else(|| panic!("no seed found for {listing}"));
        assert_eq!(seed, BigUint::from(expected), "seed for {listing}");

        let run = execute(&program, BigInt::from(seed.clone()), 0, 0, Some(10_000)).unwrap();
        assert!(run.halted());
        assert_eq!(run.output, program.as_slice(), "seed {seed} for {listing}");
    }
}

#[test]
fn found_seed_is_the_smallest_of_all_seeds() {
    init();
    let program = program("2,4,1,1,7,5,4,4,1,4,0,3,5,5,3,0");
    let seed = find_min_self_replicating_seed(&program).unwrap().unwrap();

    let all = Seeds::new(&program, SearchConfig::default())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(all.len(), 9);
    assert_eq!(all.iter().min(), Some(&seed));

    for other in &all {
        let run = execute(&program, BigInt::from(other.clone()), 0, 0, Some(10_000)).unwrap();
        assert_eq!(run.output, program.as_slice(), "seed {other}");
    }
}

#[test]
fn search_outcomes_are_explicit() {
    init();
    assert_eq!(
        search(&program("0,3,5,4,3,0"), &SearchConfig::default()),
        Ok(SearchOutcome::Found(BigUint::from(117_440u32)))
    );
    assert_eq!(
        search(&program("0,3,2,1,5,5,3,0"), &SearchConfig::default()),
        Ok(SearchOutcome::NotFound)
    );
    assert_eq!(
        search(&program("3,0"), &SearchConfig::default()),
        Ok(SearchOutcome::NotFound)
    );
}
