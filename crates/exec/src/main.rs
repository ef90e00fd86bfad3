use std::path::PathBuf;
use std::process::ExitCode;

use chronospatial_exec::listing::{format_output, Listing};
use chronospatial_vm::run::Status;
use chronospatial_vm::search::{search, SearchConfig, SearchOutcome, DEFAULT_MAX_TRIALS};
use chronospatial_vm::trace::LogTrace;
use chronospatial_vm::Computer;
use clap::Parser;

/// The step ceiling applied to the displayed run when none is given.
const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// Runs a three-bit register machine listing and searches for its self-replicating seed.
#[derive(Debug, Parser)]
#[command(name = "chronospatial", version)]
struct Args {
    /// Path of the listing holding the registers and the program.
    input_path: PathBuf,
    /// Step ceiling of the displayed run.
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: u64,
    /// Step ceiling of every search trial, derived from the program length when omitted.
    #[arg(long)]
    max_steps_per_trial: Option<u64>,
    /// Number of trial runs after which the search gives up.
    #[arg(long, default_value_t = DEFAULT_MAX_TRIALS)]
    max_trials: u64,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_steps_per_trial: self.max_steps_per_trial,
            max_trials: Some(self.max_trials),
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.input_path)?;
    let listing = Listing::parse(&text)?;

    log::info!(
        "loaded {} values from {}",
        listing.program.len(),
        args.input_path.display()
    );

    let mut outputs = Computer::new(&listing.program, listing.registers.clone())
        .outputs_traced(Some(args.max_steps), LogTrace);
    let digits = outputs.by_ref().collect::<Result<Vec<_>, _>>()?;

    match outputs.status() {
        Some(Status::Diverged) => log::warn!(
            "the program did not halt within {} steps, its output is truncated",
            outputs.steps()
        ),
        _ => log::info!("the program halted after {} steps", outputs.steps()),
    }
    println!("Program output: {}", format_output(&digits));

    match search(&listing.program, &args.search_config())? {
        SearchOutcome::Found(seed) => println!("Self-replicating seed: {seed}"),
        SearchOutcome::NotFound => println!("Self-replicating seed: none"),
        SearchOutcome::BudgetExhausted => {
            println!("Self-replicating seed: none (search budget exhausted)")
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
