use chronospatial_exec::listing::{format_output, Listing};
use chronospatial_vm::search::{search, SearchConfig, SearchOutcome};
use chronospatial_vm::Computer;
use num_bigint::BigUint;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn runs_a_parsed_listing() {
    init();
    let listing = Listing::parse(
        "Register A: 729\n\
         Register B: 0\n\
         Register C: 0\n\
         \n\
         Program: 0,1,5,4,3,0\n",
    )
    .unwrap();

    let run = Computer::new(&listing.program, listing.registers)
        .run(None)
        .unwrap();
    assert_eq!(format_output(&run.output), "4,6,3,5,6,3,5,2,1,0");
}

#[test]
fn searches_a_parsed_listing() {
    init();
    let listing = Listing::parse(
        "Register A: 2024\n\
         Register B: 0\n\
         Register C: 0\n\
         \n\
         Program: 0,3,5,4,3,0\n",
    )
    .unwrap();

    let run = Computer::new(&listing.program, listing.registers.clone())
        .run(None)
        .unwrap();
    assert_eq!(format_output(&run.output), "5,7,3,0");

    assert_eq!(
        search(&listing.program, &SearchConfig::default()),
        Ok(SearchOutcome::Found(BigUint::from(117_440u32)))
    );
}
