use slots_core::{MachineConfig, ProvablyFairRng, SpinEngine};

fn main() -> Result<(), slots_core::SlotError> {
    // Example end-to-end spin
    let mut rng = ProvablyFairRng::new("example-server-seed", "example-client-seed", 1);
    let engine = SpinEngine::new(MachineConfig::default_3x3())?;
    let outcome = engine.spin(&mut rng, 3, 10)?;
    print!("{}", outcome.grid);
    println!(
        "server_seed_hash={} winnings={} lines={:?}",
        rng.server_seed_hash_hex(),
        outcome.result.winnings,
        outcome.result.winning_lines
    );
    Ok(())
}
