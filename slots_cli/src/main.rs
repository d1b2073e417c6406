use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use slots_core::{
    Console, GameLoop, LineReader, MachineConfig, PlayerAccount, ProvablyFairRng, SessionConfig,
    SlotError, SpinEngine,
};
use std::io;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", about = "Play a 3x3 slot machine in the terminal")]
struct Cli {
    /// Fixed server seed, for replaying a session. Random when omitted.
    #[arg(long, env = "SLOTS_SERVER_SEED")]
    server_seed: Option<String>,
    /// Client seed mixed into every spin
    #[arg(long, env = "SLOTS_CLIENT_SEED", default_value = "player")]
    client_seed: String,
    #[arg(long, default_value_t = 0)]
    nonce: u64,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Print the machine and session configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Serialize)]
struct ConfigDump<'a> {
    machine: &'a MachineConfig,
    session: &'a SessionConfig,
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let machine = MachineConfig::default_3x3();
    let session = SessionConfig::default();

    if cli.print_config {
        let dump = ConfigDump {
            machine: &machine,
            session: &session,
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    let engine = SpinEngine::new(machine).context("building spin engine")?;
    let rng = match cli.server_seed {
        Some(seed) => ProvablyFairRng::new(seed, cli.client_seed, cli.nonce),
        None => ProvablyFairRng::from_entropy(cli.client_seed, cli.nonce),
    };
    let reveal = rng.clone();
    println!("Server seed hash: {}", rng.server_seed_hash_hex());

    let console = Console::new(LineReader::new(io::stdin().lock()), io::stdout().lock());
    let mut game = GameLoop::new(session, engine, rng, console, PlayerAccount::default())
        .context("starting session")?;

    match game.play() {
        Ok(summary) => info!(?summary, "done"),
        Err(SlotError::InputClosed) => {
            warn!("input closed mid-session");
            println!(
                "\nInput closed. You left with ${}",
                game.account().current_balance()
            );
        }
        Err(err) => return Err(err).context("game session failed"),
    }
    drop(game);

    println!(
        "Server seed: {} (client seed {}, nonce {})",
        reveal.server_seed(),
        reveal.client_seed(),
        reveal.nonce()
    );
    Ok(())
}
