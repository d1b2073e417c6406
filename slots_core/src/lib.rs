pub mod account;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod game;
pub mod paytable;
pub mod rng;
pub mod symbols;

pub use crate::account::PlayerAccount;
pub use crate::config::{MachineConfig, SessionConfig, MAX_BET, MAX_LINES, MIN_BET};
pub use crate::console::{Console, InputSource, LineReader, ScriptedInput};
pub use crate::engine::{replay_spin, verify_grid, Grid, RoundResult, SpinEngine, SpinOutcome};
pub use crate::error::{SlotError, SlotResult};
pub use crate::game::{EndReason, GameLoop, SessionSummary};
pub use crate::paytable::{Paytable, PaytableEntry};
pub use crate::rng::{derive_hash_hex, ProvablyFairRng, RandomSource, ScriptedRng};
pub use crate::symbols::{Symbol, SymbolSupply};
