//! Fixed machine and session settings.
//!
//! Nothing here is loaded at runtime: the reference values are compiled in and
//! handed to the engine and game loop at construction.

use crate::error::{SlotError, SlotResult};
use crate::paytable::Paytable;
use crate::symbols::SymbolSupply;
use serde::{Deserialize, Serialize};

pub const MAX_LINES: usize = 3;
pub const MIN_BET: i64 = 1;
pub const MAX_BET: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub rows: usize,
    pub cols: usize,
    pub supply: SymbolSupply,
    pub paytable: Paytable,
}

impl MachineConfig {
    pub fn default_3x3() -> Self {
        Self {
            rows: 3,
            cols: 3,
            supply: SymbolSupply::simple_default(),
            paytable: Paytable::simple_default(),
        }
    }

    pub fn validate(&self) -> SlotResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SlotError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if let Some((symbol, _)) = self.supply.0.iter().find(|(_, count)| *count == 0) {
            return Err(SlotError::InvalidConfig(format!(
                "supply count for {symbol} must be positive"
            )));
        }
        let available = self.supply.total();
        if available < self.rows {
            return Err(SlotError::InsufficientSymbols {
                available,
                rows: self.rows,
            });
        }
        for symbol in self.supply.symbols() {
            match self.paytable.multiplier(symbol) {
                Some(m) if m > 0 => {}
                Some(m) => {
                    return Err(SlotError::InvalidConfig(format!(
                        "multiplier for {symbol} must be positive, got {m}"
                    )))
                }
                None => return Err(SlotError::MissingPayout(symbol)),
            }
        }
        Ok(())
    }
}

/// Betting limits for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub max_lines: usize,
    pub min_bet: i64,
    pub max_bet: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_lines: MAX_LINES,
            min_bet: MIN_BET,
            max_bet: MAX_BET,
        }
    }
}

impl SessionConfig {
    /// Checks the limits against a machine with `rows` rows.
    pub fn validate(&self, rows: usize) -> SlotResult<()> {
        if self.max_lines == 0 || self.max_lines > rows {
            return Err(SlotError::InvalidConfig(format!(
                "max_lines must be within 1..={rows}, got {}",
                self.max_lines
            )));
        }
        if self.min_bet < 1 || self.min_bet > self.max_bet {
            return Err(SlotError::InvalidConfig(format!(
                "bet range ${} - ${} is empty or below $1",
                self.min_bet, self.max_bet
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paytable::PaytableEntry;
    use crate::symbols::Symbol;

    #[test]
    fn reference_config_is_valid() {
        let machine = MachineConfig::default_3x3();
        machine.validate().unwrap();
        SessionConfig::default().validate(machine.rows).unwrap();
    }

    #[test]
    fn small_supply_is_rejected() {
        let machine = MachineConfig {
            rows: 5,
            supply: SymbolSupply(vec![(Symbol::A, 2), (Symbol::B, 2)]),
            ..MachineConfig::default_3x3()
        };
        assert!(matches!(
            machine.validate(),
            Err(SlotError::InsufficientSymbols {
                available: 4,
                rows: 5
            })
        ));
    }

    #[test]
    fn missing_payout_is_rejected() {
        let machine = MachineConfig {
            paytable: Paytable(vec![PaytableEntry {
                symbol: Symbol::A,
                payout_multiplier: 5,
            }]),
            ..MachineConfig::default_3x3()
        };
        assert!(matches!(
            machine.validate(),
            Err(SlotError::MissingPayout(Symbol::B))
        ));
    }

    #[test]
    fn session_limits() {
        let bad_lines = SessionConfig {
            max_lines: 4,
            ..SessionConfig::default()
        };
        assert!(bad_lines.validate(3).is_err());
        let bad_range = SessionConfig {
            min_bet: 10,
            max_bet: 5,
            ..SessionConfig::default()
        };
        assert!(bad_range.validate(3).is_err());
    }
}
