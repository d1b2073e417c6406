use crate::{
    config::MachineConfig,
    error::{SlotError, SlotResult},
    rng::{ProvablyFairRng, RandomSource},
    symbols::Symbol,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Symbols produced by one spin, stored column by column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    columns: Vec<Vec<Symbol>>,
}

impl Grid {
    /// Builds a grid from columns that all have the same height.
    pub fn from_columns(columns: Vec<Vec<Symbol>>) -> SlotResult<Self> {
        let rows = columns.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || columns.iter().any(|c| c.len() != rows) {
            return Err(SlotError::InvalidConfig(
                "grid columns must be non-empty and of equal height".into(),
            ));
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Vec<Symbol>] {
        &self.columns
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, r: usize) -> impl Iterator<Item = Symbol> + '_ {
        self.columns.iter().map(move |c| c[r])
    }

    /// The shared symbol of row `r`, if every column shows the same one.
    pub fn uniform_row(&self, r: usize) -> Option<Symbol> {
        let mut row = self.row(r);
        let first = row.next()?;
        row.all(|s| s == first).then_some(first)
    }

    pub fn to_indices(&self) -> Vec<Vec<u8>> {
        self.columns
            .iter()
            .map(|c| c.iter().map(|s| s.to_index()).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            for (i, symbol) in self.row(r).enumerate() {
                if i > 0 {
                    f.write_str(" | ")?;
                }
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub winnings: i64,
    /// 1-based, ascending.
    pub winning_lines: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    pub grid: Grid,
    pub result: RoundResult,
}

#[derive(Debug, Clone)]
pub struct SpinEngine {
    config: MachineConfig,
    pool: Vec<Symbol>,
}

impl SpinEngine {
    pub fn new(config: MachineConfig) -> SlotResult<Self> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejected machine configuration");
            return Err(err);
        }
        let pool = config.supply.pool();
        Ok(Self { config, pool })
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    /// Draws every column independently, `rows` symbols without replacement
    /// from a fresh copy of the supply pool.
    pub fn generate_spin<R: RandomSource>(&self, rng: &mut R) -> SlotResult<Grid> {
        let rows = self.config.rows;
        if self.pool.len() < rows {
            return Err(SlotError::InsufficientSymbols {
                available: self.pool.len(),
                rows,
            });
        }
        let columns = (0..self.config.cols)
            .map(|_| {
                // partial Fisher-Yates: the first `rows` slots end up as the sample
                let mut pool = self.pool.clone();
                for i in 0..rows {
                    let j = i + rng.next_below(pool.len() - i);
                    pool.swap(i, j);
                }
                pool.truncate(rows);
                pool
            })
            .collect();
        let grid = Grid { columns };
        debug!(grid = ?grid.to_indices(), "drew grid");
        Ok(grid)
    }

    /// Pays every line among the first `lines` rows whose symbols all match.
    pub fn evaluate(&self, grid: &Grid, lines: usize, bet_per_line: i64) -> RoundResult {
        let mut result = RoundResult::default();
        for line in 0..lines.min(grid.rows()) {
            let Some(symbol) = grid.uniform_row(line) else {
                continue;
            };
            // a symbol without a multiplier can only come from a hand-built grid
            let Some(multiplier) = self.config.paytable.multiplier(symbol) else {
                continue;
            };
            debug!(line = line + 1, %symbol, "winning line");
            result.winnings += multiplier * bet_per_line;
            result.winning_lines.push(line + 1);
        }
        result
    }

    pub fn spin<R: RandomSource>(
        &self,
        rng: &mut R,
        lines: usize,
        bet_per_line: i64,
    ) -> SlotResult<SpinOutcome> {
        let grid = self.generate_spin(rng)?;
        let result = self.evaluate(&grid, lines, bet_per_line);
        Ok(SpinOutcome { grid, result })
    }
}

/// Re-derives the first grid of a session from its revealed seeds.
pub fn replay_spin(
    engine: &SpinEngine,
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
) -> SlotResult<Grid> {
    let mut rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    engine.generate_spin(&mut rng)
}

/// Verify that a grid matches what the RNG would produce for the seeds.
pub fn verify_grid(
    engine: &SpinEngine,
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    expected: &Grid,
) -> SlotResult<bool> {
    Ok(replay_spin(engine, server_seed, client_seed, nonce)? == *expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paytable::{Paytable, PaytableEntry};
    use crate::rng::ScriptedRng;
    use crate::symbols::Symbol::{A, B, C, D};
    use crate::symbols::SymbolSupply;

    fn engine() -> SpinEngine {
        SpinEngine::new(MachineConfig::default_3x3()).unwrap()
    }

    #[test]
    fn scripted_draws_pick_pool_offsets() {
        // pool: A A B B B B C C C C C C D D D D D D D D
        let mut rng = ScriptedRng::new(vec![0, 1, 4, 0, 1, 10, 0, 1, 4]);
        let grid = engine().generate_spin(&mut rng).unwrap();
        assert_eq!(
            grid.columns(),
            &[vec![A, B, C], vec![A, B, D], vec![A, B, C]]
        );
    }

    #[test]
    fn reference_round() {
        let grid = Grid::from_columns(vec![vec![A, B, C], vec![A, B, D], vec![A, B, C]]).unwrap();
        let result = engine().evaluate(&grid, 3, 10);
        assert_eq!(result.winnings, 90);
        assert_eq!(result.winning_lines, vec![1, 2]);
    }

    #[test]
    fn only_bet_lines_pay() {
        let grid = Grid::from_columns(vec![vec![C, D, B], vec![A, D, B], vec![C, D, B]]).unwrap();
        let engine = engine();
        assert_eq!(engine.evaluate(&grid, 1, 7), RoundResult::default());
        let two = engine.evaluate(&grid, 2, 7);
        assert_eq!(two.winnings, 14);
        assert_eq!(two.winning_lines, vec![2]);
        let three = engine.evaluate(&grid, 3, 7);
        assert_eq!(three.winnings, 14 + 28);
        assert_eq!(three.winning_lines, vec![2, 3]);
    }

    #[test]
    fn symbol_outside_the_paytable_never_pays() {
        let engine = SpinEngine::new(MachineConfig {
            supply: SymbolSupply(vec![(A, 3), (B, 3)]),
            paytable: Paytable(vec![
                PaytableEntry {
                    symbol: A,
                    payout_multiplier: 5,
                },
                PaytableEntry {
                    symbol: B,
                    payout_multiplier: 4,
                },
            ]),
            ..MachineConfig::default_3x3()
        })
        .unwrap();
        let grid = Grid::from_columns(vec![vec![C, B, A], vec![C, B, B], vec![C, B, A]]).unwrap();
        let result = engine.evaluate(&grid, 3, 2);
        assert_eq!(result.winnings, 8);
        assert_eq!(result.winning_lines, vec![2]);
    }

    #[test]
    fn evaluate_is_repeatable() {
        let engine = engine();
        let mut rng = ProvablyFairRng::new("server", "client", 1);
        let grid = engine.generate_spin(&mut rng).unwrap();
        assert_eq!(engine.evaluate(&grid, 3, 5), engine.evaluate(&grid, 3, 5));
    }

    #[test]
    fn grid_displays_row_major() {
        let grid = Grid::from_columns(vec![vec![A, B, C], vec![A, B, D], vec![A, B, C]]).unwrap();
        assert_eq!(grid.to_string(), "A | A | A\nB | B | B\nC | D | C\n");
    }

    #[test]
    fn ragged_grid_is_rejected() {
        assert!(Grid::from_columns(vec![vec![A, B], vec![A]]).is_err());
        assert!(Grid::from_columns(vec![]).is_err());
    }

    #[test]
    fn seeded_spin_verifies() {
        let engine = engine();
        let grid = replay_spin(&engine, "server", "client", 9).unwrap();
        assert!(verify_grid(&engine, "server", "client", 9, &grid).unwrap());
        let mut other = ProvablyFairRng::new("server", "client", 9);
        assert_eq!(engine.generate_spin(&mut other).unwrap(), grid);
    }
}
