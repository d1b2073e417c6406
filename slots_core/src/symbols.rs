use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    A,
    B,
    C,
    D,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::A, Symbol::B, Symbol::C, Symbol::D];

    pub fn to_index(self) -> u8 {
        match self {
            Symbol::A => 0,
            Symbol::B => 1,
            Symbol::C => 2,
            Symbol::D => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::A => "A",
            Symbol::B => "B",
            Symbol::C => "C",
            Symbol::D => "D",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many copies of each symbol sit in the pool a single column is drawn from.
///
/// Entries keep their insertion order so the flattened pool is stable, which
/// matters when a spin is replayed from its seeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSupply(pub Vec<(Symbol, u32)>);

impl SymbolSupply {
    pub fn simple_default() -> Self {
        Self(vec![
            (Symbol::A, 2),
            (Symbol::B, 4),
            (Symbol::C, 6),
            (Symbol::D, 8),
        ])
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| *count as usize).sum()
    }

    pub fn count_of(&self, symbol: Symbol) -> u32 {
        self.0
            .iter()
            .filter(|(s, _)| *s == symbol)
            .map(|(_, count)| *count)
            .sum()
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.iter().map(|(s, _)| *s)
    }

    /// Flattened multiset: every symbol repeated `count` times, in supply order.
    pub fn pool(&self) -> Vec<Symbol> {
        let mut pool = Vec::with_capacity(self.total());
        for (symbol, count) in &self.0 {
            pool.extend(std::iter::repeat(*symbol).take(*count as usize));
        }
        pool
    }
}
