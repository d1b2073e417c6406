use crate::symbols::Symbol;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaytableEntry {
    pub symbol: Symbol,
    pub payout_multiplier: i64,
}

/// Multiplier paid per unit of line bet when a whole line shows one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paytable(pub Vec<PaytableEntry>);

impl Paytable {
    pub fn simple_default() -> Self {
        Self(vec![
            PaytableEntry {
                symbol: Symbol::A,
                payout_multiplier: 5,
            },
            PaytableEntry {
                symbol: Symbol::B,
                payout_multiplier: 4,
            },
            PaytableEntry {
                symbol: Symbol::C,
                payout_multiplier: 3,
            },
            PaytableEntry {
                symbol: Symbol::D,
                payout_multiplier: 2,
            },
        ])
    }

    pub fn multiplier(&self, symbol: Symbol) -> Option<i64> {
        self.0
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.payout_multiplier)
    }
}
