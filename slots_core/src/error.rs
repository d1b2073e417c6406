use crate::symbols::Symbol;

#[derive(thiserror::Error, Debug)]
pub enum SlotError {
    #[error("symbol supply of {available} cannot fill {rows} rows")]
    InsufficientSymbols { available: usize, rows: usize },
    #[error("no payout multiplier for symbol {0}")]
    MissingPayout(Symbol),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("input closed before a valid answer was given")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type SlotResult<T> = Result<T, SlotError>;
