use crate::console::{Console, InputSource};
use crate::error::SlotResult;
use std::io::Write;

/// The player's money and the prompts that collect betting choices.
///
/// Bad answers are never errors: each request loops until it gets a valid
/// value. Only closed input or a failing terminal ends a request early.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerAccount {
    balance: i64,
}

/// Accepts plain runs of ASCII digits only, so signs and any whitespace are
/// rejected.
fn parse_amount(answer: &str) -> Option<i64> {
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    answer.parse().ok()
}

impl PlayerAccount {
    pub fn new(balance: i64) -> Self {
        Self { balance }
    }

    pub fn request_deposit<I: InputSource, W: Write>(
        &mut self,
        console: &mut Console<I, W>,
    ) -> SlotResult<i64> {
        loop {
            let answer = console.prompt("What would you like to deposit? $")?;
            match parse_amount(&answer) {
                Some(amount) if amount > 0 => match self.balance.checked_add(amount) {
                    Some(balance) => {
                        self.balance = balance;
                        return Ok(amount);
                    }
                    None => console.say("That deposit would put your balance over the limit.")?,
                },
                _ => console.say("Please enter a valid number greater than 0.")?,
            }
        }
    }

    pub fn request_bet_per_line<I: InputSource, W: Write>(
        &self,
        console: &mut Console<I, W>,
        min_bet: i64,
        max_bet: i64,
    ) -> SlotResult<i64> {
        loop {
            let answer = console.prompt("What would you like to bet on each line? $")?;
            match parse_amount(&answer) {
                Some(bet) if (min_bet..=max_bet).contains(&bet) => return Ok(bet),
                _ => console.say(format!("Amount must be between ${min_bet} - ${max_bet}."))?,
            }
        }
    }

    pub fn request_line_count<I: InputSource, W: Write>(
        &self,
        console: &mut Console<I, W>,
        max_lines: usize,
    ) -> SlotResult<usize> {
        let question = format!("Enter the number of lines to bet on (1-{max_lines}): ");
        loop {
            let answer = console.prompt(&question)?;
            match parse_amount(&answer).and_then(|n| usize::try_from(n).ok()) {
                Some(lines) if (1..=max_lines).contains(&lines) => return Ok(lines),
                _ => console.say("Please enter a valid number.")?,
            }
        }
    }

    /// Adds the round's net result. The balance has no floor and saturates at
    /// the `i64` limits.
    pub fn apply_settlement(&mut self, delta: i64) {
        self.balance = self.balance.saturating_add(delta);
    }

    pub fn can_afford_minimum_bet(&self, min_bet: i64) -> bool {
        self.balance >= min_bet
    }

    pub fn current_balance(&self) -> i64 {
        self.balance
    }
}
