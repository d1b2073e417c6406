use crate::{
    account::PlayerAccount,
    config::SessionConfig,
    console::{Console, InputSource},
    engine::{RoundResult, SpinEngine},
    error::SlotResult,
    rng::RandomSource,
};
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    Quit,
    OutOfFunds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub deposit: i64,
    pub rounds: u32,
    pub total_wagered: i64,
    pub total_won: i64,
    pub final_balance: i64,
    pub reason: EndReason,
}

/// Runs rounds until the player quits or cannot cover the minimum bet.
pub struct GameLoop<R, I, W> {
    session: SessionConfig,
    engine: SpinEngine,
    rng: R,
    console: Console<I, W>,
    account: PlayerAccount,
    rounds: u32,
    total_wagered: i64,
    total_won: i64,
}

impl<R: RandomSource, I: InputSource, W: Write> GameLoop<R, I, W> {
    pub fn new(
        session: SessionConfig,
        engine: SpinEngine,
        rng: R,
        console: Console<I, W>,
        account: PlayerAccount,
    ) -> SlotResult<Self> {
        session.validate(engine.rows())?;
        Ok(Self {
            session,
            engine,
            rng,
            console,
            account,
            rounds: 0,
            total_wagered: 0,
            total_won: 0,
        })
    }

    pub fn account(&self) -> &PlayerAccount {
        &self.account
    }

    pub fn console(&self) -> &Console<I, W> {
        &self.console
    }

    pub fn into_console(self) -> Console<I, W> {
        self.console
    }

    pub fn play(&mut self) -> SlotResult<SessionSummary> {
        let deposit = self.account.request_deposit(&mut self.console)?;
        info!(deposit, "session started");

        let mut reason = EndReason::OutOfFunds;
        while self.account.can_afford_minimum_bet(self.session.min_bet) {
            self.console.say(format!(
                "Current balance is ${}",
                self.account.current_balance()
            ))?;
            let answer = self.console.prompt("Press enter to play (q to quit).")?;
            if answer.eq_ignore_ascii_case("q") {
                reason = EndReason::Quit;
                break;
            }
            self.spin_round()?;
        }

        let final_balance = self.account.current_balance();
        self.console
            .say(format!("You left with ${final_balance}"))?;
        let summary = SessionSummary {
            deposit,
            rounds: self.rounds,
            total_wagered: self.total_wagered,
            total_won: self.total_won,
            final_balance,
            reason,
        };
        info!(?summary, "session ended");
        Ok(summary)
    }

    pub fn spin_round(&mut self) -> SlotResult<RoundResult> {
        let lines = self
            .account
            .request_line_count(&mut self.console, self.session.max_lines)?;
        let (bet, total_bet) = loop {
            let bet = self.account.request_bet_per_line(
                &mut self.console,
                self.session.min_bet,
                self.session.max_bet,
            )?;
            let total_bet = bet * lines as i64;
            if total_bet > self.account.current_balance() {
                self.console.say(format!(
                    "You do not have enough to bet that amount, your current balance is: ${}",
                    self.account.current_balance()
                ))?;
            } else {
                break (bet, total_bet);
            }
        };
        self.console.say(format!(
            "You are betting ${bet} on {lines} lines. Total bet is equal to: ${total_bet}"
        ))?;

        let grid = self.engine.generate_spin(&mut self.rng)?;
        self.console.say(grid.to_string().trim_end())?;
        let result = self.engine.evaluate(&grid, lines, bet);

        self.account.apply_settlement(result.winnings - total_bet);
        self.rounds += 1;
        self.total_wagered = self.total_wagered.saturating_add(total_bet);
        self.total_won = self.total_won.saturating_add(result.winnings);
        info!(
            lines,
            bet,
            winnings = result.winnings,
            balance = self.account.current_balance(),
            "round settled"
        );

        self.console.say(format!("You won ${}.", result.winnings))?;
        if result.winning_lines.is_empty() {
            self.console.say("No winning lines.")?;
        } else {
            let numbers: Vec<String> = result
                .winning_lines
                .iter()
                .map(ToString::to_string)
                .collect();
            self.console
                .say(format!("You won on lines: {}", numbers.join(" ")))?;
        }
        Ok(result)
    }
}
