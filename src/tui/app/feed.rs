use crate::events::{TableEvent, TableObserver};
use crate::hand::HoleCards;
use std::collections::VecDeque;

/// What the screen knows beyond the table's own state: a rolling message log,
/// hole cards that have been shown, and how the last hand ended.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    messages: VecDeque<String>,
    shown: Vec<Option<HoleCards>>,
    winners: Vec<usize>,
    awaiting_human: Option<u64>,
    game_over: Option<bool>,
}

impl Feed {
    pub const MESSAGE_CAP: usize = 200;

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the newest `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &str> {
        self.messages.iter().skip(self.messages.len().saturating_sub(n)).map(String::as_str)
    }

    /// Returns hole cards shown face up for `seat` this hand.
    pub fn shown(&self, seat: usize) -> Option<HoleCards> {
        self.shown.get(seat).copied().flatten()
    }

    pub fn is_winner(&self, seat: usize) -> bool {
        self.winners.contains(&seat)
    }

    /// Returns the call amount while the human is being asked to act.
    pub fn awaiting_human(&self) -> Option<u64> {
        self.awaiting_human
    }

    pub fn game_over(&self) -> Option<bool> {
        self.game_over
    }

    /// Forget everything; used when a fresh session is seated.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn push(&mut self, msg: impl Into<String>) {
        if self.messages.len() == Self::MESSAGE_CAP {
            self.messages.pop_front();
        }
        self.messages.push_back(msg.into());
    }
}

impl TableObserver for Feed {
    fn notify(&mut self, event: &TableEvent) {
        match event {
            TableEvent::HoleCards { seat, cards } => {
                if self.shown.len() <= *seat {
                    self.shown.resize(seat + 1, None);
                }
                self.shown[*seat] = *cards;
            }
            TableEvent::CommunityRevealed { phase, cards } => {
                if cards.is_empty() {
                    self.winners.clear();
                    self.push("New hand dealt.");
                } else {
                    let cards: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
                    self.push(format!("{phase}: {}", cards.join(" ")));
                }
            }
            TableEvent::TurnIndicator { .. } => self.awaiting_human = None,
            TableEvent::AwaitingHuman { to_call, .. } => self.awaiting_human = Some(*to_call),
            TableEvent::PhaseComplete { phase } => {
                self.push(format!("{phase} betting done. Space to continue."));
            }
            TableEvent::Winner { seat, name, amount, category } => {
                self.winners.push(*seat);
                self.push(format!("{name} wins {amount} with {category}."));
            }
            TableEvent::Tie { seats } => {
                self.push(format!("Split pot between {} players.", seats.len()));
            }
            TableEvent::MinimumBetChanged { amount } => {
                self.push(format!("Minimum bet is {amount}."));
            }
            TableEvent::GameOver { won } => {
                self.game_over = Some(*won);
                self.push(if *won { "You won the session!" } else { "You are out of chips." });
            }
            TableEvent::ChipsChanged { .. }
            | TableEvent::SeatStatus { .. }
            | TableEvent::HandComplete => {}
        }
    }
}
