//! Outbound notifications from the table to whatever presents it.
//!
//! The game queues [`TableEvent`]s as it changes state; the session drains
//! them after every command and hands each one to a [`TableObserver`].

use crate::cards::Card;
use crate::evaluator::Category;
use crate::game::Phase;
use crate::hand::HoleCards;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableEvent {
    /// A seat's stack or bet moved. `pot` is the table total afterwards.
    ChipsChanged { seat: usize, chips: u64, bet: u64, pot: u64 },
    /// Every community card visible in `phase`.
    CommunityRevealed { phase: Phase, cards: Vec<Card> },
    /// `None` clears the indicator.
    TurnIndicator { seat: Option<usize> },
    SeatStatus { seat: usize, active: bool, playing: bool, all_in: bool },
    /// `None` means the seat holds cards face down.
    HoleCards { seat: usize, cards: Option<HoleCards> },
    AwaitingHuman { seat: usize, to_call: u64 },
    PhaseComplete { phase: Phase },
    HandComplete,
    /// `category` is the hand the chips were won with, as far as the board got.
    Winner { seat: usize, name: String, amount: u64, category: Category },
    Tie { seats: Vec<usize> },
    MinimumBetChanged { amount: u64 },
    GameOver { won: bool },
}

/// Receives table notifications. Implemented by front ends.
pub trait TableObserver {
    fn notify(&mut self, event: &TableEvent);
}

/// An observer that keeps every event it sees.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<TableEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events recorded so far, oldest first.
    pub fn events(&self) -> &[TableEvent] {
        &self.events
    }

    /// Take every recorded event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }
}

impl TableObserver for EventLog {
    fn notify(&mut self, event: &TableEvent) {
        self.events.push(event.clone());
    }
}

impl<O: TableObserver + ?Sized> TableObserver for &mut O {
    fn notify(&mut self, event: &TableEvent) {
        (**self).notify(event);
    }
}
