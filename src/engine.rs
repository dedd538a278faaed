//! Command boundary for a table. Front ends (the TUI, tests, scripted drivers)
//! push the same handful of commands through this trait and read the table
//! back through `game()`, without reaching into session internals.

use crate::agents::Wager;
use crate::events::TableObserver;
use crate::game::{ActionError, Game};
use crate::session::Session;

pub trait TableEngine {
    // Hand lifecycle
    fn start_hand(&mut self) -> Result<(), ActionError>;
    fn start_next_phase(&mut self) -> Result<(), ActionError>;
    fn new_session(&mut self);

    // The human's wager
    fn submit_bet(&mut self, wager: Wager) -> Result<(), ActionError>;

    // Convenience wagers built on submit_bet
    fn fold(&mut self) -> Result<(), ActionError> {
        self.submit_bet(Wager::Fold)
    }
    fn check_call(&mut self) -> Result<(), ActionError> {
        let to_call = self.to_call();
        self.submit_bet(Wager::Chips(to_call))
    }
    fn raise_min(&mut self) -> Result<(), ActionError> {
        let amount = self.to_call() + self.game().minimum_bet();
        self.submit_bet(Wager::Chips(amount))
    }

    // Clock
    fn tick(&mut self, now_ms: u64);

    // Queries
    fn game(&self) -> &Game;
    fn to_call(&self) -> u64 {
        let game = self.game();
        game.to_call(game.human_seat())
    }
}

impl<O: TableObserver> TableEngine for Session<O> {
    fn start_hand(&mut self) -> Result<(), ActionError> {
        Session::start_hand(self)
    }
    fn start_next_phase(&mut self) -> Result<(), ActionError> {
        Session::start_next_phase(self)
    }
    fn new_session(&mut self) {
        Session::new_session(self)
    }

    fn submit_bet(&mut self, wager: Wager) -> Result<(), ActionError> {
        Session::submit_bet(self, wager)
    }

    fn tick(&mut self, now_ms: u64) {
        Session::tick(self, now_ms)
    }

    fn game(&self) -> &Game {
        Session::game(self)
    }
}
