use super::{ActionError, Game, Phase, TurnState};
use crate::agents::Wager;
use crate::events::TableEvent;

impl Game {
    /// Apply `seat`'s wager and move the turn on.
    ///
    /// Only the seat being asked to act may bet. A chip amount is raised to
    /// the call when short and cut to the stack when long; betting the whole
    /// stack puts the seat all in. Once anyone is all in, any amount is
    /// treated as a call of the all-in ceiling.
    pub fn accept_bet(&mut self, seat: usize, wager: Wager) -> Result<(), ActionError> {
        let expected = match self.turn {
            TurnState::AwaitingAction(expected) => expected,
            TurnState::GameOver { .. } => return Err(ActionError::SessionOver),
            _ => return Err(ActionError::NoActionPending),
        };
        if seat != expected {
            return Err(ActionError::OutOfTurn { seat, expected });
        }
        if !self.players.get(seat).is_some_and(|p| p.can_act()) {
            return Err(ActionError::NotPlaying(seat));
        }

        match wager {
            Wager::Fold => {
                self.players[seat].playing = false;
                log::debug!("seat {seat} folds");
                self.emit_status(seat);
            }
            Wager::Chips(amount) => {
                let owed = self.to_call(seat);
                let paid = self.place_chips(seat, amount.max(owed));
                log::debug!("seat {seat} puts in {paid} (owed {owed})");
            }
        }
        self.advance_turn()
    }

    pub(crate) fn post_blind(&mut self, seat: usize, amount: u64) {
        let paid = self.place_chips(seat, amount);
        log::debug!("seat {seat} posts a blind of {paid}");
    }

    /// Move up to `amount` chips from `seat`'s stack into its bet, honouring
    /// the all-in ceiling. Returns what actually moved.
    fn place_chips(&mut self, seat: usize, amount: u64) -> u64 {
        let total = self.players[seat].total();
        let bet = self.players[seat].bet;
        let chips = self.players[seat].chips;

        let amount = match self.all_in_ceiling {
            Some(ceiling) => {
                let ceiling = if total < ceiling {
                    self.lower_ceiling(total);
                    total
                } else {
                    ceiling
                };
                ceiling.saturating_sub(bet).min(chips)
            }
            None if amount >= chips => {
                self.lower_ceiling(total);
                chips
            }
            None => amount,
        };

        let p = &mut self.players[seat];
        p.chips -= amount;
        p.bet += amount;
        if p.chips == 0 {
            p.all_in = true;
        }
        if p.all_in {
            log::debug!("seat {seat} is all in with {}", p.bet);
        }
        self.emit_chips(seat);
        self.emit_status(seat);
        amount
    }

    fn lower_ceiling(&mut self, ceiling: u64) {
        log::debug!("all-in ceiling set to {ceiling}");
        self.all_in_ceiling = Some(ceiling);
        self.return_excess_bets();
    }

    /// Hand back every chip bet above the all-in ceiling, folded seats
    /// included.
    pub(crate) fn return_excess_bets(&mut self) {
        let Some(ceiling) = self.all_in_ceiling else {
            return;
        };
        for seat in 0..self.players.len() {
            let p = &mut self.players[seat];
            if p.bet > ceiling {
                let excess = p.bet - ceiling;
                p.bet = ceiling;
                p.chips += excess;
                log::debug!("returned {excess} to seat {seat}");
                self.emit_chips(seat);
            }
        }
    }

    /// Move the turn clockwise to the next seat that can act, or close the
    /// betting round.
    ///
    /// Every seat passed counts as a step. The round closes when one seat or
    /// fewer is left in the hand, or once a full lap is done and every seat
    /// that can still act has matched the high bet.
    pub(crate) fn advance_turn(&mut self) -> Result<(), ActionError> {
        let seats = self.players.len();
        if let Some(prev) = self.acting_seat() {
            self.emit(TableEvent::TurnIndicator { seat: None });
            log::trace!("seat {prev} done");
        }
        // a settled round is always found within two laps
        for _ in 0..=2 * seats {
            if self.playing_count() <= 1 || (self.round_steps >= seats && self.bets_settled()) {
                return self.finish_round();
            }
            self.turn_index = (self.turn_index + 1) % seats;
            self.round_steps += 1;
            if self.players[self.turn_index].can_act() {
                let seat = self.turn_index;
                self.turn = TurnState::AwaitingAction(seat);
                self.emit(TableEvent::TurnIndicator { seat: Some(seat) });
                if seat == self.human {
                    let to_call = self.to_call(seat);
                    self.emit(TableEvent::AwaitingHuman { seat, to_call });
                }
                return Ok(());
            }
        }
        self.finish_round()
    }

    fn finish_round(&mut self) -> Result<(), ActionError> {
        if self.phase == Phase::River || self.playing_count() <= 1 {
            return self.showdown();
        }
        log::debug!("{} betting complete, pot {}", self.phase, self.pot());
        self.turn = TurnState::PhaseComplete;
        self.emit(TableEvent::PhaseComplete { phase: self.phase });
        Ok(())
    }

    pub(crate) fn playing_count(&self) -> usize {
        self.players.iter().filter(|p| p.playing).count()
    }

    fn bets_settled(&self) -> bool {
        let high = self.high_bet();
        self.players.iter().filter(|p| p.can_act()).all(|p| p.bet == high)
    }
}
