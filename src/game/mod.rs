//! The table: seats, deck, blinds and the turn state machine for one
//! session of no-limit Hold'em.
//!
//! A hand moves through [`Phase`]s; within a phase the table is in one
//! [`TurnState`]. Every mutation goes through a command that either applies
//! fully or returns an [`ActionError`] and leaves the table untouched.

use crate::agents::{BetContext, Wager};
use crate::cards::Card;
use crate::deck::Deck;
use crate::evaluator::{Category, EvalError};
use crate::events::TableEvent;
use crate::hand::HoleCards;

mod betting;
mod blinds;
mod player;
mod showdown;

pub use blinds::next_minimum_bet;
pub use player::Player;

/// Betting rounds of a hand, in dealing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Phase {
    /// Number of community cards face up during this phase.
    pub const fn revealed(self) -> usize {
        match self {
            Phase::PreFlop => 0,
            Phase::Flop => 3,
            Phase::Turn => 4,
            Phase::River => 5,
        }
    }

    /// The following phase, `None` after the river.
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::PreFlop => Some(Phase::Flop),
            Phase::Flop => Some(Phase::Turn),
            Phase::Turn => Some(Phase::River),
            Phase::River => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Phase::PreFlop => "Pre-flop",
            Phase::Flop => "Flop",
            Phase::Turn => "Turn",
            Phase::River => "River",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the table is within the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// No hand dealt yet this session.
    Idle,
    /// Waiting on this seat's wager.
    AwaitingAction(usize),
    /// Betting for the phase is settled; waiting for `start_next_phase`.
    PhaseComplete,
    /// Pot awarded; waiting for `start_hand`.
    HandComplete,
    /// The session is decided. `won` is from the human's point of view.
    GameOver { won: bool },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("seat {seat} acted out of turn, waiting on seat {expected}")]
    OutOfTurn { seat: usize, expected: usize },
    #[error("seat {0} is not in the hand")]
    NotPlaying(usize),
    #[error("no seat is being asked to act")]
    NoActionPending,
    #[error("a hand is already in progress")]
    HandInProgress,
    #[error("no hand is in progress")]
    NoHandInProgress,
    #[error("the current betting round is not finished")]
    PhaseNotComplete,
    #[error("the session is over")]
    SessionOver,
    #[error("seat {0} is played by a bot")]
    BotSeat(usize),
    #[error("showdown failed: {0}")]
    Evaluation(#[from] EvalError),
}

/// How the last pot was split.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandResult {
    /// Winning seats with the chips each received, in seat order.
    pub payouts: Vec<(usize, u64)>,
    pub category: Category,
    pub winning_cards: Vec<Card>,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    pub(crate) players: Vec<Player>,
    pub(crate) human: usize,
    pub(crate) deck: Deck,
    /// All five cards are dealt up front; `phase` decides how many show.
    pub(crate) community: Vec<Card>,
    pub(crate) phase: Phase,
    pub(crate) turn: TurnState,
    pub(crate) turn_index: usize,
    /// Seats visited in the current betting round.
    pub(crate) round_steps: usize,
    pub(crate) small_blind: usize,
    pub(crate) big_blind: usize,
    pub(crate) minimum_bet: u64,
    pub(crate) pending_minimum_bet: u64,
    pub(crate) all_in_ceiling: Option<u64>,
    pub(crate) last_result: Option<HandResult>,
    pub(crate) hand_number: u64,
    events: Vec<TableEvent>,
}

impl Game {
    /// Seat `players` around a table. `human` is the seat driven from outside;
    /// `minimum_bet` is the opening big blind.
    pub fn new(players: Vec<Player>, human: usize, minimum_bet: u64, deck: Deck) -> Self {
        Self {
            players,
            human,
            deck,
            community: Vec::with_capacity(5),
            phase: Phase::PreFlop,
            turn: TurnState::Idle,
            turn_index: 0,
            round_steps: 0,
            small_blind: 0,
            big_blind: 1,
            minimum_bet,
            pending_minimum_bet: minimum_bet,
            all_in_ceiling: None,
            last_result: None,
            hand_number: 0,
            events: Vec::new(),
        }
    }

    /// Returns a reference to the players
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    /// Returns the seat driven by the human
    pub fn human_seat(&self) -> usize {
        self.human
    }

    /// Returns the sum of every bet on the table
    pub fn pot(&self) -> u64 {
        self.players.iter().map(|p| p.bet).sum()
    }

    /// Returns the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the current turn state
    pub fn turn(&self) -> TurnState {
        self.turn
    }

    /// Returns the seat being asked to act, if any
    pub fn acting_seat(&self) -> Option<usize> {
        match self.turn {
            TurnState::AwaitingAction(seat) => Some(seat),
            _ => None,
        }
    }

    /// Community cards face up in the current phase.
    pub fn community(&self) -> &[Card] {
        let shown = match self.turn {
            TurnState::Idle => 0,
            _ => self.phase.revealed(),
        };
        &self.community[..shown.min(self.community.len())]
    }

    /// Largest bet among seats still in the hand.
    pub fn high_bet(&self) -> u64 {
        self.players.iter().filter(|p| p.playing).map(|p| p.bet).max().unwrap_or(0)
    }

    /// What `seat` must add to stay in, limited by its stack.
    pub fn to_call(&self, seat: usize) -> u64 {
        self.players
            .get(seat)
            .map(|p| self.high_bet().saturating_sub(p.bet).min(p.chips))
            .unwrap_or(0)
    }

    /// Returns the big blind for the hand in play
    pub fn minimum_bet(&self) -> u64 {
        self.minimum_bet
    }

    /// Returns the big blind the next hand will use
    pub fn pending_minimum_bet(&self) -> u64 {
        self.pending_minimum_bet
    }

    /// Returns the small blind seat
    pub fn small_blind_seat(&self) -> usize {
        self.small_blind
    }

    /// Returns the big blind seat
    pub fn big_blind_seat(&self) -> usize {
        self.big_blind
    }

    /// Returns the most any seat may have in once someone is all in
    pub fn all_in_ceiling(&self) -> Option<u64> {
        self.all_in_ceiling
    }

    /// Returns the outcome of the last completed hand
    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_result.as_ref()
    }

    /// Returns how many hands have been dealt this session
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn is_over(&self) -> bool {
        matches!(self.turn, TurnState::GameOver { .. })
    }

    /// Everything a bot at `seat` may look at, if that seat is due to act.
    pub fn bet_context(&self, seat: usize) -> Option<BetContext<'_>> {
        if self.acting_seat() != Some(seat) {
            return None;
        }
        let player = self.players.get(seat)?;
        Some(BetContext {
            seat,
            phase: self.phase,
            hole: player.hole?,
            community: self.community(),
            minimum_bet: self.minimum_bet,
            own_bet: player.bet,
            own_chips: player.chips,
            to_call: self.to_call(seat),
            shortest_stack: self.shortest_stack(),
            first_pass_done: self.round_steps >= self.players.len(),
            personality: player.personality,
        })
    }

    /// Take the notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deal a new hand: refill the deck, deal five community cards face down
    /// and two hole cards to every seat with chips, move the blinds, post
    /// them and ask the first seat to act.
    pub fn start_hand(&mut self) -> Result<(), ActionError> {
        match self.turn {
            TurnState::Idle | TurnState::HandComplete => {}
            TurnState::GameOver { .. } => return Err(ActionError::SessionOver),
            _ => return Err(ActionError::HandInProgress),
        }

        if self.pending_minimum_bet != self.minimum_bet {
            self.minimum_bet = self.pending_minimum_bet;
            log::info!("minimum bet is now {}", self.minimum_bet);
            self.emit(TableEvent::MinimumBetChanged { amount: self.minimum_bet });
        }
        self.all_in_ceiling = None;
        self.last_result = None;
        self.phase = Phase::PreFlop;
        self.deck.refill();
        self.community = self.deck.draw_n(5);

        for seat in 0..self.players.len() {
            let p = &mut self.players[seat];
            p.bet = 0;
            p.all_in = false;
            p.hole = None;
            p.playing = false;
            if p.active && p.chips == 0 {
                p.active = false;
            }
            if p.active {
                let cards = self.deck.draw_n(2);
                p.hole = HoleCards::from_slice(&cards).ok();
                p.playing = p.hole.is_some();
            }
            self.emit_status(seat);
            let shown = if seat == self.human { self.players[seat].hole } else { None };
            if self.players[seat].playing {
                self.emit(TableEvent::HoleCards { seat, cards: shown });
            }
        }

        if self.players.iter().filter(|p| p.playing).count() < 2 {
            self.end_session();
            return Ok(());
        }

        self.hand_number += 1;
        self.emit(TableEvent::CommunityRevealed { phase: Phase::PreFlop, cards: Vec::new() });
        self.rotate_blinds();
        log::info!(
            "hand {} dealt; blinds {}/{} on seats {} and {}",
            self.hand_number,
            self.minimum_bet / 2,
            self.minimum_bet,
            self.small_blind,
            self.big_blind
        );
        self.post_blind(self.big_blind, self.minimum_bet);
        self.post_blind(self.small_blind, self.minimum_bet / 2);

        self.turn_index = self.big_blind;
        self.round_steps = 0;
        self.advance_turn()
    }

    /// Reveal the next phase's cards and open its betting round. With a
    /// player all in there is nothing left to bet, so every remaining card is
    /// revealed and the hand goes straight to showdown.
    pub fn start_next_phase(&mut self) -> Result<(), ActionError> {
        match self.turn {
            TurnState::PhaseComplete => {}
            TurnState::GameOver { .. } => return Err(ActionError::SessionOver),
            TurnState::Idle | TurnState::HandComplete => {
                return Err(ActionError::NoHandInProgress)
            }
            TurnState::AwaitingAction(_) => return Err(ActionError::PhaseNotComplete),
        }
        let Some(next) = self.phase.next() else {
            return Err(ActionError::NoHandInProgress);
        };

        if self.all_in_ceiling.is_some() {
            let mut phase = Some(next);
            while let Some(p) = phase {
                self.reveal(p);
                phase = p.next();
            }
            log::debug!("all in; ran the board out to the river");
            return self.showdown();
        }

        self.reveal(next);
        self.turn_index = self.big_blind;
        self.round_steps = 0;
        self.advance_turn()
    }

    fn reveal(&mut self, phase: Phase) {
        self.phase = phase;
        log::debug!("{phase}: {:?}", self.community());
        self.emit(TableEvent::CommunityRevealed { phase, cards: self.community().to_vec() });
    }

    /// Queue a chips and status notice for every seat, so a fresh observer
    /// can draw the table before the first hand.
    pub(crate) fn announce_seats(&mut self) {
        self.emit(TableEvent::MinimumBetChanged { amount: self.minimum_bet });
        for seat in 0..self.players.len() {
            self.emit_chips(seat);
            self.emit_status(seat);
        }
    }

    /// Smallest `chips + bet` among seats still playing.
    pub(crate) fn shortest_stack(&self) -> u64 {
        self.players.iter().filter(|p| p.playing).map(Player::total).min().unwrap_or(0)
    }

    pub(crate) fn emit(&mut self, event: TableEvent) {
        self.events.push(event);
    }

    pub(crate) fn emit_chips(&mut self, seat: usize) {
        let pot = self.pot();
        if let Some(p) = self.players.get(seat) {
            let event = TableEvent::ChipsChanged { seat, chips: p.chips, bet: p.bet, pot };
            self.events.push(event);
        }
    }

    pub(crate) fn emit_status(&mut self, seat: usize) {
        if let Some(p) = self.players.get(seat) {
            let event = TableEvent::SeatStatus {
                seat,
                active: p.active,
                playing: p.playing,
                all_in: p.all_in,
            };
            self.events.push(event);
        }
    }

    /// Place a specific pair of hole cards in front of `seat` for the hand in
    /// play. Callers keep every dealt card distinct.
    #[doc(hidden)]
    pub fn rig_hole(&mut self, seat: usize, hole: HoleCards) {
        if let Some(p) = self.players.get_mut(seat) {
            p.hole = Some(hole);
        }
    }

    /// Replace the five community cards of the hand in play.
    #[doc(hidden)]
    pub fn rig_community(&mut self, cards: [Card; 5]) {
        self.community = cards.to_vec();
    }

    /// Set a seat's stack directly.
    #[doc(hidden)]
    pub fn rig_chips(&mut self, seat: usize, chips: u64) {
        if let Some(p) = self.players.get_mut(seat) {
            p.chips = chips;
        }
    }

    /// Feed a wager for whichever seat is due to act.
    #[doc(hidden)]
    pub fn act(&mut self, wager: Wager) -> Result<(), ActionError> {
        let seat = self.acting_seat().ok_or(ActionError::NoActionPending)?;
        self.accept_bet(seat, wager)
    }
}
