//! Agents: who decides a wager when a seat is asked to act.
//!
//! The state machine never calls a bot directly. The session looks up the
//! acting seat in an [`AgentTable`], hands the agent a read-only
//! [`BetContext`] and feeds the returned [`Wager`] back through the same
//! bet path a human submission takes.

use crate::cards::Card;
use crate::game::Phase;
use crate::hand::HoleCards;
use core::fmt;

mod bots;
mod scoring;

pub use bots::BotBrain;
pub use scoring::{postflop_score, preflop_score, size_bet, HandScore};

/// A bet decision: give up the hand, or put in this many more chips.
///
/// `Chips(0)` is a check when nothing is owed. The state machine clamps the
/// amount up to the call and down to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wager {
    Fold,
    Chips(u64),
}

impl fmt::Display for Wager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wager::Fold => f.write_str("fold"),
            Wager::Chips(0) => f.write_str("check"),
            Wager::Chips(n) => write!(f, "{n} chips"),
        }
    }
}

/// Bot temperament in `0..=9`. High values play looser, low values tighter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Personality(u8);

impl Personality {
    pub const MAX: u8 = 9;

    /// Values above [`Personality::MAX`] saturate.
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    /// Returns the raw score.
    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_aggressive(self) -> bool {
        self.0 > 7
    }

    pub fn is_timid(self) -> bool {
        self.0 < 2
    }

    /// Scale a hand score: aggressive doubles, timid keeps two thirds.
    pub fn scale(self, score: u64) -> u64 {
        if self.is_aggressive() {
            score * 2
        } else if self.is_timid() {
            (score / 3) * 2
        } else {
            score
        }
    }
}

/// Everything an agent may see when deciding. Copies and borrows only; an
/// agent cannot reach the game it is playing in.
#[derive(Debug, Clone, Copy)]
pub struct BetContext<'a> {
    pub seat: usize,
    pub phase: Phase,
    pub hole: HoleCards,
    /// Community cards revealed so far.
    pub community: &'a [Card],
    pub minimum_bet: u64,
    /// Chips this seat has already put in this hand.
    pub own_bet: u64,
    pub own_chips: u64,
    pub to_call: u64,
    /// Smallest `chips + bet` among seats still playing.
    pub shortest_stack: u64,
    /// Whether every seat has had its first turn in this betting round.
    pub first_pass_done: bool,
    pub personality: Personality,
}

/// A seat controller.
pub trait PlayerAgent {
    /// Decide a wager for the seat described by `ctx`.
    fn decide(&mut self, ctx: &BetContext<'_>) -> Wager;
}

/// One optional agent per seat. Empty seats are driven from outside (the
/// human player).
#[derive(Default)]
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String =
            self.seats.iter().map(|a| if a.is_some() { 'B' } else { '-' }).collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn PlayerAgent>>) {
        if seat >= self.seats.len() {
            self.seats.resize_with(seat + 1, || None);
        }
        self.seats[seat] = agent;
    }

    /// Whether a seat currently has an agent assigned.
    pub fn has_agent(&self, seat: usize) -> bool {
        self.seats.get(seat).is_some_and(|a| a.is_some())
    }

    /// Ask the agent at `ctx.seat` for a wager. `None` when the seat has no agent.
    pub fn decide(&mut self, ctx: &BetContext<'_>) -> Option<Wager> {
        match self.seats.get_mut(ctx.seat) {
            Some(Some(agent)) => Some(agent.decide(ctx)),
            _ => None,
        }
    }
}
