//! Pure hand scoring and bet sizing for bots.
//!
//! Scores are small integers (roughly 0..=100 after scaling) that get
//! multiplied by the minimum bet to become a chip value.

use super::{BetContext, Wager};
use crate::cards::{Card, Rank};
use crate::evaluator::{detect_draws, evaluate_hand, Category, Draw, EvalError};
use crate::game::Phase;
use crate::hand::HoleCards;

/// A hand's worth to a bot.
///
/// `marginal` marks hands worth staying in but not worth raising with;
/// [`size_bet`] turns them into a plain call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandScore {
    pub score: u64,
    pub marginal: bool,
}

/// Score two hole cards before any community card is seen.
///
/// Only the higher card counts: Ace 20, King 16, Queen 14, Jack 12, anything
/// lower its face value (and the hand is marginal). Pairs double; suited
/// cards add 4; unpaired cards lose up to 10 for the gap between them.
///
/// ```
/// use holdem_rs::agents::preflop_score;
///
/// let aces = preflop_score(&"As Ah".parse().unwrap());
/// assert_eq!(aces.score, 8);
/// assert!(!aces.marginal);
/// ```
pub fn preflop_score(hole: &HoleCards) -> HandScore {
    let (high, low) = hole.high_low();
    let (mut score, marginal): (i64, bool) = match high.rank() {
        Rank::Ace => (20, false),
        Rank::King => (16, false),
        Rank::Queen => (14, false),
        Rank::Jack => (12, false),
        other => (i64::from(other.value()), true),
    };

    if hole.is_pair() {
        score *= 2;
    } else {
        if hole.is_suited() {
            score += 4;
        }
        score -= match high.rank().value() - low.rank().value() {
            gap if gap > 4 => 10,
            4 => 8,
            3 => 4,
            2 => 2,
            _ => 0,
        };
    }
    HandScore { score: score.max(0) as u64 / 5, marginal }
}

/// Score a hand once community cards are out.
///
/// A made hand only counts when one of the bot's own cards plays in the
/// leading cards of the best five, so a pair on the board is worth nothing.
/// On the flop, weak hands also collect draw bonuses.
pub fn postflop_score(
    hole: &HoleCards,
    community: &[Card],
    phase: Phase,
) -> Result<HandScore, EvalError> {
    let eval = evaluate_hand(hole, community)?;
    let plays = |n: usize| eval.top(n).iter().any(|c| hole.contains(*c));

    let (mut score, marginal) = match eval.category {
        Category::HighCard if plays(2) => (5, true),
        Category::Pair if plays(2) => (10, true),
        Category::TwoPair if plays(2) => (15, false),
        Category::TwoPair if plays(4) => (5, true),
        Category::ThreeOfAKind if plays(3) => (30, false),
        Category::Straight if plays(5) => (35, false),
        Category::Flush | Category::FullHouse | Category::StraightFlush if plays(5) => (40, false),
        Category::FourOfAKind if plays(5) => (500, false),
        _ => (0, false),
    };

    if phase == Phase::Flop && matches!(eval.category, Category::HighCard | Category::Pair) {
        let mut cards = Vec::with_capacity(community.len() + 2);
        cards.extend_from_slice(&hole.as_array());
        cards.extend_from_slice(community);
        score += draw_bonus(&cards);
    }
    Ok(HandScore { score: score / 5, marginal })
}

fn draw_bonus(cards: &[Card]) -> u64 {
    let draws = detect_draws(cards);
    let mut bonus = 0;
    if draws.contains(Draw::FlushDraw) {
        bonus += 10;
    }
    if draws.contains(Draw::OpenStraight) {
        bonus += 10;
    } else if draws.contains(Draw::InsideStraight) {
        bonus += 5;
    }
    bonus
}

/// Turn a final score into a wager.
///
/// The chip value is `score × minimum_bet`. A bot folds when the call costs
/// more than that, unless the score is 6 or better. Otherwise the amount is
/// rounded to a multiple of the minimum bet, pushed to a full shove when it
/// would exceed a third of the shortest stack, and never below the call.
pub fn size_bet(score: HandScore, ctx: &BetContext<'_>) -> Wager {
    let min = ctx.minimum_bet.max(1);
    let value = score.score.saturating_mul(min);
    if ctx.to_call > value && score.score < 6 {
        return Wager::Fold;
    }

    let raw = if ctx.phase == Phase::PreFlop {
        value.saturating_sub(ctx.own_bet)
    } else if ctx.first_pass_done {
        ctx.to_call
    } else {
        value
    };
    let mut bet = (raw.saturating_add(min / 2 + 2) / min) * min;
    if bet > ctx.shortest_stack / 3 {
        bet = ctx.shortest_stack;
    }
    if bet < ctx.to_call || score.marginal {
        bet = ctx.to_call;
    }
    Wager::Chips(bet)
}
