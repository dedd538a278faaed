//! Unfinished-hand signals for pre-showdown decisions.
//!
//! These are heuristics, not categories: a pool can carry several at once and
//! none of them affects showdown ranking.

use crate::cards::{Card, Rank, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Draw {
    /// Three consecutive ranks.
    BackdoorStraight = 0,
    /// Three cards of one suit.
    BackdoorFlush = 1,
    /// Four of five ranks in a straight window, or a one-ended four-run.
    InsideStraight = 2,
    /// Four consecutive ranks open at both ends.
    OpenStraight = 3,
    /// Four cards of one suit.
    FlushDraw = 4,
}

impl Draw {
    pub const ALL: [Draw; 5] = [
        Draw::BackdoorStraight,
        Draw::BackdoorFlush,
        Draw::InsideStraight,
        Draw::OpenStraight,
        Draw::FlushDraw,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawSet(u8);

impl DrawSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, draw: Draw) {
        self.0 |= 1 << draw as u8;
    }

    pub const fn contains(self, draw: Draw) -> bool {
        self.0 & (1 << draw as u8) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Draw> {
        Draw::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

/// Detect draws in any set of cards (typically hole cards plus flop or turn).
///
/// ```
/// use holdem_rs::cards::parse_cards;
/// use holdem_rs::evaluator::{detect_draws, Draw};
///
/// let draws = detect_draws(&parse_cards("9h 8h 7c 6h 2d").unwrap());
/// assert!(draws.contains(Draw::OpenStraight));
/// assert!(draws.contains(Draw::BackdoorFlush));
/// ```
pub fn detect_draws(cards: &[Card]) -> DrawSet {
    let mut set = DrawSet::empty();
    straight_draws(rank_mask(cards), &mut set);

    let mut suits = [0u8; 4];
    for c in cards {
        suits[c.suit().index()] += 1;
    }
    match Suit::ALL.iter().map(|s| suits[s.index()]).max() {
        Some(4) => set.insert(Draw::FlushDraw),
        Some(3) => set.insert(Draw::BackdoorFlush),
        _ => {}
    }
    set
}

/// Bit `v` set for each rank value present; an Ace also sets bit 1.
fn rank_mask(cards: &[Card]) -> u16 {
    let mut mask = 0u16;
    for c in cards {
        mask |= 1 << c.rank().value();
        if c.rank() == Rank::Ace {
            mask |= 1 << 1;
        }
    }
    mask
}

fn window(mask: u16, low: u8, len: u8) -> u32 {
    let bits = (1u16 << len) - 1;
    ((mask >> low) & bits).count_ones()
}

fn straight_draws(mask: u16, set: &mut DrawSet) {
    // a made straight leaves nothing to draw to
    if (1..=10).any(|low| window(mask, low, 5) == 5) {
        return;
    }
    for low in 1..=11u8 {
        if window(mask, low, 4) == 4 {
            // A-2-3-4 and J-Q-K-A can only fill at one end
            if low == 1 || low == 11 {
                set.insert(Draw::InsideStraight);
            } else {
                set.insert(Draw::OpenStraight);
            }
        }
    }
    if (1..=10).any(|low| window(mask, low, 5) == 4) {
        set.insert(Draw::InsideStraight);
    }
    if (1..=12).any(|low| window(mask, low, 3) == 3) {
        set.insert(Draw::BackdoorStraight);
    }
}
