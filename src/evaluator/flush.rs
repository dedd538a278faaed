use super::pool::{five, Pool};
use crate::cards::{Card, Suit};

/// The suit held five or more times, if any. A pool of seven can hold at most one.
pub(crate) fn flush_suit(pool: &Pool) -> Option<Suit> {
    Suit::ALL.iter().copied().find(|&s| pool.suit_count(s) >= 5)
}

/// Top five cards of the flush suit.
pub(crate) fn best_flush(pool: &Pool) -> Option<[Card; 5]> {
    let suit = flush_suit(pool)?;
    five(pool.suited(suit))
}
