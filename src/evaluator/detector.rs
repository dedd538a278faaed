use super::flush::{best_flush, flush_suit};
use super::pool::{five, Pool};
use super::presence::CategorySet;
use super::straight::best_straight;
use crate::cards::Card;
use crate::evaluator::Category;

/// Each detector finds the best five cards of its own category in a pool,
/// ordered most significant first.
///
/// Detectors run weakest to strongest. `found` holds the categories already
/// matched in this pass, so stronger checks can build on weaker ones.
pub(crate) trait CategoryDetector {
    fn category(&self) -> Category;
    fn detect(&self, pool: &Pool, found: CategorySet) -> Option<[Card; 5]>;
}

pub(crate) struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn detect(&self, pool: &Pool, _found: CategorySet) -> Option<[Card; 5]> {
        five(pool.cards().iter().copied())
    }
}

pub(crate) struct PairDetector;

impl CategoryDetector for PairDetector {
    fn category(&self) -> Category {
        Category::Pair
    }

    fn detect(&self, pool: &Pool, _found: CategorySet) -> Option<[Card; 5]> {
        let pair = pool.ranks_with_at_least(2).next()?;
        five(pool.of_rank(pair, 2).chain(pool.kickers(&[pair], 3)))
    }
}

pub(crate) struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn detect(&self, pool: &Pool, found: CategorySet) -> Option<[Card; 5]> {
        if !found.contains(Category::Pair) {
            return None;
        }
        let mut pairs = pool.ranks_with_at_least(2);
        let (high, low) = (pairs.next()?, pairs.next()?);
        five(pool.of_rank(high, 2).chain(pool.of_rank(low, 2)).chain(pool.kickers(&[high, low], 1)))
    }
}

pub(crate) struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn detect(&self, pool: &Pool, _found: CategorySet) -> Option<[Card; 5]> {
        let trips = pool.ranks_with_at_least(3).next()?;
        five(pool.of_rank(trips, 3).chain(pool.kickers(&[trips], 2)))
    }
}

pub(crate) struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn detect(&self, pool: &Pool, _found: CategorySet) -> Option<[Card; 5]> {
        best_straight(pool.cards())
    }
}

pub(crate) struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn detect(&self, pool: &Pool, _found: CategorySet) -> Option<[Card; 5]> {
        best_flush(pool)
    }
}

/// The highest triple is the primary group. The pair part is the next best
/// rank held at least twice, which may be a second triple.
pub(crate) struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn detect(&self, pool: &Pool, found: CategorySet) -> Option<[Card; 5]> {
        if !found.contains(Category::ThreeOfAKind) {
            return None;
        }
        let trips = pool.ranks_with_at_least(3).next()?;
        let pair = pool.ranks_with_at_least(2).find(|&r| r != trips)?;
        five(pool.of_rank(trips, 3).chain(pool.of_rank(pair, 2)))
    }
}

pub(crate) struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn detect(&self, pool: &Pool, _found: CategorySet) -> Option<[Card; 5]> {
        let quad = pool.ranks_with_at_least(4).next()?;
        five(pool.of_rank(quad, 4).chain(pool.kickers(&[quad], 1)))
    }
}

/// Only runs when this pass already found both a flush and a straight;
/// re-scans for a straight within the flush suit alone.
pub(crate) struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn detect(&self, pool: &Pool, found: CategorySet) -> Option<[Card; 5]> {
        if !(found.contains(Category::Flush) && found.contains(Category::Straight)) {
            return None;
        }
        best_straight(&pool.suited(flush_suit(pool)?))
    }
}

/// Weakest first; a later match overwrites an earlier one.
pub(crate) const DETECTORS: [&dyn CategoryDetector; 9] = [
    &HighCardDetector,
    &PairDetector,
    &TwoPairDetector,
    &ThreeOfAKindDetector,
    &StraightDetector,
    &FlushDetector,
    &FullHouseDetector,
    &FourOfAKindDetector,
    &StraightFlushDetector,
];
