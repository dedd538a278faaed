use crate::cards::{Card, Rank, Suit};

/// Rank and suit tallies over a 5..=7 card pool.
/// Built once per evaluation and shared by all category detectors.
#[derive(Debug, Clone)]
pub(crate) struct Pool {
    /// Descending by rank, then suit.
    cards: Vec<Card>,
    rank_counts: [u8; 13],
    suit_counts: [u8; 4],
}

impl Pool {
    pub(crate) fn new(cards: &[Card]) -> Self {
        let mut sorted = cards.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));

        let mut rank_counts = [0u8; 13];
        let mut suit_counts = [0u8; 4];
        for c in &sorted {
            rank_counts[c.rank().index()] += 1;
            suit_counts[c.suit().index()] += 1;
        }
        Self { cards: sorted, rank_counts, suit_counts }
    }

    pub(crate) fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn len(&self) -> usize {
        self.cards.len()
    }

    pub(crate) fn count(&self, rank: Rank) -> u8 {
        self.rank_counts[rank.index()]
    }

    pub(crate) fn suit_count(&self, suit: Suit) -> u8 {
        self.suit_counts[suit.index()]
    }

    /// Ranks held at least `n` times, highest first.
    pub(crate) fn ranks_with_at_least(&self, n: u8) -> impl Iterator<Item = Rank> + '_ {
        Rank::ALL.iter().rev().copied().filter(move |&r| self.count(r) >= n)
    }

    /// Up to `n` cards of `rank`, highest suit first.
    pub(crate) fn of_rank(&self, rank: Rank, n: usize) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(move |c| c.rank() == rank).take(n)
    }

    /// Highest `n` cards whose rank is not in `exclude`.
    pub(crate) fn kickers<'a>(
        &'a self,
        exclude: &'a [Rank],
        n: usize,
    ) -> impl Iterator<Item = Card> + 'a {
        self.cards.iter().copied().filter(move |c| !exclude.contains(&c.rank())).take(n)
    }

    /// Cards of one suit, descending.
    pub(crate) fn suited(&self, suit: Suit) -> Vec<Card> {
        self.cards.iter().copied().filter(|c| c.suit() == suit).collect()
    }
}

/// Collect exactly five cards, or `None` if the iterator runs short.
pub(crate) fn five<I: IntoIterator<Item = Card>>(cards: I) -> Option<[Card; 5]> {
    let mut out = [Card::new(Rank::Two, Suit::Clubs); 5];
    let mut n = 0;
    for c in cards.into_iter().take(5) {
        out[n] = c;
        n += 1;
    }
    (n == 5).then_some(out)
}
