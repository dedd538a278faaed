use crate::cards::{Card, Rank, Suit};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A 52-card deck with a live count of undrawn cards.
///
/// Cards `[0, remaining)` are still in the deck. `draw` picks one of them
/// uniformly at random and swaps the last undrawn card into its slot, so no
/// card is returned twice until [`Deck::refill`].
#[derive(Debug, Clone)]
pub struct Deck {
    cards: [Card; 52],
    remaining: usize,
    rng: ChaCha8Rng,
}

impl Deck {
    /// Canonical order: clubs, diamonds, hearts, spades; Two..Ace within each suit.
    pub const CANONICAL: [Card; 52] = canonical();

    /// A full deck driven by an RNG seeded from `seed`.
    ///
    /// ```
    /// use holdem_rs::deck::Deck;
    ///
    /// let deck = Deck::seeded(42);
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// A full deck seeded from the thread RNG.
    pub fn unseeded() -> Self {
        Self::seeded(rand::rng().random())
    }

    pub fn with_rng(rng: ChaCha8Rng) -> Self {
        Self { cards: Self::CANONICAL, remaining: 52, rng }
    }

    pub fn len(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Undrawn cards, in their current slot order.
    pub fn undrawn(&self) -> &[Card] {
        &self.cards[..self.remaining]
    }

    /// Restore all 52 cards in canonical order.
    pub fn refill(&mut self) {
        self.cards = Self::CANONICAL;
        self.remaining = 52;
    }

    /// Draw a uniformly random undrawn card, or `None` once exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.rng.random_range(0..self.remaining);
        let card = self.cards[idx];
        self.remaining -= 1;
        self.cards.swap(idx, self.remaining);
        Some(card)
    }

    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map_while(|_| self.draw()).collect()
    }
}

const fn canonical() -> [Card; 52] {
    const SUITS: [Suit; 4] = Suit::ALL;
    const RANKS: [Rank; 13] = Rank::ALL;
    let mut out = [Card::new(Rank::Two, Suit::Clubs); 52];
    let mut s = 0;
    while s < 4 {
        let mut r = 0;
        while r < 13 {
            out[s * 13 + r] = Card::new(RANKS[r], SUITS[s]);
            r += 1;
        }
        s += 1;
    }
    out
}
