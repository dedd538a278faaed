//! Hole cards and the community board, with the shape checks every
//! evaluator entry point relies on.

use crate::cards::{parse_cards, Card, CardParseError};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("both hole cards are {0}")]
    SameCard(Card),
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("a board holds at most five cards, got {0}")]
    BoardTooLong(usize),
    #[error("community cards must number 0, 3, 4 or 5, got {0}")]
    CommunityCount(usize),
    #[error("{0} is on the board twice")]
    DuplicateOnBoard(Card),
    #[error("{0} is both in the hand and on the board")]
    SharedCard(Card),
    #[error(transparent)]
    Parse(#[from] CardParseError),
}

/// The first card to repeat in `cards`, if any.
pub(crate) fn first_duplicate<I>(cards: I) -> Option<Card>
where
    I: IntoIterator<Item = Card>,
{
    let mut seen = HashSet::new();
    cards.into_iter().find(|&c| !seen.insert(c))
}

/// Community card counts that occur during a hand: none, flop, turn, river.
pub(crate) fn is_stage_len(n: usize) -> bool {
    matches!(n, 0 | 3 | 4 | 5)
}

/// A player's two private cards.
///
/// ```
/// use holdem_rs::hand::HoleCards;
///
/// let hole: HoleCards = "Kh 7h".parse().unwrap();
/// assert!(hole.is_suited());
/// assert_eq!(hole.high_low().0.to_string(), "Kh");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::SameCard(a));
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match *slice {
            [a, b] => Self::try_new(a, b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    /// Returns the card dealt first
    pub fn first(&self) -> Card {
        self.0
    }

    /// Returns the card dealt second
    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 == card || self.1 == card
    }

    /// Higher card first; suit breaks rank ties.
    pub fn high_low(&self) -> (Card, Card) {
        (self.0.max(self.1), self.0.min(self.1))
    }

    pub fn is_pair(&self) -> bool {
        self.0.same_rank(self.1)
    }

    pub fn is_suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }
}

impl FromStr for HoleCards {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&parse_cards(s)?)
    }
}

/// Face-up community cards: at most five, all distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > 5 {
            return Err(HandError::BoardTooLong(cards.len()));
        }
        if let Some(dup) = first_duplicate(cards.iter().copied()) {
            return Err(HandError::DuplicateOnBoard(dup));
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Whether the board is at a dealing stage: none, flop, turn or river.
    pub fn is_stage(&self) -> bool {
        is_stage_len(self.cards.len())
    }
}

impl FromStr for Board {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_new(parse_cards(s)?)
    }
}

/// Check that `hole` can be played on `board`: the board is at a dealing
/// stage and shares no card with the hand.
///
/// ```
/// use holdem_rs::hand::{validate_holdem, Board, HandError, HoleCards};
///
/// let hole: HoleCards = "As Kd".parse().unwrap();
/// assert!(validate_holdem(&hole, &"2c 3c 4c".parse().unwrap()).is_ok());
/// assert_eq!(
///     validate_holdem(&hole, &"2c 3c".parse::<Board>().unwrap()),
///     Err(HandError::CommunityCount(2)),
/// );
/// ```
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if !board.is_stage() {
        return Err(HandError::CommunityCount(board.len()));
    }
    match board.as_slice().iter().find(|&&c| hole.contains(c)) {
        Some(&shared) => Err(HandError::SharedCard(shared)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_cards_are_two_distinct_cards() {
        let ace: Card = "As".parse().unwrap();
        assert_eq!(HoleCards::try_new(ace, ace), Err(HandError::SameCard(ace)));
        assert_eq!("As".parse::<HoleCards>(), Err(HandError::HoleCount(1)));
        assert_eq!("As Kd Qh".parse::<HoleCards>(), Err(HandError::HoleCount(3)));
        assert!(matches!("As Kx".parse::<HoleCards>(), Err(HandError::Parse(_))));
    }

    #[test]
    fn hole_card_shape() {
        let hole: HoleCards = "7h Kh".parse().unwrap();
        assert!(hole.is_suited() && !hole.is_pair());
        assert_eq!(hole.first().to_string(), "7h");
        assert_eq!(hole.high_low().0.to_string(), "Kh");
        assert!("9c 9d".parse::<HoleCards>().unwrap().is_pair());
    }

    #[test]
    fn board_limits() {
        assert_eq!("2c 3c 4c 5c 6c 7c".parse::<Board>(), Err(HandError::BoardTooLong(6)));
        let two: Card = "2c".parse().unwrap();
        assert_eq!("2c 5d 2c".parse::<Board>(), Err(HandError::DuplicateOnBoard(two)));
        let turn: Board = "2c, 3c 4c 9s".parse().unwrap();
        assert!(turn.is_stage());
        assert!(!"2c".parse::<Board>().unwrap().is_stage());
        assert!(Board::default().is_stage());
    }

    #[test]
    fn hand_and_board_may_not_share_a_card() {
        let hole: HoleCards = "As Kd".parse().unwrap();
        let board: Board = "2c As 3c".parse().unwrap();
        let ace: Card = "As".parse().unwrap();
        assert_eq!(validate_holdem(&hole, &board), Err(HandError::SharedCard(ace)));
    }

    #[test]
    fn first_duplicate_finds_the_repeat() {
        let cards = parse_cards("Ah 2c Kd 2c Ah").unwrap();
        assert_eq!(first_duplicate(cards.iter().copied()), Some(cards[1]));
        assert_eq!(first_duplicate(cards[..3].iter().copied()), None);
    }
}
