//! Ranks, suits and cards, with the short text form used across the crate:
//! rank then suit, as in `"As"`, `"Td"` or `"10d"`.

use std::fmt;
use std::str::FromStr;

const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Card ranks from Two (low) to Ace (high). The discriminant is the pip
/// value, with Jack to Ace as 11 to 14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Zero-based position in `ALL` (Two = 0, Ace = 12).
    pub const fn index(self) -> usize {
        self as usize - 2
    }

    /// Inverse of [`Rank::value`]; `None` outside 2..=14.
    pub fn from_value(v: u8) -> Option<Rank> {
        Rank::ALL.get(usize::from(v).checked_sub(2)?).copied()
    }

    pub const fn to_char(self) -> char {
        RANK_CHARS[self.index()]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("unknown rank '{0}'")]
    Unknown(String),
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let up = c.to_ascii_uppercase();
        RANK_CHARS
            .iter()
            .position(|&rc| rc == up)
            .map(|i| Rank::ALL[i])
            .ok_or_else(|| RankParseError::Unknown(c.to_string()))
    }
}

impl FromStr for Rank {
    type Err = RankParseError;

    /// One rank character, or `10` for Ten.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t == "10" {
            return Ok(Rank::Ten);
        }
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c),
            _ => Err(RankParseError::Unknown(s.to_string())),
        }
    }
}

/// The four suits. Ordering is only for sorting and the deck's canonical
/// order (clubs, diamonds, hearts, spades); no suit outranks another in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn to_char(self) -> char {
        SUIT_CHARS[self.index()]
    }

    pub const fn glyph(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    pub const fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("unknown suit '{0}'")]
    Unknown(String),
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let low = c.to_ascii_lowercase();
        SUIT_CHARS
            .iter()
            .position(|&sc| sc == low)
            .map(|i| Suit::ALL[i])
            .or_else(|| Suit::ALL.into_iter().find(|s| s.glyph() == c))
            .ok_or_else(|| SuitParseError::Unknown(c.to_string()))
    }
}

impl FromStr for Suit {
    type Err = SuitParseError;

    /// A suit letter or glyph, or the suit's English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        let name = t.to_ascii_lowercase();
        let name = name.strip_suffix('s').unwrap_or(&name);
        match name {
            "club" => Ok(Suit::Clubs),
            "diamond" => Ok(Suit::Diamonds),
            "heart" => Ok(Suit::Hearts),
            "spade" => Ok(Suit::Spades),
            _ => Err(SuitParseError::Unknown(s.to_string())),
        }
    }
}

/// A playing card.
///
/// ```
/// use holdem_rs::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.to_string(), "As");
/// assert_eq!("a♠".parse::<Card>().unwrap(), card);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// True when both cards share a rank but are not the same physical card.
    ///
    /// ```
    /// use holdem_rs::cards::{Card, Rank, Suit};
    ///
    /// let a = Card::new(Rank::Nine, Suit::Clubs);
    /// assert!(a.same_rank(Card::new(Rank::Nine, Suit::Hearts)));
    /// assert!(!a.same_rank(a));
    /// ```
    pub fn same_rank(self, other: Card) -> bool {
        self.rank == other.rank && self.suit != other.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("'{0}' is not a card")]
    Malformed(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        let suit = chars.next_back();
        let rank = chars.as_str();
        match suit {
            Some(suit) if !rank.is_empty() => Ok(Card::new(rank.parse()?, Suit::try_from(suit)?)),
            _ => Err(CardParseError::Malformed(s.to_string())),
        }
    }
}

/// Parse cards separated by whitespace or commas.
///
/// ```
/// use holdem_rs::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, Kd 10c").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Clubs));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_text() {
        assert_eq!(Rank::Ten.to_string(), "T");
        for s in ["T", "t", "10", " 10 "] {
            assert_eq!(s.parse::<Rank>(), Ok(Rank::Ten), "{s:?}");
        }
        assert!("1".parse::<Rank>().is_err());
        assert!("KK".parse::<Rank>().is_err());
    }

    #[test]
    fn suit_text() {
        assert_eq!(Suit::Hearts.to_string(), "h");
        assert_eq!("S".parse::<Suit>(), Ok(Suit::Spades));
        assert_eq!("♦".parse::<Suit>(), Ok(Suit::Diamonds));
        assert_eq!("Club".parse::<Suit>(), Ok(Suit::Clubs));
        assert_eq!("hearts".parse::<Suit>(), Ok(Suit::Hearts));
        assert!("x".parse::<Suit>().is_err());
        assert!(Suit::Hearts.is_red() && !Suit::Spades.is_red());
    }

    #[test]
    fn card_text() {
        let td = Card::new(Rank::Ten, Suit::Diamonds);
        assert_eq!(td.to_string(), "Td");
        assert_eq!("10d".parse::<Card>(), Ok(td));
        assert_eq!("td".parse::<Card>(), Ok(td));
        assert_eq!("T♦".parse::<Card>(), Ok(td));
    }

    #[test]
    fn malformed_cards() {
        for s in ["", "A", "s", "Ax", "1s", "AKs"] {
            assert!(s.parse::<Card>().is_err(), "{s:?}");
        }
        assert_eq!("A".parse::<Card>(), Err(CardParseError::Malformed("A".into())));
    }

    #[test]
    fn cards_sort_by_rank_then_suit() {
        let mut cards = parse_cards("Ks 2c As Ac").unwrap();
        cards.sort();
        assert_eq!(cards, parse_cards("2c Ks Ac As").unwrap());
    }

    #[test]
    fn rank_value_and_index_agree() {
        for (i, r) in Rank::ALL.into_iter().enumerate() {
            assert_eq!(r.index(), i);
            assert_eq!(Rank::from_value(r.value()), Some(r));
        }
        assert_eq!(Rank::Ace.value(), 14);
        assert_eq!(Rank::from_value(1), None);
        assert_eq!(Rank::from_value(15), None);
    }
}
