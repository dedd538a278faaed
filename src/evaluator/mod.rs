pub(crate) mod detector;
pub(crate) mod draws;
pub(crate) mod flush;
pub(crate) mod pool;
pub(crate) mod presence;
pub(crate) mod straight;

pub use draws::{detect_draws, Draw, DrawSet};
pub use presence::CategorySet;

use crate::cards::{Card, Rank};
use crate::hand::{first_duplicate, is_stage_len, validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use pool::Pool;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of ranking one hand. `value` drives ordering.
///
/// `best` is ordered most significant first: the primary group leads and
/// kickers trail, so two evaluations of the same category compare card by
/// card from the front. It holds five cards, or only the two hole cards when
/// a lone hand is ranked with no community cards.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    pub best: Vec<Card>,
    found: CategorySet,
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    fn new(category: Category, best: Vec<Card>, found: CategorySet) -> Self {
        let ranks: Vec<Rank> = best.iter().map(|c| c.rank()).collect();
        let value = HandValue::from_parts(category, &ranks);
        Self { category, best, found, value }
    }

    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }

    /// Every category matched while evaluating, not just the winning one.
    pub const fn found(&self) -> CategorySet {
        self.found
    }

    /// The `n` most significant cards of the best hand.
    pub fn top(&self, n: usize) -> &[Card] {
        &self.best[..n.min(self.best.len())]
    }
}

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and up to five ranks (most significant first) into a comparable value.
    /// Uses 6 bits per rank; missing trailing ranks pack as zero.
    pub fn from_parts(category: Category, ranks: &[Rank]) -> Self {
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 18 zero bits ]
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in ranks.iter().take(5).enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (*r as u64) << offset;
        }
        HandValue(v)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("no hands to evaluate")]
    NoHands,
    #[error("community cards must number 0, 3, 4 or 5, got {0}")]
    CommunityCount(usize),
    #[error("a pool needs 5 to 7 cards, got {0}")]
    PoolSize(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("{0} hands given with no community cards; only a single hand may be ranked pre-flop")]
    EmptyBoardMultipleHands(usize),
}

/// Outcome of ranking several hands against shared community cards.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Showdown {
    /// Indices into the input hands, ascending. Never empty; more than one on a tie.
    pub winners: Vec<usize>,
    pub category: Category,
    pub winning_cards: Vec<Card>,
    /// One evaluation per input hand, in input order.
    pub evaluations: Vec<Evaluation>,
}

/// Rank `hands` against `community` and report the winner set.
///
/// `community` must hold 0, 3, 4 or 5 cards. With no community cards exactly
/// one hand is allowed and is classified from its hole cards alone.
///
/// ```
/// use holdem_rs::cards::parse_cards;
/// use holdem_rs::evaluator::{evaluate, Category};
/// use holdem_rs::hand::HoleCards;
///
/// let board = parse_cards("Td Ts Ac Ad Ks").unwrap();
/// let hands = ["2c 2h".parse::<HoleCards>().unwrap(), "Kh Kc".parse().unwrap()];
/// let result = evaluate(&board, &hands).unwrap();
/// assert_eq!(result.winners, vec![1]);
/// assert_eq!(result.category, Category::FullHouse);
/// ```
pub fn evaluate(community: &[Card], hands: &[HoleCards]) -> Result<Showdown, EvalError> {
    if hands.is_empty() {
        return Err(EvalError::NoHands);
    }
    if !is_stage_len(community.len()) {
        return Err(EvalError::CommunityCount(community.len()));
    }
    if community.is_empty() && hands.len() > 1 {
        return Err(EvalError::EmptyBoardMultipleHands(hands.len()));
    }
    let all = community.iter().copied().chain(hands.iter().flat_map(|h| h.as_array()));
    if let Some(dup) = first_duplicate(all) {
        return Err(EvalError::DuplicateCard(dup));
    }

    let evaluations =
        hands.iter().map(|h| evaluate_hand(h, community)).collect::<Result<Vec<_>, _>>()?;

    let mut winners: Vec<usize> = Vec::new();
    for (i, ev) in evaluations.iter().enumerate() {
        match winners.first().map(|&w| ev.cmp(&evaluations[w])) {
            None | Some(Ordering::Equal) => winners.push(i),
            Some(Ordering::Greater) => {
                winners.clear();
                winners.push(i);
            }
            Some(Ordering::Less) => {}
        }
    }
    let lead = &evaluations[winners[0]];
    Ok(Showdown {
        category: lead.category,
        winning_cards: lead.best.clone(),
        winners,
        evaluations,
    })
}

/// Rank one hand. With an empty board this is the hole-only shortcut:
/// Pair if the two cards share a rank, otherwise HighCard.
pub fn evaluate_hand(hole: &HoleCards, community: &[Card]) -> Result<Evaluation, EvalError> {
    if community.is_empty() {
        let (high, low) = hole.high_low();
        let category = if hole.is_pair() { Category::Pair } else { Category::HighCard };
        let mut found = CategorySet::empty();
        found.insert(category);
        return Ok(Evaluation::new(category, vec![high, low], found));
    }
    let mut cards = Vec::with_capacity(community.len() + 2);
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(community);
    evaluate_pool(&cards)
}

/// Best five-card hand from a pool of 5 to 7 distinct cards.
///
/// Every category check runs from weakest to strongest over the whole pool;
/// each match overwrites the previous best, so the strongest wins.
pub fn evaluate_pool(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::PoolSize(cards.len()));
    }
    if let Some(dup) = first_duplicate(cards.iter().copied()) {
        return Err(EvalError::DuplicateCard(dup));
    }

    let pool = Pool::new(cards);
    let mut found = CategorySet::empty();
    let mut best: Option<(Category, [Card; 5])> = None;
    for detector in detector::DETECTORS.iter() {
        if let Some(five) = detector.detect(&pool, found) {
            found.insert(detector.category());
            best = Some((detector.category(), five));
        }
    }
    best.map(|(category, five)| Evaluation::new(category, five.to_vec(), found))
        .ok_or(EvalError::PoolSize(pool.len()))
}

/// Evaluate a Hold'em hand given hole cards and a board at any dealing stage.
///
/// ```
/// use holdem_rs::cards::{Card, Rank, Suit};
/// use holdem_rs::evaluator::{evaluate_holdem, Category};
/// use holdem_rs::hand::{Board, HoleCards};
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Hearts),
/// ).unwrap();
/// let board = Board::try_new(vec![
///     Card::new(Rank::Queen, Suit::Clubs),
///     Card::new(Rank::Jack, Suit::Diamonds),
///     Card::new(Rank::Nine, Suit::Hearts),
///     Card::new(Rank::Three, Suit::Spades),
///     Card::new(Rank::Two, Suit::Clubs),
/// ]).unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    evaluate_hand(hole, board.as_slice())
}

/// Compare two Hold'em hands on a shared board. Returns the ordering or a validation error.
///
/// ```
/// use holdem_rs::cards::parse_cards;
/// use holdem_rs::evaluator::compare_holdem;
/// use holdem_rs::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board = Board::try_new(parse_cards("Qc Jd 9h 3s 2c").unwrap()).unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let result = evaluate(board.as_slice(), &[*a, *b])?;
    Ok(result.evaluations[0].cmp(&result.evaluations[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Suit};

    fn hole(s: &str) -> HoleCards {
        s.parse().expect("valid hole cards")
    }

    fn ranks(cards: &[Card]) -> Vec<Rank> {
        cards.iter().map(|c| c.rank()).collect()
    }

    #[test]
    fn rejects_bad_community_counts() {
        let board = parse_cards("2c 3d").unwrap();
        let err = evaluate(&board, &[hole("As Kd")]).unwrap_err();
        assert_eq!(err, EvalError::CommunityCount(2));
    }

    #[test]
    fn rejects_empty_hand_list() {
        let board = parse_cards("2c 3d 4h").unwrap();
        assert_eq!(evaluate(&board, &[]).unwrap_err(), EvalError::NoHands);
    }

    #[test]
    fn rejects_duplicates_across_hands() {
        let board = parse_cards("2c 3d 4h").unwrap();
        let err = evaluate(&board, &[hole("As Kd"), hole("As Qd")]).unwrap_err();
        assert_eq!(err, EvalError::DuplicateCard(Card::new(Rank::Ace, Suit::Spades)));
    }

    #[test]
    fn rejects_two_hands_without_board() {
        let err = evaluate(&[], &[hole("As Kd"), hole("Qs Qd")]).unwrap_err();
        assert_eq!(err, EvalError::EmptyBoardMultipleHands(2));
    }

    #[test]
    fn pool_size_is_checked() {
        let four = parse_cards("2c 3d 4h 5s").unwrap();
        assert_eq!(evaluate_pool(&four).unwrap_err(), EvalError::PoolSize(4));
    }

    #[test]
    fn hole_only_shortcut() {
        let result = evaluate(&[], &[hole("9c 9d")]).unwrap();
        assert_eq!(result.category, Category::Pair);
        assert_eq!(result.winning_cards.len(), 2);

        let result = evaluate(&[], &[hole("4c Jd")]).unwrap();
        assert_eq!(result.category, Category::HighCard);
        assert_eq!(result.winning_cards[0].rank(), Rank::Jack);
    }

    #[test]
    fn full_house_beats_two_pair_on_paired_board() {
        let board = parse_cards("Td Ts Ac Ad Ks").unwrap();
        let result = evaluate(&board, &[hole("2c 2h"), hole("Kh Kc")]).unwrap();
        assert_eq!(result.winners, vec![1]);
        assert_eq!(result.category, Category::FullHouse);
        assert_eq!(
            ranks(&result.winning_cards),
            vec![Rank::King, Rank::King, Rank::King, Rank::Ace, Rank::Ace]
        );
        assert_eq!(result.evaluations[0].category, Category::TwoPair);
        assert_eq!(
            ranks(&result.evaluations[0].best),
            vec![Rank::Ace, Rank::Ace, Rank::Ten, Rank::Ten, Rank::King]
        );
    }

    #[test]
    fn found_records_weaker_categories() {
        let ev = evaluate_pool(&parse_cards("Kc Kd Kh Qs Qc 2d 3h").unwrap()).unwrap();
        assert_eq!(ev.category, Category::FullHouse);
        assert!(ev.found().contains(Category::Pair));
        assert!(ev.found().contains(Category::ThreeOfAKind));
        assert!(!ev.found().contains(Category::Flush));
    }

    #[test]
    fn wheel_ranks_below_six_high() {
        let wheel = evaluate_pool(&parse_cards("As 2d 3c 4h 5s").unwrap()).unwrap();
        let six = evaluate_pool(&parse_cards("6s 2d 3c 4h 5s").unwrap()).unwrap();
        assert_eq!(wheel.category, Category::Straight);
        assert!(six > wheel);
    }

    #[test]
    fn ties_keep_every_index() {
        let board = parse_cards("Ac Kd Qh Js 2c").unwrap();
        let result = evaluate(&board, &[hole("Tc 3d"), hole("9s 9d"), hole("Th 4s")]).unwrap();
        assert_eq!(result.winners, vec![0, 2]);
        assert_eq!(result.category, Category::Straight);
        assert_eq!(ranks(&result.evaluations[0].best), ranks(&result.evaluations[2].best));
    }

    #[test]
    fn hand_value_orders_category_first() {
        let low_sf = HandValue::from_parts(
            Category::StraightFlush,
            &[Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace],
        );
        let top_quads = HandValue::from_parts(
            Category::FourOfAKind,
            &[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace, Rank::King],
        );
        assert!(low_sf > top_quads);
    }
}
