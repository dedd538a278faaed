use crate::cards::{Card, Rank};

/// Highest straight among `cards`, which must be sorted by descending rank.
///
/// Repeated ranks are skipped without breaking a run. The wheel (A-2-3-4-5)
/// is returned as 5-4-3-2-A so the Ace sits in the least significant slot.
pub(crate) fn best_straight(cards: &[Card]) -> Option<[Card; 5]> {
    let mut run: Vec<Card> = Vec::with_capacity(5);
    for &c in cards {
        match run.last().map(|p| p.rank()) {
            Some(prev) if prev == c.rank() => continue,
            Some(prev) if prev.value() == c.rank().value() + 1 => run.push(c),
            _ => {
                run.clear();
                run.push(c);
            }
        }
        if run.len() == 5 {
            return run.try_into().ok();
        }
    }

    let starts_at_five = run.first().map(|c| c.rank()) == Some(Rank::Five);
    if run.len() == 4 && starts_at_five {
        if let Some(&ace) = cards.first().filter(|c| c.rank() == Rank::Ace) {
            run.push(ace);
            return run.try_into().ok();
        }
    }
    None
}
