use super::Game;

/// The big blind that follows `current` on the escalation schedule:
/// doubling below 40, then steps of 30 below 100, then steps of 50.
///
/// ```
/// use holdem_rs::game::next_minimum_bet;
///
/// assert_eq!(next_minimum_bet(10), 20);
/// assert_eq!(next_minimum_bet(40), 70);
/// assert_eq!(next_minimum_bet(100), 150);
/// ```
pub fn next_minimum_bet(current: u64) -> u64 {
    match current {
        c if c < 40 => c * 2,
        c if c < 100 => c + 30,
        c => c + 50,
    }
}

impl Game {
    /// Step the pending big blind up the schedule. It takes effect when the
    /// next hand is dealt.
    pub fn increase_pending_minimum_bet(&mut self) -> u64 {
        self.pending_minimum_bet = next_minimum_bet(self.pending_minimum_bet);
        log::info!("blinds will rise to {} next hand", self.pending_minimum_bet);
        self.pending_minimum_bet
    }

    /// Each blind moves to the next active seat after where it was; the big
    /// blind skips ahead again if it would land on the small blind.
    pub(crate) fn rotate_blinds(&mut self) {
        self.small_blind = self.next_active_after(self.small_blind);
        self.big_blind = self.next_active_after(self.big_blind);
        if self.big_blind == self.small_blind {
            self.big_blind = self.next_active_after(self.big_blind);
        }
    }

    fn next_active_after(&self, seat: usize) -> usize {
        let n = self.players.len();
        (1..=n).map(|step| (seat + step) % n).find(|&s| self.players[s].active).unwrap_or(seat)
    }
}
