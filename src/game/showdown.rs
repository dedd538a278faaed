use super::{ActionError, Game, HandResult, TurnState};
use crate::evaluator::evaluate;
use crate::events::TableEvent;
use crate::hand::HoleCards;

impl Game {
    /// Rank the hands still in, split the pot among the winners and check
    /// whether the session is decided.
    ///
    /// Only the community cards revealed so far are used, so a hand won by
    /// folds is ranked on however much of the board was out. Odd chips go
    /// one at a time to winners in seat order starting from the small blind.
    pub(crate) fn showdown(&mut self) -> Result<(), ActionError> {
        let contenders: Vec<(usize, HoleCards)> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.playing)
            .filter_map(|(seat, p)| p.hole.map(|h| (seat, h)))
            .collect();
        let hands: Vec<HoleCards> = contenders.iter().map(|&(_, h)| h).collect();
        let outcome = evaluate(self.community(), &hands)?;

        for &(seat, cards) in &contenders {
            self.emit(TableEvent::HoleCards { seat, cards: Some(cards) });
        }

        let seats = self.players.len();
        let mut winners: Vec<usize> = outcome.winners.iter().map(|&i| contenders[i].0).collect();
        winners.sort_by_key(|&seat| (seat + seats - self.small_blind) % seats);

        let pot = self.pot();
        let count = winners.len() as u64;
        let mut odd = pot % count;
        let mut payouts: Vec<(usize, u64)> = winners
            .into_iter()
            .map(|seat| {
                let extra = u64::from(odd > 0);
                odd -= extra;
                (seat, pot / count + extra)
            })
            .collect();
        payouts.sort_unstable();

        for p in &mut self.players {
            p.bet = 0;
        }
        for &(seat, amount) in &payouts {
            self.players[seat].chips += amount;
        }
        for seat in 0..seats {
            self.emit_chips(seat);
        }

        if payouts.len() > 1 {
            let seats = payouts.iter().map(|&(s, _)| s).collect();
            self.emit(TableEvent::Tie { seats });
        }
        for &(seat, amount) in &payouts {
            let name = self.players[seat].name.clone();
            log::info!("{name} wins {amount} with {}", outcome.category);
            self.emit(TableEvent::Winner { seat, name, amount, category: outcome.category });
        }
        self.last_result = Some(HandResult {
            payouts,
            category: outcome.category,
            winning_cards: outcome.winning_cards,
        });

        for seat in 0..seats {
            if self.players[seat].active && self.players[seat].chips == 0 {
                let p = &mut self.players[seat];
                p.active = false;
                p.playing = false;
                log::info!("{} is out of chips", p.name);
                self.emit_status(seat);
            }
        }

        self.turn = TurnState::HandComplete;
        self.emit(TableEvent::HandComplete);
        let human_broke = self.players.get(self.human).map_or(true, |p| p.chips == 0);
        let with_chips = self.players.iter().filter(|p| p.chips > 0).count();
        if human_broke || with_chips < 2 {
            self.end_session();
        }
        Ok(())
    }

    pub(crate) fn end_session(&mut self) {
        let won = self.players.get(self.human).is_some_and(|p| p.chips > 0);
        log::info!("session over; human {}", if won { "won" } else { "lost" });
        self.turn = TurnState::GameOver { won };
        self.emit(TableEvent::GameOver { won });
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::table;
    use super::*;
    use crate::agents::Wager;
    use crate::cards::{parse_cards, Card};
    use crate::evaluator::Category;

    fn five(s: &str) -> [Card; 5] {
        parse_cards(s).unwrap().try_into().unwrap()
    }

    fn check_down(g: &mut Game) {
        while !matches!(g.turn(), TurnState::HandComplete | TurnState::GameOver { .. }) {
            match g.turn() {
                TurnState::PhaseComplete => g.start_next_phase().unwrap(),
                _ => g.act(Wager::Chips(0)).unwrap(),
            }
        }
    }

    #[test]
    fn best_hand_takes_the_pot() {
        let mut g = table(&[500, 500, 500]);
        g.start_hand().unwrap();
        g.rig_community(five("Td Ts Ac Ad Ks"));
        g.rig_hole(0, "2c 2h".parse().unwrap());
        g.rig_hole(1, "Kh Kc".parse().unwrap());
        g.rig_hole(2, "3c 4h".parse().unwrap());
        check_down(&mut g);
        let result = g.last_result().unwrap();
        assert_eq!(result.category, Category::FullHouse);
        assert_eq!(result.payouts, vec![(1, 30)]);
        assert_eq!(g.players[1].chips, 520);
        assert_eq!(g.pot(), 0);
    }

    #[test]
    fn odd_chip_goes_to_first_winner_from_small_blind() {
        let mut g = table(&[500, 500, 500]);
        g.start_hand().unwrap();
        g.rig_community(five("Ah Kd 8c 7s 2h"));
        g.rig_hole(0, "3c 4d".parse().unwrap());
        g.rig_hole(1, "Qc Jd".parse().unwrap());
        g.rig_hole(2, "Qd Js".parse().unwrap());
        // small blind is all in for 11 total, so the pot is 33
        g.rig_chips(1, 6);
        g.act(Wager::Chips(0)).unwrap();
        g.act(Wager::Chips(100)).unwrap();
        g.act(Wager::Chips(0)).unwrap();
        g.act(Wager::Chips(0)).unwrap();
        assert_eq!(g.pot(), 33);
        g.start_next_phase().unwrap();
        let result = g.last_result().unwrap();
        assert_eq!(result.payouts, vec![(1, 17), (2, 16)]);
        assert!(g.drain_events().contains(&TableEvent::Tie { seats: vec![1, 2] }));
        assert_eq!(g.turn(), TurnState::HandComplete);
    }

    #[test]
    fn busting_the_human_ends_the_session() {
        let mut g = table(&[500, 500]);
        g.start_hand().unwrap();
        g.rig_community(five("9c 9d 4h 5s 7c"));
        g.rig_hole(0, "2c 3d".parse().unwrap());
        g.rig_hole(1, "9h 9s".parse().unwrap());
        // heads up: seat 0 is big blind and seat 1 acts first
        assert_eq!(g.big_blind_seat(), 0);
        g.act(Wager::Chips(1000)).unwrap();
        g.act(Wager::Chips(0)).unwrap();
        assert_eq!(g.turn(), TurnState::PhaseComplete);
        g.start_next_phase().unwrap();
        assert_eq!(g.turn(), TurnState::GameOver { won: false });
        assert!(!g.players[0].active);
        assert_eq!(g.players[1].chips, 1000);
        assert_eq!(g.start_hand(), Err(ActionError::SessionOver));
    }
}
