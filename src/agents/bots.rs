use super::scoring::{postflop_score, preflop_score, size_bet, HandScore};
use super::{BetContext, PlayerAgent, Wager};
use crate::game::Phase;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Score-driven bot.
///
/// Each decision scores the hand, perturbs the score with seeded noise,
/// scales it by the seat's personality and sizes the wager from that.
#[derive(Debug, Clone)]
pub struct BotBrain {
    rng: ChaCha8Rng,
    jitter: bool,
}

impl BotBrain {
    /// A bot whose noise is reproducible from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), jitter: true }
    }

    /// A bot seeded from the thread RNG.
    pub fn unseeded() -> Self {
        Self::seeded(rand::rng().random())
    }

    /// Turn score noise on or off. Without it decisions are a pure function
    /// of the context.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    fn score(&self, ctx: &BetContext<'_>) -> HandScore {
        if ctx.phase == Phase::PreFlop {
            return preflop_score(&ctx.hole);
        }
        match postflop_score(&ctx.hole, ctx.community, ctx.phase) {
            Ok(score) => score,
            Err(err) => {
                log::warn!("seat {} could not score its hand: {err}", ctx.seat);
                HandScore::default()
            }
        }
    }

    /// Multiply by `100 / (29 + r)` for `r` in `0..72`, which is 1, 2 or 3.
    /// A score of exactly one first risks being zeroed.
    fn perturb(&mut self, mut score: u64) -> u64 {
        if score == 1 {
            score *= 100 / (51 + self.rng.random_range(0..60u64));
        }
        score * (100 / (29 + self.rng.random_range(0..72u64)))
    }
}

impl PlayerAgent for BotBrain {
    fn decide(&mut self, ctx: &BetContext<'_>) -> Wager {
        let mut hand = self.score(ctx);
        if self.jitter {
            hand.score = self.perturb(hand.score);
        }
        hand.score = ctx.personality.scale(hand.score);
        let wager = size_bet(hand, ctx);
        log::debug!(
            "seat {} scored {} (marginal: {}) facing {} -> {wager}",
            ctx.seat,
            hand.score,
            hand.marginal,
            ctx.to_call
        );
        wager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::Personality;
    use crate::cards::parse_cards;

    fn ctx<'a>(hole: &str, community: &'a [crate::cards::Card], phase: Phase) -> BetContext<'a> {
        BetContext {
            seat: 1,
            phase,
            hole: hole.parse().unwrap(),
            community,
            minimum_bet: 10,
            own_bet: 0,
            own_chips: 500,
            to_call: 10,
            shortest_stack: 500,
            first_pass_done: false,
            personality: Personality::new(5),
        }
    }

    #[test]
    fn same_seed_same_decisions() {
        let board = parse_cards("Ah 7c 2d").unwrap();
        let mut a = BotBrain::seeded(11);
        let mut b = BotBrain::seeded(11);
        for hole in ["As Kd", "9c 8c", "2h 7s", "Qd Qh"] {
            let c = ctx(hole, &board, Phase::Flop);
            assert_eq!(a.decide(&c), b.decide(&c));
        }
    }

    #[test]
    fn perturbation_stays_within_three_times() {
        let mut bot = BotBrain::seeded(3);
        for _ in 0..500 {
            let s = bot.perturb(10);
            assert!((10..=30).contains(&s), "got {s}");
            assert!(bot.perturb(1) <= 3);
        }
    }

    #[test]
    fn without_jitter_trash_folds_to_a_raise() {
        let mut bot = BotBrain::seeded(0).with_jitter(false);
        let mut c = ctx("7d 2c", &[], Phase::PreFlop);
        c.to_call = 40;
        assert_eq!(bot.decide(&c), Wager::Fold);
    }

    #[test]
    fn without_jitter_aces_raise() {
        let mut bot = BotBrain::seeded(0).with_jitter(false);
        let c = ctx("As Ah", &[], Phase::PreFlop);
        // 8 * 10 = 80, rounded (80 + 7) / 10 * 10
        assert_eq!(bot.decide(&c), Wager::Chips(80));
    }

    #[test]
    fn aggressive_bot_doubles() {
        let mut bot = BotBrain::seeded(0).with_jitter(false);
        let mut c = ctx("As Ah", &[], Phase::PreFlop);
        c.personality = Personality::new(9);
        // 16 * 10 = 160
        assert_eq!(bot.decide(&c), Wager::Chips(160));
    }
}
