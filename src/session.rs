//! A playing session: one [`Game`], the bots seated at it, the timers that
//! pace them and the observer that hears about every change.
//!
//! Commands come in through `&mut self`, so one transition always finishes
//! before the next starts. Timers only fire from [`Session::tick`], between
//! commands.

use crate::agents::{AgentTable, BotBrain, Personality, Wager};
use crate::config::{ConfigError, SessionConfig};
use crate::deck::Deck;
use crate::events::TableObserver;
use crate::game::{ActionError, Game, Player};
use crate::scheduler::{Scheduler, TimerKind};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const BOT_NAMES: [&str; 12] = [
    "Ada", "Boris", "Carmen", "Dmitri", "Elena", "Farid", "Greta", "Hugo", "Imani", "Jonas",
    "Keiko", "Luca",
];

pub struct Session<O: TableObserver> {
    config: SessionConfig,
    game: Game,
    agents: AgentTable,
    scheduler: Scheduler,
    observer: O,
    rng: ChaCha8Rng,
}

impl<O: TableObserver> std::fmt::Debug for Session<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("game", &self.game)
            .field("agents", &self.agents)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl<O: TableObserver> Session<O> {
    /// Validate `config`, seat the table and start the blind clock.
    pub fn new(config: SessionConfig, observer: O) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::rng().random()),
        };
        let (game, agents) = seat_table(&config, &mut rng);
        let mut session =
            Self { config, game, agents, scheduler: Scheduler::new(), observer, rng };
        session.open();
        Ok(session)
    }

    /// Returns the table
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the settings this session was seated with
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Returns the session clock in milliseconds
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn start_hand(&mut self) -> Result<(), ActionError> {
        let result = self.game.start_hand();
        self.settle(result, "start hand")
    }

    pub fn start_next_phase(&mut self) -> Result<(), ActionError> {
        let result = self.game.start_next_phase();
        self.settle(result, "next phase")
    }

    /// Submit the human's wager. Rejected unless the human is the seat
    /// being asked to act.
    pub fn submit_bet(&mut self, wager: Wager) -> Result<(), ActionError> {
        let human = self.game.human_seat();
        let result = match self.game.acting_seat() {
            Some(seat) if seat != human && self.agents.has_agent(seat) => {
                Err(ActionError::BotSeat(seat))
            }
            _ => self.game.accept_bet(human, wager),
        };
        self.settle(result, "human bet")
    }

    /// Throw the current table away and seat a fresh one with the same
    /// settings. Safe from any state; pending timers are dropped first.
    pub fn new_session(&mut self) {
        self.scheduler.clear();
        let (game, agents) = seat_table(&self.config, &mut self.rng);
        self.game = game;
        self.agents = agents;
        self.open();
    }

    /// Like [`Session::new_session`] with different settings. Nothing changes
    /// if `config` is invalid.
    pub fn reconfigure(&mut self, config: SessionConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(seed) = config.seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        self.config = config;
        self.new_session();
        Ok(())
    }

    /// Move the clock to `now_ms`, firing every timer due on the way in order.
    pub fn tick(&mut self, now_ms: u64) {
        while let Some(timer) = self.scheduler.next_fired(now_ms) {
            match timer {
                TimerKind::BlindIncrease => {
                    self.game.increase_pending_minimum_bet();
                }
                TimerKind::BotTurn { seat } => self.play_bot(seat),
            }
            self.flush();
        }
    }

    /// Advance the clock just far enough for every bot due to act to do so.
    /// Stops when the human must act or the betting round is over.
    pub fn run_bots(&mut self) {
        while let Some(seat) = self.game.acting_seat() {
            if !self.agents.has_agent(seat) {
                break;
            }
            let bot = TimerKind::BotTurn { seat };
            if !self.scheduler.is_pending(bot) {
                self.scheduler.schedule_once(0, bot);
            }
            match self.scheduler.next_due() {
                Some(due) => self.tick(due),
                None => break,
            }
        }
    }

    fn play_bot(&mut self, seat: usize) {
        if self.game.acting_seat() != Some(seat) {
            log::trace!("stale bot timer for seat {seat}");
            return;
        }
        let wager = match self.game.bet_context(seat) {
            Some(ctx) => self.agents.decide(&ctx),
            None => None,
        };
        let Some(wager) = wager else {
            log::warn!("seat {seat} has no bot to act for it");
            return;
        };
        if let Err(err) = self.game.accept_bet(seat, wager) {
            log::warn!("bot at seat {seat} was refused: {err}");
        }
    }

    fn open(&mut self) {
        self.game.announce_seats();
        self.scheduler.schedule_every(self.config.blind_interval_ms, TimerKind::BlindIncrease);
        log::info!(
            "new session: {} seats, human at seat {}",
            self.game.players().len(),
            self.game.human_seat()
        );
        self.flush();
    }

    fn settle(&mut self, result: Result<(), ActionError>, what: &str) -> Result<(), ActionError> {
        if let Err(err) = &result {
            log::warn!("{what} rejected: {err}");
        }
        self.flush();
        result
    }

    /// Hand queued events to the observer and arm the think timer when a
    /// bot is up.
    fn flush(&mut self) {
        for event in self.game.drain_events() {
            self.observer.notify(&event);
        }
        if let Some(seat) = self.game.acting_seat() {
            let bot = TimerKind::BotTurn { seat };
            if self.agents.has_agent(seat) && !self.scheduler.is_pending(bot) {
                self.scheduler.schedule_once(self.config.bot_delay_ms, bot);
            }
        }
    }
}

/// Seat the human at a random chair and fill the rest with named bots.
fn seat_table(config: &SessionConfig, rng: &mut ChaCha8Rng) -> (Game, AgentTable) {
    let human = rng.random_range(0..config.players);
    let mut names = BOT_NAMES.to_vec();
    names.shuffle(rng);
    let mut names = names.into_iter();

    let mut agents = AgentTable::for_seats(config.players);
    let mut players = Vec::with_capacity(config.players);
    for seat in 0..config.players {
        if seat == human {
            players.push(Player::human(config.player_name.trim(), config.starting_chips));
            continue;
        }
        let name = names.next().map_or_else(|| format!("Bot {seat}"), str::to_string);
        let personality = Personality::new(rng.random_range(0..=Personality::MAX));
        players.push(Player::bot(name, config.starting_chips, personality));
        agents.set_agent(seat, Some(Box::new(BotBrain::seeded(rng.random()))));
    }
    let deck = Deck::seeded(rng.random());
    (Game::new(players, human, config.minimum_bet, deck), agents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventLog, TableEvent};
    use crate::game::TurnState;

    fn session(players: usize, seed: u64) -> Session<EventLog> {
        let config = SessionConfig { players, seed: Some(seed), ..Default::default() };
        Session::new(config, EventLog::new()).unwrap()
    }

    #[test]
    fn seating_is_reproducible() {
        let a = session(6, 99);
        let b = session(6, 99);
        assert_eq!(a.game().human_seat(), b.game().human_seat());
        let names = |s: &Session<EventLog>| {
            s.game().players().iter().map(|p| p.name().to_string()).collect::<Vec<_>>()
        };
        assert_eq!(names(&a), names(&b));
        let bots: Vec<_> = a.game().players().iter().filter(|p| p.is_bot()).collect();
        assert_eq!(bots.len(), 5);
        let mut unique: Vec<_> = bots.iter().map(|p| p.name()).collect();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SessionConfig { players: 12, ..Default::default() };
        assert!(Session::new(config, EventLog::new()).is_err());
    }

    #[test]
    fn bots_wait_for_their_think_time() {
        let mut s = session(5, 3);
        s.start_hand().unwrap();
        let seat = s.game().acting_seat().expect("a seat must be asked to act");
        assert_ne!(seat, s.game().human_seat(), "a bot must act first for this seed");
        s.tick(100);
        assert_eq!(s.game().acting_seat(), Some(seat));
        s.tick(750);
        assert_ne!(s.game().acting_seat(), Some(seat));
    }

    #[test]
    fn human_cannot_bet_on_a_bot_turn() {
        let mut s = session(4, 5);
        s.start_hand().unwrap();
        let seat = s.game().acting_seat().expect("a seat must be asked to act");
        assert_ne!(seat, s.game().human_seat(), "a bot must act first for this seed");
        let before = s.game().pot();
        assert_eq!(s.submit_bet(Wager::Chips(10)), Err(ActionError::BotSeat(seat)));
        assert_eq!(s.game().pot(), before);
    }

    #[test]
    fn blind_timer_raises_next_hand() {
        let config = SessionConfig {
            players: 3,
            seed: Some(1),
            blind_interval_ms: 1_000,
            ..Default::default()
        };
        let mut s = Session::new(config, EventLog::new()).unwrap();
        s.tick(2_500);
        assert_eq!(s.game().pending_minimum_bet(), 40);
        assert_eq!(s.game().minimum_bet(), 10);
        s.start_hand().unwrap();
        assert_eq!(s.game().minimum_bet(), 40);
        assert!(s.observer().events().contains(&TableEvent::MinimumBetChanged { amount: 40 }));
    }

    #[test]
    fn new_session_from_a_parked_human_turn() {
        let mut s = session(3, 8);
        s.start_hand().unwrap();
        s.run_bots();
        s.new_session();
        assert_eq!(s.game().turn(), TurnState::Idle);
        assert_eq!(s.game().hand_number(), 0);
        assert!(s.game().players().iter().all(|p| p.chips() == 500));
        // only the blind clock survives
        assert!((0..3).all(|seat| !s.scheduler.is_pending(TimerKind::BotTurn { seat })));
        assert!(s.scheduler.is_pending(TimerKind::BlindIncrease));
    }

    #[test]
    fn a_whole_session_runs_to_completion() {
        let mut s = session(4, 21);
        for _ in 0..500 {
            match s.game().turn() {
                TurnState::GameOver { .. } => break,
                TurnState::Idle | TurnState::HandComplete => s.start_hand().unwrap(),
                TurnState::PhaseComplete => s.start_next_phase().unwrap(),
                TurnState::AwaitingAction(seat) if seat == s.game().human_seat() => {
                    s.submit_bet(Wager::Chips(0)).unwrap()
                }
                TurnState::AwaitingAction(_) => s.run_bots(),
            }
            let chips: u64 = s.game().players().iter().map(|p| p.chips() + p.bet()).sum();
            assert_eq!(chips, 2_000, "chips are never created or lost");
        }
    }
}
