use holdem_rs::agents::Wager;
use holdem_rs::config::SessionConfig;
use holdem_rs::engine::TableEngine;
use holdem_rs::events::{EventLog, TableEvent};
use holdem_rs::game::{ActionError, TurnState};
use holdem_rs::session::Session;

fn config(players: usize, seed: u64) -> SessionConfig {
    SessionConfig { players, seed: Some(seed), blind_interval_ms: 0, ..Default::default() }
}

/// Play every hand to the end, the human always calling.
fn play_out(s: &mut Session<EventLog>, max_hands: u64) {
    while s.game().hand_number() < max_hands {
        match s.game().turn() {
            TurnState::Idle | TurnState::HandComplete => s.start_hand().unwrap(),
            TurnState::PhaseComplete => s.start_next_phase().unwrap(),
            TurnState::AwaitingAction(seat) if seat == s.game().human_seat() => {
                s.check_call().unwrap()
            }
            TurnState::AwaitingAction(_) => s.run_bots(),
            TurnState::GameOver { .. } => return,
        }
    }
}

fn chips(s: &Session<EventLog>) -> u64 {
    s.game().players().iter().map(|p| p.chips() + p.bet()).sum()
}

#[test]
fn same_seed_same_session() {
    let mut a = Session::new(config(4, 99), EventLog::new()).unwrap();
    let mut b = Session::new(config(4, 99), EventLog::new()).unwrap();
    play_out(&mut a, 5);
    play_out(&mut b, 5);
    assert_eq!(a.observer().events(), b.observer().events());
    assert_eq!(a.game().human_seat(), b.game().human_seat());
}

#[test]
fn chips_are_conserved_over_many_hands() {
    for seed in 0..6 {
        let mut s = Session::new(config(5, seed), EventLog::new()).unwrap();
        play_out(&mut s, 30);
        assert_eq!(chips(&s), 2_500, "seed {seed}");
    }
}

#[test]
fn opening_announces_every_seat() {
    let s = Session::new(config(3, 1), EventLog::new()).unwrap();
    let events = s.observer().events();
    assert_eq!(events[0], TableEvent::MinimumBetChanged { amount: 10 });
    let statuses = events.iter().filter(|e| matches!(e, TableEvent::SeatStatus { .. })).count();
    assert_eq!(statuses, 3);
    assert_eq!(s.game().turn(), TurnState::Idle);
}

#[test]
fn bots_act_only_when_their_timer_fires() {
    let mut cfg = config(6, 4);
    cfg.bot_delay_ms = 500;
    let mut s = Session::new(cfg, EventLog::new()).unwrap();
    s.start_hand().unwrap();
    let Some(seat) = s.game().acting_seat() else {
        panic!("a seat must be asked to act");
    };
    assert_ne!(seat, s.game().human_seat(), "a bot must act first for this seed");
    s.tick(499);
    assert_eq!(s.game().acting_seat(), Some(seat));
    s.tick(500);
    assert_ne!(s.game().acting_seat(), Some(seat));
}

#[test]
fn human_commands_are_refused_on_a_bot_turn() {
    for seed in 0..20 {
        let mut s = Session::new(config(4, seed), EventLog::new()).unwrap();
        s.start_hand().unwrap();
        let Some(seat) = s.game().acting_seat() else { continue };
        if seat == s.game().human_seat() {
            continue;
        }
        let pot = s.game().pot();
        assert_eq!(s.submit_bet(Wager::Chips(1_000)), Err(ActionError::BotSeat(seat)));
        assert_eq!(s.game().pot(), pot);
        return;
    }
    panic!("no seed put a bot first to act");
}

#[test]
fn blind_clock_raises_the_next_hand() {
    let mut cfg = config(3, 8);
    cfg.blind_interval_ms = 60_000;
    let mut s = Session::new(cfg, EventLog::new()).unwrap();
    s.tick(60_000);
    assert_eq!(s.game().pending_minimum_bet(), 20);
    assert_eq!(s.game().minimum_bet(), 10);
    s.tick(180_000);
    assert_eq!(s.game().pending_minimum_bet(), 70);
    s.start_hand().unwrap();
    assert_eq!(s.game().minimum_bet(), 70);
}

#[test]
fn new_session_resets_everything() {
    let mut s = Session::new(config(4, 12), EventLog::new()).unwrap();
    play_out(&mut s, 3);
    s.new_session();
    assert_eq!(s.game().hand_number(), 0);
    assert_eq!(s.game().turn(), TurnState::Idle);
    assert!(s.game().players().iter().all(|p| p.chips() == 500 && p.is_active()));
    s.start_hand().unwrap();
    assert_eq!(s.game().hand_number(), 1);
}

#[test]
fn reconfigure_keeps_the_old_table_on_bad_input() {
    let mut s = Session::new(config(4, 12), EventLog::new()).unwrap();
    let bad = SessionConfig { players: 1, ..config(4, 12) };
    assert!(s.reconfigure(bad).is_err());
    assert_eq!(s.game().players().len(), 4);
    s.reconfigure(config(7, 12)).unwrap();
    assert_eq!(s.game().players().len(), 7);
}

#[test]
fn engine_trait_drives_a_session() {
    let mut engine: Box<dyn TableEngine> =
        Box::new(Session::new(config(2, 5), EventLog::new()).unwrap());
    engine.start_hand().unwrap();
    assert_eq!(engine.start_hand(), Err(ActionError::HandInProgress));
    assert_eq!(engine.game().hand_number(), 1);
    engine.new_session();
    assert_eq!(engine.game().hand_number(), 0);
}
