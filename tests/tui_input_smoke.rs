use crossterm::event::KeyCode;
use holdem_rs::config::SessionConfig;
use holdem_rs::game::TurnState;
use holdem_rs::tui::app::{AppState, InputAction, Scene};
use holdem_rs::tui::controller::handle_key;

fn config(seed: u64) -> SessionConfig {
    SessionConfig { players: 4, seed: Some(seed), blind_interval_ms: 0, ..Default::default() }
}

fn setup_table_app(seed: u64) -> AppState {
    let mut app = AppState::new(config(seed)).unwrap();
    assert!(app.apply_menu());
    app
}

/// Deal and let the bots play until the human is asked to act.
fn app_at_human_turn() -> AppState {
    for seed in 0..50 {
        let mut app = setup_table_app(seed);
        assert!(app.handle_input(InputAction::Advance));
        app.tick_at(60_000);
        if app.human_to_act() {
            return app;
        }
    }
    panic!("no seed reached the human's turn");
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::new(config(1)).unwrap();
    assert_eq!(app.scene, Scene::Menu);
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    // first item is the seat count
    let _ = app.handle_input(InputAction::MenuInc);
    assert!(app.handle_input(InputAction::MenuApply));
    assert_eq!(app.scene, Scene::Table);
    assert_eq!(app.game().players().len(), 5);
}

#[test]
fn menu_cancel_keeps_the_table() {
    let mut app = setup_table_app(2);
    let _ = app.handle_input(InputAction::ToggleMenu);
    assert_eq!(app.scene, Scene::Menu);
    let _ = app.handle_input(InputAction::MenuDec);
    let _ = app.handle_input(InputAction::MenuCancel);
    assert_eq!(app.scene, Scene::Table);
    assert_eq!(app.game().players().len(), 4);
}

#[test]
fn help_toggles_and_swallows_keys() {
    let mut app = setup_table_app(3);
    assert!(!handle_key(&mut app, KeyCode::Char('?')));
    assert!(app.help_open());
    // table keys do nothing while help is up
    assert!(!handle_key(&mut app, KeyCode::Char(' ')));
    assert_eq!(app.game().turn(), TurnState::Idle);
    assert!(!handle_key(&mut app, KeyCode::Esc));
    assert!(!app.help_open());
}

#[test]
fn space_deals_a_hand() {
    let mut app = setup_table_app(4);
    assert!(!handle_key(&mut app, KeyCode::Char(' ')));
    assert_eq!(app.game().hand_number(), 1);
}

#[test]
fn betting_keys_do_nothing_out_of_turn() {
    let mut app = setup_table_app(5);
    assert!(!app.handle_input(InputAction::Fold));
    assert!(!app.handle_input(InputAction::AmountOpen));
    assert!(!app.amount_entry_active());
}

#[test]
fn amount_entry_edit_and_cancel() {
    let mut app = app_at_human_turn();
    assert!(app.handle_input(InputAction::AmountOpen));
    assert!(app.amount_entry_active());
    let expected = app.suggested_raise().to_string();
    assert_eq!(app.amount_entry_text(), Some(expected.as_str()));

    let _ = app.handle_input(InputAction::AmountBackspace);
    let _ = app.handle_input(InputAction::AmountDigit(7));
    let edited = format!("{}7", &expected[..expected.len() - 1]);
    assert_eq!(app.amount_entry_text(), Some(edited.as_str()));

    let _ = app.handle_input(InputAction::AmountCancel);
    assert!(!app.amount_entry_active());
    assert!(app.human_to_act());
}

#[test]
fn amount_entry_steps_by_the_minimum_bet() {
    let mut app = app_at_human_turn();
    let step = app.game().minimum_bet();
    let _ = app.handle_input(InputAction::AmountOpen);
    let start: u64 = app.amount_entry_text().unwrap().parse().unwrap();
    let _ = app.handle_input(InputAction::AmountIncBet);
    let _ = app.handle_input(InputAction::AmountIncBet);
    let _ = app.handle_input(InputAction::AmountDecBet);
    let now: u64 = app.amount_entry_text().unwrap().parse().unwrap();
    assert_eq!(now, start + step);
}

#[test]
fn amount_entry_submit_places_the_bet() {
    let mut app = app_at_human_turn();
    let seat = app.game().human_seat();
    let _ = handle_key(&mut app, KeyCode::Char('a'));
    assert!(app.amount_entry_active());
    let amount: u64 = app.amount_entry_text().unwrap().parse().unwrap();
    let before = app.game().players()[seat].bet();
    let capped = app.game().all_in_ceiling().is_some();
    let _ = handle_key(&mut app, KeyCode::Enter);
    assert!(!app.amount_entry_active());
    assert!(app.action_error().is_none());
    let after = app.game().players()[seat].bet();
    if capped {
        assert!(after >= before);
    } else {
        assert_eq!(after, before + amount);
    }
}

#[test]
fn fold_key_leaves_the_hand() {
    let mut app = app_at_human_turn();
    let seat = app.game().human_seat();
    let _ = handle_key(&mut app, KeyCode::Char('f'));
    assert!(!app.game().players()[seat].is_playing());
    assert!(!app.human_to_act());
}

#[test]
fn quit_from_either_scene() {
    let mut app = AppState::new(config(6)).unwrap();
    assert!(handle_key(&mut app, KeyCode::Char('q')));
    let mut app = setup_table_app(6);
    assert!(handle_key(&mut app, KeyCode::Char('Q')));
}

#[test]
fn new_session_from_the_table() {
    let mut app = setup_table_app(7);
    let _ = app.handle_input(InputAction::Advance);
    let _ = handle_key(&mut app, KeyCode::Char('n'));
    assert_eq!(app.game().hand_number(), 0);
    assert_eq!(app.game().turn(), TurnState::Idle);
}
