use super::{AmountEntry, Feed};
use crate::agents::Wager;
use crate::config::{ConfigError, SessionConfig};
use crate::game::{ActionError, Game, TurnState};
use crate::session::Session;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    /// Deal the next hand or open the next phase, whichever is due.
    Advance,
    NewSession,
    Fold,
    CheckCall,
    RaiseMin,
    AmountOpen,
    AmountDigit(u8),
    AmountBackspace,
    AmountIncBet,
    AmountDecBet,
    AmountSubmit,
    AmountCancel,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub(crate) session: Session<Feed>,
    started: Instant,
    // Menu config being edited
    pub menu_index: usize,
    pub(crate) draft: SessionConfig,
    help_open: bool,
    amount: Option<AmountEntry>,
    /// Last rejected command and when it was shown.
    notice: Option<(String, Instant)>,
}

impl AppState {
    const NOTICE_TTL: Duration = Duration::from_secs(3);

    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let session = Session::new(config.clone(), Feed::new())?;
        Ok(Self {
            scene: Scene::Menu,
            session,
            started: Instant::now(),
            menu_index: 0,
            draft: config,
            help_open: false,
            amount: None,
            notice: None,
        })
    }

    /// Returns the table being shown
    pub fn game(&self) -> &Game {
        self.session.game()
    }

    pub fn feed(&self) -> &Feed {
        self.session.observer()
    }

    /// Whether the human is being asked to act right now.
    pub fn human_to_act(&self) -> bool {
        let game = self.game();
        self.scene == Scene::Table && game.acting_seat() == Some(game.human_seat())
    }

    pub fn amount_entry_active(&self) -> bool {
        self.amount.is_some()
    }

    pub fn amount_entry_text(&self) -> Option<&str> {
        self.amount.as_ref().map(AmountEntry::text)
    }

    pub fn amount_entry_error(&self) -> Option<&str> {
        self.amount.as_ref().and_then(AmountEntry::error)
    }

    /// The most recent rejected command, for a few seconds after it happened.
    pub fn action_error(&self) -> Option<&str> {
        self.notice.as_ref().map(|(msg, _)| msg.as_str())
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn clear_action_error(&mut self) {
        self.notice = None;
    }

    pub(crate) fn set_action_error(&mut self, msg: String) {
        self.notice = Some((msg, Instant::now()));
    }

    fn report(&mut self, result: Result<(), ActionError>) -> bool {
        match result {
            Ok(()) => {
                self.clear_action_error();
                true
            }
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    fn bet(&mut self, wager: Wager) -> bool {
        if !self.human_to_act() {
            return false;
        }
        let result = self.session.submit_bet(wager);
        self.report(result)
    }

    /// Smallest amount the entry box suggests: the call plus one minimum bet.
    pub fn suggested_raise(&self) -> u64 {
        let game = self.game();
        game.to_call(game.human_seat()) + game.minimum_bet()
    }

    fn open_amount_entry(&mut self) -> bool {
        if !self.human_to_act() {
            return false;
        }
        self.amount = Some(AmountEntry::new(self.suggested_raise()));
        true
    }

    fn edit_amount(&mut self, edit: impl FnOnce(&mut AmountEntry)) {
        if let Some(entry) = self.amount.as_mut() {
            edit(entry);
        }
    }

    fn submit_amount(&mut self) -> bool {
        let Some(value) = self.amount.as_mut().and_then(AmountEntry::value) else {
            return false;
        };
        if self.bet(Wager::Chips(value)) {
            self.amount = None;
            return true;
        }
        self.edit_amount(AmountEntry::reject);
        false
    }

    /// Space: deal when no hand is running, reveal the next phase when the
    /// betting round is over.
    pub fn advance(&mut self) -> bool {
        let result = match self.game().turn() {
            TurnState::Idle | TurnState::HandComplete => self.session.start_hand(),
            TurnState::PhaseComplete => self.session.start_next_phase(),
            TurnState::AwaitingAction(_) | TurnState::GameOver { .. } => return false,
        };
        self.report(result)
    }

    pub fn new_session(&mut self) {
        self.session.observer_mut().reset();
        self.session.new_session();
        self.amount = None;
        self.clear_action_error();
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => self.scene == Scene::Menu && self.apply_menu(),
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::Advance => self.scene == Scene::Table && self.advance(),
            InputAction::NewSession => {
                if self.scene == Scene::Table {
                    self.new_session();
                }
                false
            }
            InputAction::Fold => self.bet(Wager::Fold),
            InputAction::CheckCall => {
                let game = self.game();
                let to_call = game.to_call(game.human_seat());
                self.bet(Wager::Chips(to_call))
            }
            InputAction::RaiseMin => {
                let amount = self.suggested_raise();
                self.bet(Wager::Chips(amount))
            }
            InputAction::AmountOpen => self.open_amount_entry(),
            InputAction::AmountDigit(d) => {
                self.edit_amount(|e| e.push_digit(d));
                false
            }
            InputAction::AmountBackspace => {
                self.edit_amount(AmountEntry::backspace);
                false
            }
            InputAction::AmountIncBet | InputAction::AmountDecBet => {
                let step = self.game().minimum_bet().max(1);
                let up = action == InputAction::AmountIncBet;
                self.edit_amount(|e| e.step(up, step));
                false
            }
            InputAction::AmountSubmit => self.submit_amount(),
            InputAction::AmountCancel => {
                self.amount = None;
                false
            }
        }
    }

    /// Run the session clock up to the wall clock.
    pub fn on_tick(&mut self) {
        let elapsed = self.started.elapsed().as_millis();
        self.tick_at(u64::try_from(elapsed).unwrap_or(u64::MAX));
    }

    /// Run the session clock up to `now_ms` since the app started.
    pub fn tick_at(&mut self, now_ms: u64) {
        if self.notice.as_ref().is_some_and(|(_, at)| at.elapsed() >= Self::NOTICE_TTL) {
            self.notice = None;
        }
        if self.scene != Scene::Table {
            return;
        }
        self.session.tick(now_ms);
        // the entry box only lives during the human's turn
        if !self.human_to_act() {
            self.amount = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppState {
        let cfg = SessionConfig { players: 3, seed: Some(11), ..Default::default() };
        let mut app = AppState::new(cfg).unwrap();
        app.scene = Scene::Table;
        app
    }

    #[test]
    fn actions_ignored_when_not_the_humans_turn() {
        // four seats with seed 5 put a bot first to act
        let cfg = SessionConfig { players: 4, seed: Some(5), ..Default::default() };
        let mut app = AppState::new(cfg).unwrap();
        app.scene = Scene::Table;
        assert!(!app.handle_input(InputAction::Fold));
        assert!(!app.handle_input(InputAction::AmountOpen));
        assert!(app.handle_input(InputAction::Advance));
        assert!(!app.human_to_act());
        let pot = app.game().pot();
        assert!(!app.handle_input(InputAction::RaiseMin));
        assert_eq!(app.game().pot(), pot);
    }

    #[test]
    fn advance_refused_mid_round() {
        let mut app = app();
        app.handle_input(InputAction::Advance);
        let dealt = app.game().hand_number();
        assert!(!app.handle_input(InputAction::Advance));
        assert_eq!(app.game().hand_number(), dealt);
    }
}
