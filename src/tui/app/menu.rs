use crate::config::{MAX_PLAYERS, MIN_PLAYERS};

use super::AppState;

const MINUTE_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    StartingChips,
    MinimumBet,
    BlindInterval,
    BotDelayMs,
}

const MENU_ITEMS: [MenuItem; 5] = [
    MenuItem::Players,
    MenuItem::StartingChips,
    MenuItem::MinimumBet,
    MenuItem::BlindInterval,
    MenuItem::BotDelayMs,
];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        let cfg = &app.draft;
        match self {
            MenuItem::Players => format!("Players: {}", cfg.players),
            MenuItem::StartingChips => format!("Starting Chips: {}", cfg.starting_chips),
            MenuItem::MinimumBet => {
                format!("Blinds: {}/{}", cfg.minimum_bet / 2, cfg.minimum_bet)
            }
            MenuItem::BlindInterval => match cfg.blind_interval_ms / MINUTE_MS {
                0 => "Blinds Rise: never".to_string(),
                m => format!("Blinds Rise: every {m} min"),
            },
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", cfg.bot_delay_ms),
        }
    }

    fn inc(self, app: &mut AppState) {
        let cfg = &mut app.draft;
        match self {
            MenuItem::Players => {
                if cfg.players < MAX_PLAYERS {
                    cfg.players += 1;
                }
            }
            MenuItem::StartingChips => {
                cfg.starting_chips = cfg.starting_chips.saturating_add(100);
            }
            MenuItem::MinimumBet => {
                cfg.minimum_bet = cfg.minimum_bet.saturating_add(2);
            }
            MenuItem::BlindInterval => {
                cfg.blind_interval_ms = cfg.blind_interval_ms.saturating_add(MINUTE_MS);
            }
            MenuItem::BotDelayMs => {
                cfg.bot_delay_ms = cfg.bot_delay_ms.saturating_add(250);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        let cfg = &mut app.draft;
        match self {
            MenuItem::Players => {
                if cfg.players > MIN_PLAYERS {
                    cfg.players -= 1;
                }
            }
            MenuItem::StartingChips => {
                cfg.starting_chips = cfg.starting_chips.saturating_sub(100).max(100);
            }
            MenuItem::MinimumBet => {
                cfg.minimum_bet = cfg.minimum_bet.saturating_sub(2).max(2);
            }
            MenuItem::BlindInterval => {
                cfg.blind_interval_ms = cfg.blind_interval_ms.saturating_sub(MINUTE_MS);
            }
            MenuItem::BotDelayMs => {
                cfg.bot_delay_ms = cfg.bot_delay_ms.saturating_sub(250);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Table,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.menu_index = 0;
        self.draft = self.session.config().clone();
        self.scene = super::Scene::Menu;
    }

    /// Seat a new session with the edited settings. Leaves the menu open
    /// with an error when they don't validate.
    pub fn apply_menu(&mut self) -> bool {
        if let Err(err) = self.draft.validate() {
            self.set_action_error(err.to_string());
            return false;
        }
        self.session.observer_mut().reset();
        if let Err(err) = self.session.reconfigure(self.draft.clone()) {
            self.set_action_error(err.to_string());
            return false;
        }
        self.clear_action_error();
        self.scene = super::Scene::Table;
        true
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
