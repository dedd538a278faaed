//! holdem-rs: a no-limit Texas Hold'em table for one human against bots
//!
//! Goals:
//! - Deterministic hand ranking and table flow; seed a session and it replays
//! - Table state changes only through a small set of commands
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: rank a Hold'em hand
//! ```
//! use holdem_rs::cards::{Card, Rank, Suit};
//! use holdem_rs::evaluator::{evaluate_holdem, Category};
//! use holdem_rs::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! ```
//!
//! ## Quick start: play a session
//! ```
//! use holdem_rs::config::SessionConfig;
//! use holdem_rs::events::EventLog;
//! use holdem_rs::session::Session;
//!
//! let config = SessionConfig { players: 3, seed: Some(7), ..Default::default() };
//! let mut session = Session::new(config, EventLog::new()).unwrap();
//! session.start_hand().unwrap();
//! session.run_bots();
//! assert_eq!(session.game().hand_number(), 1);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin holdem-rs
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod events;
pub mod game;
pub mod hand;
pub mod scheduler;
pub mod session;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
