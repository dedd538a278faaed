//! Terminal front end: a [`app::Feed`] observer collects table notifications,
//! [`app::AppState`] maps keys onto session commands and `ui` draws both.

pub mod app;
pub mod controller;
mod ui;
