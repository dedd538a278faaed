mod amount;
mod feed;
mod menu;
mod state;

pub use amount::AmountEntry;
pub use feed::Feed;
pub use state::{AppState, InputAction, Scene};
