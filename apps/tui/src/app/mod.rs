// Dashboard state, queued commands and key handling

pub mod actions;
pub mod export;
pub mod input;
pub mod state;

pub use actions::AppActions;
pub use input::handle_input;
pub use state::{App, Command, FetchOutcome, Focus};
