// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod hint;
pub mod logging;
pub mod provision;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod ui;

pub use app::{App, AppState};
pub use game::{Game, GuessOutcome};
pub use session::SessionState;
