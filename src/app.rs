use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::game::{Game, GuessOutcome};
use crate::scoring::share_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Start,
    Playing,
    End,
}

/// Transient message under the guess box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct { points: u32 },
    TryAgain,
    OutOfGuesses,
}

pub struct App {
    pub game: Game,
    pub state: AppState,
    pub config: Config,
    pub input: String,
    pub feedback: Option<Feedback>,
    pub should_quit: bool,
    summary_seen_at: Option<Instant>,
}

impl App {
    pub fn new(game: Game, config: Config) -> Self {
        Self {
            game,
            state: AppState::Start,
            config,
            input: String::new(),
            feedback: None,
            should_quit: false,
            summary_seen_at: None,
        }
    }

    pub fn start_game(&mut self) {
        self.game.start();
        self.clear_level_ui();
        self.state = if self.game.state().is_active {
            AppState::Playing
        } else {
            AppState::Start
        };
    }

    pub fn restart(&mut self) {
        self.game.reset();
        self.clear_level_ui();
        self.state = AppState::Start;
    }

    fn clear_level_ui(&mut self) {
        self.input.clear();
        self.feedback = None;
        self.summary_seen_at = None;
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        self.on_key_at(key, Instant::now());
    }

    /// Handle a key observed at `now`
    pub fn on_key_at(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Start => match key.code {
                KeyCode::Enter | KeyCode::Char('s') => self.start_game(),
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            AppState::Playing => self.on_playing_key(key, now),
            AppState::End => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => self.restart(),
                KeyCode::Char('t') => self.share(),
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn on_playing_key(&mut self, key: KeyEvent, now: Instant) {
        if self.game.state().is_level_resolved() {
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.continue_to_next_level(),
                KeyCode::Esc => self.restart(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.restart(),
            KeyCode::Enter => self.submit(now),
            KeyCode::Tab if self.config.hints => {
                self.game.use_hint();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    pub fn on_paste(&mut self, text: &str) {
        if self.state == AppState::Playing && !self.game.state().is_level_resolved() {
            self.input.extend(text.chars().filter(|c| !c.is_control()));
        }
    }

    /// Blank submissions never reach the engine from the keyboard
    fn submit(&mut self, now: Instant) {
        if self.input.trim().is_empty() {
            return;
        }
        let guess = std::mem::take(&mut self.input);
        self.feedback = match self.game.submit_guess_at(&guess, now) {
            GuessOutcome::Correct { points } => Some(Feedback::Correct { points }),
            GuessOutcome::Incorrect { guesses_left: 0 } => Some(Feedback::OutOfGuesses),
            GuessOutcome::Incorrect { .. } => Some(Feedback::TryAgain),
            GuessOutcome::Rejected(_) if self.game.state().is_level_resolved() => {
                Some(Feedback::OutOfGuesses)
            }
            GuessOutcome::Rejected(_) => None,
        };
    }

    fn continue_to_next_level(&mut self) {
        if self.game.acknowledge_level_summary() {
            self.clear_level_ui();
            if self.game.state().is_complete {
                self.state = AppState::End;
            }
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.state != AppState::Playing {
            return;
        }

        if !self.game.state().is_level_resolved() {
            let broken = self
                .game
                .state()
                .current_image
                .as_ref()
                .is_some_and(|image| !image_loadable(&image.url));
            if broken {
                self.game.skip_level();
            }
        }

        if self.game.poll_timer(now) > 0 && self.game.state().is_level_resolved() {
            self.feedback = Some(Feedback::OutOfGuesses);
        }

        if self.game.state().is_level_resolved() {
            let seen_at = *self.summary_seen_at.get_or_insert(now);
            let expired = self
                .config
                .auto_continue_ms
                .is_some_and(|ms| now.saturating_duration_since(seen_at) >= Duration::from_millis(ms));
            if expired {
                self.continue_to_next_level();
            }
        }
    }

    fn share(&self) {
        if webbrowser::Browser::is_available() {
            let text = share_text(self.game.state()).replace(' ', "%20");
            let url = format!("https://twitter.com/intent/tweet?text={text}");
            if let Err(err) = webbrowser::open(&url) {
                tracing::warn!(%err, "unable to open browser for sharing");
            }
        }
    }
}

/// The terminal cannot fetch pictures; a record without a usable address
/// counts as a failed load.
pub fn image_loadable(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("https://") || url.starts_with("http://")
}
