use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::{App, AppState};
use crate::ui::{render_end, render_level_summary, render_play, render_start};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Title screen with rules and current settings
pub struct StartScreen;

impl Screen for StartScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_start(app, area, buf);
    }
}

/// Guessing screen; the level summary popup is drawn over it
pub struct PlayScreen;

impl Screen for PlayScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_play(app, area, buf);
        if let Some(summary) = &app.game.state().pending_level_summary {
            render_level_summary(summary, area, buf);
        }
    }
}

/// Final score, rating and per-level breakdown
pub struct EndScreen;

impl Screen for EndScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_end(app, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Start => Box::new(StartScreen),
        AppState::Playing => Box::new(PlayScreen),
        AppState::End => Box::new(EndScreen),
    }
}
