use std::time::Instant;

use crate::catalog::{normalize, ImageRecord};
use crate::hint::{HintPicker, RandomHintPicker};
use crate::provision::ImageProvisioner;
use crate::scoring::points_for_guess;
use crate::session::{
    LevelResult, LevelSummary, SessionState, FINAL_GUESS_SECS, MAX_GUESSES, TOTAL_LEVELS,
};
use crate::timer::Countdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No session has been started, or it already completed
    NoActiveSession,
    /// The level is waiting for its summary to be acknowledged
    LevelResolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct { points: u32 },
    Incorrect { guesses_left: u32 },
    Rejected(Rejection),
}

impl GuessOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// The game session engine: owns the session state and applies transitions.
///
/// All randomness lives behind its two collaborators, the provisioner and
/// the hint picker; the transitions themselves are deterministic.
pub struct Game {
    state: SessionState,
    provisioner: Box<dyn ImageProvisioner>,
    hints: Box<dyn HintPicker>,
    levels: Vec<ImageRecord>,
    countdown: Option<Countdown>,
}

impl Game {
    pub fn new(provisioner: Box<dyn ImageProvisioner>) -> Self {
        Self::with_hint_picker(provisioner, Box::new(RandomHintPicker::new()))
    }

    pub fn with_hint_seed(provisioner: Box<dyn ImageProvisioner>, seed: u64) -> Self {
        Self::with_hint_picker(provisioner, Box::new(RandomHintPicker::seeded(seed)))
    }

    pub fn with_hint_picker(
        provisioner: Box<dyn ImageProvisioner>,
        hints: Box<dyn HintPicker>,
    ) -> Self {
        Self {
            state: SessionState::default(),
            provisioner,
            hints,
            levels: Vec::new(),
            countdown: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Begin a fresh session, discarding whatever came before
    pub fn start(&mut self) {
        self.countdown = None;
        let levels = self.provisioner.provision(i64::from(TOTAL_LEVELS));

        if levels.is_empty() {
            tracing::warn!("no images provisioned, session not started");
            self.levels.clear();
            self.state = SessionState::default();
            return;
        }
        self.levels = fill_levels(levels);
        let first = self.levels[0].clone();

        self.state = SessionState {
            is_active: true,
            current_image: Some(first),
            ..Default::default()
        };
        tracing::info!(levels = self.levels.len(), "session started");
    }

    pub fn reset(&mut self) {
        self.countdown = None;
        self.levels.clear();
        self.state = SessionState::default();
        tracing::info!("session reset");
    }

    /// Submit a guess observed at `now`. The countdown is settled first, so
    /// a final guess arriving after the deadline is rejected, and it is
    /// armed at `now` if this guess opened the final attempt.
    pub fn submit_guess_at(&mut self, text: &str, now: Instant) -> GuessOutcome {
        self.poll_timer(now);
        let outcome = self.submit_guess(text);
        self.poll_timer(now);
        outcome
    }

    pub fn submit_guess(&mut self, text: &str) -> GuessOutcome {
        if !self.state.is_active {
            return GuessOutcome::Rejected(Rejection::NoActiveSession);
        }
        let Some(image) = self.state.current_image.as_ref() else {
            return GuessOutcome::Rejected(Rejection::NoActiveSession);
        };
        if self.state.is_level_resolved() {
            return GuessOutcome::Rejected(Rejection::LevelResolved);
        }

        let correct = normalize(text) == image.normalized_answer();
        let attempt = self.state.current_guess;
        self.state.guess_history.push(text.to_string());

        if correct {
            let points = points_for_guess(attempt);
            tracing::info!(
                level = self.state.current_level,
                attempt,
                points,
                "correct guess"
            );
            self.resolve_level(LevelResult::solved(self.state.current_level, attempt));
            return GuessOutcome::Correct { points };
        }

        let next = attempt + 1;
        tracing::debug!(level = self.state.current_level, attempt, "incorrect guess");

        if next > MAX_GUESSES {
            self.resolve_level(LevelResult::failed(self.state.current_level));
        } else if next == MAX_GUESSES {
            self.state.current_guess = next;
            self.state.show_timer = true;
            self.state.time_remaining = FINAL_GUESS_SECS;
        } else {
            self.state.current_guess = next;
        }

        GuessOutcome::Incorrect {
            guesses_left: MAX_GUESSES.saturating_sub(attempt),
        }
    }

    /// Dismiss the level summary and move on. The only place the level advances.
    pub fn acknowledge_level_summary(&mut self) -> bool {
        if self.state.pending_level_summary.take().is_none() {
            return false;
        }

        let next_image = self.levels.get(self.state.current_level as usize).cloned();
        match next_image {
            Some(image) if self.state.current_level < TOTAL_LEVELS => {
                self.state.current_level += 1;
                self.state.current_guess = 1;
                self.state.show_timer = false;
                self.state.time_remaining = FINAL_GUESS_SECS;
                self.state.current_image = Some(image);
                self.state.guess_history.clear();
                self.state.hint_used = false;
                self.state.revealed_letter_positions.clear();
                tracing::debug!(level = self.state.current_level, "level started");
            }
            _ => {
                self.state.is_active = false;
                self.state.is_complete = true;
                tracing::info!(
                    score = self.state.score,
                    correct = self.state.correct_count(),
                    "session complete"
                );
            }
        }
        true
    }

    /// One elapsed second of the final-attempt countdown
    pub fn tick(&mut self) -> bool {
        if !self.state.is_active || !self.state.show_timer || self.state.is_level_resolved() {
            return false;
        }

        if self.state.time_remaining > 1 {
            self.state.time_remaining -= 1;
        } else {
            tracing::info!(level = self.state.current_level, "final guess timed out");
            self.state.time_remaining = 0;
            self.resolve_level(LevelResult::failed(self.state.current_level));
        }
        true
    }

    /// Deliver any countdown ticks that have come due by `now`.
    /// Arms the countdown the first time it is polled while the timer shows.
    pub fn poll_timer(&mut self, now: Instant) -> u32 {
        if !self.state.show_timer || !self.state.is_active {
            self.countdown = None;
            return 0;
        }

        let countdown = self.countdown.get_or_insert_with(|| Countdown::arm(now));
        let due = countdown.due(now);

        let mut delivered = 0;
        for _ in 0..due {
            if !self.tick() {
                break;
            }
            delivered += 1;
        }
        delivered
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Reveal a few letters of the answer, once per level
    pub fn use_hint(&mut self) -> bool {
        if !self.state.is_active || self.state.hint_used || self.state.is_level_resolved() {
            return false;
        }
        let Some(image) = self.state.current_image.as_ref() else {
            return false;
        };

        if self.state.revealed_letter_positions.is_empty() {
            self.state.revealed_letter_positions = self.hints.pick(&image.answer);
        }
        self.state.hint_used = true;
        tracing::debug!(
            level = self.state.current_level,
            revealed = ?self.state.revealed_letter_positions,
            "hint used"
        );
        true
    }

    /// Give up on a level whose image could not be shown
    pub fn skip_level(&mut self) -> bool {
        if !self.state.is_active
            || self.state.current_image.is_none()
            || self.state.is_level_resolved()
        {
            return false;
        }

        tracing::warn!(level = self.state.current_level, "level skipped");
        self.resolve_level(LevelResult::failed(self.state.current_level));
        true
    }

    fn resolve_level(&mut self, result: LevelResult) {
        self.countdown = None;
        self.state.show_timer = false;
        self.state.score += result.points_earned;
        self.state.level_results.push(result);
        self.state.pending_level_summary = Some(LevelSummary {
            result,
            answer: self
                .state
                .current_image
                .as_ref()
                .map(|image| image.answer.clone())
                .unwrap_or_default(),
            guesses: self.state.guess_history.clone(),
            show_unblurred: result.correct,
            is_final_level: self.state.current_level >= TOTAL_LEVELS,
        });
    }
}

/// Exactly one image per level: short sequences repeat from the start
fn fill_levels(levels: Vec<ImageRecord>) -> Vec<ImageRecord> {
    let wanted = TOTAL_LEVELS as usize;
    if levels.len() == wanted {
        return levels;
    }
    if levels.len() < wanted {
        tracing::warn!(
            provided = levels.len(),
            wanted,
            "provisioner returned too few images, repeating"
        );
    }
    levels.iter().cycle().take(wanted).cloned().collect()
}
