use crate::catalog::ImageRecord;

pub const TOTAL_LEVELS: u32 = 10;
pub const MAX_GUESSES: u32 = 5;
pub const FINAL_GUESS_SECS: u32 = 30;

/// Outcome of one resolved level. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelResult {
    pub level: u32,
    pub correct: bool,
    pub guess_number: u32,
    pub points_earned: u32,
}

impl LevelResult {
    pub fn solved(level: u32, guess_number: u32) -> Self {
        Self {
            level,
            correct: true,
            guess_number,
            points_earned: crate::scoring::points_for_guess(guess_number),
        }
    }

    pub fn failed(level: u32) -> Self {
        Self {
            level,
            correct: false,
            guess_number: MAX_GUESSES,
            points_earned: 0,
        }
    }
}

/// Pending "level complete" popup contents, cleared on acknowledgement
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    pub result: LevelResult,
    pub answer: String,
    pub guesses: Vec<String>,
    /// Show the image in its clearest form
    pub show_unblurred: bool,
    pub is_final_level: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub current_level: u32,
    pub current_guess: u32,
    pub score: u32,
    pub is_active: bool,
    pub is_complete: bool,
    pub time_remaining: u32,
    pub show_timer: bool,
    pub current_image: Option<ImageRecord>,
    pub guess_history: Vec<String>,
    pub level_results: Vec<LevelResult>,
    pub hint_used: bool,
    pub revealed_letter_positions: Vec<usize>,
    pub pending_level_summary: Option<LevelSummary>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_level: 1,
            current_guess: 1,
            score: 0,
            is_active: false,
            is_complete: false,
            time_remaining: FINAL_GUESS_SECS,
            show_timer: false,
            current_image: None,
            guess_history: Vec::new(),
            level_results: Vec::new(),
            hint_used: false,
            revealed_letter_positions: Vec::new(),
            pending_level_summary: None,
        }
    }
}

impl SessionState {
    /// The current level has been solved or failed and awaits acknowledgement
    pub fn is_level_resolved(&self) -> bool {
        self.pending_level_summary.is_some()
    }

    pub fn correct_count(&self) -> usize {
        self.level_results.iter().filter(|r| r.correct).count()
    }

    pub fn failed_count(&self) -> usize {
        self.level_results.len() - self.correct_count()
    }

    pub fn guesses_left(&self) -> u32 {
        MAX_GUESSES + 1 - self.current_guess
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = SessionState::default();

        assert_eq!(state.current_level, 1);
        assert_eq!(state.current_guess, 1);
        assert_eq!(state.score, 0);
        assert!(!state.is_active);
        assert!(!state.is_complete);
        assert_eq!(state.time_remaining, 30);
        assert!(!state.show_timer);
        assert!(state.current_image.is_none());
        assert!(state.guess_history.is_empty());
        assert!(state.level_results.is_empty());
        assert!(!state.hint_used);
        assert!(state.revealed_letter_positions.is_empty());
        assert!(!state.is_level_resolved());
    }

    #[test]
    fn test_level_result_constructors() {
        assert_eq!(
            LevelResult::solved(1, 3),
            LevelResult {
                level: 1,
                correct: true,
                guess_number: 3,
                points_earned: 3
            }
        );
        assert_eq!(
            LevelResult::failed(4),
            LevelResult {
                level: 4,
                correct: false,
                guess_number: 5,
                points_earned: 0
            }
        );
    }

    #[test]
    fn test_counts() {
        let state = SessionState {
            level_results: vec![
                LevelResult::solved(1, 1),
                LevelResult::failed(2),
                LevelResult::solved(3, 5),
            ],
            ..Default::default()
        };

        assert_eq!(state.correct_count(), 2);
        assert_eq!(state.failed_count(), 1);
    }

    #[test]
    fn test_guesses_left() {
        let mut state = SessionState::default();
        assert_eq!(state.guesses_left(), 5);

        state.current_guess = 5;
        assert_eq!(state.guesses_left(), 1);
    }
}
