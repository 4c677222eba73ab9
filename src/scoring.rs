use crate::session::{SessionState, MAX_GUESSES, TOTAL_LEVELS};

/// Points for solving a level on attempt `guess_number`
pub fn points_for_guess(guess_number: u32) -> u32 {
    6_u32.saturating_sub(guess_number)
}

pub fn max_possible_score() -> u32 {
    TOTAL_LEVELS * points_for_guess(1)
}

pub fn score_percent(score: u32) -> u32 {
    ((score as f64 / max_possible_score() as f64) * 100.0).round() as u32
}

/// Block size used to obscure the image on a given attempt
pub fn pixel_size_for_guess(guess_number: u32) -> u16 {
    const LEVELS: [u16; MAX_GUESSES as usize] = [50, 35, 20, 10, 1];
    guess_number
        .checked_sub(1)
        .and_then(|idx| LEVELS.get(idx as usize))
        .copied()
        .unwrap_or(8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ScoreRating {
    #[strum(serialize = "Legendary!")]
    Legendary,
    #[strum(serialize = "Excellent!")]
    Excellent,
    #[strum(serialize = "Great!")]
    Great,
    #[strum(serialize = "Good!")]
    Good,
    #[strum(serialize = "Keep trying!")]
    KeepTrying,
}

impl ScoreRating {
    pub fn from_score(score: u32) -> Self {
        match score {
            40..=u32::MAX => Self::Legendary,
            30..=39 => Self::Excellent,
            20..=29 => Self::Great,
            10..=19 => Self::Good,
            _ => Self::KeepTrying,
        }
    }
}

pub fn share_text(state: &SessionState) -> String {
    format!(
        "I just scored {}/{} points in HyperPix! Got {}/{} correct! Can you beat my score?",
        state.score,
        max_possible_score(),
        state.correct_count(),
        TOTAL_LEVELS
    )
}
