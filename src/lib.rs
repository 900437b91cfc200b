//! MathRush - A timed addition quiz for the terminal
//!
//! Core modules:
//! - `app`: Running session (state + clock + ticker)
//! - `sim`: Deterministic quiz state machine (questions, countdown, answers)
//! - `report`: End-of-round summary (accuracy, sorted breakdown)
//! - `platform`: Clock and countdown ticker
//! - `settings`: Run configuration
//! - `ui`: Terminal views and key mapping

pub mod app;
pub mod error;
pub mod platform;
pub mod report;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::RushError;
pub use report::{Report, ReportRow, RowStatus};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Questions per round (every distinct operand pair exactly once)
    pub const QUESTION_COUNT: usize = 64;
    /// Seconds allowed per question
    pub const COUNTDOWN_SECS: u32 = 10;
    /// Longest answer the keypad accepts (max sum is 18)
    pub const MAX_ANSWER_LEN: usize = 2;

    /// Operand range (inclusive)
    pub const OPERAND_MIN: u8 = 2;
    pub const OPERAND_MAX: u8 = 9;

    /// Countdown tick period
    pub const TICK_INTERVAL_MS: u64 = 1000;
}

/// Round a percentage to two decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_range_covers_question_count() {
        let span = (consts::OPERAND_MAX - consts::OPERAND_MIN + 1) as usize;
        assert_eq!(span * span, consts::QUESTION_COUNT);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(100.0 * 43.0 / 64.0), 67.19);
        assert_eq!(round2(100.0 / 3.0), 33.33);
        assert_eq!(round2(0.0), 0.0);
    }
}
