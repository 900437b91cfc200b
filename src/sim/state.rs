//! Game state and core quiz types
//!
//! Everything the controller mutates lives in [`GameState`]; the UI only reads it.

use std::fmt;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::question::{Question, QuestionSet};
use crate::consts::*;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start action
    #[default]
    NotStarted,
    /// Questions are being answered and the countdown is running
    InProgress,
    /// All questions recorded, report is showing
    Finished,
}

/// What the player submitted for a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserAnswer {
    /// Digits typed before submission
    Typed(String),
    /// Countdown ran out
    TimedOut,
}

impl UserAnswer {
    /// Marker shown for a timed-out question
    pub const TIMED_OUT: &'static str = "NA";

    pub fn as_str(&self) -> &str {
        match self {
            UserAnswer::Typed(s) => s,
            UserAnswer::TimedOut => Self::TIMED_OUT,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, UserAnswer::TimedOut)
    }
}

impl fmt::Display for UserAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for UserAnswer {
    fn from(s: String) -> Self {
        if s == Self::TIMED_OUT {
            UserAnswer::TimedOut
        } else {
            UserAnswer::Typed(s)
        }
    }
}

impl From<UserAnswer> for String {
    fn from(answer: UserAnswer) -> Self {
        match answer {
            UserAnswer::Typed(s) => s,
            UserAnswer::TimedOut => UserAnswer::TIMED_OUT.to_string(),
        }
    }
}

/// Outcome of one question, appended once and never changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub num1: u8,
    pub num2: u8,
    pub correct_answer: u8,
    pub user_answer: UserAnswer,
    /// Whole seconds spent (0..=10)
    pub time_taken: u32,
    pub user_correct: bool,
}

impl QuestionResult {
    pub fn answered(question: &Question, typed: &AnswerBuffer, time_taken: u32) -> Self {
        Self {
            num1: question.num1,
            num2: question.num2,
            correct_answer: question.answer,
            user_answer: UserAnswer::Typed(typed.as_str().to_string()),
            time_taken,
            user_correct: typed.value() == Some(question.answer as u32),
        }
    }

    pub fn timed_out(question: &Question) -> Self {
        Self {
            num1: question.num1,
            num2: question.num2,
            correct_answer: question.answer,
            user_answer: UserAnswer::TimedOut,
            time_taken: COUNTDOWN_SECS,
            user_correct: false,
        }
    }

    pub fn question_text(&self) -> String {
        format!("{} + {}", self.num1, self.num2)
    }
}

/// Digits typed for the current question (at most [`MAX_ANSWER_LEN`])
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerBuffer(String);

impl AnswerBuffer {
    /// Append a digit; returns false if the buffer is full or `digit` > 9
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if self.0.len() >= MAX_ANSWER_LEN || digit > 9 {
            return false;
        }
        self.0.push(char::from(b'0' + digit));
        true
    }

    /// Remove the last digit; returns false on an empty buffer
    pub fn pop(&mut self) -> bool {
        self.0.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Numeric value, `None` if empty or not all digits
    pub fn value(&self) -> Option<u32> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// RNG state wrapper for serialization
///
/// Each round draws its question order from its own PCG stream of the run seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }

    /// Move on to the next round's stream
    pub fn advance(&mut self) {
        self.stream = self.stream.wrapping_add(1);
    }
}

/// Complete quiz state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state for question generation
    pub rng_state: RngState,
    /// Current phase
    pub phase: GamePhase,
    /// Questions for this round, in presentation order
    pub questions: QuestionSet,
    /// Index of the question being shown (0-based)
    pub index: usize,
    /// Seconds left on the current question
    pub countdown: u32,
    /// Digits typed so far
    pub buffer: AnswerBuffer,
    /// Outcomes in question order
    pub results: Vec<QuestionResult>,
    /// Timestamp (ms) of the start action
    pub started_at_ms: Option<u64>,
    /// Wall-clock duration of the round, set when it finishes
    pub total_secs: f64,
}

impl GameState {
    /// Create a fresh, not-yet-started game with the given seed
    pub fn new(seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let questions = QuestionSet::generate(&mut rng_state.to_rng());
        Self {
            seed,
            rng_state,
            phase: GamePhase::NotStarted,
            questions,
            index: 0,
            countdown: COUNTDOWN_SECS,
            buffer: AnswerBuffer::default(),
            results: Vec::with_capacity(QUESTION_COUNT),
            started_at_ms: None,
            total_secs: 0.0,
        }
    }

    /// Question currently on screen
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            GamePhase::InProgress => self.questions.get(self.index),
            _ => None,
        }
    }

    /// 1-based position for the "Question n / 64" header
    pub fn question_number(&self) -> usize {
        self.index + 1
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.user_correct).count()
    }

    /// Regenerate questions from the next RNG stream and clear round state
    pub(crate) fn reset_round(&mut self) {
        self.rng_state.advance();
        self.questions = QuestionSet::generate(&mut self.rng_state.to_rng());
        self.phase = GamePhase::NotStarted;
        self.index = 0;
        self.countdown = COUNTDOWN_SECS;
        self.buffer.clear();
        self.results.clear();
        self.started_at_ms = None;
        self.total_secs = 0.0;
    }
}
