//! Deterministic quiz simulation
//!
//! All game logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Time arrives as a timestamp argument, never read from the system
//! - No terminal or platform dependencies

pub mod question;
pub mod state;
pub mod tick;

pub use question::{Question, QuestionSet};
pub use state::{AnswerBuffer, GamePhase, GameState, QuestionResult, RngState, UserAnswer};
pub use tick::{GameEvent, TimerCommand, on_buffer_changed, step};
