//! Quiz controller
//!
//! Every mutation of [`GameState`] goes through [`step`]. The only side effect
//! is the returned [`TimerCommand`], which the caller applies to its ticker.

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, QuestionResult};
use crate::consts::*;

/// Discrete input to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Start button on the title screen
    Start,
    /// Keypad digit 0-9
    Digit(u8),
    /// Keypad backspace
    Backspace,
    /// One second of countdown elapsed
    Tick,
    /// Restart button on the report
    Restart,
}

/// Instruction for the countdown ticker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// (Re)start one-second ticks from now
    Arm,
    /// Stop ticking
    Cancel,
}

/// How a question was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Submission {
    Manual,
    TimedOut,
}

/// Apply one event at time `now_ms` (monotonic milliseconds)
pub fn step(state: &mut GameState, event: GameEvent, now_ms: u64) -> Option<TimerCommand> {
    match (state.phase, event) {
        (GamePhase::NotStarted, GameEvent::Start) => Some(start(state, now_ms)),
        (GamePhase::InProgress, GameEvent::Digit(d)) => {
            if state.buffer.push_digit(d) {
                on_buffer_changed(state, now_ms)
            } else {
                None
            }
        }
        (GamePhase::InProgress, GameEvent::Backspace) => {
            if state.buffer.pop() {
                on_buffer_changed(state, now_ms)
            } else {
                None
            }
        }
        (GamePhase::InProgress, GameEvent::Tick) => tick(state, now_ms),
        (GamePhase::Finished, GameEvent::Restart) => {
            state.reset_round();
            log::info!("Round reset (seed {}, stream {})", state.seed, state.rng_state.stream);
            Some(TimerCommand::Cancel)
        }
        (phase, event) => {
            log::trace!("Ignoring {:?} in {:?}", event, phase);
            None
        }
    }
}

/// Auto-submit rule, evaluated after every buffer mutation
///
/// Submits when the buffer is full, or as soon as it already equals the
/// correct answer. A wrong single digit waits for a second keystroke.
pub fn on_buffer_changed(state: &mut GameState, now_ms: u64) -> Option<TimerCommand> {
    let question = state.current_question()?;
    let full = state.buffer.len() >= MAX_ANSWER_LEN;
    let matches = state.buffer.value() == Some(question.answer as u32);
    if full || matches {
        submit(state, Submission::Manual, now_ms)
    } else {
        None
    }
}

fn start(state: &mut GameState, now_ms: u64) -> TimerCommand {
    state.phase = GamePhase::InProgress;
    state.index = 0;
    state.countdown = COUNTDOWN_SECS;
    state.buffer.clear();
    state.results.clear();
    state.started_at_ms = Some(now_ms);
    state.total_secs = 0.0;
    log::info!(
        "Round started (seed {}, stream {})",
        state.seed,
        state.rng_state.stream
    );
    TimerCommand::Arm
}

fn tick(state: &mut GameState, now_ms: u64) -> Option<TimerCommand> {
    state.countdown = state.countdown.saturating_sub(1);
    if state.countdown > 0 {
        return None;
    }
    let cmd = submit(state, Submission::TimedOut, now_ms);
    if state.phase == GamePhase::InProgress {
        // Same tick starts the next question's countdown
        state.countdown = COUNTDOWN_SECS;
    }
    cmd
}

/// Record the current question and move to the next one (or finish)
fn submit(state: &mut GameState, how: Submission, now_ms: u64) -> Option<TimerCommand> {
    let question = *state.questions.get(state.index)?;

    let result = match how {
        Submission::Manual => {
            let time_taken = COUNTDOWN_SECS.saturating_sub(state.countdown);
            QuestionResult::answered(&question, &state.buffer, time_taken)
        }
        Submission::TimedOut => QuestionResult::timed_out(&question),
    };
    log::debug!(
        "Q{} {} = {} -> {} ({}s, {})",
        state.question_number(),
        question.text(),
        question.answer,
        result.user_answer,
        result.time_taken,
        if result.user_correct { "correct" } else { "wrong" }
    );
    state.results.push(result);
    state.buffer.clear();

    if state.index + 1 < state.questions.len() {
        state.index += 1;
        match how {
            Submission::Manual => {
                state.countdown = COUNTDOWN_SECS;
                Some(TimerCommand::Arm)
            }
            Submission::TimedOut => None,
        }
    } else {
        finish(state, now_ms);
        Some(TimerCommand::Cancel)
    }
}

fn finish(state: &mut GameState, now_ms: u64) {
    state.phase = GamePhase::Finished;
    let started = state.started_at_ms.unwrap_or(now_ms);
    state.total_secs = now_ms.saturating_sub(started) as f64 / 1000.0;
    log::info!(
        "Round finished: {}/{} correct in {:.3}s",
        state.correct_count(),
        state.results.len(),
        state.total_secs
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::UserAnswer;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        assert_eq!(step(&mut state, GameEvent::Start, 0), Some(TimerCommand::Arm));
        state
    }

    fn current_answer(state: &GameState) -> u8 {
        state.current_question().unwrap().answer
    }

    /// Type `value` as digits, returning the last timer command
    fn type_number(state: &mut GameState, value: u32, now_ms: u64) -> Option<TimerCommand> {
        let mut cmd = None;
        for b in value.to_string().bytes() {
            cmd = step(state, GameEvent::Digit(b - b'0'), now_ms);
        }
        cmd
    }

    /// Type the correct answer for the current question
    fn answer_correctly(state: &mut GameState, now_ms: u64) -> Option<TimerCommand> {
        let answer = current_answer(state) as u32;
        type_number(state, answer, now_ms)
    }

    /// A single digit that is not the answer and cannot prefix it
    fn wrong_digit(answer: u8) -> u8 {
        if answer == 1 { 2 } else { 1 }
    }

    #[test]
    fn test_start() {
        let state = started(12345);
        assert_eq!(state.phase, GamePhase::InProgress);
        assert_eq!(state.index, 0);
        assert_eq!(state.countdown, COUNTDOWN_SECS);
        assert!(state.results.is_empty());
        assert_eq!(state.started_at_ms, Some(0));
    }

    #[test]
    fn test_events_ignored_before_start() {
        let mut state = GameState::new(1);
        assert_eq!(step(&mut state, GameEvent::Tick, 0), None);
        assert_eq!(step(&mut state, GameEvent::Digit(5), 0), None);
        assert_eq!(step(&mut state, GameEvent::Restart, 0), None);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.countdown, COUNTDOWN_SECS);
        assert!(state.buffer.is_empty());
    }

    #[test]
    fn test_correct_single_digit_submits_immediately() {
        let mut state = started(3);
        // Find a question with a single-digit answer
        while current_answer(&state) >= 10 {
            answer_correctly(&mut state, 0);
        }
        let answer = current_answer(&state);
        let before = state.index;

        let cmd = step(&mut state, GameEvent::Digit(answer), 0);
        assert_eq!(cmd, Some(TimerCommand::Arm));
        assert_eq!(state.index, before + 1);
        let last = state.results.last().unwrap();
        assert!(last.user_correct);
        assert_eq!(last.user_answer, UserAnswer::Typed(answer.to_string()));
        assert!(state.buffer.is_empty());
    }

    #[test]
    fn test_wrong_single_digit_waits_then_two_digits_submit() {
        let mut state = started(5);
        let answer = current_answer(&state);
        let d = wrong_digit(answer);

        assert_eq!(step(&mut state, GameEvent::Digit(d), 0), None);
        assert_eq!(state.index, 0);
        assert_eq!(state.buffer.len(), 1);

        // Second digit always submits, even when wrong
        assert_eq!(step(&mut state, GameEvent::Digit(9), 0), Some(TimerCommand::Arm));
        assert_eq!(state.index, 1);
        assert_eq!(state.results.len(), 1);
        assert!(!state.results[0].user_correct);
    }

    #[test]
    fn test_backspace_then_correct_answer() {
        let mut state = started(8);
        let answer = current_answer(&state);
        step(&mut state, GameEvent::Digit(wrong_digit(answer)), 0);
        assert_eq!(step(&mut state, GameEvent::Backspace, 0), None);
        assert!(state.buffer.is_empty());

        type_number(&mut state, answer as u32, 0);
        assert!(state.results[0].user_correct);
    }

    #[test]
    fn test_backspace_on_empty_buffer_is_noop() {
        let mut state = started(9);
        assert_eq!(step(&mut state, GameEvent::Backspace, 0), None);
        assert!(state.buffer.is_empty());
        assert_eq!(state.index, 0);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_on_buffer_changed_rule() {
        let mut state = started(10);
        let answer = current_answer(&state);
        state.buffer.push_digit(wrong_digit(answer));
        assert_eq!(on_buffer_changed(&mut state, 0), None);
        assert_eq!(state.buffer.len(), 1);

        state.buffer.push_digit(0);
        assert_eq!(on_buffer_changed(&mut state, 0), Some(TimerCommand::Arm));
        assert_eq!(state.results.len(), 1);
    }

    #[test]
    fn test_time_taken_from_countdown() {
        let mut state = started(11);
        for _ in 0..3 {
            step(&mut state, GameEvent::Tick, 0);
        }
        assert_eq!(state.countdown, 7);
        answer_correctly(&mut state, 3000);
        assert_eq!(state.results[0].time_taken, 3);
        assert_eq!(state.countdown, COUNTDOWN_SECS);
    }

    #[test]
    fn test_countdown_timeout() {
        let mut state = started(12);
        // Partially typed answer is discarded on timeout
        let d = wrong_digit(current_answer(&state));
        step(&mut state, GameEvent::Digit(d), 0);
        for _ in 0..COUNTDOWN_SECS - 1 {
            assert_eq!(step(&mut state, GameEvent::Tick, 0), None);
        }
        assert_eq!(state.countdown, 1);
        assert_eq!(state.index, 0);

        assert_eq!(step(&mut state, GameEvent::Tick, 0), None);
        assert_eq!(state.index, 1);
        assert_eq!(state.countdown, COUNTDOWN_SECS);
        assert!(state.buffer.is_empty());
        let r = &state.results[0];
        assert_eq!(r.user_answer, UserAnswer::TimedOut);
        assert_eq!(r.time_taken, COUNTDOWN_SECS);
        assert!(!r.user_correct);
    }

    #[test]
    fn test_full_round_finishes() {
        let mut state = started(2024);
        let mut expected_correct = 0;
        let mut last_cmd = None;

        for i in 0..QUESTION_COUNT {
            let now = (i as u64 + 1) * 1500;
            last_cmd = match i % 3 {
                0 => {
                    expected_correct += 1;
                    answer_correctly(&mut state, now)
                }
                1 => {
                    let wrong = current_answer(&state) as u32 + 1;
                    type_number(&mut state, wrong, now).or_else(|| {
                        // Single-digit wrong answer needs a second digit
                        step(&mut state, GameEvent::Digit(0), now)
                    })
                }
                _ => {
                    let mut cmd = None;
                    for _ in 0..COUNTDOWN_SECS {
                        cmd = step(&mut state, GameEvent::Tick, now);
                    }
                    cmd
                }
            };
            if i + 1 < QUESTION_COUNT {
                assert_eq!(state.phase, GamePhase::InProgress);
                assert_eq!(state.results.len(), state.index);
            }
        }

        assert_eq!(last_cmd, Some(TimerCommand::Cancel));
        assert_eq!(state.phase, GamePhase::Finished);
        assert_eq!(state.results.len(), QUESTION_COUNT);
        assert_eq!(state.correct_count(), expected_correct);
        assert!((state.total_secs - 96.0).abs() < 1e-9);

        // Further input is ignored once finished
        assert_eq!(step(&mut state, GameEvent::Tick, 100_000), None);
        assert_eq!(step(&mut state, GameEvent::Digit(3), 100_000), None);
        assert_eq!(state.results.len(), QUESTION_COUNT);
    }

    #[test]
    fn test_restart_after_finish() {
        let mut state = started(77);
        while state.phase == GamePhase::InProgress {
            answer_correctly(&mut state, 5000);
        }
        let previous = state.questions.clone();

        assert_eq!(step(&mut state, GameEvent::Restart, 6000), Some(TimerCommand::Cancel));
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.index, 0);
        assert_eq!(state.countdown, COUNTDOWN_SECS);
        assert!(state.results.is_empty());
        assert!(state.buffer.is_empty());
        assert_eq!(state.total_secs, 0.0);
        assert_eq!(state.started_at_ms, None);
        assert_eq!(state.questions.len(), QUESTION_COUNT);
        assert_ne!(state.questions, previous);
    }

    #[test]
    fn test_determinism() {
        // Two games with the same seed and inputs end identically
        let mut a = started(99999);
        let mut b = started(99999);
        let inputs = [
            GameEvent::Digit(1),
            GameEvent::Tick,
            GameEvent::Digit(4),
            GameEvent::Backspace,
            GameEvent::Tick,
            GameEvent::Digit(7),
        ];
        for (i, event) in inputs.iter().enumerate() {
            let now = i as u64 * 100;
            assert_eq!(step(&mut a, *event, now), step(&mut b, *event, now));
        }
        assert_eq!(a.index, b.index);
        assert_eq!(a.countdown, b.countdown);
        assert_eq!(a.results, b.results);
    }
}
