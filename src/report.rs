//! End-of-round report
//!
//! Built from the controller's result log without touching it; rows are
//! re-ordered slowest first for display.

use serde::{Deserialize, Serialize};

use crate::round2;
use crate::sim::QuestionResult;

/// Status column of a report row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStatus {
    Right,
    #[serde(rename = "NA")]
    TimedOut,
    Wrong,
}

impl RowStatus {
    pub fn of(result: &QuestionResult) -> Self {
        if result.user_correct {
            RowStatus::Right
        } else if result.user_answer.is_timed_out() {
            RowStatus::TimedOut
        } else {
            RowStatus::Wrong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Right => "Right",
            RowStatus::TimedOut => "NA",
            RowStatus::Wrong => "Wrong",
        }
    }
}

/// One line of the breakdown table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub question: String,
    pub answer: u8,
    pub user: String,
    pub time_taken: u32,
    pub status: RowStatus,
}

impl From<&QuestionResult> for ReportRow {
    fn from(result: &QuestionResult) -> Self {
        Self {
            question: result.question_text(),
            answer: result.correct_answer,
            user: result.user_answer.to_string(),
            time_taken: result.time_taken,
            status: RowStatus::of(result),
        }
    }
}

/// Summary of a finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Wall-clock seconds from start to the last answer
    pub total_secs: f64,
    /// Percent correct, two decimals; `None` when there are no results
    pub accuracy: Option<f64>,
    pub correct: usize,
    pub total: usize,
    /// Rows ordered by time taken, slowest first
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn build(results: &[QuestionResult], total_secs: f64) -> Self {
        let total = results.len();
        let correct = results.iter().filter(|r| r.user_correct).count();
        let accuracy = if total == 0 {
            None
        } else {
            Some(round2(100.0 * correct as f64 / total as f64))
        };

        let mut rows: Vec<ReportRow> = results.iter().map(ReportRow::from).collect();
        // Stable: equal times keep answer order
        rows.sort_by(|a, b| b.time_taken.cmp(&a.time_taken));

        Self {
            total_secs,
            accuracy,
            correct,
            total,
            rows,
        }
    }

    /// Accuracy as shown on screen, e.g. `"67.19%"`
    pub fn accuracy_label(&self) -> String {
        match self.accuracy {
            Some(pct) => format!("{:.2}%", pct),
            None => "no data".to_string(),
        }
    }

    /// Total time as shown on screen, e.g. `"93.42s"`
    pub fn total_time_label(&self) -> String {
        format!("{:.2}s", self.total_secs)
    }
}
