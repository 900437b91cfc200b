//! Question generation
//!
//! A round uses every (num1, num2) pair from the operand range exactly once,
//! in an order shuffled by the seeded RNG.

use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One addition problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub num1: u8,
    pub num2: u8,
    pub answer: u8,
}

impl Question {
    pub fn new(num1: u8, num2: u8) -> Self {
        Self {
            num1,
            num2,
            answer: num1 + num2,
        }
    }

    /// Display text, e.g. `"3 + 4"`
    pub fn text(&self) -> String {
        format!("{} + {}", self.num1, self.num2)
    }
}

/// The ordered questions for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Enumerate all operand pairs and shuffle them into presentation order
    pub fn generate(rng: &mut Pcg32) -> Self {
        let mut questions: Vec<Question> = (OPERAND_MIN..=OPERAND_MAX)
            .flat_map(|a| (OPERAND_MIN..=OPERAND_MAX).map(move |b| Question::new(a, b)))
            .collect();
        questions.shuffle(rng);
        debug_assert_eq!(questions.len(), QUESTION_COUNT);
        Self { questions }
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
