use serde::{Deserialize, Serialize};

use crate::constants::OPTIONS_PER_QUESTION;
use crate::profile::LearningStyle;

/// One explanation per learning style; all three are required, so a batch
/// with a missing explanation fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleExplanations {
    pub visual: String,
    pub practical: String,
    pub conceptual: String,
}

impl StyleExplanations {
    pub fn for_style(&self, style: LearningStyle) -> &str {
        match style {
            LearningStyle::Visual => &self.visual,
            LearningStyle::Practical => &self.practical,
            LearningStyle::Conceptual => &self.conceptual,
        }
    }
}

/// A single multiple-choice question. The fixed-size `options` array makes
/// the four-option invariant a parse-time guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    pub correct_answer_index: usize,
    pub explanations: StyleExplanations,
}

/// Questions generated together from one study-aid artifact. Immutable once
/// created; replaced wholesale by a new generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizBatch {
    questions: Vec<QuizQuestion>,
}

impl QuizBatch {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerStatus {
    Unanswered,
    Correct,
    Incorrect,
    Completed,
}

/// Runtime state of one quiz run, owned by the engine.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub(crate) batch: QuizBatch,
    pub(crate) position: usize,
    pub(crate) status: AnswerStatus,
    pub(crate) selected_option: Option<usize>,
    pub(crate) consecutive_incorrect: u32,
    pub(crate) score: u32,
}

impl QuizSession {
    pub(crate) fn new(batch: QuizBatch) -> Self {
        Self {
            batch,
            position: 0,
            status: AnswerStatus::Unanswered,
            selected_option: None,
            consecutive_incorrect: 0,
            score: 0,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.position = 0;
        self.status = AnswerStatus::Unanswered;
        self.selected_option = None;
        self.consecutive_incorrect = 0;
        self.score = 0;
    }

    pub fn batch(&self) -> &QuizBatch {
        &self.batch
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn status(&self) -> AnswerStatus {
        self.status
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn consecutive_incorrect(&self) -> u32 {
        self.consecutive_incorrect
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.batch.questions()[self.position]
    }
}
