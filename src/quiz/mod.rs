pub mod engine;
pub mod types;

pub use engine::{AdvanceOutcome, AnswerOutcome, EngineError, QuizEngine, StyledExplanation};
pub use types::{AnswerStatus, QuizBatch, QuizQuestion, QuizSession, StyleExplanations};
