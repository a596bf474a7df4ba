use thiserror::Error;

use crate::constants::{OPTIONS_PER_QUESTION, STREAK_SWITCH_THRESHOLD};
use crate::gate::SessionGate;
use crate::notify::{Notifier, SessionEvent};
use crate::profile::{LearningStyle, ProfileState, ProfileStore};
use crate::quiz::types::{AnswerStatus, QuizBatch, QuizSession};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("quiz batch is empty")]
    EmptyBatch,
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
    #[error("a generation request is in flight")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { score: u32 },
    Incorrect { streak: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the next question. `switched_to` carries the new style when
    /// the incorrect streak forced a rotation during this advance.
    Advanced { switched_to: Option<LearningStyle> },
    /// The last question was just left; the session is terminal until
    /// `load_batch` or `retake`.
    Completed { score: u32, total: u32 },
}

/// Explanation selected for the current incorrect answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledExplanation<'a> {
    pub style: LearningStyle,
    pub text: &'a str,
}

/// The adaptive state machine driving one quiz run.
///
/// States: `Unanswered → {Correct, Incorrect} → (advance) → Unanswered |
/// Completed`. Three consecutive incorrect answers rotate the learner's
/// style on the next advance and charge the confidence penalty; the streak
/// reset keeps the rule from re-firing on the very next miss.
pub struct QuizEngine<S: ProfileStore, N: Notifier> {
    store: S,
    notifier: N,
    gate: SessionGate,
    session: Option<QuizSession>,
}

impl<S: ProfileStore, N: Notifier> QuizEngine<S, N> {
    pub fn new(store: S, notifier: N, gate: SessionGate) -> Self {
        Self {
            store,
            notifier,
            gate,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Replace any existing session with a fresh one over `batch`.
    pub fn load_batch(&mut self, batch: QuizBatch) -> Result<(), EngineError> {
        self.ensure_idle()?;
        if batch.is_empty() {
            return Err(EngineError::EmptyBatch);
        }
        self.session = Some(QuizSession::new(batch));
        Ok(())
    }

    /// Record the one answer allowed for the current question instance.
    /// A rejected call leaves the engine state unchanged.
    pub fn submit_answer(
        &mut self,
        profile: &mut ProfileState,
        index: usize,
    ) -> Result<AnswerOutcome, EngineError> {
        self.ensure_idle()?;
        let session = self
            .session
            .as_mut()
            .ok_or(EngineError::InvalidOperation("no quiz loaded"))?;
        if session.status != AnswerStatus::Unanswered {
            return Err(EngineError::InvalidOperation(
                "current question already answered",
            ));
        }
        if index >= OPTIONS_PER_QUESTION {
            return Err(EngineError::InvalidOperation("option index out of range"));
        }

        session.selected_option = Some(index);
        if index == session.current_question().correct_answer_index {
            session.status = AnswerStatus::Correct;
            session.score += 1;
            session.consecutive_incorrect = 0;
            profile.bump_confidence();
            self.notifier.notify(SessionEvent::AnswerCorrect);
            Ok(AnswerOutcome::Correct {
                score: session.score,
            })
        } else {
            session.status = AnswerStatus::Incorrect;
            session.consecutive_incorrect += 1;
            self.notifier.notify(SessionEvent::AnswerIncorrect {
                streak: session.consecutive_incorrect,
            });
            Ok(AnswerOutcome::Incorrect {
                streak: session.consecutive_incorrect,
            })
        }
    }

    /// Explanation for the current question, defined only while the status
    /// is `Incorrect`. At the switch threshold the explanation previews the
    /// style the engine is about to rotate to; otherwise it follows the
    /// learner's current style. Pure function of session and profile, no
    /// cached state.
    pub fn explanation_to_show(&self, profile: &ProfileState) -> Option<StyledExplanation<'_>> {
        let session = self.session.as_ref()?;
        if session.status != AnswerStatus::Incorrect {
            return None;
        }
        let style = if session.consecutive_incorrect >= STREAK_SWITCH_THRESHOLD {
            profile.current_style().next()
        } else {
            profile.current_style()
        };
        Some(StyledExplanation {
            style,
            text: session.current_question().explanations.for_style(style),
        })
    }

    /// Leave the current question. On the last index the session becomes
    /// terminal; otherwise the style-switch rule is evaluated before moving
    /// the position.
    pub fn advance(&mut self, profile: &mut ProfileState) -> Result<AdvanceOutcome, EngineError> {
        self.ensure_idle()?;
        let session = self
            .session
            .as_mut()
            .ok_or(EngineError::InvalidOperation("no quiz loaded"))?;

        match session.status {
            AnswerStatus::Unanswered => Err(EngineError::InvalidOperation(
                "answer the current question before advancing",
            )),
            AnswerStatus::Completed => {
                Err(EngineError::InvalidOperation("quiz already completed"))
            }
            AnswerStatus::Correct | AnswerStatus::Incorrect => {
                if session.position + 1 == session.batch.len() {
                    session.status = AnswerStatus::Completed;
                    let (score, total) = (session.score, session.batch.len() as u32);
                    self.notifier
                        .notify(SessionEvent::QuizCompleted { score, total });
                    return Ok(AdvanceOutcome::Completed { score, total });
                }

                let mut switched_to = None;
                if session.status == AnswerStatus::Incorrect
                    && session.consecutive_incorrect >= STREAK_SWITCH_THRESHOLD
                {
                    // Style change and confidence penalty land together;
                    // the streak reset prevents an immediate re-trigger.
                    let new_style = profile.switch_to_next();
                    session.consecutive_incorrect = 0;
                    if let Err(e) = self.store.save(new_style) {
                        tracing::warn!(error = %e, style = %new_style, "Failed to persist style preference after switch");
                    }
                    self.notifier
                        .notify(SessionEvent::StyleSwitched { new_style });
                    switched_to = Some(new_style);
                }

                session.position += 1;
                session.status = AnswerStatus::Unanswered;
                session.selected_option = None;
                Ok(AdvanceOutcome::Advanced { switched_to })
            }
        }
    }

    /// Restart the same batch from the top. Never touches the profile.
    pub fn retake(&mut self) -> Result<(), EngineError> {
        self.ensure_idle()?;
        let session = self
            .session
            .as_mut()
            .ok_or(EngineError::InvalidOperation("no quiz loaded"))?;
        session.reset();
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.gate.is_busy() {
            return Err(EngineError::Busy);
        }
        Ok(())
    }
}
