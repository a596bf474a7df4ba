use crate::profile::LearningStyle;

/// Discrete events the core surfaces to the embedding application.
/// Fire-and-forget: the core never consumes a return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    FilesSelected { count: usize },
    GenerationStarted,
    GenerationSucceeded,
    GenerationFailed { message: String },
    AnswerCorrect,
    AnswerIncorrect { streak: u32 },
    StyleSwitched { new_style: LearningStyle },
    QuizCompleted { score: u32, total: u32 },
}

pub trait Notifier {
    fn notify(&self, event: SessionEvent);
}

impl<T: Notifier> Notifier for &T {
    fn notify(&self, event: SessionEvent) {
        (**self).notify(event);
    }
}

/// Notifier that renders every event as a structured log line.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: SessionEvent) {
        match event {
            SessionEvent::FilesSelected { count } => {
                tracing::info!(count, "Files selected");
            }
            SessionEvent::GenerationStarted => {
                tracing::info!("Generation started");
            }
            SessionEvent::GenerationSucceeded => {
                tracing::info!("Generation succeeded");
            }
            SessionEvent::GenerationFailed { message } => {
                tracing::warn!(%message, "Generation failed");
            }
            SessionEvent::AnswerCorrect => {
                tracing::info!("Answer correct");
            }
            SessionEvent::AnswerIncorrect { streak } => {
                tracing::info!(streak, "Answer incorrect");
            }
            SessionEvent::StyleSwitched { new_style } => {
                tracing::info!(style = %new_style, "Learning style switched");
            }
            SessionEvent::QuizCompleted { score, total } => {
                tracing::info!(score, total, "Quiz completed");
            }
        }
    }
}

/// Notifier that drops every event. Useful when no UI is attached.
#[derive(Debug, Clone, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: SessionEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_notifier_accepts_every_event() {
        let notifier = TracingNotifier;
        notifier.notify(SessionEvent::FilesSelected { count: 2 });
        notifier.notify(SessionEvent::GenerationFailed {
            message: "boom".to_string(),
        });
        notifier.notify(SessionEvent::StyleSwitched {
            new_style: LearningStyle::Practical,
        });
        notifier.notify(SessionEvent::QuizCompleted { score: 2, total: 5 });
    }
}
