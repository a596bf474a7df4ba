#![allow(dead_code)]

use std::sync::Mutex;

use serde_json::json;

use studycoach::generation::{GenerationRequest, GenerationTransport, TransportError};
use studycoach::notify::{Notifier, SessionEvent};
use studycoach::profile::{LearningStyle, ProfileStore, ProfileStoreError};
use studycoach::quiz::types::{QuizBatch, QuizQuestion, StyleExplanations};

/// Transport that replays a scripted sequence of responses, one per attempt.
pub struct ScriptedTransport {
    responses: Mutex<Vec<Result<String, TransportError>>>,
    attempts: Mutex<u32>,
}

impl ScriptedTransport {
    pub fn new(mut responses: Vec<Result<String, TransportError>>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            attempts: Mutex::new(0),
        }
    }

    pub fn always_failing() -> Self {
        Self::new(vec![])
    }

    pub fn attempts(&self) -> u32 {
        *self.attempts.lock().unwrap()
    }
}

impl GenerationTransport for ScriptedTransport {
    async fn send(&self, _request: &GenerationRequest) -> Result<String, TransportError> {
        *self.attempts.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(TransportError::Status { status: 503 }))
    }
}

/// Wrap free text in the service's response envelope.
pub fn envelope(text: &str) -> String {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
}

/// In-memory preference store that records every save.
#[derive(Default)]
pub struct MemoryStore {
    pub saved: Mutex<Vec<LearningStyle>>,
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> LearningStyle {
        self.saved
            .lock()
            .unwrap()
            .last()
            .copied()
            .unwrap_or_default()
    }

    fn save(&self, style: LearningStyle) -> Result<(), ProfileStoreError> {
        self.saved.lock().unwrap().push(style);
        Ok(())
    }
}

/// Notifier that records every event for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<SessionEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn question(correct: usize) -> QuizQuestion {
    QuizQuestion {
        question: "which option is correct?".to_string(),
        options: [
            "option a".to_string(),
            "option b".to_string(),
            "option c".to_string(),
            "option d".to_string(),
        ],
        correct_answer_index: correct,
        explanations: StyleExplanations {
            visual: "picture the options side by side".to_string(),
            practical: "try each option against the example".to_string(),
            conceptual: "the principle rules out the others".to_string(),
        },
    }
}

/// Batch where every question's correct answer is option 0.
pub fn batch(n: usize) -> QuizBatch {
    QuizBatch::new((0..n).map(|_| question(0)).collect())
}
