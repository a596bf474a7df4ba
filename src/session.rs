use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extract::{ContentExtractor, Document, ExtractError};
use crate::gate::SessionGate;
use crate::generation::{GenerationClient, GenerationError, GenerationTransport};
use crate::notify::{Notifier, SessionEvent};
use crate::profile::ProfileState;
use crate::quiz::types::QuizBatch;

/// A `{uri, title}` attribution extracted from a generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAttribution {
    pub uri: String,
    pub title: String,
}

/// The generated study aid. Immutable once created; replaced wholesale by
/// the next successful generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyAidArtifact {
    pub text: String,
    pub style_label: String,
    pub sources: Vec<SourceAttribution>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a generation request is already in flight")]
    Busy,
    #[error("no study aid has been generated yet")]
    NoArtifact,
    #[error(transparent)]
    Extraction(#[from] ExtractError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Sequences extraction and study-aid generation and holds exactly one
/// artifact at a time. Shares its [`SessionGate`] with the quiz engine so
/// mutating calls are rejected while a generation request is suspended.
pub struct StudyAidSession<T: GenerationTransport, E: ContentExtractor, N: Notifier> {
    client: GenerationClient<T>,
    extractor: E,
    notifier: N,
    gate: SessionGate,
    artifact: Option<StudyAidArtifact>,
}

impl<T: GenerationTransport, E: ContentExtractor, N: Notifier> StudyAidSession<T, E, N> {
    pub fn new(client: GenerationClient<T>, extractor: E, notifier: N, gate: SessionGate) -> Self {
        Self {
            client,
            extractor,
            notifier,
            gate,
            artifact: None,
        }
    }

    pub fn artifact(&self) -> Option<&StudyAidArtifact> {
        self.artifact.as_ref()
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    /// Extract the document and generate a study aid for the active style.
    /// Any failure leaves the previously held artifact unchanged; success
    /// replaces it in one step.
    pub async fn produce(
        &mut self,
        document: &Document,
        profile: &ProfileState,
    ) -> Result<&StudyAidArtifact, SessionError> {
        let _guard = self.gate.claim().ok_or(SessionError::Busy)?;
        self.notifier.notify(SessionEvent::GenerationStarted);

        let style = profile.current_style();
        let text = match self.extractor.extract(document) {
            Ok(text) => text,
            Err(e) => {
                self.notifier.notify(SessionEvent::GenerationFailed {
                    message: e.to_string(),
                });
                return Err(e.into());
            }
        };

        let content = match self.client.generate_study_aid(&text, style).await {
            Ok(content) => content,
            Err(e) => {
                self.notifier.notify(SessionEvent::GenerationFailed {
                    message: e.to_string(),
                });
                return Err(e.into());
            }
        };

        self.notifier.notify(SessionEvent::GenerationSucceeded);
        Ok(self.artifact.insert(StudyAidArtifact {
            text: content.text,
            style_label: style.label().to_string(),
            sources: content.sources,
            generated_at: Utc::now(),
        }))
    }

    /// Generate a quiz batch from the held artifact's text. The caller loads
    /// the returned batch into the quiz engine.
    pub async fn generate_quiz(&self) -> Result<QuizBatch, SessionError> {
        let _guard = self.gate.claim().ok_or(SessionError::Busy)?;
        let artifact = self.artifact.as_ref().ok_or(SessionError::NoArtifact)?;

        self.notifier.notify(SessionEvent::GenerationStarted);
        match self.client.generate_quiz_batch(&artifact.text).await {
            Ok(batch) => {
                self.notifier.notify(SessionEvent::GenerationSucceeded);
                Ok(batch)
            }
            Err(e) => {
                self.notifier.notify(SessionEvent::GenerationFailed {
                    message: e.to_string(),
                });
                Err(e.into())
            }
        }
    }
}
