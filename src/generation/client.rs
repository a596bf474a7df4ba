use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::constants::{MAX_GENERATION_ATTEMPTS, OPTIONS_PER_QUESTION};
use crate::generation::prompt;
use crate::generation::transport::{GenerationRequest, GenerationTransport, TransportError};
use crate::profile::LearningStyle;
use crate::quiz::types::{QuizBatch, QuizQuestion};
use crate::session::SourceAttribution;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// All attempts exhausted. Distinct from the per-attempt transport error,
    /// which is carried as the source.
    #[error("generation service unavailable after {attempts} attempts")]
    Unavailable {
        attempts: u32,
        #[source]
        last: TransportError,
    },
    /// The service answered 2xx but the content fails shape validation.
    /// Never retried: re-sending the same request would not fix it.
    #[error("malformed generation response: {0}")]
    Malformed(String),
}

/// Study-aid payload parsed out of a generation response.
#[derive(Debug, Clone)]
pub struct StudyAidContent {
    pub text: String,
    pub sources: Vec<SourceAttribution>,
}

/// Client for the external generative service. Transport failures and
/// non-2xx statuses are retried with exponential backoff; shape failures
/// surface immediately as [`GenerationError::Malformed`].
#[derive(Debug, Clone)]
pub struct GenerationClient<T: GenerationTransport> {
    transport: T,
}

impl<T: GenerationTransport> GenerationClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Issue the request, retrying up to [`MAX_GENERATION_ATTEMPTS`] times
    /// total. The delay before retry `k` is `2^k` seconds (2s, then 4s).
    /// No partial state is kept between attempts.
    async fn request_with_backoff(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        let mut attempt = 1;
        loop {
            match self.transport.send(request).await {
                Ok(body) => return Ok(body),
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "Generation attempt failed");
                    if attempt >= MAX_GENERATION_ATTEMPTS {
                        return Err(GenerationError::Unavailable {
                            attempts: attempt,
                            last: err,
                        });
                    }
                    tokio::time::sleep(Duration::from_secs(1 << attempt)).await;
                    attempt += 1;
                }
            }
        }
    }

    pub async fn generate_study_aid(
        &self,
        content: &str,
        style: LearningStyle,
    ) -> Result<StudyAidContent, GenerationError> {
        let request = GenerationRequest {
            instruction: prompt::study_aid_instruction(style),
            content: content.to_string(),
            response_schema: None,
        };

        let body = self.request_with_backoff(&request).await?;
        let value = parse_body(&body)?;

        let text = response_text(&value)
            .ok_or_else(|| GenerationError::Malformed("missing text field".to_string()))?;
        let sources = response_sources(&value);

        Ok(StudyAidContent { text, sources })
    }

    pub async fn generate_quiz_batch(&self, context: &str) -> Result<QuizBatch, GenerationError> {
        let request = GenerationRequest {
            instruction: prompt::quiz_instruction(),
            content: context.to_string(),
            response_schema: Some(prompt::quiz_response_schema()),
        };

        let body = self.request_with_backoff(&request).await?;
        let value = parse_body(&body)?;

        let text = response_text(&value)
            .ok_or_else(|| GenerationError::Malformed("missing text field".to_string()))?;

        let questions: Vec<QuizQuestion> = serde_json::from_str(&text)
            .map_err(|e| GenerationError::Malformed(format!("quiz payload: {e}")))?;
        if questions.is_empty() {
            return Err(GenerationError::Malformed(
                "quiz payload contains no questions".to_string(),
            ));
        }
        for (i, q) in questions.iter().enumerate() {
            if q.correct_answer_index >= OPTIONS_PER_QUESTION {
                return Err(GenerationError::Malformed(format!(
                    "question {i} has correct answer index {} out of range",
                    q.correct_answer_index
                )));
            }
        }

        Ok(QuizBatch::new(questions))
    }
}

fn parse_body(body: &str) -> Result<Value, GenerationError> {
    serde_json::from_str(body)
        .map_err(|e| GenerationError::Malformed(format!("response body: {e}")))
}

/// Concatenated text of the first candidate's parts, or `None` when absent.
fn response_text(value: &Value) -> Option<String> {
    let parts = value
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Source attributions from grounding metadata. Entries missing either
/// field are dropped, not defaulted.
fn response_sources(value: &Value) -> Vec<SourceAttribution> {
    value["candidates"][0]["groundingMetadata"]["groundingChunks"]
        .as_array()
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| {
                    let web = chunk.get("web")?;
                    Some(SourceAttribution {
                        uri: web.get("uri")?.as_str()?.to_string(),
                        title: web.get("title")?.as_str()?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
