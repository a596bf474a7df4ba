use serde_json::json;
use thiserror::Error;

use crate::config::GenerationConfig;

/// One generation call: an instruction, the learner content, and an
/// optional JSON schema constraining the response shape.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub instruction: String,
    pub content: String,
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("service returned status {status}")]
    Status { status: u16 },
}

/// Wire seam for the generative service. Returns the raw 2xx response body;
/// non-success statuses and transport failures are errors, which the client
/// treats as retryable.
#[allow(async_fn_in_trait)]
pub trait GenerationTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<String, TransportError>;
}

impl<T: GenerationTransport> GenerationTransport for &T {
    async fn send(&self, request: &GenerationRequest) -> Result<String, TransportError> {
        (**self).send(request).await
    }
}

/// reqwest-backed transport speaking a `generateContent`-style JSON API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: GenerationConfig,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &GenerationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            config: config.clone(),
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl GenerationTransport for HttpTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<String, TransportError> {
        let mut body = json!({
            "systemInstruction": { "parts": [{ "text": request.instruction }] },
            "contents": [{ "role": "user", "parts": [{ "text": request.content }] }],
        });
        if let Some(schema) = &request.response_schema {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))
    }
}
