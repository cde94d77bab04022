use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, error};

use crate::config::Settings;
use crate::models::{GenerationRequest, GenerationResult};

pub const STATUS_FAILURE_MESSAGE: &str = "Failed to generate marketing content. Please try again.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")] Transport(String),
    #[error("generation service answered {status}: {body}")] Status { status: u16, body: String },
    #[error("malformed generation response: {0}")] Decode(String),
    #[error("could not build HTTP client: {0}")] Setup(String),
}

impl ServiceError {
    /// Text shown to the user under the form.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Status { .. } => STATUS_FAILURE_MESSAGE.to_string(),
            ServiceError::Transport(msg) if !msg.trim().is_empty() => msg.clone(),
            ServiceError::Transport(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// The remote content generator. One call, one answer, no retries.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ServiceError>;
}

pub struct HttpGenerationService {
    client: Client,
    endpoint: String,
}

impl HttpGenerationService {
    pub fn new(settings: &Settings) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ServiceError::Setup(e.to_string()))?;
        Ok(Self { client, endpoint: settings.generate_url() })
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ServiceError> {
        info!("🔗 Requesting marketing kit for '{}' from {}", request.business_name, self.endpoint);

        let response = self.client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("❌ Generation service error response: {}", preview(&body, 300));
            return Err(ServiceError::Status { status: status.as_u16(), body });
        }

        let response_text = response.text().await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        info!("📥 Raw generation response: {}", preview(&response_text, 1000));

        decode_kit(&response_text)
    }
}

/// Parses a success body. Only a JSON object counts as a kit; serde would otherwise fill
/// the struct positionally from an array.
pub fn decode_kit(body: &str) -> Result<GenerationResult, ServiceError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ServiceError::Decode(e.to_string()))?;
    if !value.is_object() {
        return Err(ServiceError::Decode(format!("expected a JSON object, got {}", preview(body, 80))));
    }
    serde_json::from_value(value).map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Shortens text for log lines without splitting a UTF-8 character.
pub fn preview(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars { return text.to_string(); }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...[{} chars total]", head, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_failures_use_fixed_message() {
        let err = ServiceError::Status { status: 500, body: "boom".into() };
        assert_eq!(err.user_message(), STATUS_FAILURE_MESSAGE);
    }

    #[test]
    fn transport_message_is_passed_through_or_replaced_when_blank() {
        assert_eq!(ServiceError::Transport("connection refused".into()).user_message(), "connection refused");
        assert_eq!(ServiceError::Transport(" ".into()).user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn preview_keeps_char_boundaries() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("☕☕☕☕", 2), "☕☕...[4 chars total]");
    }

    #[test]
    fn only_json_objects_decode_as_kits() {
        assert!(matches!(decode_kit(r#"["not","a","kit"]"#), Err(ServiceError::Decode(_))));
        assert!(matches!(decode_kit("null"), Err(ServiceError::Decode(_))));
        assert!(matches!(decode_kit("not json"), Err(ServiceError::Decode(_))));

        let kit = decode_kit(r#"{"business_type":"Cafe"}"#).unwrap();
        assert_eq!(kit.business_type.as_deref(), Some("Cafe"));
        assert_eq!(kit.industry, None);
    }

    #[test]
    fn endpoint_comes_from_settings() {
        let settings = Settings::default().with_service_url(Some("http://127.0.0.1:9/".into()));
        let service = HttpGenerationService::new(&settings).unwrap();
        assert_eq!(service.endpoint(), "http://127.0.0.1:9/generate");
    }
}
