use async_trait::async_trait;
use gloo_net::http::Request;
use shared_types::{CreatedSnippet, ServerFailure, SnippetSubmission};

use crate::dom::escape_html;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Server sent a response that is not JSON: {0}")]
    Malformed(String),
    #[error("Server rejected the snippet with HTTP {status}")]
    Server { status: u16, markup: String },
    #[error("Server response is missing the snippet address: {0}")]
    ContractViolation(String),
}

/// Snippet-creation endpoint.
#[async_trait(?Send)]
pub trait SnippetApi {
    async fn create_snippet(&self, submission: &SnippetSubmission) -> Result<CreatedSnippet, ApiError>;
}

/// Interpret a finished exchange.
///
/// 2xx bodies must be `{"address": "<non-empty>"}`. Anything else on a 2xx is
/// a contract violation, or malformed when it is not JSON at all. Non-2xx
/// bodies are expected to be `{"errHTML": ...}`; a plain-text body is wrapped
/// into an error document.
pub fn classify_response(status: u16, body: &str) -> Result<CreatedSnippet, ApiError> {
    if !(200..300).contains(&status) {
        let markup = match serde_json::from_str::<ServerFailure>(body) {
            Ok(failure) => failure.err_html,
            Err(_) => error_document(status, body),
        };
        return Err(ApiError::Server { status, markup });
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;

    let created: CreatedSnippet = serde_json::from_value(value)
        .map_err(|e| ApiError::ContractViolation(e.to_string()))?;

    if created.address.trim().is_empty() {
        return Err(ApiError::ContractViolation("address is empty".to_string()));
    }

    Ok(created)
}

fn error_document(status: u16, body: &str) -> String {
    let message = body.trim();
    let message = if message.is_empty() {
        format!("HTTP {status}")
    } else {
        escape_html(message)
    };
    format!(
        "<html><head><title>Error {status}</title></head><body><main class=\"message\"><p>{message}</p><a href=\"/\">Home</a></main></body></html>"
    )
}

pub struct HttpSnippetApi {
    url: String,
}

impl HttpSnippetApi {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl SnippetApi for HttpSnippetApi {
    async fn create_snippet(&self, submission: &SnippetSubmission) -> Result<CreatedSnippet, ApiError> {
        let response = Request::post(&self.url)
            .json(submission)
            .map_err(|e| ApiError::Transport(format!("Failed to serialize request: {e}")))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read body: {e}")))?;

        classify_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_yields_address() {
        let created = classify_response(200, r#"{"address": "/abc123"}"#).unwrap();
        assert_eq!(created.address, "/abc123");
    }

    #[test]
    fn test_missing_address_is_contract_violation() {
        assert!(matches!(
            classify_response(200, r#"{"snippet": {"addr": "/abc123"}}"#),
            Err(ApiError::ContractViolation(_))
        ));
        assert!(matches!(
            classify_response(201, r#"{"address": ""}"#),
            Err(ApiError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_non_json_success_is_malformed() {
        assert!(matches!(
            classify_response(200, "<html>ok</html>"),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn test_server_failure_carries_err_html() {
        let err = classify_response(500, r#"{"errHTML": "<html><body>down</body></html>"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 500,
                markup: "<html><body>down</body></html>".to_string(),
            }
        );
    }

    #[test]
    fn test_plain_text_failure_is_wrapped_and_escaped() {
        let err = classify_response(400, "validation failed: Text: is blank <script>").unwrap_err();
        let ApiError::Server { status, markup } = err else {
            panic!("expected server failure");
        };
        assert_eq!(status, 400);
        assert!(markup.starts_with("<html>"));
        assert!(markup.contains("validation failed: Text: is blank &lt;script&gt;"));
        assert!(!markup.contains("<script>"));
    }
}
