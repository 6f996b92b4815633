//! Completion API client
//!
//! Direct HTTP client for calling the chat-completions API. Constructed
//! once at startup from environment configuration and reused across all
//! requests (connection pooling); handlers receive it by reference and
//! never rebuild or mutate it.

use crate::upstream::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use thiserror::Error;

const COMPLETION_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Model the relay completes with
pub const COMPLETION_MODEL: &str = "gpt-4.1-mini";

/// Sampling temperature sent with every completion request
pub const SAMPLING_TEMPERATURE: f32 = 0.7;

/// Errors raised by the completion call.
///
/// The distinctions exist for operator logs only; every variant is
/// surfaced to HTTP callers as the same opaque failure response.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// API key was empty when the call was attempted
    #[error("API key is empty")]
    MissingCredential,

    /// The HTTP request could not be sent or its body could not be read
    #[error("failed to call completion API: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("completion API returned error status {status}: {body}")]
    Status {
        /// HTTP status code returned by the API
        status: u16,
        /// Raw error body, for logs
        body: String,
    },

    /// The API answered 2xx but the payload was not usable
    #[error("unexpected completion API payload: {0}")]
    Payload(String),
}

/// Shared client for the chat-completions endpoint
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl UpstreamClient {
    /// Create a client against the production API endpoint.
    ///
    /// An empty `api_key` is accepted here; the key is checked when a
    /// completion is requested, so a missing credential fails per request
    /// rather than at startup.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, COMPLETION_API_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL (used by tests)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            // No explicit timeout: the client default applies
            http: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    /// Request a completion for `messages` and return the first choice's
    /// message content.
    ///
    /// # Errors
    /// * Returns `UpstreamError` if the API key is empty, the HTTP request
    ///   fails, the API returns a non-success status, or the response
    ///   carries no usable choice.
    pub async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String, UpstreamError> {
        if self.api_key.is_empty() {
            return Err(UpstreamError::MissingCredential);
        }

        let url = format!("{}/chat/completions", self.base_url);
        let request_body = ChatCompletionRequest {
            model: COMPLETION_MODEL.to_string(),
            messages,
            temperature: SAMPLING_TEMPERATURE,
        };

        tracing::debug!(
            url = %url,
            model = COMPLETION_MODEL,
            message_count = request_body.messages.len(),
            "Calling completion API"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "Completion API returned error status"
            );

            return Err(UpstreamError::Status {
                status: status_code,
                body: error_body,
            });
        }

        // Parse response body
        let response_body = response.text().await?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&response_body).map_err(|e| {
            UpstreamError::Payload(format!(
                "failed to parse JSON response: {} - Response body: {}",
                e, response_body
            ))
        })?;

        // Extract text content
        let choice = parsed
            .choices
            .first()
            .ok_or_else(|| UpstreamError::Payload("response contains no choices".to_string()))?;

        let content = &choice.message.content;
        if content.is_empty() {
            return Err(UpstreamError::Payload(
                "choice message content is empty".to_string(),
            ));
        }

        tracing::debug!(
            response_len = content.len(),
            "Successfully received completion"
        );

        Ok(content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    fn user_message(content: &str) -> ChatMessage {
        ChatMessage {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_chat_completion_empty_api_key() {
        let client = UpstreamClient::new(String::new());
        let result = client.chat_completion(vec![user_message("Hi")]).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key is empty"));
    }

    #[tokio::test]
    #[serial]
    async fn test_chat_completion_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4.1-mini",
                "temperature": 0.7,
            })))
            .with_status(200)
            .with_body(
                r#"{
                    "choices": [{
                        "message": {
                            "role": "assistant",
                            "content": "This is a test response"
                        },
                        "finish_reason": "stop"
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = UpstreamClient::with_base_url("test-key".to_string(), server.url());
        let result = client.chat_completion(vec![user_message("Hi")]).await;

        mock.assert_async().await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "This is a test response");
    }

    #[tokio::test]
    #[serial]
    async fn test_chat_completion_forwards_messages_verbatim() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant."},
                    {"role": "user", "content": "Hi"},
                    {"role": "assistant", "content": "Hello"},
                    {"role": "user", "content": "Bye"}
                ],
            })))
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "ok"}}]}"#)
            .create_async()
            .await;

        let client = UpstreamClient::with_base_url("test-key".to_string(), server.url());
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: "You are a helpful assistant.".to_string(),
            },
            user_message("Hi"),
            ChatMessage {
                role: "assistant".to_string(),
                content: "Hello".to_string(),
            },
            user_message("Bye"),
        ];
        let result = client.chat_completion(messages).await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_chat_completion_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let client = UpstreamClient::with_base_url("bad-key".to_string(), server.url());
        let result = client.chat_completion(vec![user_message("Hi")]).await;

        mock.assert_async().await;
        assert!(result.is_err());
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("401"), "got: {}", error_msg);
    }

    #[tokio::test]
    #[serial]
    async fn test_chat_completion_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"This is not JSON"#)
            .create_async()
            .await;

        let client = UpstreamClient::with_base_url("test-key".to_string(), server.url());
        let result = client.chat_completion(vec![user_message("Hi")]).await;

        mock.assert_async().await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("failed to parse JSON"));
    }

    #[tokio::test]
    #[serial]
    async fn test_chat_completion_empty_choices() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = UpstreamClient::with_base_url("test-key".to_string(), server.url());
        let result = client.chat_completion(vec![user_message("Hi")]).await;

        mock.assert_async().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no choices"));
    }

    #[tokio::test]
    #[serial]
    async fn test_chat_completion_empty_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": ""}}]}"#)
            .create_async()
            .await;

        let client = UpstreamClient::with_base_url("test-key".to_string(), server.url());
        let result = client.chat_completion(vec![user_message("Hi")]).await;

        mock.assert_async().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("content is empty"));
    }
}
