//! Completion API wire types
//!
//! Structs that mirror the completion API JSON request/response format.
//! Used to serialize requests and deserialize API responses into typed
//! Rust structs.

use serde::{Deserialize, Serialize};

/// A single conversation message.
///
/// Inbound messages are forwarded to the completion API verbatim, so the
/// same struct serves as both the request data model and the wire format.
/// `role` is not validated here; unexpected values are passed through and
/// rejected (if at all) by the upstream service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message role ("system", "user" or "assistant")
    pub role: String,
    /// Message content
    pub content: String,
}

/// Request body for the chat-completions endpoint
#[derive(Serialize, Debug)]
pub struct ChatCompletionRequest {
    /// Model identifier to run the completion with
    pub model: String,
    /// Ordered conversation, system prompt first
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
}

/// Top-level completion API response
#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    /// List of candidate completions from the model
    pub choices: Vec<Choice>,
}

/// A single candidate completion
#[derive(Deserialize, Debug)]
pub struct Choice {
    /// The generated message for this choice
    pub message: ChoiceMessage,
    /// Why the model stopped generating (if applicable)
    #[serde(default)]
    #[allow(dead_code)] // Part of API response format, may be used in future
    pub finish_reason: Option<String>,
}

/// The message carried by a completion choice
#[derive(Deserialize, Debug)]
pub struct ChoiceMessage {
    /// Role of the generated message (e.g., "assistant")
    #[serde(default)]
    #[allow(dead_code)] // Part of API response format, may be used in future
    pub role: String,
    /// The generated text content
    #[serde(default)]
    pub content: String,
}
