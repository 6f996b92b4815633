//! Chat relay endpoint
//!
//! Flow: front-end message list -> variant system prompt prepended ->
//! completion API -> first choice returned as the reply.
//!
//! The handler holds no state of its own. Each request is a single-shot
//! transformation with two terminal outcomes: 200 with the generated
//! reply, or 500 with an opaque failure body.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;
use crate::upstream::ChatMessage;

/// Experimental condition selecting which system prompt is prepended to
/// the conversation.
///
/// The tag arrives as free text from the front end; every value (including
/// an absent one) maps to exactly one variant, so prompt selection is
/// total and can never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Condition "A"
    A,
    /// Condition "B"
    B,
    /// Any other tag, or no tag at all
    Default,
}

impl Variant {
    /// Map a caller-supplied tag to a variant
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("A") => Variant::A,
            Some("B") => Variant::B,
            _ => Variant::Default,
        }
    }

    /// The fixed system prompt for this variant
    pub fn system_prompt(self) -> &'static str {
        match self {
            Variant::A => "You are Chatbot-A. Respond to user questions",
            Variant::B => "You are Chatbot-B. [[ DEFINE RULES FOR VARIANT B HERE ]]",
            Variant::Default => "You are a helpful assistant.",
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Conversation so far, in order. Entries are forwarded verbatim.
    pub messages: Vec<ChatMessage>,
    /// Experimental condition tag; unknown or absent tags fall back to the
    /// generic assistant prompt
    #[serde(default)]
    pub variant: Option<String>,
    /// Opaque front-end payload, accepted but not consumed
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

#[allow(missing_docs)]
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The assistant's generated reply
    pub reply: String,
}

/// Build the message sequence sent upstream: the variant's system prompt
/// first, then the caller's messages unchanged and in their original order.
pub fn compose_messages(variant: Variant, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut composed = Vec::with_capacity(messages.len() + 1);
    composed.push(ChatMessage {
        role: "system".to_string(),
        content: variant.system_prompt().to_string(),
    });
    composed.extend(messages);
    composed
}

/// POST /chat - relay a conversation to the completion service
///
/// This endpoint:
/// 1. Receives the conversation and an optional variant tag
/// 2. Prepends the variant-specific system prompt
/// 3. Calls the completion API with a fixed model and temperature
/// 4. Returns the first choice's content as `{reply}`
///
/// Any upstream failure is logged and surfaced as a generic 500 response.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let variant = Variant::from_tag(request.variant.as_deref());

    info!(
        variant = ?variant,
        message_count = request.messages.len(),
        "Chat request received"
    );

    let composed = compose_messages(variant, request.messages);
    let reply = state.upstream.chat_completion(composed).await?;

    info!(reply_len = reply.len(), "Completion received");

    Ok(Json(ChatResponse { reply }))
}
