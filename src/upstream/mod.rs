//! Upstream completion service
//!
//! Typed client for the external chat-completion API. The client is built
//! once at startup and shared by every handler invocation.

pub mod client;
pub mod types;

pub use client::{UpstreamClient, UpstreamError};
pub use types::ChatMessage;
