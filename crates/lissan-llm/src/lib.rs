//! Single-turn client for OpenAI-compatible chat completion APIs

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod client;
mod error;
mod protocol;

pub use client::{CompletionClient, Completer, Prompt};
pub use error::{LlmError, Result};
