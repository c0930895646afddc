//! Request body builders and helpers for OpenAI-compatible APIs: chat
//! completions with structured output, embeddings, image-to-text, and prompt
//! token counting.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod payloads;

pub use error::{Error, Result};
