//! Request body builders and fixed answers for OpenAI-compatible APIs.
//!
//! Every builder is stateless; only [`tokens`] talks to the network.

/// Structured-output request for generated addresses.
pub mod address;
/// Embedding request body.
pub mod embeddings;
/// Chat message wire types.
pub mod messages;
pub mod prompt;
pub(crate) mod runtime;
/// Sentiment classifier test program.
pub mod sentiment;
/// Companion service endpoints.
pub mod services;
/// Cosine similarity helpers and reference snippet.
pub mod similarity;
/// Prompt token counting.
pub mod tokens;
/// Image to data URL and text extraction request.
pub mod vision;

pub use runtime::RetryConfig;
