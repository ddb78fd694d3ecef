//! Generative-AI provider abstraction
//!
//! The proxy endpoint treats the remote model as an opaque text-in/text-out
//! call. The trait keeps the HTTP handler decoupled from the concrete vendor
//! and lets tests substitute a mock.

use crate::error::AppResult;

pub mod gemini;

pub use gemini::GeminiProvider;

/// Trait for generative text providers
///
/// One attempt per call: no retry, no timeout beyond the client default.
/// Failures (transport or safety block) surface as upstream errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Sends a prompt and returns the generated text.
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}
