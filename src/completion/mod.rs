pub mod errors;
pub mod gemini;

pub use errors::CompletionError;
pub use gemini::GeminiClient;

use async_trait::async_trait;

/// A hosted text-generation model.
///
/// One prompt in, one full completion out: no streaming, no retries, no
/// sampling-parameter surface. Behind a trait so handlers can be tested
/// against a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
