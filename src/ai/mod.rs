//! Assistant module for etecnotes.
//!
//! Everything between a typed question and the assistant's reply lives
//! here: request composition, the Gemini HTTP backend, error
//! classification and the retry controller.
//!
//! # Architecture
//!
//! - `composer` - builds the wire request (system prompt, history window,
//!   generation settings)
//! - `gemini` - Gemini `generateContent` backend over reqwest
//! - `client` - retry controller wrapping any [`GenerativeBackend`]
//! - `error` - error taxonomy shared by the whole path
//!
//! # Usage
//!
//! ```rust,no_run
//! use etecnotes::ai::composer::build_request;
//! use etecnotes::ai::{AssistantClient, GeminiBackend};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let backend = GeminiBackend::from_env()?;
//! let client = AssistantClient::new(backend);
//! let request = build_request(&[], "Quais os horários da secretaria?", None);
//! let reply = client.generate(&request, |_| {}).await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod composer;
pub mod error;
pub mod gemini;

use async_trait::async_trait;

use composer::GenerateContentRequest;

/// One attempt against a generative backend. Implementations perform a
/// single request; retries are the [`AssistantClient`]'s job.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<String, AssistantError>;
}

// Re-export main types
pub use client::{AssistantClient, RetryNotice, RetryPolicy};
pub use composer::build_request;
pub use error::AssistantError;
pub use gemini::GeminiBackend;
