//! AI service integration for image and script generation
//!
//! Provides interfaces to Google's Imagen (`:predict`) and Gemini
//! (`:generateContent`) REST endpoints, plus in-memory mocks used by tests and
//! local harnesses.

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiImageClient, GeminiScriptClient};
pub use mock::{MockImageGenerationClient, MockReply, MockScriptGenerationClient};

use crate::models::GeneratedImage;
use crate::Result;
use async_trait::async_trait;

/// Image generation provider. Returns every generated-image record in the
/// response; an empty list means the service declined without an error.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_images(&self, prompt: &str) -> Result<Vec<GeneratedImage>>;
}

/// Structured script provider. Returns the raw text payload, which is expected
/// to be a JSON array of video scripts.
#[async_trait]
pub trait ScriptGenerationService: Send + Sync {
    async fn generate_script_text(&self, topic: &str) -> Result<String>;
}
