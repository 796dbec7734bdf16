//! Request/response adapters between the views and the generation services
//!
//! Each adapter calls its service, validates what comes back, and maps every
//! failure into a [`GenerationError`]. Raw errors are logged before they are
//! translated.

use crate::ai::{ImageGenerationService, ScriptGenerationService};
use crate::error::{Flow, GenerationError};
use crate::models::{GeneratedImage, VideoScript};
use async_trait::async_trait;

/// Number of scripts requested per topic, one per short-form platform.
pub const EXPECTED_SCRIPT_COUNT: usize = 3;

/// One generation flow as seen by a view: text in, typed result or
/// user-facing failure out.
#[async_trait]
pub trait Adapter: Send + Sync {
    type Output: Clone + Send;

    async fn generate(&self, input: &str) -> Result<Self::Output, GenerationError>;
}

pub struct ImageAdapter {
    service: Box<dyn ImageGenerationService>,
}

impl ImageAdapter {
    pub fn new(service: Box<dyn ImageGenerationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Adapter for ImageAdapter {
    type Output = GeneratedImage;

    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, GenerationError> {
        generate_image(self.service.as_ref(), prompt).await
    }
}

pub struct ScriptAdapter {
    service: Box<dyn ScriptGenerationService>,
}

impl ScriptAdapter {
    pub fn new(service: Box<dyn ScriptGenerationService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Adapter for ScriptAdapter {
    type Output = Vec<VideoScript>;

    async fn generate(&self, topic: &str) -> Result<Vec<VideoScript>, GenerationError> {
        generate_video_scripts(self.service.as_ref(), topic).await
    }
}

/// Generate one portrait JPEG for `prompt` and return its base64 payload.
pub async fn generate_image(
    service: &dyn ImageGenerationService,
    prompt: &str,
) -> Result<GeneratedImage, GenerationError> {
    let images = service.generate_images(prompt).await.map_err(|e| {
        tracing::error!("Error generating image: {}", e);
        GenerationError::classify(Flow::Image, &e)
    })?;

    images.into_iter().next().ok_or_else(|| {
        tracing::error!("Image service returned no images");
        GenerationError::NoImageGenerated
    })
}

/// Generate the platform scripts for `topic`.
pub async fn generate_video_scripts(
    service: &dyn ScriptGenerationService,
    topic: &str,
) -> Result<Vec<VideoScript>, GenerationError> {
    let text = service.generate_script_text(topic).await.map_err(|e| {
        tracing::error!("Error generating video scripts: {}", e);
        GenerationError::classify(Flow::Script, &e)
    })?;

    decode_scripts(&text)
}

/// Strictly decode the service's text payload into video scripts.
pub fn decode_scripts(text: &str) -> Result<Vec<VideoScript>, GenerationError> {
    let text = text.trim();
    if text.is_empty() {
        tracing::error!("Script service returned an empty payload");
        return Err(GenerationError::EmptyResponse);
    }

    let scripts: Vec<VideoScript> = serde_json::from_str(text).map_err(|e| {
        tracing::error!("Failed to parse video scripts: {}\nBody: {}", e, text);
        GenerationError::MalformedResponse
    })?;

    if let Some(script) = scripts.iter().find(|s| s.scenes.is_empty()) {
        tracing::error!("Script for {} has no scenes", script.platform);
        return Err(GenerationError::MalformedResponse);
    }

    if scripts.len() != EXPECTED_SCRIPT_COUNT {
        tracing::warn!(
            "Expected {} scripts, service returned {}",
            EXPECTED_SCRIPT_COUNT,
            scripts.len()
        );
    }

    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockImageGenerationClient, MockScriptGenerationClient};
    use pretty_assertions::assert_eq;
    use tokio_test::{assert_err, assert_ok};

    const ONE_SCRIPT: &str = r#"[{
        "platform": "TikTok",
        "title": "Cats rule",
        "hook": "Your cat is judging you.",
        "scenes": [
            {"visual": "Cat stares", "voiceover": "Look at that face.", "onScreenText": "N/A"},
            {"visual": "Cat leaves", "voiceover": "And it's gone.", "onScreenText": "bye"}
        ]
    }]"#;

    #[tokio::test]
    async fn test_generate_image_returns_first_image() {
        let service = MockImageGenerationClient::new().with_images(vec![
            GeneratedImage::new("AAAA".to_string(), "image/jpeg".to_string()),
            GeneratedImage::new("BBBB".to_string(), "image/jpeg".to_string()),
        ]);

        let image = assert_ok!(generate_image(&service, "a red bicycle").await);
        assert_eq!(image.image_bytes, "AAAA");
    }

    #[tokio::test]
    async fn test_generate_image_without_images_is_no_image_generated() {
        let service = MockImageGenerationClient::new().with_images(vec![]);

        let err = assert_err!(generate_image(&service, "a red bicycle").await);
        assert_eq!(err, GenerationError::NoImageGenerated);
    }

    #[tokio::test]
    async fn test_generate_image_classifies_safety() {
        let service = MockImageGenerationClient::new()
            .with_error("request blocked: SAFETY threshold exceeded");

        let err = assert_err!(generate_image(&service, "a red bicycle").await);
        assert_eq!(err, GenerationError::SafetyBlocked);
    }

    #[tokio::test]
    async fn test_generate_image_wraps_other_errors() {
        let service = MockImageGenerationClient::new().with_error("quota exceeded");

        let err = assert_err!(generate_image(&service, "a red bicycle").await);
        assert_eq!(err.to_string(), "Failed to generate image: quota exceeded");
    }

    #[tokio::test]
    async fn test_generate_image_blank_error_is_unknown() {
        let service = MockImageGenerationClient::new().with_error("");

        let err = assert_err!(generate_image(&service, "a red bicycle").await);
        assert_eq!(err, GenerationError::UnknownError { flow: Flow::Image });
    }

    #[tokio::test]
    async fn test_generate_video_scripts_decodes_default_payload() {
        let service = MockScriptGenerationClient::new();

        let scripts = assert_ok!(generate_video_scripts(&service, "cats").await);
        assert_eq!(scripts.len(), EXPECTED_SCRIPT_COUNT);
        assert!(scripts.iter().all(|s| !s.scenes.is_empty()));
    }

    #[tokio::test]
    async fn test_generate_video_scripts_classifies_service_errors() {
        let service = MockScriptGenerationClient::new()
            .with_error("Prompt blocked by Gemini: SAFETY")
            .with_error("Gemini API error (status 400 Bad Request): Invalid JSON payload received.")
            .with_error("deadline exceeded");

        assert_eq!(
            generate_video_scripts(&service, "cats").await.unwrap_err(),
            GenerationError::SafetyBlocked
        );
        assert_eq!(
            generate_video_scripts(&service, "cats").await.unwrap_err(),
            GenerationError::MalformedResponse
        );
        assert_eq!(
            generate_video_scripts(&service, "cats")
                .await
                .unwrap_err()
                .to_string(),
            "Failed to generate video scripts: deadline exceeded"
        );
    }

    #[tokio::test]
    async fn test_generate_video_scripts_accepts_short_list() {
        let two = serde_json::json!([
            {"platform": "TikTok", "title": "a", "hook": "h",
             "scenes": [{"visual": "v", "voiceover": "o", "onScreenText": "N/A"}]},
            {"platform": "YouTube Shorts", "title": "b", "hook": "h",
             "scenes": [{"visual": "v", "voiceover": "o", "onScreenText": "Subscribe"}]}
        ]);
        let service = MockScriptGenerationClient::new().with_text_response(two.to_string());

        let scripts = assert_ok!(generate_video_scripts(&service, "cats").await);
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[1].platform, "YouTube Shorts");
        assert_eq!(service.get_call_count(), 1);
    }

    #[test]
    fn test_decode_scripts_keeps_order_and_fields() {
        let scripts = decode_scripts(ONE_SCRIPT).unwrap();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].hook, "Your cat is judging you.");
        assert_eq!(scripts[0].scenes[0].overlay(), None);
        assert_eq!(scripts[0].scenes[1].overlay(), Some("bye"));
    }

    #[test]
    fn test_decode_scripts_blank_is_empty_response() {
        assert_eq!(
            decode_scripts("  \n ").unwrap_err(),
            GenerationError::EmptyResponse
        );
    }

    #[test]
    fn test_decode_scripts_non_json_is_malformed() {
        assert_eq!(
            decode_scripts("{not json").unwrap_err(),
            GenerationError::MalformedResponse
        );
    }

    #[test]
    fn test_decode_scripts_missing_field_is_malformed() {
        let payload = r#"[{"platform": "TikTok", "title": "t", "scenes": []}]"#;
        assert_eq!(
            decode_scripts(payload).unwrap_err(),
            GenerationError::MalformedResponse
        );
    }

    #[test]
    fn test_decode_scripts_rejects_script_without_scenes() {
        let payload = r#"[{"platform": "TikTok", "title": "t", "hook": "h", "scenes": []}]"#;
        assert_eq!(
            decode_scripts(payload).unwrap_err(),
            GenerationError::MalformedResponse
        );
    }
}
