//! Data models and structures
//!
//! Defines the generated artifacts returned to the view and the runtime
//! configuration for the Gemini clients.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `onScreenText` value meaning "no overlay for this scene".
pub const NO_OVERLAY: &str = "N/A";

/// A single generated image, still base64-encoded as the service returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub image_bytes: String,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn new(image_bytes: String, mime_type: String) -> Self {
        Self {
            image_bytes,
            mime_type,
        }
    }

    /// Inline `data:` URL suitable for an `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.image_bytes)
    }

    /// Decode the payload into raw image bytes.
    pub fn decode(&self) -> crate::Result<Vec<u8>> {
        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD
            .decode(&self.image_bytes)
            .map_err(|e| crate::Error::Generic(format!("Failed to decode base64 image: {}", e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub visual: String,
    pub voiceover: String,
    pub on_screen_text: String,
}

impl Scene {
    /// Text to overlay on this scene, if any.
    pub fn overlay(&self) -> Option<&str> {
        let text = self.on_screen_text.trim();
        if text.is_empty() || text == NO_OVERLAY {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoScript {
    pub platform: String,
    pub title: String,
    pub hook: String,
    pub scenes: Vec<Scene>,
}

// Configuration
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_SCRIPT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub image_model: String,
    pub script_model: String,
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank("GEMINI_API_KEY")
            .or_else(|| non_blank("API_KEY"))
            .ok_or(crate::Error::MissingCredential)?;

        let request_timeout = match non_blank("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    crate::Error::Generic(format!(
                        "REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key,
            image_model: non_blank("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            script_model: non_blank("SCRIPT_MODEL")
                .unwrap_or_else(|| DEFAULT_SCRIPT_MODEL.to_string()),
            base_url: non_blank("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout,
        })
    }
}
