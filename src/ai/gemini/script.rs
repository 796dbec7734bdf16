use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part};
use crate::ai::ScriptGenerationService;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ScriptRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ScriptGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptGenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

/// Output-shape contract handed to Gemini: an array of video scripts, each
/// with an ordered list of scenes.
pub fn video_script_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "platform": {
                    "type": "STRING",
                    "description": "Target platform, e.g. TikTok, Instagram Reels or YouTube Shorts."
                },
                "title": {
                    "type": "STRING",
                    "description": "Catchy title for the video."
                },
                "hook": {
                    "type": "STRING",
                    "description": "Opening line that grabs attention in the first seconds."
                },
                "scenes": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "visual": {
                                "type": "STRING",
                                "description": "What the viewer sees."
                            },
                            "voiceover": {
                                "type": "STRING",
                                "description": "What is said over the scene."
                            },
                            "onScreenText": {
                                "type": "STRING",
                                "description": "Text overlay, or N/A when there is none."
                            }
                        },
                        "required": ["visual", "voiceover", "onScreenText"],
                        "propertyOrdering": ["visual", "voiceover", "onScreenText"]
                    }
                }
            },
            "required": ["platform", "title", "hook", "scenes"],
            "propertyOrdering": ["platform", "title", "hook", "scenes"]
        }
    })
}

/// Gemini client returning the raw JSON text of three platform scripts.
pub struct GeminiScriptClient {
    http: GeminiHttpClient,
}

impl GeminiScriptClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, None, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Option<Duration>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    fn extract_text(response: &GenerateContentResponse) -> Result<String> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(Error::AiProvider(format!(
                "Prompt blocked by Gemini: {}",
                reason
            )));
        }

        let Some(candidate) = response.candidates.first() else {
            return Ok(String::new());
        };

        let text = candidate.text();
        if text.trim().is_empty() {
            if let Some(reason) = candidate
                .finish_reason
                .as_deref()
                .filter(|r| *r != "STOP")
            {
                return Err(Error::AiProvider(format!(
                    "Gemini stopped without output: {}",
                    reason
                )));
            }
        }

        Ok(text)
    }
}

super::impl_with_gemini_base_url!(GeminiScriptClient);

#[async_trait]
impl ScriptGenerationService for GeminiScriptClient {
    async fn generate_script_text(&self, topic: &str) -> Result<String> {
        let request = ScriptRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::Text {
                    text: prompts::script_instruction(topic),
                }],
            }],
            generation_config: ScriptGenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: video_script_schema(),
            },
        };

        tracing::debug!("Requesting video scripts from {}", self.http.model());
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        Self::extract_text(&response)
    }
}
