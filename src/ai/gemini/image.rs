use super::client::GeminiHttpClient;
use crate::ai::ImageGenerationService;
use crate::models::GeneratedImage;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";
pub const ASPECT_RATIO: &str = "9:16";

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
    rai_filtered_reason: Option<String>,
}

/// Imagen client producing a single portrait JPEG per prompt.
pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
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
}

super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_images(&self, prompt: &str) -> Result<Vec<GeneratedImage>> {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: ASPECT_RATIO.to_string(),
                output_options: OutputOptions {
                    mime_type: OUTPUT_MIME_TYPE.to_string(),
                },
            },
        };

        tracing::debug!("Requesting image from {}", self.http.model());
        let response: PredictResponse = self.http.predict(&request).await?;

        let images: Vec<GeneratedImage> = response
            .predictions
            .into_iter()
            .filter_map(|p| {
                if let Some(reason) = &p.rai_filtered_reason {
                    tracing::warn!("Imagen filtered a generated image: {}", reason);
                }
                let bytes = p.bytes_base64_encoded.filter(|b| !b.is_empty())?;
                let mime_type = p
                    .mime_type
                    .unwrap_or_else(|| OUTPUT_MIME_TYPE.to_string());
                Some(GeneratedImage::new(bytes, mime_type))
            })
            .collect();

        tracing::debug!("Imagen returned {} image(s)", images.len());
        Ok(images)
    }
}
