use super::{ImageGenerationService, ScriptGenerationService};
use crate::models::GeneratedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned reply for a mock service call.
#[derive(Debug, Clone)]
pub enum MockReply<T> {
    Ok(T),
    /// Fails with `Error::AiProvider(message)`.
    Fail(String),
}

impl<T: Clone> MockReply<T> {
    fn to_result(&self) -> Result<T> {
        match self {
            MockReply::Ok(value) => Ok(value.clone()),
            MockReply::Fail(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}

/// Shared bookkeeping for both mock services: cycles through queued replies
/// and records every input it was called with. Clones share the same state.
#[derive(Clone)]
struct MockState<T> {
    replies: Arc<Mutex<Vec<MockReply<T>>>>,
    inputs: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl<T: Clone> MockState<T> {
    fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            inputs: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    async fn call(&self, input: &str, default: impl FnOnce() -> T) -> Result<T> {
        let index = {
            let mut inputs = self.inputs.lock().unwrap();
            inputs.push(input.to_string());
            inputs.len() - 1
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            Ok(default())
        } else {
            replies[index % replies.len()].to_result()
        }
    }
}

#[derive(Clone)]
pub struct MockImageGenerationClient {
    state: MockState<Vec<GeneratedImage>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            state: MockState::new(),
        }
    }

    pub fn with_images(self, images: Vec<GeneratedImage>) -> Self {
        self.state.replies.lock().unwrap().push(MockReply::Ok(images));
        self
    }

    pub fn with_error(self, message: &str) -> Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .push(MockReply::Fail(message.to_string()));
        self
    }

    /// Suspend every call for `delay` before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.state.delay = Some(delay);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.state.inputs.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.state.inputs.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_images(&self, prompt: &str) -> Result<Vec<GeneratedImage>> {
        self.state
            .call(prompt, || {
                // Base64 of a JPEG SOI marker
                vec![GeneratedImage::new(
                    "/9j/4AAQ".to_string(),
                    "image/jpeg".to_string(),
                )]
            })
            .await
    }
}

#[derive(Clone)]
pub struct MockScriptGenerationClient {
    state: MockState<String>,
}

impl MockScriptGenerationClient {
    pub fn new() -> Self {
        Self {
            state: MockState::new(),
        }
    }

    pub fn with_text_response(self, text: String) -> Self {
        self.state.replies.lock().unwrap().push(MockReply::Ok(text));
        self
    }

    pub fn with_error(self, message: &str) -> Self {
        self.state
            .replies
            .lock()
            .unwrap()
            .push(MockReply::Fail(message.to_string()));
        self
    }

    /// Suspend every call for `delay` before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.state.delay = Some(delay);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.state.inputs.lock().unwrap().len()
    }

    pub fn topics(&self) -> Vec<String> {
        self.state.inputs.lock().unwrap().clone()
    }
}

impl Default for MockScriptGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptGenerationService for MockScriptGenerationClient {
    async fn generate_script_text(&self, topic: &str) -> Result<String> {
        self.state
            .call(topic, || {
                let scripts: Vec<serde_json::Value> = ["TikTok", "Instagram Reels", "YouTube Shorts"]
                    .iter()
                    .map(|platform| {
                        serde_json::json!({
                            "platform": platform,
                            "title": format!("{} in 30 seconds", topic),
                            "hook": format!("You won't believe this about {}", topic),
                            "scenes": [{
                                "visual": format!("Close-up of {}", topic),
                                "voiceover": format!("Let's talk about {}.", topic),
                                "onScreenText": "N/A"
                            }]
                        })
                    })
                    .collect();
                serde_json::Value::Array(scripts).to_string()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoScript;

    #[tokio::test]
    async fn test_mock_image_client_default_image() {
        let client = MockImageGenerationClient::new();

        let images = client.generate_images("a lighthouse").await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].mime_type, "image/jpeg");
        assert_eq!(client.prompts(), vec!["a lighthouse".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_image_client_custom_responses_cycle() {
        let image = GeneratedImage::new("AAAA".to_string(), "image/jpeg".to_string());
        let client = MockImageGenerationClient::new()
            .with_images(vec![image.clone()])
            .with_error("boom");

        assert_eq!(client.generate_images("1").await.unwrap(), vec![image.clone()]);
        assert!(client.generate_images("2").await.is_err());

        // Should cycle back
        assert_eq!(client.generate_images("3").await.unwrap(), vec![image]);
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_script_client_default_is_three_scripts() {
        let client = MockScriptGenerationClient::new();

        let text = client.generate_script_text("cats").await.unwrap();
        let scripts: Vec<VideoScript> = serde_json::from_str(&text).unwrap();
        assert_eq!(scripts.len(), 3);
        assert_eq!(scripts[2].platform, "YouTube Shorts");
        assert_eq!(client.topics(), vec!["cats".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_script_client_error() {
        let client = MockScriptGenerationClient::new().with_error("quota exceeded");

        let err = client.generate_script_text("cats").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(ref msg) if msg == "quota exceeded"));
    }
}
