//! Error handling and custom error types
//!
//! [`Error`] covers transport and provider failures inside the crate.
//! [`GenerationError`] is the small user-facing taxonomy the adapters
//! translate those failures into.

use thiserror::Error;

/// Substring the generative service puts in messages when it declines content
/// on policy grounds.
pub const SAFETY_MARKER: &str = "SAFETY";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("API key is not configured")]
    MissingCredential,

    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The human-readable message carried by this error, without the variant
    /// prefix. Blank when the failure had nothing to say.
    pub fn message(&self) -> String {
        match self {
            Error::AiProvider(msg) | Error::Generic(msg) => msg.trim().to_string(),
            other => other.to_string(),
        }
    }
}

/// Which generation flow produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Image,
    Script,
}

impl Flow {
    fn noun(self) -> &'static str {
        match self {
            Flow::Image => "image",
            Flow::Script => "video scripts",
        }
    }

    fn activity(self) -> &'static str {
        match self {
            Flow::Image => "image generation",
            Flow::Script => "script generation",
        }
    }
}

/// User-facing outcome of a failed submission. `Display` is the message shown
/// in the result panel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("The prompt was blocked by safety settings. Please modify your prompt and try again.")]
    SafetyBlocked,

    #[error("No image was generated. The response may have been blocked or empty.")]
    NoImageGenerated,

    #[error("The model returned an empty response. Please try again.")]
    EmptyResponse,

    #[error("The model returned scripts in an unexpected format. Please try again.")]
    MalformedResponse,

    #[error("No API key is configured. Set GEMINI_API_KEY and try again.")]
    MissingCredential,

    #[error("Failed to generate {}: {message}", .flow.noun())]
    GenerationFailed { flow: Flow, message: String },

    #[error("An unknown error occurred during {}.", .flow.activity())]
    UnknownError { flow: Flow },
}

impl GenerationError {
    /// Translate a crate error raised while running `flow` into its
    /// user-facing outcome.
    pub fn classify(flow: Flow, error: &Error) -> Self {
        if matches!(error, Error::MissingCredential) {
            return GenerationError::MissingCredential;
        }

        let message = error.message();
        if message.contains(SAFETY_MARKER) {
            return GenerationError::SafetyBlocked;
        }

        if flow == Flow::Script && is_decode_failure(error, &message) {
            return GenerationError::MalformedResponse;
        }

        if message.is_empty() {
            return GenerationError::UnknownError { flow };
        }

        GenerationError::GenerationFailed { flow, message }
    }
}

fn is_decode_failure(error: &Error, message: &str) -> bool {
    matches!(error, Error::Serialization(_)) || message.contains("JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safety_marker_wins_for_both_flows() {
        let err = Error::AiProvider("request blocked: SAFETY threshold exceeded".to_string());
        assert_eq!(
            GenerationError::classify(Flow::Image, &err),
            GenerationError::SafetyBlocked
        );
        assert_eq!(
            GenerationError::classify(Flow::Script, &err),
            GenerationError::SafetyBlocked
        );
    }

    #[test]
    fn test_other_messages_are_wrapped() {
        let err = Error::AiProvider("quota exceeded".to_string());
        let classified = GenerationError::classify(Flow::Image, &err);
        assert_eq!(
            classified.to_string(),
            "Failed to generate image: quota exceeded"
        );
    }

    #[test]
    fn test_serialization_error_is_malformed_for_scripts_only() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::Serialization(json_err);

        assert_eq!(
            GenerationError::classify(Flow::Script, &err),
            GenerationError::MalformedResponse
        );
        assert!(matches!(
            GenerationError::classify(Flow::Image, &err),
            GenerationError::GenerationFailed {
                flow: Flow::Image,
                ..
            }
        ));
    }

    #[test]
    fn test_blank_message_is_unknown() {
        let err = Error::AiProvider("   ".to_string());
        let classified = GenerationError::classify(Flow::Script, &err);
        assert_eq!(classified, GenerationError::UnknownError { flow: Flow::Script });
        assert_eq!(
            classified.to_string(),
            "An unknown error occurred during script generation."
        );
    }

    #[test]
    fn test_missing_credential_has_its_own_kind() {
        assert_eq!(
            GenerationError::classify(Flow::Image, &Error::MissingCredential),
            GenerationError::MissingCredential
        );
    }
}
