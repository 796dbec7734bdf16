//! Per-application view state
//!
//! A [`View`] owns the current input and a single [`ViewState`]. Submitting
//! moves it `Idle/Success/Failure → Loading → Success | Failure`; a blank
//! input or an in-flight submission turns `submit` into a no-op.

use crate::adapter::{Adapter, ImageAdapter, ScriptAdapter};
use crate::ai::{
    GeminiImageClient, GeminiScriptClient, ImageGenerationService, ScriptGenerationService,
};
use crate::models::Config;
use crate::prompts;
use std::sync::{Mutex, MutexGuard};
use tracing::Instrument;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            ViewState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// What a call to [`View::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    BlankInput,
    AlreadyLoading,
    Succeeded,
    Failed,
}

impl Submission {
    /// Whether the adapter was actually invoked.
    pub fn ran(self) -> bool {
        matches!(self, Submission::Succeeded | Submission::Failed)
    }
}

/// Result-panel copy for the non-success states.
#[derive(Debug, Clone)]
pub struct PanelText {
    pub idle: &'static str,
    pub loading: &'static str,
}

pub const IMAGE_PANEL: PanelText = PanelText {
    idle: "Your generated image will appear here.",
    loading: "Creating your vision...",
};

pub const SCRIPT_PANEL: PanelText = PanelText {
    idle: "Your video scripts will appear here.",
    loading: "Writing your scripts...",
};

pub struct View<A: Adapter> {
    adapter: A,
    panel: PanelText,
    input: Mutex<String>,
    state: Mutex<ViewState<A::Output>>,
}

pub type ImageStudio = View<ImageAdapter>;
pub type ScriptStudio = View<ScriptAdapter>;

/// Failure message left behind when a submission is dropped mid-flight.
pub const CANCELLED_MESSAGE: &str = "Generation was cancelled before it finished. Please try again.";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Owns the `Loading` state for one submission. Dropping it before
/// [`InFlight::finish`] moves the view to `Failure`.
struct InFlight<'a, T> {
    state: &'a Mutex<ViewState<T>>,
    done: bool,
}

impl<'a, T> InFlight<'a, T> {
    fn finish(mut self, next: ViewState<T>) {
        *lock(self.state) = next;
        self.done = true;
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut state = lock(self.state);
        if state.is_loading() {
            tracing::warn!("Submission dropped before completion");
            *state = ViewState::Failure(CANCELLED_MESSAGE.to_string());
        }
    }
}

impl<A: Adapter> View<A> {
    pub fn new(adapter: A, panel: PanelText) -> Self {
        Self {
            adapter,
            panel,
            input: Mutex::new(String::new()),
            state: Mutex::new(ViewState::Idle),
        }
    }

    pub fn with_input(self, input: impl Into<String>) -> Self {
        *lock(&self.input) = input.into();
        self
    }

    pub fn input(&self) -> String {
        lock(&self.input).clone()
    }

    /// Replace the input text. The input is locked while a submission is in
    /// flight; returns `false` when the edit was rejected.
    pub fn set_input(&self, input: impl Into<String>) -> bool {
        let state = lock(&self.state);
        if state.is_loading() {
            return false;
        }
        *lock(&self.input) = input.into();
        true
    }

    pub fn state(&self) -> ViewState<A::Output> {
        lock(&self.state).clone()
    }

    /// Panel text for the current state, or `None` when a result is ready to
    /// be shown instead.
    pub fn status_line(&self) -> Option<String> {
        match &*lock(&self.state) {
            ViewState::Idle => Some(self.panel.idle.to_string()),
            ViewState::Loading => Some(self.panel.loading.to_string()),
            ViewState::Failure(message) => Some(format!("Generation Failed: {}", message)),
            ViewState::Success(_) => None,
        }
    }

    /// Run the adapter on the current input.
    ///
    /// The blank/in-flight check and the switch to `Loading` happen under one
    /// lock before the first suspension point, so concurrent calls on the same
    /// view run the adapter at most once. If the returned future is dropped
    /// early the view lands in `Failure`.
    pub async fn submit(&self) -> Submission {
        let (input, in_flight) = {
            let mut state = lock(&self.state);
            let input = lock(&self.input).clone();
            if input.trim().is_empty() {
                tracing::debug!("Ignoring submit with blank input");
                return Submission::BlankInput;
            }
            if state.is_loading() {
                tracing::debug!("Ignoring submit while a generation is in flight");
                return Submission::AlreadyLoading;
            }
            *state = ViewState::Loading;
            (
                input,
                InFlight {
                    state: &self.state,
                    done: false,
                },
            )
        };

        let span = tracing::info_span!("submission", id = %Uuid::new_v4());
        let outcome = async {
            tracing::info!("Submitting {} chars", input.len());
            let outcome = self.adapter.generate(&input).await;
            match &outcome {
                Ok(_) => tracing::info!("Generation succeeded"),
                Err(e) => tracing::warn!("Generation failed: {}", e),
            }
            outcome
        }
        .instrument(span)
        .await;

        match outcome {
            Ok(result) => {
                in_flight.finish(ViewState::Success(result));
                Submission::Succeeded
            }
            Err(e) => {
                in_flight.finish(ViewState::Failure(e.to_string()));
                Submission::Failed
            }
        }
    }
}

impl View<ImageAdapter> {
    /// Image view pre-filled with the sample portrait prompt.
    pub fn image(service: Box<dyn ImageGenerationService>) -> Self {
        View::new(ImageAdapter::new(service), IMAGE_PANEL)
            .with_input(prompts::DEFAULT_IMAGE_PROMPT.trim())
    }

    pub fn image_from_config(config: &Config, http_client: reqwest::Client) -> Self {
        tracing::info!("Image provider: Gemini (model: {})", config.image_model);
        let client = GeminiImageClient::new_with_client(
            config.api_key.clone(),
            config.image_model.clone(),
            config.request_timeout,
            http_client,
        )
        .with_base_url(config.base_url.clone());
        Self::image(Box::new(client))
    }
}

impl View<ScriptAdapter> {
    pub fn scripts(service: Box<dyn ScriptGenerationService>) -> Self {
        View::new(ScriptAdapter::new(service), SCRIPT_PANEL)
    }

    pub fn scripts_from_config(config: &Config, http_client: reqwest::Client) -> Self {
        tracing::info!("Script provider: Gemini (model: {})", config.script_model);
        let client = GeminiScriptClient::new_with_client(
            config.api_key.clone(),
            config.script_model.clone(),
            config.request_timeout,
            http_client,
        )
        .with_base_url(config.base_url.clone());
        Self::scripts(Box::new(client))
    }
}
