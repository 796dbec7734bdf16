//! Prompt-to-content studio for short-form video creators
//!
//! Collects a text prompt, forwards it to Google's generative-AI API (Imagen for
//! portrait images, Gemini for structured short-video scripts), and drives a
//! small per-flow view state machine around the result.

pub mod adapter;
pub mod ai;
pub mod error;
pub mod models;
pub mod prompts;
pub mod view;

pub use error::{Error, Flow, GenerationError, Result};
