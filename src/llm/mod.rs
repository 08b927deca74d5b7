//! Inference service boundary

pub mod client;

pub use client::{ChatMessage, OllamaClient};
