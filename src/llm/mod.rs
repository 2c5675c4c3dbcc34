//! Remote chat-completion client and wire format.

pub mod client;
pub mod wire;

pub use client::{CompletionClient, OpenRouterClient, REFERER};
pub use wire::{ChatMessage, ChatRequest, GenerationResult, parse_completion};
