//! OpenAI-compatible chat completions client.

mod client;
mod config;
mod conversion;
mod dto;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
pub use conversion::{from_chat_response, to_chat_request};
pub use dto::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ChoiceMessage, Usage,
};
