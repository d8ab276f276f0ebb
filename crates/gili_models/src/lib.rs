//! Reasoning capability clients for the Gili story evaluation worker.
//!
//! The worker talks to an OpenAI-compatible chat completions endpoint. The
//! client here implements [`gili_interface::GiliDriver`], so the evaluator
//! never sees wire types.
//!
//! ```no_run
//! use gili_core::{GenerateRequest, Message};
//! use gili_interface::GiliDriver;
//! use gili_models::{OpenAiClient, OpenAiConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new(OpenAiConfig::new("sk-...", "gpt-3.5-turbo"))?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ChoiceMessage,
    OpenAiClient, OpenAiConfig, Usage, from_chat_response, to_chat_request,
};
