//! Conversion between gili and OpenAI wire types

use crate::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use gili_core::{GenerateRequest, GenerateResponse, Role};
use gili_error::{ModelsError, ModelsErrorKind};

/// Convert a [`GenerateRequest`] into a chat completion request.
///
/// The request's model override wins over `default_model`.
#[tracing::instrument(skip(request))]
pub fn to_chat_request(request: &GenerateRequest, default_model: &str) -> ChatCompletionRequest {
    let messages = request
        .messages()
        .iter()
        .map(|m| ChatMessage {
            role: role_name(m.role).to_string(),
            content: m.content.clone(),
        })
        .collect();

    ChatCompletionRequest {
        model: request
            .model()
            .clone()
            .unwrap_or_else(|| default_model.to_string()),
        messages,
        max_tokens: *request.max_tokens(),
        temperature: *request.temperature(),
    }
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

/// Take the first choice's text.
#[tracing::instrument(skip(response))]
pub fn from_chat_response(
    response: ChatCompletionResponse,
) -> Result<GenerateResponse, ModelsError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ModelsError::new(ModelsErrorKind::EmptyResponse))?;

    Ok(GenerateResponse::new(choice.message.content.unwrap_or_default()))
}
