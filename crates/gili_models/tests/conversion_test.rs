use gili_core::{GenerateRequest, Message};
use gili_error::ModelsErrorKind;
use gili_models::{ChatCompletionResponse, OpenAiConfig, from_chat_response, to_chat_request};

#[test]
fn request_carries_roles_and_parameters() -> anyhow::Result<()> {
    let request = GenerateRequest::builder()
        .messages(vec![
            Message::system("You are a kind coach."),
            Message::user("Evaluate this."),
        ])
        .temperature(Some(0.7))
        .build()?;

    let chat = to_chat_request(&request, "gpt-3.5-turbo");

    assert_eq!(chat.model, "gpt-3.5-turbo");
    assert_eq!(chat.messages[0].role, "system");
    assert_eq!(chat.messages[1].role, "user");
    assert_eq!(chat.messages[1].content, "Evaluate this.");
    assert_eq!(chat.temperature, Some(0.7));

    let json = serde_json::to_value(&chat)?;
    assert!(json.get("max_tokens").is_none());
    Ok(())
}

#[test]
fn request_model_override_wins() -> anyhow::Result<()> {
    let request = GenerateRequest::builder()
        .messages(vec![Message::user("Hi")])
        .model(Some("gpt-4o-mini".to_string()))
        .build()?;

    assert_eq!(to_chat_request(&request, "gpt-3.5-turbo").model, "gpt-4o-mini");
    Ok(())
}

#[test]
fn response_takes_first_choice_text() -> anyhow::Result<()> {
    let body = r#"{
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-3.5-turbo",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "first"}, "finish_reason": "stop"},
            {"index": 1, "message": {"role": "assistant", "content": "second"}, "finish_reason": "stop"}
        ],
        "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
    }"#;
    let response: ChatCompletionResponse = serde_json::from_str(body)?;

    assert_eq!(from_chat_response(response)?.text, "first");
    Ok(())
}

#[test]
fn response_without_choices_is_an_error() -> anyhow::Result<()> {
    let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#)?;

    let err = from_chat_response(response).unwrap_err();
    assert_eq!(err.kind, ModelsErrorKind::EmptyResponse);
    Ok(())
}

#[test]
fn null_content_becomes_empty_text() -> anyhow::Result<()> {
    let body = r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]}"#;
    let response: ChatCompletionResponse = serde_json::from_str(body)?;

    assert_eq!(from_chat_response(response)?.text, "");
    Ok(())
}

#[test]
fn completions_url_tolerates_trailing_slash() {
    let config = OpenAiConfig::new("key", "gpt-3.5-turbo").with_base_url("http://localhost:8080/");
    assert_eq!(config.completions_url(), "http://localhost:8080/v1/chat/completions");
}
