use gili_core::{GenerateRequest, Message};
use gili_interface::GiliDriver;
use gili_models::{OpenAiClient, OpenAiConfig};
use std::env;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_simple_generation() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let api_key = env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set for API tests");

    let client = OpenAiClient::new(OpenAiConfig::new(api_key, "gpt-3.5-turbo"))?;

    let request = GenerateRequest::builder()
        .messages(vec![Message::user("Say 'test' and nothing else.")])
        .temperature(Some(0.0))
        .build()?;

    let response = client.generate(&request).await?;

    assert!(!response.text.is_empty());
    assert_eq!(client.provider_name(), "openai");
    Ok(())
}
