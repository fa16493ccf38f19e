//! Integration tests for model provider wiring

use tourney::provider::{
    ChatMessage, MessageRole, ModelProvider, ProviderConfig, ProviderFactory, ProviderGenerator,
    ProviderType,
};
use tourney::TourneyError;

fn profile(provider_type: ProviderType, model: &str) -> ProviderConfig {
    ProviderConfig {
        provider_type,
        model: model.to_string(),
        api_key: None,
        endpoint: None,
        max_tokens: None,
    }
}

#[test]
fn test_openai_client_from_factory() {
    let provider = ModelProvider::OpenAI {
        model: "gpt-4".to_string(),
        api_key: "test-key".to_string(),
        base_url: None,
    };
    let client = ProviderFactory::create_client(&provider).unwrap();
    assert_eq!(client.provider_name(), "openai");
    assert_eq!(client.model_name(), "gpt-4");
}

#[test]
fn test_anthropic_client_from_factory() {
    let provider = ModelProvider::Anthropic {
        model: "claude-3-opus".to_string(),
        api_key: "test-key".to_string(),
    };
    let client = ProviderFactory::create_client(&provider).unwrap();
    assert_eq!(client.provider_name(), "anthropic");
    assert_eq!(client.model_name(), "claude-3-opus");
}

#[test]
fn test_ollama_generator_from_profile() {
    let generator = ProviderGenerator::from_config(&profile(ProviderType::Ollama, "llama3")).unwrap();
    assert_eq!(generator.provider_name(), "ollama");
    assert_eq!(generator.model_name(), "llama3");
}

#[test]
fn test_local_generator_from_profile() {
    let mut config = profile(ProviderType::LocalCustom, "custom-model");
    config.endpoint = Some("http://localhost:8080/v1".to_string());
    let generator = ProviderGenerator::from_config(&config).unwrap();
    assert_eq!(generator.provider_name(), "local");
    assert_eq!(generator.model_name(), "custom-model");
}

#[test]
fn test_inline_api_key_is_used() {
    let mut config = profile(ProviderType::Anthropic, "claude-3-haiku");
    config.api_key = Some("inline-key".to_string());
    let generator = ProviderGenerator::from_config(&config).unwrap();
    assert_eq!(generator.provider_name(), "anthropic");
}

#[test]
fn test_local_profile_without_endpoint_is_not_configured() {
    let err = ProviderGenerator::from_config(&profile(ProviderType::LocalCustom, "m"))
        .err()
        .unwrap();
    assert!(matches!(err, TourneyError::ProviderNotConfigured(_)));
}

#[test]
fn test_profile_rejects_non_http_endpoint() {
    let mut config = profile(ProviderType::Ollama, "llama3");
    config.endpoint = Some("localhost:11434".to_string());
    assert!(config.validate().unwrap_err().contains("http(s)"));
}

#[test]
fn test_profile_deserializes_provider_names() {
    let config: ProviderConfig = serde_json::from_value(serde_json::json!({
        "provider_type": "local",
        "model": "qwen",
        "endpoint": "http://127.0.0.1:9000/v1"
    }))
    .unwrap();
    assert_eq!(config.provider_type, ProviderType::LocalCustom);
    assert_eq!(config.max_tokens, None);
}

#[test]
fn test_chat_message_roles() {
    assert_eq!(ChatMessage::system("s").role, MessageRole::System);
    assert_eq!(ChatMessage::user("u").role, MessageRole::User);
}
