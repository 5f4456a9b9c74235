// OpenAI chat-completions adapter

use crate::config::ProxyConfig;
use crate::error::{classify_upstream, RelayError};
use crate::providers::adapter_trait::ProviderAdapter;
use crate::types::NormalizedResponse;
use reqwest::Client;
use serde_json::{json, Value};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiAdapter {
    client: Client,
}

impl OpenAiAdapter {
    pub fn new() -> Self {
        OpenAiAdapter {
            client: Client::new(),
        }
    }

    fn base_url(config: &ProxyConfig) -> String {
        config
            .base_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub(crate) fn build_payload(prompt: &str, config: &ProxyConfig) -> Value {
        json!({
            "model": config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": config.max_output_tokens,
            "temperature": config.temperature,
        })
    }

    pub(crate) fn extract_text(body: &Value) -> String {
        body.get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .unwrap_or_default()
            .to_string()
    }

    fn extract_finish_reason(body: &Value) -> Option<String> {
        body.get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|choice| choice.get("finish_reason"))
            .and_then(|r| r.as_str())
            .map(|r| r.to_string())
    }

    fn error_message(raw: &str) -> String {
        serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(|m| m.to_string())
            })
            .unwrap_or_else(|| raw.trim().to_string())
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(
        &self,
        prompt: &str,
        config: &ProxyConfig,
    ) -> Result<NormalizedResponse, RelayError> {
        let url = format!(
            "{}/chat/completions",
            Self::base_url(config).trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", config.api_key))
            .json(&Self::build_payload(prompt, config))
            .send()
            .await
            .map_err(|e| {
                log::warn!("openai: request failed: {}", e);
                RelayError::Internal(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let raw = response.text().await.unwrap_or_default();
            let message = Self::error_message(&raw);
            log::warn!("openai: upstream returned {}: {}", status, message);
            return Err(classify_upstream(Some(status), &message));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RelayError::Internal(format!("failed to parse response: {}", e)))?;

        Ok(NormalizedResponse {
            text: Self::extract_text(&body),
            finish_reason: Self::extract_finish_reason(&body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_carries_model_and_caps() {
        let config = ProxyConfig {
            model: "gpt-4o-mini".to_string(),
            ..ProxyConfig::default()
        };
        let payload = OpenAiAdapter::build_payload("hi", &config);
        assert_eq!(payload["model"], "gpt-4o-mini");
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["messages"][0]["content"], "hi");
        assert_eq!(payload["max_tokens"], 1024);
    }

    #[test]
    fn test_extract_first_choice_content() {
        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "first" }, "finish_reason": "stop" },
                { "message": { "role": "assistant", "content": "second" } }
            ]
        });
        assert_eq!(OpenAiAdapter::extract_text(&body), "first");
        assert_eq!(
            OpenAiAdapter::extract_finish_reason(&body).as_deref(),
            Some("stop")
        );
    }

    #[test]
    fn test_empty_choices_yield_empty_text() {
        assert_eq!(OpenAiAdapter::extract_text(&json!({ "choices": [] })), "");
    }

    #[test]
    fn test_error_message_extraction() {
        let raw = r#"{"error":{"message":"Rate limit reached for requests","type":"requests"}}"#;
        assert_eq!(
            OpenAiAdapter::error_message(raw),
            "Rate limit reached for requests"
        );
    }
}
