// Google Gemini adapter

use crate::config::ProxyConfig;
use crate::error::{classify_upstream, RelayError};
use crate::providers::adapter_trait::ProviderAdapter;
use crate::types::NormalizedResponse;
use reqwest::Client;
use serde_json::{json, Value};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiAdapter {
    client: Client,
}

impl GeminiAdapter {
    pub fn new() -> Self {
        GeminiAdapter {
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
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": config.temperature,
                "maxOutputTokens": config.max_output_tokens,
            }
        })
    }

    /// First candidate's text, with multiple text parts concatenated.
    /// An empty or missing candidate list is an empty result, not an error.
    pub(crate) fn extract_text(body: &Value) -> String {
        body.get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    fn extract_finish_reason(body: &Value) -> Option<String> {
        body.get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|candidate| candidate.get("finishReason"))
            .and_then(|r| r.as_str())
            .map(|r| r.to_string())
    }

    /// Gemini error bodies look like `{"error": {"message", "status"}}`.
    fn error_message(raw: &str) -> String {
        serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(|v| {
                v.get("error").and_then(|e| {
                    e.get("message")
                        .or_else(|| e.get("status"))
                        .and_then(|m| m.as_str())
                        .map(|m| m.to_string())
                })
            })
            .unwrap_or_else(|| raw.trim().to_string())
    }
}

#[async_trait::async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(
        &self,
        prompt: &str,
        config: &ProxyConfig,
    ) -> Result<NormalizedResponse, RelayError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            Self::base_url(config).trim_end_matches('/'),
            config.model,
            config.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&Self::build_payload(prompt, config))
            .send()
            .await
            .map_err(|e| {
                log::warn!("gemini: request failed: {}", e);
                RelayError::Internal(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let raw = response.text().await.unwrap_or_default();
            let message = Self::error_message(&raw);
            log::warn!("gemini: upstream returned {}: {}", status, message);
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
    use crate::client::parse_model_json;

    #[test]
    fn test_payload_wraps_prompt_as_single_user_part() {
        let config = ProxyConfig::default();
        let payload = GeminiAdapter::build_payload("hello", &config);
        assert_eq!(payload["contents"][0]["role"], "user");
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(payload["generationConfig"]["maxOutputTokens"], 1024);
        assert!(payload["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_extract_concatenates_text_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] }
            }]
        });
        assert_eq!(GeminiAdapter::extract_text(&body), "Hello, world");
    }

    #[test]
    fn test_empty_candidates_yield_empty_text() {
        assert_eq!(GeminiAdapter::extract_text(&json!({ "candidates": [] })), "");
        assert_eq!(GeminiAdapter::extract_text(&json!({})), "");
    }

    #[test]
    fn test_non_text_parts_are_skipped() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "image/png" } }, { "text": "ok" }] }
            }]
        });
        assert_eq!(GeminiAdapter::extract_text(&body), "ok");
    }

    #[test]
    fn test_error_message_prefers_upstream_message() {
        let raw = r#"{"error":{"code":429,"message":"Quota exceeded for model","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(GeminiAdapter::error_message(raw), "Quota exceeded for model");
        assert_eq!(GeminiAdapter::error_message("plain failure"), "plain failure");
    }

    // End-to-end shape of the planner scenario: a candidate carrying embedded
    // JSON comes out of the relay verbatim and parses on the client side.
    #[test]
    fn test_embedded_json_survives_extraction() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"a\":1}" }] }
            }]
        });
        let text = GeminiAdapter::extract_text(&body);
        assert_eq!(text, "{\"a\":1}");
        let parsed = parse_model_json(&text);
        assert_eq!(parsed["a"], 1);
    }
}
