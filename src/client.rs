// Client caller for the relay endpoint

use reqwest::Client;
use serde_json::{json, Value};

/// How the client reads the relay's success payload.
///
/// `Versioned` is the fixed `{ "result": ... }` contract. `Legacy` keeps the
/// tolerant multi-key extraction some older deployments answered with
/// (`result` / `text` / `response` / `answer`, then the stringified payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseContract {
    #[default]
    Versioned,
    Legacy,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The relay answered with a non-2xx transport status.
    #[error("Server Error: {0}")]
    Http(u16),
    /// The relay answered 200 with an `error` field; the message is meant
    /// for inline display.
    #[error("{0}")]
    Relay(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("relay response had no usable text field")]
    MissingResult,
}

pub struct RelayClient {
    http: Client,
    base_url: String,
    contract: ResponseContract,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        RelayClient {
            http: Client::new(),
            base_url: base_url.into(),
            contract: ResponseContract::default(),
        }
    }

    pub fn with_contract(mut self, contract: ResponseContract) -> Self {
        self.contract = contract;
        self
    }

    /// Send one prompt and return the extracted text.
    ///
    /// Relay-reported failures come back as `ClientError::Relay` so callers
    /// can render the message inline, exactly like a successful result.
    pub async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http(status.as_u16()));
        }

        let body: Value = response.json().await?;
        if let Some(message) = body.get("error").and_then(|e| e.as_str()) {
            return Err(ClientError::Relay(message.to_string()));
        }

        extract_text(self.contract, &body)
    }
}

fn extract_text(contract: ResponseContract, body: &Value) -> Result<String, ClientError> {
    match contract {
        ResponseContract::Versioned => body
            .get("result")
            .and_then(|r| r.as_str())
            .map(|r| r.to_string())
            .ok_or(ClientError::MissingResult),
        ResponseContract::Legacy => Ok(extract_legacy(body)),
    }
}

/// Old deployments answered with varying key names; take the first populated
/// one and fall back to stringifying the whole payload.
fn extract_legacy(body: &Value) -> String {
    for key in ["result", "text", "response", "answer"] {
        if let Some(text) = body.get(key).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    match body.as_str() {
        Some(text) => text.to_string(),
        None => body.to_string(),
    }
}

/// Strip a leading/trailing markdown code fence so embedded JSON parses.
/// Unfenced text passes through untouched.
pub fn clean_json_string(text: &str) -> String {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    cleaned = cleaned.trim_start();
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim().to_string()
}

/// Parse model output that is expected to carry JSON.
///
/// Falls back to wrapping the raw text in a single-field object so rendering
/// never hard-fails on malformed model output.
pub fn parse_model_json(text: &str) -> Value {
    let cleaned = clean_json_string(text);
    serde_json::from_str(&cleaned).unwrap_or_else(|_| json!({ "content": text }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_json_fence() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(clean_json_string(fenced), "{\"a\": 1}");
    }

    #[test]
    fn test_clean_strips_bare_fence() {
        let fenced = "```\n{\"a\": 1}\n```";
        assert_eq!(clean_json_string(fenced), "{\"a\": 1}");
    }

    #[test]
    fn test_clean_is_noop_on_plain_json() {
        let plain = "{\"a\": 1}";
        assert_eq!(clean_json_string(plain), plain);
    }

    #[test]
    fn test_fence_round_trip_reproduces_object() {
        let original = json!({ "weekly_strategy_title": "Launch week", "daily_plan": [] });
        let fenced = format!("```json\n{}\n```", original);
        let parsed: Value = serde_json::from_str(&clean_json_string(&fenced)).expect("parses");
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_wraps_malformed_output() {
        let raw = "Sorry, here is the plan: day one...";
        let parsed = parse_model_json(raw);
        assert_eq!(parsed["content"], raw);
    }

    #[test]
    fn test_parse_accepts_fenced_json() {
        let parsed = parse_model_json("```json\n{\"a\":1}\n```");
        assert_eq!(parsed["a"], 1);
    }

    #[test]
    fn test_versioned_contract_requires_result() {
        let ok = extract_text(ResponseContract::Versioned, &json!({ "result": "hi" }));
        assert_eq!(ok.expect("result present"), "hi");

        let missing = extract_text(ResponseContract::Versioned, &json!({ "text": "hi" }));
        assert!(matches!(missing, Err(ClientError::MissingResult)));
    }

    #[test]
    fn test_versioned_contract_accepts_empty_result() {
        let ok = extract_text(ResponseContract::Versioned, &json!({ "result": "" }));
        assert_eq!(ok.expect("empty result is valid"), "");
    }

    #[test]
    fn test_legacy_contract_takes_first_populated_key() {
        let body = json!({ "result": "", "text": "from text", "answer": "from answer" });
        assert_eq!(extract_legacy(&body), "from text");
    }

    #[test]
    fn test_legacy_contract_stringifies_unknown_shapes() {
        let body = json!({ "payload": { "nested": true } });
        let text = extract_legacy(&body);
        assert!(text.contains("nested"));
    }
}
