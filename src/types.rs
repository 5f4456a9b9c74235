// Transient request/response envelopes for the relay

use crate::error::RelayError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body fields that signal image input. The relay is text-only by policy.
const IMAGE_FIELDS: [&str; 3] = ["image", "images", "inlineData"];

/// Validate a raw `/api/generate` body and pull out the prompt.
///
/// The body is inspected as loose JSON rather than deserialized into a typed
/// struct so that a non-string `prompt` is answered with our own 400 payload
/// instead of a framework rejection. `max_prompt_chars == 0` disables the
/// length ceiling.
pub fn validate_generate_body(body: &Value, max_prompt_chars: usize) -> Result<String, RelayError> {
    for field in IMAGE_FIELDS {
        if body.get(field).is_some() {
            return Err(RelayError::UnsupportedInput(format!(
                "Image input ('{}') is not supported. This endpoint is text-only.",
                field
            )));
        }
    }

    let prompt = match body.get("prompt") {
        None | Some(Value::Null) => {
            return Err(RelayError::InvalidRequest(
                "Invalid request. 'prompt' is required.".to_string(),
            ))
        }
        Some(Value::String(s)) => s,
        Some(_) => {
            return Err(RelayError::InvalidRequest(
                "Invalid request. 'prompt' must be a string.".to_string(),
            ))
        }
    };

    if prompt.trim().is_empty() {
        return Err(RelayError::InvalidRequest(
            "Invalid request. 'prompt' is required.".to_string(),
        ));
    }

    if max_prompt_chars > 0 && prompt.chars().count() > max_prompt_chars {
        return Err(RelayError::InvalidRequest(format!(
            "Invalid request. Prompt exceeds the {}-character limit.",
            max_prompt_chars
        )));
    }

    Ok(prompt.clone())
}

/// Relay answer: exactly one of `result` or `error`, enforced by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    Result { result: String },
    Error { error: String },
}

impl GenerateResponse {
    pub fn result(text: impl Into<String>) -> Self {
        GenerateResponse::Result { result: text.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        GenerateResponse::Error { error: message.into() }
    }

    pub fn to_json(&self) -> Value {
        match self {
            GenerateResponse::Result { result } => json!({ "result": result }),
            GenerateResponse::Error { error } => json!({ "error": error }),
        }
    }
}

/// Provider-neutral upstream result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedResponse {
    pub text: String,
    pub finish_reason: Option<String>,
}
