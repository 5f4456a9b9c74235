// Relay error taxonomy and upstream-failure classification

use axum::http::StatusCode;

/// Every way a generate call can fail.
///
/// Only request-shape violations and missing server configuration use real
/// HTTP error statuses. Upstream-facing failures (quota, credential,
/// unavailable, internal) are answered with HTTP 200 and an `error` field in
/// the body, so clients branch on payload shape rather than transport status.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    UnsupportedInput(String),
    #[error("Server configuration error. No API key is configured.")]
    ServerMisconfigured,
    #[error("Quota limit reached. Please wait.")]
    QuotaExceeded,
    #[error("Invalid API credential. Check the configured API key.")]
    InvalidCredential,
    #[error("Upstream provider error: {0}")]
    UpstreamUnavailable(String),
    #[error("Server error. Please try again.")]
    Internal(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(_) | RelayError::UnsupportedInput(_) => {
                StatusCode::BAD_REQUEST
            }
            RelayError::ServerMisconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::QuotaExceeded
            | RelayError::InvalidCredential
            | RelayError::UpstreamUnavailable(_)
            | RelayError::Internal(_) => StatusCode::OK,
        }
    }
}

/// Classify an upstream failure by HTTP status and message content.
///
/// Quota and rate-limit signals win over credential signals: a 429 whose body
/// also mentions the key is still a quota condition.
pub fn classify_upstream(status: Option<u16>, message: &str) -> RelayError {
    let lowered = message.to_ascii_lowercase();

    if status == Some(429)
        || lowered.contains("quota")
        || lowered.contains("rate limit")
        || lowered.contains("resource_exhausted")
    {
        return RelayError::QuotaExceeded;
    }

    if matches!(status, Some(401) | Some(403))
        || lowered.contains("api key")
        || lowered.contains("api_key")
        || lowered.contains("unauthorized")
        || lowered.contains("permission denied")
    {
        return RelayError::InvalidCredential;
    }

    let detail = match status {
        Some(code) => format!("{} ({})", message.trim(), code),
        None => message.trim().to_string(),
    };
    RelayError::UpstreamUnavailable(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_429_maps_to_quota() {
        let err = classify_upstream(Some(429), "Too Many Requests");
        assert!(matches!(err, RelayError::QuotaExceeded));
        assert_eq!(err.to_string(), "Quota limit reached. Please wait.");
    }

    #[test]
    fn test_quota_message_maps_to_quota_without_status() {
        let err = classify_upstream(None, "RESOURCE_EXHAUSTED: quota exceeded for project");
        assert!(matches!(err, RelayError::QuotaExceeded));
    }

    #[test]
    fn test_auth_statuses_map_to_credential() {
        assert!(matches!(
            classify_upstream(Some(401), "bad key"),
            RelayError::InvalidCredential
        ));
        assert!(matches!(
            classify_upstream(Some(403), "forbidden"),
            RelayError::InvalidCredential
        ));
        assert!(matches!(
            classify_upstream(Some(400), "API key not valid. Please pass a valid API key."),
            RelayError::InvalidCredential
        ));
    }

    #[test]
    fn test_quota_wins_over_credential_on_429() {
        let err = classify_upstream(Some(429), "API key quota exhausted");
        assert!(matches!(err, RelayError::QuotaExceeded));
    }

    #[test]
    fn test_everything_else_is_unavailable() {
        let err = classify_upstream(Some(503), "model overloaded");
        match err {
            RelayError::UpstreamUnavailable(detail) => {
                assert!(detail.contains("model overloaded"));
                assert!(detail.contains("503"));
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            RelayError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::UnsupportedInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::ServerMisconfigured.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(RelayError::QuotaExceeded.status(), StatusCode::OK);
        assert_eq!(RelayError::InvalidCredential.status(), StatusCode::OK);
        assert_eq!(
            RelayError::UpstreamUnavailable("x".into()).status(),
            StatusCode::OK
        );
        assert_eq!(RelayError::Internal("x".into()).status(), StatusCode::OK);
    }
}
