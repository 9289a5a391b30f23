//! Error types for REST API operations

use serde_json::Value;
use upbit_types::error_codes::{UpbitApiError, UpbitErrorCode};

/// How deep the envelope extractor follows nested `message`/`error` objects
const MAX_ENVELOPE_DEPTH: u8 = 2;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP transport failed (DNS, timeout, connection reset)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials missing or malformed
    #[error("Auth error: {0}")]
    Auth(#[from] upbit_auth::AuthError),

    /// Missing API credentials for a private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Order shape violates its variant's contract
    #[error("Invalid order: {field}: {message}")]
    InvalidOrder {
        /// First violated field
        field: &'static str,
        /// Rule that was broken
        message: String,
    },

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The exchange returned a non-2xx response
    #[error("API error ({status}): {error}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Parsed error envelope
        error: UpbitApiError,
    },

    /// Failed to parse a successful response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl RestError {
    /// Shorthand for an order contract violation
    pub(crate) fn invalid_order(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOrder {
            field,
            message: message.into(),
        }
    }

    /// Build an API error from a non-2xx response body
    ///
    /// Upbit wraps failures in a nested envelope, usually
    /// `{"error": {"name": code, "message": text}}`, but gateway errors and
    /// older endpoints vary. The extractor checks `message`, then `error`,
    /// then `name`, following nested objects up to a fixed depth.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let message = extract_message(body, MAX_ENVELOPE_DEPTH)
            .unwrap_or_else(|| format!("Upbit request failed with status {}", status));
        let name = extract_code(body, MAX_ENVELOPE_DEPTH).unwrap_or_default();

        Self::Api {
            status,
            error: UpbitApiError::parse(&name, message),
        }
    }

    /// HTTP status, when the error came from an exchange response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed exchange error code, when one was recognized
    pub fn code(&self) -> Option<UpbitErrorCode> {
        match self {
            Self::Api { error, .. } => error.code,
            _ => None,
        }
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api { status: 429, .. })
            || matches!(self, Self::Api { error, .. } if error.is_rate_limit())
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

fn extract_message(value: &Value, depth: u8) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) if depth > 0 => {
            for key in ["message", "error"] {
                match map.get(key) {
                    Some(Value::String(s)) => return Some(s.clone()),
                    Some(nested @ Value::Object(_)) => {
                        if let Some(found) = extract_message(nested, depth - 1) {
                            return Some(found);
                        }
                    }
                    _ => {}
                }
            }
            match map.get("name") {
                Some(Value::String(s)) => Some(s.clone()),
                _ => None,
            }
        }
        _ => None,
    }
}

fn extract_code(value: &Value, depth: u8) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) if depth > 0 => {
            if let Some(Value::String(name)) = map.get("name") {
                return Some(name.clone());
            }
            match map.get("error") {
                Some(nested @ Value::Object(_)) => extract_code(nested, depth - 1),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_standard_envelope() {
        let body = json!({
            "error": {
                "name": "insufficient_funds_bid",
                "message": "주문가능한 금액(KRW)이 부족합니다."
            }
        });

        let err = RestError::from_response(400, &body);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.code(), Some(UpbitErrorCode::InsufficientFundsBid));
        assert!(err.to_string().contains("금액"));
    }

    #[test]
    fn test_flat_message() {
        let body = json!({"message": "gateway timeout"});
        let err = RestError::from_response(504, &body);
        assert_eq!(err.code(), None);
        assert!(err.to_string().contains("gateway timeout"));
    }

    #[test]
    fn test_name_only_envelope() {
        let body = json!({"error": {"name": "jwt_verification"}});
        let err = RestError::from_response(401, &body);
        assert_eq!(err.code(), Some(UpbitErrorCode::JwtVerification));
        // name doubles as the message when no text is present
        assert!(err.to_string().contains("jwt_verification"));
    }

    #[test]
    fn test_empty_body_falls_back_to_status() {
        let err = RestError::from_response(502, &Value::Null);
        assert_eq!(err.code(), None);
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_depth_limit_stops_recursion() {
        // Three levels deep: beyond the extractor's reach
        let body = json!({"error": {"error": {"error": {"message": "too deep"}}}});
        let err = RestError::from_response(500, &body);
        assert!(!err.to_string().contains("too deep"));
    }

    #[test]
    fn test_rate_limited() {
        let body = json!({"error": {"name": "too_many_requests", "message": "slow down"}});
        assert!(RestError::from_response(429, &body).is_rate_limited());

        let plain = RestError::from_response(429, &Value::Null);
        assert!(plain.is_rate_limited());
    }
}
