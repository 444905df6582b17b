use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use thiserror::Error;

/// Errors that can occur when using the You.com API client
#[derive(Debug, Error)]
pub enum YouError {
    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-200 response returned by the API
    #[error("{0}")]
    Api(ApiError),

    /// Configuration error (e.g., missing credentials)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A 200 response whose body could not be decoded
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Kind of HTTP-status failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 422
    UnprocessableEntity,
    /// 429
    RateLimit,
    /// 500
    InternalServerError,
    /// 502
    BadGateway,
    /// 503
    ServiceUnavailable,
    /// 504
    GatewayTimeout,
    /// Any status without a dedicated kind
    Other,
}

const STATUS_KINDS: &[(u16, ErrorKind)] = &[
    (400, ErrorKind::BadRequest),
    (401, ErrorKind::Unauthorized),
    (403, ErrorKind::Forbidden),
    (404, ErrorKind::NotFound),
    (422, ErrorKind::UnprocessableEntity),
    (429, ErrorKind::RateLimit),
    (500, ErrorKind::InternalServerError),
    (502, ErrorKind::BadGateway),
    (503, ErrorKind::ServiceUnavailable),
    (504, ErrorKind::GatewayTimeout),
];

impl ErrorKind {
    /// Looks up the kind for an HTTP status, defaulting to [`ErrorKind::Other`]
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        STATUS_KINDS
            .iter()
            .find(|(code, _)| *code == status)
            .map_or(Self::Other, |(_, kind)| *kind)
    }

    /// Human-readable label used as the error message prefix
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::RateLimit => "Rate Limit Reached",
            Self::InternalServerError => "Internal Server Error",
            Self::BadGateway => "Bad Gateway",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::GatewayTimeout => "Gateway Timeout",
            Self::Other => "Request failed",
        }
    }
}

/// A non-200 response, with the raw body kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Error kind derived from the status code
    pub kind: ErrorKind,
    /// HTTP status code
    pub status: u16,
    /// Raw response body text
    pub body: String,
    /// `Retry-After` header value, kept for 429 responses
    pub retry_after: Option<String>,
}

impl ApiError {
    /// Returns the error kind
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Other => write!(
                f,
                "Request failed with status {}: {}",
                self.status, self.body
            )?,
            kind => write!(f, "{}: {}", kind.label(), self.body)?,
        }
        if let Some(retry_after) = &self.retry_after {
            write!(f, " (Retry-After: {retry_after})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl YouError {
    /// HTTP status of an API error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status),
            Self::Reqwest(e) => e.status().map(|s| s.as_u16()),
            Self::Config(_) | Self::Serde(_) => None,
        }
    }

    /// Raw response body of an API error, if any
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api(err) => Some(&err.body),
            _ => None,
        }
    }

    /// Kind of an API error, if any
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Api(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Determines if this error is retryable
    ///
    /// Retryable errors are 429, 500, 502, 503 and 504 responses, plus
    /// transport timeouts and connection failures.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(err) => crate::retry::is_retryable_status(err.status),
            Self::Reqwest(e) => e.is_timeout() || e.is_connect(),
            Self::Config(_) | Self::Serde(_) => false,
        }
    }

    /// Server-requested wait for a rate-limited response
    ///
    /// Only numeric `Retry-After` values (whole seconds) on 429 responses count.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Api(ApiError {
                kind: ErrorKind::RateLimit,
                retry_after: Some(value),
                ..
            }) => value.trim().parse::<u64>().ok().map(Duration::from_secs),
            _ => None,
        }
    }
}

/// Maps a serde deserialization error to a `YouError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> YouError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    YouError::Serde(format!("{e}: {snippet}"))
}

/// Builds the typed error for a non-200 response
#[must_use]
pub fn from_response(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> YouError {
    let kind = ErrorKind::from_status(status.as_u16());
    let retry_after = if kind == ErrorKind::RateLimit {
        headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    } else {
        None
    };

    YouError::Api(ApiError {
        kind,
        status: status.as_u16(),
        body: String::from_utf8_lossy(body).into_owned(),
        retry_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn status_table_lookup() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::UnprocessableEntity);
        assert_eq!(ErrorKind::from_status(429), ErrorKind::RateLimit);
        assert_eq!(ErrorKind::from_status(504), ErrorKind::GatewayTimeout);
        assert_eq!(ErrorKind::from_status(418), ErrorKind::Other);
        assert_eq!(ErrorKind::from_status(506), ErrorKind::Other);
    }

    #[test]
    fn message_embeds_body() {
        let err = from_response(StatusCode::NOT_FOUND, &HeaderMap::new(), b"{\"error\":\"x\"}");
        assert_eq!(err.to_string(), "Not Found: {\"error\":\"x\"}");
        assert_eq!(err.body(), Some("{\"error\":\"x\"}"));
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_retryable());
    }

    #[test]
    fn unmapped_status_names_the_code() {
        let err = from_response(
            StatusCode::from_u16(506).unwrap(),
            &HeaderMap::new(),
            b"boom",
        );
        assert_eq!(err.kind(), Some(ErrorKind::Other));
        assert_eq!(err.to_string(), "Request failed with status 506: boom");
    }

    #[test]
    fn rate_limit_keeps_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        let err = from_response(StatusCode::TOO_MANY_REQUESTS, &headers, b"slow down");

        assert_eq!(
            err.to_string(),
            "Rate Limit Reached: slow down (Retry-After: 7)"
        );
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
        assert!(err.is_retryable());
    }

    #[test]
    fn retry_after_ignored_outside_rate_limit() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        let err = from_response(StatusCode::SERVICE_UNAVAILABLE, &headers, b"down");

        assert_eq!(err.to_string(), "Service Unavailable: down");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn non_numeric_retry_after_has_no_wait() {
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        let err = from_response(StatusCode::TOO_MANY_REQUESTS, &headers, b"");
        assert_eq!(err.retry_after(), None);
        assert!(err.to_string().contains("Retry-After: Wed, 21 Oct 2015"));
    }
}
