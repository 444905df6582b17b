//! Ordered request/response interceptors run around every attempt.

use std::fmt;
use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Request, StatusCode};

use crate::settings::{LogSink, Settings};

/// Hook observing each outgoing request and each received response
pub trait Interceptor: Send + Sync + fmt::Debug {
    /// Called before the request is handed to the transport
    fn on_request(&self, _request: &Request) {}

    /// Called once the full response body has been read
    fn on_response(&self, _status: StatusCode, _headers: &HeaderMap, _body: &[u8]) {}
}

/// Interceptors applied in insertion order
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Pipeline {
    /// Empty pipeline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard pipeline for the given settings
    ///
    /// Tracing always runs; the sink logger only when `settings.debug()` is on.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let pipeline = Self::new().with(TracingInterceptor);
        if settings.debug() {
            pipeline.with(DebugLogInterceptor::new(settings.log_sink().clone()))
        } else {
            pipeline
        }
    }

    /// Appends an interceptor
    #[must_use]
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Number of interceptors
    #[must_use]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the pipeline has no interceptors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub(crate) fn on_request(&self, request: &Request) {
        for interceptor in &self.interceptors {
            interceptor.on_request(request);
        }
    }

    pub(crate) fn on_response(&self, status: StatusCode, headers: &HeaderMap, body: &[u8]) {
        for interceptor in &self.interceptors {
            interceptor.on_response(status, headers, body);
        }
    }
}

/// Emits `tracing` debug events for each attempt
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInterceptor;

impl Interceptor for TracingInterceptor {
    fn on_request(&self, request: &Request) {
        tracing::debug!(method = %request.method(), url = %request.url(), "sending You API request");
    }

    fn on_response(&self, status: StatusCode, _headers: &HeaderMap, body: &[u8]) {
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received You API response");
    }
}

/// Writes request and response lines to a [`LogSink`]
#[derive(Debug, Clone)]
pub struct DebugLogInterceptor {
    sink: LogSink,
}

impl DebugLogInterceptor {
    /// Logs to `sink`
    #[must_use]
    pub const fn new(sink: LogSink) -> Self {
        Self { sink }
    }
}

/// Query string for GET, JSON body for POST
fn request_params(request: &Request) -> String {
    if let Some(body) = request.body().and_then(reqwest::Body::as_bytes) {
        return String::from_utf8_lossy(body).into_owned();
    }
    request.url().query().unwrap_or_default().to_string()
}

impl Interceptor for DebugLogInterceptor {
    fn on_request(&self, request: &Request) {
        let mut url = request.url().clone();
        url.set_query(None);
        self.sink.write_line(&format!(
            "You API Request: {} {} with {}",
            request.method(),
            url,
            request_params(request)
        ));
    }

    fn on_response(&self, status: StatusCode, headers: &HeaderMap, body: &[u8]) {
        self.sink.write_line(&format!(
            "You API Response: Status {}, Headers: {:?}, Body: {}",
            status.as_u16(),
            headers,
            String::from_utf8_lossy(body)
        ));
    }
}
