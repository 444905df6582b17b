use std::sync::Arc;
use std::time::Duration;

use backon::Retryable;
use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::{Config, Host},
    error::YouError,
    middleware::Pipeline,
    retry::{self, RetryPolicy, Sleeper, TokioSleeper},
    settings::Settings,
};

/// You.com API client
///
/// The client is generic over a [`Config`] implementation that provides authentication
/// and API configuration. The transport and interceptor pipeline are built once and
/// shared by clones.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
    settings: Settings,
    pipeline: Pipeline,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl Client<crate::config::YouConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses environment variables:
    /// - `YOU_API_KEY` for API key authentication
    /// - `YOU_SMART_BASE_URL` / `YOU_SEARCH_BASE_URL` for custom hosts
    ///
    /// # Errors
    ///
    /// Returns [`YouError::Config`] if no API key is set.
    pub fn new() -> Result<Self, YouError> {
        Self::with_config(crate::config::YouConfig::new())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`YouError::Config`] if the configuration has no API key, or
    /// [`YouError::Reqwest`] if the transport cannot be built.
    pub fn with_config(config: C) -> Result<Self, YouError> {
        config.validate_auth()?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(60))
            .build()?;
        let settings = Settings::default();

        Ok(Self {
            http,
            pipeline: Pipeline::from_settings(&settings),
            settings,
            config,
            retry: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Replaces the logging settings and rebuilds the interceptor pipeline
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.pipeline = Pipeline::from_settings(&settings);
        self.settings = settings;
        self
    }

    /// Replaces the interceptor pipeline built from the settings
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the sleeper used between retries
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    /// Returns the client's logging settings
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the client's retry policy
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub(crate) async fn get<Q, O>(&self, host: Host, path: &str, query: &Q) -> Result<O, YouError>
    where
        Q: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let mk = || -> Result<reqwest::Request, YouError> {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .get(self.config.url(host, path))
                .headers(headers)
                .query(query)
                .build()?)
        };
        self.execute(&Method::GET, mk).await
    }

    pub(crate) async fn post<I, O>(&self, host: Host, path: &str, body: &I) -> Result<O, YouError>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let mk = || -> Result<reqwest::Request, YouError> {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .post(self.config.url(host, path))
                .headers(headers)
                .json(body)
                .build()?)
        };
        self.execute(&Method::POST, mk).await
    }

    async fn execute<O, M>(&self, method: &Method, mk: M) -> Result<O, YouError>
    where
        O: DeserializeOwned,
        M: Fn() -> Result<reqwest::Request, YouError>,
    {
        let bytes = self.execute_raw(method, mk).await?;
        let resp: O =
            serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))?;
        Ok(resp)
    }

    async fn execute_raw<M>(&self, method: &Method, mk: M) -> Result<bytes::Bytes, YouError>
    where
        M: Fn() -> Result<reqwest::Request, YouError>,
    {
        let retryable_method = retry::is_retryable_method(method);
        let sleeper = Arc::clone(&self.sleeper);
        let mut attempt: u32 = 0;

        (|| async {
            let request = mk()?;
            self.send(request).await
        })
        .retry(self.retry)
        .when(|err: &YouError| retryable_method && err.is_retryable())
        .adjust(|err: &YouError, backoff: Option<Duration>| {
            backoff.map(|wait| err.retry_after().unwrap_or(wait))
        })
        .notify(|err: &YouError, wait: Duration| {
            attempt += 1;
            tracing::warn!(attempt, ?wait, error = %err, "retrying You API request");
        })
        .sleep(move |wait: Duration| sleeper.sleep(wait))
        .await
    }

    async fn send(&self, request: reqwest::Request) -> Result<bytes::Bytes, YouError> {
        self.pipeline.on_request(&request);

        let response = self.http.execute(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        self.pipeline.on_response(status, &headers, &bytes);

        if status == StatusCode::OK {
            return Ok(bytes);
        }

        Err(crate::error::from_response(status, &headers, &bytes))
    }
}
