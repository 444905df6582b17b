use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Default base URL for the conversational endpoints (`/smart`, `/research`)
pub const YOU_SMART_DEFAULT_BASE: &str = "https://chat-api.you.com";
/// Default base URL for the lookup endpoints (`/search`, `/news`)
pub const YOU_SEARCH_DEFAULT_BASE: &str = "https://api.ydc-index.io";
/// Header name for API key authentication
pub const HDR_X_API_KEY: &str = "x-api-key";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "YOU_API_KEY";
/// Environment variable overriding the chat host
pub const ENV_SMART_BASE_URL: &str = "YOU_SMART_BASE_URL";
/// Environment variable overriding the search host
pub const ENV_SEARCH_BASE_URL: &str = "YOU_SEARCH_BASE_URL";

/// Which You.com host an endpoint lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// Conversational endpoints
    Smart,
    /// Search and news endpoints
    Search,
}

/// Configuration for the You.com client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct YouConfig {
    smart_base: String,
    search_base: String,
    api_key: Option<SecretString>,
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for YouConfig {
    fn default() -> Self {
        Self {
            smart_base: env_non_empty(ENV_SMART_BASE_URL)
                .unwrap_or_else(|| YOU_SMART_DEFAULT_BASE.into()),
            search_base: env_non_empty(ENV_SEARCH_BASE_URL)
                .unwrap_or_else(|| YOU_SEARCH_DEFAULT_BASE.into()),
            api_key: env_non_empty(ENV_API_KEY).map(SecretString::from),
        }
    }
}

impl YouConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `YOU_API_KEY` for API key authentication
    /// - `YOU_SMART_BASE_URL` for the chat host (defaults to `https://chat-api.you.com`)
    /// - `YOU_SEARCH_BASE_URL` for the search host (defaults to `https://api.ydc-index.io`)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key, taking precedence over `YOU_API_KEY`
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Sets the base URL for `/smart` and `/research`
    #[must_use]
    pub fn with_smart_base(mut self, base: impl Into<String>) -> Self {
        self.smart_base = base.into();
        self
    }

    /// Sets the base URL for `/search` and `/news`
    #[must_use]
    pub fn with_search_base(mut self, base: impl Into<String>) -> Self {
        self.search_base = base.into();
        self
    }

    /// Points both hosts at the same base URL
    #[must_use]
    pub fn with_api_base(self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.with_smart_base(base.clone()).with_search_base(base)
    }

    /// Returns the configured chat host
    #[must_use]
    pub fn smart_base(&self) -> &str {
        &self.smart_base
    }

    /// Returns the configured search host
    #[must_use]
    pub fn search_base(&self) -> &str {
        &self.search_base
    }
}

/// Configuration trait for the You.com client
///
/// Implement this trait to provide custom authentication and API configuration.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, crate::error::YouError>;

    /// Constructs the full URL for an API endpoint on the given host
    fn url(&self, host: Host, path: &str) -> String;

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication is not properly configured.
    fn validate_auth(&self) -> Result<(), crate::error::YouError>;
}

impl Config for YouConfig {
    fn headers(&self) -> Result<HeaderMap, crate::error::YouError> {
        use crate::error::YouError;

        let mut h = HeaderMap::new();

        if let Some(secret) = &self.api_key {
            let key = secret.expose_secret().trim();
            if !key.is_empty() {
                h.insert(
                    HDR_X_API_KEY,
                    HeaderValue::from_str(key)
                        .map_err(|_| YouError::Config("Invalid x-api-key value".into()))?,
                );
            }
        }

        Ok(h)
    }

    fn url(&self, host: Host, path: &str) -> String {
        let base = match host {
            Host::Smart => &self.smart_base,
            Host::Search => &self.search_base,
        };
        let base = base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn validate_auth(&self) -> Result<(), crate::error::YouError> {
        use crate::error::YouError;

        let key = match &self.api_key {
            Some(secret) if !secret.expose_secret().trim().is_empty() => {
                secret.expose_secret().trim()
            }
            _ => {
                return Err(YouError::Config(format!(
                    "No API key provided. Set {ENV_API_KEY} env or pass an API key."
                )));
            }
        };

        HeaderValue::from_str(key)
            .map_err(|_| YouError::Config("Invalid x-api-key value".into()))?;
        Ok(())
    }
}
