use serde::de::DeserializeOwned;

use crate::{
    client::Client,
    config::{Config, Host},
    error::YouError,
    types::news::NewsRequest,
};

/// API resource for the `/news` endpoint
pub struct News<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> News<'c, C> {
    /// Creates a new News resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Fetch news articles matching a query
    ///
    /// Returns the decoded JSON body unmodified.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns a non-200 status.
    pub async fn create(&self, req: NewsRequest) -> Result<serde_json::Value, YouError> {
        self.create_as(req).await
    }

    /// Same as [`Self::create`], decoding the body into `O`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns a non-200 status,
    /// or the body does not decode into `O`.
    pub async fn create_as<O: DeserializeOwned>(&self, req: NewsRequest) -> Result<O, YouError> {
        self.client.get(Host::Search, "/news", &req).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the News API resource
    #[must_use]
    pub const fn news(&self) -> News<'_, C> {
        News::new(self)
    }
}
