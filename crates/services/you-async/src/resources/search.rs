use serde::de::DeserializeOwned;

use crate::{
    client::Client,
    config::{Config, Host},
    error::YouError,
    types::search::SearchRequest,
};

/// API resource for the `/search` endpoint
pub struct Search<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Search<'c, C> {
    /// Creates a new Search resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Execute a web search
    ///
    /// Returns the decoded JSON body unmodified.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns a non-200 status.
    pub async fn create(&self, req: SearchRequest) -> Result<serde_json::Value, YouError> {
        self.create_as(req).await
    }

    /// Same as [`Self::create`], decoding the body into `O`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns a non-200 status,
    /// or the body does not decode into `O`.
    pub async fn create_as<O: DeserializeOwned>(&self, req: SearchRequest) -> Result<O, YouError> {
        self.client.get(Host::Search, "/search", &req).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Search API resource
    #[must_use]
    pub const fn search(&self) -> Search<'_, C> {
        Search::new(self)
    }
}
