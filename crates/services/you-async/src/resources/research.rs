use serde::de::DeserializeOwned;

use crate::{
    client::Client,
    config::{Config, Host},
    error::YouError,
    types::research::ResearchRequest,
};

/// API resource for the `/research` endpoint
pub struct Research<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Research<'c, C> {
    /// Creates a new Research resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Run an in-depth research query
    ///
    /// Returns the decoded JSON body unmodified.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns a non-200 status.
    pub async fn create(&self, req: ResearchRequest) -> Result<serde_json::Value, YouError> {
        self.create_as(req).await
    }

    /// Same as [`Self::create`], decoding the body into `O`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns a non-200 status,
    /// or the body does not decode into `O`.
    pub async fn create_as<O: DeserializeOwned>(&self, req: ResearchRequest) -> Result<O, YouError> {
        self.client.post(Host::Smart, "/research", &req).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Research API resource
    #[must_use]
    pub const fn research(&self) -> Research<'_, C> {
        Research::new(self)
    }
}
