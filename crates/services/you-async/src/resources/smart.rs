use serde::de::DeserializeOwned;

use crate::{
    client::Client,
    config::{Config, Host},
    error::YouError,
    types::smart::SmartRequest,
};

/// API resource for the `/smart` endpoint
pub struct Smart<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Smart<'c, C> {
    /// Creates a new Smart resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Ask a question answered from live web results
    ///
    /// Returns the decoded JSON body unmodified.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns a non-200 status.
    pub async fn create(&self, req: SmartRequest) -> Result<serde_json::Value, YouError> {
        self.create_as(req).await
    }

    /// Same as [`Self::create`], decoding the body into `O`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns a non-200 status,
    /// or the body does not decode into `O`.
    pub async fn create_as<O: DeserializeOwned>(&self, req: SmartRequest) -> Result<O, YouError> {
        self.client.post(Host::Smart, "/smart", &req).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Smart API resource
    #[must_use]
    pub const fn smart(&self) -> Smart<'_, C> {
        Smart::new(self)
    }
}
