//! Types for the `/search` endpoint

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parameters with a typed field on [`SearchRequest`]
const TYPED_PARAMS: &[&str] = &["query", "num_web_results", "offset", "country", "safesearch"];

/// Safe-search filtering level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    /// No filtering
    Off,
    /// Filter explicit images and video
    Moderate,
    /// Filter all explicit content
    Strict,
}

/// Query parameters for `GET /search`
///
/// Any parameter without a typed field goes through [`SearchRequest::with_param`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search query
    pub query: String,

    /// Number of web results to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_web_results: Option<u32>,

    /// Page offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Two-letter country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Safe-search level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safesearch: Option<SafeSearch>,

    /// Additional query parameters, sent verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl SearchRequest {
    /// Create a new search request with the given query
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Set the number of web results
    #[must_use]
    pub fn with_num_web_results(mut self, n: u32) -> Self {
        self.num_web_results = Some(n);
        self
    }

    /// Set the page offset
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the country
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the safe-search level
    #[must_use]
    pub fn with_safesearch(mut self, level: SafeSearch) -> Self {
        self.safesearch = Some(level);
        self
    }

    /// Add an arbitrary query parameter
    ///
    /// Keys naming a typed field are ignored; use the typed setter instead.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        if TYPED_PARAMS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "ignoring extra parameter that shadows a typed field");
            return self;
        }
        self.extra.insert(key, value.to_string());
        self
    }

    /// Add a query parameter only when `value` is present
    #[must_use]
    pub fn with_opt_param(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.with_param(key, v),
            None => self,
        }
    }
}
