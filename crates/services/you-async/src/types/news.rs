//! Types for the `/news` endpoint

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parameters with a typed field on [`NewsRequest`]
const TYPED_PARAMS: &[&str] = &["query", "count", "offset", "country", "search_lang"];

/// Query parameters for `GET /news`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRequest {
    /// The news query
    pub query: String,

    /// Number of articles to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    /// Page offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Two-letter country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Language of the articles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_lang: Option<String>,

    /// Additional query parameters, sent verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl NewsRequest {
    /// Create a new news request with the given query
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Set the article count
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
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

    /// Set the article language
    #[must_use]
    pub fn with_search_lang(mut self, lang: impl Into<String>) -> Self {
        self.search_lang = Some(lang.into());
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
}
