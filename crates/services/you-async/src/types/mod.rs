//! Request types for the You.com API

/// News endpoint types
pub mod news;
/// Research endpoint types
pub mod research;
/// Search endpoint types
pub mod search;
/// Smart endpoint types
pub mod smart;

pub use news::NewsRequest;
pub use research::ResearchRequest;
pub use search::{SafeSearch, SearchRequest};
pub use smart::SmartRequest;
