//! API resource implementations for the You.com client

/// News API resource
pub mod news;
/// Research API resource
pub mod research;
/// Search API resource
pub mod search;
/// Smart API resource
pub mod smart;

pub use news::News;
pub use research::Research;
pub use search::Search;
pub use smart::Smart;
