#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

//! Async You.com API client with retries, typed errors, and wiremock tests.
//!
//! Covers the conversational endpoints (`/smart`, `/research`) on the chat host
//! and the lookup endpoints (`/search`, `/news`) on the search host.
//!
//! ```no_run
//! use you_async::prelude::*;
//!
//! # async fn run() -> Result<(), you_async::YouError> {
//! let client = Client::new()?;
//! let answer = client.smart().create(SmartRequest::new("What is Rust?")).await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// Request/response interceptors
pub mod middleware;
/// API resource implementations
pub mod resources;
/// Retry policy and sleepers
pub mod retry;
/// Caller-owned logging settings
pub mod settings;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request types
pub mod types;

pub use crate::client::Client;
pub use crate::config::YouConfig;
pub use crate::error::{ApiError, ErrorKind, YouError};
pub use crate::retry::RetryPolicy;
pub use crate::settings::{LogSink, Settings};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{Client, ErrorKind, RetryPolicy, Settings, YouConfig, YouError};
}
