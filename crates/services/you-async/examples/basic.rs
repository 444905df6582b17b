//! Runs one query against each endpoint.
//!
//! ```sh
//! YOU_API_KEY=... cargo run -p you-async --example basic -- "rust async runtimes"
//! ```

use std::time::Duration;

use you_async::prelude::*;

#[tokio::main]
async fn main() -> Result<(), YouError> {
    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "What is the Rust borrow checker?".to_string());

    let settings = Settings::new().configured(|s| {
        s.set_debug(std::env::var_os("YOU_DEBUG").is_some());
    });
    let client = Client::new()?
        .with_settings(settings)
        .with_retry_policy(RetryPolicy::new(3, Duration::from_secs(1)));

    let smart = client.smart().create(SmartRequest::new(&query)).await?;
    println!("smart: {}", smart["answer"]);

    let hits = client
        .search()
        .create(SearchRequest::new(&query).with_num_web_results(3))
        .await?;
    println!("search: {hits:#}");

    let news = client.news().create(NewsRequest::new(&query).with_count(3)).await?;
    println!("news: {news:#}");

    let research = client.research().create(ResearchRequest::new(&query)).await?;
    println!("research: {}", research["answer"]);

    Ok(())
}
