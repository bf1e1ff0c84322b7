pub mod fetcher;
pub mod parser;
pub mod types;

use fetcher::FetchError;
use parser::FeedParseError;
use types::FeedItem;

pub const DEFAULT_FEED_URL: &str = "https://feeds.yle.fi/uutiset/v1/recent.rss?publisherIds=YLE_NEWS";

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] FeedParseError),
}

/// Fetches `source_url` once and returns its items in feed order.
pub async fn fetch_items(
    client: &reqwest::Client,
    source_url: &str,
) -> Result<Vec<FeedItem>, FeedError> {
    let fetched = fetcher::fetch_feed(client, source_url).await?;
    let parsed = parser::parse_feed_bytes(&fetched.body)?;
    tracing::info!(
        feed = %parsed.title,
        items = parsed.items.len(),
        "feed fetched"
    );
    Ok(parsed.items)
}
