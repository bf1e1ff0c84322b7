use feed_rs::model::Entry;
use serde::Deserialize;

use super::types::{FeedFormat, FeedItem, ParsedFeed};

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("xml feed parse error: {0}")]
    Xml(#[from] feed_rs::parser::ParseFeedError),
    #[error("json feed parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeed {
    title: Option<String>,
    #[serde(default)]
    items: Vec<JsonFeedItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonFeedItem {
    title: Option<String>,
    url: Option<String>,
    external_url: Option<String>,
    summary: Option<String>,
    content_text: Option<String>,
    content_html: Option<String>,
}

pub fn parse_feed_bytes(raw: &[u8]) -> Result<ParsedFeed, FeedParseError> {
    let trimmed = raw.trim_ascii_start();
    if trimmed.is_empty() {
        return Err(FeedParseError::EmptyPayload);
    }
    if trimmed[0] == b'{' {
        return parse_json_feed(trimmed);
    }
    parse_xml_feed(trimmed)
}

fn parse_xml_feed(raw: &[u8]) -> Result<ParsedFeed, FeedParseError> {
    let feed = feed_rs::parser::parse(raw)?;
    let title = feed
        .title
        .as_ref()
        .map(|text| text.content.clone())
        .unwrap_or_else(|| "Untitled Feed".to_string());
    let items = feed.entries.iter().map(item_from_xml).collect();

    Ok(ParsedFeed {
        format: FeedFormat::XmlFeed,
        title,
        items,
    })
}

fn parse_json_feed(raw: &[u8]) -> Result<ParsedFeed, FeedParseError> {
    let feed: JsonFeed = serde_json::from_slice(raw)?;
    let title = feed.title.unwrap_or_else(|| "Untitled Feed".to_string());
    let items = feed
        .items
        .into_iter()
        .map(|item| {
            FeedItem::from_parts(
                item.title,
                item.url.or(item.external_url),
                item.summary.or(item.content_text).or(item.content_html),
            )
        })
        .collect();

    Ok(ParsedFeed {
        format: FeedFormat::JsonFeed,
        title,
        items,
    })
}

fn item_from_xml(entry: &Entry) -> FeedItem {
    let title = entry.title.as_ref().map(|text| text.content.clone());
    let link = entry.links.first().map(|link| link.href.clone());
    let description = entry
        .summary
        .as_ref()
        .map(|text| text.content.clone())
        .or_else(|| {
            entry
                .content
                .as_ref()
                .and_then(|content| content.body.clone())
        });

    FeedItem::from_parts(title, link, description)
}
