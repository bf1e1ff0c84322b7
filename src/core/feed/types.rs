pub const DEFAULT_TITLE: &str = "No title";
pub const DEFAULT_LINK: &str = "#";
pub const DEFAULT_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFormat {
    XmlFeed,
    JsonFeed,
}

/// One feed entry reduced to the three fields the report shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
}

impl FeedItem {
    /// Builds an item, substituting the report defaults for absent or blank fields.
    pub fn from_parts(
        title: Option<String>,
        link: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            title: or_default(title, DEFAULT_TITLE),
            link: or_default(link, DEFAULT_LINK),
            description: or_default(description, DEFAULT_DESCRIPTION),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    pub format: FeedFormat,
    pub title: String,
    pub items: Vec<FeedItem>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
