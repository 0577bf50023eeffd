use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the endpoint for `publishedAt`.
const PUBLISHED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DISPLAY_FORMAT: &str = "%d %b %Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub source_name: String,
    pub published_at: String,
    pub url: String,
    pub image_url: Option<String>,
}

impl Article {
    pub fn new(title: String, url: String) -> Self {
        Self {
            title,
            source_name: String::new(),
            published_at: String::new(),
            url,
            image_url: None,
        }
    }

    pub fn with_source_name(mut self, source_name: String) -> Self {
        self.source_name = source_name;
        self
    }

    pub fn with_published_at(mut self, published_at: String) -> Self {
        self.published_at = published_at;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    /// Identity used when diffing lists: the article url.
    pub fn id(&self) -> &str {
        &self.url
    }

    pub fn same_identity(&self, other: &Article) -> bool {
        self.url == other.url
    }

    pub fn display_date(&self) -> String {
        format_published_date(&self.published_at)
    }
}

/// Format: "2024-03-05T10:00:00Z" -> "05 Mar 2024".
/// Anything that does not parse is returned unchanged.
pub fn format_published_date(input: &str) -> String {
    match NaiveDateTime::parse_from_str(input, PUBLISHED_FORMAT) {
        Ok(date) => date.format(DISPLAY_FORMAT).to_string(),
        Err(_) => input.to_string(),
    }
}
