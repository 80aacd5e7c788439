use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry projected from an RSS `<item>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publish_date: String,
}

/// What `get_news` resolves with.
///
/// RSS feeds are projected into [`NewsItem`]s. The JSON feed is already
/// shaped by the backend and is handed back exactly as parsed, whatever
/// its fields or top-level shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum News {
    Items(Vec<NewsItem>),
    Raw(Value),
}

impl News {
    pub fn items(&self) -> Option<&[NewsItem]> {
        match self {
            Self::Items(items) => Some(items),
            Self::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&Value> {
        match self {
            Self::Items(_) => None,
            Self::Raw(value) => Some(value),
        }
    }

    /// Entry count; a JSON feed that is not an array counts as one entry.
    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Raw(Value::Array(entries)) => entries.len(),
            Self::Raw(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where news is read from, decided by the remote config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsMode {
    Rss(String),
    Json,
}
