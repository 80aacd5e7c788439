use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::error::RemoteError;
use super::http::{fetch_json, HttpFetch, HttpRequest};
use super::settings::Endpoints;

/// Remote launcher configuration, kept as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument(Value);

impl ConfigDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// RSS feed URL selecting the news mode, when present and non-blank.
    pub fn rss(&self) -> Option<&str> {
        self.get("rss")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

#[derive(Clone)]
pub struct ConfigFetcher {
    fetcher: Arc<dyn HttpFetch>,
    endpoints: Endpoints,
}

impl ConfigFetcher {
    pub fn new(fetcher: Arc<dyn HttpFetch>, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    pub async fn get_config(&self) -> Result<ConfigDocument, RemoteError> {
        let url = self.endpoints.config_url()?;
        let value = fetch_json(self.fetcher.as_ref(), &HttpRequest::get(url).no_cache()).await?;
        Ok(ConfigDocument::new(value))
    }
}
