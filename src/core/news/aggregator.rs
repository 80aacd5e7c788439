use std::sync::Arc;

use tracing::{debug, warn};

use super::rss::parse_rss_items;
use super::types::{News, NewsMode};
use crate::core::config::{ConfigDocument, ConfigFetcher};
use crate::core::error::RemoteError;
use crate::core::http::{parse_json_body, HttpFetch, HttpRequest, HttpResponse};
use crate::core::settings::Endpoints;

#[derive(Clone)]
pub struct NewsAggregator {
    fetcher: Arc<dyn HttpFetch>,
    endpoints: Endpoints,
    config: ConfigFetcher,
}

impl NewsAggregator {
    pub fn new(fetcher: Arc<dyn HttpFetch>, endpoints: Endpoints, config: ConfigFetcher) -> Self {
        Self {
            fetcher,
            endpoints,
            config,
        }
    }

    /// A failed config fetch counts as a config without `rss`.
    pub async fn mode(&self) -> NewsMode {
        let document = self.config.get_config().await.unwrap_or_else(|error| {
            warn!(code = %error.code(), %error, "config unavailable, using json news feed");
            ConfigDocument::empty()
        });
        match document.rss() {
            Some(url) => NewsMode::Rss(url.to_string()),
            None => NewsMode::Json,
        }
    }

    pub async fn get_news(&self) -> Result<News, RemoteError> {
        let mode = self.mode().await;
        debug!(?mode, "news mode selected");
        match mode {
            NewsMode::Rss(url) => self.fetch_rss(&url).await,
            NewsMode::Json => self.fetch_json_feed().await,
        }
    }

    async fn fetch_rss(&self, url: &str) -> Result<News, RemoteError> {
        let response = self.fetch_accessible(HttpRequest::get(url)).await?;
        Ok(News::Items(parse_rss_items(&response.body)?))
    }

    // served pre-shaped, passed through as parsed
    async fn fetch_json_feed(&self) -> Result<News, RemoteError> {
        let url = self.endpoints.news_url()?;
        let response = self.fetch_accessible(HttpRequest::get(url)).await?;
        Ok(News::Raw(parse_json_body(&response.body)?))
    }

    async fn fetch_accessible(&self, request: HttpRequest) -> Result<HttpResponse, RemoteError> {
        let response = self.fetcher.fetch(&request).await?;
        if !response.is_success() {
            return Err(RemoteError::ServerNotAccessible {
                code: response.status,
                status_text: response.status_text,
            });
        }
        Ok(response)
    }
}
