pub mod fetcher;
pub mod json;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, USER_AGENT};

pub use fetcher::ReqwestFetcher;
pub use json::{fetch_json, parse_json_body};

pub const LAUNCHER_USER_AGENT: &str = "MiguelkiNetworkMCLauncher";

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HeaderMap,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HeaderMap::new(),
        }
    }

    pub fn no_cache(mut self) -> Self {
        self.headers
            .insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        self
    }

    pub fn launcher_agent(mut self) -> Self {
        self.headers
            .insert(USER_AGENT, HeaderValue::from_static(LAUNCHER_USER_AGENT));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Network capability the components are built on. One GET per call; retry
/// and timeout policy belong to the implementation.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}
