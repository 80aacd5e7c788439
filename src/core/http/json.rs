use serde_json::Value;

use super::{HttpFetch, HttpRequest};
use crate::core::error::RemoteError;

/// GET `request` and parse the body as JSON.
pub async fn fetch_json<F>(fetcher: &F, request: &HttpRequest) -> Result<Value, RemoteError>
where
    F: HttpFetch + ?Sized,
{
    let response = fetcher.fetch(request).await?;
    if !response.is_success() {
        return Err(RemoteError::HttpStatus {
            code: response.status,
            status_text: response.status_text,
        });
    }
    parse_json_body(&response.body)
}

pub fn parse_json_body(body: &str) -> Result<Value, RemoteError> {
    if body.trim().is_empty() {
        return Err(RemoteError::EmptyResponse);
    }
    Ok(serde_json::from_str(body)?)
}
