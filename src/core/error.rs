use serde::Serialize;
use serde_json::Value;

use super::http::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("launcher base url is not configured")]
    ConfigUrlMissing,
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("empty response from server")]
    EmptyResponse,
    #[error("json parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("xml parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),
    #[error("rss document has no channel element")]
    MissingRssChannel,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("server returned {code}: {status_text}")]
    HttpStatus { code: u16, status_text: String },
    #[error("server not accessible ({code} {status_text})")]
    ServerNotAccessible { code: u16, status_text: String },
}

/// Wire shape of a failure: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub code: Value,
    pub message: String,
}

impl RemoteError {
    pub fn code(&self) -> String {
        match self {
            Self::ConfigUrlMissing => "CONFIG_URL_MISSING".to_string(),
            Self::InvalidUrl(_) => "INVALID_URL".to_string(),
            Self::EmptyResponse => "EMPTY_RESPONSE".to_string(),
            Self::JsonParse(_) => "JSON_PARSE_ERROR".to_string(),
            Self::XmlParse(_) | Self::MissingRssChannel => "XML_PARSE_ERROR".to_string(),
            Self::Fetch(_) => "FETCH_ERROR".to_string(),
            Self::HttpStatus { code, .. } => code.to_string(),
            Self::ServerNotAccessible { status_text, .. } => status_text.clone(),
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        let (code, message) = match self {
            Self::HttpStatus { code, .. } => (Value::from(*code), self.to_string()),
            Self::ServerNotAccessible { status_text, .. } => (
                Value::from(status_text.as_str()),
                "server not accessible".to_string(),
            ),
            _ => (Value::from(self.code()), self.to_string()),
        };
        ErrorPayload {
            error: ErrorBody { code, message },
        }
    }
}
