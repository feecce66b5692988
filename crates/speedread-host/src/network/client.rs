use log::{debug, info};
use reqwest::StatusCode;

use super::{ContentResponse, parse_content_id};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8787";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Content not found or expired")]
    NotFound,

    #[error("content service answered status {0}")]
    Status(u16),

    #[error("content service request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Reads shared texts back from a content service.
#[derive(Clone, Debug)]
pub struct ContentClient {
    base_url: String,
    http: reqwest::Client,
}

impl ContentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A malformed id is reported as not found without a request.
    pub async fn fetch(&self, id: &str) -> Result<ContentResponse, FetchError> {
        let Some(id) = parse_content_id(id) else {
            debug!("content: rejected shared id={:?}", id);
            return Err(FetchError::NotFound);
        };

        let url = format!("{}/api/content/{}", self.base_url, id.hyphenated());
        let response = self.http.get(&url).send().await?;
        match response.status() {
            status if status.is_success() => {
                let content = response.json::<ContentResponse>().await?;
                info!(
                    "content: fetched id={} bytes={}",
                    id,
                    content.text.len()
                );
                Ok(content)
            }
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => Err(FetchError::NotFound),
            status => Err(FetchError::Status(status.as_u16())),
        }
    }
}
