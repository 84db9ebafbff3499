use async_trait::async_trait;
use ntex::http::client::Client;
use spdlog::debug;

use crate::content::fetcher::{ContentFetcher, FetchError};

/// Fetches content paths over HTTP, relative to `base_url`.
pub struct HttpFetcher {
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Self {
        HttpFetcher {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait(?Send)]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url_for(path);
        debug!("GET {}", url);

        let transport = |reason: String| FetchError::Transport {
            path: path.to_string(),
            reason,
        };

        // One client per fetch: nothing is kept between calls.
        let client = Client::build().finish();
        let mut response = client.get(&url)
            .send()
            .await
            .map_err(|e| transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(FetchError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.body()
            .await
            .map_err(|e| transport(e.to_string()))?;

        String::from_utf8(body.to_vec()).map_err(|e| transport(e.to_string()))
    }
}
