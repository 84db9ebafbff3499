use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::content::fetcher::{has_parent_ref, ContentFetcher, FetchError};

/// Serves content paths out of a local directory.
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: PathBuf) -> Self {
        FileFetcher { root }
    }
}

#[async_trait(?Send)]
impl ContentFetcher for FileFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        if has_parent_ref(path) {
            return Err(FetchError::InvalidPath(path.to_string()));
        }

        let full_path = self.root.join(path.trim_start_matches('/'));
        match tokio::fs::read_to_string(&full_path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FetchError::NotFound(path.to_string())),
            Err(e) => Err(FetchError::Transport {
                path: path.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_sample() {
        let fetcher = FileFetcher::new(PathBuf::from("res/content"));
        let text = fetcher.fetch("/welcome-to-my-personal-blog.md").await.unwrap();
        assert!(text.starts_with("# Welcome"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let fetcher = FileFetcher::new(PathBuf::from("res/content"));
        let res = fetcher.fetch("does-not-exist.md").await;
        assert!(matches!(res, Err(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_parent_dir_is_rejected() {
        let fetcher = FileFetcher::new(PathBuf::from("res/content"));
        let res = fetcher.fetch("../posts.toml").await;
        assert!(matches!(res, Err(FetchError::InvalidPath(_))));
    }
}
