use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("content not found: {0}")]
    NotFound(String),
    #[error("unexpected status {status} fetching {path}")]
    Status { path: String, status: u16 },
    #[error("transport error fetching {path}: {reason}")]
    Transport { path: String, reason: String },
    #[error("invalid content path: {0}")]
    InvalidPath(String),
}

/// Retrieves the raw text behind a content path.
///
/// Futures are not required to be `Send`: fetches run inside the
/// single-threaded worker that serves the request.
#[async_trait(?Send)]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

pub const DEFAULT_EXTENSION: &str = "md";

/// Where bodies live relative to a fetcher: `<base>/<slug>.<extension>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLayout {
    pub base: String,
    pub extension: String,
}

impl Default for ContentLayout {
    fn default() -> Self {
        ContentLayout {
            base: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl ContentLayout {
    pub fn new(base: &str, extension: &str) -> Self {
        ContentLayout {
            base: base.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn path_for(&self, slug: &str) -> String {
        let base = self.base.trim_end_matches('/');
        if base.is_empty() {
            format!("{}.{}", slug, self.extension)
        } else {
            format!("{}/{}.{}", base, slug, self.extension)
        }
    }
}

pub(crate) fn has_parent_ref(path: &str) -> bool {
    path.split('/').any(|part| part == "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for() {
        let layout = ContentLayout::new("/assets/blog-posts", "md");
        assert_eq!(layout.path_for("welcome"), "/assets/blog-posts/welcome.md");

        let layout = ContentLayout::new("/assets/blog-posts/", ".markdown");
        assert_eq!(layout.path_for("welcome"), "/assets/blog-posts/welcome.markdown");

        let layout = ContentLayout::default();
        assert_eq!(layout.path_for("welcome"), "welcome.md");
    }

    #[test]
    fn test_has_parent_ref() {
        assert!(has_parent_ref("../secret.md"));
        assert!(has_parent_ref("a/../../b.md"));
        assert!(!has_parent_ref("a/b..c.md"));
        assert!(!has_parent_ref("welcome.md"));
    }
}
