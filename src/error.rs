use thiserror::Error;

use crate::content::fetcher::FetchError;

pub type BlogResult<T> = Result<T, BlogError>;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("error fetching content of {slug}: {source}")]
    Fetch {
        slug: String,
        #[source]
        source: FetchError,
    },
    #[error("invalid content: {0}")]
    InvalidContent(String),
    #[error("template error: {0}")]
    Template(String),
    #[error("markdown error: {0}")]
    Markdown(String),
}
