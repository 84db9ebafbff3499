use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

pub mod content_store;
pub mod fetcher;
pub mod file_fetcher;
pub mod http_fetcher;
pub mod markdown_renderer;

/// Static attributes of a post, everything except the body text.
#[derive(Debug, Clone, PartialEq)]
pub struct PostMetadata {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub published_date: NaiveDate,
    pub last_updated: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub read_time: u32,
    pub featured_image: Option<String>,
    pub author: String,
}

impl PostMetadata {
    /// Case-insensitive tag equality, the only way tags are ever compared.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct PostId(pub String);

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata joined with the markdown body fetched for its slug.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub metadata: PostMetadata,
    pub content: String,
}

impl Post {
    pub fn join(metadata: PostMetadata, content: String) -> Post {
        Post {
            id: PostId(metadata.slug.clone()),
            metadata,
            content,
        }
    }

    pub fn slug(&self) -> &str {
        &self.metadata.slug
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub about: String,
}

impl Author {
    pub fn placeholder(name: &str) -> Author {
        Author {
            name: name.to_string(),
            about: String::new(),
        }
    }
}
