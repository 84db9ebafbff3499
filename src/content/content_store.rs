use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::content::{Author, PostMetadata};
use crate::error::{BlogError, BlogResult};
use crate::text_utils::slugify;
use crate::util::toml_date::TomlDate;

/// Ordered post metadata and the author table. Never mutated once built.
#[derive(Debug, Clone)]
pub struct ContentStore {
    posts: Vec<PostMetadata>,
    authors: Vec<Author>,
}

/* Example of index file
[[posts]]
slug = "welcome-to-my-personal-blog"
title = "Welcome"
excerpt = "A brief introduction"
published_date = 2025-01-02
tags = ["welcome", "introduction"]
read_time = 2
author = "Jose V"

[[authors]]
name = "Jose V"
about = "Learning and exploration passionate."
*/
#[derive(Deserialize)]
struct ContentIndex {
    #[serde(default)]
    posts: Vec<PostEntry>,
    #[serde(default)]
    authors: Vec<AuthorEntry>,
}

#[derive(Deserialize)]
struct PostEntry {
    slug: Option<String>,
    title: String,
    excerpt: String,
    published_date: TomlDate,
    last_updated: Option<TomlDate>,
    #[serde(default)]
    tags: Vec<String>,
    read_time: u32,
    featured_image: Option<String>,
    author: String,
}

#[derive(Deserialize)]
struct AuthorEntry {
    name: String,
    #[serde(default)]
    about: String,
}

impl From<PostEntry> for PostMetadata {
    fn from(entry: PostEntry) -> Self {
        let slug = entry.slug.unwrap_or_else(|| slugify(&entry.title));
        let TomlDate(published_date) = entry.published_date;
        PostMetadata {
            slug,
            title: entry.title,
            excerpt: entry.excerpt,
            published_date,
            last_updated: entry.last_updated.map(|TomlDate(d)| d),
            tags: entry.tags,
            read_time: entry.read_time,
            featured_image: entry.featured_image,
            author: entry.author,
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

impl ContentStore {
    pub fn new(posts: Vec<PostMetadata>, authors: Vec<Author>) -> BlogResult<ContentStore> {
        Self::validate(&posts)?;
        Ok(ContentStore { posts, authors })
    }

    /// The blog as shipped: two posts and a single author.
    pub fn seed() -> ContentStore {
        let posts = vec![
            PostMetadata {
                slug: "welcome-to-my-personal-blog".to_string(),
                title: "Welcome".to_string(),
                excerpt: "A brief introduction to my journey and what you can expect from this blog.".to_string(),
                published_date: date(2025, 1, 2),
                last_updated: None,
                tags: tags(&["welcome", "introduction", "blogging"]),
                read_time: 2,
                featured_image: None,
                author: "Jose V".to_string(),
            },
            PostMetadata {
                slug: "getting-started-with-angular".to_string(),
                title: "Angular Basics".to_string(),
                excerpt: "My journey learning Angular and tips for beginners.".to_string(),
                published_date: date(2025, 3, 3),
                last_updated: None,
                tags: tags(&["angular", "web-development", "tutorial"]),
                read_time: 5,
                featured_image: None,
                author: "Jose V".to_string(),
            },
        ];

        let authors = vec![
            Author {
                name: "Jose V".to_string(),
                about: "Learning and exploration passionate.".to_string(),
            },
        ];

        ContentStore { posts, authors }
    }

    pub fn from_toml_str(buf: &str) -> BlogResult<ContentStore> {
        let index: ContentIndex = toml::from_str(buf)
            .map_err(|e| BlogError::InvalidContent(format!("Error parsing content index: {}", e)))?;

        let posts = index.posts.into_iter().map(PostMetadata::from).collect();
        let authors = index.authors.into_iter()
            .map(|a| Author { name: a.name, about: a.about })
            .collect();

        Self::new(posts, authors)
    }

    pub fn from_file(path: &Path) -> BlogResult<ContentStore> {
        let buf = fs::read_to_string(path).map_err(|e| {
            BlogError::InvalidContent(format!("Error opening content index {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&buf)
    }

    pub fn posts(&self) -> &[PostMetadata] {
        &self.posts
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn find(&self, slug: &str) -> Option<&PostMetadata> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    pub fn find_author(&self, name: &str) -> Option<&Author> {
        self.authors.iter().find(|a| a.name == name)
    }

    fn validate(posts: &[PostMetadata]) -> BlogResult<()> {
        lazy_static! {
            static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
        }

        let mut seen = HashSet::new();
        for post in posts {
            if post.title.trim().is_empty() {
                return Err(BlogError::InvalidContent(format!("Post {} has an empty title", post.slug)));
            }
            if !SLUG_REGEX.is_match(&post.slug) {
                return Err(BlogError::InvalidContent(format!("Slug is not URL-safe: [{}]", post.slug)));
            }
            if post.read_time == 0 {
                return Err(BlogError::InvalidContent(format!("Post {} must have a positive read time", post.slug)));
            }
            if !seen.insert(post.slug.as_str()) {
                return Err(BlogError::InvalidContent(format!("Duplicated slug {}", post.slug)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed() {
        let store = ContentStore::seed();
        assert_eq!(store.posts().len(), 2);
        assert_eq!(store.posts()[0].slug, "welcome-to-my-personal-blog");
        assert_eq!(store.posts()[1].slug, "getting-started-with-angular");
        assert_eq!(store.posts()[1].published_date, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert!(ContentStore::validate(store.posts()).is_ok());
        assert_eq!(store.find_author("Jose V").unwrap().about, "Learning and exploration passionate.");
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let store = ContentStore::seed();
        assert!(store.find("getting-started-with-angular").is_some());
        assert!(store.find("Getting-Started-With-Angular").is_none());
    }

    #[test]
    fn test_from_toml() {
        let buf = r##"
[[posts]]
title = "Hello Rust World"
excerpt = "First steps"
published_date = 2024-05-01
last_updated = 2024-06-01
tags = ["rust", "intro"]
read_time = 3
featured_image = "cover.png"
author = "Ana"

[[posts]]
slug = "second-post"
title = "Second"
excerpt = "More"
published_date = 2024-05-02
read_time = 1
author = "Ana"

[[authors]]
name = "Ana"
about = "Writes things."
"##;
        let store = ContentStore::from_toml_str(buf).unwrap();
        let first = &store.posts()[0];
        assert_eq!(first.slug, "hello-rust-world");
        assert_eq!(first.last_updated, Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert_eq!(first.featured_image.as_deref(), Some("cover.png"));
        assert_eq!(first.tags, ["rust", "intro"]);
        assert!(store.posts()[1].tags.is_empty());
        assert_eq!(store.authors().len(), 1);
    }

    #[test]
    fn test_duplicated_slug() {
        let buf = r##"
[[posts]]
slug = "same"
title = "A"
excerpt = ""
published_date = 2024-05-01
read_time = 1
author = "Ana"

[[posts]]
slug = "same"
title = "B"
excerpt = ""
published_date = 2024-05-02
read_time = 1
author = "Ana"
"##;
        let res = ContentStore::from_toml_str(buf);
        assert!(matches!(res, Err(BlogError::InvalidContent(ref s)) if s.contains("Duplicated")));
    }

    #[test]
    fn test_invalid_entries() {
        let mut post = ContentStore::seed().posts()[0].clone();
        post.slug = "Not Safe".to_string();
        assert!(ContentStore::new(vec![post.clone()], vec![]).is_err());

        post.slug = "safe".to_string();
        post.read_time = 0;
        assert!(ContentStore::new(vec![post], vec![]).is_err());

        assert!(ContentStore::from_toml_str("[[posts]]\ntitle = 1").is_err());
    }

    #[test]
    fn test_sample_index_file() {
        let store = ContentStore::from_file(Path::new("res/posts.toml")).unwrap();
        let seed = ContentStore::seed();
        assert_eq!(store.posts(), seed.posts());
        assert_eq!(store.authors(), seed.authors());
    }
}
