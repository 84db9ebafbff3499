use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::content::content_store::ContentStore;
use crate::content::fetcher::{ContentFetcher, ContentLayout, FetchError};
use crate::content::{Post, PostMetadata};

pub const WELCOME_MD: &str = "# Welcome

Hello and welcome to my personal blog.

<!-- more -->

![me](me.png)
";

pub const ANGULAR_MD: &str = "# Angular Basics

Components, services and **dependency injection**.
";

pub const CONTENT_BASE: &str = "/assets/blog-posts";

pub fn welcome_metadata() -> PostMetadata {
    ContentStore::seed().posts()[0].clone()
}

pub fn metadata(slug: &str, date: (i32, u32, u32), tags: &[&str]) -> PostMetadata {
    PostMetadata {
        slug: slug.to_string(),
        title: format!("title of {}", slug),
        excerpt: format!("excerpt of {}", slug),
        published_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        last_updated: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        read_time: 1,
        featured_image: None,
        author: "Jose V".to_string(),
    }
}

pub fn seed_posts() -> Vec<Post> {
    let store = ContentStore::seed();
    vec![
        Post::join(store.posts()[0].clone(), WELCOME_MD.to_string()),
        Post::join(store.posts()[1].clone(), ANGULAR_MD.to_string()),
    ]
}

/// In-memory fetcher counting how many times each path was requested.
pub struct MemoryFetcher {
    bodies: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new(bodies: &[(&str, &str)]) -> Self {
        MemoryFetcher {
            bodies: bodies.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            calls: Mutex::new(vec![]),
        }
    }

    /// Bodies for every post of the seed store, under `CONTENT_BASE`.
    pub fn seeded() -> Self {
        let layout = seed_layout();
        Self::new(&[
            (layout.path_for("welcome-to-my-personal-blog").as_str(), WELCOME_MD),
            (layout.path_for("getting-started-with-angular").as_str(), ANGULAR_MD),
        ])
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn seed_layout() -> ContentLayout {
    ContentLayout::new(CONTENT_BASE, "md")
}

#[async_trait(?Send)]
impl ContentFetcher for MemoryFetcher {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(path.to_string());
        self.bodies.get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}
