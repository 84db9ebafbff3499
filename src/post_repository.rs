use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use spdlog::{debug, error};

use crate::content::content_store::ContentStore;
use crate::content::fetcher::{ContentFetcher, ContentLayout};
use crate::content::{Author, Post, PostMetadata};
use crate::error::{BlogError, BlogResult};

pub const DEFAULT_RECENT_LIMIT: usize = 3;

/// Joins the content store with bodies pulled through a [`ContentFetcher`].
///
/// Nothing is memoized: every call that needs a body fetches it again. A failed
/// fetch fails the whole call, there is no partial result.
pub struct PostRepository {
    store: ContentStore,
    fetcher: Arc<dyn ContentFetcher>,
    layout: ContentLayout,
}

impl PostRepository {
    pub fn new(store: ContentStore, fetcher: Arc<dyn ContentFetcher>, layout: ContentLayout) -> Self {
        PostRepository {
            store,
            fetcher,
            layout,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    async fn load_post(&self, metadata: &PostMetadata) -> BlogResult<Post> {
        let path = self.layout.path_for(&metadata.slug);
        debug!("Fetching content for {} from {}", metadata.slug, path);

        match self.fetcher.fetch(&path).await {
            Ok(content) => Ok(Post::join(metadata.clone(), content)),
            Err(source) => {
                error!("Error fetching content for {}: {}", metadata.slug, source);
                Err(BlogError::Fetch {
                    slug: metadata.slug.clone(),
                    source,
                })
            }
        }
    }

    /// Every post, in content store order. Fetches run concurrently; the first
    /// failure in store order is reported.
    pub async fn list_all(&self) -> BlogResult<Vec<Post>> {
        let loads = self.store.posts().iter().map(|metadata| self.load_post(metadata));
        join_all(loads).await.into_iter().collect()
    }

    /// Exact, case-sensitive slug match. No fetch happens when the slug is unknown.
    pub async fn get_by_slug(&self, slug: &str) -> BlogResult<Option<Post>> {
        match self.store.find(slug) {
            None => {
                debug!("No post with slug {}", slug);
                Ok(None)
            }
            Some(metadata) => self.load_post(metadata).await.map(Some),
        }
    }

    pub async fn get_by_tag(&self, tag: &str) -> BlogResult<Vec<Post>> {
        let posts = self.list_all().await?;
        Ok(posts.into_iter()
            .filter(|post| post.metadata.has_tag(tag))
            .collect())
    }

    /// Most recently published first. Posts sharing a date keep store order.
    pub async fn get_recent(&self, limit: usize) -> BlogResult<Vec<Post>> {
        let mut posts = self.list_all().await?;
        posts.sort_by(|a, b| {
            b.metadata.published_date.cmp(&a.metadata.published_date)
        });
        posts.truncate(limit);
        Ok(posts)
    }

    /// Union of every tag, first occurrence wins the position.
    pub fn get_all_tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.store.posts().iter()
            .flat_map(|post| post.tags.iter())
            .filter(|tag| seen.insert(tag.as_str()))
            .cloned()
            .collect()
    }

    pub fn get_author(&self, name: &str) -> Author {
        match self.store.find_author(name) {
            Some(author) => author.clone(),
            None => Author::placeholder(name),
        }
    }
}
