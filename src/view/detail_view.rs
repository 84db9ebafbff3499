use futures::join;

use crate::content::Post;
use crate::error::BlogResult;
use crate::post_repository::PostRepository;
use crate::router::{Navigator, Route};

#[derive(Debug, PartialEq)]
pub enum DetailOutcome {
    Show,
    Redirect(Route),
}

/// One post plus the recent posts sidebar.
///
/// State is only assigned once both requests of an activation are done, so a
/// dropped activation leaves the view untouched.
pub struct DetailView<'a> {
    repository: &'a PostRepository,
    recent_count: usize,
    post: Option<Post>,
    recent_posts: Vec<Post>,
}

impl<'a> DetailView<'a> {
    pub fn new(repository: &'a PostRepository, recent_count: usize) -> Self {
        DetailView {
            repository,
            recent_count,
            post: None,
            recent_posts: vec![],
        }
    }

    pub async fn activate(&mut self, slug: &str) -> BlogResult<DetailOutcome> {
        let repository = self.repository;
        let (post, recent) = join!(
            repository.get_by_slug(slug),
            repository.get_recent(self.recent_count)
        );

        let Some(post) = post? else {
            return Ok(DetailOutcome::Redirect(Route::NotFound));
        };
        let recent = recent?;

        self.post = Some(post);
        self.recent_posts = recent;
        Ok(DetailOutcome::Show)
    }

    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    pub fn recent_posts(&self) -> &[Post] {
        &self.recent_posts
    }

    pub fn go_back(&self, navigator: &mut Navigator) -> Route {
        navigator.back()
    }

    pub fn author_about(&self, name: &str) -> String {
        self.repository.get_author(name).about
    }

    pub fn navigate_to_post(&self, navigator: &mut Navigator, slug: &str) -> Route {
        navigator.navigate(Route::Detail(slug.to_string())).clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::content::content_store::ContentStore;
    use crate::content::fetcher::{ContentFetcher, ContentLayout, FetchError};
    use crate::error::BlogError;
    use crate::post_repository::DEFAULT_RECENT_LIMIT;
    use crate::test_data::*;

    use super::*;

    fn repository() -> PostRepository {
        PostRepository::new(ContentStore::seed(), Arc::new(MemoryFetcher::seeded()), seed_layout())
    }

    #[tokio::test]
    async fn test_activate_shows_post() {
        let repo = repository();
        let mut view = DetailView::new(&repo, DEFAULT_RECENT_LIMIT);

        let outcome = view.activate("welcome-to-my-personal-blog").await.unwrap();
        assert_eq!(outcome, DetailOutcome::Show);

        let post = view.post().unwrap();
        assert_eq!(post.slug(), "welcome-to-my-personal-blog");
        assert_eq!(post.content, WELCOME_MD);

        let recent: Vec<&str> = view.recent_posts().iter().map(|p| p.slug()).collect();
        assert_eq!(recent, ["getting-started-with-angular", "welcome-to-my-personal-blog"]);
    }

    #[tokio::test]
    async fn test_activate_unknown_slug_redirects() {
        let repo = repository();
        let mut view = DetailView::new(&repo, DEFAULT_RECENT_LIMIT);

        let outcome = view.activate("missing").await.unwrap();
        assert_eq!(outcome, DetailOutcome::Redirect(Route::NotFound));
        assert!(view.post().is_none());
        assert!(view.recent_posts().is_empty());
    }

    #[tokio::test]
    async fn test_activate_fetch_failure() {
        let layout = seed_layout();
        let fetcher = MemoryFetcher::new(&[(layout.path_for("welcome-to-my-personal-blog").as_str(), WELCOME_MD)]);
        let repo = PostRepository::new(ContentStore::seed(), Arc::new(fetcher), layout);
        let mut view = DetailView::new(&repo, DEFAULT_RECENT_LIMIT);

        // the post itself loads, the sidebar does not
        let res = view.activate("welcome-to-my-personal-blog").await;
        assert!(matches!(res, Err(BlogError::Fetch { .. })));
        assert!(view.post().is_none());
    }

    struct PendingFetcher;

    #[async_trait(?Send)]
    impl ContentFetcher for PendingFetcher {
        async fn fetch(&self, _path: &str) -> Result<String, FetchError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_dropped_activation_leaves_view_untouched() {
        let repo = PostRepository::new(ContentStore::seed(), Arc::new(PendingFetcher), ContentLayout::default());
        let mut view = DetailView::new(&repo, DEFAULT_RECENT_LIMIT);

        let res = tokio::time::timeout(Duration::from_millis(10), view.activate("welcome-to-my-personal-blog")).await;
        assert!(res.is_err());
        assert!(view.post().is_none());
        assert!(view.recent_posts().is_empty());
    }

    #[test]
    fn test_author_about() {
        let repo = repository();
        let view = DetailView::new(&repo, DEFAULT_RECENT_LIMIT);
        assert_eq!(view.author_about("Jose V"), "Learning and exploration passionate.");
        assert_eq!(view.author_about("Unknown"), "");
    }

    #[test]
    fn test_go_back() {
        let repo = repository();
        let view = DetailView::new(&repo, DEFAULT_RECENT_LIMIT);

        let mut navigator = Navigator::new();
        navigator.navigate(Route::List);
        view.navigate_to_post(&mut navigator, "welcome-to-my-personal-blog");
        view.navigate_to_post(&mut navigator, "getting-started-with-angular");

        assert_eq!(view.go_back(&mut navigator), Route::Detail("welcome-to-my-personal-blog".to_string()));
        assert_eq!(view.go_back(&mut navigator), Route::List);
    }
}
