use std::collections::HashSet;

use crate::content::Post;
use crate::router::{Navigator, Route};

/// State of the post list page: every post, the visible subset and the two
/// filters driving it.
pub struct ListView {
    posts: Vec<Post>,
    filtered: Vec<usize>,
    search_term: String,
    selected_tag: Option<String>,
}

impl ListView {
    pub fn new(posts: Vec<Post>) -> Self {
        let filtered = (0..posts.len()).collect();
        ListView {
            posts,
            filtered,
            search_term: String::new(),
            selected_tag: None,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn filtered_posts(&self) -> Vec<&Post> {
        self.filtered.iter().map(|&idx| &self.posts[idx]).collect()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }

    pub fn on_search_change(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.filter_posts();
    }

    /// Clicking the selected tag again clears it.
    pub fn on_tag_select(&mut self, tag: &str) {
        self.selected_tag = self.toggle_target(tag);
        self.filter_posts();
    }

    /// The selected tag after a click on `tag`.
    pub fn toggle_target(&self, tag: &str) -> Option<String> {
        match self.selected_tag {
            Some(ref selected) if selected == tag => None,
            _ if tag.is_empty() => None,
            _ => Some(tag.to_string()),
        }
    }

    pub fn filter_posts(&mut self) {
        let term = self.search_term.to_lowercase();
        let selected = self.selected_tag.as_deref();

        self.filtered = self.posts.iter()
            .enumerate()
            .filter(|(_, post)| Self::matches_search(post, &term) && Self::matches_tag(post, selected))
            .map(|(idx, _)| idx)
            .collect();
    }

    fn matches_search(post: &Post, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let metadata = &post.metadata;
        metadata.title.to_lowercase().contains(term)
            || metadata.excerpt.to_lowercase().contains(term)
            || metadata.tags.iter().any(|tag| tag.to_lowercase().contains(term))
    }

    fn matches_tag(post: &Post, selected: Option<&str>) -> bool {
        match selected {
            None => true,
            Some(tag) => post.metadata.has_tag(tag),
        }
    }

    /// Tags of every post, not only the visible ones, in first-seen order.
    pub fn available_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.posts.iter()
            .flat_map(|post| post.metadata.tags.iter())
            .map(|tag| tag.as_str())
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    pub fn navigate_to_post(&self, navigator: &mut Navigator, slug: &str) -> Route {
        navigator.navigate(Route::Detail(slug.to_string())).clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::seed_posts;

    use super::*;

    fn slugs(view: &ListView) -> Vec<&str> {
        view.filtered_posts().iter().map(|p| p.slug()).collect()
    }

    #[test]
    fn test_starts_unfiltered() {
        let view = ListView::new(seed_posts());
        assert_eq!(slugs(&view), ["welcome-to-my-personal-blog", "getting-started-with-angular"]);
        assert_eq!(view.search_term(), "");
        assert!(view.selected_tag().is_none());
    }

    #[test]
    fn test_search() {
        let mut view = ListView::new(seed_posts());
        view.on_search_change("angular");
        assert_eq!(slugs(&view), ["getting-started-with-angular"]);

        // excerpt match, case-insensitive
        view.on_search_change("EXPECT");
        assert_eq!(slugs(&view), ["welcome-to-my-personal-blog"]);

        // tag substring
        view.on_search_change("blogg");
        assert_eq!(slugs(&view), ["welcome-to-my-personal-blog"]);

        view.on_search_change("journey");
        assert_eq!(slugs(&view).len(), 2);

        view.on_search_change("nothing like this");
        assert!(slugs(&view).is_empty());

        view.on_search_change("");
        assert_eq!(slugs(&view).len(), 2);
    }

    #[test]
    fn test_tag_toggle() {
        let mut view = ListView::new(seed_posts());
        view.on_tag_select("welcome");
        assert_eq!(view.selected_tag(), Some("welcome"));
        assert_eq!(slugs(&view), ["welcome-to-my-personal-blog"]);

        view.on_tag_select("welcome");
        assert!(view.selected_tag().is_none());
        assert_eq!(slugs(&view), ["welcome-to-my-personal-blog", "getting-started-with-angular"]);
    }

    #[test]
    fn test_tag_switch_and_case() {
        let mut view = ListView::new(seed_posts());
        view.on_tag_select("welcome");
        view.on_tag_select("TUTORIAL");
        assert_eq!(view.selected_tag(), Some("TUTORIAL"));
        assert_eq!(slugs(&view), ["getting-started-with-angular"]);

        // substring of a tag is not a tag match
        view.on_tag_select("tutor");
        assert!(slugs(&view).is_empty());
    }

    #[test]
    fn test_search_and_tag_combined() {
        let mut view = ListView::new(seed_posts());
        view.on_tag_select("angular");
        view.on_search_change("welcome");
        assert!(slugs(&view).is_empty());

        view.on_search_change("basics");
        assert_eq!(slugs(&view), ["getting-started-with-angular"]);
    }

    #[test]
    fn test_available_tags() {
        let view = ListView::new(seed_posts());
        assert_eq!(view.available_tags(), ["welcome", "introduction", "blogging", "angular", "web-development", "tutorial"]);
    }

    #[test]
    fn test_navigate_to_post() {
        let view = ListView::new(seed_posts());
        let mut navigator = Navigator::new();
        navigator.navigate(Route::List);
        let route = view.navigate_to_post(&mut navigator, "welcome-to-my-personal-blog");
        assert_eq!(route, Route::Detail("welcome-to-my-personal-blog".to_string()));
        assert_eq!(route.path(), "/blog/welcome-to-my-personal-blog");
        assert_eq!(navigator.back(), Route::List);
    }
}
