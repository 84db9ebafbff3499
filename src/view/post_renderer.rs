use ramhorns::Template;

use crate::content::markdown_renderer::render_markdown;
use crate::error::{BlogError, BlogResult};
use crate::query_string::list_link;
use crate::router::Route;
use crate::text_utils::{format_date, format_iso_date};
use crate::view::detail_view::DetailView;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
    link: String,
}

#[derive(ramhorns::Content)]
struct RecentItem<'a> {
    link: String,
    title: &'a str,
    date: String,
    current: bool,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    id: &'a str,
    author: &'a str,
    author_about: String,
    tags: Vec<ViewTag<'a>>,
    date: String,
    iso_date: String,
    last_updated: String,
    has_last_updated: bool,
    featured_image: &'a str,
    has_featured_image: bool,
    read_time: u32,
    post_title: &'a str,
    post_content: &'a str,
    recent_posts: Vec<RecentItem<'a>>,
    back_link: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
    img_prefix: String,
}

impl PostRenderer<'_> {
    /// `img_prefix` is where relative images of a post body are served from.
    pub fn new<'a>(view_tpl_src: &'a str, img_prefix: &str) -> BlogResult<PostRenderer<'a>> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(BlogError::Template(format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
            img_prefix: img_prefix.to_string(),
        })
    }

    /// Renders an activated view. `None` when the view holds no post.
    pub fn render(&self, view: &DetailView, back: &Route) -> BlogResult<Option<String>> {
        let Some(post) = view.post() else {
            return Ok(None);
        };
        let metadata = &post.metadata;

        let rendered = render_markdown(&post.content, Some(&self.img_prefix))?;
        let tags = metadata.tags.iter()
            .map(|t| ViewTag { tag: t.as_str(), link: list_link("", Some(t)) })
            .collect();
        let recent_posts = view.recent_posts().iter()
            .map(|p| RecentItem {
                link: Route::Detail(p.metadata.slug.clone()).path(),
                title: &p.metadata.title,
                date: format_date(&p.metadata.published_date),
                current: p.id == post.id,
            })
            .collect();

        let back_link = back.path();
        let rendered_page = self.template.render(&ViewItem {
            id: &post.id.0,
            author: &metadata.author,
            author_about: view.author_about(&metadata.author),
            tags,
            date: format_date(&metadata.published_date),
            iso_date: format_iso_date(&metadata.published_date),
            last_updated: metadata.last_updated.as_ref().map(format_date).unwrap_or_default(),
            has_last_updated: metadata.last_updated.is_some(),
            featured_image: metadata.featured_image.as_deref().unwrap_or_default(),
            has_featured_image: metadata.featured_image.is_some(),
            read_time: metadata.read_time,
            post_title: &metadata.title,
            post_content: &rendered,
            recent_posts,
            back_link: &back_link,
        });

        Ok(Some(rendered_page))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::content::content_store::ContentStore;
    use crate::post_repository::{PostRepository, DEFAULT_RECENT_LIMIT};
    use crate::test_data::*;

    use super::*;

    const TEMPLATE: &str = r##"
TITLE=[{{post_title}}]
AUTHOR=[{{author}}|{{author_about}}]
DATE=[{{date}}|{{iso_date}}]
TAGS=[{{#tags}}({{tag}}:{{link}}){{/tags}}]
RECENT=[{{#recent_posts}}({{title}}{{#current}}*{{/current}}){{/recent_posts}}]
BACK=[{{back_link}}]
POST_CONTENT=[{{{post_content}}}]"##;

    fn repository() -> PostRepository {
        PostRepository::new(ContentStore::seed(), Arc::new(MemoryFetcher::seeded()), seed_layout())
    }

    #[tokio::test]
    async fn render_view() {
        let repo = repository();
        let mut view = DetailView::new(&repo, DEFAULT_RECENT_LIMIT);
        view.activate("welcome-to-my-personal-blog").await.unwrap();

        let renderer = PostRenderer::new(TEMPLATE, CONTENT_BASE).unwrap();
        let res = renderer.render(&view, &Route::List).unwrap().unwrap();

        assert!(res.contains("TITLE=[Welcome]"));
        assert!(res.contains("AUTHOR=[Jose V|Learning and exploration passionate.]"));
        assert!(res.contains("DATE=[January 2, 2025|2025-01-02]"));
        assert!(res.contains("TAGS=[(welcome:/blog?tag=welcome)(introduction:/blog?tag=introduction)(blogging:/blog?tag=blogging)]"));
        assert!(res.contains("RECENT=[(Angular Basics)(Welcome*)]"));
        assert!(res.contains("BACK=[/blog]"));
        assert!(res.contains("<h1>Welcome</h1>"));
        assert!(res.contains(r#"src="/assets/blog-posts/me.png""#));
    }

    #[test]
    fn render_without_post() {
        let repo = repository();
        let view = DetailView::new(&repo, DEFAULT_RECENT_LIMIT);
        let renderer = PostRenderer::new(TEMPLATE, CONTENT_BASE).unwrap();
        assert!(renderer.render(&view, &Route::List).unwrap().is_none());
    }
}
