use ramhorns::Template;

use crate::content::Post;
use crate::error::{BlogError, BlogResult};
use crate::query_string::list_link;
use crate::router::Route;
use crate::text_utils::format_date;
use crate::view::list_view::ListView;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    post_list: Vec<PostItem<'a>>,
    tags: Vec<ViewTag<'a>>,
    search_term: &'a str,
    selected_tag: &'a str,
    has_filter: bool,
    clear_link: String,
    result_count: usize,
    no_results: bool,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    link: String,
    title: &'a str,
    excerpt: &'a str,
    date: String,
    read_time: u32,
    author: &'a str,
    featured_image: &'a str,
    has_featured_image: bool,
    tags: Vec<ViewTag<'a>>,
}

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
    link: String,
    selected: bool,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> BlogResult<ListRenderer<'_>> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(BlogError::Template(format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    fn view_tag<'t>(view: &ListView, tag: &'t str) -> ViewTag<'t> {
        let selected = view.selected_tag() == Some(tag);
        let target = view.toggle_target(tag);
        ViewTag {
            tag,
            link: list_link(view.search_term(), target.as_deref()),
            selected,
        }
    }

    fn post_item<'t>(view: &ListView, post: &'t Post) -> PostItem<'t> {
        let metadata = &post.metadata;
        PostItem {
            link: Route::Detail(metadata.slug.clone()).path(),
            title: &metadata.title,
            excerpt: &metadata.excerpt,
            date: format_date(&metadata.published_date),
            read_time: metadata.read_time,
            author: &metadata.author,
            featured_image: metadata.featured_image.as_deref().unwrap_or_default(),
            has_featured_image: metadata.featured_image.is_some(),
            tags: metadata.tags.iter().map(|t| Self::view_tag(view, t)).collect(),
        }
    }

    pub fn render(&self, view: &ListView) -> String {
        let post_list: Vec<PostItem> = view.filtered_posts()
            .into_iter()
            .map(|post| Self::post_item(view, post))
            .collect();

        let tags = view.available_tags()
            .into_iter()
            .map(|t| Self::view_tag(view, t))
            .collect();

        let result_count = post_list.len();
        let selected_tag = view.selected_tag().unwrap_or_default();
        self.template.render(&ListPage {
            post_list,
            tags,
            search_term: view.search_term(),
            selected_tag,
            has_filter: !view.search_term().is_empty() || !selected_tag.is_empty(),
            clear_link: list_link("", None),
            result_count,
            no_results: result_count == 0,
        })
    }
}
