use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

use ntex::web;
use ntex::web::Error;
use ntex_files::NamedFile;
use ramhorns::Template;
use spdlog::info;

use crate::config::{Config, ContentSource};
use crate::content::content_store::ContentStore;
use crate::content::fetcher::ContentFetcher;
use crate::content::file_fetcher::FileFetcher;
use crate::content::http_fetcher::HttpFetcher;
use crate::error::{BlogError, BlogResult};
use crate::post_repository::PostRepository;
use crate::query_string::list_link;
use crate::router::Route;
use crate::view::detail_view::DetailView;
use crate::view::list_renderer::ListRenderer;
use crate::view::list_view::ListView;
use crate::view::post_renderer::PostRenderer;

#[derive(ramhorns::Content)]
struct NotFoundPage {
    list_link: String,
}

pub fn read_template(tpl_dir: &Path, file_name: &str) -> BlogResult<String> {
    let full_path = tpl_dir.join(file_name);
    fs::read_to_string(&full_path)
        .map_err(|e| BlogError::Template(format!("Error loading template {}: {}", full_path.display(), e)))
}

pub fn get_file(root_dir: &Path, file: &str) -> Result<NamedFile, Error> {
    if file.contains("..") || file.contains('/') {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = root_dir.join(file);
    Ok(NamedFile::open(file_path)?)
}

/// The configured index file, or the built-in posts when there is none.
pub fn load_content_store(config: &Config) -> BlogResult<ContentStore> {
    match config.paths.content_index {
        Some(ref index) => {
            info!("Loading content index from {}", index.display());
            ContentStore::from_file(index)
        }
        None => {
            info!("No content index configured, using built-in posts");
            Ok(ContentStore::seed())
        }
    }
}

pub fn build_fetcher(config: &Config) -> Arc<dyn ContentFetcher> {
    match config.content.source {
        ContentSource::File => {
            info!("Reading post content from {}", config.paths.content_dir.display());
            Arc::new(FileFetcher::new(config.paths.content_dir.clone()))
        }
        ContentSource::Http => {
            let base_url = config.content.base_url.as_deref().unwrap_or_default();
            info!("Fetching post content from {}", base_url);
            Arc::new(HttpFetcher::new(base_url))
        }
    }
}

pub fn build_repository(config: &Config) -> io::Result<PostRepository> {
    let store = load_content_store(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    Ok(PostRepository::new(store, build_fetcher(config), config.content_layout()))
}

pub async fn render_list_page(config: &Config, repository: &PostRepository, search: &str, tag: Option<&str>) -> BlogResult<String> {
    let posts = repository.list_all().await?;

    let mut view = ListView::new(posts);
    view.on_search_change(search);
    if let Some(tag) = tag {
        view.on_tag_select(tag);
    }

    let template_src = read_template(&config.paths.template_dir, "postlist.tpl")?;
    let renderer = ListRenderer::new(&template_src)?;
    Ok(renderer.render(&view))
}

pub fn render_post_page(config: &Config, view: &DetailView<'_>, back: &Route) -> BlogResult<Option<String>> {
    let template_src = read_template(&config.paths.template_dir, "view.tpl")?;
    let renderer = PostRenderer::new(&template_src, &config.image_prefix())?;
    renderer.render(view, back)
}

pub fn render_not_found(config: &Config) -> BlogResult<String> {
    let template_src = read_template(&config.paths.template_dir, "notfound.tpl")?;
    let template = Template::new(template_src)
        .map_err(|e| BlogError::Template(format!("Error parsing not found template: {}", e)))?;

    Ok(template.render(&NotFoundPage {
        list_link: list_link("", None),
    }))
}
