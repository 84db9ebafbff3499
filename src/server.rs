use std::io;
use std::sync::Arc;

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info};

use crate::config::Config;
use crate::error::BlogError;
use crate::page_processor::*;
use crate::post_repository::PostRepository;
use crate::query_string::QueryString;
use crate::router::{Navigator, Route, LIST_PATH};
use crate::view::detail_view::{DetailOutcome, DetailView};

struct AppState {
    repository: PostRepository,
    config: Config,
}

fn html(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn redirect(location: &str) -> web::HttpResponse {
    web::HttpResponse::Found()
        .header("Location", location)
        .content_type("text/html; charset=utf-8")
        .finish()
}

fn error_response(context: &str, err: BlogError) -> web::HttpResponse {
    error!("{}: {}", context, err);
    match err {
        BlogError::Fetch { .. } => web::HttpResponse::BadGateway()
            .body(format!("{}: {}", context, err)),
        _ => web::HttpResponse::InternalServerError()
            .body(format!("{}: {}", context, err)),
    }
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

// Begin: Redirect region --------
#[web::get("/")]
async fn index() -> web::HttpResponse {
    redirect(LIST_PATH)
}

#[web::get("/blog/")]
async fn list_with_slash() -> web::HttpResponse {
    redirect(LIST_PATH)
}

#[web::get("/blog/{slug}/")]
async fn view_with_slash(slug: web::types::Path<String>) -> web::HttpResponse {
    redirect(&Route::Detail(slug.into_inner()).path())
}

async fn fallback(req: HttpRequest) -> web::HttpResponse {
    let route = Route::resolve(req.path());
    info!("No handler for {}, redirecting to {}", req.path(), route);
    redirect(&route.path())
}
// End: Redirect region --------

#[web::get("/blog")]
async fn list(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let qs = QueryString::from(req.uri().query().unwrap_or_default());

    match render_list_page(&state.config, &state.repository, qs.get_search(), qs.get_tag()).await {
        Ok(page) => html(page),
        Err(e) => error_response("Error listing posts", e),
    }
}

#[web::get("/blog/{slug}")]
async fn view(req: HttpRequest, slug: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let slug = slug.into_inner();
    let mut detail = DetailView::new(&state.repository, state.config.recent_count());

    match detail.activate(&slug).await {
        Ok(DetailOutcome::Show) => {}
        Ok(DetailOutcome::Redirect(route)) => {
            info!("Post {} not found", slug);
            return redirect(&route.path());
        }
        Err(e) => return error_response(&format!("Error loading post {}", slug), e),
    }

    let mut navigator = Navigator::from_referer(header(&req, "referer"), header(&req, "host"));
    navigator.navigate(Route::Detail(slug.clone()));
    let back = detail.go_back(&mut navigator);

    match render_post_page(&state.config, &detail, &back) {
        Ok(Some(page)) => html(page),
        Ok(None) => redirect(&Route::NotFound.path()),
        Err(e) => error_response(&format!("Error rendering post {}", slug), e),
    }
}

#[web::get("/404")]
async fn not_found(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match render_not_found(&state.config) {
        Ok(page) => web::HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(page),
        Err(e) => error_response("Error rendering not found page", e),
    }
}

#[web::get("/assets/blog-posts/{file}")]
async fn content_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    get_file(&state.config.paths.content_dir, &path.into_inner())
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    get_file(&state.config.paths.public_dir, &path.into_inner())
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let repository = build_repository(&config)?;
    for post in repository.store().posts() {
        info!("Post: {} ({})", post.slug, post.published_date);
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        repository,
        config,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(list)
            .service(list_with_slash)
            .service(view)
            .service(view_with_slash)
            .service(not_found)
            .service(content_files)
            .service(public_files)
            .default_service(web::route().to(fallback))
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
