use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ntex::web;
use ntex_files::NamedFile;
use spdlog::{error, info, warn};

use crate::ad_headers::AdScriptNoCache;
use crate::config::Config;
use crate::content::slug::is_valid_slug;
use crate::error::BlogError;
use crate::page_cache::{spawn_janitor, FileCache, NullCache, PageCache};
use crate::post_processor::Blog;

pub struct AppState {
    pub blog: Blog,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(config: &Config, cache: Arc<dyn PageCache>) -> Self {
        AppState {
            blog: Blog::from_config(config, cache),
            public_dir: config.paths.public_dir.clone(),
        }
    }
}

fn html_response(page: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page)
}

fn not_found() -> web::HttpResponse {
    web::HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body("Not found")
}

/// Details stay in the log, clients only get the status.
fn error_response(what: &str, err: &BlogError) -> web::HttpResponse {
    if err.is_not_found() {
        info!("{} not found: {}", what, err);
        return not_found();
    }

    error!("Error rendering {}: {}", what, err);
    web::HttpResponse::InternalServerError()
        .content_type("text/html; charset=utf-8")
        .body("Internal server error")
}

#[web::get("/blog.html")]
async fn blog_home(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match state.blog.listing_page() {
        Ok(page) => html_response(page),
        Err(e) => error_response("post list", &e),
    }
}

#[web::get("/blog/{file_name}")]
async fn blog_post(file_name: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let file_name = file_name.into_inner();
    let Some(slug) = file_name.strip_suffix(".html") else {
        return not_found();
    };

    match state.blog.post_page(slug) {
        Ok(page) => html_response(page),
        Err(e) => error_response(&format!("post {}", slug), &e),
    }
}

#[web::get("/sitemap.xml")]
async fn sitemap(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    match state.blog.sitemap() {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/xml")
            .body(xml),
        Err(e) => error_response("sitemap", &e),
    }
}

#[web::get("/robots.txt")]
async fn robots(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(state.blog.robots())
}

#[web::get("/static/{file_name}")]
async fn static_files(path: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> Result<NamedFile, web::Error> {
    let file_name = path.into_inner();
    if !is_valid_slug(&file_name) {
        warn!("Rejected static file request for {}", file_name);
        return Err(web::error::ErrorForbidden("Access forbidden").into());
    }

    let file_path = state.public_dir.join(file_name);
    Ok(NamedFile::open(file_path)?)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(blog_home)
        .service(blog_post)
        .service(sitemap)
        .service(robots)
        .service(static_files);
}

/// The durable cache unless caching is turned off.
pub fn open_cache(config: &Config) -> io::Result<Arc<dyn PageCache>> {
    if !config.cache.enabled {
        info!("Page cache disabled");
        return Ok(Arc::new(NullCache));
    }

    let cache = FileCache::new(&config.paths.cache_dir)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Error opening cache dir {}: {}", config.paths.cache_dir.display(), e)))?;
    info!("Page cache in {}, entries live {} seconds", config.paths.cache_dir.display(), config.cache.timeout_secs);
    Ok(Arc::new(cache))
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let cache = open_cache(&config)?;

    let _janitor = config.cache.purge_interval_secs
        .filter(|_| config.cache.enabled)
        .map(|secs| spawn_janitor(cache.clone(), Duration::from_secs(secs.max(1))));

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState::new(&config, cache));

    info!("Serving content from {}", config.paths.content_dir.display());

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .wrap(AdScriptNoCache)
            .configure(routes)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
