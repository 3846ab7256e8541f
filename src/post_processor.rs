use std::path::PathBuf;
use std::sync::Arc;

use spdlog::{debug, info, warn};

use crate::config::Config;
use crate::content::content_file::ContentFile;
use crate::content::markdown_renderer::MarkdownRenderer;
use crate::content::slug::content_path;
use crate::error::{BlogError, BlogResult};
use crate::page_cache::{post_key, Expire, PageCache, LISTING_KEY};
use crate::post_list::PostList;
use crate::view::list_renderer::ListRenderer;
use crate::view::post_renderer::PostRenderer;
use crate::view::robots::render_robots;
use crate::view::sitemap_renderer::Sitemap;
use crate::view::templates::TemplateStore;

/// Everything a request needs to turn content files into pages.
pub struct Blog {
    pub content_dir: PathBuf,
    pub extension: String,
    pub base_url: String,
    pub templates: TemplateStore,
    pub markdown: MarkdownRenderer,
    pub cache: Arc<dyn PageCache>,
    pub expire: Expire,
}

impl Blog {
    pub fn from_config(config: &Config, cache: Arc<dyn PageCache>) -> Self {
        Blog {
            content_dir: config.paths.content_dir.clone(),
            extension: config.site.content_extension.clone(),
            base_url: config.site.base_url.clone(),
            templates: TemplateStore::from_dir(&config.paths.template_dir),
            markdown: MarkdownRenderer::new(config.render.allow_raw_html),
            cache,
            expire: Expire::after_secs(config.cache.timeout_secs),
        }
    }

    /// Single post page. Cache first, then file, markdown, template and store.
    pub fn post_page(&self, slug: &str) -> BlogResult<String> {
        let path = content_path(&self.content_dir, slug, &self.extension)?;
        let key = post_key(slug);

        if let Some(page) = self.cache_lookup(&key) {
            return Ok(page);
        }

        let Some(content_file) = ContentFile::from_file(slug.to_string(), path)? else {
            return Err(BlogError::NotFound(slug.to_string()));
        };

        info!("Rendering post {} from file", slug);
        let post = self.markdown.render_item(content_file.into_item()?)?;
        let page = PostRenderer::from_store(&self.templates)?.render(&post);

        self.cache_store(&key, &page);
        Ok(page)
    }

    /// Listing page, cached as a whole under a single key.
    pub fn listing_page(&self) -> BlogResult<String> {
        if let Some(page) = self.cache_lookup(LISTING_KEY) {
            return Ok(page);
        }

        let summaries = PostList::new(&self.content_dir, &self.extension).summaries()?;
        info!("Rendering post list with {} posts", summaries.len());
        let page = ListRenderer::from_store(&self.templates)?.render(&summaries);

        self.cache_store(LISTING_KEY, &page);
        Ok(page)
    }

    pub fn sitemap(&self) -> BlogResult<Vec<u8>> {
        let slugs = PostList::new(&self.content_dir, &self.extension).slugs()?;
        Sitemap { base_url: &self.base_url }
            .render(&slugs)
            .map_err(|e| BlogError::Template(format!("Error writing sitemap: {}", e)))
    }

    pub fn robots(&self) -> String {
        render_robots(&self.base_url)
    }

    /// Lookup failures count as misses.
    fn cache_lookup(&self, key: &str) -> Option<String> {
        match self.cache.get(key) {
            Ok(Some(page)) => {
                debug!("Cache hit for {}", key);
                Some(page)
            }
            Ok(None) => {
                debug!("Cache miss for {}", key);
                None
            }
            Err(e) => {
                warn!("Cache lookup for {} failed, rendering instead: {}", key, e);
                None
            }
        }
    }

    fn cache_store(&self, key: &str, page: &str) {
        if let Err(e) = self.cache.set(key, page, self.expire) {
            warn!("Could not cache {}: {}", key, e);
        }
    }
}
