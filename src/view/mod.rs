pub mod list_renderer;
pub mod post_renderer;
pub mod robots;
pub mod sitemap_renderer;
pub mod templates;
