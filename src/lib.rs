pub mod ad_headers;
pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod page_cache;
pub mod post_list;
pub mod post_processor;
pub mod server;
mod test_data;
mod text_utils;
pub mod view;
