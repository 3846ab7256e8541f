use ramhorns::Template;

use crate::content::PostSummary;
use crate::error::BlogResult;
use crate::view::templates::{TemplateStore, LIST_TEMPLATE};

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    posts: Vec<PostItem<'a>>,
    post_count: usize,
    has_posts: bool,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    title: &'a str,
    date: &'a str,
    slug: &'a str,
    link: String,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'static> {
    pub fn from_store(store: &TemplateStore) -> BlogResult<Self> {
        Ok(ListRenderer {
            template: store.template(LIST_TEMPLATE)?,
        })
    }
}

impl ListRenderer<'_> {
    pub fn render(&self, summaries: &[PostSummary]) -> String {
        let posts = summaries.iter()
            .map(|s| PostItem {
                title: s.title.as_str(),
                date: s.date.as_str(),
                slug: s.slug.as_str(),
                link: post_link(&s.slug),
            })
            .collect();

        self.template.render(&ListPage {
            posts,
            post_count: summaries.len(),
            has_posts: !summaries.is_empty(),
        })
    }
}

pub fn post_link(slug: &str) -> String {
    format!("/blog/{}.html", slug)
}
