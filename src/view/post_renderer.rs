use ramhorns::Template;

use crate::content::RenderedPost;
use crate::error::BlogResult;
use crate::view::templates::{TemplateStore, POST_TEMPLATE};

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

#[derive(ramhorns::Content)]
struct ViewMeta<'a> {
    key: &'a str,
    value: String,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    slug: &'a str,
    title: &'a str,
    date: &'a str,
    author: &'a str,
    description: &'a str,
    tags: Vec<ViewTag<'a>>,
    meta: Vec<ViewMeta<'a>>,
    content: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'static> {
    pub fn from_store(store: &TemplateStore) -> BlogResult<Self> {
        Ok(PostRenderer {
            template: store.template(POST_TEMPLATE)?,
        })
    }
}

impl PostRenderer<'_> {
    pub fn render(&self, post: &RenderedPost) -> String {
        let title = post.metadata.title();
        let date = post.metadata.date();
        let author = post.metadata.get_text("author").unwrap_or_default();
        let description = post.metadata.get_text("description").unwrap_or_default();
        let tag_list = post.metadata.tags();
        let tags = tag_list.iter().map(|t| ViewTag { tag: t.as_str() }).collect();
        let meta = post.metadata.iter()
            .map(|(k, v)| ViewMeta { key: k.as_str(), value: v.to_string() })
            .collect();

        self.template.render(&ViewItem {
            slug: post.slug.as_str(),
            title: title.as_str(),
            date: date.as_str(),
            author: author.as_str(),
            description: description.as_str(),
            tags,
            meta,
            content: post.html.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::content::{MetaValue, Metadata};
    use crate::test_data::{LIST_TPL_SRC, POST_TPL_SRC};

    fn renderer(src: &str) -> PostRenderer<'static> {
        PostRenderer::from_store(&TemplateStore::Inline {
            post: src.to_string(),
            list: LIST_TPL_SRC.to_string(),
        }).unwrap()
    }

    #[test]
    fn render_view() {
        let template_src = r##"
TITLE=[{{title}}]
AUTHOR=[{{author}}]
DATE=[{{date}}]
TAGS=[{{#tags}}({{tag}}){{/tags}}]
META=[{{#meta}}{{key}}:{{value}};{{/meta}}]
POST_CONTENT=[{{{content}}}]"##;
        let mut items = BTreeMap::new();
        items.insert("title".to_string(), MetaValue::Text("<post-title>".to_string()));
        items.insert("date".to_string(), MetaValue::Text("2024-01-02".to_string()));
        items.insert("author".to_string(), MetaValue::Text("<Thiago>".to_string()));
        items.insert("tags".to_string(), MetaValue::List(vec![
            MetaValue::Text("<rust>".to_string()),
            MetaValue::Text("programming".to_string()),
        ]));
        let post = RenderedPost {
            slug: "post".to_string(),
            metadata: Metadata(items),
            html: "<p>post-content</p>".to_string(),
        };

        let res = renderer(template_src).render(&post);
        assert_eq!(res, r##"
TITLE=[&lt;post-title&gt;]
AUTHOR=[&lt;Thiago&gt;]
DATE=[2024-01-02]
TAGS=[(&lt;rust&gt;)(programming)]
META=[author:&lt;Thiago&gt;;date:2024-01-02;tags:&lt;rust&gt;, programming;title:&lt;post-title&gt;;]
POST_CONTENT=[<p>post-content</p>]"##);
    }

    #[test]
    fn render_defaults() {
        let post = RenderedPost {
            slug: "bare".to_string(),
            metadata: Metadata::default(),
            html: "<p>x</p>\n".to_string(),
        };
        let res = renderer(POST_TPL_SRC).render(&post);
        assert!(res.contains("<h1>Untitled</h1>"));
        assert!(res.contains("<p class=\"date\">Unknown</p>"));
        assert!(res.contains("<article><p>x</p>\n</article>"));
    }
}
