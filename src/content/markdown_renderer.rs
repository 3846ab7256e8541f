use markdown::{CompileOptions, Options};

use crate::content::{ContentItem, RenderedPost};
use crate::error::{BlogError, BlogResult};

/// Markdown to HTML with the GitHub flavoured extensions.
#[derive(Clone, Default)]
pub struct MarkdownRenderer {
    allow_raw_html: bool,
}

impl MarkdownRenderer {
    pub fn new(allow_raw_html: bool) -> Self {
        MarkdownRenderer { allow_raw_html }
    }

    pub fn render_item(&self, item: ContentItem) -> BlogResult<RenderedPost> {
        let html = self.render(&item.body)?;
        Ok(RenderedPost {
            slug: item.slug,
            metadata: item.metadata,
            html,
        })
    }

    pub fn render(&self, md_text: &str) -> BlogResult<String> {
        let buf = remove_comments(md_text)?;
        let options = Options {
            compile: CompileOptions {
                allow_dangerous_html: self.allow_raw_html,
                ..CompileOptions::gfm()
            },
            ..Options::gfm()
        };
        markdown::to_html_with_options(buf.as_str(), &options)
            .map_err(|e| BlogError::Markdown(e.to_string()))
    }
}

pub fn remove_comments(md_post: &str) -> BlogResult<String> {
    let mut res: String = String::new();
    let mut slice = Some(md_post);

    let start_comment = "<!--";
    let end_comment = "-->";

    while let Some(block) = slice {
        let md_buf: &str = match block.find(start_comment) {
            Some(start) => {
                let to_render: &str = &block[0..start];

                let next: &str = &block[(start + start_comment.len())..];
                match next.find(end_comment) {
                    Some(end) => {
                        slice = Some(&next[(end + end_comment.len())..]);
                    }
                    None => return Err(BlogError::Markdown("Error finding end of comment".to_string())),
                };

                to_render
            }
            None => {
                slice = None;
                block
            }
        };
        res.push_str(md_buf);
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::front_matter::extract_front_matter;
    use crate::content::Metadata;
    use crate::test_data::POST_DATA_YAML;

    #[test]
    fn test_remove_comments() {
        assert_eq!(remove_comments("Some text.<!-- more -->Wo<!-- xyz -->rd").unwrap(), "Some text.Word");
        assert_eq!(remove_comments("Some text.Word").unwrap(), "Some text.Word");
        assert_eq!(remove_comments("").unwrap(), "");
        assert_eq!(remove_comments("<!-- more --><!-- xyz -->").unwrap(), "");
        assert!(remove_comments("text <!-- never closed").is_err());
    }

    #[test]
    fn test_full_content() {
        let (_meta, body) = extract_front_matter("learned.md", POST_DATA_YAML).unwrap();
        let rendered = MarkdownRenderer::default().render(&body).unwrap();
        assert_eq!(rendered, r##"<p>How to be a great software engineer?</p>
<p>Someone asked me this question today and I didn't have an answer.</p>
<h2>Non technical</h2>
<h3>Have a honest image of yourself</h3>
<p>You finished university and learned a lot. <strong>The earlier you find that, the better.</strong></p>
"##);
    }

    #[test]
    fn test_common_features() {
        let md = "# Title\n\n*em* and `code`\n\n- one\n- two\n\n> quoted\n\n[link](https://example.com)\n\n```\nfn main() {}\n```\n";
        let html = MarkdownRenderer::default().render(md).unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<code>code</code>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<blockquote>"));
        assert!(html.contains(r#"<a href="https://example.com">link</a>"#));
        assert!(html.contains("<pre><code>fn main() {}\n</code></pre>"));
    }

    #[test]
    fn test_raw_html() {
        let md = "<div class=\"note\">hi</div>\n";
        let escaped = MarkdownRenderer::new(false).render(md).unwrap();
        assert!(!escaped.contains("<div"));
        let raw = MarkdownRenderer::new(true).render(md).unwrap();
        assert!(raw.contains("<div class=\"note\">hi</div>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::default();
        let item = ContentItem {
            slug: "x".to_string(),
            metadata: Metadata::default(),
            body: "Hello **world**\n".to_string(),
        };
        let first = renderer.render_item(item.clone()).unwrap();
        let second = renderer.render_item(item).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.html, "<p>Hello <strong>world</strong></p>\n");
    }
}
