use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/blog/creating_a_daemon</loc></url>
  <url><loc>https://example.com/blog/what_i_learned</loc></url>
</urlset>
*/

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub struct Sitemap<'a> {
    pub base_url: &'a str,
}

impl<'a> Sitemap<'a> {
    /// One `<url>` per slug. Text is XML escaped by the writer.
    pub fn render(&self, slugs: &[String]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        for slug in slugs {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            let loc = post_url(self.base_url, slug);
            push_text(&mut writer, "loc", loc.as_str())?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        Ok(writer.into_inner().into_inner())
    }
}

pub fn base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

fn post_url(base: &str, slug: &str) -> String {
    format!("{}/blog/{}", base_url(base), slug)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use super::*;

    #[test]
    fn render_xml() {
        let sitemap = Sitemap { base_url: "https://emojibioai.com/" };
        let xml = sitemap.render(&["first".to_string(), "second".to_string()]).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn render_escapes_slugs() {
        let sitemap = Sitemap { base_url: "https://example.com" };
        let xml = sitemap.render(&["fish&chips".to_string()]).unwrap();
        let xml = str::from_utf8(&xml).unwrap();
        assert!(xml.contains("<loc>https://example.com/blog/fish&amp;chips</loc>"));
    }

    #[test]
    fn render_empty() {
        let sitemap = Sitemap { base_url: "https://example.com" };
        let xml = sitemap.render(&[]).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), r##"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"></urlset>"##);
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"><url><loc>https://emojibioai.com/blog/first</loc></url><url><loc>https://emojibioai.com/blog/second</loc></url></urlset>"##;
}
