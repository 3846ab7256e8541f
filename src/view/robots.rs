use crate::view::sitemap_renderer::base_url;

pub fn render_robots(site_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /blog/\nDisallow: /api/\nSitemap: {}/sitemap.xml",
        base_url(site_url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots() {
        assert_eq!(render_robots("https://emojibioai.com/"), "User-agent: *
Allow: /blog/
Disallow: /api/
Sitemap: https://emojibioai.com/sitemap.xml");
    }
}
