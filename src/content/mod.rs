use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Formatter;

pub mod content_file;
pub mod front_matter;
pub mod markdown_renderer;
pub mod slug;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_DATE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<MetaValue>),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Text(s) => write!(f, "{}", s),
            MetaValue::Integer(i) => write!(f, "{}", i),
            MetaValue::Float(x) => write!(f, "{}", x),
            MetaValue::Bool(b) => write!(f, "{}", b),
            MetaValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

/// Front matter keys and values. Keys absent from the file are absent here,
/// defaults are applied by whoever reads the metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata(pub BTreeMap<String, MetaValue>);

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    pub fn get_text(&self, key: &str) -> Option<String> {
        self.0.get(key).map(|v| v.to_string())
    }

    pub fn title(&self) -> String {
        self.get_text("title").unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    pub fn date(&self) -> String {
        self.get_text("date").unwrap_or_else(|| DEFAULT_DATE.to_string())
    }

    /// Tags may be a list or a space/comma separated string.
    pub fn tags(&self) -> Vec<String> {
        match self.0.get("tags") {
            Some(MetaValue::List(items)) => items.iter().map(|v| v.to_string()).collect(),
            Some(other) => other.to_string()
                .split(|c: char| c == ' ' || c == ',')
                .filter(|x| !x.is_empty())
                .map(|s| s.to_string())
                .collect(),
            None => vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.0.iter()
    }
}

/// One content file on disk, identified by its slug.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub slug: String,
    pub metadata: Metadata,
    pub body: String,
}

/// A content item after its body went through the markdown renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPost {
    pub slug: String,
    pub metadata: Metadata,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub title: String,
    pub date: String,
    pub slug: String,
}

impl PostSummary {
    pub fn from_metadata(slug: &str, metadata: &Metadata) -> Self {
        PostSummary {
            title: metadata.title(),
            date: metadata.date(),
            slug: slug.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(pairs: &[(&str, MetaValue)]) -> Metadata {
        Metadata(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    #[test]
    fn test_defaults() {
        let m = Metadata::default();
        assert_eq!(m.title(), "Untitled");
        assert_eq!(m.date(), "Unknown");
        assert!(m.tags().is_empty());
    }

    #[test]
    fn test_summary() {
        let m = meta(&[
            ("title", MetaValue::Text("Hello".to_string())),
            ("date", MetaValue::Text("2024-01-01".to_string())),
        ]);
        let summary = PostSummary::from_metadata("hello", &m);
        assert_eq!(summary, PostSummary {
            title: "Hello".to_string(),
            date: "2024-01-01".to_string(),
            slug: "hello".to_string(),
        });
    }

    #[test]
    fn test_tags() {
        let m = meta(&[("tags", MetaValue::Text("rust, web  blog".to_string()))]);
        assert_eq!(m.tags(), ["rust", "web", "blog"]);

        let m = meta(&[("tags", MetaValue::List(vec![
            MetaValue::Text("rust".to_string()),
            MetaValue::Integer(2024),
        ]))]);
        assert_eq!(m.tags(), ["rust", "2024"]);
    }

    #[test]
    fn test_non_text_title() {
        let m = meta(&[("title", MetaValue::Integer(1984))]);
        assert_eq!(m.title(), "1984");
    }
}
