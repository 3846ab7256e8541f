use std::fs;
use std::path::{Path, PathBuf};

use ramhorns::Template;

use crate::error::{BlogError, BlogResult};

pub const POST_TEMPLATE: &str = "blog.tpl";
pub const LIST_TEMPLATE: &str = "blog_home.tpl";

/// Where page templates come from.
#[derive(Clone)]
pub enum TemplateStore {
    /// `.tpl` files read from a directory on every render
    Dir(PathBuf),
    /// Fixed sources, used by tests
    Inline { post: String, list: String },
}

impl TemplateStore {
    pub fn from_dir(dir: &Path) -> Self {
        TemplateStore::Dir(dir.to_path_buf())
    }

    pub fn source(&self, name: &str) -> BlogResult<String> {
        match self {
            TemplateStore::Dir(dir) => fs::read_to_string(dir.join(name))
                .map_err(|e| BlogError::Template(format!("Error loading template {}: {}", name, e))),
            TemplateStore::Inline { post, list } => match name {
                POST_TEMPLATE => Ok(post.clone()),
                LIST_TEMPLATE => Ok(list.clone()),
                _ => Err(BlogError::Template(format!("Unknown template {}", name))),
            },
        }
    }

    pub fn template(&self, name: &str) -> BlogResult<Template<'static>> {
        let src = self.source(name)?;
        Template::new(src)
            .map_err(|e| BlogError::Template(format!("Error parsing template {}: {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_dir_store() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(POST_TEMPLATE), "<h1>{{title}}</h1>").unwrap();

        let store = TemplateStore::from_dir(tmp.path());
        assert_eq!(store.source(POST_TEMPLATE).unwrap(), "<h1>{{title}}</h1>");
        assert!(matches!(store.source(LIST_TEMPLATE), Err(BlogError::Template(_))));
    }

    #[test]
    fn test_invalid_template() {
        let store = TemplateStore::Inline {
            post: "{{#title}}never closed".to_string(),
            list: "".to_string(),
        };
        assert!(matches!(store.template(POST_TEMPLATE), Err(BlogError::Template(_))));
        assert!(store.template(LIST_TEMPLATE).is_ok());
    }
}
