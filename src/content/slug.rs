use std::path::{Path, PathBuf};

use crate::error::{BlogError, BlogResult};

/// Slug of a content file: the file name without its extension.
/// Returns `None` when the file doesn't carry `extension`.
pub fn slug_from_file_name(file_name: &str, extension: &str) -> Option<String> {
    let suffix = format!(".{}", extension);
    let slug = file_name.strip_suffix(suffix.as_str())?;
    if is_valid_slug(slug) {
        Some(slug.to_string())
    } else {
        None
    }
}

/// A slug names a single file inside one directory, nothing more.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

/// Maps a slug coming from a request back to its file in `content_dir`.
pub fn content_path(content_dir: &Path, slug: &str, extension: &str) -> BlogResult<PathBuf> {
    if !is_valid_slug(slug) {
        return Err(BlogError::InvalidSlug(slug.to_string()));
    }

    let path = content_dir.join(format!("{}.{}", slug, extension));
    if path.parent() != Some(content_dir) {
        return Err(BlogError::InvalidSlug(slug.to_string()));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_file_name() {
        assert_eq!(slug_from_file_name("hello-world.md", "md"), Some("hello-world".to_string()));
        assert_eq!(slug_from_file_name("2024_06_01.notes.md", "md"), Some("2024_06_01.notes".to_string()));
        assert_eq!(slug_from_file_name("café.md", "md"), Some("café".to_string()));
        assert_eq!(slug_from_file_name("my post.md", "md"), Some("my post".to_string()));
        assert_eq!(slug_from_file_name("c++.md", "md"), Some("c++".to_string()));
        assert_eq!(slug_from_file_name("what's-new.md", "md"), Some("what's-new".to_string()));
        assert_eq!(slug_from_file_name("a,b.md", "md"), Some("a,b".to_string()));
        assert_eq!(slug_from_file_name("readme.txt", "md"), None);
        assert_eq!(slug_from_file_name(".md", "md"), None);
        assert_eq!(slug_from_file_name("...md", "md"), None);
    }

    #[test]
    fn test_traversal_rejected() {
        let dir = Path::new("content");
        assert!(content_path(dir, "../secret", "md").is_err());
        assert!(content_path(dir, "..", "md").is_err());
        assert!(content_path(dir, ".", "md").is_err());
        assert!(content_path(dir, "a/b", "md").is_err());
        assert!(content_path(dir, "a\\b", "md").is_err());
        assert!(content_path(dir, "/etc/passwd", "md").is_err());
        assert!(content_path(dir, "nul\0byte", "md").is_err());
        assert!(content_path(dir, "", "md").is_err());
    }

    #[test]
    fn test_content_path() {
        let dir = Path::new("content");
        assert_eq!(content_path(dir, "hello-world", "md").unwrap(), PathBuf::from("content/hello-world.md"));
        assert_eq!(content_path(dir, "my post", "md").unwrap(), PathBuf::from("content/my post.md"));
        assert_eq!(content_path(dir, "c++", "md").unwrap(), PathBuf::from("content/c++.md"));
    }
}
