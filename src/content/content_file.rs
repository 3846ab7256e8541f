use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::content::front_matter::extract_front_matter;
use crate::content::{ContentItem, Metadata};
use crate::error::BlogResult;

pub struct ContentFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    /// Reads a content file. A missing file is `Ok(None)`, every other I/O
    /// error is returned to the caller.
    pub fn from_file(slug: String, file_path: PathBuf) -> io::Result<Option<ContentFile>> {
        let raw_content = match fs::read_to_string(&file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(Some(ContentFile {
            slug,
            file_path,
            raw_content,
        }))
    }

    pub fn metadata(&self) -> BlogResult<Metadata> {
        let (metadata, _body) = extract_front_matter(&self.display_name(), &self.raw_content)?;
        Ok(metadata)
    }

    pub fn into_item(self) -> BlogResult<ContentItem> {
        let (metadata, body) = extract_front_matter(&self.display_name(), &self.raw_content)?;
        Ok(ContentItem {
            slug: self.slug,
            metadata,
            body,
        })
    }

    fn display_name(&self) -> String {
        file_name_of(&self.file_path)
    }
}

/// File name only, so error messages never carry the content directory.
fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
