use std::path::{Path, PathBuf};
use std::{fs, io};

use spdlog::warn;

use crate::content::content_file::ContentFile;
use crate::content::slug::slug_from_file_name;
use crate::content::PostSummary;
use crate::text_utils::cmp_date_desc;

pub struct PostList {
    pub root_dir: PathBuf,
    pub extension: String,
}

impl PostList {
    pub fn new(root_dir: &Path, extension: &str) -> Self {
        PostList {
            root_dir: root_dir.to_path_buf(),
            extension: extension.to_string(),
        }
    }

    /// Content files and their slugs, in slug order.
    pub fn retrieve_files(&self) -> io::Result<Vec<(String, PathBuf)>> {
        let mut posts = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries.flatten() {
            // Follows symlinks, so linked posts are listed like the ones they point to
            let Ok(metadata) = fs::metadata(entry.path()) else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            if let Some(slug) = file_name.to_str().and_then(|f| slug_from_file_name(f, &self.extension)) {
                posts.push((slug, entry.path()));
            }
        }
        posts.sort();
        Ok(posts)
    }

    /// Metadata only summaries, newest first. Files that vanish between the
    /// directory scan and the read, can't be read, or whose front matter is
    /// malformed are skipped.
    pub fn summaries(&self) -> io::Result<Vec<PostSummary>> {
        let mut summaries = vec![];
        for (slug, path) in self.retrieve_files()? {
            let content_file = match ContentFile::from_file(slug.clone(), path) {
                Ok(Some(content_file)) => content_file,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping unreadable {} in the post list: {}", slug, e);
                    continue;
                }
            };
            match content_file.metadata() {
                Ok(metadata) => summaries.push(PostSummary::from_metadata(&slug, &metadata)),
                Err(e) => warn!("Skipping {} in the post list: {}", slug, e),
            }
        }

        // Stable sort, so posts sharing a date keep slug order
        summaries.sort_by(|a, b| cmp_date_desc(&a.date, &b.date));
        Ok(summaries)
    }

    /// Every slug with a content file, used by the sitemap.
    pub fn slugs(&self) -> io::Result<Vec<String>> {
        Ok(self.retrieve_files()?.into_iter().map(|(slug, _)| slug).collect())
    }
}
