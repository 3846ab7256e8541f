use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("content not found: {0}")]
    NotFound(String),
    #[error("invalid slug: {0}")]
    InvalidSlug(String),
    #[error("malformed content file {file}: {reason}")]
    Malformed { file: String, reason: String },
    #[error("template error: {0}")]
    Template(String),
    #[error("markdown error: {0}")]
    Markdown(String),
    #[error("cache error: {0}")]
    Cache(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl BlogError {
    pub fn malformed(file: impl Into<String>, reason: impl Into<String>) -> Self {
        BlogError::Malformed {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// True for errors a client caused by asking for something that isn't there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlogError::NotFound(_) | BlogError::InvalidSlug(_))
    }
}

pub type BlogResult<T> = Result<T, BlogError>;
