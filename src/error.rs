use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::post_name::PostNameError;
use crate::content::MetadataError;

pub type Result<T> = std::result::Result<T, PublishError>;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Blog post '{0}' doesn't exist")]
    DraftNotFound(PathBuf),
    #[error("Blog post '{draft}' is not in the work-in-progress folder {expected}")]
    WrongFolder { draft: PathBuf, expected: PathBuf },
    #[error("A blog with the title '{base_name}' already exists: {existing}")]
    DuplicateTitle { base_name: String, existing: String },
    #[error("Blog post '{draft}' can't be published: {reason}")]
    InvalidDraft { draft: PathBuf, reason: MetadataError },
    #[error("A blog post draft already exists at {0}")]
    DraftExists(PathBuf),
    #[error("Published post {file_name} is corrupt: {reason}")]
    CorruptPost { file_name: String, reason: CorruptReason },
    #[error("Template error in {template}: {message}")]
    Template { template: String, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Why a published post could not be turned into an index entry.
#[derive(Error, Debug, PartialEq)]
pub enum CorruptReason {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error(transparent)]
    Name(#[from] PostNameError),
    #[error("file name is not valid UTF-8")]
    NonUtf8Name,
    #[error("content is not valid UTF-8")]
    NonUtf8Content,
}
