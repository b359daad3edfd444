use std::fmt::{Display, Formatter};
use std::path::Path;

use thiserror::Error;

use crate::codec::timestamp::{PostTimestamp, TimestampError};

pub const SEPARATOR: &str = "___";

#[derive(Error, Debug, PartialEq)]
pub enum PostNameError {
    #[error("'{0}' has no '___' timestamp separator")]
    MissingSeparator(String),
    #[error("'{0}' has an empty base name")]
    EmptyBaseName(String),
    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}

/// Name of a published post file
/// `post_hello_world___049055048048048048048048048048046048.html`
/// base_name: post_hello_world
/// timestamp: 1700000000.0
/// extension: html
#[derive(Debug, Clone, PartialEq)]
pub struct PostName {
    pub base_name: String,
    pub timestamp: PostTimestamp,
    pub extension: String,
}

impl PostName {
    pub fn new(base_name: &str, timestamp: PostTimestamp, extension: &str) -> PostName {
        PostName {
            base_name: base_name.to_string(),
            timestamp,
            extension: extension.to_string(),
        }
    }

    /// Name the draft will get once published at `timestamp`
    pub fn for_draft(draft: &Path, timestamp: PostTimestamp) -> Option<PostName> {
        let base_name = draft.file_stem()?.to_str()?;
        let extension = match draft.extension() {
            Some(ext) => ext.to_str()?,
            None => "",
        };
        Some(Self::new(base_name, timestamp, extension))
    }

    pub fn parse(file_name: &str) -> Result<PostName, PostNameError> {
        let Some((base_name, rest)) = file_name.rsplit_once(SEPARATOR) else {
            return Err(PostNameError::MissingSeparator(file_name.to_string()));
        };
        if base_name.is_empty() {
            return Err(PostNameError::EmptyBaseName(file_name.to_string()));
        }

        let (encoded, extension) = match rest.rsplit_once('.') {
            Some((encoded, extension)) => (encoded, extension),
            None => (rest, ""),
        };
        let timestamp = PostTimestamp::from_encoded(encoded)?;

        Ok(Self::new(base_name, timestamp, extension))
    }

    pub fn file_name(&self) -> String {
        self.to_string()
    }
}

impl Display for PostName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.base_name, SEPARATOR, self.timestamp.encoded())?;
        if !self.extension.is_empty() {
            write!(f, ".{}", self.extension)?;
        }
        Ok(())
    }
}
