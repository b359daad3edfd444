use thiserror::Error;

pub mod marker_extractor;

pub use marker_extractor::MarkerExtractor;

#[derive(Debug, Clone, PartialEq)]
pub struct PostMetadata {
    pub title: String,
    pub subtitle: String,
}

#[derive(Error, Debug, PartialEq)]
pub enum MetadataError {
    #[error("no title found, the post needs one <h1> heading")]
    MissingTitle,
    #[error("the <h1> tag must be used once in a blog article, found {0}")]
    DuplicateTitleMarker(usize),
    #[error("no subheading found")]
    MissingSubtitle,
    #[error("multiple subheadings found, {0} in total")]
    DuplicateSubtitleMarker(usize),
}

/// Pulls title and subtitle out of a rendered post.
pub trait MetadataExtractor {
    fn extract(&self, html: &str) -> Result<PostMetadata, MetadataError>;
}
