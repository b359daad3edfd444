use lazy_static::lazy_static;
use regex::Regex;

use crate::content::{MetadataError, MetadataExtractor, PostMetadata};

/// Finds the title and subtitle markers in the raw HTML text.
///
/// Example of the markers
/// <h1>What I learned after 20+ years of software development</h1>
/// <span class="subheading">And what I would tell myself back then</span>
///
/// The text between the tags has to sit on a single line.
pub struct MarkerExtractor {}

impl MetadataExtractor for MarkerExtractor {
    fn extract(&self, html: &str) -> Result<PostMetadata, MetadataError> {
        lazy_static! {
            static ref TITLE_REGEX : Regex = Regex::new(
                r"<h1>(?P<title>.+?)</h1>"
            ).unwrap();
            static ref SUBTITLE_REGEX : Regex = Regex::new(
                r#"<span class="subheading">(?P<subtitle>.+?)</span>"#
            ).unwrap();
        }

        let title = match find_single(&TITLE_REGEX, "title", html) {
            Ok(title) => title,
            Err(0) => return Err(MetadataError::MissingTitle),
            Err(count) => return Err(MetadataError::DuplicateTitleMarker(count)),
        };

        let subtitle = match find_single(&SUBTITLE_REGEX, "subtitle", html) {
            Ok(subtitle) => subtitle,
            Err(0) => return Err(MetadataError::MissingSubtitle),
            Err(count) => return Err(MetadataError::DuplicateSubtitleMarker(count)),
        };

        Ok(PostMetadata { title, subtitle })
    }
}

/// Returns the only capture of `group`, or how many matches there were.
fn find_single(regex: &Regex, group: &str, html: &str) -> Result<String, usize> {
    let found: Vec<&str> = regex.captures_iter(html)
        .filter_map(|cap| cap.name(group).map(|m| m.as_str()))
        .collect();

    match found.as_slice() {
        [single] => Ok(single.to_string()),
        other => Err(other.len()),
    }
}
