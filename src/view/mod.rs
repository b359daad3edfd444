use std::path::Path;

use crate::error::Result;
use crate::index_builder::IndexEntry;

pub mod mustache_renderer;

pub use mustache_renderer::MustacheRenderer;

/// Variables of the draft skeleton.
///
/// `postdate` and `year` are handed over as their own mustache tags, so the
/// draft keeps them for the render done at publish time.
#[derive(ramhorns::Content)]
pub struct DraftVars<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub technology: &'a str,
    pub author: &'a str,
    pub postdate: &'a str,
    pub year: &'a str,
}

impl<'a> DraftVars<'a> {
    pub fn new(title: &'a str, subtitle: &'a str, technology: &'a str, author: &'a str) -> DraftVars<'a> {
        DraftVars {
            title,
            subtitle,
            technology,
            author,
            postdate: "{{postdate}}",
            year: "{{year}}",
        }
    }
}

/// Variables of a draft rendered into a published post
#[derive(ramhorns::Content)]
pub struct PostVars {
    pub postdate: String,
    pub year: String,
}

#[derive(ramhorns::Content)]
pub struct PostItem<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub publish_date: &'a str,
    pub formatted_publish_date: &'a str,
    pub link: &'a str,
}

#[derive(ramhorns::Content)]
pub struct IndexPage<'a> {
    pub posts: Vec<PostItem<'a>>,
    pub post_count: u32,
}

impl<'a> IndexPage<'a> {
    pub fn from_entries(entries: &'a [IndexEntry]) -> IndexPage<'a> {
        let posts: Vec<PostItem> = entries.iter().map(|entry| PostItem {
            title: entry.title.as_str(),
            subtitle: entry.subtitle.as_str(),
            publish_date: entry.timestamp.text(),
            formatted_publish_date: entry.formatted_date.as_str(),
            link: entry.link.as_str(),
        }).collect();

        IndexPage {
            post_count: posts.len() as u32,
            posts,
        }
    }
}

/// The three templates the tool renders: the draft skeleton, a draft turned
/// into a published post and the index page.
pub trait PageRenderer {
    fn render_draft(&self, vars: &DraftVars) -> Result<String>;
    fn render_post(&self, draft: &Path, vars: &PostVars) -> Result<String>;
    fn render_index(&self, page: &IndexPage) -> Result<String>;
}
