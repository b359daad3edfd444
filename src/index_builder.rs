use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use spdlog::{debug, info};
use tempfile::NamedTempFile;

use crate::codec::{PostName, PostTimestamp};
use crate::config::Paths;
use crate::content::MetadataExtractor;
use crate::error::{CorruptReason, PublishError, Result};
use crate::text_utils::format_post_date;
use crate::view::{IndexPage, PageRenderer};

/// One published post as listed on the index page
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub title: String,
    pub subtitle: String,
    pub timestamp: PostTimestamp,
    pub formatted_date: String,
    pub link: String,
}

/// Rebuilds the index page from every file in the published folder.
/// There is no incremental path, each rebuild reads the whole folder.
pub struct IndexBuilder<'a, R: PageRenderer, E: MetadataExtractor> {
    pub paths: &'a Paths,
    pub renderer: &'a R,
    pub extractor: &'a E,
    pub date_format: &'a str,
}

impl<R: PageRenderer, E: MetadataExtractor> IndexBuilder<'_, R, E> {
    pub fn rebuild(&self) -> Result<Vec<IndexEntry>> {
        info!("Rebuilding index from {}", self.paths.published_dir.display());

        let mut entries = self.scan()?;
        sort_entries(&mut entries);

        // Rendered before the old index is touched
        let rendered = self.renderer.render_index(&IndexPage::from_entries(&entries))?;
        replace_file(&self.paths.index_file, &rendered)?;

        info!("The index is available at {} with {} posts", self.paths.index_file.display(), entries.len());
        Ok(entries)
    }

    /// Index entries in scan order, the byte order of the file names
    pub fn scan(&self) -> Result<Vec<IndexEntry>> {
        let link_prefix = link_prefix(self.paths);
        let mut entries = vec![];
        for (file_name, path) in list_files(&self.paths.published_dir)? {
            let entry = self.read_entry(&file_name, &path, &link_prefix)?;
            debug!("{} -> {} ({})", entry.link, entry.title, entry.formatted_date);
            entries.push(entry);
        }
        Ok(entries)
    }

    fn read_entry(&self, file_name: &OsString, path: &Path, link_prefix: &str) -> Result<IndexEntry> {
        let corrupt = |reason: CorruptReason| PublishError::CorruptPost {
            file_name: file_name.to_string_lossy().to_string(),
            reason,
        };

        let Some(file_name) = file_name.to_str() else {
            return Err(corrupt(CorruptReason::NonUtf8Name));
        };

        let content = String::from_utf8(fs::read(path)?).map_err(|_| corrupt(CorruptReason::NonUtf8Content))?;
        let meta = self.extractor.extract(&content).map_err(|e| corrupt(e.into()))?;
        let name = PostName::parse(file_name).map_err(|e| corrupt(e.into()))?;
        let local = name.timestamp.to_local().map_err(|e| corrupt(CorruptReason::Name(e.into())))?;

        let link = if link_prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", link_prefix, file_name)
        };

        Ok(IndexEntry {
            title: meta.title,
            subtitle: meta.subtitle,
            formatted_date: format_post_date(&local, self.date_format),
            timestamp: name.timestamp,
            link,
        })
    }
}

/// Most recent first. The sort is stable, equal timestamps keep scan order.
pub fn sort_entries(entries: &mut [IndexEntry]) {
    entries.sort_by(|a, b| b.timestamp.seconds().total_cmp(&a.timestamp.seconds()));
}

fn list_files(dir: &Path) -> Result<Vec<(OsString, PathBuf)>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push((entry.file_name(), path));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Published folder as seen from the index page
fn link_prefix(paths: &Paths) -> String {
    let index_dir = paths.index_file.parent().unwrap_or(Path::new(""));
    let relative = match paths.published_dir.strip_prefix(index_dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => paths.published_dir.file_name().map(PathBuf::from).unwrap_or_default(),
    };

    relative.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn replace_file(target: &Path, content: &str) -> Result<()> {
    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
