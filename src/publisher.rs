use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use spdlog::{debug, info};

use crate::codec::{PostName, PostTimestamp};
use crate::config::{CollisionPolicy, Config};
use crate::content::MetadataExtractor;
use crate::error::{PublishError, Result};
use crate::index_builder::IndexBuilder;
use crate::text_utils::{format_post_date, format_year};
use crate::view::{PageRenderer, PostVars};

#[derive(Debug)]
pub struct PublishReport {
    pub post_path: PathBuf,
    pub index_path: PathBuf,
    pub index_entries: usize,
}

/// Turns a finished draft into a published post and rebuilds the index.
///
/// Single operator only: the duplicate check and the writes are not
/// isolated from a concurrent run.
pub struct Publisher<'a, R: PageRenderer, E: MetadataExtractor> {
    pub config: &'a Config,
    pub renderer: &'a R,
    pub extractor: &'a E,
}

impl<'a, R: PageRenderer, E: MetadataExtractor> Publisher<'a, R, E> {
    pub fn new(config: &'a Config, renderer: &'a R, extractor: &'a E) -> Publisher<'a, R, E> {
        Publisher {
            config,
            renderer,
            extractor,
        }
    }

    pub fn index_builder(&self) -> IndexBuilder<'a, R, E> {
        IndexBuilder {
            paths: &self.config.paths,
            renderer: self.renderer,
            extractor: self.extractor,
            date_format: &self.config.publishing.date_format,
        }
    }

    pub fn publish(&self, draft: &Path) -> Result<PublishReport> {
        self.publish_at(draft, Local::now())
    }

    pub fn publish_at(&self, draft: &Path, now: DateTime<Local>) -> Result<PublishReport> {
        if !draft.is_file() {
            return Err(PublishError::DraftNotFound(draft.to_path_buf()));
        }
        self.check_folder(draft)?;

        let Some(name) = PostName::for_draft(draft, PostTimestamp::from_datetime(&now)) else {
            return Err(PublishError::Io(io::Error::new(
                ErrorKind::InvalidInput, format!("Invalid draft file name {}", draft.display()))));
        };
        self.check_collision(&name.base_name)?;

        let vars = PostVars {
            postdate: format_post_date(&now, &self.config.publishing.date_format),
            year: format_year(&now),
        };
        debug!("Rendering {} with postdate={} year={}", draft.display(), vars.postdate, vars.year);
        let content = self.renderer.render_post(draft, &vars)?;
        // Anything written below has to be readable by the index rebuild
        self.extractor.extract(&content).map_err(|reason| PublishError::InvalidDraft {
            draft: draft.to_path_buf(),
            reason,
        })?;

        let post_path = self.config.paths.published_dir.join(name.file_name());
        write_new_file(&post_path, &content)?;
        info!("The blog post is available at {}", post_path.display());

        let entries = self.index_builder().rebuild()?;

        Ok(PublishReport {
            post_path,
            index_path: self.config.paths.index_file.clone(),
            index_entries: entries.len(),
        })
    }

    /// The draft has to sit right in the work-in-progress folder, not below it
    fn check_folder(&self, draft: &Path) -> Result<()> {
        let wrong_folder = || PublishError::WrongFolder {
            draft: draft.to_path_buf(),
            expected: self.config.paths.wip_dir.clone(),
        };

        let draft_dir = match draft.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let draft_dir = fs::canonicalize(draft_dir)?;
        let wip_dir = fs::canonicalize(&self.config.paths.wip_dir).map_err(|_| wrong_folder())?;

        if draft_dir != wip_dir {
            return Err(wrong_folder());
        }
        Ok(())
    }

    fn check_collision(&self, base_name: &str) -> Result<()> {
        let policy = self.config.publishing.collision;
        for entry in fs::read_dir(&self.config.paths.published_dir)? {
            let file_name = entry?.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };

            if collides(policy, base_name, file_name) {
                return Err(PublishError::DuplicateTitle {
                    base_name: base_name.to_string(),
                    existing: file_name.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn collides(policy: CollisionPolicy, base_name: &str, published: &str) -> bool {
    match policy {
        CollisionPolicy::Prefix => published.starts_with(base_name),
        CollisionPolicy::Exact => match PostName::parse(published) {
            Ok(name) => name.base_name == base_name,
            Err(_) => Path::new(published).file_stem().and_then(|s| s.to_str()) == Some(base_name),
        },
    }
}

fn write_new_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
