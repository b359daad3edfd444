use std::fs;
use std::path::{Path, PathBuf};

use spdlog::info;

use crate::config::{read_config, Config, CFG_FILE_NAME};
use crate::error::{PublishError, Result};

const SAMPLE_CFG: &str = include_str!("../cspublish.toml");
const BLOG_TEMPLATE: &str = include_str!("../res/tooling/blog_template.mustache");
const INDEX_TEMPLATE: &str = include_str!("../res/tooling/index_template.mustache");

/// Writes `content` unless the file is already there. Returns whether it wrote.
fn write_if_absent(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        info!("Keeping existing {}", path.display());
        return Ok(false);
    }
    fs::write(path, content)?;
    info!("Created {}", path.display());
    Ok(true)
}

/// Lays out a new blog in `out_dir`: configuration, folders and templates.
/// Files already present are kept, so it can be run again on the same site.
pub fn bootstrap_site(out_dir: &Path) -> Result<Config> {
    let out_path: PathBuf = match fs::canonicalize(out_dir) {
        Ok(path) => path,
        Err(e) => return Err(PublishError::Config(format!("Error converting path to absolute: {} - {}", out_dir.display(), e))),
    };

    if !out_path.is_dir() {
        return Err(PublishError::Config(format!("Output path must be a directory: {}", out_path.display())));
    }

    let cfg_path = out_path.join(CFG_FILE_NAME);
    write_if_absent(&cfg_path, SAMPLE_CFG)?;
    let config = read_config(&cfg_path)?;

    let paths = &config.paths;
    for dir in [&paths.wip_dir, &paths.published_dir, &paths.tooling_dir] {
        fs::create_dir_all(dir)?;
    }

    write_if_absent(&paths.tooling_dir.join(&config.templates.draft), BLOG_TEMPLATE)?;
    write_if_absent(&paths.tooling_dir.join(&config.templates.index), INDEX_TEMPLATE)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    use crate::config::CollisionPolicy;
    use crate::content::MarkerExtractor;
    use crate::publisher::Publisher;
    use crate::scaffold::{Scaffolder, Technology};
    use crate::view::MustacheRenderer;

    use super::*;

    #[test]
    fn test_sample_cfg() {
        let cfg = crate::config::parse_config(SAMPLE_CFG, Path::new("/abs/path")).unwrap();
        assert_eq!(cfg.paths.wip_dir, PathBuf::from("/abs/path/posts_wip"));
        assert_eq!(cfg.paths.published_dir, PathBuf::from("/abs/path/posts"));
        assert_eq!(cfg.paths.index_file, PathBuf::from("/abs/path/index.html"));
        assert_eq!(cfg.paths.tooling_dir, PathBuf::from("/abs/path/tooling"));
        assert_eq!(cfg.publishing.collision, CollisionPolicy::Prefix);
        assert!(cfg.log.unwrap().location.is_none());
    }

    #[test]
    fn test_bootstrap_layout() {
        let dir = TempDir::new().unwrap();
        let config = bootstrap_site(dir.path()).unwrap();

        assert!(config.paths.wip_dir.is_dir());
        assert!(config.paths.published_dir.is_dir());
        assert!(config.paths.tooling_dir.join("blog_template.mustache").is_file());
        assert!(config.paths.tooling_dir.join("index_template.mustache").is_file());
        assert_eq!(fs::read_to_string(dir.path().join(CFG_FILE_NAME)).unwrap(), SAMPLE_CFG);
    }

    #[test]
    fn test_bootstrap_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        let config = bootstrap_site(dir.path()).unwrap();
        let index_tpl = config.paths.tooling_dir.join("index_template.mustache");
        fs::write(&index_tpl, "custom").unwrap();

        bootstrap_site(dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&index_tpl).unwrap(), "custom");
    }

    #[test]
    fn test_bootstrap_requires_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "").unwrap();

        assert!(matches!(bootstrap_site(&file), Err(PublishError::Config(_))));
        assert!(matches!(bootstrap_site(&dir.path().join("missing")), Err(PublishError::Config(_))));
    }

    #[test]
    fn test_generate_and_publish_with_default_templates() {
        let dir = TempDir::new().unwrap();
        let config = bootstrap_site(dir.path()).unwrap();
        let renderer = MustacheRenderer::new(&config.paths.tooling_dir, &config.templates);
        let extractor = MarkerExtractor {};

        let scaffolder = Scaffolder { paths: &config.paths, renderer: &renderer };
        let draft = scaffolder.generate("Hello world", "A first post", Technology::Azure, "Thiago").unwrap();

        let now = Local.timestamp_opt(1700000000, 0).unwrap();
        let report = Publisher::new(&config, &renderer, &extractor).publish_at(&draft, now).unwrap();
        assert_eq!(report.index_entries, 1);

        let published = fs::read_to_string(&report.post_path).unwrap();
        assert!(published.contains("<h1>Hello world</h1>"));
        assert!(!published.contains("{{"));

        let index = fs::read_to_string(&config.paths.index_file).unwrap();
        let file_name = report.post_path.file_name().unwrap().to_str().unwrap();
        assert!(index.contains(&format!("<a href=\"posts/{}\">", file_name)));
        assert!(index.contains("<h2 class=\"post-title\">Hello world</h2>"));
        assert!(index.contains("<h3 class=\"post-subtitle\">A first post</h3>"));
        assert!(index.contains("1 posts"));
    }
}
