use std::path::{Path, PathBuf};
use std::{env, fs};

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::error::{PublishError, Result};

pub const CFG_FILE_NAME: &str = "cspublish.toml";

/// Folders the tool works on. Relative entries are resolved against the
/// directory holding the configuration file.
#[derive(Deserialize, Debug, Clone)]
pub struct Paths {
    pub wip_dir: PathBuf,
    pub published_dir: PathBuf,
    pub index_file: PathBuf,
    pub tooling_dir: PathBuf,
}

/// Template file names inside the tooling folder
#[derive(Deserialize, Debug, Clone)]
pub struct Templates {
    #[serde(default = "default_draft_template")]
    pub draft: String,
    #[serde(default = "default_index_template")]
    pub index: String,
}

impl Default for Templates {
    fn default() -> Self {
        Templates {
            draft: default_draft_template(),
            index: default_index_template(),
        }
    }
}

fn default_draft_template() -> String {
    "blog_template.mustache".to_string()
}

fn default_index_template() -> String {
    "index_template.mustache".to_string()
}

/// How a new draft name is checked against already published posts.
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Any published file whose name starts with the draft name blocks it
    #[default]
    Prefix,
    /// Only a published post with the very same base name blocks it
    Exact,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Publishing {
    #[serde(default)]
    pub collision: CollisionPolicy,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for Publishing {
    fn default() -> Self {
        Publishing {
            collision: CollisionPolicy::default(),
            date_format: default_date_format(),
        }
    }
}

fn default_date_format() -> String {
    "%B %d, %Y".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
    #[serde(default = "default_log_to_console")]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_log_to_console() -> bool {
    true
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub paths: Paths,
    #[serde(default)]
    pub templates: Templates,
    #[serde(default)]
    pub publishing: Publishing,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf, site_dir: &Path) -> Result<PathBuf> {
    let path = if path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe()?;
        let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
        let rest = path.strip_prefix("${exe_dir}").unwrap_or(&path);
        exe_dir.join(rest)
    } else {
        path
    };

    if path.is_relative() {
        Ok(site_dir.join(path))
    } else {
        Ok(path)
    }
}

fn check_date_format(date_format: &str) -> Result<()> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(PublishError::Config(format!("Invalid date format: {}", date_format)));
    }
    Ok(())
}

/// Parses the configuration and resolves every path against `site_dir`
pub fn parse_config(cfg_content: &str, site_dir: &Path) -> Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(PublishError::Config(format!("Error parsing configuration file: {}", e))),
    };

    check_date_format(&cfg.publishing.date_format)?;

    cfg.paths = Paths {
        wip_dir: parse_path(cfg.paths.wip_dir, site_dir)?,
        published_dir: parse_path(cfg.paths.published_dir, site_dir)?,
        index_file: parse_path(cfg.paths.index_file, site_dir)?,
        tooling_dir: parse_path(cfg.paths.tooling_dir, site_dir)?,
    };

    if let Some(ref mut log) = cfg.log {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location, site_dir)?);
        }
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(PublishError::Config(format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let site_dir = match cfg_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => env::current_dir()?,
    };

    parse_config(&cfg_content, &site_dir)
}
