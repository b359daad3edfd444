use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use clap::ValueEnum;
use spdlog::info;

use crate::config::Paths;
use crate::error::{PublishError, Result};
use crate::text_utils::{capitalize, draft_stem};
use crate::view::{DraftVars, PageRenderer};

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum Technology {
    Cloud,
    Azure,
    Aws,
    Gcp,
    Python,
    Powershell,
    Windows,
    Linux,
    Software,
    #[value(name = "infra as code", alias = "infra-as-code")]
    InfraAsCode,
}

impl Display for Technology {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Technology::Cloud => "cloud",
            Technology::Azure => "azure",
            Technology::Aws => "aws",
            Technology::Gcp => "gcp",
            Technology::Python => "python",
            Technology::Powershell => "powershell",
            Technology::Windows => "windows",
            Technology::Linux => "linux",
            Technology::Software => "software",
            Technology::InfraAsCode => "infra as code",
        };
        write!(f, "{}", name)
    }
}

/// Real name of the OS user, or the user name when it is not set
pub fn author_name() -> String {
    let name = whoami::realname();
    if name.is_empty() {
        return whoami::username();
    }
    name
}

/// Creates new drafts in the work-in-progress folder from the skeleton template
pub struct Scaffolder<'a, R: PageRenderer> {
    pub paths: &'a Paths,
    pub renderer: &'a R,
}

impl<R: PageRenderer> Scaffolder<'_, R> {
    pub fn draft_path(&self, title: &str) -> PathBuf {
        self.paths.wip_dir.join(format!("{}.html", draft_stem(title)))
    }

    pub fn generate(&self, title: &str, subtitle: &str, technology: Technology, author: &str) -> Result<PathBuf> {
        let draft_path = self.draft_path(title);
        if draft_path.exists() {
            return Err(PublishError::DraftExists(draft_path));
        }

        let title = capitalize(title);
        let subtitle = capitalize(subtitle);
        let technology = capitalize(&technology.to_string());
        let content = self.renderer.render_draft(&DraftVars::new(&title, &subtitle, &technology, author))?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&draft_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Err(PublishError::DraftExists(draft_path)),
            Err(e) => return Err(e.into()),
        };
        file.write_all(content.as_bytes())?;

        info!("The blog post skeleton is available at {}", draft_path.display());
        Ok(draft_path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::content::{MetadataExtractor, PostMetadata};
    use crate::test_data::TestSite;

    use super::*;

    #[test]
    fn test_happy_case() {
        let site = TestSite::new();
        let renderer = site.renderer();
        let scaffolder = Scaffolder { paths: &site.config.paths, renderer: &renderer };

        let path = scaffolder.generate("Hello World", "my FIRST post", Technology::InfraAsCode, "Thiago").unwrap();
        assert_eq!(path, site.config.paths.wip_dir.join("post_hello_world.html"));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "<h1>Hello world</h1><span class=\"subheading\">My first post</span><p>Infra as code by Thiago</p><span class=\"meta\">{{postdate}}</span><footer>{{year}}</footer>");
        assert_eq!(site.extractor().extract(&content).unwrap(), PostMetadata {
            title: "Hello world".to_string(),
            subtitle: "My first post".to_string(),
        });
    }

    #[test]
    fn test_existing_draft() {
        let site = TestSite::new();
        let existing = site.add_draft("post_hello_world.html", "keep me");
        let renderer = site.renderer();
        let scaffolder = Scaffolder { paths: &site.config.paths, renderer: &renderer };

        let res = scaffolder.generate("Hello world", "Sub", Technology::Cloud, "Thiago");
        assert!(matches!(res, Err(PublishError::DraftExists(path)) if path == existing));
        assert_eq!(fs::read_to_string(&existing).unwrap(), "keep me");
    }

    #[test]
    fn test_technology_names() {
        assert_eq!(Technology::InfraAsCode.to_string(), "infra as code");
        assert_eq!(Technology::from_str("infra as code", true).unwrap(), Technology::InfraAsCode);
        assert_eq!(Technology::from_str("infra-as-code", true).unwrap(), Technology::InfraAsCode);
        assert_eq!(Technology::from_str("AWS", true).unwrap(), Technology::Aws);
        assert!(Technology::from_str("cobol", true).is_err());
    }

    #[test]
    fn test_author_name() {
        assert!(!author_name().is_empty());
    }
}
