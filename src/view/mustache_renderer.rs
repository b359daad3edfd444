use std::fs;
use std::path::{Path, PathBuf};

use ramhorns::{Content, Template};
use spdlog::debug;

use crate::config::Templates;
use crate::error::{PublishError, Result};
use crate::view::{DraftVars, IndexPage, PageRenderer, PostVars};

/// Renders mustache templates. Skeleton and index come from the tooling
/// folder, a published post is rendered from the draft file itself.
pub struct MustacheRenderer {
    pub tooling_dir: PathBuf,
    pub templates: Templates,
}

impl MustacheRenderer {
    pub fn new(tooling_dir: &Path, templates: &Templates) -> MustacheRenderer {
        MustacheRenderer {
            tooling_dir: tooling_dir.to_path_buf(),
            templates: templates.clone(),
        }
    }

    fn load_template(tpl_path: &Path) -> Result<Template<'static>> {
        let tpl_src = match fs::read_to_string(tpl_path) {
            Ok(s) => s,
            Err(e) => return Err(PublishError::Template {
                template: tpl_path.display().to_string(),
                message: format!("Error loading template: {}", e),
            }),
        };

        match Template::new(tpl_src) {
            Ok(x) => Ok(x),
            Err(e) => Err(PublishError::Template {
                template: tpl_path.display().to_string(),
                message: format!("Error parsing template: {}", e),
            }),
        }
    }

    pub fn render<C: Content>(&self, tpl_path: &Path, content: &C) -> Result<String> {
        debug!("Rendering template {}", tpl_path.display());
        let template = Self::load_template(tpl_path)?;
        Ok(template.render(content))
    }
}

impl PageRenderer for MustacheRenderer {
    fn render_draft(&self, vars: &DraftVars) -> Result<String> {
        self.render(&self.tooling_dir.join(&self.templates.draft), vars)
    }

    fn render_post(&self, draft: &Path, vars: &PostVars) -> Result<String> {
        self.render(draft, vars)
    }

    fn render_index(&self, page: &IndexPage) -> Result<String> {
        self.render(&self.tooling_dir.join(&self.templates.index), page)
    }
}
