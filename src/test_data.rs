use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::codec::{PostName, PostTimestamp};
use crate::config::{parse_config, CollisionPolicy, Config};
use crate::content::MarkerExtractor;
use crate::view::MustacheRenderer;

pub const PUBLISHED_POST: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Cloud and software</title>
</head>
<body>
  <header class="masthead">
    <div class="post-heading">
      <h1>Hello world</h1>
      <span class="subheading">A first post</span>
      <span class="meta">Posted on November 14, 2023</span>
    </div>
  </header>
  <article>
    <h2>Why</h2>
    <p>Some text.</p>
  </article>
  <footer>&copy; 2023</footer>
</body>
</html>
"##;

pub const SITE_CFG: &str = r##"
[paths]
wip_dir = "posts_wip"
published_dir = "posts"
index_file = "index.html"
tooling_dir = "tooling"
"##;

/// One `publish_date|title|subtitle|formatted_publish_date|link` per post, `;` separated
pub const INDEX_TEMPLATE: &str = "{{#posts}}{{publish_date}}|{{{title}}}|{{{subtitle}}}|{{formatted_publish_date}}|{{{link}}};{{/posts}}";

pub const BLOG_TEMPLATE: &str = "<h1>{{title}}</h1><span class=\"subheading\">{{subtitle}}</span><p>{{technology}} by {{author}}</p><span class=\"meta\">{{{postdate}}}</span><footer>{{{year}}}</footer>";

pub fn draft_html(title: &str, subtitle: &str) -> String {
    format!(r##"<html>
<body>
  <h1>{}</h1>
  <span class="subheading">{}</span>
  <span class="meta">Posted on {{{{postdate}}}}</span>
  <footer>&copy; {{{{year}}}}</footer>
</body>
</html>
"##, title, subtitle)
}

pub fn post_html(title: &str, subtitle: &str) -> String {
    format!("<h1>{}</h1>\n<span class=\"subheading\">{}</span>\n", title, subtitle)
}

/// A site laid out in a temporary directory with the test templates
pub struct TestSite {
    pub dir: TempDir,
    pub config: Config,
}

impl TestSite {
    pub fn new() -> TestSite {
        let dir = TempDir::new().unwrap();
        for sub_dir in ["posts_wip", "posts", "tooling"] {
            fs::create_dir(dir.path().join(sub_dir)).unwrap();
        }
        fs::write(dir.path().join("tooling/index_template.mustache"), INDEX_TEMPLATE).unwrap();
        fs::write(dir.path().join("tooling/blog_template.mustache"), BLOG_TEMPLATE).unwrap();

        let config = parse_config(SITE_CFG, dir.path()).unwrap();
        TestSite { dir, config }
    }

    pub fn with_collision(mut self, collision: CollisionPolicy) -> TestSite {
        self.config.publishing.collision = collision;
        self
    }

    pub fn renderer(&self) -> MustacheRenderer {
        MustacheRenderer::new(&self.config.paths.tooling_dir, &self.config.templates)
    }

    pub fn extractor(&self) -> MarkerExtractor {
        MarkerExtractor {}
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_draft(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.config.paths.wip_dir.join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes a published post and returns its file name
    pub fn add_published(&self, base_name: &str, timestamp: &str, content: &str) -> String {
        let name = PostName::new(base_name, PostTimestamp::parse(timestamp).unwrap(), "html");
        let file_name = name.file_name();
        fs::write(self.config.paths.published_dir.join(&file_name), content).unwrap();
        file_name
    }

    pub fn published_files(&self) -> Vec<String> {
        let mut files: Vec<String> = fs::read_dir(&self.config.paths.published_dir).unwrap()
            .map(|entry| entry.unwrap().file_name().to_str().unwrap().to_string())
            .collect();
        files.sort();
        files
    }

    pub fn index(&self) -> Option<String> {
        fs::read_to_string(&self.config.paths.index_file).ok()
    }

    /// Index rendered with INDEX_TEMPLATE, split by post
    pub fn index_rows(&self) -> Vec<Vec<String>> {
        self.index().unwrap()
            .split(';')
            .filter(|row| !row.is_empty())
            .map(|row| row.split('|').map(|s| s.to_string()).collect())
            .collect()
    }
}
