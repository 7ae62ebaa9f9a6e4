//! HTML templates for page generation.
//!
//! Built-in `base.html`, `post.html` and `index.html` templates are always
//! registered. A site can override any of them, or add its own, by placing
//! `*.html` files in its templates directory.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::debug;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template failed to parse or render.
    #[error("template error: {0}")]
    Tera(#[from] tera::Error),

    /// Template file could not be read.
    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Outer page shell.
pub const BASE_TEMPLATE: &str = "base.html";

/// Article body with call to action.
pub const POST_TEMPLATE: &str = "post.html";

/// Site root listing.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Registry of named templates.
#[derive(Debug)]
pub struct TemplateRegistry {
    tera: Tera,
}

impl TemplateRegistry {
    /// Create a registry holding only the built-in templates.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.set_escape_fn(escape_html);
        tera.add_raw_templates(vec![
            (BASE_TEMPLATE, DEFAULT_BASE_TEMPLATE),
            (POST_TEMPLATE, DEFAULT_POST_TEMPLATE),
            (INDEX_TEMPLATE, DEFAULT_INDEX_TEMPLATE),
        ])?;

        Ok(Self { tera })
    }

    /// Create a registry with built-ins overridden by files in `dir`.
    ///
    /// A missing directory is not an error.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut registry = Self::new()?;
        registry.load_dir(dir)?;
        Ok(registry)
    }

    /// Register every `*.html` file in `dir` under its file name.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "no templates directory, using built-ins");
                return Ok(0);
            }
            Err(source) => {
                return Err(TemplateError::Read {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "html"))
            .collect();
        files.sort();

        let mut templates = Vec::with_capacity(files.len());
        for path in &files {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let content = fs::read_to_string(path).map_err(|source| TemplateError::Read {
                path: path.clone(),
                source,
            })?;
            debug!(name, "registering template");
            templates.push((name.to_string(), content));
        }

        let count = templates.len();
        self.tera.add_raw_templates(templates)?;
        Ok(count)
    }

    /// Register a template from a string, replacing any of the same name.
    pub fn register(&mut self, name: &str, content: &str) -> Result<()> {
        self.tera.add_raw_template(name, content)?;
        Ok(())
    }

    /// Check if a template exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render a template with a serializable context.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        let context = Context::from_serialize(context)?;
        Ok(self.tera.render(name, &context)?)
    }
}

/// Escape text for HTML element content and quoted attributes.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const DEFAULT_BASE_TEMPLATE: &str = r#"<!doctype html>
<html lang="{{ lang }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <meta name="description" content="{{ description }}">
  <meta name="author" content="{{ author }}">
  <link rel="canonical" href="{{ canonical }}">
  <link rel="alternate" type="application/rss+xml" title="{{ site_name }}" href="{{ base_url }}/rss.xml">
  <link rel="stylesheet" href="{{ base_url }}/assets/site.css">
</head>
<body>
  <header class="site-header">
    <a class="brand" href="{{ base_url }}/">{{ site_name }}</a>
    <p class="tagline">{{ tagline }}</p>
  </header>
  <main>
{{ body | safe }}
  </main>
  <footer class="site-footer">
    <p>&copy; {{ year }} {{ author }}</p>
  </footer>
</body>
</html>
"#;

const DEFAULT_POST_TEMPLATE: &str = r#"<article class="post">
  <header>
    <h1>{{ title }}</h1>
    <p class="meta"><time datetime="{{ date }}">{{ date }}</time></p>
  </header>
  <div class="content">
{{ content | safe }}
  </div>
  <aside class="cta">
    <a class="button" href="{{ cta_url }}">{{ cta_text }}</a>
  </aside>
</article>
"#;

const DEFAULT_INDEX_TEMPLATE: &str = r#"<section class="hero">
  <h1>Form experiments you can ship this week</h1>
  <p>Templates, field checklists and A/B test ideas for lead forms.</p>
</section>
{% if posts %}
<section class="latest">
  <h2>Latest posts</h2>
  <ul class="post-list">
  {% for post in posts %}
    <li>
      <a href="{{ base_url }}{{ post.url }}">{{ post.title }}</a>
      <time datetime="{{ post.date }}">{{ post.date }}</time>
      {% if post.description %}<p>{{ post.description }}</p>{% endif %}
    </li>
  {% endfor %}
  </ul>
</section>
{% endif %}
{% if pseo_pages %}
<section class="templates">
  <h2>Form templates by industry</h2>
  <ul class="template-list">
  {% for page in pseo_pages %}
    <li><a href="{{ base_url }}{{ page.url }}">{{ page.title }}</a></li>
  {% endfor %}
  </ul>
</section>
{% endif %}
"#;
