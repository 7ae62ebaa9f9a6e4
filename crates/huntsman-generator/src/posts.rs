//! Blog post building.
//!
//! Reads every Markdown file in the posts directory and turns it into a
//! composed [`Item`] under `/blog/<slug>/`.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use huntsman_core::{CoreError, Item, ItemDraft, ItemKind, SiteConfig, slug::{is_url_safe, slugify}, sort_newest_first};
use huntsman_parser::{MarkdownError, MarkdownParser};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    compose::{PageComposer, PageFields},
    template::TemplateError,
};

/// Call to action used when a post does not set `cta_text`.
pub const DEFAULT_POST_CTA_TEXT: &str = "Run unlimited form experiments in minutes.";

/// Post building errors.
#[derive(Debug, Error)]
pub enum PostError {
    /// Posts directory or file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Frontmatter could not be parsed.
    #[error(transparent)]
    Markdown(#[from] MarkdownError),

    /// Frontmatter value was invalid.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Page composition failed.
    #[error("failed to compose {path}: {source}")]
    Compose {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },
}

/// Result type for post operations.
pub type Result<T> = std::result::Result<T, PostError>;

/// Markdown files directly inside `dir`, in lexical order.
///
/// A missing directory has no posts.
pub fn list_markdown_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Builds blog post items from Markdown sources.
#[derive(Debug)]
pub struct PostBuilder<'a> {
    config: &'a SiteConfig,
    composer: &'a PageComposer<'a>,
    parser: MarkdownParser,
    today: NaiveDate,
}

impl<'a> PostBuilder<'a> {
    /// Create a builder; `today` is the date of posts without one.
    pub fn new(config: &'a SiteConfig, composer: &'a PageComposer<'a>, today: NaiveDate) -> Self {
        Self {
            config,
            composer,
            parser: MarkdownParser::new(),
            today,
        }
    }

    /// Build every post in `dir`, newest first.
    ///
    /// Files are read in lexical order so posts sharing a date keep that order.
    pub fn build(&self, dir: &Path) -> Result<Vec<Item>> {
        let files = list_markdown_files(dir).map_err(|source| PostError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        info!(dir = %dir.display(), count = files.len(), "building posts");

        let mut items = files
            .iter()
            .map(|path| self.build_post(path))
            .collect::<Result<Vec<_>>>()?;

        sort_newest_first(&mut items);
        Ok(items)
    }

    /// Build a single post file.
    pub fn build_post(&self, path: &Path) -> Result<Item> {
        let source = fs::read_to_string(path).map_err(|source| PostError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = self.parser.parse(&source, path)?;
        let fm = &parsed.frontmatter;

        let title = fm.title().unwrap_or_else(|| file_stem(path));
        let description = fm.description().unwrap_or_default();
        let date = fm.date(path)?.unwrap_or(self.today);
        let slug = match fm.slug() {
            Some(slug) if is_url_safe(&slug) => slug,
            Some(slug) => {
                return Err(CoreError::frontmatter(
                    path,
                    format!("slug {slug:?} is not URL-safe, expected {:?}", slugify(&slug)),
                )
                .into());
            }
            None => {
                let slug = slugify(&title);
                if slug.is_empty() {
                    return Err(CoreError::frontmatter(
                        path,
                        format!("title {title:?} has no characters usable in a URL; set `slug`"),
                    )
                    .into());
                }
                slug
            }
        };
        let cta_url = fm.cta_url().unwrap_or_else(|| self.config.cta_url());
        let cta_text = fm
            .cta_text()
            .unwrap_or_else(|| DEFAULT_POST_CTA_TEXT.to_string());

        let draft = ItemDraft {
            kind: ItemKind::Post,
            description: if description.is_empty() {
                title.clone()
            } else {
                description.clone()
            },
            title,
            slug,
            date,
        };
        let canonical = self.config.canonical(&draft.url());

        let html = self
            .composer
            .compose(&PageFields {
                title: &draft.title,
                description: &description,
                date,
                content: &parsed.html,
                canonical: &canonical,
                cta_url: &cta_url,
                cta_text: &cta_text,
            })
            .map_err(|source| PostError::Compose {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), url = %draft.url(), "built post");
        Ok(draft.finish(html, self.config))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateRegistry;

    fn config() -> SiteConfig {
        SiteConfig {
            site_url: "https://example.com".to_string(),
            site_name: "Example".to_string(),
            app_url: Some("https://app.example.com/".to_string()),
            ..SiteConfig::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn build(dir: &Path) -> Result<Vec<Item>> {
        let templates = TemplateRegistry::new().unwrap();
        let config = config();
        let composer = PageComposer::new(&templates, &config, today());
        PostBuilder::new(&config, &composer, today()).build(dir)
    }

    #[test]
    fn test_build_single_post() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-05\n---\n# Hi",
        )
        .unwrap();

        let items = build(dir.path()).unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.url, "/blog/hello/");
        assert_eq!(item.canonical, "https://example.com/blog/hello/");
        assert_eq!(item.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(item.description, "Hello");
        assert!(item.html.contains("<h1 id=\"hi\">Hi</h1>"));
        assert!(item.html.contains(r#"href="https://app.example.com/""#));
        assert!(item.html.contains(DEFAULT_POST_CTA_TEXT));
    }

    #[test]
    fn test_defaults_from_filename_and_today() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Plain Notes.md"), "No frontmatter here.").unwrap();

        let items = build(dir.path()).unwrap();
        let item = &items[0];
        assert_eq!(item.title, "Plain Notes");
        assert_eq!(item.url, "/blog/plain-notes/");
        assert_eq!(item.date, today());
    }

    #[test]
    fn test_frontmatter_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.md"),
            "---\ntitle: Something Long\nslug: short\ndescription: Meta text\ncta_url: https://x.example/\ncta_text: Click\n---\nBody",
        )
        .unwrap();

        let item = &build(dir.path()).unwrap()[0];
        assert_eq!(item.url, "/blog/short/");
        assert_eq!(item.description, "Meta text");
        assert!(item.html.contains(r#"href="https://x.example/""#));
        assert!(item.html.contains(">Click<"));
    }

    #[test]
    fn test_newest_first_with_stable_ties() {
        let dir = tempfile::tempdir().unwrap();
        let post = |name: &str, date: &str| {
            fs::write(
                dir.path().join(format!("{name}.md")),
                format!("---\ntitle: {name}\ndate: {date}\n---\nx"),
            )
            .unwrap();
        };
        post("b", "2024-01-01");
        post("a", "2024-01-01");
        post("c", "2024-05-01");
        post("d", "2023-12-31");

        let titles: Vec<_> = build(dir.path())
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, ["c", "a", "b", "d"]);
    }

    #[test]
    fn test_malformed_date_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.md"), "---\ntitle: Bad\ndate: 2024-13-45\n---\nx").unwrap();

        let err = build(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            PostError::Core(CoreError::DateFormat { .. })
        ));
    }

    #[test]
    fn test_ignores_non_markdown_and_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        assert!(build(dir.path()).unwrap().is_empty());
        assert!(build(&dir.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_path_like_slug_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("escape.md"),
            "---\ntitle: Escape\nslug: ../../../escaped\n---\nx",
        )
        .unwrap();

        let err = build(dir.path()).unwrap_err();
        match err {
            PostError::Core(CoreError::Frontmatter { path, message }) => {
                assert!(path.ends_with("escape.md"));
                assert!(message.contains("../../../escaped"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_title_without_slug_characters_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bang.md"), "---\ntitle: \"!!!\"\n---\nx").unwrap();

        let err = build(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            PostError::Core(CoreError::Frontmatter { .. })
        ));
    }
}
