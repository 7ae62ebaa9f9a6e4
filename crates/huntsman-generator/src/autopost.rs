//! Automatic blog post drafting.
//!
//! Picks an industry from the metadata file and an article angle, then writes a
//! ready-to-build Markdown post into the posts directory. Randomness comes from
//! the caller so runs can be reproduced with a seeded generator.

use std::{
    collections::HashSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use huntsman_core::{
    CoreError, IndustryCatalog, IndustryMeta, SiteConfig, first_non_empty,
    config::DEFAULT_APP_URL,
    slug::{collapse_whitespace, display_name, slugify},
};
use rand::{Rng, seq::SliceRandom};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    landing::{DEFAULT_FIELDS, DEFAULT_QUESTIONS, DEFAULT_TESTS, bullets},
    posts::list_markdown_files,
};

/// Article angles as `(key, title template)`; `{industry}` is the display name.
pub const ANGLES: [(&str, &str); 6] = [
    (
        "conversion",
        "How to improve {industry} form conversion (without redesigning your site)",
    ),
    ("fields", "The best fields to include on a {industry} lead form"),
    (
        "mistakes",
        "Common {industry} form mistakes that reduce leads (and quick fixes)",
    ),
    (
        "speed",
        "Make your {industry} lead form faster to complete: practical changes to test",
    ),
    (
        "trust",
        "Trust signals that help {industry} forms convert more leads",
    ),
    (
        "cta",
        "CTA ideas for {industry} forms: what to test and why it matters",
    ),
];

/// Opening sentences; `{industry}` is the lowercased display name.
pub const INTROS: [&str; 3] = [
    "If you rely on inbound leads, your {industry} contact form is one of your highest-impact pages.",
    "A great {industry} service page can still underperform if the lead form creates friction.",
    "Most {industry} sites don’t need a redesign to get more leads, they need clearer forms and better testing.",
];

/// Call to action written into every generated post.
pub const AUTOPOST_CTA_TEXT: &str = "Start scanning and testing forms in minutes.";

const FIELD_LIMIT: usize = 8;
const QUESTION_LIMIT: usize = 6;
const TEST_LIMIT: usize = 6;

const QUICK_SETUP: &str =
    "1. Open FormHuntsman\n2. Add your domain\n3. Run a scan and pick one small test to launch";

const NEXT_STEPS: &str = "Run one experiment, measure results, then iterate. Small wins compound fast when you keep a simple testing rhythm.";

/// Autopost errors.
#[derive(Debug, Error)]
pub enum AutopostError {
    /// The metadata file has no usable industry entries.
    #[error("No industries found in {}", path.display())]
    NoIndustries { path: PathBuf },

    /// Industry metadata could not be read or parsed.
    #[error(transparent)]
    Data(#[from] CoreError),

    /// Frontmatter could not be serialized.
    #[error("failed to serialize frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    /// Posts directory could not be listed or written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for autopost operations.
pub type Result<T> = std::result::Result<T, AutopostError>;

/// Frontmatter of a generated post, in output key order.
#[derive(Debug, Serialize)]
struct PostFrontmatter<'a> {
    title: &'a str,
    date: String,
    description: &'a str,
    cta_url: &'a str,
    cta_text: &'a str,
}

/// A generated post before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPost {
    /// File stem, unique within the posts directory at generation time.
    pub slug: String,
    pub title: String,
    /// Complete Markdown document including frontmatter.
    pub markdown: String,
}

/// Drafts new posts from industry metadata.
#[derive(Debug)]
pub struct AutopostGenerator<'a> {
    config: &'a SiteConfig,
    catalog: IndustryCatalog,
    catalog_path: PathBuf,
    posts_dir: PathBuf,
    today: NaiveDate,
}

impl<'a> AutopostGenerator<'a> {
    /// Load industry metadata from `catalog_path`.
    ///
    /// A missing file is an empty catalog; malformed YAML is an error.
    pub fn load(
        config: &'a SiteConfig,
        catalog_path: &Path,
        posts_dir: impl Into<PathBuf>,
        today: NaiveDate,
    ) -> Result<Self> {
        let catalog = match fs::read_to_string(catalog_path) {
            Ok(content) => IndustryCatalog::from_yaml_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => IndustryCatalog::default(),
            Err(e) => return Err(CoreError::read(catalog_path, e).into()),
        };

        Ok(Self::new(config, catalog, catalog_path, posts_dir, today))
    }

    /// Create a generator from an already loaded catalog.
    pub fn new(
        config: &'a SiteConfig,
        catalog: IndustryCatalog,
        catalog_path: impl Into<PathBuf>,
        posts_dir: impl Into<PathBuf>,
        today: NaiveDate,
    ) -> Self {
        Self {
            config,
            catalog,
            catalog_path: catalog_path.into(),
            posts_dir: posts_dir.into(),
            today,
        }
    }

    /// Draft a post without writing it.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GeneratedPost> {
        let (industry_slug, meta) =
            self.catalog
                .entries()
                .choose(rng)
                .ok_or_else(|| AutopostError::NoIndustries {
                    path: self.catalog_path.clone(),
                })?;
        let industry = display_name(industry_slug);

        let &(angle, title_template) = ANGLES.choose(rng).unwrap_or(&ANGLES[0]);
        let title = title_template.replace("{industry}", &industry);

        let date = self.today.format("%Y-%m-%d").to_string();
        let slug = unique_slug(
            &slugify(&format!("{industry}-{angle}-{date}")),
            &self.existing_slugs()?,
        );

        let lower = industry.to_lowercase();
        let intro = INTROS.choose(rng).unwrap_or(&INTROS[0]).replace("{industry}", &lower);
        let description = collapse_whitespace(&format!(
            "Practical {lower} form tips: suggested fields, example questions, and A/B tests you can run in FormHuntsman."
        ));
        let cta_url = self.cta_url();

        let frontmatter = serde_yaml::to_string(&PostFrontmatter {
            title: &title,
            date,
            description: &description,
            cta_url: &cta_url,
            cta_text: AUTOPOST_CTA_TEXT,
        })?;

        let markdown = format!("---\n{frontmatter}---\n\n{}", post_body(&industry, &intro, meta));

        debug!(industry = %industry_slug, angle, slug = %slug, "drafted post");
        Ok(GeneratedPost {
            slug,
            title,
            markdown,
        })
    }

    /// Draft a post and write it to `<posts_dir>/<slug>.md`.
    pub fn write<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PathBuf> {
        fs::create_dir_all(&self.posts_dir).map_err(|source| AutopostError::Io {
            path: self.posts_dir.clone(),
            source,
        })?;

        let post = self.generate(rng)?;
        let path = self.posts_dir.join(format!("{}.md", post.slug));
        fs::write(&path, &post.markdown).map_err(|source| AutopostError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), title = %post.title, "created post");
        Ok(path)
    }

    /// App URL with exactly one trailing slash.
    fn cta_url(&self) -> String {
        let url = self
            .config
            .app_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_APP_URL);
        format!("{}/", url.trim_end_matches('/'))
    }

    /// Stems of posts currently on disk, read fresh on every call.
    fn existing_slugs(&self) -> Result<HashSet<String>> {
        let files = list_markdown_files(&self.posts_dir).map_err(|source| AutopostError::Io {
            path: self.posts_dir.clone(),
            source,
        })?;

        Ok(files
            .iter()
            .filter_map(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect())
    }
}

/// `base`, or `base-2`, `base-3`, ... whichever is first not in `taken`.
pub fn unique_slug(base: &str, taken: &HashSet<String>) -> String {
    let mut slug = base.to_string();
    let mut n = 2;
    while taken.contains(&slug) {
        slug = format!("{base}-{n}");
        n += 1;
    }
    slug
}

fn post_body(industry: &str, intro: &str, meta: &IndustryMeta) -> String {
    let fields = first_non_empty(&[limit(&meta.fields, FIELD_LIMIT)], DEFAULT_FIELDS);
    let questions = first_non_empty(&[limit(&meta.questions, QUESTION_LIMIT)], DEFAULT_QUESTIONS);
    let tests = first_non_empty(&[limit(&meta.tests, TEST_LIMIT)], DEFAULT_TESTS);

    format!(
        "{intro}\n\n\
         ## Recommended form fields for {industry}\n{}\n\n\
         ## Example questions to include\n{}\n\n\
         ## A/B tests worth running\n{}\n\n\
         ## Quick setup\n{QUICK_SETUP}\n\n\
         ## Next steps\n{NEXT_STEPS}\n",
        bullets(&fields),
        bullets(&questions),
        bullets(&tests),
    )
}

fn limit(items: &[String], n: usize) -> &[String] {
    &items[..items.len().min(n)]
}
