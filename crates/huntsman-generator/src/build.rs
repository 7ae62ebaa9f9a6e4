//! Build orchestration.
//!
//! Coordinates the full site build process. Every item is built in memory
//! before the output directory is touched, so a failing build leaves the
//! previous output in place.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use chrono::{Local, NaiveDate};
use huntsman_core::{Item, ItemKind, ProjectLayout, SiteConfig};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    assets::{AssetError, copy_static},
    compose::{PageComposer, PageLink, PostSummary},
    landing::{LandingBuilder, LandingData, LandingError},
    posts::{PostBuilder, PostError},
    robots::write_robots,
    rss::{FeedError, RssGenerator},
    sitemap::SitemapGenerator,
    template::{TemplateError, TemplateRegistry},
};

/// Posts listed on the site root.
pub const INDEX_POST_LIMIT: usize = 10;

/// Landing pages listed on the site root.
pub const INDEX_LANDING_LIMIT: usize = 30;

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Output could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template loading or rendering error.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Post building error.
    #[error(transparent)]
    Post(#[from] PostError),

    /// Landing page building error.
    #[error(transparent)]
    Landing(#[from] LandingError),

    /// RSS feed error.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Asset error.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Two items resolve to the same URL.
    #[error("duplicate URL {url}: {first} and {second}")]
    DuplicateUrl {
        url: String,
        first: String,
        second: String,
    },
}

impl BuildError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of blog posts generated.
    pub posts: usize,

    /// Number of landing pages generated.
    pub landing_pages: usize,

    /// Number of static files copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: SiteConfig,
    layout: ProjectLayout,
    output_dir: PathBuf,
    today: NaiveDate,
}

impl Builder {
    /// Create a builder writing to the configured output directory.
    #[must_use]
    pub fn new(config: SiteConfig, layout: ProjectLayout) -> Self {
        let output_dir = layout.output_dir(&config);
        Self {
            config,
            layout,
            output_dir,
            today: Local::now().date_naive(),
        }
    }

    /// Write somewhere other than the configured output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Fix the build date used for undated posts, landing pages and the footer.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Directory the site is written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();

        info!(
            root = %self.layout.root.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        let templates = TemplateRegistry::from_dir(&self.layout.templates_dir)?;
        let composer = PageComposer::new(&templates, &self.config, self.today);

        let posts =
            PostBuilder::new(&self.config, &composer, self.today).build(&self.layout.posts_dir)?;

        let data = LandingData::load(&self.layout)?;
        let landing = LandingBuilder::new(&self.config, &composer, self.today).build(&data)?;

        let items: Vec<Item> = posts.iter().chain(&landing).cloned().collect();
        check_unique_urls(&items)?;

        self.clean_output()?;
        for item in &items {
            self.write_item(item)?;
        }
        self.write_index(&composer, &posts, &landing)?;

        write_robots(&self.output_dir)
            .map_err(|e| BuildError::io(self.output_dir.join("robots.txt"), e))?;
        SitemapGenerator::new()
            .write(&items, &self.output_dir)
            .map_err(|e| BuildError::io(self.output_dir.join("sitemap.xml"), e))?;
        RssGenerator::new(&self.config).write(&items, &self.output_dir)?;

        let assets = copy_static(&self.layout.static_dir, &self.output_dir)?;

        let stats = BuildStats {
            posts: posts.len(),
            landing_pages: landing.len(),
            assets,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            posts = stats.posts,
            landing_pages = stats.landing_pages,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Remove the output directory and recreate it empty.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir).map_err(|e| BuildError::io(&self.output_dir, e))?;
        }
        fs::create_dir_all(&self.output_dir).map_err(|e| BuildError::io(&self.output_dir, e))
    }

    /// Write an item to `<output>/<url>/index.html`.
    fn write_item(&self, item: &Item) -> Result<()> {
        let path = self.output_dir.join(item.output_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        fs::write(&path, &item.html).map_err(|e| BuildError::io(&path, e))?;
        debug!(path = %path.display(), "wrote page");
        Ok(())
    }

    /// Write the site root listing recent posts and landing pages.
    fn write_index(&self, composer: &PageComposer<'_>, posts: &[Item], landing: &[Item]) -> Result<()> {
        let summaries: Vec<PostSummary> = posts
            .iter()
            .take(INDEX_POST_LIMIT)
            .map(|post| PostSummary {
                title: post.title.clone(),
                description: post.description.clone(),
                url: post.url.clone(),
                date: post.date_iso(),
            })
            .collect();
        let links: Vec<PageLink> = landing
            .iter()
            .take(INDEX_LANDING_LIMIT)
            .map(|page| PageLink {
                title: page.title.clone(),
                url: page.url.clone(),
            })
            .collect();

        let html = composer.compose_index(&summaries, &links)?;
        let path = self.output_dir.join("index.html");
        fs::write(&path, html).map_err(|e| BuildError::io(&path, e))
    }
}

/// Reject item lists in which two items share a URL.
pub fn check_unique_urls(items: &[Item]) -> Result<()> {
    let mut seen: HashMap<&str, &Item> = HashMap::with_capacity(items.len());
    for item in items {
        if let Some(first) = seen.insert(&item.url, item) {
            return Err(BuildError::DuplicateUrl {
                url: item.url.clone(),
                first: describe(first),
                second: describe(item),
            });
        }
    }
    Ok(())
}

fn describe(item: &Item) -> String {
    let kind = match item.kind {
        ItemKind::Post => "post",
        ItemKind::Landing => "landing page",
    };
    format!("{kind} {:?}", item.title)
}
