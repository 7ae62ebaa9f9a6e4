//! Content items produced by the builders.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::SiteConfig;

/// Which builder produced an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Hand-written blog post.
    Post,
    /// Generated industry landing page.
    Landing,
}

impl ItemKind {
    /// First URL segment for this kind of item.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Post => "blog",
            Self::Landing => "templates",
        }
    }
}

/// One publishable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Page title.
    pub title: String,

    /// Meta description (already falls back to the title for posts).
    pub description: String,

    /// Site-relative URL of the form `/<segment>/<slug>/`.
    pub url: String,

    /// Calendar date used for ordering and feed timestamps.
    pub date: NaiveDate,

    /// Fully composed HTML document.
    #[serde(skip)]
    pub html: String,

    /// Absolute URL of the page.
    pub canonical: String,

    /// Builder that produced the item.
    pub kind: ItemKind,
}

impl Item {
    /// Site-relative URL for a slug under the kind's segment.
    pub fn url_for(kind: ItemKind, slug: &str) -> String {
        format!("/{}/{slug}/", kind.segment())
    }

    /// Path of the generated `index.html`, relative to the output directory.
    pub fn output_path(&self) -> std::path::PathBuf {
        std::path::Path::new(self.url.trim_matches('/')).join("index.html")
    }

    /// Date formatted as `YYYY-MM-DD`.
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Fields shared by every item before composition.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub kind: ItemKind,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub date: NaiveDate,
}

impl ItemDraft {
    /// Site-relative URL of the draft.
    pub fn url(&self) -> String {
        Item::url_for(self.kind, &self.slug)
    }

    /// Attach the composed HTML and resolve the canonical URL.
    pub fn finish(self, html: String, config: &SiteConfig) -> Item {
        let url = self.url();
        Item {
            canonical: config.canonical(&url),
            title: self.title,
            description: self.description,
            url,
            date: self.date,
            html,
            kind: self.kind,
        }
    }
}

/// Stable sort, newest date first. Equal dates keep their relative order.
pub fn sort_newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
}
