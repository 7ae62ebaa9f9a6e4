//! RSS feed generation.
//!
//! Generates an RSS 2.0 feed of the most recent posts and landing pages.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, NaiveTime};
use huntsman_core::{Item, SiteConfig, sort_newest_first};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder};
use thiserror::Error;
use tracing::debug;

/// Maximum number of feed entries.
pub const FEED_LIMIT: usize = 30;

/// Feed writing errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Feed file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// RSS feed generator.
#[derive(Debug)]
pub struct RssGenerator<'a> {
    config: &'a SiteConfig,
}

impl<'a> RssGenerator<'a> {
    /// Create a new RSS generator.
    #[must_use]
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Generate RSS feed XML from the newest items.
    ///
    /// Items are re-sorted newest first regardless of the order given.
    pub fn generate(&self, items: &[Item]) -> String {
        let mut recent = items.to_vec();
        sort_newest_first(&mut recent);
        recent.truncate(FEED_LIMIT);

        debug!(count = recent.len(), limit = FEED_LIMIT, "generating RSS feed");

        let entries: Vec<rss::Item> = recent.iter().map(feed_item).collect();

        let channel = ChannelBuilder::default()
            .title(self.config.rss_title())
            .link(self.config.canonical("/"))
            .description(self.config.rss_description())
            .items(entries)
            .build();

        channel.to_string()
    }

    /// Write `rss.xml` into the output directory.
    pub fn write(&self, items: &[Item], output_dir: &Path) -> Result<()> {
        let path = output_dir.join("rss.xml");
        fs::write(&path, self.generate(items)).map_err(|source| FeedError::Write { path, source })
    }
}

/// Midnight UTC in the RFC 822 style feed readers expect.
pub fn pub_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

fn feed_item(item: &Item) -> rss::Item {
    let guid = GuidBuilder::default()
        .value(item.canonical.clone())
        .permalink(true)
        .build();

    ItemBuilder::default()
        .title(Some(item.title.clone()))
        .link(Some(item.canonical.clone()))
        .guid(Some(guid))
        .pub_date(Some(pub_date(item.date)))
        .description(Some(item.description.clone()))
        .build()
}
