//! FormHuntsman Generator Library
//!
//! Builds the marketing site from posts and industry data, and drafts new posts.
//!
//! # Modules
//!
//! - [`template`] - Tera template registry with built-in defaults
//! - [`compose`] - Page composition into the base layout
//! - [`posts`] - Blog posts from Markdown sources
//! - [`landing`] - Industry landing pages
//! - [`rss`] - RSS feed generation
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration
//! - [`autopost`] - Post drafting from industry metadata

pub mod assets;
pub mod autopost;
pub mod build;
pub mod compose;
pub mod landing;
pub mod posts;
pub mod robots;
pub mod rss;
pub mod sitemap;
pub mod template;

pub use assets::{AssetError, copy_static};
pub use autopost::{AutopostError, AutopostGenerator, GeneratedPost};
pub use build::{BuildError, BuildStats, Builder};
pub use compose::{PageComposer, PageFields};
pub use landing::{LandingBuilder, LandingData, LandingError};
pub use posts::{PostBuilder, PostError};
pub use self::rss::{FeedError, RssGenerator};
pub use sitemap::SitemapGenerator;
pub use template::{TemplateError, TemplateRegistry};
