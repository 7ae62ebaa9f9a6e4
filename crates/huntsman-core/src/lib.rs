//! FormHuntsman Core Library
//!
//! Configuration, content model, frontmatter parsing and data loading for the
//! FormHuntsman marketing site generator.

pub mod config;
pub mod content;
pub mod data;
pub mod error;
pub mod frontmatter;
pub mod layout;
pub mod slug;

pub use config::SiteConfig;
pub use content::{Item, ItemDraft, ItemKind, sort_newest_first};
pub use data::{IndustryCatalog, IndustryMeta, first_non_empty, load_list};
pub use error::{CoreError, Result};
pub use frontmatter::{Frontmatter, parse_frontmatter};
pub use layout::ProjectLayout;
