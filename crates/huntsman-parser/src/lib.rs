//! FormHuntsman Parser Library
//!
//! Markdown to HTML rendering with frontmatter, heading anchors and an
//! optional table of contents.

pub mod markdown;

use huntsman_core::Frontmatter;
pub use markdown::{MarkdownError, MarkdownParser, toc_html};

/// A parsed Markdown document.
#[derive(Debug, Clone)]
pub struct ParsedContent {
    /// Frontmatter mapping, empty when the document has none.
    pub frontmatter: Frontmatter,

    /// Rendered HTML body.
    pub html: String,

    /// Markdown body with the frontmatter block removed.
    pub raw: String,

    /// Headings in document order.
    pub toc: Vec<TocEntry>,
}

/// A heading collected while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level, 1 through 6.
    pub level: u8,

    /// Plain heading text.
    pub text: String,

    /// Anchor id written on the heading element.
    pub id: String,
}
