//! Markdown parser using pulldown-cmark.

use std::{collections::HashSet, path::Path};

use huntsman_core::{frontmatter::parse_frontmatter, slug::slugify};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use thiserror::Error;

use crate::{ParsedContent, TocEntry};

/// Paragraph that gets replaced by the table of contents.
const TOC_MARKER: &str = "<p>[TOC]</p>\n";

/// Markdown parsing errors.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// Failed to parse frontmatter.
    #[error("frontmatter error: {0}")]
    Frontmatter(#[from] huntsman_core::CoreError),
}

/// Result type for markdown operations.
pub type Result<T> = std::result::Result<T, MarkdownError>;

/// Markdown renderer with heading anchors and table of contents support.
///
/// Rendering keeps no state between calls.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Parse a document with optional frontmatter.
    pub fn parse(&self, content: &str, path: &Path) -> Result<ParsedContent> {
        let (frontmatter, body) = parse_frontmatter(content, path)?;
        let (html, toc) = self.render(&body);

        Ok(ParsedContent {
            frontmatter,
            html,
            raw: body,
            toc,
        })
    }

    /// Render a Markdown body to HTML.
    pub fn to_html(&self, body: &str) -> String {
        self.render(body).0
    }

    /// Render a Markdown body to HTML and collect its headings.
    pub fn render(&self, body: &str) -> (String, Vec<TocEntry>) {
        let mut events: Vec<Event> = Parser::new_ext(body, self.options).collect();
        let toc = assign_heading_ids(&mut events);

        let mut out = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());

        if out.contains(TOC_MARKER) {
            out = out.replace(TOC_MARKER, &toc_html(&toc));
        }

        (out, toc)
    }
}

/// Give every heading an `id` and return the headings in document order.
///
/// Explicit `{#id}` attributes are kept; other headings get a slug of their
/// text, suffixed `_1`, `_2`, ... when already taken.
fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<TocEntry> {
    let mut toc = Vec::new();
    let mut seen = HashSet::new();

    for start in 0..events.len() {
        let (level, explicit) = match &events[start] {
            Event::Start(Tag::Heading { level, id, .. }) => {
                (*level as u8, id.as_ref().map(ToString::to_string))
            }
            _ => continue,
        };

        let mut text = String::new();
        for event in &events[start + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
        }

        let id = match explicit {
            Some(id) => {
                seen.insert(id.clone());
                id
            }
            None => unique_id(&slugify(&text), &mut seen),
        };

        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[start] {
            *slot = Some(CowStr::from(id.clone()));
        }

        toc.push(TocEntry {
            level,
            text: text.trim().to_string(),
            id,
        });
    }

    toc
}

fn unique_id(base: &str, seen: &mut HashSet<String>) -> String {
    let base = if base.is_empty() { "section" } else { base };
    let mut candidate = base.to_string();
    let mut n = 1;
    while seen.contains(&candidate) {
        candidate = format!("{base}_{n}");
        n += 1;
    }
    seen.insert(candidate.clone());
    candidate
}

/// Nested list of links to the given headings.
pub fn toc_html(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut out = String::from("<div class=\"toc\">\n");
    let mut open: Vec<u8> = Vec::new();

    for entry in entries {
        while open.last().is_some_and(|&level| level > entry.level) {
            out.push_str("</li>\n</ul>\n");
            open.pop();
        }
        match open.last() {
            Some(&level) if level == entry.level => out.push_str("</li>\n"),
            _ => {
                out.push_str("<ul>\n");
                open.push(entry.level);
            }
        }
        out.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            html_escape(&entry.id),
            html_escape(&entry.text)
        ));
    }

    for _ in open {
        out.push_str("</li>\n</ul>\n");
    }
    out.push_str("</div>\n");
    out
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
