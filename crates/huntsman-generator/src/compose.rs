//! Page composition.
//!
//! Every page is an inner template rendered into the `base.html` shell. The
//! composer only substitutes values; it never decides what a page contains.

use chrono::{Datelike, NaiveDate};
use huntsman_core::SiteConfig;
use serde::Serialize;

use crate::template::{
    BASE_TEMPLATE, INDEX_TEMPLATE, POST_TEMPLATE, Result, TemplateRegistry,
};

/// Semantic fields of a single article page.
#[derive(Debug, Clone)]
pub struct PageFields<'a> {
    pub title: &'a str,
    /// May be empty, in which case the title is used for the meta description.
    pub description: &'a str,
    pub date: NaiveDate,
    /// Rendered Markdown body.
    pub content: &'a str,
    pub canonical: &'a str,
    pub cta_url: &'a str,
    pub cta_text: &'a str,
}

/// Values the `base.html` shell expects.
#[derive(Debug, Serialize)]
struct BaseContext<'a> {
    lang: &'a str,
    title: String,
    description: &'a str,
    canonical: &'a str,
    base_url: &'a str,
    site_name: &'a str,
    tagline: &'a str,
    year: i32,
    author: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct PostContext<'a> {
    title: &'a str,
    date: String,
    content: &'a str,
    cta_url: &'a str,
    cta_text: &'a str,
}

/// A post as listed on the site root.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub description: String,
    pub url: String,
    pub date: String,
}

/// A landing page as listed on the site root.
#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
struct IndexContext<'a> {
    posts: &'a [PostSummary],
    pseo_pages: &'a [PageLink],
    base_url: &'a str,
}

/// Title of the site root page, before the site name is applied.
pub const INDEX_TITLE_SUFFIX: &str = "Form experimentation made simple";

/// Meta description of the site root page.
pub const INDEX_DESCRIPTION: &str =
    "A library of form tests, templates, and conversion ideas you can ship fast.";

/// Fills templates with item fields and site settings.
#[derive(Debug)]
pub struct PageComposer<'a> {
    templates: &'a TemplateRegistry,
    config: &'a SiteConfig,
    year: i32,
}

impl<'a> PageComposer<'a> {
    /// Create a composer; `today` supplies the footer year.
    pub fn new(templates: &'a TemplateRegistry, config: &'a SiteConfig, today: NaiveDate) -> Self {
        Self {
            templates,
            config,
            year: today.year(),
        }
    }

    /// Compose an article page: `post.html` inside `base.html`.
    pub fn compose(&self, page: &PageFields<'_>) -> Result<String> {
        let body = self.templates.render(
            POST_TEMPLATE,
            &PostContext {
                title: page.title,
                date: page.date.format("%Y-%m-%d").to_string(),
                content: page.content,
                cta_url: page.cta_url,
                cta_text: page.cta_text,
            },
        )?;

        let description = if page.description.is_empty() {
            page.title
        } else {
            page.description
        };

        self.wrap(
            format!("{} | {}", page.title, self.config.site_name),
            description,
            page.canonical,
            &body,
        )
    }

    /// Compose the site root page.
    pub fn compose_index(&self, posts: &[PostSummary], pseo_pages: &[PageLink]) -> Result<String> {
        let body = self.templates.render(
            INDEX_TEMPLATE,
            &IndexContext {
                posts,
                pseo_pages,
                base_url: self.config.base_url(),
            },
        )?;

        self.wrap(
            format!("{} | {INDEX_TITLE_SUFFIX}", self.config.site_name),
            INDEX_DESCRIPTION,
            &self.config.canonical("/"),
            &body,
        )
    }

    fn wrap(&self, title: String, description: &str, canonical: &str, body: &str) -> Result<String> {
        self.templates.render(
            BASE_TEMPLATE,
            &BaseContext {
                lang: &self.config.language,
                title,
                description,
                canonical,
                base_url: self.config.base_url(),
                site_name: &self.config.site_name,
                tagline: &self.config.tagline,
                year: self.year,
                author: self.config.author(),
                body,
            },
        )
    }
}
