//! Industry landing pages.
//!
//! One page per line of `industries.txt`, filled from optional per-industry
//! metadata with fallbacks so no page ever renders an empty section.

use chrono::NaiveDate;
use huntsman_core::{
    CoreError, IndustryCatalog, IndustryMeta, Item, ItemDraft, ItemKind, ProjectLayout, SiteConfig,
    first_non_empty, load_list, slug::slugify,
};
use huntsman_parser::MarkdownParser;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    compose::{PageComposer, PageFields},
    template::TemplateError,
};

/// Fields suggested when an industry has none of its own.
pub const DEFAULT_FIELDS: &[&str] = &[
    "Name",
    "Phone",
    "Email (optional)",
    "Service needed",
    "ZIP code",
];

/// Questions suggested when an industry has none of its own.
pub const DEFAULT_QUESTIONS: &[&str] = &[
    "What do you need help with?",
    "When do you need this?",
    "Where are you located?",
];

/// Test ideas suggested when neither the industry nor the use-case list has any.
pub const DEFAULT_TESTS: &[&str] = &[
    "Short form vs long form",
    "CTA wording variations",
    "Phone-first vs email-first",
];

/// Use cases borrowed as test ideas.
const USE_CASE_LIMIT: usize = 6;

/// Call to action on every landing page.
pub const LANDING_CTA_TEXT: &str = "Open FormHuntsman and launch a form experiment.";

const CLOSING_PARAGRAPH: &str =
    "Use FormHuntsman to run A/B tests on your form CTAs and layouts without rebuilding your site.";

/// Landing page building errors.
#[derive(Debug, Error)]
pub enum LandingError {
    /// A list file could not be read.
    #[error(transparent)]
    Data(#[from] CoreError),

    /// Industry name has no characters usable in a URL.
    #[error("industry {industry:?} has no characters usable in a URL")]
    EmptySlug { industry: String },

    /// Page composition failed.
    #[error("failed to compose landing page for {industry:?}: {source}")]
    Compose {
        industry: String,
        #[source]
        source: TemplateError,
    },
}

/// Result type for landing page operations.
pub type Result<T> = std::result::Result<T, LandingError>;

/// Inputs for landing pages, read from the data directory.
#[derive(Debug, Clone, Default)]
pub struct LandingData {
    pub industries: Vec<String>,
    pub use_cases: Vec<String>,
    pub catalog: IndustryCatalog,
}

impl LandingData {
    /// Read the data files of a project. Every file is optional.
    pub fn load(layout: &ProjectLayout) -> Result<Self> {
        Ok(Self {
            industries: load_list(&layout.industries_file())?,
            use_cases: load_list(&layout.use_cases_file())?,
            catalog: IndustryCatalog::load(&layout.industry_meta_file()),
        })
    }
}

/// The three lists shown on a landing page, after fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingLists {
    pub fields: Vec<String>,
    pub questions: Vec<String>,
    pub tests: Vec<String>,
}

impl LandingLists {
    /// Resolve each list to the first non-empty source.
    ///
    /// Tests fall back to the first six use cases before the built-in ideas.
    pub fn resolve(meta: Option<&IndustryMeta>, use_cases: &[String]) -> Self {
        let empty = IndustryMeta::default();
        let meta = meta.unwrap_or(&empty);
        let use_cases = &use_cases[..use_cases.len().min(USE_CASE_LIMIT)];

        Self {
            fields: first_non_empty(&[meta.fields.as_slice()], DEFAULT_FIELDS),
            questions: first_non_empty(&[meta.questions.as_slice()], DEFAULT_QUESTIONS),
            tests: first_non_empty(&[meta.tests.as_slice(), use_cases], DEFAULT_TESTS),
        }
    }
}

/// Page title for an industry.
pub fn landing_title(industry: &str) -> String {
    format!("{industry} form templates")
}

/// Meta description for an industry.
pub fn landing_description(industry: &str) -> String {
    format!(
        "Ready-to-copy form templates for {industry} teams. Examples, fields to include, and a fast way to test changes."
    )
}

/// Dash bullet list, one item per line.
pub fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markdown body of a landing page.
pub fn landing_body(description: &str, lists: &LandingLists) -> String {
    format!(
        "## What you will find here\n\n{description}\n\n\
         ## Recommended form fields\n\n{}\n\n\
         ## Example questions to include\n\n{}\n\n\
         ## A/B test ideas worth trying\n\n{}\n\n\
         ## Want to test faster?\n\n{CLOSING_PARAGRAPH}",
        bullets(&lists.fields),
        bullets(&lists.questions),
        bullets(&lists.tests),
    )
}

/// Builds one landing page item per industry.
#[derive(Debug)]
pub struct LandingBuilder<'a> {
    config: &'a SiteConfig,
    composer: &'a PageComposer<'a>,
    parser: MarkdownParser,
    today: NaiveDate,
}

impl<'a> LandingBuilder<'a> {
    /// Create a builder; every page is dated `today`.
    pub fn new(config: &'a SiteConfig, composer: &'a PageComposer<'a>, today: NaiveDate) -> Self {
        Self {
            config,
            composer,
            parser: MarkdownParser::new(),
            today,
        }
    }

    /// Build pages in the order industries are listed.
    pub fn build(&self, data: &LandingData) -> Result<Vec<Item>> {
        info!(count = data.industries.len(), "building landing pages");

        data.industries
            .iter()
            .map(|industry| self.build_page(industry, data))
            .collect()
    }

    /// Build the page for a single industry.
    pub fn build_page(&self, industry: &str, data: &LandingData) -> Result<Item> {
        let slug = slugify(industry);
        if slug.is_empty() {
            return Err(LandingError::EmptySlug {
                industry: industry.to_string(),
            });
        }
        let lists = LandingLists::resolve(data.catalog.get(&slug), &data.use_cases);

        let title = landing_title(industry);
        let description = landing_description(industry);
        let content = self.parser.to_html(&landing_body(&description, &lists));
        let cta_url = self.config.cta_url();

        let draft = ItemDraft {
            kind: ItemKind::Landing,
            title,
            description,
            slug,
            date: self.today,
        };
        let canonical = self.config.canonical(&draft.url());

        let html = self
            .composer
            .compose(&PageFields {
                title: &draft.title,
                description: &draft.description,
                date: self.today,
                content: &content,
                canonical: &canonical,
                cta_url: &cta_url,
                cta_text: LANDING_CTA_TEXT,
            })
            .map_err(|source| LandingError::Compose {
                industry: industry.to_string(),
                source,
            })?;

        debug!(industry, url = %draft.url(), "built landing page");
        Ok(draft.finish(html, self.config))
    }
}
