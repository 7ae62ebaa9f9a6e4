//! Sitemap generation.
//!
//! Generates the XML sitemap listing every built item.

use std::{fs, io, path::Path};

use huntsman_core::Item;
use tracing::debug;

/// Sitemap protocol namespace.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Sitemap generator.
#[derive(Debug, Default)]
pub struct SitemapGenerator;

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate sitemap XML with one `<url>` per item, in the order given.
    pub fn generate(&self, items: &[Item]) -> String {
        debug!(count = items.len(), "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for item in items {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&item.canonical)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", item.date_iso()));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write `sitemap.xml` into the output directory.
    pub fn write(&self, items: &[Item], output_dir: &Path) -> io::Result<()> {
        fs::write(output_dir.join("sitemap.xml"), self.generate(items))
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use huntsman_core::{ItemDraft, ItemKind, SiteConfig};

    use super::*;

    fn item(kind: ItemKind, slug: &str) -> Item {
        let config = SiteConfig {
            site_url: "https://example.com".to_string(),
            ..SiteConfig::default()
        };
        ItemDraft {
            kind,
            title: slug.to_string(),
            description: String::new(),
            slug: slug.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
        .finish(String::new(), &config)
    }

    #[test]
    fn test_one_url_per_item() {
        let items = vec![
            item(ItemKind::Post, "hello"),
            item(ItemKind::Landing, "roofing"),
        ];
        let xml = SitemapGenerator::new().generate(&items);

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://example.com/blog/hello/</loc>"));
        assert!(xml.contains("<loc>https://example.com/templates/roofing/</loc>"));
        assert!(xml.contains("<lastmod>2024-01-05</lastmod>"));
    }

    #[test]
    fn test_empty_sitemap() {
        let xml = SitemapGenerator::new().generate(&[]);
        assert!(!xml.contains("<url>"));
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
        assert_eq!(escape_xml(r#""'"#), "&quot;&apos;");
    }
}
