//! End-to-end tests for the site build.
//!
//! Each test lays out a small project in a temporary directory and runs the
//! whole pipeline against it.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use huntsman_core::{ProjectLayout, SiteConfig};
use huntsman_generator::{AutopostGenerator, BuildError, Builder};
use rand::{SeedableRng, rngs::StdRng};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
}

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// A project with one post, one industry and one static file.
fn sample_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "site.config.yml",
        "site_url: https://example.com\nsite_name: Example\n",
    );
    write(
        root,
        "content/posts/hello.md",
        "---\ntitle: Hello\ndate: 2024-01-05\n---\n# Hi",
    );
    write(root, "data/industries.txt", "# industries\nRoofing\n");
    write(root, "static/assets/site.css", "body { margin: 0 }");

    dir
}

fn builder(root: &Path) -> Builder {
    let layout = ProjectLayout::new(root);
    let config = SiteConfig::load(&layout.config_file).expect("config should load");
    Builder::new(config, layout).with_today(today())
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap_or_else(|e| panic!("{rel}: {e}"))
}

#[test]
fn test_full_build() {
    let project = sample_project();
    let root = project.path();

    let stats = builder(root).build().expect("build should succeed");

    assert_eq!(stats.posts, 1);
    assert_eq!(stats.landing_pages, 1);
    assert_eq!(stats.assets, 1);

    let post = read(root, "_site/blog/hello/index.html");
    assert!(post.contains("<h1 id=\"hi\">Hi</h1>"));
    assert!(post.contains(r#"<link rel="canonical" href="https://example.com/blog/hello/">"#));
    assert!(post.contains("<title>Hello | Example</title>"));

    let landing = read(root, "_site/templates/roofing/index.html");
    for field in ["Name", "Phone", "Email (optional)", "Service needed", "ZIP code"] {
        assert!(landing.contains(&format!("<li>{field}</li>")), "{field}");
    }
    assert!(landing.contains("2025-02-01"));

    let index = read(root, "_site/index.html");
    assert!(index.contains(r#"href="https://example.com/blog/hello/""#));
    assert!(index.contains("Roofing form templates"));
    assert!(index.contains("&copy; 2025 Example"));

    assert_eq!(
        read(root, "_site/robots.txt"),
        "User-agent: *\nAllow: /\nSitemap: /sitemap.xml\n"
    );
    assert_eq!(read(root, "_site/assets/site.css"), "body { margin: 0 }");
}

#[test]
fn test_sitemap_and_feed() {
    let project = sample_project();
    let root = project.path();
    builder(root).build().unwrap();

    let sitemap = read(root, "_site/sitemap.xml");
    assert_eq!(sitemap.matches("<url>").count(), 2);
    assert!(sitemap.contains("<loc>https://example.com/blog/hello/</loc>"));
    assert!(sitemap.contains("<lastmod>2024-01-05</lastmod>"));
    assert!(sitemap.contains("<loc>https://example.com/templates/roofing/</loc>"));

    let feed = read(root, "_site/rss.xml");
    let channel = rss::Channel::read_from(feed.as_bytes()).unwrap();
    assert_eq!(channel.title(), "Example");
    assert_eq!(channel.link(), "https://example.com/");

    let titles: Vec<_> = channel.items().iter().filter_map(|i| i.title()).collect();
    assert_eq!(titles, ["Roofing form templates", "Hello"]);
    assert_eq!(
        channel.items()[1].pub_date(),
        Some("Fri, 05 Jan 2024 00:00:00 GMT")
    );
}

#[test]
fn test_build_cleans_stale_output() {
    let project = sample_project();
    let root = project.path();
    write(root, "_site/old/index.html", "stale");

    builder(root).build().unwrap();

    assert!(!root.join("_site/old").exists());
    assert!(root.join("_site/index.html").is_file());
}

#[test]
fn test_output_override() {
    let project = sample_project();
    let root = project.path();
    let out = root.join("public");

    builder(root).with_output_dir(&out).build().unwrap();

    assert!(out.join("blog/hello/index.html").is_file());
    assert!(!root.join("_site").exists());
}

#[test]
fn test_duplicate_url_rejected_before_writing() {
    let project = sample_project();
    let root = project.path();
    write(root, "_site/keep.txt", "previous build");
    write(
        root,
        "content/posts/hello-again.md",
        "---\ntitle: Hello again\nslug: hello\n---\nSecond",
    );

    let err = builder(root).build().unwrap_err();

    assert!(matches!(err, BuildError::DuplicateUrl { ref url, .. } if url == "/blog/hello/"));
    assert_eq!(read(root, "_site/keep.txt"), "previous build");
}

#[test]
fn test_malformed_date_aborts_build() {
    let project = sample_project();
    let root = project.path();
    write(
        root,
        "content/posts/zzz.md",
        "---\ntitle: Broken\ndate: January 5th\n---\nx",
    );

    let err = builder(root).build().unwrap_err();

    assert!(err.to_string().contains("January 5th"));
    assert!(!root.join("_site").exists());
}

#[test]
fn test_missing_site_url_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "site.config.yml", "site_name: Example\n");

    assert!(SiteConfig::load(&config).is_err());
}

#[test]
fn test_landing_metadata_and_use_cases() {
    let project = sample_project();
    let root = project.path();
    write(root, "data/industries.txt", "Roofing\nAuto Repair\n");
    write(root, "data/use_cases.txt", "Quote request\nInspection booking\n");
    write(
        root,
        "data/industry_fields.yml",
        "roofing:\n  fields: [Roof type, Address]\n  questions: [Is there an active leak?]\n",
    );

    builder(root).build().unwrap();

    let roofing = read(root, "_site/templates/roofing/index.html");
    assert!(roofing.contains("<li>Roof type</li>"));
    assert!(!roofing.contains("<li>ZIP code</li>"));
    assert!(roofing.contains("<li>Is there an active leak?</li>"));
    assert!(roofing.contains("<li>Quote request</li>"));

    let auto = read(root, "_site/templates/auto-repair/index.html");
    assert!(auto.contains("<li>ZIP code</li>"));
    assert!(auto.contains("<li>Inspection booking</li>"));
}

#[test]
fn test_template_override() {
    let project = sample_project();
    let root = project.path();
    write(
        root,
        "src/templates/post.html",
        "<article class=\"custom\">{{ content | safe }}<a href=\"{{ cta_url }}\">{{ cta_text }}</a></article>",
    );

    builder(root).build().unwrap();

    let post = read(root, "_site/blog/hello/index.html");
    assert!(post.contains("<article class=\"custom\">"));
    assert!(post.contains("<title>Hello | Example</title>"));
}

#[test]
fn test_autopost_output_builds() {
    let project = sample_project();
    let root = project.path();
    write(
        root,
        "data/industry_fields.yml",
        "plumbing:\n  fields: [Name, Phone, Issue]\n",
    );

    let layout = ProjectLayout::new(root);
    let config = SiteConfig::read(&layout.config_file).unwrap();
    let generator = AutopostGenerator::load(
        &config,
        &layout.industry_meta_file(),
        &layout.posts_dir,
        today(),
    )
    .unwrap();
    let path = generator.write(&mut StdRng::seed_from_u64(3)).unwrap();
    assert!(path.starts_with(&layout.posts_dir));

    let stats = builder(root).build().unwrap();
    assert_eq!(stats.posts, 2);

    let slug = path.file_stem().unwrap().to_string_lossy().into_owned();
    assert!(slug.starts_with("plumbing-"));

    let sitemap = read(root, "_site/sitemap.xml");
    assert!(sitemap.contains("<lastmod>2025-02-01</lastmod>"));
}
