//! Robots.txt generation.

use std::{fs, io, path::Path};

use tracing::info;

/// Allow everything and point crawlers at the sitemap.
pub const ROBOTS_TXT: &str = "User-agent: *\nAllow: /\nSitemap: /sitemap.xml\n";

/// Write `robots.txt` into the output directory.
pub fn write_robots(output_dir: &Path) -> io::Result<()> {
    info!("generating robots.txt");
    fs::write(output_dir.join("robots.txt"), ROBOTS_TXT)
}
