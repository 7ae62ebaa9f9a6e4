//! Autopost command - drafts a new blog post

use std::path::PathBuf;

use chrono::Local;
use huntsman_core::{ProjectLayout, SiteConfig};
use huntsman_generator::{AutopostGenerator, autopost::Result};
use rand::{SeedableRng, rngs::StdRng};

/// Run the autopost command.
///
/// Writes one new post into the posts directory and prints its path. A seed
/// makes the choice of industry, angle and intro reproducible.
pub fn run(layout: &ProjectLayout, seed: Option<u64>) -> Result<PathBuf> {
    let config = SiteConfig::read(&layout.config_file)?;
    let generator = AutopostGenerator::load(
        &config,
        &layout.industry_meta_file(),
        &layout.posts_dir,
        Local::now().date_naive(),
    )?;

    let path = match seed {
        Some(seed) => {
            tracing::debug!(seed, "using seeded generator");
            generator.write(&mut StdRng::seed_from_u64(seed))?
        }
        None => generator.write(&mut rand::thread_rng())?,
    };

    println!("Created: {}", path.display());
    Ok(path)
}
