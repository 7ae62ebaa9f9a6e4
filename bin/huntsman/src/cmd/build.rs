//! Build command - generates the static site

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use huntsman_core::{ProjectLayout, SiteConfig};
use huntsman_generator::{BuildStats, Builder};

/// Run the build command.
///
/// Loads the configuration (with `FORMHUNTSMAN__*` environment overrides),
/// rebuilds the output directory and prints a one-line summary.
pub fn run(layout: &ProjectLayout, output: Option<&Path>) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(root = ?layout.root, config = ?layout.config_file, ?output, "Starting build");

    let config = SiteConfig::load_with_env(&layout.config_file)
        .wrap_err_with(|| format!("Failed to load {}", layout.config_file.display()))?;
    tracing::debug!(?config, "Loaded configuration");

    let mut builder = Builder::new(config, layout.clone());
    if let Some(dir) = output {
        builder = builder.with_output_dir(resolve(layout, dir));
    }

    let stats = builder.build().wrap_err("Build failed")?;

    println!(
        "Built {} posts and {} landing pages -> {}",
        stats.posts,
        stats.landing_pages,
        builder.output_dir().display()
    );

    tracing::info!(?stats, duration = ?start.elapsed(), "Build completed successfully");

    Ok(stats)
}

/// Relative output paths are taken from the project root.
fn resolve(layout: &ProjectLayout, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        layout.root.join(dir)
    }
}
