//! FormHuntsman CLI
//!
//! Builds the FormHuntsman marketing site and drafts new blog posts.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use huntsman::ProjectLayout;

/// Command-line interface for the site builder.
#[derive(Parser)]
#[command(
    name = "huntsman",
    version,
    about = "Static site builder for the FormHuntsman marketing site"
)]
struct Cli {
    /// Project root holding content/, data/, static/ and src/templates/
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Path to configuration file [default: <root>/site.config.yml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn layout(&self) -> ProjectLayout {
        let layout = ProjectLayout::new(&self.root);
        match &self.config {
            Some(config) => layout.with_config_file(config),
            None => layout,
        }
    }
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the site into the output directory
    Build {
        /// Output directory, overriding `output_dir` from the config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Draft a new blog post from industry metadata
    Autopost {
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    huntsman::init_tracing(cli.verbose);
    let layout = cli.layout();

    match cli.command {
        Commands::Build { output } => {
            huntsman::cmd::build::run(&layout, output.as_deref())?;
        }
        Commands::Autopost { seed } => {
            if let Err(e) = huntsman::cmd::autopost::run(&layout, seed) {
                eprintln!("autopost failed: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
