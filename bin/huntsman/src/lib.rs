//! FormHuntsman CLI Library
//!
//! Command implementations behind the `huntsman` binary, exposed as a library
//! so they can be driven from tests and scripts.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, autopost)
//!
//! # Example
//!
//! ```no_run
//! use huntsman::{ProjectLayout, cmd};
//!
//! // Build the site in the current directory
//! cmd::build::run(&ProjectLayout::new("."), None).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use huntsman_core::{ProjectLayout, SiteConfig};
pub use huntsman_generator::{BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// huntsman::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
