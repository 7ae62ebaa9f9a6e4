//! Directory layout of a site project.

use std::path::{Path, PathBuf};

use crate::config::SiteConfig;

/// Default config file name inside the project root.
pub const CONFIG_FILE: &str = "site.config.yml";

/// Paths of every input and output location, resolved against a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub posts_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl ProjectLayout {
    /// Conventional layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_file: root.join(CONFIG_FILE),
            posts_dir: root.join("content").join("posts"),
            templates_dir: root.join("src").join("templates"),
            data_dir: root.join("data"),
            static_dir: root.join("static"),
            root,
        }
    }

    /// Use a different configuration file.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = path.into();
        self
    }

    pub fn industries_file(&self) -> PathBuf {
        self.data_dir.join("industries.txt")
    }

    pub fn use_cases_file(&self) -> PathBuf {
        self.data_dir.join("use_cases.txt")
    }

    pub fn industry_meta_file(&self) -> PathBuf {
        self.data_dir.join("industry_fields.yml")
    }

    /// Output directory from the config, resolved against the root unless absolute.
    pub fn output_dir(&self, config: &SiteConfig) -> PathBuf {
        let out = Path::new(&config.output_dir);
        if out.is_absolute() {
            out.to_path_buf()
        } else {
            self.root.join(out)
        }
    }
}
