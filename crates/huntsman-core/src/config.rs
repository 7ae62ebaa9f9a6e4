//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Call-to-action target used when neither `app_url` nor `site_url` is set.
pub const DEFAULT_APP_URL: &str = "https://formhuntsman.com/";

/// Tagline shown in the site header when none is configured.
pub const DEFAULT_TAGLINE: &str = "A lightweight library of A/B form tests and templates.";

/// Prefix for environment overrides, e.g. `FORMHUNTSMAN__SITE_URL`.
pub const ENV_PREFIX: &str = "FORMHUNTSMAN";

/// Site configuration, read once per run and never written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute base URL for the site (e.g., "https://example.com").
    #[serde(default)]
    pub site_url: String,

    /// Human readable site name.
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// URL of the product app the call-to-action points at.
    #[serde(default)]
    pub app_url: Option<String>,

    /// Page language code.
    #[serde(default = "default_language")]
    pub language: String,

    /// Author meta tag; falls back to the site name.
    #[serde(default)]
    pub author: Option<String>,

    /// Output directory, relative to the project root.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// RSS channel title; falls back to the site name.
    #[serde(default)]
    pub rss_title: Option<String>,

    /// RSS channel description.
    #[serde(default)]
    pub rss_description: Option<String>,

    /// Tagline rendered by the base template.
    #[serde(default = "default_tagline")]
    pub tagline: String,
}

fn default_site_name() -> String {
    "FormHuntsman".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_output_dir() -> String {
    "_site".to_string()
}

fn default_tagline() -> String {
    DEFAULT_TAGLINE.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            site_name: default_site_name(),
            app_url: None,
            language: default_language(),
            author: None,
            output_dir: default_output_dir(),
            rss_title: None,
            rss_description: None,
            tagline: default_tagline(),
        }
    }
}

/// Returns the trimmed value if it holds anything besides whitespace.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl SiteConfig {
    /// Load and validate configuration from a YAML or TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file without validating it.
    ///
    /// The format is chosen by extension: `.toml` is TOML, anything else YAML.
    /// An empty file yields the defaults.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::read(path, e))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let parsed = if is_toml {
            toml::from_str(&content).map_err(|e| {
                CoreError::config_with_source(
                    format!("Failed to parse config file: {}", path.display()),
                    e,
                )
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                CoreError::config_with_source(
                    format!("Failed to parse config file: {}", path.display()),
                    e,
                )
            })?
        };

        Ok(parsed)
    }

    /// Load configuration with `FORMHUNTSMAN__*` environment overrides layered on top.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let config: SiteConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let site_url = self.site_url.trim();
        if site_url.is_empty() {
            return Err(CoreError::config("site_url is required in site.config.yml"));
        }

        if !(site_url.starts_with("http://") || site_url.starts_with("https://")) {
            return Err(CoreError::config(format!(
                "site_url must be an absolute http(s) URL, got {site_url:?}"
            )));
        }

        if self.site_name.trim().is_empty() {
            return Err(CoreError::config("site_name cannot be empty"));
        }

        if site_url.ends_with('/') {
            tracing::warn!("site_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Site URL without any trailing slash.
    pub fn base_url(&self) -> &str {
        self.site_url.trim().trim_end_matches('/')
    }

    /// Absolute URL for a site-relative path such as `/blog/hello/`.
    pub fn canonical(&self, url: &str) -> String {
        format!("{}{url}", self.base_url())
    }

    /// Where call-to-action buttons point: app URL, then site URL, then the product default.
    pub fn cta_url(&self) -> String {
        non_blank(self.app_url.as_deref())
            .or_else(|| non_blank(Some(self.site_url.as_str())))
            .unwrap_or(DEFAULT_APP_URL)
            .to_string()
    }

    /// Author meta value.
    pub fn author(&self) -> &str {
        non_blank(self.author.as_deref()).unwrap_or(self.site_name.as_str())
    }

    /// RSS channel title.
    pub fn rss_title(&self) -> &str {
        non_blank(self.rss_title.as_deref()).unwrap_or(self.site_name.as_str())
    }

    /// RSS channel description.
    pub fn rss_description(&self) -> &str {
        self.rss_description.as_deref().unwrap_or_default()
    }
}
