//! Optional list and industry data files.
//!
//! None of these files are required. A missing file reads as empty data, and a
//! malformed industry file is logged and treated the same way.

use std::{fs, io::ErrorKind, path::Path};

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::{
    error::{CoreError, Result},
    frontmatter::scalar_to_string,
};

/// Read a one-entry-per-line list file.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
/// A missing file yields an empty list.
pub fn load_list(path: &Path) -> Result<Vec<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "list file not found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(CoreError::read(path, e)),
    };

    Ok(parse_list(&content))
}

/// Parse list file content.
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Optional content overrides for one industry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndustryMeta {
    /// Suggested form fields.
    pub fields: Vec<String>,
    /// Example questions.
    pub questions: Vec<String>,
    /// A/B test ideas.
    pub tests: Vec<String>,
}

impl IndustryMeta {
    fn from_mapping(mapping: &Mapping) -> Self {
        Self {
            fields: string_list(mapping.get("fields")),
            questions: string_list(mapping.get("questions")),
            tests: string_list(mapping.get("tests")),
        }
    }
}

/// Scalars of a YAML sequence as trimmed, non-blank strings.
fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Sequence(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(scalar_to_string)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Industry metadata keyed by industry slug, in file order.
#[derive(Debug, Clone, Default)]
pub struct IndustryCatalog {
    entries: Vec<(String, IndustryMeta)>,
}

impl IndustryCatalog {
    /// Load the catalog, treating a missing or unreadable file as empty.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "ignoring unreadable industry metadata");
                }
                return Self::default();
            }
        };

        Self::from_yaml_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring malformed industry metadata");
            Self::default()
        })
    }

    /// Parse a YAML document mapping slugs to metadata.
    ///
    /// Entries whose value is not a mapping are skipped. A document that is
    /// empty or not a mapping yields an empty catalog.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        let Value::Mapping(root) = value else {
            return Ok(Self::default());
        };

        let entries = root
            .iter()
            .filter_map(|(key, meta)| {
                let slug = scalar_to_string(key)?;
                match meta {
                    Value::Mapping(mapping) => Some((slug, IndustryMeta::from_mapping(mapping))),
                    _ => {
                        debug!(slug = %slug, "skipping industry entry that is not a mapping");
                        None
                    }
                }
            })
            .collect();

        Ok(Self { entries })
    }

    /// Metadata for an industry slug.
    pub fn get(&self, slug: &str) -> Option<&IndustryMeta> {
        self.entries
            .iter()
            .find(|(key, _)| key == slug)
            .map(|(_, meta)| meta)
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[(String, IndustryMeta)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// First non-empty candidate list, or `default` when every candidate is empty.
pub fn first_non_empty(candidates: &[&[String]], default: &[&str]) -> Vec<String> {
    candidates
        .iter()
        .find(|list| !list.is_empty())
        .map(|list| list.to_vec())
        .unwrap_or_else(|| default.iter().map(|s| (*s).to_string()).collect())
}
