//! Frontmatter parsing for Markdown sources.
//!
//! A document may start with a YAML block fenced by lines that read exactly
//! `---`. Anything else is treated as a plain body with empty metadata.

use std::path::Path;

use chrono::NaiveDate;
use serde_yaml::{Mapping, Value};

use crate::error::{CoreError, Result};

/// Line that opens and closes a frontmatter block.
pub const DELIMITER: &str = "---";

/// The only accepted `date` layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Metadata parsed from a frontmatter block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    values: Mapping,
}

impl Frontmatter {
    /// Wrap an already parsed mapping.
    pub fn from_mapping(values: Mapping) -> Self {
        Self { values }
    }

    /// The raw mapping.
    pub fn mapping(&self) -> &Mapping {
        &self.values
    }

    /// Whether no keys were present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw YAML value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Scalar value for a key rendered as text.
    ///
    /// Returns `None` for missing keys, non-scalar values and strings that are
    /// empty or whitespace-only.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(scalar_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn title(&self) -> Option<String> {
        self.text("title")
    }

    pub fn description(&self) -> Option<String> {
        self.text("description")
    }

    pub fn slug(&self) -> Option<String> {
        self.text("slug")
    }

    pub fn cta_url(&self) -> Option<String> {
        self.text("cta_url")
    }

    pub fn cta_text(&self) -> Option<String> {
        self.text("cta_text")
    }

    /// Publication date, if one is set.
    ///
    /// A present but malformed value is an error; `path` is only used for the
    /// error message.
    pub fn date(&self, path: &Path) -> Result<Option<NaiveDate>> {
        let Some(raw) = self.text("date") else {
            return Ok(None);
        };

        // chrono accepts unpadded fields, so require the canonical form back.
        match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            Ok(date) if date.format(DATE_FORMAT).to_string() == raw => Ok(Some(date)),
            _ => Err(CoreError::date_format(path, raw)),
        }
    }
}

/// Render a YAML scalar the way it was written.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Split a document into its raw frontmatter block and body.
///
/// Returns `None` when the document has fewer than three lines, does not open
/// with a delimiter line, or never closes the block. The body is the lines after
/// the closing delimiter joined with `\n`.
pub fn split_frontmatter(content: &str) -> Option<(String, String)> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 3 || lines[0].trim() != DELIMITER {
        return None;
    }

    let closing = lines
        .iter()
        .skip(1)
        .position(|line| line.trim() == DELIMITER)?
        + 1;

    let block = lines[1..closing].join("\n");
    let body = lines[closing + 1..].join("\n");
    Some((block, body))
}

/// Parse frontmatter and body from a document.
///
/// Documents without a frontmatter block come back unchanged with empty
/// metadata. A block that is not valid YAML, or is YAML but not a mapping, is an
/// error naming `path`.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Frontmatter, String)> {
    let Some((block, body)) = split_frontmatter(content) else {
        return Ok((Frontmatter::default(), content.to_string()));
    };

    let value: Value =
        serde_yaml::from_str(&block).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    let values = match value {
        Value::Null => Mapping::new(),
        Value::Mapping(mapping) => mapping,
        _ => return Err(CoreError::frontmatter(path, "expected a YAML mapping")),
    };

    Ok((Frontmatter::from_mapping(values), body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> (Frontmatter, String) {
        parse_frontmatter(content, Path::new("test.md")).expect("parse")
    }

    #[test]
    fn test_split_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-05\n---\n\n# Hi\n\nBody  text.";

        let (block, body) = split_frontmatter(content).expect("split");
        assert_eq!(block, "title: Hello\ndate: 2024-01-05");
        assert_eq!(body, "\n# Hi\n\nBody  text.");
    }

    #[test]
    fn test_parse_frontmatter_fields() {
        let content = r#"---
title: Hello
description: "A short intro"
date: 2024-01-05
slug: hello-world
cta_url: https://app.example.com/signup
cta_text: Try it
---
# Hi"#;

        let (fm, body) = parse(content);

        assert_eq!(fm.title().as_deref(), Some("Hello"));
        assert_eq!(fm.description().as_deref(), Some("A short intro"));
        assert_eq!(fm.slug().as_deref(), Some("hello-world"));
        assert_eq!(
            fm.cta_url().as_deref(),
            Some("https://app.example.com/signup")
        );
        assert_eq!(fm.cta_text().as_deref(), Some("Try it"));
        assert_eq!(
            fm.date(Path::new("test.md")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(body, "# Hi");
    }

    #[test]
    fn test_no_leading_delimiter_returns_text_unchanged() {
        let content = "# Title\n---\nnot frontmatter\n---\n";
        let (fm, body) = parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_short_document_returns_text_unchanged() {
        let content = "---\n---";
        let (fm, body) = parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_block_returns_text_unchanged() {
        let content = "---\ntitle: Hello\n\n# Body without a closing fence\n";
        let (fm, body) = parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_block_yields_empty_mapping() {
        let (fm, body) = parse("---\n---\nbody line");
        assert!(fm.is_empty());
        assert_eq!(body, "body line");
    }

    #[test]
    fn test_delimiters_are_matched_after_trimming() {
        let (fm, body) = parse("  ---  \ntitle: Spaced\n--- \nbody");
        assert_eq!(fm.title().as_deref(), Some("Spaced"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_blank_values_are_absent() {
        let (fm, _) = parse("---\ntitle: \"   \"\ndescription:\n---\nbody");
        assert!(fm.title().is_none());
        assert!(fm.description().is_none());
    }

    #[test]
    fn test_numeric_scalars_are_stringified() {
        let (fm, _) = parse("---\ntitle: 2024\n---\nbody");
        assert_eq!(fm.title().as_deref(), Some("2024"));
    }

    #[test]
    fn test_malformed_date_is_an_error() {
        let (fm, _) = parse("---\ndate: 2024-13-45\n---\nbody");
        let err = fm.date(Path::new("posts/bad.md")).unwrap_err();
        assert!(matches!(err, CoreError::DateFormat { .. }));
        assert!(err.to_string().contains("posts/bad.md"));
    }

    #[test]
    fn test_unpadded_date_is_an_error() {
        for raw in ["2024-1-5", "2024-01-5", "24-01-05", "2024-01-05T00:00:00"] {
            let (fm, _) = parse(&format!("---\ndate: \"{raw}\"\n---\nbody"));
            let err = fm.date(Path::new("posts/bad.md")).unwrap_err();
            assert!(matches!(err, CoreError::DateFormat { ref value, .. } if value == raw));
        }
    }

    #[test]
    fn test_padded_date_parses() {
        let (fm, _) = parse("---\ndate: 2024-01-05\n---\nbody");
        let date = fm.date(Path::new("test.md")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5));
    }

    #[test]
    fn test_missing_date_is_none() {
        let (fm, _) = parse("---\ntitle: x\n---\nbody");
        assert!(fm.date(Path::new("test.md")).unwrap().is_none());
    }

    #[test]
    fn test_non_mapping_block_is_an_error() {
        let result = parse_frontmatter("---\n- a\n- b\n---\nbody", Path::new("list.md"));
        assert!(matches!(result, Err(CoreError::Frontmatter { .. })));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let result = parse_frontmatter("---\ntitle: [unclosed\n---\nbody", Path::new("bad.md"));
        assert!(matches!(result, Err(CoreError::Frontmatter { .. })));
    }

    #[test]
    fn test_reserialized_metadata_reparses_identically() {
        let content = "---\ntitle: Hello\ntags:\n  - a\n  - b\ndate: 2024-01-05\n---\nFirst line\n\n  indented";
        let (fm, body) = parse(content);

        let yaml = serde_yaml::to_string(fm.mapping()).expect("serialize");
        let rebuilt = format!("---\n{yaml}---\n{body}");
        let (fm2, body2) = parse(&rebuilt);

        assert_eq!(fm, fm2);
        assert_eq!(body, body2);
    }
}
