//! Frontmatter parsing and attribute injection.
//!
//! Index documents can carry a `---` delimited YAML block at the top. Configured
//! attributes are overlaid onto that block on every reconciliation; configured
//! values win on key collisions and the block keeps the insertion order of the
//! merged map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::Result;

/// A static key/value pair injected into every index document's frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontmatterAttribute {
    /// Property name
    pub key: String,
    /// Property value, read as a YAML scalar (`true`, `3`, `text`)
    pub value: String,
}

impl FrontmatterAttribute {
    /// Create an attribute.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    fn yaml_value(&self) -> Value {
        serde_yaml::from_str(&self.value).unwrap_or_else(|_| Value::String(self.value.clone()))
    }
}

/// Result of parsing a markdown file with frontmatter.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// The parsed frontmatter as an ordered map.
    pub frontmatter: IndexMap<String, Value>,
    /// The body content after the frontmatter.
    pub body: String,
}

/// Split content into (frontmatter block, body), if it starts with a frontmatter block.
fn split(content: &str) -> Option<(&str, &str)> {
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    // Empty block
    if let Some(body) = rest.strip_prefix("---\n") {
        return Some(("", body));
    }

    if let Some(idx) = rest.find("\n---\n") {
        return Some((&rest[..idx], &rest[idx + 5..]));
    }
    if let Some(idx) = rest.find("\n---\r\n") {
        return Some((&rest[..idx], &rest[idx + 6..]));
    }
    rest.strip_suffix("\n---").map(|block| (block, ""))
}

/// Line-based fallback for blocks that are not valid YAML: `key: value`, first colon wins.
fn parse_key_values(block: &str) -> IndexMap<String, Value> {
    block
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| {
            (
                key.trim().to_string(),
                Value::String(value.trim().to_string()),
            )
        })
        .collect()
}

/// Parse frontmatter and body, returning empty frontmatter if none exists.
///
/// Never fails: a block that is not valid YAML is read line by line instead.
pub fn parse_or_empty(content: &str) -> ParsedFile {
    let Some((block, body)) = split(content) else {
        return ParsedFile {
            frontmatter: IndexMap::new(),
            body: content.to_string(),
        };
    };

    let frontmatter = if block.trim().is_empty() {
        IndexMap::new()
    } else {
        match serde_yaml::from_str::<IndexMap<String, Value>>(block) {
            Ok(map) => map,
            Err(err) => {
                log::debug!("Frontmatter is not valid YAML ({}), reading key/value lines", err);
                parse_key_values(block)
            }
        }
    };

    ParsedFile {
        frontmatter,
        body: body.to_string(),
    }
}

/// Serialize frontmatter and body back to markdown content.
pub fn serialize(frontmatter: &IndexMap<String, Value>, body: &str) -> Result<String> {
    if frontmatter.is_empty() {
        return Ok(format!("---\n---\n{}", body));
    }
    let yaml_str = serde_yaml::to_string(frontmatter)?;
    Ok(format!("---\n{}---\n{}", yaml_str, body))
}

/// Overlay `attributes` onto the document's frontmatter.
///
/// With no attributes the content is returned untouched.
pub fn apply_attributes(content: &str, attributes: &[FrontmatterAttribute]) -> Result<String> {
    if attributes.is_empty() {
        return Ok(content.to_string());
    }

    let mut parsed = parse_or_empty(content);
    for attribute in attributes {
        parsed
            .frontmatter
            .insert(attribute.key.clone(), attribute.yaml_value());
    }
    serialize(&parsed.frontmatter, &parsed.body)
}
