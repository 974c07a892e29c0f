//! Rendering of ranked versions.
//!
//! - **JSON** via [`to_json()`] / [`to_json_pretty()`] - the same shape the
//!   `sort` command reads, so output can be fed back in
//! - **Text** via [`to_text()`] - one numbered line per version, best first
//!
//! # Examples
//!
//! ```
//! use rank_lang::{QualifiedVersion, Qualifier};
//! use rank_lang::output::to_text;
//!
//! let versions = vec![
//!     QualifiedVersion::new("1.2.0").with(Qualifier::Build, &["7"]),
//!     QualifiedVersion::new("1.1.0"),
//! ];
//!
//! assert_eq!(to_text(&versions), "1. 1.2.0  BUILD:7\n2. 1.1.0\n");
//! ```

use std::fmt::Write;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::version::QualifiedVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// JSON object for one version: `{"version": ..., "qualifiers": {NAME: [...]}}`
/// with every value's parts joined by a space.
pub fn version_to_json(version: &QualifiedVersion) -> Value {
    let mut qualifiers = Map::new();
    for (qualifier, values) in version.qualifiers() {
        let values = values
            .iter()
            .map(|parts| Value::String(parts.join(" ")))
            .collect();
        qualifiers.insert(qualifier.name().to_string(), Value::Array(values));
    }

    let mut object = Map::new();
    object.insert(
        "version".to_string(),
        Value::String(version.version().to_string()),
    );
    object.insert("qualifiers".to_string(), Value::Object(qualifiers));
    Value::Object(object)
}

pub fn versions_to_json(versions: &[QualifiedVersion]) -> Value {
    Value::Array(versions.iter().map(version_to_json).collect())
}

pub fn to_json(versions: &[QualifiedVersion]) -> String {
    versions_to_json(versions).to_string()
}

pub fn to_json_pretty(versions: &[QualifiedVersion]) -> String {
    // serializing a Value can not fail
    serde_json::to_string_pretty(&versions_to_json(versions)).unwrap_or_default()
}

pub fn to_text(versions: &[QualifiedVersion]) -> String {
    let mut out = String::new();
    for (idx, version) in versions.iter().enumerate() {
        let _ = write!(out, "{}. {}", idx + 1, version.version());

        let tags: Vec<String> = version
            .qualifiers()
            .into_iter()
            .flat_map(|(qualifier, values)| {
                values
                    .iter()
                    .map(move |parts| format!("{}:{}", qualifier, parts.join(" ")))
            })
            .collect();
        if !tags.is_empty() {
            let _ = write!(out, "  {}", tags.join(" "));
        }
        out.push('\n');
    }
    out
}

pub fn render(versions: &[QualifiedVersion], format: OutputFormat, pretty: bool) -> String {
    match (format, pretty) {
        (OutputFormat::Json, false) => to_json(versions),
        (OutputFormat::Json, true) => to_json_pretty(versions),
        (OutputFormat::Text, _) => to_text(versions),
    }
}
