//! JSON -> QualifiedVersion conversion

use std::collections::BTreeMap;

use serde::Deserialize;

use super::CliError;
use crate::{Qualifier, QualifiedVersion};

/// A version as it appears in JSON input. Qualifier values are strings with
/// their parts separated by whitespace, e.g. `"EAP 7.4"`.
#[derive(Debug, Deserialize)]
struct RawVersion {
    version: String,
    #[serde(default)]
    qualifiers: BTreeMap<String, Vec<String>>,
}

/// Convert a JSON array of versions, validating every qualifier value
pub fn json_to_versions(json: serde_json::Value) -> Result<Vec<QualifiedVersion>, CliError> {
    let raw: Vec<RawVersion> = serde_json::from_value(json)?;
    raw.into_iter().map(raw_to_version).collect()
}

fn raw_to_version(raw: RawVersion) -> Result<QualifiedVersion, CliError> {
    let mut version = QualifiedVersion::new(raw.version);

    for (name, values) in raw.qualifiers {
        let qualifier = Qualifier::from_name(&name).ok_or_else(|| {
            CliError::InvalidVersion(format!(
                "unknown qualifier '{}' on {}",
                name,
                version.version()
            ))
        })?;

        for value in values {
            // one-part values keep inner spaces, like quoted values in rules
            let parts: Vec<&str> = if qualifier.arity() == 1 {
                vec![value.trim()]
            } else {
                value.split_whitespace().collect()
            };
            qualifier.validate(&parts).map_err(|e| {
                CliError::InvalidVersion(format!("{} ({})", e, version.version()))
            })?;
            version.add(qualifier, &parts);
        }
    }

    Ok(version)
}
