//! Rule configuration.
//!
//! A configuration file is a JSON object naming the filter, the rank rules
//! and optionally the rebuild suffix used to order version strings:
//!
//! ```json
//! {
//!   "predicate": "PRODUCT:EAP, PRODUCT:RHSSO",
//!   "ranks": ["QUALITY:RELEASED", "TYPE:jar SORT_BY SUFFIX-VERSION"],
//!   "suffix": "redhat"
//! }
//! ```
//!
//! Every key is optional. Values given on the command line take precedence
//! over the file, see [`RankingConfig::merge`].

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::{
    alignment::{AlignmentPredicate, AlignmentRanking},
    error::ValidationError,
    version::{StringComparator, natural_order, suffix_version_comparator},
};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid rule: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Filter applied before ranking; none keeps every version
    pub predicate: Option<String>,

    /// Rank rules, most significant first
    pub ranks: Vec<String>,

    /// Rebuild suffix for `SUFFIX-VERSION` ordering; none compares version
    /// strings lexicographically
    pub suffix: Option<String>,
}

impl RankingConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        log::debug!("Loaded rule configuration from {}", path.display());
        Self::from_json_str(&content)
    }

    /// Overrides values of `self` with those set in `overrides`. An empty
    /// rank list does not override.
    pub fn merge(mut self, overrides: RankingConfig) -> Self {
        if overrides.predicate.is_some() {
            self.predicate = overrides.predicate;
        }
        if !overrides.ranks.is_empty() {
            self.ranks = overrides.ranks;
        }
        if overrides.suffix.is_some() {
            self.suffix = overrides.suffix;
        }
        self
    }

    pub fn version_comparator(&self) -> StringComparator {
        match self.suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() => suffix_version_comparator(suffix),
            _ => natural_order(),
        }
    }

    pub fn predicate(&self) -> Result<AlignmentPredicate, ValidationError> {
        AlignmentPredicate::new(self.predicate.as_deref())
    }

    pub fn ranking(&self) -> Result<AlignmentRanking, ValidationError> {
        AlignmentRanking::new(&self.ranks, self.version_comparator())
    }

    /// Compiles both the filter and the ranking.
    pub fn build(&self) -> Result<(AlignmentPredicate, AlignmentRanking), ConfigError> {
        Ok((self.predicate()?, self.ranking()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_default() {
        let config = RankingConfig::from_json_str(r#"{"suffix": "redhat"}"#).unwrap();
        assert_eq!(config.predicate, None);
        assert!(config.ranks.is_empty());
        assert_eq!(config.suffix.as_deref(), Some("redhat"));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = RankingConfig {
            predicate: Some("PRODUCT:EAP".into()),
            ranks: vec!["QUALITY:RELEASED".into()],
            suffix: Some("redhat".into()),
        };
        let cli = RankingConfig {
            predicate: None,
            ranks: vec!["TYPE:jar".into()],
            suffix: None,
        };

        let merged = file.merge(cli);
        assert_eq!(merged.predicate.as_deref(), Some("PRODUCT:EAP"));
        assert_eq!(merged.ranks, vec!["TYPE:jar".to_string()]);
        assert_eq!(merged.suffix.as_deref(), Some("redhat"));
    }
}
