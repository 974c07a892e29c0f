//! Versions as seen by the rule language.
//!
//! A [`QualifiedVersion`] is a raw version string plus the qualifier values
//! it was tagged with. Rules never inspect anything else: predicates ask
//! [`QualifiedVersion::has`], and the `SUFFIX-VERSION` ordering hands the raw
//! strings of two versions to a [`StringComparator`].

pub mod suffixed;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::qualifier::Qualifier;

pub use suffixed::{SuffixedVersion, suffix_version_comparator};

/// Total order over raw version strings used by `SUFFIX-VERSION`.
pub type StringComparator = Arc<dyn Fn(&str, &str) -> Ordering + Send + Sync>;

/// Plain lexicographic order of version strings.
pub fn natural_order() -> StringComparator {
    Arc::new(|a: &str, b: &str| a.cmp(b))
}

/// A candidate version together with its qualifier values.
///
/// # Examples
///
/// ```
/// use rank_lang::{QualifiedVersion, Qualifier};
///
/// let version = QualifiedVersion::new("1.2.3.redhat-00001")
///     .with(Qualifier::Build, &["42"])
///     .with(Qualifier::Version, &["EAP", "7.4"]);
///
/// assert!(version.has(Qualifier::Version, &["EAP", "7.4"]));
/// assert!(!version.has(Qualifier::Build, &["43"]));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QualifiedVersion {
    version: String,
    qualifiers: HashMap<Qualifier, Vec<Vec<String>>>,
}

impl QualifiedVersion {
    pub fn new(version: impl Into<String>) -> Self {
        QualifiedVersion {
            version: version.into(),
            qualifiers: HashMap::new(),
        }
    }

    /// Records one more value for `qualifier`. A version may carry several
    /// values of the same qualifier (e.g. it was built for two products).
    pub fn with<S: AsRef<str>>(mut self, qualifier: Qualifier, parts: &[S]) -> Self {
        self.add(qualifier, parts);
        self
    }

    pub fn add<S: AsRef<str>>(&mut self, qualifier: Qualifier, parts: &[S]) {
        let value = parts.iter().map(|p| p.as_ref().to_string()).collect();
        self.qualifiers.entry(qualifier).or_default().push(value);
    }

    /// The raw version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether one of the recorded values of `qualifier` equals `parts`.
    pub fn has<S: AsRef<str>>(&self, qualifier: Qualifier, parts: &[S]) -> bool {
        self.qualifiers.get(&qualifier).is_some_and(|values| {
            values.iter().any(|value| {
                value.len() == parts.len()
                    && value
                        .iter()
                        .zip(parts)
                        .all(|(a, b)| qualifier.values_equal(a, b.as_ref()))
            })
        })
    }

    /// All recorded qualifier values, in qualifier order.
    pub fn qualifiers(&self) -> Vec<(Qualifier, &[Vec<String>])> {
        let mut entries: Vec<_> = self
            .qualifiers
            .iter()
            .map(|(q, values)| (*q, values.as_slice()))
            .collect();
        entries.sort_by_key(|(q, _)| *q);
        entries
    }
}
