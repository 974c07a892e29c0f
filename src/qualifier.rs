//! Qualifiers a version can be tagged with during alignment.
//!
//! Each qualifier has a fixed arity: the number of whitespace separated words
//! its value is made of (`VERSION:EAP 7.4` has two). Values are checked by
//! [`Qualifier::validate`] when a rule is tokenized, so a rule that names an
//! impossible value is rejected up front instead of silently never matching.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap());
static NUMERIC_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)*$").unwrap());
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());
static ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());
static PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+( [A-Za-z0-9._-]+)*$").unwrap());

const QUALITIES: [&str; 8] = [
    "NEW",
    "TESTED",
    "VERIFIED",
    "RELEASED",
    "DEPRECATED",
    "BLACKLISTED",
    "DELETED",
    "TEMPORARY",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Qualifier {
    /// Product short name, e.g. `PRODUCT:EAP`
    Product,
    /// Product name and version, e.g. `VERSION:EAP 7.4`
    Version,
    /// Product name, version and milestone, e.g. `MILESTONE:EAP 7.4 CR1`
    Milestone,
    /// Build id
    Build,
    /// Group build id
    GroupBuild,
    /// Group configuration version name
    GroupVersion,
    /// Artifact quality level
    Quality,
    /// Artifact type, e.g. `TYPE:rpm`
    Type,
}

impl Qualifier {
    pub const ALL: [Qualifier; 8] = [
        Qualifier::Product,
        Qualifier::Version,
        Qualifier::Milestone,
        Qualifier::Build,
        Qualifier::GroupBuild,
        Qualifier::GroupVersion,
        Qualifier::Quality,
        Qualifier::Type,
    ];

    /// Canonical upper-case name used in rules.
    pub fn name(self) -> &'static str {
        match self {
            Qualifier::Product => "PRODUCT",
            Qualifier::Version => "VERSION",
            Qualifier::Milestone => "MILESTONE",
            Qualifier::Build => "BUILD",
            Qualifier::GroupBuild => "GROUP_BUILD",
            Qualifier::GroupVersion => "GROUP_VERSION",
            Qualifier::Quality => "QUALITY",
            Qualifier::Type => "TYPE",
        }
    }

    /// Number of words a value of this qualifier consists of.
    pub fn arity(self) -> usize {
        match self {
            Qualifier::Version => 2,
            Qualifier::Milestone => 3,
            _ => 1,
        }
    }

    /// Looks up a qualifier by name, ignoring case and treating `-` as `_`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = sanitize(name);
        Self::ALL.into_iter().find(|q| q.name() == name)
    }

    /// Checks the parts of a value: word count first, then every part.
    pub fn validate<S: AsRef<str>>(self, parts: &[S]) -> Result<(), String> {
        if parts.len() != self.arity() {
            return Err(format!(
                "Qualifier {} requires {} word/s but got {}.",
                self.name(),
                self.arity(),
                parts.len()
            ));
        }

        for (idx, part) in parts.iter().enumerate() {
            let part = part.as_ref();
            if !self.part_is_valid(idx, part) {
                return Err(format!(
                    "Value '{}' is not valid for qualifier {}.",
                    part,
                    self.name()
                ));
            }
        }

        Ok(())
    }

    fn part_is_valid(self, idx: usize, part: &str) -> bool {
        match (self, idx) {
            (Qualifier::Product, _) => NAME.is_match(part),
            (Qualifier::Version | Qualifier::Milestone, 0) => NAME.is_match(part),
            (Qualifier::Version | Qualifier::Milestone, 1) => NUMERIC_VERSION.is_match(part),
            (Qualifier::Version, _) => false,
            (Qualifier::Milestone, _) => WORD.is_match(part),
            (Qualifier::Build | Qualifier::GroupBuild, _) => ID.is_match(part),
            (Qualifier::GroupVersion, _) => PHRASE.is_match(part),
            (Qualifier::Quality, _) => QUALITIES.contains(&part.to_uppercase().as_str()),
            (Qualifier::Type, _) => WORD.is_match(part),
        }
    }

    /// Whether two values of this qualifier are considered the same.
    pub(crate) fn values_equal(self, a: &str, b: &str) -> bool {
        match self {
            Qualifier::Quality => a.eq_ignore_ascii_case(b),
            _ => a == b,
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Qualifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Unknown qualifier: {}", s))
    }
}

/// Normalises a keyword for lookup: upper case, `-` replaced by `_`.
pub(crate) fn sanitize(word: &str) -> String {
    word.to_uppercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_lenient() {
        assert_eq!(Qualifier::from_name("group-build"), Some(Qualifier::GroupBuild));
        assert_eq!(Qualifier::from_name("Quality"), Some(Qualifier::Quality));
        assert_eq!(Qualifier::from_name("SUFFIX"), None);
    }

    #[test]
    fn test_validate() {
        assert!(Qualifier::Build.validate(&["123"]).is_ok());
        assert!(Qualifier::Build.validate(&["12 3"]).is_err());
        assert!(Qualifier::Version.validate(&["EAP", "7.4"]).is_ok());
        assert!(Qualifier::Version.validate(&["EAP", "seven"]).is_err());
        assert!(Qualifier::Version.validate(&["EAP"]).is_err());
        assert!(Qualifier::Milestone.validate(&["EAP", "7.4", "CR1"]).is_ok());
        assert!(Qualifier::Quality.validate(&["released"]).is_ok());
        assert!(Qualifier::Quality.validate(&["SHINY"]).is_err());
        assert!(Qualifier::GroupVersion.validate(&["EAP 7.4 nightly"]).is_ok());
        assert!(Qualifier::Type.validate(&[""]).is_err());
    }

    #[test]
    fn test_parts_beyond_arity_are_invalid() {
        assert!(!Qualifier::Version.part_is_valid(2, "CR1"));
        assert!(Qualifier::Milestone.part_is_valid(2, "CR1"));
        assert!(Qualifier::Version.validate(&["EAP", "7.4", "CR1"]).is_err());
    }
}
