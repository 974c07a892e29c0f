//! Versions carrying a rebuild suffix, e.g. `1.2.3.redhat-00004`.
//!
//! A suffixed version has a numeric `major.minor.micro` part, an optional
//! free-form qualifier and an optional `<suffix>-<n>` tail, where `n` counts
//! rebuilds of the same upstream version. Ordering first follows the upstream
//! part and then prefers the higher rebuild number.

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, LazyLock};

use log::warn;
use regex::Regex;

use super::StringComparator;

const DELIMITER: &str = r"[.\-_]";

static MMM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^([0-9]+)(?:{d}([0-9]+)(?:{d}([0-9]+))?)?",
        d = DELIMITER
    ))
    .unwrap()
});

static LEADING_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}", DELIMITER)).unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixedVersion {
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
    pub qualifier: String,
    pub suffix: Option<String>,
    pub suffix_version: Option<u64>,
    original: String,
}

impl SuffixedVersion {
    /// Parses `version`, splitting off a trailing `suffix` + number if present.
    pub fn parse(version: &str, suffix: &str) -> Self {
        SuffixParser::new(suffix).parse(version)
    }

    /// Compares by major, minor, micro, qualifier and finally rebuild number.
    /// A version without a rebuild number sorts below any rebuild of it.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.micro.cmp(&other.micro))
            .then_with(|| self.qualifier.cmp(&other.qualifier))
            .then(self.suffix_version.cmp(&other.suffix_version))
    }

    pub fn is_suffixed(&self) -> bool {
        self.suffix_version.is_some()
    }
}

impl fmt::Display for SuffixedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Parser bound to one suffix, so the suffix pattern is compiled once.
#[derive(Debug, Clone)]
pub struct SuffixParser {
    tail: Option<Regex>,
}

impl SuffixParser {
    pub fn new(suffix: &str) -> Self {
        let tail = if suffix.is_empty() {
            None
        } else {
            Regex::new(&format!(
                r"(?i)^(.*?){d}?({s}){d}?(\d+)$",
                d = DELIMITER,
                s = regex::escape(suffix)
            ))
            .ok()
        };
        SuffixParser { tail }
    }

    pub fn parse(&self, version: &str) -> SuffixedVersion {
        let (major, minor, micro, rest) = match MMM.captures(version) {
            Some(caps) => {
                // digits only, so parsing fails on overflow alone
                let number = |idx: usize| match caps.get(idx) {
                    Some(m) => m.as_str().parse::<u64>().unwrap_or_else(|_| {
                        warn!(
                            "Version '{}' has out of range part '{}', treating it as the maximum",
                            version,
                            m.as_str()
                        );
                        u64::MAX
                    }),
                    None => 0,
                };
                let end = caps.get(0).map_or(0, |m| m.end());
                (number(1), number(2), number(3), &version[end..])
            }
            None => {
                warn!("Version '{}' has no numeric part", version);
                (0, 0, 0, version)
            }
        };

        let rest = LEADING_DELIMITER.replace(rest, "").into_owned();

        let tail = self.tail.as_ref().and_then(|re| {
            let caps = re.captures(&rest)?;
            let number = caps.get(3)?.as_str().parse::<u64>().ok()?;
            Some((
                caps.get(1).map_or("", |m| m.as_str()).to_string(),
                caps.get(2).map_or("", |m| m.as_str()).to_string(),
                number,
            ))
        });

        let (qualifier, suffix, suffix_version) = match tail {
            Some((qualifier, suffix, number)) => (qualifier, Some(suffix), Some(number)),
            None => (rest, None, None),
        };

        SuffixedVersion {
            major,
            minor,
            micro,
            qualifier,
            suffix,
            suffix_version,
            original: version.to_string(),
        }
    }
}

/// Comparator ordering version strings as [`SuffixedVersion`]s with the given
/// rebuild suffix.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use rank_lang::version::suffix_version_comparator;
///
/// let cmp = suffix_version_comparator("redhat");
/// assert_eq!(cmp("1.2.3.redhat-00002", "1.2.3.redhat-00010"), Ordering::Less);
/// assert_eq!(cmp("1.2.3", "1.2.3.redhat-00001"), Ordering::Less);
/// assert_eq!(cmp("1.10.0", "1.9.0.redhat-00001"), Ordering::Greater);
/// ```
pub fn suffix_version_comparator(suffix: &str) -> StringComparator {
    let parser = SuffixParser::new(suffix);
    Arc::new(move |a: &str, b: &str| parser.parse(a).compare(&parser.parse(b)))
}
