use std::fmt;

use crate::qualifier::sanitize;

/// Logical connectives between qualifier terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Logic {
    /// Logical AND (word, case-insensitive)
    ///
    /// # Examples
    /// ```text
    /// BUILD:1 AND TYPE:rpm
    /// ```
    And,

    /// Logical OR (word, case-insensitive)
    ///
    /// # Examples
    /// ```text
    /// QUALITY:RELEASED or QUALITY:VERIFIED
    /// ```
    Or,
}

impl Logic {
    pub const ALL: [Logic; 2] = [Logic::And, Logic::Or];

    pub fn name(self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }

    pub fn from_name(word: &str) -> Option<Self> {
        let word = sanitize(word);
        Self::ALL.into_iter().find(|l| l.name() == word)
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_lowercase())
    }
}

/// Total orderings usable as a ranking criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Order by the raw version string through the injected string comparator.
    ///
    /// Written `SUFFIX-VERSION` (or any case/dash variant of it).
    SuffixVersion,
}

impl Order {
    pub const ALL: [Order; 1] = [Order::SuffixVersion];

    pub fn name(self) -> &'static str {
        match self {
            Order::SuffixVersion => "SUFFIX_VERSION",
        }
    }

    pub fn from_name(word: &str) -> Option<Self> {
        let word = sanitize(word);
        Self::ALL.into_iter().find(|o| o.name() == word)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
