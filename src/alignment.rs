//! Entry points for using rules: [`AlignmentPredicate`] filters candidate
//! versions, [`AlignmentRanking`] orders them.
//!
//! ```
//! use rank_lang::{AlignmentPredicate, AlignmentRanking, QualifiedVersion, Qualifier};
//! use rank_lang::version::natural_order;
//!
//! let filter = AlignmentPredicate::new(Some("PRODUCT:EAP, PRODUCT:RHSSO")).unwrap();
//! let ranking = AlignmentRanking::new(&["QUALITY:RELEASED"], natural_order()).unwrap();
//!
//! let released = QualifiedVersion::new("1.0.0")
//!     .with(Qualifier::Product, &["EAP"])
//!     .with(Qualifier::Quality, &["RELEASED"]);
//! let newer = QualifiedVersion::new("1.1.0").with(Qualifier::Product, &["EAP"]);
//!
//! assert!(filter.test(&released));
//! assert_eq!(ranking.best(&[newer, released.clone()]), Some(&released));
//! ```

pub mod predicate;
pub mod ranking;

pub use predicate::AlignmentPredicate;
pub use ranking::AlignmentRanking;

use crate::{
    ast::{Token, TokenSet},
    error::ValidationError,
    lexer::Lexer,
};

/// Lexes a whole rule, logging what was produced.
fn lex(rule: &str, allowed: TokenSet, blacklist: &[char]) -> Result<Vec<Token>, ValidationError> {
    let tokens = Lexer::with_tokens(rule, allowed, blacklist).collect::<Result<Vec<_>, _>>()?;
    log::debug!("Rule '{}' lexed into {} token(s)", rule, tokens.len());
    Ok(tokens)
}
