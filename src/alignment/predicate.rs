use std::sync::Arc;

use crate::{
    ast::{Ast, Token, TokenSet, TokenType},
    compiler::{Compiler, PredicateCompiler, VersionPredicate},
    error::ValidationError,
    parser,
    version::QualifiedVersion,
};

/// A filter over qualified versions, written as qualifiers joined by commas.
///
/// # Examples
///
/// ```
/// use rank_lang::{AlignmentPredicate, QualifiedVersion, Qualifier};
///
/// let predicate = AlignmentPredicate::new(Some("BUILD:1, BUILD:2")).unwrap();
/// let version = QualifiedVersion::new("1.0").with(Qualifier::Build, &["2"]);
///
/// assert!(predicate.test(&version));
/// assert!(!predicate.test(&QualifiedVersion::new("1.0")));
/// ```
#[derive(Clone)]
pub struct AlignmentPredicate {
    tokens: Vec<Token>,
    ast: Option<Arc<Ast>>,
    predicate: VersionPredicate,
}

impl AlignmentPredicate {
    /// Tokens a predicate may consist of.
    pub const ALLOWED_TOKENS: TokenSet = TokenSet::EMPTY
        .with(TokenType::Qualifier)
        .with(TokenType::Comma);

    /// Compiles `query`; no query matches every version.
    pub fn new(query: Option<&str>) -> Result<Self, ValidationError> {
        Self::with_default(query, Arc::new(|_: &QualifiedVersion| true))
    }

    /// Compiles `query`, falling back to `default` when there is no query.
    pub fn with_default(
        query: Option<&str>,
        default: VersionPredicate,
    ) -> Result<Self, ValidationError> {
        let Some(query) = query else {
            return Ok(AlignmentPredicate {
                tokens: Vec::new(),
                ast: None,
                predicate: default,
            });
        };

        let tokens = super::lex(query, Self::ALLOWED_TOKENS, &[])?;
        let ast = Arc::new(parser::parse(&tokens)?);
        let predicate = PredicateCompiler.compile(&ast)?;

        Ok(AlignmentPredicate {
            tokens,
            ast: Some(ast),
            predicate,
        })
    }

    /// True when no query was given and the default applies.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parse tree of the query, if there was one.
    pub fn ast(&self) -> Option<&Ast> {
        self.ast.as_deref()
    }

    pub fn test(&self, version: &QualifiedVersion) -> bool {
        (self.predicate)(version)
    }
}

impl std::fmt::Debug for AlignmentPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignmentPredicate")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
