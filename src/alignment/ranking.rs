use std::cmp::Ordering;
use std::sync::Arc;

use log::debug;

use crate::{
    ast::{Ast, Token, TokenKind, TokenSet, TokenType},
    compiler::{Compiler, RankCompiler, VersionComparator},
    error::ValidationError,
    parser,
    version::{QualifiedVersion, StringComparator},
};

/// The rule every ranking ends with.
pub const DEFAULT_RANK: &str = "SUFFIX-VERSION";

/// Separator of rank rules in their serialized list form, hence not allowed
/// inside a rule.
pub const RANK_DELIMITER: char = ',';

struct RankHolder {
    rule: String,
    tokens: Vec<Token>,
    ast: Arc<Ast>,
    comparator: VersionComparator,
}

/// An ordered list of ranking rules acting as a single comparator.
///
/// Rules are consulted in order and the first one telling two versions apart
/// decides. Versions compare `Greater` when they rank higher. A bare
/// `SUFFIX-VERSION` rule, which orders every pair, is appended when missing so
/// the ranking is always total.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use rank_lang::{AlignmentRanking, QualifiedVersion, Qualifier};
/// use rank_lang::version::natural_order;
///
/// let ranking = AlignmentRanking::new(
///     &["BUILD:1 AND TYPE:rpm SORT_BY SUFFIX-VERSION"],
///     natural_order(),
/// )
/// .unwrap();
///
/// let matching = QualifiedVersion::new("1.0")
///     .with(Qualifier::Build, &["1"])
///     .with(Qualifier::Type, &["rpm"]);
/// let other = QualifiedVersion::new("9.0");
///
/// assert_eq!(ranking.compare(&matching, &other), Ordering::Greater);
/// ```
pub struct AlignmentRanking {
    compiler: RankCompiler,
    ranks: Vec<RankHolder>,
}

impl AlignmentRanking {
    /// Tokens a rank rule may consist of.
    pub const ALLOWED_TOKENS: TokenSet = TokenSet::EMPTY
        .with(TokenType::Qualifier)
        .with(TokenType::Order)
        .with(TokenType::Logic)
        .with(TokenType::LParen)
        .with(TokenType::RParen)
        .with(TokenType::SortBy);

    pub const BLACKLISTED_CHARS: [char; 1] = [RANK_DELIMITER];

    pub fn new<S: AsRef<str>>(
        rules: &[S],
        version_cmp: StringComparator,
    ) -> Result<Self, ValidationError> {
        let compiler = RankCompiler::new(version_cmp);
        let ranks = Self::compile_all(&compiler, rules)?;
        Ok(AlignmentRanking { compiler, ranks })
    }

    fn compile_all<S: AsRef<str>>(
        compiler: &RankCompiler,
        rules: &[S],
    ) -> Result<Vec<RankHolder>, ValidationError> {
        let mut ranks = Vec::with_capacity(rules.len() + 1);
        let mut found_default = false;

        for (idx, rule) in rules.iter().enumerate() {
            let rule = rule.as_ref();
            let tokens = super::lex(rule, Self::ALLOWED_TOKENS, &Self::BLACKLISTED_CHARS)?;

            if let [token] = tokens.as_slice() {
                if matches!(token.kind, TokenKind::Order(_)) {
                    found_default = true;
                    if idx != rules.len() - 1 {
                        return Err(ValidationError::with_token(
                            format!("{} is not the last rank.", DEFAULT_RANK),
                            token,
                        ));
                    }
                }
            }

            let ast = Arc::new(parser::parse(&tokens)?);
            let comparator = compiler.compile(&ast)?;

            ranks.push(RankHolder {
                rule: rule.to_string(),
                tokens,
                ast,
                comparator,
            });
        }

        if !found_default {
            debug!("Appending default rank {}", DEFAULT_RANK);
            ranks.extend(Self::compile_all(compiler, &[DEFAULT_RANK])?);
        }

        Ok(ranks)
    }

    /// Rule texts in evaluation order, including an appended default.
    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.ranks.iter().map(|r| r.rule.as_str())
    }

    pub fn ranks_as_tokens(&self) -> Vec<&[Token]> {
        self.ranks.iter().map(|r| r.tokens.as_slice()).collect()
    }

    pub fn ranks_as_trees(&self) -> Vec<&Ast> {
        self.ranks.iter().map(|r| r.ast.as_ref()).collect()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// True when the ranking consists of the default rule only.
    pub fn is_default(&self) -> bool {
        matches!(self.ranks.as_slice(), [only] if only.rule == DEFAULT_RANK)
    }

    /// Swaps the string comparator used by `SUFFIX-VERSION` and recompiles
    /// the retained trees without lexing or parsing the rules again.
    pub fn override_version_comparator(
        &mut self,
        version_cmp: StringComparator,
    ) -> Result<(), ValidationError> {
        self.compiler = RankCompiler::new(version_cmp);
        for rank in &mut self.ranks {
            rank.comparator = self.compiler.compile(&rank.ast)?;
        }
        debug!("Recompiled {} rank(s) with a new version comparator", self.ranks.len());
        Ok(())
    }

    /// Result of the first rule that tells the versions apart.
    pub fn compare(&self, v1: &QualifiedVersion, v2: &QualifiedVersion) -> Ordering {
        self.ranks
            .iter()
            .map(|rank| (rank.comparator)(v1, v2))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Sorts so the highest ranked version comes first.
    pub fn sort_best_first(&self, versions: &mut [QualifiedVersion]) {
        versions.sort_by(|a, b| self.compare(b, a));
    }

    /// The highest ranked version.
    pub fn best<'v>(&self, versions: &'v [QualifiedVersion]) -> Option<&'v QualifiedVersion> {
        versions.iter().max_by(|a, b| self.compare(a, b))
    }
}

impl std::fmt::Debug for AlignmentRanking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignmentRanking")
            .field("rules", &self.rules().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
