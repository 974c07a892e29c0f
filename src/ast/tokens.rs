use std::fmt;

use super::operators::{Logic, Order};
use crate::qualifier::Qualifier;

/// The kinds of tokens the rule language knows, without payload.
///
/// Used to describe which tokens a grammar allows and which token may follow
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// `QUALIFIER:value`
    Qualifier,
    /// `SUFFIX-VERSION`
    Order,
    /// `AND` / `OR`
    Logic,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,` (alternative spelling of OR, used by filter predicates)
    Comma,
    /// `SORT_BY`
    SortBy,
}

/// How the lexer recognises a token type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    /// A single character.
    Char(char),
    /// An exact keyword.
    Literal(&'static str),
    /// A word naming one of the constants of an enumeration.
    Enum,
}

impl TokenType {
    pub const ALL: [TokenType; 7] = [
        TokenType::Qualifier,
        TokenType::Order,
        TokenType::Logic,
        TokenType::LParen,
        TokenType::RParen,
        TokenType::Comma,
        TokenType::SortBy,
    ];

    pub fn production(self) -> Production {
        match self {
            TokenType::Qualifier | TokenType::Order | TokenType::Logic => Production::Enum,
            TokenType::LParen => Production::Char('('),
            TokenType::RParen => Production::Char(')'),
            TokenType::Comma => Production::Char(','),
            TokenType::SortBy => Production::Literal("SORT_BY"),
        }
    }

    pub fn char_literal(self) -> Option<char> {
        match self.production() {
            Production::Char(c) => Some(c),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Qualifier => "QUALIFIER",
            TokenType::Order => "ORDER",
            TokenType::Logic => "LOGIC",
            TokenType::LParen => "'('",
            TokenType::RParen => "')'",
            TokenType::Comma => "','",
            TokenType::SortBy => "SORT_BY",
        };
        f.write_str(name)
    }
}

/// A set of token types, e.g. the tokens a grammar is allowed to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSet(u8);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    pub const fn all() -> Self {
        TokenSet(0b0111_1111)
    }

    pub const fn with(self, token_type: TokenType) -> Self {
        TokenSet(self.0 | token_type.bit())
    }

    pub const fn contains(self, token_type: TokenType) -> bool {
        self.0 & token_type.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = TokenType> {
        TokenType::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl FromIterator<TokenType> for TokenSet {
    fn from_iter<I: IntoIterator<Item = TokenType>>(iter: I) -> Self {
        iter.into_iter().fold(TokenSet::EMPTY, TokenSet::with)
    }
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Qualifier with its value words
    ///
    /// # Examples
    /// ```text
    /// BUILD:1
    /// VERSION:EAP 7.4
    /// GROUP_VERSION:"EAP 7.4 nightly"
    /// ```
    Qualifier {
        qualifier: Qualifier,
        parts: Vec<String>,
    },

    /// Logical connective
    Logic(Logic),

    /// Ordering criterion
    Order(Order),

    /// Left parenthesis opening a group
    LParen,

    /// Right parenthesis closing a group
    RParen,

    /// Comma, equivalent to OR
    Comma,

    /// `SORT_BY`, separating a condition from the order applied to its matches
    ///
    /// # Examples
    /// ```text
    /// PRODUCT:EAP SORT_BY SUFFIX-VERSION
    /// ```
    SortBy,
}

impl TokenKind {
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenKind::Qualifier { .. } => TokenType::Qualifier,
            TokenKind::Logic(_) => TokenType::Logic,
            TokenKind::Order(_) => TokenType::Order,
            TokenKind::LParen => TokenType::LParen,
            TokenKind::RParen => TokenType::RParen,
            TokenKind::Comma => TokenType::Comma,
            TokenKind::SortBy => TokenType::SortBy,
        }
    }
}

/// A token together with the `[pos, end_pos)` range it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub pos: usize,
    pub end_pos: usize,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(pos: usize, end_pos: usize, kind: TokenKind) -> Self {
        Token { pos, end_pos, kind }
    }

    pub fn token_type(&self) -> TokenType {
        self.kind.token_type()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Qualifier { qualifier, parts } => {
                write!(f, "{}:{}", qualifier, parts.join(" "))
            }
            TokenKind::Logic(logic) => write!(f, "{}", logic),
            TokenKind::Order(order) => write!(f, "{}", order),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::SortBy => f.write_str("SORT_BY"),
        }
    }
}
