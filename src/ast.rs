//! # Rank Rule Language - Tokens and Syntax Tree
//!
//! Rules are short expressions over version qualifiers. They come in two
//! flavours sharing one token vocabulary:
//!
//! - **Predicates** select versions: qualifier terms joined by `,` (OR).
//! - **Rankings** order versions: qualifier terms joined by `AND`/`OR`,
//!   grouped with parentheses, optionally followed by `SORT_BY` and an
//!   ordering, or just an ordering on its own.
//!
//! ## Module Layout
//!
//! - **[tokens]** - Tokens produced by the lexer and the token type sets
//!   grammars are described with
//! - **[operators]** - Logic connectives and orderings
//! - **[nodes]** - The arena-backed parse tree built by the parser
//!
//! ## Examples
//!
//! ### Predicate
//!
//! ```text
//! PRODUCT:EAP, PRODUCT:RHSSO
//! ```
//!
//! ### Ranking rule
//!
//! ```text
//! (QUALITY:RELEASED OR QUALITY:VERIFIED) AND TYPE:jar SORT_BY SUFFIX-VERSION
//! ```
//!
//! ### Precedence
//!
//! `AND` binds tighter than `OR` and `,`:
//!
//! ```text
//! BUILD:1 AND TYPE:rpm OR PRODUCT:EAP   ==   (BUILD:1 AND TYPE:rpm) OR PRODUCT:EAP
//! ```
pub mod nodes;
pub mod operators;
pub mod tokens;

pub use nodes::{Ast, Node, NodeId, NodeKind};
pub use operators::{Logic, Order};
pub use tokens::{Production, Token, TokenKind, TokenSet, TokenType};
