pub mod alignment;
pub mod ast;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod qualifier;
pub mod version;

pub use alignment::{AlignmentPredicate, AlignmentRanking};
pub use ast::{Ast, Token, TokenKind, TokenSet, TokenType};
pub use compiler::{Compiler, PredicateCompiler, RankCompiler, VersionComparator, VersionPredicate};
pub use config::{ConfigError, RankingConfig};
pub use error::ValidationError;
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, parse};
pub use qualifier::Qualifier;
pub use version::{QualifiedVersion, StringComparator};
