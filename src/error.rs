use std::fmt;

use crate::ast::Token;

/// Error raised while lexing, parsing or compiling a rule.
///
/// Carries as much position information as the failing stage has: a
/// character offset, a `[pos, end_pos)` span, or the offending token itself.
/// Offsets are 0-based character indices into the rule string.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    message: String,
    pos: Option<usize>,
    end_pos: Option<usize>,
    token: Option<Token>,
}

impl ValidationError {
    /// Error without any position information.
    pub fn new(message: impl Into<String>) -> Self {
        ValidationError {
            message: message.into(),
            pos: None,
            end_pos: None,
            token: None,
        }
    }

    /// Error pointing at a single character.
    pub fn at(message: impl Into<String>, pos: usize) -> Self {
        ValidationError {
            pos: Some(pos),
            ..Self::new(message)
        }
    }

    /// Error spanning `[pos, end_pos)`.
    pub fn span(message: impl Into<String>, pos: usize, end_pos: usize) -> Self {
        ValidationError {
            pos: Some(pos),
            end_pos: Some(end_pos),
            ..Self::new(message)
        }
    }

    /// Error about a specific token, spanning the token's source range.
    pub fn with_token(message: impl Into<String>, token: &Token) -> Self {
        ValidationError {
            pos: Some(token.pos),
            end_pos: Some(token.end_pos),
            token: Some(token.clone()),
            ..Self::new(message)
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn pos(&self) -> Option<usize> {
        self.pos
    }

    pub fn end_pos(&self) -> Option<usize> {
        self.end_pos
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    fn position_string(&self) -> String {
        match (self.pos, self.end_pos) {
            (Some(pos), Some(end)) => format!("(chars {}:{})", pos, end),
            (Some(pos), None) => format!("(char {})", pos),
            _ => String::new(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(token) = &self.token {
            return write!(
                f,
                "Encountered problem with {} {}. Message: {}",
                token,
                self.position_string(),
                self.message
            );
        }

        if self.pos.is_some() {
            return write!(
                f,
                "Encountered problem while parsing {}. Message: {}",
                self.position_string(),
                self.message
            );
        }

        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}
