use std::collections::HashSet;

use log::trace;

use crate::{
    ast::{Logic, Order, Production, Token, TokenKind, TokenSet, TokenType},
    error::ValidationError,
    qualifier::{Qualifier, sanitize},
};

/// Turns a rule string into tokens.
///
/// Only token types in the allowed set are recognised, which is how the
/// predicate and ranking grammars share one lexer. Characters in the
/// blacklist are rejected wherever they appear, including inside values.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    allowed: TokenSet,
    blacklist: HashSet<char>,
}

impl Lexer {
    /// Lexer recognising every token type.
    pub fn new(input: &str) -> Self {
        Self::with_tokens(input, TokenSet::all(), &[])
    }

    pub fn with_tokens(input: &str, allowed: TokenSet, blacklist: &[char]) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            allowed,
            blacklist: blacklist.iter().copied().collect(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Consumes the current character, rejecting blacklisted ones.
    fn advance(&mut self) -> Result<(), ValidationError> {
        if let Some(ch) = self.current_char() {
            if self.blacklist.contains(&ch) {
                return Err(ValidationError::at(
                    format!("Character '{}' is not allowed.", ch),
                    self.position,
                ));
            }
            self.position += 1;
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) -> Result<(), ValidationError> {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Characters that end a bare word.
    fn is_special(&self, ch: char) -> bool {
        match ch {
            '"' | '\'' => true,
            ':' => self.allowed.contains(TokenType::Qualifier),
            _ => self.allowed.iter().any(|t| t.char_literal() == Some(ch)),
        }
    }

    fn read_word(&mut self) -> Result<String, ValidationError> {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() || self.is_special(ch) {
                break;
            }
            self.advance()?;
            result.push(ch);
        }
        Ok(result)
    }

    /// Reads a quoted string, the cursor being on the opening quote.
    fn read_quoted(&mut self, start: usize) -> Result<String, ValidationError> {
        let Some(quote) = self.current_char() else {
            return Ok(String::new());
        };
        self.advance()?;

        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            self.advance()?;
            if ch == quote {
                return Ok(result);
            }
            result.push(ch);
        }

        Err(ValidationError::span(
            format!("Reached the end of input without ending quote {}", quote),
            start,
            self.position,
        ))
    }

    /// Returns true while anything other than whitespace remains.
    pub fn has_next(&self) -> bool {
        self.input
            .iter()
            .skip(self.position)
            .any(|c| !c.is_whitespace())
    }

    pub fn next_token(&mut self) -> Result<Token, ValidationError> {
        let save = self.position;
        self.skip_whitespace()?;

        let Some(ch) = self.current_char() else {
            return Err(ValidationError::span(
                "Just whitespace remaining. No next token available.",
                save,
                self.position,
            ));
        };

        let start = self.position;
        let word = self.read_word()?;

        let kind = if word.is_empty() {
            self.read_char_token(ch, start)?
        } else {
            self.classify_word(&word, start)?
        };

        let token = Token::new(start, self.position, kind);
        if let TokenKind::Qualifier { qualifier, parts } = &token.kind {
            qualifier
                .validate(parts)
                .map_err(|msg| ValidationError::with_token(msg, &token))?;
        }

        trace!("Token {} at {}:{}", token, token.pos, token.end_pos);
        Ok(token)
    }

    fn read_char_token(&mut self, ch: char, start: usize) -> Result<TokenKind, ValidationError> {
        let kind = self
            .allowed
            .iter()
            .find(|t| t.char_literal() == Some(ch))
            .and_then(|t| match t {
                TokenType::LParen => Some(TokenKind::LParen),
                TokenType::RParen => Some(TokenKind::RParen),
                TokenType::Comma => Some(TokenKind::Comma),
                _ => None,
            });

        match kind {
            Some(kind) => {
                self.advance()?;
                Ok(kind)
            }
            None => {
                // report blacklisted characters as such
                self.advance()?;
                Err(ValidationError::span(
                    format!("Unrecognized character '{}'.", ch),
                    start,
                    self.position,
                ))
            }
        }
    }

    /// Classifies a bare word: exact keywords first, then enumeration words,
    /// then `QUALIFIER:value`.
    fn classify_word(&mut self, word: &str, start: usize) -> Result<TokenKind, ValidationError> {
        let sanitized = sanitize(word);

        let literal = self.allowed.iter().find(
            |t| matches!(t.production(), Production::Literal(literal) if literal == sanitized),
        );
        if literal == Some(TokenType::SortBy) {
            return Ok(TokenKind::SortBy);
        }

        if self.allowed.contains(TokenType::Logic) {
            if let Some(logic) = Logic::from_name(word) {
                return Ok(TokenKind::Logic(logic));
            }
        }

        if self.allowed.contains(TokenType::Order) {
            if let Some(order) = Order::from_name(word) {
                return Ok(TokenKind::Order(order));
            }
        }

        if self.allowed.contains(TokenType::Qualifier) {
            if let Some(qualifier) = Qualifier::from_name(word) {
                let parts = self.read_qualifier_value(qualifier, start)?;
                return Ok(TokenKind::Qualifier { qualifier, parts });
            }
        }

        Err(ValidationError::span(
            format!("Unrecognized word '{}'.", word),
            start,
            self.position,
        ))
    }

    fn read_qualifier_value(
        &mut self,
        qualifier: Qualifier,
        start: usize,
    ) -> Result<Vec<String>, ValidationError> {
        self.skip_whitespace()?;
        if self.current_char() != Some(':') {
            return Err(ValidationError::span(
                "Could not find ':' after parsing Qualifier.",
                start,
                self.position,
            ));
        }
        self.advance()?;
        self.skip_whitespace()?;

        let arity = qualifier.arity();

        if matches!(self.current_char(), Some('"' | '\'')) {
            let quoted = self.read_quoted(start)?;
            if arity == 1 {
                return Ok(vec![quoted.trim().to_string()]);
            }

            let parts: Vec<String> = quoted.split_whitespace().map(str::to_string).collect();
            if parts.len() != arity {
                return Err(ValidationError::span(
                    format!("Quoted string should have exactly {} amount of words.", arity),
                    start,
                    self.position,
                ));
            }
            return Ok(parts);
        }

        let mut parts = Vec::with_capacity(arity);
        for _ in 0..arity {
            self.skip_whitespace()?;
            let part = self.read_word()?;
            if part.is_empty() {
                return Err(ValidationError::span(
                    format!(
                        "Qualifier {} requires {} word/s.",
                        qualifier.name(),
                        arity
                    ),
                    start,
                    self.position,
                ));
            }
            parts.push(part);
        }
        Ok(parts)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, ValidationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            Some(self.next_token())
        } else {
            None
        }
    }
}

/// Lexes the whole input, stopping at the first error.
pub fn tokenize(
    input: &str,
    allowed: TokenSet,
    blacklist: &[char],
) -> Result<Vec<Token>, ValidationError> {
    Lexer::with_tokens(input, allowed, blacklist).collect()
}
