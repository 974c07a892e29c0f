use log::debug;

use crate::{
    ast::{Ast, NodeId, NodeKind, Token, TokenKind, TokenType, nodes::priority},
    error::ValidationError,
};

/// Token types a rule may start with.
const START: [TokenType; 3] = [TokenType::Qualifier, TokenType::Order, TokenType::LParen];

/// Token types allowed to follow `token_type`; `None` stands for the end of
/// the rule.
fn allowed_next(token_type: TokenType) -> &'static [Option<TokenType>] {
    use TokenType::*;
    match token_type {
        Qualifier | RParen => &[
            Some(Logic),
            Some(Comma),
            Some(SortBy),
            Some(RParen),
            None,
        ],
        Order => &[None],
        Logic | Comma => &[Some(Qualifier), Some(LParen)],
        LParen => &[Some(Qualifier), Some(LParen)],
        SortBy => &[Some(Order)],
    }
}

/// Builds the parse tree of a token list.
///
/// The whole list is checked against the adjacency table first, then the
/// tree is grown in a single left-to-right pass. Operators are placed by
/// comparing priorities with the operator under the cursor, and every
/// parenthesis scope is represented by a temporary wrapper node that is
/// replaced by its content once the scope closes.
pub struct Parser<'a> {
    tokens: &'a [Token],
    ast: Ast,
    current: NodeId,
    open_parens: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let ast = Ast::new();
        let current = ast.root();
        Parser {
            tokens,
            ast,
            current,
            open_parens: 0,
        }
    }

    /// Validates the tokens and builds the tree. An empty token list yields a
    /// tree with no expression.
    pub fn parse(mut self) -> Result<Ast, ValidationError> {
        validate(self.tokens)?;

        for token in self.tokens {
            self.step(token)?;
        }

        if self.open_parens != 0 {
            let end = self.tokens.last().map_or(0, |t| t.end_pos);
            return Err(ValidationError::at(
                format!(
                    "Amount of parentheses do not match. Expecting another {}.",
                    self.open_parens
                ),
                end,
            ));
        }

        debug!("Parsed tree {}", self.ast);
        Ok(self.ast)
    }

    fn step(&mut self, token: &Token) -> Result<(), ValidationError> {
        match &token.kind {
            TokenKind::Qualifier { .. } | TokenKind::Order(_) => {
                let leaf = self.ast.new_leaf(token.clone());
                self.ast.attach(self.current, leaf);
            }
            TokenKind::Comma | TokenKind::Logic(_) => {
                self.current = self.add_operator(token)?;
            }
            TokenKind::LParen => {
                let scope = self.ast.new_paren_scope(token.clone());
                self.ast.attach(self.current, scope);
                self.open_parens += 1;
                self.current = scope;
            }
            TokenKind::RParen => {
                self.current = self.close_scope(token)?;
            }
            TokenKind::SortBy => {
                let sort = self.ast.new_binary(token.clone())?;
                let root = self.ast.find_root(self.current);
                self.ast.push_down(root, sort);
                self.current = sort;
            }
        }
        Ok(())
    }

    fn add_operator(&mut self, token: &Token) -> Result<NodeId, ValidationError> {
        let new = self.ast.new_binary(token.clone())?;
        let new_priority = priority(token).unwrap_or(0);

        let kind = self.ast.node(self.current).kind;
        match kind {
            NodeKind::Unary { .. } => self.ast.push_down(self.current, new),
            NodeKind::Binary { right, priority, .. } if priority <= new_priority => {
                // tighter (or equal) binding nests on the right
                if let Some(right) = right {
                    self.ast.replace_child(self.current, right, new);
                    self.ast.set_left(new, right);
                } else {
                    self.ast.set_right(self.current, new);
                }
            }
            NodeKind::Binary { .. } => {
                // looser binding becomes an ancestor of every operator that
                // binds tighter, stopping at a parenthesis scope or the root
                let mut displaced = self.current;
                while let Some(parent) = self.ast.parent(displaced) {
                    match self.ast.node(parent).kind {
                        NodeKind::Binary { priority, .. } if priority > new_priority => {
                            displaced = parent;
                        }
                        _ => break,
                    }
                }
                let Some(parent) = self.ast.parent(displaced) else {
                    return Err(misplaced_operator(token));
                };
                self.ast.replace_child(parent, displaced, new);
                self.ast.set_left(new, displaced);
            }
            NodeKind::Leaf => return Err(misplaced_operator(token)),
        }

        Ok(new)
    }

    /// Collapses the innermost open parenthesis scope into its parent and
    /// returns that parent as the new cursor.
    fn close_scope(&mut self, token: &Token) -> Result<NodeId, ValidationError> {
        if self.open_parens == 0 {
            return Err(ValidationError::with_token("Illegal ')' placement.", token));
        }
        self.open_parens -= 1;

        let scope = self
            .ast
            .enclosing_paren_scope(self.current)
            .ok_or_else(|| ValidationError::with_token("Illegal ')' placement.", token))?;
        let parent = self
            .ast
            .parent(scope)
            .ok_or_else(|| ValidationError::with_token("Illegal ')' placement.", token))?;

        match self.ast.children(scope).first() {
            Some(&child) => self.ast.replace_child(parent, scope, child),
            None => return Err(ValidationError::with_token("Empty parentheses.", token)),
        }

        Ok(parent)
    }
}

fn misplaced_operator(token: &Token) -> ValidationError {
    ValidationError::with_token("Operator has no place in the tree.", token)
}

/// Checks that the rule starts with an allowed token and that every token is
/// followed by one it may be followed by.
pub fn validate(tokens: &[Token]) -> Result<(), ValidationError> {
    let Some(first) = tokens.first() else {
        return Ok(());
    };

    if !START.contains(&first.token_type()) {
        return Err(ValidationError::with_token(
            format!("A rule can't start with {}.", first.token_type()),
            first,
        ));
    }

    for (idx, token) in tokens.iter().enumerate() {
        let next = tokens.get(idx + 1);
        let next_type = next.map(Token::token_type);

        if !allowed_next(token.token_type()).contains(&next_type) {
            let what = match next {
                Some(next) => format!("'{}'", next),
                None => "end of rule".to_string(),
            };
            return Err(ValidationError::with_token(
                format!("{} is not allowed after '{}'.", what, token),
                token,
            ));
        }
    }

    Ok(())
}

/// Parses a token list into a tree.
pub fn parse(tokens: &[Token]) -> Result<Ast, ValidationError> {
    Parser::new(tokens).parse()
}
