use std::fmt;

use super::tokens::{Token, TokenKind};
use crate::error::ValidationError;

/// Index of a node inside an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Shape of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Qualifier or order token, no children.
    Leaf,
    /// Logic, comma or `SORT_BY` token joining two subtrees.
    Binary {
        left: Option<NodeId>,
        right: Option<NodeId>,
        priority: u8,
    },
    /// The tree root (no token) or an open parenthesis scope (token `(`).
    Unary { child: Option<NodeId> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub token: Option<Token>,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    /// Whether this is a parenthesis scope wrapper rather than the tree root.
    pub fn is_paren_scope(&self) -> bool {
        matches!(self.kind, NodeKind::Unary { .. })
            && matches!(
                self.token,
                Some(Token {
                    kind: TokenKind::LParen,
                    ..
                })
            )
    }
}

/// Binding strength of an operator token; higher binds tighter.
pub fn priority(token: &Token) -> Option<u8> {
    match &token.kind {
        TokenKind::Comma => Some(1),
        TokenKind::Logic(super::Logic::Or) => Some(1),
        TokenKind::Logic(super::Logic::And) => Some(2),
        TokenKind::SortBy => Some(3),
        TokenKind::LParen | TokenKind::RParen => Some(4),
        TokenKind::Qualifier { .. } | TokenKind::Order(_) => None,
    }
}

/// Parse tree stored in an arena.
///
/// Nodes refer to their children and parent by [`NodeId`], so restructuring
/// the tree while parsing is a matter of rewriting indices. Node `0` is always
/// the root wrapper, whose single child is the expression. Nodes detached
/// while parsing (closed parenthesis scopes) stay in the arena but are no
/// longer reachable from the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl Ast {
    pub fn new() -> Self {
        Ast {
            nodes: vec![Node {
                token: None,
                parent: None,
                kind: NodeKind::Unary { child: None },
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The expression below the root wrapper, `None` for an empty rule.
    pub fn expression(&self) -> Option<NodeId> {
        self.children(self.root()).into_iter().next()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn token(&self, id: NodeId) -> Option<&Token> {
        self.node(id).token.as_ref()
    }

    /// Children present on a node, left before right.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.node(id).kind {
            NodeKind::Leaf => vec![],
            NodeKind::Binary { left, right, .. } => left.into_iter().chain(right).collect(),
            NodeKind::Unary { child } => child.into_iter().collect(),
        }
    }

    fn push(&mut self, token: Option<Token>, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            token,
            parent: None,
            kind,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn new_leaf(&mut self, token: Token) -> NodeId {
        self.push(Some(token), NodeKind::Leaf)
    }

    pub fn new_binary(&mut self, token: Token) -> Result<NodeId, ValidationError> {
        let priority = priority(&token)
            .ok_or_else(|| ValidationError::with_token("Token has no operator priority.", &token))?;
        Ok(self.push(
            Some(token),
            NodeKind::Binary {
                left: None,
                right: None,
                priority,
            },
        ))
    }

    pub fn new_paren_scope(&mut self, token: Token) -> NodeId {
        self.push(Some(token), NodeKind::Unary { child: None })
    }

    pub fn set_left(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Binary { left, .. } = &mut self.node_mut(parent).kind {
            *left = Some(child);
        }
        self.node_mut(child).parent = Some(parent);
    }

    pub fn set_right(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Binary { right, .. } = &mut self.node_mut(parent).kind {
            *right = Some(child);
        }
        self.node_mut(child).parent = Some(parent);
    }

    pub fn set_child(&mut self, parent: NodeId, new_child: NodeId) {
        if let NodeKind::Unary { child } = &mut self.node_mut(parent).kind {
            *child = Some(new_child);
        }
        self.node_mut(new_child).parent = Some(parent);
    }

    /// Attaches `child` into the first open slot of `parent`: the child of a
    /// unary node, otherwise the left then right slot of a binary node.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        let kind = self.node(parent).kind;
        match kind {
            NodeKind::Unary { .. } => self.set_child(parent, child),
            NodeKind::Binary { left: None, .. } => self.set_left(parent, child),
            NodeKind::Binary { .. } => self.set_right(parent, child),
            NodeKind::Leaf => {}
        }
    }

    /// Replaces `old` with `new` among the children of `parent`. `old` is left
    /// detached.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        let kind = self.node(parent).kind;
        match kind {
            NodeKind::Unary { child: Some(c) } if c == old => self.set_child(parent, new),
            NodeKind::Binary { left: Some(l), .. } if l == old => self.set_left(parent, new),
            NodeKind::Binary { right: Some(r), .. } if r == old => self.set_right(parent, new),
            _ => return,
        }
        if self.node(old).parent == Some(parent) {
            self.node_mut(old).parent = None;
        }
    }

    /// Makes `binary` the child of `unary`, moving the previous child (if any)
    /// down to be the left operand of `binary`.
    pub fn push_down(&mut self, unary: NodeId, binary: NodeId) {
        let previous = self.children(unary).into_iter().next();
        self.set_child(unary, binary);
        if let Some(previous) = previous {
            self.set_left(binary, previous);
        }
    }

    /// Topmost ancestor of `id`.
    pub fn find_root(&self, id: NodeId) -> NodeId {
        let mut node = id;
        while let Some(parent) = self.parent(node) {
            node = parent;
        }
        node
    }

    /// Nearest parenthesis scope at or above `id`.
    pub fn enclosing_paren_scope(&self, id: NodeId) -> Option<NodeId> {
        let mut node = Some(id);
        while let Some(current) = node {
            if self.node(current).is_paren_scope() {
                return Some(current);
            }
            node = self.parent(current);
        }
        None
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let node = self.node(id);
        match (&node.kind, &node.token) {
            (NodeKind::Leaf, Some(token)) => write!(f, "{}", token),
            (NodeKind::Binary { left, right, .. }, Some(token)) => {
                write!(f, "({}", token)?;
                for child in left.iter().chain(right.iter()) {
                    f.write_str(" ")?;
                    self.write_node(f, *child)?;
                }
                f.write_str(")")
            }
            (NodeKind::Unary { child }, token) => {
                if token.is_some() {
                    f.write_str("(group")?;
                    if let Some(child) = child {
                        f.write_str(" ")?;
                        self.write_node(f, *child)?;
                    }
                    f.write_str(")")
                } else if let Some(child) = child {
                    self.write_node(f, *child)
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}

/// Renders the reachable tree as an s-expression, e.g.
/// `(or (and BUILD:1 TYPE:rpm) QUALITY:RELEASED)`.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Logic;
    use crate::qualifier::Qualifier;

    fn build(id: &str) -> Token {
        Token::new(
            0,
            0,
            TokenKind::Qualifier {
                qualifier: Qualifier::Build,
                parts: vec![id.to_string()],
            },
        )
    }

    #[test]
    fn test_push_down_and_replace() {
        let mut ast = Ast::new();
        let a = ast.new_leaf(build("1"));
        ast.attach(ast.root(), a);

        let and = ast
            .new_binary(Token::new(0, 0, TokenKind::Logic(Logic::And)))
            .unwrap();
        ast.push_down(ast.root(), and);
        let b = ast.new_leaf(build("2"));
        ast.attach(and, b);

        assert_eq!(ast.expression(), Some(and));
        assert_eq!(ast.children(and), vec![a, b]);
        assert_eq!(ast.parent(a), Some(and));
        assert_eq!(ast.find_root(b), ast.root());
        assert_eq!(ast.to_string(), "(and BUILD:1 BUILD:2)");

        let c = ast.new_leaf(build("3"));
        ast.replace_child(and, b, c);
        assert_eq!(ast.parent(b), None);
        assert_eq!(ast.to_string(), "(and BUILD:1 BUILD:3)");
    }

    #[test]
    fn test_leaf_has_no_priority() {
        assert_eq!(priority(&build("1")), None);
        assert_eq!(priority(&Token::new(0, 0, TokenKind::SortBy)), Some(3));
    }
}
