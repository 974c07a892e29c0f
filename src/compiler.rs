//! Turns parse trees into executable predicates and comparators.
//!
//! Both backends walk the tree with [`matches`]. Trees are checked once at
//! compile time, so the closures they return can not fail: a shape the
//! backend does not support is reported as a [`ValidationError`] before any
//! version is looked at.
//!
//! Comparators follow [`Ordering`] semantics where `Greater` means "ranks
//! higher": a version matching a rule is greater than one that does not.

use std::cmp::Ordering;
use std::sync::Arc;

use log::debug;

use crate::{
    ast::{Ast, NodeId, NodeKind, Order, Token, TokenKind},
    error::ValidationError,
    version::{QualifiedVersion, StringComparator, natural_order},
};

/// Compiled filter.
pub type VersionPredicate = Arc<dyn Fn(&QualifiedVersion) -> bool + Send + Sync>;

/// Compiled ranking rule.
pub type VersionComparator =
    Arc<dyn Fn(&QualifiedVersion, &QualifiedVersion) -> Ordering + Send + Sync>;

pub trait Compiler {
    type Output;

    fn compile(&self, ast: &Arc<Ast>) -> Result<Self::Output, ValidationError>;
}

/// Evaluates a condition subtree against a version. `AND` and `OR` short
/// circuit; `,` is an `OR`.
pub fn matches(ast: &Ast, node: NodeId, version: &QualifiedVersion) -> bool {
    let Some(token) = ast.token(node) else {
        return false;
    };

    match (&ast.node(node).kind, &token.kind) {
        (NodeKind::Leaf, TokenKind::Qualifier { qualifier, parts }) => {
            version.has(*qualifier, parts)
        }
        (
            NodeKind::Binary {
                left: Some(left),
                right: Some(right),
                ..
            },
            TokenKind::Logic(crate::ast::Logic::And),
        ) => matches(ast, *left, version) && matches(ast, *right, version),
        (
            NodeKind::Binary {
                left: Some(left),
                right: Some(right),
                ..
            },
            TokenKind::Logic(crate::ast::Logic::Or) | TokenKind::Comma,
        ) => matches(ast, *left, version) || matches(ast, *right, version),
        _ => false,
    }
}

/// Verifies that [`matches`] understands every node below `node`.
fn check_condition(ast: &Ast, node: NodeId) -> Result<(), ValidationError> {
    let shape = node_shape(ast, node)?;
    match (&ast.node(node).kind, &shape.kind) {
        (NodeKind::Leaf, TokenKind::Qualifier { .. }) => Ok(()),
        (
            NodeKind::Binary {
                left: Some(left),
                right: Some(right),
                ..
            },
            TokenKind::Logic(_) | TokenKind::Comma,
        ) => {
            check_condition(ast, *left)?;
            check_condition(ast, *right)
        }
        _ => Err(ValidationError::with_token(
            "Only qualifiers joined by AND, OR or ',' are allowed here.",
            shape,
        )),
    }
}

fn node_shape(ast: &Ast, node: NodeId) -> Result<&Token, ValidationError> {
    ast.token(node)
        .ok_or_else(|| ValidationError::new("Unexpected node without token in rule."))
}

/// The single expression of a tree.
fn expression(ast: &Ast) -> Result<NodeId, ValidationError> {
    ast.expression()
        .ok_or_else(|| ValidationError::new("Empty rule is not allowed."))
}

/// Compiles filter trees: a qualifier, or qualifiers joined by logic
/// operators or commas.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredicateCompiler;

impl Compiler for PredicateCompiler {
    type Output = VersionPredicate;

    fn compile(&self, ast: &Arc<Ast>) -> Result<VersionPredicate, ValidationError> {
        let root = expression(ast)?;
        check_condition(ast, root)?;

        debug!("Compiled predicate {}", ast);
        let ast = Arc::clone(ast);
        Ok(Arc::new(move |version: &QualifiedVersion| {
            matches(&ast, root, version)
        }))
    }
}

/// Compiles ranking trees into comparators.
///
/// `SUFFIX-VERSION` compares the raw version strings with the injected
/// string comparator.
#[derive(Clone)]
pub struct RankCompiler {
    version_cmp: StringComparator,
}

impl Default for RankCompiler {
    fn default() -> Self {
        RankCompiler::new(natural_order())
    }
}

impl RankCompiler {
    pub fn new(version_cmp: StringComparator) -> Self {
        RankCompiler { version_cmp }
    }

    fn order_of(ast: &Ast, node: NodeId) -> Result<Order, ValidationError> {
        let token = node_shape(ast, node)?;
        match (&ast.node(node).kind, &token.kind) {
            (NodeKind::Leaf, TokenKind::Order(order)) => Ok(*order),
            _ => Err(ValidationError::with_token(
                "An ordering such as SUFFIX-VERSION is required here.",
                token,
            )),
        }
    }
}

impl Compiler for RankCompiler {
    type Output = VersionComparator;

    fn compile(&self, ast: &Arc<Ast>) -> Result<VersionComparator, ValidationError> {
        let root = expression(ast)?;
        let token = node_shape(ast, root)?;
        let cmp = Arc::clone(&self.version_cmp);

        debug!("Compiling rank {}", ast);
        let comparator: VersionComparator = match (&ast.node(root).kind, &token.kind) {
            (NodeKind::Leaf, TokenKind::Order(order)) => {
                let order = *order;
                Arc::new(move |v1: &QualifiedVersion, v2: &QualifiedVersion| {
                    compare_by_order(order, &cmp, v1, v2)
                })
            }
            (NodeKind::Leaf, TokenKind::Qualifier { .. })
            | (NodeKind::Binary { .. }, TokenKind::Logic(_) | TokenKind::Comma) => {
                check_condition(ast, root)?;
                let ast = Arc::clone(ast);
                Arc::new(move |v1: &QualifiedVersion, v2: &QualifiedVersion| {
                    evaluate_tree(&ast, root, v1, v2)
                })
            }
            (
                NodeKind::Binary {
                    left: Some(left),
                    right: Some(right),
                    ..
                },
                TokenKind::SortBy,
            ) => {
                let (left, order) = (*left, Self::order_of(ast, *right)?);
                check_condition(ast, left)?;
                let ast = Arc::clone(ast);
                Arc::new(move |v1: &QualifiedVersion, v2: &QualifiedVersion| {
                    evaluate_with_sort(&ast, left, order, &cmp, v1, v2)
                })
            }
            _ => {
                return Err(ValidationError::with_token(
                    "Rank can't start with this token.",
                    token,
                ));
            }
        };

        Ok(comparator)
    }
}

fn compare_by_order(
    order: Order,
    cmp: &StringComparator,
    v1: &QualifiedVersion,
    v2: &QualifiedVersion,
) -> Ordering {
    match order {
        Order::SuffixVersion => cmp(v1.version(), v2.version()),
    }
}

/// Matching ranks above not matching; two matches or two misses tie.
fn evaluate_tree(ast: &Ast, node: NodeId, v1: &QualifiedVersion, v2: &QualifiedVersion) -> Ordering {
    matches(ast, node, v1).cmp(&matches(ast, node, v2))
}

/// Like [`evaluate_tree`], but two matches are ordered by `order`.
fn evaluate_with_sort(
    ast: &Ast,
    condition: NodeId,
    order: Order,
    cmp: &StringComparator,
    v1: &QualifiedVersion,
    v2: &QualifiedVersion,
) -> Ordering {
    match (matches(ast, condition, v1), matches(ast, condition, v2)) {
        (true, true) => compare_by_order(order, cmp, v1, v2),
        (false, false) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}
