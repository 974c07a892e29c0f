// tests/compiler_tests.rs

use std::cmp::Ordering;
use std::sync::Arc;

use rank_lang::alignment::AlignmentRanking;
use rank_lang::ast::{Ast, Token, TokenKind};
use rank_lang::compiler::{Compiler, PredicateCompiler, RankCompiler, matches};
use rank_lang::lexer::tokenize;
use rank_lang::parser::parse;
use rank_lang::version::{natural_order, suffix_version_comparator};
use rank_lang::{QualifiedVersion, Qualifier, ValidationError};

fn ast(rule: &str) -> Arc<Ast> {
    let tokens = tokenize(
        rule,
        AlignmentRanking::ALLOWED_TOKENS,
        &AlignmentRanking::BLACKLISTED_CHARS,
    )
    .unwrap();
    Arc::new(parse(&tokens).unwrap())
}

fn version(v: &str, build: &str, kind: &str) -> QualifiedVersion {
    QualifiedVersion::new(v)
        .with(Qualifier::Build, &[build])
        .with(Qualifier::Type, &[kind])
}

fn samples() -> Vec<QualifiedVersion> {
    let mut versions = Vec::new();
    for build in ["1", "2", "3"] {
        for kind in ["rpm", "jar"] {
            versions.push(version("1.0", build, kind));
        }
    }
    versions.push(QualifiedVersion::new("1.0"));
    versions
}

// ============================================================================
// matches
// ============================================================================

#[test]
fn test_matches() {
    let v = version("1.0", "1", "rpm");

    let test_cases = vec![
        ("BUILD:1", true),
        ("BUILD:2", false),
        ("BUILD:1 AND TYPE:rpm", true),
        ("BUILD:1 AND TYPE:jar", false),
        ("BUILD:2 OR TYPE:rpm", true),
        ("BUILD:2 OR TYPE:jar", false),
        ("BUILD:2 AND TYPE:jar OR BUILD:1", true),
        ("BUILD:2 AND (TYPE:jar OR BUILD:1)", false),
    ];

    for (rule, expected) in test_cases {
        let ast = ast(rule);
        let root = ast.expression().unwrap();
        assert_eq!(matches(&ast, root, &v), expected, "Failed for rule: {}", rule);
    }
}

// ============================================================================
// PredicateCompiler
// ============================================================================

#[test]
fn test_distributive_law() {
    let left = PredicateCompiler
        .compile(&ast("BUILD:1 AND (TYPE:rpm OR BUILD:2)"))
        .unwrap();
    let right = PredicateCompiler
        .compile(&ast("(BUILD:1 AND TYPE:rpm) OR (BUILD:1 AND BUILD:2)"))
        .unwrap();

    for v in samples() {
        assert_eq!(left(&v), right(&v), "Failed for version: {:?}", v);
    }
}

#[test]
fn test_and_before_or() {
    let plain = PredicateCompiler
        .compile(&ast("BUILD:1 AND TYPE:rpm OR BUILD:3"))
        .unwrap();
    let grouped = PredicateCompiler
        .compile(&ast("(BUILD:1 AND TYPE:rpm) OR BUILD:3"))
        .unwrap();
    let wrong = PredicateCompiler
        .compile(&ast("BUILD:1 AND (TYPE:rpm OR BUILD:3)"))
        .unwrap();

    for v in samples() {
        assert_eq!(plain(&v), grouped(&v), "Failed for version: {:?}", v);
    }

    // BUILD:3 alone only satisfies the ungrouped reading
    let v = version("1.0", "3", "jar");
    assert!(plain(&v));
    assert!(!wrong(&v));
}

#[test]
fn test_predicate_rejects_orderings() {
    let test_cases = vec!["SUFFIX-VERSION", "BUILD:1 SORT_BY SUFFIX-VERSION"];

    for rule in test_cases {
        let err = PredicateCompiler.compile(&ast(rule)).err().unwrap();
        assert_eq!(
            err.message(),
            "Only qualifiers joined by AND, OR or ',' are allowed here.",
            "Failed for rule: {}",
            rule
        );
    }
}

#[test]
fn test_empty_rule_not_allowed() {
    let empty = Arc::new(Ast::new());

    let err = PredicateCompiler.compile(&empty).err().unwrap();
    assert_eq!(err.message(), "Empty rule is not allowed.");

    let err = RankCompiler::default().compile(&empty).err().unwrap();
    assert_eq!(err.message(), "Empty rule is not allowed.");
}

// ============================================================================
// RankCompiler
// ============================================================================

#[test]
fn test_matching_ranks_higher() {
    let cmp = RankCompiler::default().compile(&ast("TYPE:rpm")).unwrap();
    let rpm = version("1.0", "1", "rpm");
    let jar = version("9.0", "1", "jar");

    assert_eq!(cmp(&rpm, &jar), Ordering::Greater);
    assert_eq!(cmp(&jar, &rpm), Ordering::Less);
    assert_eq!(cmp(&rpm, &version("2.0", "2", "rpm")), Ordering::Equal);
    assert_eq!(cmp(&jar, &version("2.0", "2", "jar")), Ordering::Equal);
}

#[test]
fn test_order_uses_version_comparator() {
    let natural = RankCompiler::default().compile(&ast("SUFFIX-VERSION")).unwrap();
    let suffixed = RankCompiler::new(suffix_version_comparator("redhat"))
        .compile(&ast("SUFFIX-VERSION"))
        .unwrap();

    let a = QualifiedVersion::new("1.0.0.redhat-10");
    let b = QualifiedVersion::new("1.0.0.redhat-9");

    // "1" < "9" as strings, 10 > 9 as rebuild numbers
    assert_eq!(natural(&a, &b), Ordering::Less);
    assert_eq!(suffixed(&a, &b), Ordering::Greater);
}

#[test]
fn test_sort_by() {
    let cmp = RankCompiler::new(natural_order())
        .compile(&ast("BUILD:1 AND TYPE:rpm SORT_BY SUFFIX-VERSION"))
        .unwrap();

    let old = version("1.0", "1", "rpm");
    let new = version("2.0", "1", "rpm");
    let other = version("9.0", "2", "rpm");
    let another = version("8.0", "1", "jar");

    // both match: the version string decides
    assert_eq!(cmp(&new, &old), Ordering::Greater);
    assert_eq!(cmp(&old, &new), Ordering::Less);

    // one matches: it wins regardless of version
    assert_eq!(cmp(&old, &other), Ordering::Greater);
    assert_eq!(cmp(&other, &old), Ordering::Less);

    // none matches: tie
    assert_eq!(cmp(&other, &another), Ordering::Equal);
}

fn build_token(id: &str) -> Token {
    Token::new(
        0,
        7,
        TokenKind::Qualifier {
            qualifier: Qualifier::Build,
            parts: vec![id.to_string()],
        },
    )
}

#[test]
fn test_rank_rejects_unsupported_shapes() {
    // SORT_BY followed by something other than an ordering
    let mut tree = Ast::new();
    let sort = tree.new_binary(Token::new(8, 15, TokenKind::SortBy)).unwrap();
    let left = tree.new_leaf(build_token("1"));
    let right = tree.new_leaf(build_token("2"));
    tree.attach(tree.root(), sort);
    tree.attach(sort, left);
    tree.attach(sort, right);

    let err: ValidationError = RankCompiler::default().compile(&Arc::new(tree)).err().unwrap();
    assert_eq!(
        err.message(),
        "An ordering such as SUFFIX-VERSION is required here."
    );

    // a parenthesis scope that was never closed
    let mut tree = Ast::new();
    let scope = tree.new_paren_scope(Token::new(0, 1, TokenKind::LParen));
    tree.attach(tree.root(), scope);

    let err = RankCompiler::default().compile(&Arc::new(tree)).err().unwrap();
    assert_eq!(err.message(), "Rank can't start with this token.");
    assert_eq!(err.pos(), Some(0));
}

#[test]
fn test_compiled_closures_are_shareable() {
    let cmp = RankCompiler::default()
        .compile(&ast("TYPE:rpm SORT_BY SUFFIX-VERSION"))
        .unwrap();

    let handle = std::thread::spawn(move || {
        cmp(&version("2.0", "1", "rpm"), &version("1.0", "1", "rpm"))
    });
    assert_eq!(handle.join().unwrap(), Ordering::Greater);
}
