// tests/alignment_tests.rs

use std::cmp::Ordering;
use std::sync::Arc;

use rank_lang::version::{natural_order, suffix_version_comparator};
use rank_lang::{AlignmentPredicate, AlignmentRanking, QualifiedVersion, Qualifier, TokenKind};

fn v(version: &str, qualifiers: &[(Qualifier, &str)]) -> QualifiedVersion {
    let mut out = QualifiedVersion::new(version);
    for (qualifier, value) in qualifiers {
        let parts: Vec<&str> = value.split(' ').collect();
        out.add(*qualifier, &parts);
    }
    out
}

fn ranking(rules: &[&str]) -> AlignmentRanking {
    AlignmentRanking::new(rules, natural_order()).unwrap()
}

// ============================================================================
// AlignmentPredicate
// ============================================================================

#[test]
fn test_predicate_is_or_of_terms() {
    let predicate = AlignmentPredicate::new(Some("BUILD:1, PRODUCT:EAP, VERSION:'RHSSO 7.4'")).unwrap();

    let test_cases = vec![
        (v("1", &[(Qualifier::Build, "1")]), true),
        (v("1", &[(Qualifier::Product, "EAP")]), true),
        (v("1", &[(Qualifier::Version, "RHSSO 7.4")]), true),
        (
            v("1", &[(Qualifier::Build, "2"), (Qualifier::Product, "EAP")]),
            true,
        ),
        (v("1", &[(Qualifier::Build, "2")]), false),
        (v("1", &[(Qualifier::Version, "RHSSO 7.5")]), false),
        (v("1", &[]), false),
    ];

    for (version, expected) in test_cases {
        assert_eq!(predicate.test(&version), expected, "Failed for {:?}", version);
    }
}

#[test]
fn test_absent_query_uses_default() {
    let all = AlignmentPredicate::new(None).unwrap();
    assert!(all.is_empty());
    assert!(all.tokens().is_empty());
    assert!(all.ast().is_none());
    assert!(all.test(&v("1", &[])));

    let none = AlignmentPredicate::with_default(None, Arc::new(|_: &QualifiedVersion| false)).unwrap();
    assert!(none.is_empty());
    assert!(!none.test(&v("1", &[(Qualifier::Build, "1")])));
}

#[test]
fn test_query_overrides_default() {
    let predicate = AlignmentPredicate::with_default(
        Some("BUILD:1"),
        Arc::new(|_: &QualifiedVersion| false),
    )
    .unwrap();

    assert!(!predicate.is_empty());
    assert_eq!(predicate.tokens().len(), 1);
    assert!(predicate.test(&v("1", &[(Qualifier::Build, "1")])));
}

#[test]
fn test_predicate_errors() {
    let test_cases = vec![
        ("", "Empty rule is not allowed."),
        ("BUILD:1 AND BUILD:2", "Unrecognized word 'AND'."),
        ("BUILD:1,", "end of rule is not allowed after ','."),
        (", BUILD:1", "A rule can't start with ','."),
        ("BUILD:1 BUILD:2", "'BUILD:2' is not allowed after 'BUILD:1'."),
    ];

    for (query, expected) in test_cases {
        let err = AlignmentPredicate::new(Some(query)).unwrap_err();
        assert_eq!(err.message(), expected, "Failed for query: {}", query);
    }
}

// ============================================================================
// AlignmentRanking construction
// ============================================================================

#[test]
fn test_default_rank_appended() {
    let ranking = ranking(&["QUALITY:RELEASED", "TYPE:jar"]);
    assert_eq!(
        ranking.rules().collect::<Vec<_>>(),
        vec!["QUALITY:RELEASED", "TYPE:jar", "SUFFIX-VERSION"]
    );
    assert_eq!(ranking.len(), 3);
    assert!(!ranking.is_default());

    let tokens = ranking.ranks_as_tokens();
    assert!(matches!(tokens[2], [token] if matches!(token.kind, TokenKind::Order(_))));
    assert_eq!(ranking.ranks_as_trees()[1].to_string(), "TYPE:jar");
}

#[test]
fn test_default_rank_not_duplicated() {
    let test_cases = vec![
        vec!["TYPE:jar", "SUFFIX-VERSION"],
        vec!["TYPE:jar", "suffix_version"],
    ];

    for rules in test_cases {
        let ranking = ranking(&rules);
        assert_eq!(ranking.len(), 2, "Failed for rules: {:?}", rules);
    }
}

#[test]
fn test_empty_rule_list_is_default() {
    let empty: [&str; 0] = [];
    let default = ranking(&empty);
    assert!(default.is_default());
    assert_eq!(default.len(), 1);
    assert!(!default.is_empty());

    assert!(ranking(&["SUFFIX-VERSION"]).is_default());
}

#[test]
fn test_default_rank_must_be_last() {
    let err = AlignmentRanking::new(&["SUFFIX-VERSION", "TYPE:jar"], natural_order()).unwrap_err();
    assert_eq!(err.message(), "SUFFIX-VERSION is not the last rank.");
    assert_eq!(err.pos(), Some(0));
    assert_eq!(err.end_pos(), Some(14));
}

#[test]
fn test_sort_by_rule_does_not_count_as_default() {
    let ranking = ranking(&["TYPE:jar SORT_BY SUFFIX-VERSION", "BUILD:1"]);
    assert_eq!(ranking.len(), 3);
}

#[test]
fn test_rank_errors() {
    let test_cases = vec![
        ("TYPE:jar, TYPE:rpm", "Character ',' is not allowed."),
        ("", "Empty rule is not allowed."),
        ("TYPE:jar AND", "end of rule is not allowed after 'and'."),
        (
            "(TYPE:jar",
            "Amount of parentheses do not match. Expecting another 1.",
        ),
    ];

    for (rule, expected) in test_cases {
        let err = AlignmentRanking::new(&[rule], natural_order()).unwrap_err();
        assert_eq!(err.message(), expected, "Failed for rule: {}", rule);
    }
}

// ============================================================================
// AlignmentRanking comparison
// ============================================================================

#[test]
fn test_first_deciding_rule_wins() {
    let ranking = ranking(&["QUALITY:RELEASED", "TYPE:jar"]);

    let released_rpm = v("1.0", &[(Qualifier::Quality, "RELEASED"), (Qualifier::Type, "rpm")]);
    let new_jar = v("2.0", &[(Qualifier::Quality, "NEW"), (Qualifier::Type, "jar")]);
    let released_jar = v("0.5", &[(Qualifier::Quality, "released"), (Qualifier::Type, "jar")]);

    assert_eq!(ranking.compare(&released_rpm, &new_jar), Ordering::Greater);
    assert_eq!(ranking.compare(&released_jar, &released_rpm), Ordering::Greater);
    // only the appended SUFFIX-VERSION tells these apart
    let released_jar_2 = v("0.6", &[(Qualifier::Quality, "RELEASED"), (Qualifier::Type, "jar")]);
    assert_eq!(ranking.compare(&released_jar, &released_jar_2), Ordering::Less);
}

#[test]
fn test_compare_is_antisymmetric() {
    let ranking = ranking(&[
        "QUALITY:RELEASED OR QUALITY:VERIFIED",
        "BUILD:1 AND TYPE:rpm SORT_BY SUFFIX-VERSION",
    ]);

    let versions = vec![
        v("1.0", &[(Qualifier::Quality, "RELEASED")]),
        v("1.1", &[(Qualifier::Quality, "VERIFIED"), (Qualifier::Build, "1")]),
        v("1.2", &[(Qualifier::Build, "1"), (Qualifier::Type, "rpm")]),
        v("0.9", &[(Qualifier::Build, "1"), (Qualifier::Type, "rpm")]),
        v("2.0", &[]),
        v("2.0", &[(Qualifier::Product, "EAP")]),
    ];

    for a in &versions {
        for b in &versions {
            assert_eq!(
                ranking.compare(a, b),
                ranking.compare(b, a).reverse(),
                "Failed for {:?} / {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn test_unrelated_qualifiers_tie() {
    let ranking = ranking(&["TYPE:jar"]);
    let a = v("1.0", &[(Qualifier::Product, "EAP")]);
    let b = v("1.0", &[(Qualifier::Product, "RHSSO"), (Qualifier::Build, "7")]);
    assert_eq!(ranking.compare(&a, &b), Ordering::Equal);
}

#[test]
fn test_matching_sorts_before_non_matching() {
    let ranking = ranking(&["BUILD:1 AND TYPE:rpm SORT_BY SUFFIX-VERSION"]);

    let mut versions = vec![
        v("9.9", &[(Qualifier::Build, "2"), (Qualifier::Type, "rpm")]),
        v("1.0", &[(Qualifier::Build, "1"), (Qualifier::Type, "rpm")]),
        v("1.1", &[(Qualifier::Build, "1"), (Qualifier::Type, "rpm")]),
        v("9.8", &[(Qualifier::Build, "1"), (Qualifier::Type, "jar")]),
    ];
    ranking.sort_best_first(&mut versions);

    let order: Vec<_> = versions.iter().map(|v| v.version()).collect();
    assert_eq!(order, vec!["1.1", "1.0", "9.9", "9.8"]);
    assert_eq!(ranking.best(&versions).map(|v| v.version()), Some("1.1"));
}

#[test]
fn test_best_of_nothing() {
    assert_eq!(ranking(&["TYPE:jar"]).best(&[]), None);
}

#[test]
fn test_override_version_comparator() {
    let mut ranking = ranking(&["TYPE:jar SORT_BY SUFFIX-VERSION"]);
    let a = v("1.0.0.redhat-10", &[(Qualifier::Type, "jar")]);
    let b = v("1.0.0.redhat-9", &[(Qualifier::Type, "jar")]);

    // "1" < "9" as strings until the suffix comparator is installed
    assert_eq!(ranking.compare(&a, &b), Ordering::Less);

    ranking
        .override_version_comparator(suffix_version_comparator("redhat"))
        .unwrap();
    assert_eq!(ranking.compare(&a, &b), Ordering::Greater);

    // rules are kept as they were
    assert_eq!(
        ranking.rules().collect::<Vec<_>>(),
        vec!["TYPE:jar SORT_BY SUFFIX-VERSION", "SUFFIX-VERSION"]
    );
}
