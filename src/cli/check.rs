//! Validate rules without running them

use std::fmt::Write;

use super::CliError;
use crate::{AlignmentPredicate, AlignmentRanking, Ast, Token, version::natural_order};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Filter to validate
    pub predicate: Option<String>,
    /// Rank rules to validate
    pub ranks: Vec<String>,
}

/// One compiled rule, for display
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedRule {
    pub kind: &'static str,
    pub rule: String,
    pub tokens: Vec<String>,
    pub tree: String,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckResult {
    pub rules: Vec<CheckedRule>,
}

impl CheckResult {
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            let _ = writeln!(out, "{} {}", rule.kind, rule.rule);
            let _ = writeln!(out, "  tokens: {}", rule.tokens.join(" | "));
            let _ = writeln!(out, "  tree:   {}", rule.tree);
        }
        out.push_str("Syntax is valid\n");
        out
    }
}

fn checked(kind: &'static str, rule: &str, tokens: &[Token], tree: Option<&Ast>) -> CheckedRule {
    CheckedRule {
        kind,
        rule: rule.to_string(),
        tokens: tokens.iter().map(Token::to_string).collect(),
        tree: tree.map(Ast::to_string).unwrap_or_default(),
    }
}

/// Compile the predicate and ranking, reporting the first invalid rule
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let mut result = CheckResult::default();

    if let Some(query) = &options.predicate {
        let predicate = AlignmentPredicate::new(Some(query))?;
        result.rules.push(checked(
            "predicate",
            query,
            predicate.tokens(),
            predicate.ast(),
        ));
    }

    if !options.ranks.is_empty() {
        let ranking = AlignmentRanking::new(&options.ranks, natural_order())?;
        let tokens = ranking.ranks_as_tokens();
        let trees = ranking.ranks_as_trees();
        for ((rule, tokens), tree) in ranking.rules().zip(tokens).zip(trees) {
            result.rules.push(checked("rank", rule, tokens, Some(tree)));
        }
    }

    Ok(result)
}
