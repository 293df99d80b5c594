//! Sender address matching against filter rules.
//!
//! Pure functions only; persistence of matches lives in
//! [`crate::services::activity`]. Rust strings are UTF-8, so comparing whole
//! `str` values compares complete characters and non-ASCII domains behave
//! the same as ASCII ones.

use serde::Serialize;

use crate::models::filter_rule::{FilterRule, RuleType};

/// Result of running one address through a rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub blocked: bool,
    /// Ids of every matching rule, in rule-set order.
    pub matched_rule_ids: Vec<i64>,
}

/// Check one address against a stored rule. Unknown types never match.
pub fn rule_matches(email: &str, rule_type: &str, pattern: &str) -> bool {
    match rule_type.parse::<RuleType>() {
        Ok(kind) => kind_matches(email, kind, pattern),
        Err(_) => false,
    }
}

/// Case-sensitive comparison; an empty pattern matches every address.
pub fn kind_matches(email: &str, kind: RuleType, pattern: &str) -> bool {
    match kind {
        RuleType::Contains => email.contains(pattern),
        RuleType::StartsWith => email.starts_with(pattern),
        RuleType::EndsWith => email.ends_with(pattern),
    }
}

/// Evaluate every rule; all matches are collected so each one gets its own
/// activity entry.
pub fn evaluate(email: &str, rules: &[FilterRule]) -> Evaluation {
    let matched_rule_ids: Vec<i64> = rules
        .iter()
        .filter(|rule| rule_matches(email, &rule.rule_type, &rule.pattern))
        .map(|rule| rule.id)
        .collect();

    Evaluation {
        blocked: !matched_rule_ids.is_empty(),
        matched_rule_ids,
    }
}
