//! Filter rule model and the per-rule activity report row.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// How a rule's pattern is compared against a sender address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Contains,
    StartsWith,
    EndsWith,
}

impl RuleType {
    pub const ALL: [RuleType; 3] = [RuleType::Contains, RuleType::StartsWith, RuleType::EndsWith];

    /// Stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Contains => "contains",
            RuleType::StartsWith => "starts_with",
            RuleType::EndsWith => "ends_with",
        }
    }

    /// Human readable label for admin listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            RuleType::Contains => "Contains",
            RuleType::StartsWith => "Starts with",
            RuleType::EndsWith => "Ends with",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown rule type '{s}'"))
    }
}

/// Label for a stored type string; unrecognized types are shown verbatim.
pub fn rule_type_name(rule_type: &str) -> &str {
    rule_type
        .parse::<RuleType>()
        .map(|t| t.display_name())
        .unwrap_or(rule_type)
}

/// A stored filter rule. The type stays a string so rows written by other
/// tools with unknown types load fine and simply never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FilterRule {
    pub id: i64,
    pub rule_type: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFilterRule {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "is required"),
        custom(function = "validate_rule_type")
    )]
    pub rule_type: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub pattern: String,
}

fn validate_rule_type(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<RuleType>().is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("rule_type");
    err.message = Some("must be one of contains, starts_with, ends_with".into());
    Err(err)
}

/// Selectable rule type for admin forms.
#[derive(Debug, Clone, Serialize)]
pub struct RuleTypeOption {
    pub rule_type: RuleType,
    pub name: &'static str,
}

impl From<RuleType> for RuleTypeOption {
    fn from(rule_type: RuleType) -> Self {
        Self {
            rule_type,
            name: rule_type.display_name(),
        }
    }
}

/// Aggregated activity for one rule.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RuleActivity {
    pub id: i64,
    pub rule_type: String,
    pub pattern: String,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
    pub cnt_total: i64,
    pub cnt_last_day: i64,
    /// Display label for `rule_type`, filled in after the query.
    #[sqlx(skip)]
    pub type_name: String,
}
