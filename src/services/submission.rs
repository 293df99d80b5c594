//! Contact form submission check: load rules, evaluate, log, decide.

use chrono::Utc;
use sqlx::PgPool;

use crate::db::Tables;
use crate::errors::AppError;
use crate::models::filter_rule::FilterRule;
use crate::models::submission::{rejection_message, ContactSubmission, SubmissionVerdict};
use crate::services::{activity, matcher, rules};

/// What to do when the rule set cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Accept the submission and log the fault.
    FailOpen,
    /// Propagate the fault to the caller.
    FailClosed,
}

impl FailurePolicy {
    pub fn from_fail_closed(fail_closed: bool) -> Self {
        if fail_closed {
            Self::FailClosed
        } else {
            Self::FailOpen
        }
    }
}

/// Rule set memoized for the lifetime of one request.
///
/// Build a fresh value per request; it is never shared between requests.
#[derive(Debug, Default)]
pub struct RequestRules {
    cached: Option<Vec<FilterRule>>,
}

impl RequestRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that already holds `rules` and will not query the store.
    pub fn preloaded(rules: Vec<FilterRule>) -> Self {
        Self {
            cached: Some(rules),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.is_some()
    }

    /// Load on first use, then serve the cached rules.
    pub async fn get(&mut self, pool: &PgPool, tables: &Tables) -> Result<&[FilterRule], AppError> {
        let rules = match self.cached.take() {
            Some(rules) => rules,
            None => rules::load_rules(pool, tables).await?,
        };
        Ok(self.cached.insert(rules).as_slice())
    }
}

/// Validate one submission.
///
/// Every matching rule gets an activity entry stamped with the time the check
/// started. A match yields a verdict carrying one message for the sender.
pub async fn check_submission(
    pool: &PgPool,
    tables: &Tables,
    policy: FailurePolicy,
    cache: &mut RequestRules,
    submission: &ContactSubmission,
) -> Result<SubmissionVerdict, AppError> {
    let ts = Utc::now();
    let email = submission.from_email.as_str();

    tracing::debug!(cached = cache.is_loaded(), "Loading filter rules for submission");
    let loaded = match cache.get(pool, tables).await {
        Ok(rules) => rules,
        Err(e) if policy == FailurePolicy::FailOpen => {
            tracing::error!(error = %e, "Could not load filter rules, accepting submission");
            return Ok(SubmissionVerdict::accepted());
        }
        Err(e) => return Err(e),
    };

    let evaluation = matcher::evaluate(email, loaded);
    if !evaluation.blocked {
        tracing::debug!(rules = loaded.len(), "Contact form submission accepted");
        return Ok(SubmissionVerdict::accepted());
    }

    let written =
        activity::record_matches(pool, tables, &evaluation.matched_rule_ids, ts).await;
    tracing::info!(
        matched = ?evaluation.matched_rule_ids,
        logged = written,
        contact = %submission.contact.email,
        "Blocked contact form submission"
    );

    Ok(SubmissionVerdict {
        blocked: true,
        matched_rule_ids: evaluation.matched_rule_ids,
        errors: vec![rejection_message(&submission.contact.email)],
    })
}
