//! Activity log entries written when a rule blocks a submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ActivityRecord {
    pub id: i64,
    pub rule_id: i64,
    pub ts: DateTime<Utc>,
}
