//! Database models and DTOs.

pub mod activity;
pub mod filter_rule;
pub mod pagination;
pub mod submission;
