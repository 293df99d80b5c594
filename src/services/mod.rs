//! Business logic services.

pub mod activity;
pub mod matcher;
pub mod rules;
pub mod submission;
