//! Controllers layer - orchestration of domain operations.
//!
//! - `questions` - QuestionManager: owns questions and mints ids
//! - `preferences` - PreferenceStore: preference state, listeners, persistence

pub mod preferences;
pub mod questions;
