//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - The ordered, uniquely identified collection behind ranking options
//! - Questions and their options
//! - User preferences and the theme palette
//! - Message types for the event system

pub mod collection;
pub mod messages;
pub mod preferences;
pub mod question;

pub use collection::{Identified, OrderedCollection, Patchable};
pub use messages::{DragEnd, Message};
pub use preferences::{Color, Palette, PreferenceState, Theme};
pub use question::{OptionId, OptionPatch, Question, QuestionId, QuestionKind, QuestionOption};
