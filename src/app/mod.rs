//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (OrderedCollection, Question, PreferenceState, Message)
//! - `controllers/` - Orchestration (QuestionManager, PreferenceStore)
//! - `services/` - Persistence of preference snapshots
//! - `infrastructure/` - Errors and on-disk locations
//! - `state.rs` - Message dispatch

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::preferences::{PreferenceStore, SubscriptionId};
pub use controllers::questions::QuestionManager;
pub use domain::{
    Color, DragEnd, Identified, Message, OptionId, OptionPatch, OrderedCollection, Palette, Patchable,
    PreferenceState, Question, QuestionId, QuestionKind, QuestionOption, Theme,
};
pub use infrastructure::error::{AppError, CollectionError, PersistenceError, Result};
pub use infrastructure::paths::StorageConfig;
pub use services::storage::{FileStorage, MemoryStorage, PREFERENCES_KEY, PreferenceStorage};
pub use state::AppState;
