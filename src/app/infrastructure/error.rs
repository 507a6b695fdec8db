use thiserror::Error;

use crate::app::domain::question::QuestionId;

/// Failures of an `OrderedCollection` mutation. The collection is never
/// left partially modified when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("No item with id {0}")]
    NotFound(String),

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Persistence failures. The preference store absorbs both kinds: a load
/// failure falls back to defaults and a write failure is only logged.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to load '{key}': {reason}")]
    Load { key: String, reason: String },

    #[error("Failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Collection error: {0}")]
    Collection(#[from] CollectionError),

    #[error("Question {0} not found")]
    QuestionNotFound(QuestionId),

    #[error("Question {0} is not a ranking question")]
    NotRankingQuestion(QuestionId),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_error_conversion() {
        let err: AppError = CollectionError::NotFound("7".to_string()).into();
        assert!(matches!(err, AppError::Collection(CollectionError::NotFound(_))));
        assert_eq!(err.to_string(), "Collection error: No item with id 7");
    }

    #[test]
    fn test_error_display() {
        let err = CollectionError::IndexOutOfBounds { index: 5, len: 3 };
        assert_eq!(err.to_string(), "Index 5 out of bounds for length 3");

        let err = PersistenceError::Write {
            key: "preferences-storage".to_string(),
            reason: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to write 'preferences-storage': disk full");

        let err = AppError::QuestionNotFound(QuestionId(3));
        assert_eq!(err.to_string(), "Question 3 not found");
    }
}
