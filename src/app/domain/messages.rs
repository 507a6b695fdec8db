use super::question::{OptionId, QuestionId};

/// Result of a finished drag gesture. `destination` is `None` when the drag
/// was cancelled or dropped outside a valid target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    pub source: usize,
    pub destination: Option<usize>,
}

impl DragEnd {
    pub fn new(source: usize, destination: Option<usize>) -> Self {
        Self { source, destination }
    }
}

/// Every user intent the builder reacts to.
/// Views send one of these; `AppState::dispatch` handles them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Ranking options
    AddOption { question: QuestionId },
    MoveOption { question: QuestionId, drag: DragEnd },
    RenameOption { question: QuestionId, option: OptionId, text: String },
    RemoveOption { question: QuestionId, option: OptionId },

    // Preferences
    ToggleTheme,
    SetLanguage(String),
}
