use std::fmt;

use serde::{Deserialize, Serialize};

use super::collection::{Identified, OrderedCollection, Patchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionId(pub u64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text given to options created by "Add Option".
pub const NEW_OPTION_TEXT: &str = "New Option";

/// One answer option of a ranking question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: OptionId,
    pub question_id: QuestionId,
    pub text: String,
}

impl QuestionOption {
    pub fn new(id: OptionId, question_id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            id,
            question_id,
            text: text.into(),
        }
    }
}

/// Fields of an option that an editor may change. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionPatch {
    pub text: Option<String>,
}

impl OptionPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

impl Identified for QuestionOption {
    type Id = OptionId;

    fn id(&self) -> &OptionId {
        &self.id
    }
}

impl Patchable for QuestionOption {
    type Patch = OptionPatch;

    fn apply_patch(&mut self, patch: OptionPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Ranking {
        #[serde(default)]
        options: OrderedCollection<QuestionOption>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn new_text(id: QuestionId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            kind: QuestionKind::Text,
        }
    }

    pub fn new_ranking(id: QuestionId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            kind: QuestionKind::Ranking {
                options: OrderedCollection::new(),
            },
        }
    }

    /// Options of a ranking question; `None` for other question types.
    pub fn options(&self) -> Option<&OrderedCollection<QuestionOption>> {
        match &self.kind {
            QuestionKind::Ranking { options } => Some(options),
            QuestionKind::Text => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_patch_keeps_identity() {
        let mut option = QuestionOption::new(OptionId(4), QuestionId(1), "Red");
        option.apply_patch(OptionPatch::text("Blue"));
        assert_eq!(option.id, OptionId(4));
        assert_eq!(option.question_id, QuestionId(1));
        assert_eq!(option.text, "Blue");

        option.apply_patch(OptionPatch::default());
        assert_eq!(option.text, "Blue");
    }

    #[test]
    fn test_text_question_has_no_options() {
        let q = Question::new_text(QuestionId(1), "Your name?");
        assert_eq!(q.kind, QuestionKind::Text);
        assert!(q.options().is_none());
    }

    #[test]
    fn test_question_serialization() {
        let q = Question::new_ranking(QuestionId(2), "Rank these");
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains("\"type\":\"ranking\""));
        assert!(json.contains("\"options\":[]"));
        let loaded: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, q);
    }

    #[test]
    fn test_ranking_without_options_field() {
        let json = r#"{"id": 3, "title": "Rank", "type": "ranking"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.options().map(|o| o.len()), Some(0));
    }

    #[test]
    fn test_duplicate_option_ids_rejected() {
        let json = r#"{
            "id": 3, "title": "Rank", "type": "ranking",
            "options": [
                {"id": 1, "question_id": 3, "text": "A"},
                {"id": 1, "question_id": 3, "text": "B"}
            ]
        }"#;
        let result: Result<Question, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
