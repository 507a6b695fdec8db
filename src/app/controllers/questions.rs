use tracing::debug;

use crate::app::domain::collection::OrderedCollection;
use crate::app::domain::messages::DragEnd;
use crate::app::domain::question::{
    OptionId, OptionPatch, Question, QuestionId, QuestionKind, QuestionOption,
};
use crate::app::infrastructure::error::{AppError, Result};

/// Owns the questions of one form and hands out question and option ids.
/// Ids are never reused, even after the item is removed.
pub struct QuestionManager {
    questions: Vec<Question>,
    next_question_id: u64,
    next_option_id: u64,
}

impl Default for QuestionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionManager {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            next_question_id: 1,
            next_option_id: 1,
        }
    }

    fn next_question_id(&mut self) -> QuestionId {
        let id = QuestionId(self.next_question_id);
        self.next_question_id += 1;
        id
    }

    fn next_option_id(&mut self) -> OptionId {
        let id = OptionId(self.next_option_id);
        self.next_option_id += 1;
        id
    }

    pub fn add_text_question(&mut self, title: impl Into<String>) -> QuestionId {
        let id = self.next_question_id();
        self.questions.push(Question::new_text(id, title));
        id
    }

    pub fn add_ranking_question(&mut self, title: impl Into<String>) -> QuestionId {
        let id = self.next_question_id();
        self.questions.push(Question::new_ranking(id, title));
        id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    fn options(&self, id: QuestionId) -> Result<&OrderedCollection<QuestionOption>> {
        let question = self.question(id).ok_or(AppError::QuestionNotFound(id))?;
        question.options().ok_or(AppError::NotRankingQuestion(id))
    }

    /// Swap in a new option list. The old value is dropped, never edited.
    fn replace_options(&mut self, id: QuestionId, options: OrderedCollection<QuestionOption>) {
        if let Some(question) = self.questions.iter_mut().find(|q| q.id == id) {
            debug!(question = %id, count = options.len(), "Options updated");
            question.kind = QuestionKind::Ranking { options };
        }
    }

    /// Append a new option with a freshly minted id.
    pub fn add_option(&mut self, question: QuestionId, text: impl Into<String>) -> Result<OptionId> {
        // Validate before minting so a failed call does not burn an id
        self.options(question)?;
        let option_id = self.next_option_id();
        let options = self
            .options(question)?
            .append(QuestionOption::new(option_id, question, text))?;
        self.replace_options(question, options);
        Ok(option_id)
    }

    /// Apply a finished drag. Returns whether the order actually changed.
    pub fn move_option(&mut self, question: QuestionId, drag: DragEnd) -> Result<bool> {
        let current = self.options(question)?;
        let moved = current.move_item(drag.source, drag.destination)?;
        if &moved == current {
            debug!(question = %question, ?drag, "Drag left option order unchanged");
            return Ok(false);
        }
        self.replace_options(question, moved);
        Ok(true)
    }

    pub fn update_option(&mut self, question: QuestionId, option: OptionId, patch: OptionPatch) -> Result<()> {
        let options = self.options(question)?.update_by_id(&option, patch)?;
        self.replace_options(question, options);
        Ok(())
    }

    pub fn remove_option(&mut self, question: QuestionId, option: OptionId) -> Result<()> {
        let options = self.options(question)?.remove_by_id(&option)?;
        self.replace_options(question, options);
        Ok(())
    }
}
