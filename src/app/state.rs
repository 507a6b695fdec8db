use tracing::debug;

use super::controllers::preferences::PreferenceStore;
use super::controllers::questions::QuestionManager;
use super::domain::messages::Message;
use super::domain::question::{NEW_OPTION_TEXT, OptionPatch};
use super::infrastructure::error::Result;
use super::services::storage::PreferenceStorage;

/// Application coordinator: routes every `Message` to the component that owns it.
/// The preference store is injected so callers pick the storage backend.
pub struct AppState<S: PreferenceStorage> {
    pub questions: QuestionManager,
    pub preferences: PreferenceStore<S>,
}

impl<S: PreferenceStorage> AppState<S> {
    pub fn new(preferences: PreferenceStore<S>) -> Self {
        Self {
            questions: QuestionManager::new(),
            preferences,
        }
    }

    pub fn dispatch(&mut self, message: Message) -> Result<()> {
        debug!(?message, "Dispatching");
        match message {
            Message::AddOption { question } => {
                self.questions.add_option(question, NEW_OPTION_TEXT)?;
            }
            Message::MoveOption { question, drag } => {
                self.questions.move_option(question, drag)?;
            }
            Message::RenameOption { question, option, text } => {
                self.questions.update_option(question, option, OptionPatch::text(text))?;
            }
            Message::RemoveOption { question, option } => {
                self.questions.remove_option(question, option)?;
            }
            Message::ToggleTheme => self.preferences.toggle_theme(),
            Message::SetLanguage(language) => self.preferences.set_language(language),
        }
        Ok(())
    }
}
