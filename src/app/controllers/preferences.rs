use tracing::{debug, info, warn};

use crate::app::domain::preferences::PreferenceState;
use crate::app::services::storage::{PreferenceStorage, decode_preferences, encode_preferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

type Listener = Box<dyn FnMut(&PreferenceState)>;

/// Process-wide preference state behind an explicit handle.
///
/// Constructed once at startup and handed to whoever needs it. Each mutation
/// swaps in a complete new state, notifies listeners, then persists.
///
/// Persistence is synchronous: `toggle_theme` and `set_language` write to the
/// storage backend (disk, for `FileStorage`) before returning, always after
/// every listener has seen the new state. Storage failures are logged and
/// never surface to the caller.
pub struct PreferenceStore<S: PreferenceStorage> {
    state: PreferenceState,
    storage: S,
    key: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription_id: u64,
}

impl<S: PreferenceStorage> PreferenceStore<S> {
    /// Load the snapshot stored under `key`, or fall back to defaults.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = match storage.load(&key) {
            Ok(Some(raw)) => match decode_preferences(&key, &raw) {
                Ok(state) => {
                    info!(key = %key, dark = state.dark_mode(), language = state.language(), "Loaded preferences");
                    state
                }
                Err(e) => {
                    warn!(error = %e, "Malformed preferences record. Using defaults.");
                    PreferenceState::default()
                }
            },
            Ok(None) => {
                debug!(key = %key, "No stored preferences, using defaults");
                PreferenceState::default()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read preferences. Using defaults.");
                PreferenceState::default()
            }
        };

        Self {
            state,
            storage,
            key,
            listeners: Vec::new(),
            next_subscription_id: 1,
        }
    }

    pub fn state(&self) -> &PreferenceState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Flip between the light and dark theme.
    pub fn toggle_theme(&mut self) {
        let next = self.state.with_theme_toggled();
        info!(dark = next.dark_mode(), "Theme toggled");
        self.commit(next);
    }

    /// Set the UI language. Any string is accepted.
    pub fn set_language(&mut self, language: impl Into<String>) {
        let next = self.state.with_language(language);
        info!(language = next.language(), "Language changed");
        self.commit(next);
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&PreferenceState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, next: PreferenceState) {
        self.state = next;
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
        self.persist();
    }

    fn persist(&mut self) {
        let raw = match encode_preferences(&self.state) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize preferences");
                return;
            }
        };
        if let Err(e) = self.storage.store(&self.key, &raw) {
            warn!(error = %e, "Failed to save preferences");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::app::domain::preferences::Palette;
    use crate::app::infrastructure::error::PersistenceError;
    use crate::app::services::storage::{FileStorage, MemoryStorage, PREFERENCES_KEY};

    /// Storage whose reads and writes always fail.
    struct BrokenStorage;

    impl PreferenceStorage for BrokenStorage {
        fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Load { key: key.to_string(), reason: "unreachable".to_string() })
        }

        fn store(&mut self, key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Write { key: key.to_string(), reason: "read-only".to_string() })
        }
    }

    fn fresh_store() -> PreferenceStore<MemoryStorage> {
        PreferenceStore::open(MemoryStorage::new(), PREFERENCES_KEY)
    }

    #[test]
    fn test_fresh_store_defaults() {
        let store = fresh_store();
        assert_eq!(store.state(), &PreferenceState::default());
        assert!(store.storage().get(PREFERENCES_KEY).is_none());
    }

    #[test]
    fn test_toggle_theme_twice() {
        let mut store = fresh_store();
        store.toggle_theme();
        assert!(store.state().dark_mode());
        assert_eq!(store.state().palette(), Palette::DARK);

        store.toggle_theme();
        assert!(!store.state().dark_mode());
        assert_eq!(store.state().palette(), Palette::LIGHT);
    }

    #[test]
    fn test_language_survives_theme_toggle() {
        let mut store = fresh_store();
        store.set_language("fr");
        store.toggle_theme();
        assert_eq!(store.state().language(), "fr");
    }

    #[test]
    fn test_any_language_accepted() {
        let mut store = fresh_store();
        store.set_language("");
        assert_eq!(store.state().language(), "");
        store.set_language("tlh-Klingon");
        assert_eq!(store.state().language(), "tlh-Klingon");
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = fresh_store();
        store.toggle_theme();
        let reopened = PreferenceStore::open(store.storage().clone(), PREFERENCES_KEY);
        assert!(reopened.state().dark_mode());

        store.set_language("ja");
        let reopened = PreferenceStore::open(store.storage().clone(), PREFERENCES_KEY);
        assert_eq!(reopened.state(), store.state());
    }

    #[test]
    fn test_malformed_record_falls_back_to_defaults() {
        let storage = MemoryStorage::with_entry(PREFERENCES_KEY, "{\"state\": {\"theme\": 12");
        let store = PreferenceStore::open(storage, PREFERENCES_KEY);
        assert_eq!(store.state(), &PreferenceState::default());
    }

    #[test]
    fn test_read_failure_falls_back_to_defaults() {
        let store = PreferenceStore::open(BrokenStorage, PREFERENCES_KEY);
        assert_eq!(store.state(), &PreferenceState::default());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let mut store = PreferenceStore::open(BrokenStorage, PREFERENCES_KEY);
        store.toggle_theme();
        store.set_language("it");
        assert!(store.state().dark_mode());
        assert_eq!(store.state().language(), "it");
    }

    #[test]
    fn test_listeners_see_consistent_state() {
        let seen: Rc<RefCell<Vec<(bool, Palette, String)>>> = Rc::new(RefCell::new(Vec::new()));
        let mut store = fresh_store();
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| {
            sink.borrow_mut().push((state.dark_mode(), state.palette(), state.language().to_string()));
        });

        store.toggle_theme();
        store.set_language("pt");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (true, Palette::DARK, "en".to_string()));
        assert_eq!(seen[1], (true, Palette::DARK, "pt".to_string()));
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut store = fresh_store();
        let counter = Rc::clone(&count);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.toggle_theme();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.toggle_theme();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_file_backed_store_survives_restart() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let mut store = PreferenceStore::open(FileStorage::new(dir.path()), PREFERENCES_KEY);
            store.toggle_theme();
            store.set_language("fr");
        }
        let store = PreferenceStore::open(FileStorage::new(dir.path()), PREFERENCES_KEY);
        assert!(store.state().dark_mode());
        assert_eq!(store.state().language(), "fr");
        assert_eq!(store.state().palette(), Palette::DARK);
    }
}
