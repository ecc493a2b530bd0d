use std::collections::HashMap;

use log::{debug, info};

use crate::events::{EventBus, RepoEvent};
use crate::models::{Note, Notebook, Settings, StorageManager, StoreSnapshot};

/// In-memory note/notebook store synchronized with the persisted documents.
///
/// The note's `notebook_id` is the single source of truth for ownership; the
/// notebook→note-id index is derived from it after every mutation, ordered by
/// note creation time (ties broken by id). Every successful mutation rewrites
/// the whole persisted store.
#[derive(Debug)]
pub struct NoteRepository {
    notes: HashMap<String, Note>,
    notebooks: HashMap<String, Notebook>,
    notebook_index: HashMap<String, Vec<String>>,
    active_note: Option<String>,
    settings: Settings,
    storage: StorageManager,
    events: EventBus,
}

impl NoteRepository {
    /// Loads the persisted store. A malformed document is fatal here by
    /// design: the error propagates and startup aborts.
    pub fn open(storage: StorageManager) -> anyhow::Result<Self> {
        let StoreSnapshot {
            notes,
            notebooks,
            settings,
        } = storage.load()?;

        info!(
            "store loaded: {} notes, {} notebooks from {}",
            notes.len(),
            notebooks.len(),
            storage.data_dir().display()
        );

        let mut repo = Self {
            notes,
            notebooks,
            notebook_index: HashMap::new(),
            active_note: None,
            settings,
            storage,
            events: EventBus::new(),
        };
        repo.rebuild_index();
        Ok(repo)
    }

    pub fn events(&self) -> flume::Receiver<RepoEvent> {
        self.events.subscribe()
    }

    pub fn notes(&self) -> &HashMap<String, Note> {
        &self.notes
    }

    pub fn notebooks(&self) -> &HashMap<String, Notebook> {
        &self.notebooks
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn notebook(&self, id: &str) -> Option<&Notebook> {
        self.notebooks.get(id)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Notebooks in a stable presentation order (creation time, then id).
    pub fn notebooks_ordered(&self) -> Vec<&Notebook> {
        let mut list: Vec<&Notebook> = self.notebooks.values().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        list
    }

    /// The derived note-id list of a notebook. Empty for unknown notebooks.
    pub fn notes_in(&self, notebook_id: &str) -> &[String] {
        self.notebook_index
            .get(notebook_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn active_note_id(&self) -> Option<&str> {
        self.active_note.as_deref()
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.active_note.as_deref().and_then(|id| self.notes.get(id))
    }

    /// Creates a note with placeholder title/content in the target notebook,
    /// makes it the active selection and persists. Returns the new id.
    pub fn create_note(&mut self, notebook_id: &str) -> Result<String, String> {
        if !self.notebooks.contains_key(notebook_id) {
            return Err(format!("Notebook not found: {notebook_id}"));
        }

        let note = Note::new(notebook_id);
        let note_id = note.id.clone();
        self.notes.insert(note_id.clone(), note);
        self.rebuild_index();

        self.active_note = Some(note_id.clone());
        self.persist()?;

        self.events.publish(RepoEvent::NoteCreated(note_id.clone()));
        self.events
            .publish(RepoEvent::ActiveNoteChanged(Some(note_id.clone())));
        debug!("note created: {note_id} in notebook {notebook_id}");
        Ok(note_id)
    }

    /// Sets the active selection. Unknown ids are ignored.
    pub fn load_note(&mut self, id: &str) {
        if !self.notes.contains_key(id) {
            return;
        }
        self.active_note = Some(id.to_string());
        self.events
            .publish(RepoEvent::ActiveNoteChanged(Some(id.to_string())));
    }

    /// Overwrites the active note's title and content from the editing
    /// surface, refreshes its modification timestamp and persists the whole
    /// store. A missing active selection is a no-op.
    pub fn save_active_note(&mut self, title: &str, content: &str) -> Result<(), String> {
        let Some(id) = self.active_note.clone() else {
            return Ok(());
        };
        let Some(note) = self.notes.get_mut(&id) else {
            return Ok(());
        };

        note.update(title, content);
        self.persist()?;
        self.events.publish(RepoEvent::NoteUpdated(id));
        Ok(())
    }

    /// Removes a note. The caller is responsible for interactive
    /// confirmation. If the deleted note was active, another remaining note
    /// (map iteration order) becomes active, or a fresh note is created so
    /// the application is never left without a selection.
    pub fn delete_note(&mut self, id: &str) -> Result<(), String> {
        if self.notes.remove(id).is_none() {
            return Ok(());
        }
        self.rebuild_index();
        self.events.publish(RepoEvent::NoteDeleted(id.to_string()));

        if self.active_note.as_deref() == Some(id) {
            self.active_note = None;
            match self.notes.keys().next().cloned() {
                Some(next_id) => {
                    self.active_note = Some(next_id.clone());
                    self.persist()?;
                    self.events
                        .publish(RepoEvent::ActiveNoteChanged(Some(next_id)));
                }
                None => {
                    // create_note persists and publishes on its own.
                    let fallback = self
                        .notebooks
                        .keys()
                        .next()
                        .cloned()
                        .ok_or_else(|| "No notebook left to create a note in".to_string())?;
                    self.create_note(&fallback)?;
                }
            }
        } else {
            self.persist()?;
        }

        debug!("note deleted: {id}");
        Ok(())
    }

    /// Creates a notebook from an interactive name prompt. Empty or
    /// whitespace-only names are rejected.
    pub fn create_notebook(&mut self, name: &str) -> Result<String, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Notebook name cannot be empty".to_string());
        }

        let notebook = Notebook::new(name);
        let notebook_id = notebook.id.clone();
        self.notebooks.insert(notebook_id.clone(), notebook);
        self.persist()?;

        self.events
            .publish(RepoEvent::NotebookCreated(notebook_id.clone()));
        debug!("notebook created: {notebook_id} ({name})");
        Ok(notebook_id)
    }

    /// Appends `target_id` to the note's linked-note list. The target is
    /// never validated; dangling links are tolerated by the graph view.
    pub fn link_notes(&mut self, note_id: &str, target_id: &str) -> Result<(), String> {
        let Some(note) = self.notes.get_mut(note_id) else {
            return Err(format!("Note not found: {note_id}"));
        };
        note.add_link(target_id);
        self.persist()?;
        self.events
            .publish(RepoEvent::NoteUpdated(note_id.to_string()));
        Ok(())
    }

    /// Applies a settings mutation and persists.
    pub fn update_settings(&mut self, apply: impl FnOnce(&mut Settings)) -> Result<(), String> {
        apply(&mut self.settings);
        self.persist()?;
        self.events.publish(RepoEvent::SettingsChanged);
        Ok(())
    }

    /// Startup guarantee: the editor always has a note to bind to.
    pub fn ensure_active_note(&mut self) -> Result<(), String> {
        if self.active_note.is_some() {
            return Ok(());
        }
        match self.notes.keys().next().cloned() {
            Some(id) => {
                self.load_note(&id);
                Ok(())
            }
            None => {
                let notebook_id = self
                    .notebooks
                    .keys()
                    .next()
                    .cloned()
                    .ok_or_else(|| "No notebook to create the initial note in".to_string())?;
                self.create_note(&notebook_id).map(|_| ())
            }
        }
    }

    /// Serializes and rewrites all three persisted documents.
    pub fn persist(&self) -> Result<(), String> {
        self.storage
            .save(&self.notes, &self.notebooks, &self.settings)
            .map_err(|e| format!("Failed to save store: {e}"))?;
        self.events.publish(RepoEvent::StoreSaved);
        Ok(())
    }

    pub fn storage(&self) -> &StorageManager {
        &self.storage
    }

    fn rebuild_index(&mut self) {
        let mut index: HashMap<String, Vec<String>> = HashMap::new();
        for notebook_id in self.notebooks.keys() {
            index.insert(notebook_id.clone(), Vec::new());
        }

        let mut notes: Vec<&Note> = self.notes.values().collect();
        notes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        for note in notes {
            index.entry(note.notebook_id.clone()).or_default().push(note.id.clone());
        }

        self.notebook_index = index;
    }
}
