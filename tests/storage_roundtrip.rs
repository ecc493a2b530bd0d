use std::fs;

use filament::models::{
    DEFAULT_NOTEBOOK_ID, DEFAULT_NOTEBOOK_NAME, NoteRepository, Settings, StorageManager, Theme,
};
use tempfile::TempDir;

#[test]
fn missing_documents_load_as_seeded_defaults() {
    let dir = TempDir::new().unwrap();
    let storage = StorageManager::with_root(dir.path()).unwrap();

    let snapshot = storage.load().unwrap();
    assert!(snapshot.notes.is_empty());
    assert_eq!(snapshot.notebooks.len(), 1);

    let seeded = &snapshot.notebooks[DEFAULT_NOTEBOOK_ID];
    assert_eq!(seeded.id, DEFAULT_NOTEBOOK_ID);
    assert_eq!(seeded.name, DEFAULT_NOTEBOOK_NAME);

    assert_eq!(snapshot.settings, Settings::default());
}

#[test]
fn save_then_load_round_trips_all_three_documents() {
    let dir = TempDir::new().unwrap();

    let (notes, notebooks, settings) = {
        let storage = StorageManager::with_root(dir.path()).unwrap();
        let mut repo = NoteRepository::open(storage).unwrap();

        let work = repo.create_notebook("Work").unwrap();
        repo.create_note(&work).unwrap();
        repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
        repo.save_active_note("Groceries", "- milk\n- bread").unwrap();
        repo.update_settings(|s| {
            s.theme = Theme::Dark;
            s.sync_path = "/backups/notes".to_string();
        })
        .unwrap();

        (
            repo.notes().clone(),
            repo.notebooks().clone(),
            repo.settings().clone(),
        )
    };

    let storage = StorageManager::with_root(dir.path()).unwrap();
    let snapshot = storage.load().unwrap();

    assert_eq!(snapshot.notes, notes);
    assert_eq!(snapshot.notebooks, notebooks);
    assert_eq!(snapshot.settings, settings);
}

#[test]
fn partial_settings_document_merges_over_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.json"), r#"{"auto_sync": true}"#).unwrap();

    let storage = StorageManager::with_root(dir.path()).unwrap();
    let snapshot = storage.load().unwrap();

    assert!(snapshot.settings.auto_sync);
    assert_eq!(snapshot.settings.theme, Theme::Light);
    assert!(snapshot.settings.auto_export_pdf);
    assert!(snapshot.settings.sync_path.is_empty());
    assert!(snapshot.settings.api_key.is_empty());
}

#[test]
fn corrupt_document_fails_the_load() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.json"), "{ this is not json").unwrap();

    let storage = StorageManager::with_root(dir.path()).unwrap();
    assert!(storage.load().is_err());

    // Repository construction is fatal on a malformed store.
    let storage = StorageManager::with_root(dir.path()).unwrap();
    assert!(NoteRepository::open(storage).is_err());
}

#[test]
fn foreign_shaped_document_fails_the_load() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notebooks.json"), r#"[1, 2, 3]"#).unwrap();

    let storage = StorageManager::with_root(dir.path()).unwrap();
    assert!(storage.load().is_err());
}

#[test]
fn persisted_notebooks_are_not_reseeded() {
    let dir = TempDir::new().unwrap();

    {
        let storage = StorageManager::with_root(dir.path()).unwrap();
        let mut repo = NoteRepository::open(storage).unwrap();
        repo.create_notebook("Only").unwrap();
    }

    // The store now has a notebooks document; the seed only applies when the
    // document is missing entirely.
    let storage = StorageManager::with_root(dir.path()).unwrap();
    let snapshot = storage.load().unwrap();
    assert_eq!(snapshot.notebooks.len(), 2);
}
