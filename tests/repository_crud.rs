use filament::events::RepoEvent;
use filament::models::{
    DEFAULT_NOTE_TITLE, DEFAULT_NOTEBOOK_ID, NoteRepository, StorageManager,
};
use tempfile::TempDir;

fn open_repo(dir: &TempDir) -> NoteRepository {
    let storage = StorageManager::with_root(dir.path()).unwrap();
    NoteRepository::open(storage).unwrap()
}

#[test]
fn created_note_lands_in_exactly_one_notebook() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let work_id = repo.create_notebook("Work").unwrap();
    let note_id = repo.create_note(&work_id).unwrap();

    let note = repo.note(&note_id).unwrap();
    assert_eq!(note.notebook_id, work_id);
    assert_eq!(note.title, DEFAULT_NOTE_TITLE);

    let owning: Vec<_> = repo
        .notebooks()
        .keys()
        .filter(|nb_id| repo.notes_in(nb_id).contains(&note_id))
        .collect();
    assert_eq!(owning.len(), 1, "id appears in exactly one notebook's list");
    assert_eq!(owning[0], &work_id);
}

#[test]
fn creating_a_note_makes_it_the_active_selection() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let note_id = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    assert_eq!(repo.active_note_id(), Some(note_id.as_str()));
}

#[test]
fn create_note_in_unknown_notebook_is_rejected_without_side_effects() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let result = repo.create_note("no-such-notebook");
    assert!(result.is_err());
    assert!(repo.notes().is_empty());
    assert!(repo.active_note_id().is_none());
}

#[test]
fn deleting_the_active_note_falls_back_to_a_remaining_note() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let first = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    let second = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    assert_eq!(repo.active_note_id(), Some(second.as_str()));

    repo.delete_note(&second).unwrap();

    assert_eq!(repo.active_note_id(), Some(first.as_str()));
    assert!(repo.note(&second).is_none());
}

#[test]
fn deleting_the_last_note_creates_a_fresh_one() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let only = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    repo.delete_note(&only).unwrap();

    let active = repo.active_note().expect("never left without a selection");
    assert_ne!(active.id, only);
    assert_eq!(active.title, DEFAULT_NOTE_TITLE);
    assert_eq!(repo.notes().len(), 1);
}

#[test]
fn deleting_an_inactive_note_keeps_the_selection() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let first = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    let second = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();

    repo.delete_note(&first).unwrap();
    assert_eq!(repo.active_note_id(), Some(second.as_str()));
}

#[test]
fn deleting_an_unknown_note_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let note_id = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    repo.delete_note("no-such-note").unwrap();
    assert_eq!(repo.notes().len(), 1);
    assert_eq!(repo.active_note_id(), Some(note_id.as_str()));
}

#[test]
fn derived_index_orders_notes_by_creation_time() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let a = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    let b = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    let c = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();

    assert_eq!(repo.notes_in(DEFAULT_NOTEBOOK_ID), &[a.clone(), b, c]);

    // The index is derived from note ownership, so deletion shrinks it
    // without any list bookkeeping.
    repo.delete_note(&a).unwrap();
    assert_eq!(repo.notes_in(DEFAULT_NOTEBOOK_ID).len(), 2);
    assert!(!repo.notes_in(DEFAULT_NOTEBOOK_ID).contains(&a));
}

#[test]
fn empty_notebook_names_are_rejected() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    assert!(repo.create_notebook("").is_err());
    assert!(repo.create_notebook("   ").is_err());
    assert_eq!(repo.notebooks().len(), 1, "only the seeded default remains");
}

#[test]
fn load_note_with_unknown_id_keeps_the_selection() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let note_id = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    repo.load_note("no-such-note");
    assert_eq!(repo.active_note_id(), Some(note_id.as_str()));
}

#[test]
fn link_targets_are_stored_unvalidated() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let note_id = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    repo.link_notes(&note_id, "ghost-note").unwrap();

    let note = repo.note(&note_id).unwrap();
    assert_eq!(note.linked_notes, vec!["ghost-note".to_string()]);
}

#[test]
fn mutations_publish_repository_events() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);
    let rx = repo.events();

    let notebook_id = repo.create_notebook("Ideas").unwrap();
    let note_id = repo.create_note(&notebook_id).unwrap();
    repo.save_active_note("Title", "Body").unwrap();
    repo.delete_note(&note_id).unwrap();

    let seen: Vec<RepoEvent> = rx.try_iter().collect();
    assert!(seen.contains(&RepoEvent::NotebookCreated(notebook_id)));
    assert!(seen.contains(&RepoEvent::NoteCreated(note_id.clone())));
    assert!(seen.contains(&RepoEvent::NoteUpdated(note_id.clone())));
    assert!(seen.contains(&RepoEvent::NoteDeleted(note_id)));
    assert!(seen.contains(&RepoEvent::StoreSaved));
}

#[test]
fn save_active_note_without_selection_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    repo.save_active_note("Title", "Body").unwrap();
    assert!(repo.notes().is_empty());
}
