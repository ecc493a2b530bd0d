use filament::models::{DEFAULT_NOTEBOOK_ID, NoteRepository, StorageManager};
use filament::search::{MatchKind, search_notes};
use tempfile::TempDir;

fn open_repo(dir: &TempDir) -> NoteRepository {
    let storage = StorageManager::with_root(dir.path()).unwrap();
    NoteRepository::open(storage).unwrap()
}

#[test]
fn substring_only_in_markup_still_matches() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let note_id = repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    repo.save_active_note("Architecture", "See ![diagram](arch-overview.png) for details.")
        .unwrap();

    // The target string lives only inside the image markup, not in the
    // title or the visible text.
    let results = search_notes(&repo, "arch-overview.png");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].note_id, note_id);
    assert_eq!(results[0].kind, MatchKind::Content);
    assert!(results[0].match_context.contains("Line 1"));
}

#[test]
fn title_matches_are_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
    repo.save_active_note("Shopping List", "eggs").unwrap();

    let results = search_notes(&repo, "shopping");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind, MatchKind::Title);
}

#[test]
fn all_matches_are_returned_without_ranking() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    for i in 0..3 {
        repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();
        repo.save_active_note(&format!("Note {i}"), "shared keyword inside")
            .unwrap();
    }

    let results = search_notes(&repo, "keyword");
    assert_eq!(results.len(), 3);
}

#[test]
fn empty_query_returns_nothing() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);
    repo.create_note(DEFAULT_NOTEBOOK_ID).unwrap();

    assert!(search_notes(&repo, "").is_empty());
    assert!(search_notes(&repo, "   ").is_empty());
}

// The end-to-end property from the design notes: create, find, delete.
#[test]
fn create_search_delete_lifecycle() {
    let dir = TempDir::new().unwrap();
    let mut repo = open_repo(&dir);

    let work = repo.create_notebook("Work").unwrap();
    let note_id = repo.create_note(&work).unwrap();

    // The fresh note lists under "Work" with its placeholder title.
    assert_eq!(repo.notes_in(&work), &[note_id.clone()]);
    assert_eq!(repo.note(&note_id).unwrap().title, "Untitled Note");

    let results = search_notes(&repo, "untitled");
    assert!(results.iter().any(|r| r.note_id == note_id));

    repo.delete_note(&note_id).unwrap();
    assert!(repo.notes_in(&work).is_empty());
    assert!(repo.note(&note_id).is_none());
    assert!(
        repo.notebooks()
            .keys()
            .all(|nb| !repo.notes_in(nb).contains(&note_id))
    );
}
