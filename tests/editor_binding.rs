use filament::app::{App, ConfirmationState, InputMode, TreeItem};
use filament::models::{DEFAULT_NOTE_CONTENT, DEFAULT_NOTE_TITLE, StorageManager};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

fn open_app(dir: &TempDir) -> App {
    let storage = StorageManager::with_root(dir.path()).unwrap();
    App::with_storage(storage).unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

#[test]
fn startup_binds_a_note_so_the_editor_is_never_empty() {
    let dir = TempDir::new().unwrap();
    let app = open_app(&dir);

    assert!(app.bound_note_id().is_some());
    assert_eq!(app.title_buffer, DEFAULT_NOTE_TITLE);
    assert_eq!(app.editor_content(), DEFAULT_NOTE_CONTENT);
}

#[test]
fn content_edits_flush_to_the_record_on_every_input() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    app.input_mode = InputMode::EditContent;
    app.insert_char('X');

    let note = app.repo.active_note().unwrap();
    assert!(note.content.starts_with('X'));
    assert!(!app.dirty, "commit clears the dirty flag");
    assert!(app.last_saved.is_some());
}

#[test]
fn title_edits_flush_through_the_binding() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    app.title_buffer.clear();
    for c in "Plans".chars() {
        app.title_buffer.push(c);
    }
    app.commit_editor();

    assert_eq!(app.repo.active_note().unwrap().title, "Plans");
}

#[test]
fn newline_and_backspace_edit_the_line_buffer() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);
    app.input_mode = InputMode::EditContent;

    app.cursor_line_end();
    app.insert_newline();
    app.insert_char('b');
    assert_eq!(app.content_lines.len(), 2);
    assert_eq!(app.content_lines[1], "b");

    app.backspace();
    app.backspace();
    assert_eq!(app.content_lines.len(), 1);
    assert_eq!(app.editor_content(), DEFAULT_NOTE_CONTENT);
}

#[test]
fn delete_flow_requires_confirmation_and_rebinds() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    let original = app.bound_note_id().unwrap().to_string();

    // Select the note row in the sidebar (row 0 is its notebook).
    let note_row = app
        .tree_items
        .iter()
        .position(|item| matches!(item, TreeItem::Note(_)))
        .unwrap();
    app.selected_tree_item = note_row;

    app.request_delete_selected();
    assert!(matches!(
        app.confirmation,
        ConfirmationState::DeleteNote { .. }
    ));
    assert!(app.repo.note(&original).is_some(), "nothing deleted yet");

    app.confirm_pending();
    assert!(app.repo.note(&original).is_none());

    // The fallback note was created and bound.
    let rebound = app.bound_note_id().unwrap().to_string();
    assert_ne!(rebound, original);
    assert_eq!(app.title_buffer, DEFAULT_NOTE_TITLE);
}

#[test]
fn cancelled_confirmation_keeps_the_note() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);
    let original = app.bound_note_id().unwrap().to_string();

    let note_row = app
        .tree_items
        .iter()
        .position(|item| matches!(item, TreeItem::Note(_)))
        .unwrap();
    app.selected_tree_item = note_row;

    app.request_delete_selected();
    app.cancel_pending();
    assert!(app.repo.note(&original).is_some());
}

#[test]
fn notebook_prompt_keys_create_a_notebook() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    filament::handlers::keys::handle_key_events(key(KeyCode::Char('b')), &mut app);
    assert_eq!(app.input_mode, InputMode::CreateNotebook);

    for c in "Ideas".chars() {
        filament::handlers::keys::handle_key_events(key(KeyCode::Char(c)), &mut app);
    }
    filament::handlers::keys::handle_key_events(key(KeyCode::Enter), &mut app);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(
        app.repo
            .notebooks()
            .values()
            .any(|nb| nb.name == "Ideas")
    );
    assert!(
        app.tree_items
            .iter()
            .filter(|item| matches!(item, TreeItem::Notebook(_)))
            .count()
            >= 2
    );
}

#[test]
fn empty_notebook_prompt_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);
    let before = app.repo.notebooks().len();

    filament::handlers::keys::handle_key_events(key(KeyCode::Char('b')), &mut app);
    filament::handlers::keys::handle_key_events(key(KeyCode::Enter), &mut app);

    assert_eq!(app.repo.notebooks().len(), before);
    assert!(app.error_message.is_none(), "cancel is silent");
}

#[test]
fn ctrl_n_creates_a_note_in_the_selected_notebook() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);
    let before = app.repo.notes().len();

    filament::handlers::keys::handle_key_events(ctrl('n'), &mut app);

    assert_eq!(app.repo.notes().len(), before + 1);
    assert_eq!(app.title_buffer, DEFAULT_NOTE_TITLE);
    assert_eq!(app.input_mode, InputMode::EditContent);
}

#[test]
fn search_keys_filter_and_open_results() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    app.title_buffer = "Rust notes".to_string();
    app.commit_editor();
    filament::handlers::keys::handle_key_events(ctrl('n'), &mut app);
    filament::handlers::keys::handle_key_events(key(KeyCode::Esc), &mut app);

    filament::handlers::keys::handle_key_events(key(KeyCode::Char('/')), &mut app);
    assert_eq!(app.input_mode, InputMode::Search);
    for c in "rust".chars() {
        filament::handlers::keys::handle_key_events(key(KeyCode::Char(c)), &mut app);
    }
    assert_eq!(app.search_results.len(), 1);

    filament::handlers::keys::handle_key_events(key(KeyCode::Enter), &mut app);
    assert_eq!(app.repo.active_note().unwrap().title, "Rust notes");
    assert_eq!(app.recent_searches[0].query, "rust");
}

#[test]
fn sandbox_insert_appends_a_fenced_block() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&dir);

    app.sandbox.code = "echo hi".to_string();
    app.insert_sandbox_code();

    let content = app.repo.active_note().unwrap().content.clone();
    assert!(content.contains("```sh"));
    assert!(content.contains("echo hi"));
    assert_eq!(app.editor_content(), content);
}
