use std::collections::HashSet;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use log::{info, warn};
use ratatui::Frame;

use crate::calendar::CalendarMonth;
use crate::events::RepoEvent;
use crate::graph::GraphView;
use crate::handlers::assistant::AssistantState;
use crate::models::{DEFAULT_NOTEBOOK_ID, ExportFormat, NoteRepository, StorageManager, export_note};
use crate::search::{RecentSearchEntry, SearchResult, remember_search, search_notes};
use crate::ui;
use crate::ui::sandbox_view::SandboxState;

/// The original application flushed the editor to storage every 30 seconds.
pub const AUTO_SAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Full-screen panel drawn over the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Graph,
    Calendar,
    Assistant,
    Settings,
    Sandbox,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditTitle,
    EditContent,
    Search,
    CreateNotebook,
}

/// Pending interactive confirmation. Deletion never happens without one.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationState {
    None,
    DeleteNote { note_id: String },
}

/// Sidebar rows: flat notebooks, each followed by its derived note list.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeItem {
    Notebook(String),
    Note(String),
}

/// Central state container: owns the repository, the overlay/input machine
/// and the editor binding buffers. One instance per process; everything the
/// renderer and the key handlers touch hangs off this struct.
pub struct App {
    pub repo: NoteRepository,
    events: flume::Receiver<RepoEvent>,

    pub overlay: Overlay,
    pub input_mode: InputMode,
    pub confirmation: ConfirmationState,

    // Editor binding: mirrors the active note record.
    bound_note: Option<String>,
    pub title_buffer: String,
    pub content_lines: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub dirty: bool,
    pub last_saved: Option<DateTime<Local>>,
    last_autosave: Instant,

    // Sidebar tree and search.
    pub tree_items: Vec<TreeItem>,
    pub selected_tree_item: usize,
    pub collapsed_notebooks: HashSet<String>,
    pub search_query: String,
    pub search_results: Vec<SearchResult>,
    pub selected_search_result: usize,
    pub recent_searches: Vec<RecentSearchEntry>,

    // Interactive prompts and status.
    pub input_buffer: String,
    pub error_message: Option<String>,
    pub success_message: Option<String>,

    // Peripheral view models.
    pub graph: GraphView,
    pub calendar: CalendarMonth,
    pub assistant: AssistantState,
    pub sandbox: SandboxState,

    // Settings page state.
    pub selected_settings_item: usize,
    pub settings_edit: Option<String>,
}

/// Rows of the settings page, in display order.
pub const SETTINGS_ITEMS: [&str; 5] = [
    "Theme",
    "Auto sync",
    "Auto export PDF",
    "Sync path",
    "API key",
];

impl App {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_storage(StorageManager::new()?)
    }

    /// Builds the application over an explicit storage adapter. Tests use
    /// this with a disposable directory.
    pub fn with_storage(storage: StorageManager) -> anyhow::Result<Self> {
        let mut repo = NoteRepository::open(storage)?;
        let events = repo.events();
        repo.ensure_active_note()
            .map_err(|e| anyhow::anyhow!(e))?;

        let mut app = Self {
            repo,
            events,
            overlay: Overlay::None,
            input_mode: InputMode::Normal,
            confirmation: ConfirmationState::None,
            bound_note: None,
            title_buffer: String::new(),
            content_lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
            dirty: false,
            last_saved: None,
            last_autosave: Instant::now(),
            tree_items: Vec::new(),
            selected_tree_item: 0,
            collapsed_notebooks: HashSet::new(),
            search_query: String::new(),
            search_results: Vec::new(),
            selected_search_result: 0,
            recent_searches: Vec::new(),
            input_buffer: String::new(),
            error_message: None,
            success_message: None,
            graph: GraphView::new(),
            calendar: CalendarMonth::current(),
            assistant: AssistantState::new(),
            sandbox: SandboxState::new(),
            selected_settings_item: 0,
            settings_edit: None,
        };

        // Drain the startup events before the first frame.
        app.drain_events();
        app.bind_active_note();
        app.refresh_tree_items();
        app.graph.build(app.repo.notes().values());
        Ok(app)
    }

    // ------------------------------------------------------------------
    // Event loop plumbing
    // ------------------------------------------------------------------

    /// Periodic housekeeping driven by the poll loop: repository event
    /// processing and the auto-save timer.
    pub fn tick(&mut self) {
        self.drain_events();

        if self.last_autosave.elapsed() >= AUTO_SAVE_INTERVAL {
            self.last_autosave = Instant::now();
            if self.bound_note.is_some() {
                self.commit_editor();
            }
        }
    }

    /// Applies pending repository events to the presentation state. This is
    /// the subscription side of the repository's event channel: the tree and
    /// graph refresh here instead of being re-invoked by each mutation site.
    fn drain_events(&mut self) {
        let mut tree_stale = false;
        let mut graph_stale = false;
        let mut rebind = false;

        for event in self.events.try_iter().collect::<Vec<_>>() {
            match event {
                RepoEvent::NoteCreated(_) | RepoEvent::NoteDeleted(_) => {
                    tree_stale = true;
                    graph_stale = true;
                }
                RepoEvent::NoteUpdated(_) => {
                    tree_stale = true;
                    graph_stale = true;
                }
                RepoEvent::NotebookCreated(_) => tree_stale = true,
                RepoEvent::ActiveNoteChanged(_) => rebind = true,
                RepoEvent::SettingsChanged | RepoEvent::StoreSaved => {}
            }
        }

        if rebind {
            self.bind_active_note();
            tree_stale = true;
        }
        if tree_stale {
            self.refresh_tree_items();
        }
        if graph_stale {
            self.graph.build(self.repo.notes().values());
        }
    }

    // ------------------------------------------------------------------
    // Editor binding (record -> buffers, buffers -> record)
    // ------------------------------------------------------------------

    pub fn bound_note_id(&self) -> Option<&str> {
        self.bound_note.as_deref()
    }

    /// Loads the active note record into the editing buffers.
    pub fn bind_active_note(&mut self) {
        match self.repo.active_note() {
            Some(note) => {
                self.bound_note = Some(note.id.clone());
                self.title_buffer = note.title.clone();
                self.content_lines = note.content.split('\n').map(str::to_string).collect();
                if self.content_lines.is_empty() {
                    self.content_lines.push(String::new());
                }
            }
            None => {
                self.bound_note = None;
                self.title_buffer.clear();
                self.content_lines = vec![String::new()];
            }
        }
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.dirty = false;
    }

    pub fn editor_content(&self) -> String {
        self.content_lines.join("\n")
    }

    /// Flushes the editing buffers into the active note record and persists
    /// the whole store. Runs on every committed input event, the auto-save
    /// timer and the save shortcut.
    pub fn commit_editor(&mut self) {
        if self.bound_note.is_none() {
            return;
        }
        let content = self.editor_content();
        match self.repo.save_active_note(&self.title_buffer, &content) {
            Ok(()) => {
                self.dirty = false;
                self.last_saved = Some(Local::now());
            }
            Err(e) => self.set_error_message(e),
        }
    }

    /// The explicit save shortcut: commit, then honor the auto-export flag.
    pub fn save_shortcut(&mut self) {
        self.commit_editor();
        self.set_success_message("Note saved!".to_string());

        if self.repo.settings().auto_export_pdf {
            if let Some(note) = self.repo.active_note() {
                let dir = self.repo.storage().exports_dir();
                // Silent export: failures (typically a missing converter) are
                // only logged, matching the original's background behavior.
                if let Err(e) = export_note(note, ExportFormat::Pdf, &dir) {
                    warn!("auto PDF export skipped: {e}");
                }
            }
        }
    }

    pub fn word_count(&self) -> usize {
        self.repo
            .active_note()
            .map(|n| n.word_count())
            .unwrap_or(0)
    }

    // Editor buffer mutation. Every committed edit also flushes to the
    // repository, the original saved on each input event.

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.content_lines[self.cursor_row];
        let byte_idx = char_to_byte(line, self.cursor_col);
        line.insert(byte_idx, c);
        self.cursor_col += 1;
        self.dirty = true;
        self.commit_editor();
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.content_lines[self.cursor_row];
        let byte_idx = char_to_byte(line, self.cursor_col);
        let rest = line.split_off(byte_idx);
        self.content_lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.dirty = true;
        self.commit_editor();
    }

    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.content_lines[self.cursor_row];
            let byte_idx = char_to_byte(line, self.cursor_col - 1);
            line.remove(byte_idx);
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            let removed = self.content_lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            let prev = &mut self.content_lines[self.cursor_row];
            self.cursor_col = prev.chars().count();
            prev.push_str(&removed);
        } else {
            return;
        }
        self.dirty = true;
        self.commit_editor();
    }

    pub fn move_cursor(&mut self, row_delta: isize, col_delta: isize) {
        if row_delta != 0 {
            let rows = self.content_lines.len() as isize;
            let row = (self.cursor_row as isize + row_delta).clamp(0, rows - 1) as usize;
            self.cursor_row = row;
            let len = self.content_lines[row].chars().count();
            self.cursor_col = self.cursor_col.min(len);
        }
        if col_delta < 0 {
            self.cursor_col = self.cursor_col.saturating_sub(col_delta.unsigned_abs());
        } else if col_delta > 0 {
            let len = self.content_lines[self.cursor_row].chars().count();
            self.cursor_col = (self.cursor_col + col_delta as usize).min(len);
        }
    }

    pub fn cursor_line_end(&mut self) {
        self.cursor_col = self.content_lines[self.cursor_row].chars().count();
    }

    pub fn cursor_line_start(&mut self) {
        self.cursor_col = 0;
    }

    // ------------------------------------------------------------------
    // Sidebar tree
    // ------------------------------------------------------------------

    pub fn refresh_tree_items(&mut self) {
        self.tree_items.clear();

        for notebook in self.repo.notebooks_ordered() {
            self.tree_items.push(TreeItem::Notebook(notebook.id.clone()));
            if self.collapsed_notebooks.contains(&notebook.id) {
                continue;
            }
            for note_id in self.repo.notes_in(&notebook.id) {
                self.tree_items.push(TreeItem::Note(note_id.clone()));
            }
        }

        if self.tree_items.is_empty() {
            self.selected_tree_item = 0;
        } else {
            self.selected_tree_item = self.selected_tree_item.min(self.tree_items.len() - 1);
        }
    }

    pub fn next_tree_item(&mut self) {
        if !self.tree_items.is_empty() {
            self.selected_tree_item = (self.selected_tree_item + 1) % self.tree_items.len();
        }
    }

    pub fn previous_tree_item(&mut self) {
        if !self.tree_items.is_empty() {
            self.selected_tree_item = if self.selected_tree_item > 0 {
                self.selected_tree_item - 1
            } else {
                self.tree_items.len() - 1
            };
        }
    }

    pub fn selected_tree_item(&self) -> Option<&TreeItem> {
        self.tree_items.get(self.selected_tree_item)
    }

    pub fn toggle_selected_notebook(&mut self) {
        if let Some(TreeItem::Notebook(id)) = self.selected_tree_item() {
            let id = id.clone();
            if !self.collapsed_notebooks.remove(&id) {
                self.collapsed_notebooks.insert(id);
            }
            self.refresh_tree_items();
        }
    }

    /// Opens the selected sidebar row: notes load into the editor, notebooks
    /// toggle their collapse state.
    pub fn open_selected_tree_item(&mut self) {
        match self.selected_tree_item().cloned() {
            Some(TreeItem::Note(id)) => {
                self.repo.load_note(&id);
                self.drain_events();
            }
            Some(TreeItem::Notebook(_)) => self.toggle_selected_notebook(),
            None => {}
        }
    }

    /// Notebook the selected row belongs to; target for new notes.
    pub fn selected_notebook_id(&self) -> String {
        match self.selected_tree_item() {
            Some(TreeItem::Notebook(id)) => id.clone(),
            Some(TreeItem::Note(id)) => self
                .repo
                .note(id)
                .map(|n| n.notebook_id.clone())
                .unwrap_or_else(|| DEFAULT_NOTEBOOK_ID.to_string()),
            None => self
                .repo
                .notebooks_ordered()
                .first()
                .map(|nb| nb.id.clone())
                .unwrap_or_else(|| DEFAULT_NOTEBOOK_ID.to_string()),
        }
    }

    // ------------------------------------------------------------------
    // Repository operations with status surfacing
    // ------------------------------------------------------------------

    pub fn create_note_in_selected(&mut self) {
        let notebook_id = self.selected_notebook_id();
        match self.repo.create_note(&notebook_id) {
            Ok(_) => {
                self.drain_events();
                self.input_mode = InputMode::EditContent;
            }
            Err(e) => self.set_error_message(e),
        }
    }

    pub fn submit_notebook_name(&mut self) {
        let name = self.input_buffer.trim().to_string();
        self.input_buffer.clear();
        self.input_mode = InputMode::Normal;
        if name.is_empty() {
            // Cancelled or empty prompt: a no-op, like the original.
            return;
        }
        match self.repo.create_notebook(&name) {
            Ok(_) => {
                self.drain_events();
                self.set_success_message(format!("Notebook \"{name}\" created"));
            }
            Err(e) => self.set_error_message(e),
        }
    }

    /// Starts the delete flow for the selected note; actual removal waits
    /// for the confirmation dialog.
    pub fn request_delete_selected(&mut self) {
        if let Some(TreeItem::Note(id)) = self.selected_tree_item().cloned() {
            self.confirmation = ConfirmationState::DeleteNote { note_id: id };
        }
    }

    pub fn confirm_pending(&mut self) {
        if let ConfirmationState::DeleteNote { note_id } =
            std::mem::replace(&mut self.confirmation, ConfirmationState::None)
        {
            match self.repo.delete_note(&note_id) {
                Ok(()) => {
                    self.drain_events();
                    self.set_success_message("Note deleted".to_string());
                }
                Err(e) => self.set_error_message(e),
            }
        }
    }

    pub fn cancel_pending(&mut self) {
        self.confirmation = ConfirmationState::None;
    }

    /// Exports the active note and reports the outcome. A missing external
    /// converter surfaces here as an error message.
    pub fn export_active(&mut self, format: ExportFormat) {
        let Some(note) = self.repo.active_note() else {
            return;
        };
        let dir = self.repo.storage().exports_dir();
        match export_note(note, format, &dir) {
            Ok(path) => {
                self.set_success_message(format!(
                    "{} exported to {}",
                    format.display_name(),
                    path.display()
                ));
            }
            Err(e) => self.set_error_message(e.to_string()),
        }
    }

    /// Cloud sync stub: reports progress when configured, asks for
    /// configuration otherwise. No transfer happens either way.
    pub fn sync_to_cloud(&mut self) {
        if self.repo.settings().sync_configured() {
            info!("cloud sync requested for {}", self.repo.settings().sync_path);
            self.set_success_message("Sync complete!".to_string());
        } else {
            self.set_error_message("Please configure cloud sync in settings.".to_string());
        }
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Re-runs the query against the repository. Called on every input event
    /// while the search field is focused.
    pub fn run_search(&mut self) {
        self.search_results = search_notes(&self.repo, &self.search_query);
        self.selected_search_result = 0;
    }

    pub fn finish_search(&mut self) {
        remember_search(
            &mut self.recent_searches,
            &self.search_query,
            self.search_results.len(),
        );
    }

    pub fn next_search_result(&mut self) {
        if !self.search_results.is_empty() {
            self.selected_search_result =
                (self.selected_search_result + 1) % self.search_results.len();
        }
    }

    pub fn previous_search_result(&mut self) {
        if !self.search_results.is_empty() {
            self.selected_search_result = if self.selected_search_result > 0 {
                self.selected_search_result - 1
            } else {
                self.search_results.len() - 1
            };
        }
    }

    pub fn open_selected_search_result(&mut self) {
        if let Some(result) = self.search_results.get(self.selected_search_result) {
            let id = result.note_id.clone();
            self.finish_search();
            self.repo.load_note(&id);
            self.drain_events();
        }
    }

    pub fn searching(&self) -> bool {
        !self.search_query.is_empty()
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.search_results.clear();
        self.selected_search_result = 0;
    }

    // ------------------------------------------------------------------
    // Settings page
    // ------------------------------------------------------------------

    pub fn next_settings_item(&mut self) {
        self.selected_settings_item = (self.selected_settings_item + 1) % SETTINGS_ITEMS.len();
    }

    pub fn previous_settings_item(&mut self) {
        self.selected_settings_item =
            (self.selected_settings_item + SETTINGS_ITEMS.len() - 1) % SETTINGS_ITEMS.len();
    }

    /// Activates the selected settings row: toggles flip immediately, the
    /// theme cycles, text fields open an edit buffer.
    pub fn activate_settings_item(&mut self) {
        let outcome = match self.selected_settings_item {
            0 => self.repo.update_settings(|s| s.theme = s.theme.cycle()),
            1 => self.repo.update_settings(|s| s.auto_sync = !s.auto_sync),
            2 => self
                .repo
                .update_settings(|s| s.auto_export_pdf = !s.auto_export_pdf),
            3 => {
                self.settings_edit = Some(self.repo.settings().sync_path.clone());
                Ok(())
            }
            4 => {
                self.settings_edit = Some(self.repo.settings().api_key.clone());
                Ok(())
            }
            _ => Ok(()),
        };
        if let Err(e) = outcome {
            self.set_error_message(e);
        }
    }

    /// Commits a text-field edit buffer back into the settings record.
    pub fn commit_settings_edit(&mut self) {
        let Some(value) = self.settings_edit.take() else {
            return;
        };
        let index = self.selected_settings_item;
        let outcome = match index {
            3 => self.repo.update_settings(|s| s.sync_path = value),
            4 => self.repo.update_settings(|s| s.api_key = value),
            _ => Ok(()),
        };
        match outcome {
            Ok(()) => self.set_success_message("Settings saved!".to_string()),
            Err(e) => self.set_error_message(e),
        }
    }

    // ------------------------------------------------------------------
    // Code sandbox actions
    // ------------------------------------------------------------------

    /// Runs the sandbox buffer. Execution failures of the user's code land
    /// in the output pane; a missing interpreter surfaces as an alert.
    pub fn run_sandbox(&mut self) {
        match crate::sandbox::run_code(self.sandbox.language(), &self.sandbox.code) {
            Ok(outcome) => self.sandbox.output = Some(outcome.display()),
            Err(e) => self.set_error_message(e.to_string()),
        }
    }

    /// Appends the sandbox buffer to the active note as a fenced code block
    /// and closes the overlay.
    pub fn insert_sandbox_code(&mut self) {
        if self.bound_note.is_none() || self.sandbox.code.trim().is_empty() {
            return;
        }
        let block = crate::sandbox::fenced_block(self.sandbox.language(), &self.sandbox.code);
        for line in block.lines() {
            self.content_lines.push(line.to_string());
        }
        self.dirty = true;
        self.commit_editor();
        self.overlay = Overlay::None;
        self.set_success_message("Code block inserted".to_string());
    }

    // ------------------------------------------------------------------
    // Status messages
    // ------------------------------------------------------------------

    pub fn set_error_message(&mut self, message: String) {
        self.error_message = Some(message);
        self.success_message = None;
    }

    pub fn set_success_message(&mut self, message: String) {
        self.success_message = Some(message);
        self.error_message = None;
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn render(&self, frame: &mut Frame) {
        ui::render(frame, self);
    }
}

/// Char-index to byte-index within a line; the editor cursor counts chars.
fn char_to_byte(line: &str, char_idx: usize) -> usize {
    line.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}
