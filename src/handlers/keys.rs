//! Keyboard input handling.
//!
//! Translates terminal key events into application state changes. Pending
//! confirmations take priority, then the global control shortcuts, then the
//! active overlay, then the workspace input mode.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, ConfirmationState, InputMode, Overlay};
use crate::models::ExportFormat;

/// Main keyboard dispatcher. Returns `true` when the application should
/// quit.
pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    if app.confirmation != ConfirmationState::None {
        return handle_confirmation_keys(key, app);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            // The original application's global shortcuts.
            KeyCode::Char('s') => {
                app.save_shortcut();
                return false;
            }
            KeyCode::Char('n') => {
                app.overlay = Overlay::None;
                app.create_note_in_selected();
                return false;
            }
            KeyCode::Char('f') => {
                app.overlay = Overlay::None;
                app.input_mode = InputMode::Search;
                app.run_search();
                return false;
            }
            KeyCode::Char('p') => {
                app.export_active(ExportFormat::Pdf);
                return false;
            }
            _ => {}
        }
    }

    if app.overlay != Overlay::None {
        return handle_overlay_keys(key, app);
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_keys(key, app),
        InputMode::EditTitle => handle_title_keys(key, app),
        InputMode::EditContent => handle_content_keys(key, app),
        InputMode::Search => handle_search_keys(key, app),
        InputMode::CreateNotebook => handle_prompt_keys(key, app),
    }
}

fn handle_confirmation_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_pending(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_pending(),
        _ => {}
    }
    false
}

fn handle_normal_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,

        // Sidebar navigation.
        KeyCode::Char('j') | KeyCode::Down => app.next_tree_item(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_tree_item(),
        KeyCode::Enter => app.open_selected_tree_item(),
        KeyCode::Tab => app.toggle_selected_notebook(),

        // Editing.
        KeyCode::Char('e') => {
            app.clear_messages();
            app.input_mode = InputMode::EditContent;
        }
        KeyCode::Char('t') => {
            app.clear_messages();
            app.input_mode = InputMode::EditTitle;
        }

        // Creation and deletion.
        KeyCode::Char('n') => app.create_note_in_selected(),
        KeyCode::Char('b') => {
            app.clear_messages();
            app.input_buffer.clear();
            app.input_mode = InputMode::CreateNotebook;
        }
        KeyCode::Char('d') => app.request_delete_selected(),

        // Search.
        KeyCode::Char('/') => {
            app.clear_messages();
            app.input_mode = InputMode::Search;
            app.run_search();
        }

        // Overlays.
        KeyCode::Char('g') => app.overlay = Overlay::Graph,
        KeyCode::Char('c') => app.overlay = Overlay::Calendar,
        KeyCode::Char('a') => app.overlay = Overlay::Assistant,
        KeyCode::Char('s') => app.overlay = Overlay::Settings,
        KeyCode::Char('x') => app.overlay = Overlay::Sandbox,
        KeyCode::Char('?') => app.overlay = Overlay::Help,

        // Stubs and export.
        KeyCode::Char('y') => app.sync_to_cloud(),
        KeyCode::Char('m') => app.export_active(ExportFormat::Markdown),

        _ => {}
    }
    false
}

fn handle_title_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.commit_editor();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.title_buffer.pop();
            app.dirty = true;
            app.commit_editor();
        }
        KeyCode::Char(c) => {
            app.title_buffer.push(c);
            app.dirty = true;
            app.commit_editor();
        }
        _ => {}
    }
    false
}

fn handle_content_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.commit_editor();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Enter => app.insert_newline(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Up => app.move_cursor(-1, 0),
        KeyCode::Down => app.move_cursor(1, 0),
        KeyCode::Left => app.move_cursor(0, -1),
        KeyCode::Right => app.move_cursor(0, 1),
        KeyCode::Home => app.cursor_line_start(),
        KeyCode::End => app.cursor_line_end(),
        _ => {}
    }
    false
}

fn handle_search_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.clear_search();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.open_selected_search_result();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Down => app.next_search_result(),
        KeyCode::Up => app.previous_search_result(),
        KeyCode::Backspace => {
            app.search_query.pop();
            app.run_search();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.run_search();
        }
        _ => {}
    }
    false
}

fn handle_prompt_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.input_buffer.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.submit_notebook_name(),
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => app.input_buffer.push(c),
        _ => {}
    }
    false
}

fn handle_overlay_keys(key: KeyEvent, app: &mut App) -> bool {
    match app.overlay {
        Overlay::Graph => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.overlay = Overlay::None,
            KeyCode::Char('r') => {
                app.graph.reset();
                app.graph.build(app.repo.notes().values());
            }
            KeyCode::Char('l') => app.graph.toggle_labels(),
            KeyCode::Char('p') => app.graph.toggle_physics(),
            _ => {}
        },

        Overlay::Calendar => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.overlay = Overlay::None,
            KeyCode::Left | KeyCode::Char('h') => app.calendar.prev(),
            KeyCode::Right | KeyCode::Char('l') => app.calendar.next(),
            KeyCode::Char('o') => {
                app.set_error_message(
                    "External calendar sync requires OAuth setup and is not configured."
                        .to_string(),
                );
            }
            _ => {}
        },

        Overlay::Assistant => match key.code {
            KeyCode::Esc => app.overlay = Overlay::None,
            KeyCode::Enter => {
                let configured = !app.repo.settings().api_key.is_empty();
                app.assistant.send(configured);
            }
            KeyCode::Backspace => {
                app.assistant.input_buffer.pop();
            }
            KeyCode::Char(c) => app.assistant.input_buffer.push(c),
            _ => {}
        },

        Overlay::Settings => {
            if app.settings_edit.is_some() {
                match key.code {
                    KeyCode::Esc => app.settings_edit = None,
                    KeyCode::Enter => app.commit_settings_edit(),
                    KeyCode::Backspace => {
                        if let Some(buffer) = app.settings_edit.as_mut() {
                            buffer.pop();
                        }
                    }
                    KeyCode::Char(c) => {
                        if let Some(buffer) = app.settings_edit.as_mut() {
                            buffer.push(c);
                        }
                    }
                    _ => {}
                }
            } else {
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => app.overlay = Overlay::None,
                    KeyCode::Char('j') | KeyCode::Down => app.next_settings_item(),
                    KeyCode::Char('k') | KeyCode::Up => app.previous_settings_item(),
                    KeyCode::Enter => app.activate_settings_item(),
                    _ => {}
                }
            }
        }

        Overlay::Sandbox => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('r') => app.run_sandbox(),
                    KeyCode::Char('i') => app.insert_sandbox_code(),
                    _ => {}
                }
                return false;
            }
            match key.code {
                KeyCode::Esc => app.overlay = Overlay::None,
                KeyCode::Tab => app.sandbox.cycle_language(),
                KeyCode::Enter => app.sandbox.code.push('\n'),
                KeyCode::Backspace => {
                    app.sandbox.code.pop();
                }
                KeyCode::Char(c) => app.sandbox.code.push(c),
                _ => {}
            }
        }

        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                app.overlay = Overlay::None;
            }
        }

        Overlay::None => {}
    }
    false
}
