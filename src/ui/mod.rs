//! User interface rendering: the workspace (sidebar tree plus editor), the
//! overlay panels and the shared components.

pub mod assistant_view;
pub mod calendar_view;
pub mod colors;
pub mod components;
pub mod editor;
pub mod graph_view;
pub mod sandbox_view;
pub mod settings_view;
pub mod tree;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::app::{App, ConfirmationState, Overlay};

pub fn render(frame: &mut Frame, app: &App) {
    let pal = colors::palette(app.repo.settings().theme);

    let chunks =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).split(frame.area());
    let main =
        Layout::horizontal([Constraint::Length(34), Constraint::Min(0)]).split(chunks[0]);

    tree::render(frame, main[0], app, pal);
    editor::render(frame, main[1], app, pal);
    components::render_bottom_bar(frame, chunks[1], app, pal);

    match app.overlay {
        Overlay::Graph => graph_view::render(frame, app, pal),
        Overlay::Calendar => calendar_view::render(frame, app, pal),
        Overlay::Assistant => assistant_view::render(frame, app, pal),
        Overlay::Settings => settings_view::render(frame, app, pal),
        Overlay::Sandbox => sandbox_view::render(frame, app, pal),
        Overlay::Help => components::render_help(frame, pal),
        Overlay::None => {}
    }

    if app.confirmation != ConfirmationState::None {
        components::render_confirm_dialog(frame, app, pal);
    }
}
