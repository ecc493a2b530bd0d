//! Shared UI components: bottom bar, confirmation dialog, help overlay and
//! popup layout helpers.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

use crate::app::{App, ConfirmationState, InputMode, Overlay};
use crate::ui::colors::Palette;

/// Centered popup rectangle of at most `width` x `height` cells.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Clears the popup area and draws its outer block, returning the inner
/// rectangle to render into.
pub fn popup_block(frame: &mut Frame, area: Rect, title: &str, pal: &Palette) -> Rect {
    Clear.render(area, frame.buffer_mut());
    let block = Block::bordered()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(pal.iris).bg(pal.surface));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());
    inner
}

/// Bottom bar: status or location on the left, context shortcuts on the
/// right.
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App, pal: &Palette) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let left = if let Some(message) = &app.error_message {
        Line::from(Span::styled(
            format!(" ✗ {message} "),
            Style::default().fg(pal.love),
        ))
    } else if let Some(message) = &app.success_message {
        Line::from(Span::styled(
            format!(" ✓ {message} "),
            Style::default().fg(pal.foam),
        ))
    } else {
        breadcrumbs(app, pal)
    };

    let left_content = Paragraph::new(left).alignment(Alignment::Left).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(pal.highlight_high)),
    );

    let right_content = Paragraph::new(context_shortcuts(app))
        .alignment(Alignment::Right)
        .style(Style::default().fg(pal.muted))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(pal.highlight_high)),
        );

    left_content.render(chunks[0], frame.buffer_mut());
    right_content.render(chunks[1], frame.buffer_mut());
}

/// Notebook ❯ note trail for the active note.
fn breadcrumbs(app: &App, pal: &Palette) -> Line<'static> {
    let mut spans = vec![Span::styled(" 󰠮 ", Style::default().fg(pal.subtle))];

    if let Some(note) = app.repo.active_note() {
        let notebook_name = app
            .repo
            .notebook(&note.notebook_id)
            .map(|nb| nb.name.clone())
            .unwrap_or_else(|| "?".to_string());
        spans.push(Span::styled(
            notebook_name,
            Style::default().fg(pal.subtle),
        ));
        spans.push(Span::styled(" ❯ ", Style::default().fg(pal.muted)));
        spans.push(Span::styled(
            note.title.clone(),
            Style::default().fg(pal.text),
        ));
        if app.dirty {
            spans.push(Span::styled(" ●", Style::default().fg(pal.gold)));
        }
    } else {
        spans.push(Span::styled(
            "No note selected",
            Style::default().fg(pal.muted),
        ));
    }

    Line::from(spans)
}

fn context_shortcuts(app: &App) -> String {
    if app.confirmation != ConfirmationState::None {
        return " [y] Confirm │ [n] Cancel ".to_string();
    }

    match app.overlay {
        Overlay::Graph => " [r] Reset │ [l] Labels │ [p] Physics │ [Esc] Close ".to_string(),
        Overlay::Calendar => " [←→] Month │ [o] Outlook │ [Esc] Close ".to_string(),
        Overlay::Assistant => " [⏎] Send │ [Esc] Close ".to_string(),
        Overlay::Settings => " [↑↓] Select │ [⏎] Change │ [Esc] Close ".to_string(),
        Overlay::Sandbox => {
            " [Tab] Language │ [^R] Run │ [^I] Insert │ [Esc] Close ".to_string()
        }
        Overlay::Help => " [Esc] Close ".to_string(),
        Overlay::None => match app.input_mode {
            InputMode::Normal => {
                " [e] Edit │ [n] Note │ [b] Notebook │ [d] Delete │ [/] Search │ [?] Help │ [q] Quit "
                    .to_string()
            }
            InputMode::EditTitle => " [⏎/Esc] Done ".to_string(),
            InputMode::EditContent => " [^S] Save │ [Esc] Done ".to_string(),
            InputMode::Search => " [↑↓] Results │ [⏎] Open │ [Esc] Cancel ".to_string(),
            InputMode::CreateNotebook => " [⏎] Create │ [Esc] Cancel ".to_string(),
        },
    }
}

/// Modal delete confirmation, matching the original's confirm() gate.
pub fn render_confirm_dialog(frame: &mut Frame, app: &App, pal: &Palette) {
    let ConfirmationState::DeleteNote { note_id } = &app.confirmation else {
        return;
    };
    let title = app
        .repo
        .note(note_id)
        .map(|n| n.title.clone())
        .unwrap_or_else(|| note_id.clone());

    let area = centered_rect(56, 7, frame.area());
    let inner = popup_block(frame, area, "Delete note?", pal);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Are you sure you want to delete \"{title}\"?"),
            Style::default().fg(pal.text),
        )),
        Line::from(Span::styled(
            "[y] Delete    [n] Keep",
            Style::default().fg(pal.muted),
        )),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, frame.buffer_mut());
}

pub fn render_help(frame: &mut Frame, pal: &Palette) {
    let area = centered_rect(62, 20, frame.area());
    let inner = popup_block(frame, area, "Keyboard Shortcuts", pal);

    let entries: [(&str, &str); 15] = [
        ("Ctrl+S", "Save the active note"),
        ("Ctrl+N", "New note in the selected notebook"),
        ("Ctrl+F or /", "Search notes"),
        ("Ctrl+P", "Export the active note to PDF"),
        ("e / t", "Edit content / title"),
        ("n / b", "New note / new notebook"),
        ("d", "Delete the selected note"),
        ("Tab", "Collapse or expand a notebook"),
        ("m", "Export the active note to Markdown"),
        ("g", "Graph view"),
        ("c", "Calendar"),
        ("a", "Assistant"),
        ("x", "Code sandbox"),
        ("s / y", "Settings / cloud sync"),
        ("q", "Quit"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("  {keys:<12}"), Style::default().fg(pal.gold).bold()),
                Span::styled((*action).to_string(), Style::default().fg(pal.text)),
            ])
        })
        .collect();

    Paragraph::new(lines).render(inner, frame.buffer_mut());
}
