//! Settings overlay: the flat settings record, edited row by row.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{App, SETTINGS_ITEMS};
use crate::ui::colors::Palette;
use crate::ui::components::{centered_rect, popup_block};

pub fn render(frame: &mut Frame, app: &App, pal: &Palette) {
    let popup = centered_rect(64, 12, frame.area());
    let inner = popup_block(frame, popup, "Settings", pal);

    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);

    let settings = app.repo.settings();
    let values: [String; 5] = [
        settings.theme.label().to_string(),
        on_off(settings.auto_sync),
        on_off(settings.auto_export_pdf),
        display_text(&settings.sync_path),
        mask(&settings.api_key),
    ];

    let mut lines = vec![Line::from("")];
    for (idx, (name, value)) in SETTINGS_ITEMS.iter().zip(values.iter()).enumerate() {
        let selected = idx == app.selected_settings_item;

        let shown_value = match (&app.settings_edit, selected) {
            (Some(buffer), true) => format!("{buffer}▏"),
            _ => value.clone(),
        };

        let name_style = if selected {
            Style::default().fg(pal.base).bg(pal.iris).bold()
        } else {
            Style::default().fg(pal.text)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {name:<18}"), name_style),
            Span::styled(format!("  {shown_value}"), Style::default().fg(pal.subtle)),
        ]));
    }

    Paragraph::new(lines).render(chunks[0], frame.buffer_mut());

    let hint = if app.settings_edit.is_some() {
        " [⏎] Save │ [Esc] Cancel "
    } else {
        " Changes are saved immediately "
    };
    Paragraph::new(Span::styled(hint, Style::default().fg(pal.muted).italic()))
        .alignment(Alignment::Center)
        .render(chunks[1], frame.buffer_mut());
}

fn on_off(value: bool) -> String {
    if value { "on" } else { "off" }.to_string()
}

fn display_text(value: &str) -> String {
    if value.is_empty() {
        "(not set)".to_string()
    } else {
        value.to_string()
    }
}

fn mask(value: &str) -> String {
    if value.is_empty() {
        "(not set)".to_string()
    } else {
        "•".repeat(value.chars().count().min(24))
    }
}
