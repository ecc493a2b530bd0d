//! Editor pane: title field, content surface and the footer with word count
//! and last-saved clock.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::app::{App, InputMode};
use crate::ui::colors::Palette;

pub fn render(frame: &mut Frame, area: Rect, app: &App, pal: &Palette) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app, pal);
    render_content(frame, chunks[1], app, pal);
    render_footer(frame, chunks[2], app, pal);
}

fn render_title(frame: &mut Frame, area: Rect, app: &App, pal: &Palette) {
    let focused = app.input_mode == InputMode::EditTitle;
    let border = if focused { pal.iris } else { pal.highlight_high };
    let caret = if focused { "▏" } else { "" };

    Paragraph::new(Span::styled(
        format!("{}{caret}", app.title_buffer),
        Style::default().fg(pal.text).bold(),
    ))
    .block(
        Block::bordered()
            .title(" Title ")
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(border)),
    )
    .render(area, frame.buffer_mut());
}

fn render_content(frame: &mut Frame, area: Rect, app: &App, pal: &Palette) {
    let editing = app.input_mode == InputMode::EditContent;
    let border = if editing { pal.iris } else { pal.highlight_high };

    let block = Block::bordered()
        .title(" Note ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(border));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    // Keep the cursor row inside the viewport.
    let visible = inner.height as usize;
    let scroll = app.cursor_row.saturating_sub(visible.saturating_sub(1));

    let mut lines = Vec::new();
    for (row, raw) in app
        .content_lines
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible)
    {
        if editing && row == app.cursor_row {
            lines.push(cursor_line(raw, app.cursor_col, pal));
        } else {
            lines.push(styled_line(raw, pal));
        }
    }

    Paragraph::new(lines).render(inner, frame.buffer_mut());
}

/// The cursor is drawn by reversing the cell under it.
fn cursor_line<'a>(raw: &'a str, cursor_col: usize, pal: &Palette) -> Line<'a> {
    let chars: Vec<char> = raw.chars().collect();
    let before: String = chars.iter().take(cursor_col).collect();
    let at: String = chars
        .get(cursor_col)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = chars.iter().skip(cursor_col + 1).collect();

    Line::from(vec![
        Span::styled(before, Style::default().fg(pal.text)),
        Span::styled(
            at,
            Style::default()
                .fg(pal.text)
                .add_modifier(Modifier::REVERSED),
        ),
        Span::styled(after, Style::default().fg(pal.text)),
    ])
}

/// Light Markdown-aware styling: headings and fences stand out, everything
/// else renders as plain text.
fn styled_line<'a>(raw: &'a str, pal: &Palette) -> Line<'a> {
    if raw.starts_with('#') {
        Line::from(Span::styled(raw, Style::default().fg(pal.iris).bold()))
    } else if raw.starts_with("```") {
        Line::from(Span::styled(raw, Style::default().fg(pal.pine)))
    } else if raw.starts_with('>') {
        Line::from(Span::styled(raw, Style::default().fg(pal.subtle).italic()))
    } else {
        Line::from(Span::styled(raw, Style::default().fg(pal.text)))
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App, pal: &Palette) {
    let last_saved = app
        .last_saved
        .map(|t| format!("Last saved: {}", t.format("%H:%M:%S")))
        .unwrap_or_else(|| "Not saved yet".to_string());

    let footer = Line::from(vec![
        Span::styled(
            format!(" Words: {} ", app.word_count()),
            Style::default().fg(pal.subtle),
        ),
        Span::styled("│ ", Style::default().fg(pal.muted)),
        Span::styled(last_saved, Style::default().fg(pal.subtle)),
    ]);

    Paragraph::new(footer)
        .alignment(Alignment::Right)
        .render(area, frame.buffer_mut());
}
