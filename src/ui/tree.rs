//! Sidebar: the notebook/note tree, replaced by search results while a
//! query is active, exactly as the original swapped the tree content.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, InputMode, TreeItem};
use crate::search::MatchKind;
use crate::ui::colors::Palette;

pub fn render(frame: &mut Frame, area: Rect, app: &App, pal: &Palette) {
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);
    render_search_box(frame, chunks[0], app, pal);

    if app.searching() {
        render_search_results(frame, chunks[1], app, pal);
    } else if app.input_mode == InputMode::Search && !app.recent_searches.is_empty() {
        render_recent_searches(frame, chunks[1], app, pal);
    } else {
        render_tree(frame, chunks[1], app, pal);
    }
}

fn render_search_box(frame: &mut Frame, area: Rect, app: &App, pal: &Palette) {
    let focused = app.input_mode == InputMode::Search;
    let border = if focused { pal.iris } else { pal.highlight_high };

    let content = if app.search_query.is_empty() && !focused {
        Span::styled("Search notes…", Style::default().fg(pal.muted))
    } else {
        let caret = if focused { "▏" } else { "" };
        Span::styled(
            format!("{}{caret}", app.search_query),
            Style::default().fg(pal.text),
        )
    };

    Paragraph::new(Line::from(vec![
        Span::styled("  ", Style::default().fg(pal.subtle)),
        content,
    ]))
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(border)),
    )
    .render(area, frame.buffer_mut());
}

fn render_tree(frame: &mut Frame, area: Rect, app: &App, pal: &Palette) {
    let block = Block::bordered()
        .title(" Notebooks ")
        .title_alignment(Alignment::Left)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(pal.highlight_high));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let max_width = inner.width.saturating_sub(6) as usize;
    let visible = inner.height as usize;
    let offset = app
        .selected_tree_item
        .saturating_sub(visible.saturating_sub(1));

    let mut lines = Vec::new();
    for (idx, item) in app.tree_items.iter().enumerate().skip(offset).take(visible) {
        let selected = idx == app.selected_tree_item;
        let line = match item {
            TreeItem::Notebook(id) => {
                let name = app
                    .repo
                    .notebook(id)
                    .map(|nb| nb.name.clone())
                    .unwrap_or_else(|| id.clone());
                let marker = if app.collapsed_notebooks.contains(id) {
                    "▸"
                } else {
                    "▾"
                };
                let count = app.repo.notes_in(id).len();
                let style = if selected {
                    Style::default().fg(pal.base).bg(pal.iris).bold()
                } else {
                    Style::default().fg(pal.foam).bold()
                };
                Line::from(Span::styled(
                    format!("{marker} 󰠮 {} ({count})", truncate(&name, max_width)),
                    style,
                ))
            }
            TreeItem::Note(id) => {
                let title = app
                    .repo
                    .note(id)
                    .map(|n| n.title.clone())
                    .unwrap_or_else(|| id.clone());
                let active = app.repo.active_note_id() == Some(id.as_str());
                let style = if selected {
                    Style::default().fg(pal.base).bg(pal.iris)
                } else if active {
                    Style::default().fg(pal.gold)
                } else {
                    Style::default().fg(pal.text)
                };
                let bullet = if active { "●" } else { " " };
                Line::from(Span::styled(
                    format!("  {bullet}  {}", truncate(&title, max_width)),
                    style,
                ))
            }
        };
        lines.push(line);
    }

    Paragraph::new(lines).render(inner, frame.buffer_mut());
}

fn render_search_results(frame: &mut Frame, area: Rect, app: &App, pal: &Palette) {
    let title = format!(" Search Results ({}) ", app.search_results.len());
    let block = Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(pal.highlight_high));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let max_width = inner.width.saturating_sub(4) as usize;
    let mut lines = Vec::new();
    for (idx, result) in app.search_results.iter().enumerate() {
        let selected = idx == app.selected_search_result;
        let style = if selected {
            Style::default().fg(pal.base).bg(pal.iris)
        } else {
            Style::default().fg(pal.text)
        };
        let icon = match result.kind {
            MatchKind::Title => "",
            MatchKind::Content => "",
        };
        lines.push(Line::from(Span::styled(
            format!(" {icon}  {}", truncate(&result.title, max_width)),
            style,
        )));
        lines.push(Line::from(Span::styled(
            format!("    {}", truncate(&result.match_context, max_width)),
            Style::default().fg(pal.muted).italic(),
        )));
    }

    if app.search_results.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No matching notes",
            Style::default().fg(pal.muted),
        )));
    }

    Paragraph::new(lines).render(inner, frame.buffer_mut());
}

fn render_recent_searches(frame: &mut Frame, area: Rect, app: &App, pal: &Palette) {
    let block = Block::bordered()
        .title(" Recent Searches ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(pal.highlight_high));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let max_width = inner.width.saturating_sub(10) as usize;
    let lines: Vec<Line> = app
        .recent_searches
        .iter()
        .take(inner.height as usize)
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("   {}", truncate(&entry.query, max_width)),
                    Style::default().fg(pal.text),
                ),
                Span::styled(
                    format!("  ({})", entry.result_count),
                    Style::default().fg(pal.muted),
                ),
                Span::styled(
                    format!("  {}", entry.timestamp.format("%H:%M")),
                    Style::default().fg(pal.muted).italic(),
                ),
            ])
        })
        .collect();

    Paragraph::new(lines).render(inner, frame.buffer_mut());
}

/// Truncates to a display width, appending an ellipsis when cut.
fn truncate(text: &str, max_width: usize) -> String {
    if max_width == 0 || text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
