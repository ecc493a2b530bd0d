//! Assistant overlay: chat transcript plus an input line.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::handlers::assistant::ChatRole;
use crate::ui::colors::Palette;
use crate::ui::components::{centered_rect, popup_block};

pub fn render(frame: &mut Frame, app: &App, pal: &Palette) {
    let area = frame.area();
    let popup = centered_rect(
        area.width.saturating_sub(16).min(90),
        area.height.saturating_sub(6),
        area,
    );
    let inner = popup_block(frame, popup, "Assistant", pal);

    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).split(inner);

    let mut lines = Vec::new();
    if app.assistant.messages.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask anything about your notes. Configure an API key in settings \
             to enable the full integration.",
            Style::default().fg(pal.muted).italic(),
        )));
    }
    for message in &app.assistant.messages {
        let (label, color) = match message.role {
            ChatRole::User => ("You", pal.foam),
            ChatRole::Assistant => ("Assistant", pal.iris),
        };
        lines.push(Line::from(Span::styled(
            format!("{label}:"),
            Style::default().fg(color).bold(),
        )));
        for text_line in message.content.lines() {
            lines.push(Line::from(Span::styled(
                text_line.to_string(),
                Style::default().fg(pal.text),
            )));
        }
        lines.push(Line::from(""));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(chunks[0], frame.buffer_mut());

    Paragraph::new(Span::styled(
        format!("{}▏", app.assistant.input_buffer),
        Style::default().fg(pal.text),
    ))
    .block(
        Block::bordered()
            .title(" Message ")
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(pal.highlight_high)),
    )
    .render(chunks[1], frame.buffer_mut());
}
