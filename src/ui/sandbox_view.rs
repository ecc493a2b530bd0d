//! Code sandbox overlay: edit a buffer, run it through a local interpreter
//! and insert it into the active note as a fenced block.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::sandbox::{SANDBOX_LANGUAGES, SandboxLanguage};
use crate::ui::colors::Palette;
use crate::ui::components::{centered_rect, popup_block};

/// Sandbox state: the buffer being edited, the selected language and the
/// captured output of the last run.
#[derive(Debug)]
pub struct SandboxState {
    pub language_index: usize,
    pub code: String,
    pub output: Option<String>,
}

impl SandboxState {
    pub fn new() -> Self {
        Self {
            language_index: 0,
            code: String::new(),
            output: None,
        }
    }

    pub fn language(&self) -> SandboxLanguage {
        SANDBOX_LANGUAGES[self.language_index % SANDBOX_LANGUAGES.len()]
    }

    pub fn cycle_language(&mut self) {
        self.language_index = (self.language_index + 1) % SANDBOX_LANGUAGES.len();
    }
}

impl Default for SandboxState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame, app: &App, pal: &Palette) {
    let area = frame.area();
    let popup = centered_rect(
        area.width.saturating_sub(12).min(100),
        area.height.saturating_sub(4),
        area,
    );
    let title = format!("Code Sandbox — {}", app.sandbox.language().display_name());
    let inner = popup_block(frame, popup, &title, pal);

    let chunks =
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).split(inner);

    let code_lines: Vec<Line> = if app.sandbox.code.is_empty() {
        vec![Line::from(Span::styled(
            "Type code here; Tab switches language.",
            Style::default().fg(pal.muted).italic(),
        ))]
    } else {
        let rows: Vec<&str> = app.sandbox.code.split('\n').collect();
        let last = rows.len() - 1;
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let text = if i == last {
                    format!("{row}▏")
                } else {
                    (*row).to_string()
                };
                Line::from(Span::styled(text, Style::default().fg(pal.text)))
            })
            .collect()
    };
    Paragraph::new(code_lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title(" Code ")
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(pal.highlight_high)),
        )
        .render(chunks[0], frame.buffer_mut());

    let output_lines: Vec<Line> = match &app.sandbox.output {
        Some(output) => output
            .lines()
            .map(|l| {
                let style = if l.starts_with("Error:") {
                    Style::default().fg(pal.love)
                } else {
                    Style::default().fg(pal.text)
                };
                Line::from(Span::styled(l.to_string(), style))
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "Output appears here after a run.",
            Style::default().fg(pal.muted).italic(),
        ))],
    };
    Paragraph::new(output_lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title(" Output ")
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(pal.highlight_high)),
        )
        .render(chunks[1], frame.buffer_mut());
}
