//! Calendar overlay: a month grid with activity marks.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Widget},
};

use crate::app::App;
use crate::calendar::DAY_HEADERS;
use crate::ui::colors::Palette;
use crate::ui::components::{centered_rect, popup_block};

pub fn render(frame: &mut Frame, app: &App, pal: &Palette) {
    let popup = centered_rect(60, 18, frame.area());
    let inner = popup_block(frame, popup, "Calendar", pal);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(inner);

    Paragraph::new(Line::from(Span::styled(
        app.calendar.label(),
        Style::default().fg(pal.text).bold(),
    )))
    .alignment(Alignment::Center)
    .render(chunks[0], frame.buffer_mut());

    let header = Row::new(
        DAY_HEADERS
            .iter()
            .map(|d| Cell::from(*d).style(Style::default().fg(pal.iris).bold())),
    );

    let grid = app.calendar.day_grid(app.repo.notes().values());
    let mut cells: Vec<Cell> = vec![Cell::from(""); app.calendar.leading_blanks()];
    for day in &grid {
        let mut style = Style::default().fg(pal.text);
        let mut label = format!("{:>2}", day.day);
        if day.has_activity {
            style = style.fg(pal.gold);
            label.push('•');
        }
        if day.is_today {
            style = style.fg(pal.base).bg(pal.iris);
        }
        cells.push(Cell::from(label).style(style));
    }

    let rows: Vec<Row> = cells
        .chunks(7)
        .map(|week| Row::new(week.to_vec()))
        .collect();

    Table::new(rows, [Constraint::Length(4); 7])
        .header(header)
        .column_spacing(1)
        .render(chunks[1], frame.buffer_mut());

    Paragraph::new(Line::from(Span::styled(
        " • marks days with note activity ",
        Style::default().fg(pal.muted).italic(),
    )))
    .alignment(Alignment::Center)
    .render(chunks[2], frame.buffer_mut());
}
