//! Graph overlay: notes as scattered points, link entries as edges.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{
        Paragraph, Widget,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};

use crate::app::App;
use crate::ui::colors::Palette;
use crate::ui::components::{centered_rect, popup_block};

const BOUNDS: f64 = 100.0;

pub fn render(frame: &mut Frame, app: &App, pal: &Palette) {
    let area = frame.area();
    let popup = centered_rect(
        area.width.saturating_sub(8),
        area.height.saturating_sub(4),
        area,
    );
    let inner = popup_block(frame, popup, "Note Graph", pal);

    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);

    let positions = app.graph.node_positions();
    let canvas = Canvas::default()
        .x_bounds([0.0, BOUNDS])
        .y_bounds([0.0, BOUNDS])
        .paint(|ctx| {
            // Edges first so nodes draw over them. Edges whose target has no
            // node (dangling links) simply have nothing to connect to.
            for edge in &app.graph.edges {
                let (Some(&(x1, y1)), Some(&(x2, y2))) = (
                    positions.get(edge.source.as_str()),
                    positions.get(edge.target.as_str()),
                ) else {
                    continue;
                };
                ctx.draw(&CanvasLine {
                    x1: x1 * BOUNDS,
                    y1: y1 * BOUNDS,
                    x2: x2 * BOUNDS,
                    y2: y2 * BOUNDS,
                    color: pal.muted,
                });
            }

            let coords: Vec<(f64, f64)> = app
                .graph
                .nodes
                .iter()
                .map(|n| (n.x * BOUNDS, n.y * BOUNDS))
                .collect();
            ctx.draw(&Points {
                coords: &coords,
                color: pal.iris,
            });

            if app.graph.show_labels {
                for node in &app.graph.nodes {
                    ctx.print(
                        node.x * BOUNDS,
                        (node.y * BOUNDS + 3.0).min(BOUNDS),
                        Line::from(Span::styled(
                            node.label.clone(),
                            Style::default().fg(pal.text),
                        )),
                    );
                }
            }
        });
    canvas.render(chunks[0], frame.buffer_mut());

    let physics = if app.graph.physics_enabled { "on" } else { "off" };
    let status = Line::from(Span::styled(
        format!(
            " {} notes, {} links │ labels: {} │ physics: {physics} ",
            app.graph.nodes.len(),
            app.graph.edges.len(),
            if app.graph.show_labels { "on" } else { "off" },
        ),
        Style::default().fg(pal.muted).italic(),
    ));
    Paragraph::new(status)
        .alignment(Alignment::Center)
        .render(chunks[1], frame.buffer_mut());
}
