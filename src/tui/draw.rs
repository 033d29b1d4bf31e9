use ratatui::prelude::*;
use ratatui::widgets::{
    canvas::{Canvas, Line as CanvasLine, Points, Rectangle},
    Block, Borders, Clear, Paragraph,
};

use super::{app::App, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::layout::{cull, minimap, LayoutMode, TextAnchor};

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let [map_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    draw_map(frame, app, map_area);
    draw_minimap(frame, app, map_area);
    draw_status(frame, app, status_area);
}

fn draw_map(frame: &mut Frame, app: &App, area: Rect) {
    let rect = app.viewport.world_rect(SURFACE_WIDTH, SURFACE_HEIGHT);
    let visible = cull::cull(
        app.slot.geometry(),
        app.mode,
        &app.viewport,
        SURFACE_WIDTH,
        SURFACE_HEIGHT,
    );
    let (ox, oy) = app.mode.center_offset(SURFACE_WIDTH, SURFACE_HEIGHT);
    let selected = app.selected_key();
    // Canvas y grows upward, world y downward.
    let flip = |y: f64| rect.min_y + rect.max_y - y;
    // World units per terminal cell, for right-anchored labels.
    let cell = (rect.max_x - rect.min_x) / f64::from(area.width.max(1));

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(" mindmap-tui ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_bounds([rect.min_x, rect.max_x])
        .y_bounds([rect.min_y, rect.max_y])
        .paint(|ctx| {
            for edge in &visible.edges {
                ctx.draw(&CanvasLine {
                    x1: edge.source.0 + ox,
                    y1: flip(edge.source.1 + oy),
                    x2: edge.target.0 + ox,
                    y2: flip(edge.target.1 + oy),
                    color: Color::DarkGray,
                });
            }
            for node in &visible.nodes {
                let highlighted = selected.as_deref() == Some(node.key.as_str());
                let style = if highlighted {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if node.has_children {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::White)
                };
                let text = format!("● {}", node.label);
                let mut x = node.x + ox;
                if node.anchor == TextAnchor::End {
                    x -= text.chars().count() as f64 * cell;
                }
                ctx.print(x, flip(node.y + oy), Span::styled(text, style));
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_minimap(frame: &mut Frame, app: &App, area: Rect) {
    if app.slot.geometry().nodes.is_empty() {
        return;
    }
    let width = area.width / 4;
    let height = area.height / 4;
    if width < 8 || height < 4 {
        return;
    }
    let mini_area = Rect {
        x: area.right().saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height,
    };
    let mini = minimap::project(
        app.slot.geometry(),
        app.mode,
        &app.viewport,
        SURFACE_WIDTH,
        SURFACE_HEIGHT,
    );
    let flip = |y: f64| mini.height - y;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .x_bounds([0.0, mini.width])
        .y_bounds([0.0, mini.height])
        .paint(|ctx| {
            for edge in &mini.edges {
                ctx.draw(&CanvasLine {
                    x1: edge.source.0,
                    y1: flip(edge.source.1),
                    x2: edge.target.0,
                    y2: flip(edge.target.1),
                    color: Color::DarkGray,
                });
            }
            let dots: Vec<(f64, f64)> = mini.nodes.iter().map(|&(x, y)| (x, flip(y))).collect();
            ctx.draw(&Points {
                coords: &dots,
                color: Color::Gray,
            });
            ctx.draw(&Rectangle {
                x: mini.view.x,
                y: flip(mini.view.y + mini.view.height),
                width: mini.view.width,
                height: mini.view.height,
                color: Color::Yellow,
            });
        });
    frame.render_widget(Clear, mini_area);
    frame.render_widget(canvas, mini_area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(buffer) = &app.input {
        format!(" new child: {buffer}▏  (Enter to add, Esc to cancel)")
    } else if let Some(status) = &app.status {
        format!(" {status}")
    } else {
        let mode = match app.mode {
            LayoutMode::Hierarchical => "tree",
            LayoutMode::Radial => "radial",
        };
        format!(
            " {}  [{mode}]  {} nodes  zoom {:.2}  q quit  m mode  hjkl select  a add  x remove  e expand",
            app.session.id(),
            app.session.tree().node_count(),
            app.viewport.scale,
        )
    };
    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
