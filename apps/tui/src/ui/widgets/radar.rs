use super::palette::token_color;
use super::scatter::{render_loading, render_notice};
use crate::app::App;
use crate::engine::radar::{RADAR_TITLE, SCALE_MAX, SCALE_STEP};
use crate::engine::{RadarChart, RadarDataStore};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Room around the outer ring for category labels.
const BOUND: f64 = SCALE_MAX * 1.3;

fn spoke(index: usize, count: usize, radius: f64) -> (f64, f64) {
    #[allow(clippy::cast_precision_loss)]
    let angle = FRAC_PI_2 - TAU * index as f64 / count as f64;
    (radius * angle.cos(), radius * angle.sin())
}

/// Closed outline through `vertices`. One or two vertices degrade to a
/// point or a line, and the vertices themselves are always plotted.
fn polygon(ctx: &mut Context<'_>, vertices: &[(f64, f64)], color: Color) {
    ctx.draw(&Points {
        coords: vertices,
        color,
    });
    if vertices.len() < 2 {
        return;
    }
    for (i, &(x1, y1)) in vertices.iter().enumerate() {
        let (x2, y2) = vertices[(i + 1) % vertices.len()];
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }
}

pub fn render_radar_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    if let Some(notice) = app.radar.container().notice() {
        render_notice(f, area, notice);
        return;
    }

    match app.radar.chart() {
        Some(chart) => render_radar_chart(chart, &app.radar_store, f, area),
        None => render_loading(app, f, area, " Overall KPI Profile "),
    }
}

fn render_radar_chart(chart: &RadarChart, store: &RadarDataStore, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" {RADAR_TITLE} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let labels = store.labels();
    let count = labels.len();
    let progress = chart.render_state().progress();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-BOUND, BOUND])
        .y_bounds([-BOUND, BOUND])
        .paint(move |ctx| {
            if count == 0 {
                return;
            }

            // Rings need at least a triangle to read as a scale.
            if count >= 3 {
                let mut ring = SCALE_STEP;
                while ring <= SCALE_MAX {
                    let vertices: Vec<_> = (0..count).map(|i| spoke(i, count, ring)).collect();
                    polygon(ctx, &vertices, Color::DarkGray);
                    ring += SCALE_STEP;
                }
            }
            for i in 0..count {
                let (x2, y2) = spoke(i, count, SCALE_MAX);
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2,
                    y2,
                    color: Color::DarkGray,
                });
            }
            ctx.layer();

            for (index, series) in store.all().iter().enumerate() {
                if !chart.is_dataset_visible(index) {
                    continue;
                }
                let vertices: Vec<_> = series
                    .scores
                    .iter()
                    .enumerate()
                    .map(|(i, score)| spoke(i, count, score.clamp(0.0, SCALE_MAX) * progress))
                    .collect();
                polygon(ctx, &vertices, token_color(&series.color));
            }
            ctx.layer();

            for (i, label) in labels.iter().enumerate() {
                let (x, y) = spoke(i, count, SCALE_MAX * 1.12);
                #[allow(clippy::cast_precision_loss)]
                let shift = if x < -0.5 { label.chars().count() as f64 * 0.35 } else { 0.0 };
                ctx.print(
                    x - shift,
                    y,
                    Line::from(Span::styled(label.clone(), Style::default().fg(Color::Gray))),
                );
            }
        });

    f.render_widget(canvas, area);
}
