use super::palette::token_color;
use super::weights::focus_style;
use crate::app::{App, Focus};
use crate::engine::scatter::{label_alignment, tooltip_lines, LabelAlign, AXIS_MAX, AXIS_MIN};
use crate::engine::ScatterChart;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};

const MIDPOINT: f64 = (AXIS_MIN + AXIS_MAX) / 2.0;
const LABEL_OFFSET: f64 = 4.0;

pub fn render_scatter_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Scatter;

    if let Some(notice) = app.scatter.container().notice() {
        render_notice(f, area, notice);
        return;
    }

    let Some(chart) = app.scatter.chart() else {
        render_loading(app, f, area, " Quadrant View ");
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(5),
        ])
        .split(area);

    render_canvas(app, chart, f, sections[0], focused);
    render_legend(chart, f, sections[1]);
    render_tooltip(app, chart, f, sections[2]);
}

fn render_canvas(app: &App, chart: &ScatterChart, f: &mut Frame<'_>, area: Rect, focused: bool) {
    let block = Block::default()
        .title(format!(" {} ", chart.title()))
        .title(Line::from(format!(" {} ", app.axis_labels.y)).right_aligned())
        .title_bottom(Line::from(format!(" {} ", app.axis_labels.x)).centered())
        .borders(Borders::ALL)
        .border_style(focus_style(focused));

    let progress = chart.render_state().progress();
    let inner_width = f64::from(block.inner(area).width.max(1));
    let char_width = (AXIS_MAX - AXIS_MIN) / inner_width;
    let selected = focused.then_some(app.point_cursor);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([AXIS_MIN, AXIS_MAX])
        .y_bounds([AXIS_MIN, AXIS_MAX])
        .paint(move |ctx| {
            ctx.draw(&CanvasLine {
                x1: MIDPOINT,
                y1: AXIS_MIN,
                x2: MIDPOINT,
                y2: AXIS_MAX,
                color: Color::DarkGray,
            });
            ctx.draw(&CanvasLine {
                x1: AXIS_MIN,
                y1: MIDPOINT,
                x2: AXIS_MAX,
                y2: MIDPOINT,
                color: Color::DarkGray,
            });
            ctx.layer();

            for (index, (dataset, point)) in chart.points().enumerate() {
                let x = (point.x - MIDPOINT).mul_add(progress, MIDPOINT);
                let y = (point.y - MIDPOINT).mul_add(progress, MIDPOINT);
                let highlighted = selected == Some(index);
                let color = if highlighted {
                    Color::White
                } else {
                    token_color(&dataset.border_color)
                };
                ctx.draw(&Points {
                    coords: &[(x, y)],
                    color,
                });

                let Some(vendor) = point.vendor.as_deref() else {
                    continue;
                };
                #[allow(clippy::cast_precision_loss)]
                let label_width = vendor.chars().count() as f64 * char_width;
                let (lx, ly) = match label_alignment(point) {
                    LabelAlign::Above => (x - label_width / 2.0, y + LABEL_OFFSET),
                    LabelAlign::Below => (x - label_width / 2.0, y - LABEL_OFFSET),
                    LabelAlign::Left => (x - label_width - char_width, y),
                };
                let mut style = Style::default().fg(Color::Gray);
                if highlighted {
                    style = style.fg(Color::White).add_modifier(Modifier::BOLD);
                }
                ctx.print(
                    lx.clamp(AXIS_MIN, AXIS_MAX),
                    ly.clamp(AXIS_MIN, AXIS_MAX),
                    Line::from(Span::styled(vendor.to_string(), style)),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_legend(chart: &ScatterChart, f: &mut Frame<'_>, area: Rect) {
    let mut spans = Vec::new();
    for dataset in chart.datasets() {
        spans.push(Span::styled("● ", Style::default().fg(token_color(&dataset.border_color))));
        spans.push(Span::raw(format!("{}  ", dataset.label)));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_tooltip(app: &App, chart: &ScatterChart, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Point ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines: Vec<Line<'_>> = if app.focus == Focus::Scatter {
        chart
            .points()
            .nth(app.point_cursor)
            .map(|(_, point)| tooltip_lines(point).into_iter().map(Line::from).collect())
            .unwrap_or_default()
    } else {
        vec![Line::from(Span::styled(
            "Focus the chart (Tab) and use Up/Down to inspect vendors",
            Style::default().fg(Color::Gray),
        ))]
    };

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// Failure notice that replaces a chart panel's content.
pub fn render_notice(f: &mut Frame<'_>, area: Rect, notice: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let paragraph = Paragraph::new(Span::styled(notice, Style::default().fg(Color::Red)))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Placeholder shown until the first response arrives.
pub fn render_loading(app: &App, f: &mut Frame<'_>, area: Rect, title: &str) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let throbber = Throbber::default()
        .label("Fetching...")
        .style(Style::default().fg(Color::Gray))
        .throbber_style(Style::default().fg(Color::Cyan))
        .throbber_set(BRAILLE_SIX);
    let mut state = app.throbber.clone();
    f.render_stateful_widget(throbber, inner, &mut state);
}
