use crate::app::{App, Focus};
use crate::domain::MAX_WEIGHT;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

pub fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

/// One gauge row per KPI: label, bar, and the readout when configured.
pub fn render_weight_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Weights;
    let block = Block::default()
        .title(" KPI Weights ")
        .borders(Borders::ALL)
        .border_style(focus_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let kpis = app.weights.kpis();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(kpis.iter().map(|_| Constraint::Length(1)))
        .split(inner);

    for (index, (kpi, row)) in kpis.iter().zip(rows.iter()).enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(18), Constraint::Min(4)])
            .split(*row);

        let selected = focused && index == app.weight_cursor;
        let label_style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if selected { "> " } else { "  " };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{marker}{}", kpi.label),
                label_style,
            ))),
            columns[0],
        );

        let weight = app.weights.weights().get(&kpi.key).unwrap_or(0);
        let label = app.weights.readout(&kpi.key).unwrap_or("").to_string();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .ratio(f64::from(weight) / f64::from(MAX_WEIGHT))
            .label(label);
        f.render_widget(gauge, columns[1]);
    }
}

pub fn render_preset_list(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Presets;
    let block = Block::default()
        .title(format!(" Use Case: {} ", app.weights.selected()))
        .borders(Borders::ALL)
        .border_style(focus_style(focused));

    let active = app.weights.selected().name();
    let items: Vec<ListItem<'_>> = app
        .weights
        .presets()
        .iter()
        .map(|preset| {
            let style = if preset.name == active {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(preset.name.as_str(), style))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(focused.then_some(app.preset_cursor));
    f.render_stateful_widget(list, area, &mut state);
}
