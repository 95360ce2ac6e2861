use super::palette::token_color;
use super::weights::focus_style;
use crate::app::{App, Focus};
use crate::engine::radar::tooltip_label;
use crate::engine::visibility::VENDOR_PANEL_TITLE;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

pub fn render_vendor_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::Vendors;
    let block = Block::default()
        .title(format!(" {VENDOR_PANEL_TITLE} "))
        .borders(Borders::ALL)
        .border_style(focus_style(focused));

    if let Some(placeholder) = app.vendors.placeholder() {
        f.render_widget(
            Paragraph::new(Span::styled(placeholder, Style::default().fg(Color::Gray)))
                .block(block),
            area,
        );
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(8)])
        .split(area);

    let items: Vec<ListItem<'_>> = app
        .vendors
        .rows(&app.radar_store)
        .into_iter()
        .map(|row| {
            let check = if row.checked { "[x] " } else { "[ ] " };
            ListItem::new(Line::from(vec![
                Span::raw(check),
                Span::styled("■ ", Style::default().fg(token_color(row.swatch))),
                Span::raw(row.label.to_string()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(focused.then_some(app.vendors.cursor()));
    f.render_stateful_widget(list, sections[0], &mut state);

    render_scores(app, f, sections[1]);
}

/// Raw scores of the highlighted vendor, one line per category.
fn render_scores(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Scores ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let store = &app.radar_store;
    let lines: Vec<Line<'_>> = store
        .handle(app.vendors.cursor())
        .and_then(|handle| store.get(handle))
        .map(|series| {
            store
                .labels()
                .iter()
                .zip(&series.scores)
                .map(|(category, score)| {
                    Line::from(vec![
                        Span::styled(format!("{category:<16}"), Style::default().fg(Color::Gray)),
                        Span::raw(tooltip_label(&series.label, *score)),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
