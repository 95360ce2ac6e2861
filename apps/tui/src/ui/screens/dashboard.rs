use crate::app::App;
use crate::ui::widgets::popup::render_help_popup;
use crate::ui::widgets::radar::render_radar_panel;
use crate::ui::widgets::scatter::render_scatter_panel;
use crate::ui::widgets::vendors::render_vendor_panel;
use crate::ui::widgets::weights::{render_preset_list, render_weight_panel};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(10),   // Panels
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area());

    render_title(app, f, main_layout[0]);
    render_panels(app, f, main_layout[1]);
    render_status_section(app, f, main_layout[2]);
    render_shortcuts(f, main_layout[3]);

    if app.show_help {
        render_help_popup(f, f.area());
    }
}

fn render_title(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "Vendor Landscape ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {}", app.weights.selected()),
            Style::default().fg(Color::White),
        ),
    ];
    if app.refresh_pending() {
        spans.push(Span::styled(" (updating)", Style::default().fg(Color::Gray)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_panels(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(40)])
        .split(area);

    let kpi_rows = u16::try_from(app.weights.kpis().len()).unwrap_or(u16::MAX);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(kpi_rows.saturating_add(2)),
            Constraint::Min(4),
        ])
        .split(columns[0]);
    render_weight_panel(app, f, left[0]);
    render_preset_list(app, f, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);
    render_scatter_panel(app, f, right[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(right[1]);
    render_radar_panel(app, f, bottom[0]);
    render_vendor_panel(app, f, bottom[1]);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.status_message.contains("failed") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status_paragraph = Paragraph::new(Span::styled(app.status_message.as_str(), style))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::Gray);
    let shortcuts = Line::from(vec![
        Span::styled("Tab", key),
        Span::styled(" focus  ", text),
        Span::styled("←/→", key),
        Span::styled(" weight  ", text),
        Span::styled("Enter", key),
        Span::styled(" apply/toggle  ", text),
        Span::styled("e", key),
        Span::styled(" export  ", text),
        Span::styled("?", key),
        Span::styled(" help  ", text),
        Span::styled("q", key),
        Span::styled(" quit", text),
    ]);
    f.render_widget(Paragraph::new(shortcuts).alignment(Alignment::Center), area);
}
