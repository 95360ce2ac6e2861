use crate::app::state::{App, Focus};
use crossterm::event::KeyCode;
use std::time::Instant;

pub fn handle_input(app: &mut App, key: KeyCode, now: Instant) {
    if handle_help_toggle(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
        }
        KeyCode::BackTab => {
            app.focus = app.focus.previous();
        }
        KeyCode::Up => app.move_cursor(false),
        KeyCode::Down => app.move_cursor(true),
        KeyCode::Char('e') => app.request_export(),
        _ => handle_panel_input(app, key, now),
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::F(1) | KeyCode::Char('?')) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

fn handle_panel_input(app: &mut App, key: KeyCode, now: Instant) {
    match (app.focus, key) {
        (Focus::Weights, KeyCode::Left) => app.adjust_focused_weight(-1, now),
        (Focus::Weights, KeyCode::Right) => app.adjust_focused_weight(1, now),
        (Focus::Presets, KeyCode::Enter) => app.apply_highlighted_preset(),
        (Focus::Vendors, KeyCode::Enter | KeyCode::Char(' ')) => app.toggle_vendor(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = App::new(&DashboardConfig::default());
        let now = Instant::now();

        handle_input(&mut app, KeyCode::F(1), now);
        handle_input(&mut app, KeyCode::Char('q'), now);
        assert!(app.running);
        assert!(app.show_help);

        handle_input(&mut app, KeyCode::Esc, now);
        assert!(!app.show_help);
        handle_input(&mut app, KeyCode::Char('q'), now);
        assert!(!app.running);
    }

    #[test]
    fn arrows_step_the_focused_slider() {
        let mut app = App::new(&DashboardConfig::default());
        let now = Instant::now();

        handle_input(&mut app, KeyCode::Down, now);
        handle_input(&mut app, KeyCode::Right, now);

        let key = &app.weights.kpis()[1].key;
        assert_eq!(app.weights.weights().get(key), Some(6));
        assert!(app.weights.selected().is_custom());
        assert!(app.refresh_pending());
    }

    #[test]
    fn enter_on_presets_applies_the_highlighted_one() {
        let mut app = App::new(&DashboardConfig::default());
        let now = Instant::now();

        handle_input(&mut app, KeyCode::Tab, now);
        app.preset_cursor = 0;
        handle_input(&mut app, KeyCode::Enter, now);

        let first = app.weights.presets()[0].name.clone();
        assert_eq!(app.weights.selected().name(), first);
        assert_eq!(app.take_commands().len(), 1);
    }
}
