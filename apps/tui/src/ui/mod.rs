// UI module for the vendor landscape dashboard
// Draws every panel from App state; nothing here mutates it

pub mod screens;
pub mod widgets;

use crate::app::App;
use crate::error::{DashboardError, Result};
use ratatui::Frame;

/// Smallest terminal every dashboard panel fits in.
pub const MIN_WIDTH: u16 = 100;
pub const MIN_HEIGHT: u16 = 30;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::dashboard::render_dashboard(app, f);
}

/// Fails with `ElementsMissing` when the terminal cannot hold every panel.
pub fn check_surface(width: u16, height: u16) -> Result<()> {
    let mut missing = Vec::new();
    if width < MIN_WIDTH {
        missing.push(format!("width {width} < {MIN_WIDTH}"));
    }
    if height < MIN_HEIGHT {
        missing.push(format!("height {height} < {MIN_HEIGHT}"));
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DashboardError::ElementsMissing(format!(
            "terminal too small for the dashboard panels ({})",
            missing.join(", ")
        )))
    }
}
