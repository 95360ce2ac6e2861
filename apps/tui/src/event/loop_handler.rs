use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use crate::terminal::DashboardTerminal;
use vendor_landscape::api::DashboardApi;
use vendor_landscape::app::{actions, handle_input, App, AppActions, FetchOutcome};
use vendor_landscape::engine::radar::RADAR_TITLE;
use vendor_landscape::ui;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Run the dashboard event loop until the user quits.
///
/// Each pass advances animations, fires a due debounced refresh, hands
/// queued commands to their tasks, applies whatever has settled, draws, and
/// reads at most one key.
pub async fn run(
    terminal: &mut DashboardTerminal,
    app: &mut App,
    actions: &AppActions,
    results: &mut UnboundedReceiver<FetchOutcome>,
) -> Result<()> {
    app.start();

    while app.running {
        let now = Instant::now();
        app.tick(now);
        app.poll_debounce(now);

        for command in app.take_commands() {
            actions.dispatch(command);
        }
        while let Ok(outcome) = results.try_recv() {
            app.apply_outcome(outcome);
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code, Instant::now());
                }
                Ok(Event::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "failed to read terminal event"),
            }
        }
    }

    info!("dashboard closed");
    Ok(())
}

/// Fetch both endpoints once and print the result instead of drawing it.
pub async fn run_headless(
    app: &mut App,
    api: &dyn DashboardApi,
    export_dir: &Path,
    json: bool,
) -> Result<()> {
    app.start();
    for command in app.take_commands() {
        let outcome = actions::execute(api, export_dir, command).await;
        app.apply_outcome(outcome);
    }

    let report = HeadlessReport::from_app(app);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_headless_table(&report);
    }
    Ok(())
}

fn render_headless_table(report: &HeadlessReport) {
    println!("\n{}", report.title);
    println!("{}", "=".repeat(report.title.len()));
    let weights: Vec<String> = report
        .weights
        .iter()
        .map(|(key, weight)| format!("{key}={weight}"))
        .collect();
    println!("Weights: {}", weights.join(" "));

    match &report.scatter_error {
        Some(notice) => println!("{notice}"),
        None => {
            println!("\n{:<28} {:>8} {:>8}", "Vendor", "X", "Y");
            for position in &report.positions {
                println!(
                    "{:<28} {:>8.2} {:>8.2}",
                    position.vendor, position.x, position.y
                );
            }
        }
    }

    println!("\n{RADAR_TITLE}");
    match &report.radar_error {
        Some(notice) => println!("{notice}"),
        None => {
            println!("{:<28} {}", "Vendor", report.radar_labels.join(" | "));
            for series in &report.radar {
                let scores: Vec<String> =
                    series.scores.iter().map(|score| format!("{score:.1}")).collect();
                println!("{:<28} {}", series.label, scores.join(" | "));
            }
        }
    }
}

#[derive(Serialize)]
struct HeadlessReport {
    title: String,
    preset: String,
    weights: Vec<(String, u8)>,
    positions: Vec<HeadlessPosition>,
    scatter_error: Option<String>,
    radar_labels: Vec<String>,
    radar: Vec<HeadlessSeries>,
    radar_error: Option<String>,
}

#[derive(Serialize)]
struct HeadlessPosition {
    vendor: String,
    x: f64,
    y: f64,
    test_date: String,
}

#[derive(Serialize)]
struct HeadlessSeries {
    label: String,
    scores: Vec<f64>,
}

impl HeadlessReport {
    fn from_app(app: &App) -> Self {
        let chart = app.scatter.chart();
        let title = chart.map_or_else(
            || vendor_landscape::engine::scatter::scatter_title(app.weights.selected()),
            |chart| chart.title().to_string(),
        );

        let positions = chart
            .map(|chart| {
                chart
                    .points()
                    .map(|(dataset, point)| HeadlessPosition {
                        vendor: point.vendor.clone().unwrap_or_else(|| dataset.label.clone()),
                        x: point.x,
                        y: point.y,
                        test_date: point.test_date.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let radar = app
            .radar_store
            .all()
            .iter()
            .map(|series| HeadlessSeries {
                label: series.label.clone(),
                scores: series.scores.clone(),
            })
            .collect();

        Self {
            title,
            preset: app.weights.selected().to_string(),
            weights: app
                .weights
                .weights()
                .iter()
                .map(|(key, weight)| (key.to_string(), weight))
                .collect(),
            positions,
            scatter_error: app.scatter.container().notice().map(str::to_string),
            radar_labels: app.radar_store.labels().to_vec(),
            radar,
            radar_error: app.radar.container().notice().map(str::to_string),
        }
    }
}
