mod cli;
mod event;
mod terminal;

use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use tokio::sync::mpsc;
use tracing::{error, info};
use vendor_landscape::api;
use vendor_landscape::app::{App, AppActions};
use vendor_landscape::config::{init_app_config, DashboardConfig, SourceMode};
use vendor_landscape::logging::{init_logging, LogTarget};
use vendor_landscape::ui;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let settings = init_app_config();

    let headless = args.headless || !is_terminal();
    let target = if headless {
        LogTarget::Stderr
    } else {
        LogTarget::File(&settings.log_file)
    };
    init_logging(target, settings.debug)?;

    let config = match &settings.config_path {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    config.validate()?;

    match &settings.source {
        SourceMode::Http(url) => info!(url, "scoring via remote service"),
        SourceMode::Local(path) => info!(path = %path.display(), "scoring local results file"),
    }
    let api = api::from_source(&settings.source, &config)?;

    let mut app = App::new(&config);
    if let Some(name) = args.preset.as_deref() {
        if !app.preselect(name) {
            return Err(color_eyre::eyre::eyre!("Unknown preset: {name}"));
        }
    }

    if headless {
        return event::run_headless(&mut app, api.as_ref(), &settings.export_dir, args.json).await;
    }

    if let Some((width, height)) = terminal::terminal_size() {
        if let Err(e) = ui::check_surface(width, height) {
            error!(error = %e, "cannot initialize dashboard");
            return Err(e.into());
        }
    }

    let (results_tx, mut results_rx) = mpsc::unbounded_channel();
    let actions = AppActions::new(api, settings.export_dir.clone(), results_tx);

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app, &actions, &mut results_rx).await;
    terminal::cleanup_terminal_state(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
