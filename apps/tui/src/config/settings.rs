use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "data/results.json";
const DEFAULT_LOG_FILE: &str = "vendor_landscape.log";

/// Where scatter points and radar scores come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    /// Remote scoring service exposing `/api/data` and `/api/rawscores`.
    Http(String),
    /// Vendor results file scored in-process.
    Local(PathBuf),
}

/// Runtime settings resolved from `.env` and the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub source: SourceMode,
    pub config_path: Option<PathBuf>,
    pub log_file: PathBuf,
    pub export_dir: PathBuf,
    pub debug: bool,
}

/// Initializes the application configuration from the environment.
pub fn init_app_config() -> RuntimeSettings {
    // Load environment variables from .env file
    dotenv().ok();

    let source = match non_empty_var("DASHBOARD_API_URL") {
        Some(url) => SourceMode::Http(url),
        None => SourceMode::Local(
            non_empty_var("DASHBOARD_DATA_FILE")
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_FILE), PathBuf::from),
        ),
    };

    RuntimeSettings {
        source,
        config_path: non_empty_var("DASHBOARD_CONFIG").map(PathBuf::from),
        log_file: non_empty_var("DASHBOARD_LOG_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from),
        export_dir: non_empty_var("DASHBOARD_EXPORT_DIR")
            .map_or_else(|| PathBuf::from("."), PathBuf::from),
        debug: env::var("DEBUG").is_ok_and(|value| value != "0" && !value.is_empty()),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
