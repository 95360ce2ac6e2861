use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "vendor_landscape",
    version,
    about = "Weighted vendor quadrant and KPI radar dashboard"
)]
pub struct CliArgs {
    /// Print vendor positions and raw scores, then exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Base URL of a scoring service (switches to HTTP mode)
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Vendor results file scored locally
    #[arg(long = "data-file", value_name = "PATH")]
    pub data_file: Option<String>,

    /// Dashboard configuration (KPIs, axes, presets) as JSON
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Log file for interactive mode
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Directory raw data exports are written to
    #[arg(long = "export-dir", value_name = "PATH")]
    pub export_dir: Option<String>,

    /// Preset to apply before the headless report
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("DASHBOARD_API_URL", url);
        }
        if let Some(path) = &self.data_file {
            std::env::set_var("DASHBOARD_DATA_FILE", path);
        }
        if let Some(path) = &self.config {
            std::env::set_var("DASHBOARD_CONFIG", path);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("DASHBOARD_LOG_FILE", path);
        }
        if let Some(dir) = &self.export_dir {
            std::env::set_var("DASHBOARD_EXPORT_DIR", dir);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
