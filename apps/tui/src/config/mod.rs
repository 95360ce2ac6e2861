pub mod dashboard;
pub mod settings;

pub use dashboard::{AxisLabels, DashboardConfig};
pub use settings::{init_app_config, RuntimeSettings, SourceMode};
