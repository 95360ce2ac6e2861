use thiserror::Error;

pub const SCATTER_ENDPOINT: &str = "/api/data";
pub const RADAR_ENDPOINT: &str = "/api/rawscores";
pub const RAW_DATA_ENDPOINT: &str = "/api/rawdata";

/// Failures surfaced at a controller boundary.
///
/// None of these propagate past the panel they belong to: the affected chart
/// swaps its content for a notice and the rest of the dashboard keeps going.
/// `ElementsMissing` is the exception and aborts startup.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("required dashboard surfaces missing: {0}")]
    ElementsMissing(String),

    #[error("{endpoint} returned HTTP status {status}")]
    Http { endpoint: &'static str, status: u16 },

    #[error("{endpoint} request failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    #[error("{endpoint} returned a malformed response: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },

    #[error("invalid dashboard configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    pub fn malformed(endpoint: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint,
            reason: reason.into(),
        }
    }

    pub fn transport(endpoint: &'static str, error: &impl std::fmt::Display) -> Self {
        Self::Transport {
            endpoint,
            message: error.to_string(),
        }
    }

    /// Short tag used in log lines and the status bar.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ElementsMissing(_) => "ElementsMissing",
            Self::Http { .. } | Self::Transport { .. } => "HttpError",
            Self::MalformedResponse { .. } => "MalformedResponse",
            Self::Config(_) => "ConfigError",
            Self::Io(_) => "IoError",
        }
    }
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
