pub mod http;
pub mod local;
pub mod types;

use crate::config::{DashboardConfig, SourceMode};
use crate::domain::WeightVector;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub use http::HttpApi;
pub use local::LocalApi;
pub use types::{MetricValue, RadarScores, RadarSeriesPayload, ScatterDataset, ScatterPoint};

/// The scoring endpoints the dashboard talks to.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Weighted quadrant datasets for the given weight vector.
    async fn scatter(&self, weights: &WeightVector) -> Result<Vec<ScatterDataset>>;

    /// Unweighted per-vendor scores, already validated.
    async fn raw_scores(&self) -> Result<RadarScores>;

    /// The raw vendor results document, byte for byte.
    async fn raw_data(&self) -> Result<Vec<u8>>;
}

pub fn from_source(source: &SourceMode, config: &DashboardConfig) -> Result<Arc<dyn DashboardApi>> {
    let api: Arc<dyn DashboardApi> = match source {
        SourceMode::Http(base_url) => Arc::new(HttpApi::new(base_url)?),
        SourceMode::Local(path) => Arc::new(LocalApi::open(path, config)?),
    };
    Ok(api)
}
