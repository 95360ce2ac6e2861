//! State synchronisation and refresh engine.
//!
//! Everything here is mutated from the event loop only; fetches settle on
//! other tasks and are handed back as values.

pub mod chart;
pub mod debounce;
pub mod radar;
pub mod radar_store;
pub mod scatter;
pub mod visibility;
pub mod weights;

pub use chart::{ChartContainer, RenderState, UpdateMode};
pub use debounce::Debouncer;
pub use radar::{RadarChart, RadarChartController};
pub use radar_store::{RadarDataStore, RadarSeries, SeriesHandle};
pub use scatter::{ScatterChart, ScatterChartController, ScatterRequest, ScatterResponse};
pub use visibility::VendorVisibilityPanel;
pub use weights::{RefreshTrigger, WeightPanel};

/// Lifecycle shared by both chart controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Fetching,
    Ready,
    Error,
}

/// What applying a settled fetch did to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    Updated,
    /// Superseded by a newer request and dropped.
    Stale,
    Failed,
    /// The container already shows a failure notice.
    Abandoned,
}
