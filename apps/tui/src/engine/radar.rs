use super::chart::{ChartContainer, RenderState, UpdateMode};
use super::radar_store::RadarDataStore;
use super::ControllerState;
use crate::error::DashboardError;
use tracing::{debug, error, warn};

pub const RADAR_FAILURE_NOTICE: &str = "Error loading radar chart data.";
pub const RADAR_TITLE: &str = "Overall KPI Profile (Raw Scores 0-10)";
pub const SCALE_MAX: f64 = 10.0;
pub const SCALE_STEP: f64 = 2.0;

/// Tooltip text for one radar point: the raw value to one decimal.
pub fn tooltip_label(label: &str, value: f64) -> String {
    format!("{label}: {value:.1}")
}

/// Live radar render model.
///
/// Holds no series data of its own; labels and scores are read from the
/// store on every draw.
#[derive(Debug, Clone)]
pub struct RadarChart {
    generation: u64,
    visibility: Vec<bool>,
    render: RenderState,
}

impl RadarChart {
    fn from_store(store: &RadarDataStore) -> Self {
        let mut chart = Self {
            generation: 0,
            visibility: Vec::new(),
            render: RenderState::new(),
        };
        chart.sync(store);
        chart
    }

    fn sync(&mut self, store: &RadarDataStore) {
        self.generation = store.generation();
        self.visibility = store.all().iter().map(|series| !series.hidden).collect();
        self.update(UpdateMode::Animated);
    }

    /// Out-of-range indices are ignored.
    pub fn set_dataset_visibility(&mut self, index: usize, visible: bool) {
        if let Some(slot) = self.visibility.get_mut(index) {
            *slot = visible;
        }
    }

    pub fn is_dataset_visible(&self, index: usize) -> bool {
        self.visibility.get(index).copied().unwrap_or(false)
    }

    pub fn update(&mut self, mode: UpdateMode) {
        self.render.request(mode);
    }

    /// Store generation this chart was last synced from.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn render_state(&self) -> &RenderState {
        &self.render
    }

    pub fn render_state_mut(&mut self) -> &mut RenderState {
        &mut self.render
    }
}

/// Creates or refreshes the radar chart from the data store.
#[derive(Debug, Clone)]
pub struct RadarChartController {
    state: ControllerState,
    chart: Option<RadarChart>,
    container: ChartContainer,
}

impl RadarChartController {
    pub const fn new() -> Self {
        Self {
            state: ControllerState::Uninitialized,
            chart: None,
            container: ChartContainer::Mounted,
        }
    }

    /// Marks a raw-scores fetch as in flight. False once the container failed.
    pub fn begin_fetch(&mut self) -> bool {
        if self.container.is_failed() {
            debug!("radar container holds a failure notice; fetch skipped");
            return false;
        }
        self.state = ControllerState::Fetching;
        true
    }

    /// A full load always replays the animation, whether the chart is new or not.
    pub fn init_or_update(&mut self, store: &RadarDataStore) {
        if self.container.is_failed() {
            warn!("radar data arrived after the container failed; ignoring");
            return;
        }

        match self.chart.as_mut() {
            Some(chart) => chart.sync(store),
            None => self.chart = Some(RadarChart::from_store(store)),
        }
        self.state = ControllerState::Ready;
    }

    pub fn fail(&mut self, error: &DashboardError) {
        error!(kind = error.kind(), error = %error, "error fetching/rendering radar");
        self.state = ControllerState::Error;
        self.container = ChartContainer::Failed(RADAR_FAILURE_NOTICE.to_string());
    }

    pub const fn state(&self) -> ControllerState {
        self.state
    }

    pub const fn chart(&self) -> Option<&RadarChart> {
        self.chart.as_ref()
    }

    /// The live chart, unless the container has been replaced by a notice.
    pub fn live_chart_mut(&mut self) -> Option<&mut RadarChart> {
        if self.container.is_failed() {
            return None;
        }
        self.chart.as_mut()
    }

    pub const fn container(&self) -> &ChartContainer {
        &self.container
    }
}

impl Default for RadarChartController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RadarScores, RadarSeriesPayload};
    use crate::domain::ColorToken;
    use crate::error::RADAR_ENDPOINT;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn scores(scores_per_vendor: &[usize]) -> RadarScores {
        RadarScores {
            labels: vec!["Analysis".to_string(), "Speed".to_string(), "Deploy".to_string()],
            datasets: scores_per_vendor
                .iter()
                .enumerate()
                .map(|(i, len)| RadarSeriesPayload {
                    label: format!("Vendor {i}"),
                    data: vec![5.0; *len],
                    border_color: ColorToken::default(),
                    background_color: ColorToken::default(),
                })
                .collect(),
        }
    }

    #[test]
    fn first_load_creates_and_reload_animates() -> TestResult {
        let mut store = RadarDataStore::new();
        let mut controller = RadarChartController::new();
        assert!(controller.begin_fetch());

        store.load(scores(&[3, 3]))?;
        controller.init_or_update(&store);
        let chart = controller.chart().ok_or("no chart")?;
        assert_eq!(chart.render_state().last_mode(), Some(UpdateMode::Animated));
        assert!(chart.is_dataset_visible(1));

        store.load(scores(&[3, 3, 3]))?;
        controller.init_or_update(&store);
        let chart = controller.chart().ok_or("no chart")?;
        assert_eq!(chart.render_state().revision(), 2);
        assert_eq!(chart.render_state().last_mode(), Some(UpdateMode::Animated));
        assert_eq!(chart.generation(), 2);
        assert!(chart.is_dataset_visible(2));
        Ok(())
    }

    #[test]
    fn malformed_scores_leave_no_partial_chart() {
        let mut store = RadarDataStore::new();
        let mut controller = RadarChartController::new();
        controller.begin_fetch();

        match store.load(scores(&[3, 2])) {
            Ok(_) => controller.init_or_update(&store),
            Err(error) => controller.fail(&error),
        }

        assert!(controller.chart().is_none());
        assert_eq!(controller.state(), ControllerState::Error);
        assert_eq!(controller.container().notice(), Some(RADAR_FAILURE_NOTICE));
        assert!(store.is_empty());
        assert!(!controller.begin_fetch());
    }

    #[test]
    fn failure_hides_an_existing_chart() -> TestResult {
        let mut store = RadarDataStore::new();
        let mut controller = RadarChartController::new();
        store.load(scores(&[3]))?;
        controller.init_or_update(&store);

        controller.fail(&DashboardError::Http {
            endpoint: RADAR_ENDPOINT,
            status: 503,
        });

        assert!(controller.live_chart_mut().is_none());
        Ok(())
    }

    #[test]
    fn tooltip_shows_one_decimal() {
        assert_eq!(tooltip_label("Analysis", 7.26), "Analysis: 7.3");
        assert_eq!(tooltip_label("Speed", 10.0), "Speed: 10.0");
    }
}
