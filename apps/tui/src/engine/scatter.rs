use super::chart::{ChartContainer, RenderState, UpdateMode};
use super::{ApplyOutcome, ControllerState};
use crate::api::{ScatterDataset, ScatterPoint};
use crate::domain::{PresetSelection, WeightVector};
use crate::error::{DashboardError, Result};
use tracing::{debug, error};

pub const SCATTER_FAILURE_NOTICE: &str = "Error loading scatter data.";
pub const AXIS_MIN: f64 = 0.0;
pub const AXIS_MAX: f64 = 100.0;

/// Points above this on either axis get their label pulled inwards.
const LABEL_FLIP_THRESHOLD: f64 = 90.0;

pub fn scatter_title(selection: &PresetSelection) -> String {
    match selection {
        PresetSelection::Custom => "Quadrant View (Custom Weights)".to_string(),
        PresetSelection::Named(name) => format!("Quadrant View ({name})"),
    }
}

/// Where a point's vendor label sits relative to the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlign {
    Above,
    Below,
    Left,
}

pub fn label_alignment(point: &ScatterPoint) -> LabelAlign {
    if point.y > LABEL_FLIP_THRESHOLD {
        LabelAlign::Below
    } else if point.x > LABEL_FLIP_THRESHOLD {
        LabelAlign::Left
    } else {
        LabelAlign::Above
    }
}

/// Detail lines shown for the highlighted point.
pub fn tooltip_lines(point: &ScatterPoint) -> Vec<String> {
    let vendor = point.vendor.as_deref().unwrap_or("Vendor");
    let date = if point.test_date.is_available() {
        format!(" ({})", point.test_date)
    } else {
        String::new()
    };

    let mut lines = vec![
        format!("{vendor}{date}:"),
        format!("  ({:.1}%, {:.1}%)", point.x, point.y),
    ];

    let mut metrics = Vec::new();
    if point.fp_rate.is_available() {
        metrics.push(format!("FP: {}%", point.fp_rate));
    }
    if point.fn_rate.is_available() {
        metrics.push(format!("FN: {}%", point.fn_rate));
    }
    if point.avg_speed.is_available() {
        metrics.push(format!("Speed: {}s", point.avg_speed));
    }
    if !metrics.is_empty() {
        lines.push(format!("  {}", metrics.join(" | ")));
    }
    lines
}

/// A scatter fetch to run, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterRequest {
    pub seq: u64,
    pub weights: WeightVector,
    pub title: String,
}

/// A settled scatter fetch.
#[derive(Debug)]
pub struct ScatterResponse {
    pub seq: u64,
    pub title: String,
    pub result: Result<Vec<ScatterDataset>>,
}

impl ScatterRequest {
    pub fn settle(self, result: Result<Vec<ScatterDataset>>) -> ScatterResponse {
        ScatterResponse {
            seq: self.seq,
            title: self.title,
            result,
        }
    }
}

/// The live quadrant chart. Datasets are replaced wholesale on each refresh.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    datasets: Vec<ScatterDataset>,
    title: String,
    render: RenderState,
}

impl ScatterChart {
    fn create(datasets: Vec<ScatterDataset>, title: String) -> Self {
        let mut chart = Self {
            datasets,
            title,
            render: RenderState::new(),
        };
        chart.update(UpdateMode::Animated);
        chart
    }

    pub fn update(&mut self, mode: UpdateMode) {
        self.render.request(mode);
    }

    pub fn datasets(&self) -> &[ScatterDataset] {
        &self.datasets
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn render_state(&self) -> &RenderState {
        &self.render
    }

    pub fn render_state_mut(&mut self) -> &mut RenderState {
        &mut self.render
    }

    /// All points in dataset order, paired with their dataset.
    pub fn points(&self) -> impl Iterator<Item = (&ScatterDataset, &ScatterPoint)> {
        self.datasets
            .iter()
            .flat_map(|dataset| dataset.data.iter().map(move |point| (dataset, point)))
    }
}

/// Fetches weighted scatter data and creates or updates the chart.
///
/// Every request carries a sequence number; only the response to the most
/// recently issued request is applied, so a slow older fetch can never
/// overwrite a fresher chart.
#[derive(Debug, Clone)]
pub struct ScatterChartController {
    state: ControllerState,
    chart: Option<ScatterChart>,
    container: ChartContainer,
    issued: u64,
}

impl ScatterChartController {
    pub const fn new() -> Self {
        Self {
            state: ControllerState::Uninitialized,
            chart: None,
            container: ChartContainer::Mounted,
            issued: 0,
        }
    }

    /// Issues a new request, or `None` once the container shows a failure.
    pub fn begin_refresh(
        &mut self,
        weights: &WeightVector,
        selection: &PresetSelection,
    ) -> Option<ScatterRequest> {
        if self.container.is_failed() {
            debug!("scatter container holds a failure notice; refresh skipped");
            return None;
        }

        self.issued += 1;
        self.state = ControllerState::Fetching;
        Some(ScatterRequest {
            seq: self.issued,
            weights: weights.clone(),
            title: scatter_title(selection),
        })
    }

    pub fn apply(&mut self, response: ScatterResponse) -> ApplyOutcome {
        if response.seq != self.issued {
            debug!(
                seq = response.seq,
                latest = self.issued,
                "dropping superseded scatter response"
            );
            return ApplyOutcome::Stale;
        }
        if self.container.is_failed() {
            return ApplyOutcome::Abandoned;
        }

        match response.result {
            Ok(datasets) => self.render(datasets, response.title),
            Err(error) => {
                self.fail(&error);
                ApplyOutcome::Failed
            }
        }
    }

    fn render(&mut self, datasets: Vec<ScatterDataset>, title: String) -> ApplyOutcome {
        self.state = ControllerState::Ready;
        match self.chart.as_mut() {
            Some(chart) => {
                chart.datasets = datasets;
                chart.title = title;
                chart.update(UpdateMode::Quiet);
                ApplyOutcome::Updated
            }
            None => {
                self.chart = Some(ScatterChart::create(datasets, title));
                ApplyOutcome::Created
            }
        }
    }

    fn fail(&mut self, error: &DashboardError) {
        error!(kind = error.kind(), error = %error, "error fetching/updating scatter");
        self.state = ControllerState::Error;
        self.container = ChartContainer::Failed(SCATTER_FAILURE_NOTICE.to_string());
    }

    pub const fn state(&self) -> ControllerState {
        self.state
    }

    pub const fn chart(&self) -> Option<&ScatterChart> {
        self.chart.as_ref()
    }

    pub fn chart_mut(&mut self) -> Option<&mut ScatterChart> {
        self.chart.as_mut()
    }

    pub const fn container(&self) -> &ChartContainer {
        &self.container
    }
}

impl Default for ScatterChartController {
    fn default() -> Self {
        Self::new()
    }
}
