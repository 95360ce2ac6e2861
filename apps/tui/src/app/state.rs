use super::export::{ExportEvent, ExportMachine};
use crate::api::RadarScores;
use crate::config::{AxisLabels, DashboardConfig};
use crate::domain::{PresetSelection, WeightVector};
use crate::engine::debounce::SCATTER_DEBOUNCE;
use crate::engine::{
    ApplyOutcome, Debouncer, RadarChartController, RadarDataStore, RefreshTrigger,
    ScatterChartController, ScatterRequest, ScatterResponse, VendorVisibilityPanel, WeightPanel,
};
use crate::error::Result;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info, warn};

/// Panel that receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Weights,
    Presets,
    Vendors,
    Scatter,
}

impl Focus {
    const ORDER: [Self; 4] = [Self::Weights, Self::Presets, Self::Vendors, Self::Scatter];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Work the event loop runs off the mutation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchScatter(ScatterRequest),
    FetchRadar,
    ExportRaw,
}

/// A settled command, handed back to the loop.
#[derive(Debug)]
pub enum FetchOutcome {
    Scatter(ScatterResponse),
    Radar(Result<RadarScores>),
    Export(Result<PathBuf>),
}

/// Arguments carried through the scatter debouncer.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScatterArgs {
    weights: WeightVector,
    selection: PresetSelection,
}

pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub status_message: String,
    pub focus: Focus,
    pub weight_cursor: usize,
    pub preset_cursor: usize,
    pub point_cursor: usize,
    pub axis_labels: AxisLabels,
    pub weights: WeightPanel,
    pub scatter: ScatterChartController,
    pub radar_store: RadarDataStore,
    pub radar: RadarChartController,
    pub vendors: VendorVisibilityPanel,
    pub throbber: ThrobberState,
    pub export: ExportMachine,
    scatter_debounce: Debouncer<ScatterArgs>,
    commands: VecDeque<Command>,
    last_frame: Instant,
    started: bool,
}

impl App {
    pub fn new(config: &DashboardConfig) -> Self {
        let weights = WeightPanel::new(config);
        let preset_cursor = weights
            .presets()
            .iter()
            .position(|preset| preset.name == weights.selected().name())
            .unwrap_or(0);

        Self {
            running: true,
            show_help: false,
            status_message: String::new(),
            focus: Focus::Weights,
            weight_cursor: 0,
            preset_cursor,
            point_cursor: 0,
            axis_labels: config.axis_labels.clone(),
            weights,
            scatter: ScatterChartController::new(),
            radar_store: RadarDataStore::new(),
            radar: RadarChartController::new(),
            vendors: VendorVisibilityPanel::new(),
            throbber: ThrobberState::default(),
            export: ExportMachine::new(),
            scatter_debounce: Debouncer::new(SCATTER_DEBOUNCE),
            commands: VecDeque::new(),
            last_frame: Instant::now(),
            started: false,
        }
    }

    /// Applies a preset before startup without queuing a fetch.
    pub fn preselect(&mut self, name: &str) -> bool {
        if self.started || self.weights.select_preset(name).is_none() {
            return false;
        }
        if let Some(index) = self.weights.presets().iter().position(|p| p.name == name) {
            self.preset_cursor = index;
        }
        true
    }

    /// Queues the startup fetches: one scatter refresh and one radar load.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if self.radar.begin_fetch() {
            self.commands.push_back(Command::FetchRadar);
        }
        self.refresh_scatter_now();
        self.status_message = "Loading vendor data...".to_string();
    }

    pub fn select_preset(&mut self, name: &str) {
        if self.weights.select_preset(name) != Some(RefreshTrigger::Immediate) {
            return;
        }
        if self.scatter_debounce.cancel().is_some() {
            debug!("pending slider refresh superseded by preset");
        }
        info!(preset = name, "preset applied");
        self.status_message = format!("Preset: {name}");
        self.refresh_scatter_now();
    }

    /// Applies the preset under the preset cursor.
    pub fn apply_highlighted_preset(&mut self) {
        let Some(name) = self
            .weights
            .presets()
            .get(self.preset_cursor)
            .map(|preset| preset.name.clone())
        else {
            return;
        };
        self.select_preset(&name);
    }

    /// Steps the slider under the weight cursor.
    pub fn adjust_focused_weight(&mut self, delta: i16, now: Instant) {
        if self.weights.step_slider(self.weight_cursor, delta) == Some(RefreshTrigger::Debounced) {
            self.schedule_scatter_refresh(now);
        }
    }

    fn schedule_scatter_refresh(&mut self, now: Instant) {
        self.scatter_debounce.call(
            now,
            ScatterArgs {
                weights: self.weights.weights().clone(),
                selection: self.weights.selected().clone(),
            },
        );
    }

    fn refresh_scatter_now(&mut self) {
        let request = self
            .scatter
            .begin_refresh(self.weights.weights(), self.weights.selected());
        if let Some(request) = request {
            self.commands.push_back(Command::FetchScatter(request));
        }
    }

    /// Fires the debounced scatter refresh once its window has passed.
    pub fn poll_debounce(&mut self, now: Instant) {
        if let Some(args) = self.scatter_debounce.poll(now) {
            if let Some(request) = self.scatter.begin_refresh(&args.weights, &args.selection) {
                self.commands.push_back(Command::FetchScatter(request));
            }
        }
    }

    pub const fn refresh_pending(&self) -> bool {
        self.scatter_debounce.is_pending()
    }

    pub fn toggle_vendor(&mut self) {
        let chart = self.radar.live_chart_mut();
        if !self.vendors.toggle_selected(&mut self.radar_store, chart) {
            return;
        }
        if let Some(row) = self.vendors.rows(&self.radar_store).get(self.vendors.cursor()) {
            let state = if row.checked { "shown" } else { "hidden" };
            self.status_message = format!("{} {state}", row.label);
        }
    }

    pub fn request_export(&mut self) {
        match self.export.process(&ExportEvent::Start, &mut self.status_message) {
            Ok(()) => self.commands.push_back(Command::ExportRaw),
            Err(e) => debug!(error = %e, "export already running"),
        }
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        self.commands.drain(..).collect()
    }

    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Scatter(response) => self.apply_scatter(response),
            FetchOutcome::Radar(result) => self.apply_radar(result),
            FetchOutcome::Export(result) => self.apply_export(result),
        }
    }

    fn apply_scatter(&mut self, response: ScatterResponse) {
        match self.scatter.apply(response) {
            ApplyOutcome::Created | ApplyOutcome::Updated => {
                let points = self.scatter.chart().map_or(0, |chart| chart.points().count());
                if self.point_cursor >= points {
                    self.point_cursor = points.saturating_sub(1);
                }
                if self.status_message.starts_with("Loading") {
                    self.status_message.clear();
                }
            }
            ApplyOutcome::Failed => {
                self.status_message = "Scatter refresh failed; see log".to_string();
            }
            ApplyOutcome::Stale | ApplyOutcome::Abandoned => {}
        }
    }

    fn apply_radar(&mut self, result: Result<RadarScores>) {
        let loaded = result.and_then(|scores| self.radar_store.load(scores));
        match loaded {
            Ok(_) => {
                self.vendors.populate(&self.radar_store);
                self.radar.init_or_update(&self.radar_store);
            }
            Err(error) => {
                self.radar.fail(&error);
                self.status_message = "Radar load failed; see log".to_string();
            }
        }
    }

    fn apply_export(&mut self, result: Result<PathBuf>) {
        let event = match result {
            Ok(path) => ExportEvent::Written(path),
            Err(error) => {
                warn!(kind = error.kind(), error = %error, "raw data export failed");
                ExportEvent::Failed(error.to_string())
            }
        };
        if let Err(e) = self.export.process(&event, &mut self.status_message) {
            warn!(error = %e, "unexpected export transition");
        }
        if let Err(e) = self.export.process(&ExportEvent::Reset, &mut self.status_message) {
            warn!(error = %e, "unexpected export transition");
        }
    }

    /// Advances animations and the fetching indicator.
    pub fn tick(&mut self, now: Instant) {
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        if let Some(chart) = self.scatter.chart_mut() {
            chart.render_state_mut().advance(delta);
        }
        if let Some(chart) = self.radar.live_chart_mut() {
            chart.render_state_mut().advance(delta);
        }
        if self.is_fetching() {
            self.throbber.calc_next();
        }
    }

    pub fn is_fetching(&self) -> bool {
        use crate::engine::ControllerState::Fetching;
        self.scatter.state() == Fetching || self.radar.state() == Fetching
    }

    pub fn move_cursor(&mut self, down: bool) {
        match self.focus {
            Focus::Weights => {
                self.weight_cursor = step(self.weight_cursor, self.weights.kpis().len(), down);
            }
            Focus::Presets => {
                self.preset_cursor = step(self.preset_cursor, self.weights.presets().len(), down);
            }
            Focus::Vendors => {
                if down {
                    self.vendors.select_next();
                } else {
                    self.vendors.select_previous();
                }
            }
            Focus::Scatter => {
                let points = self.scatter.chart().map_or(0, |chart| chart.points().count());
                self.point_cursor = step(self.point_cursor, points, down);
            }
        }
    }
}

fn step(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (cursor + 1) % len
    } else {
        (cursor + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn app() -> App {
        App::new(&DashboardConfig::default())
    }

    fn scatter_requests(commands: &[Command]) -> Vec<&ScatterRequest> {
        commands
            .iter()
            .filter_map(|command| match command {
                Command::FetchScatter(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_queues_one_scatter_and_one_radar_fetch() {
        let mut app = app();
        app.start();
        app.start();

        let commands = app.take_commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], Command::FetchRadar);
        assert_eq!(
            scatter_requests(&commands)[0].title,
            "Quadrant View (Balanced (Equal Weight))"
        );
    }

    #[test]
    fn preset_cancels_pending_slider_refresh() {
        let mut app = app();
        let now = Instant::now();
        app.adjust_focused_weight(-1, now);
        assert!(app.refresh_pending());

        app.select_preset("Zero-Day Detection");
        let commands = app.take_commands();

        assert_eq!(scatter_requests(&commands).len(), 1);
        assert!(!app.refresh_pending());
        app.poll_debounce(now + Duration::from_secs(1));
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn slider_burst_becomes_one_custom_refresh() {
        let mut app = app();
        let start = Instant::now();
        for offset in [0, 50, 100, 150] {
            app.adjust_focused_weight(1, start + Duration::from_millis(offset));
            app.poll_debounce(start + Duration::from_millis(offset));
        }
        assert!(app.take_commands().is_empty());

        app.poll_debounce(start + Duration::from_millis(400));
        let commands = app.take_commands();
        let requests = scatter_requests(&commands);

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].title, "Quadrant View (Custom Weights)");
        assert_eq!(requests[0].weights.iter().next().map(|(_, w)| w), Some(9));
    }

    #[test]
    fn preselected_preset_titles_the_startup_fetch() {
        let mut app = app();
        assert!(app.preselect("Zero-Day Detection"));
        assert!(!app.preselect("Nope"));
        assert!(app.take_commands().is_empty());

        app.start();
        let commands = app.take_commands();
        let requests = scatter_requests(&commands);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].title, "Quadrant View (Zero-Day Detection)");
        assert_eq!(app.preset_cursor, 1);
    }

    #[test]
    fn focus_cycles_both_ways() {
        assert_eq!(Focus::Weights.next(), Focus::Presets);
        assert_eq!(Focus::Scatter.next(), Focus::Weights);
        assert_eq!(Focus::Weights.previous(), Focus::Scatter);
    }

    #[test]
    fn second_export_waits_for_the_first() {
        let mut app = app();
        app.request_export();
        app.request_export();

        assert_eq!(app.take_commands(), vec![Command::ExportRaw]);
    }
}
