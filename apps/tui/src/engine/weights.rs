use crate::config::DashboardConfig;
use crate::domain::{
    KpiDefinition, KpiKey, Preset, PresetSelection, WeightVector, CUSTOM_PRESET, DEFAULT_WEIGHT,
    MAX_WEIGHT,
};
use std::collections::BTreeMap;
use tracing::debug;

/// How soon a weight change should reach the scatter chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Deliberate, discrete change (preset selection).
    Immediate,
    /// Part of a rapid input stream (slider drag).
    Debounced,
}

/// Owns the live weight vector and the selected preset name.
#[derive(Debug, Clone)]
pub struct WeightPanel {
    kpis: Vec<KpiDefinition>,
    presets: Vec<Preset>,
    weights: WeightVector,
    selected: PresetSelection,
    readouts: BTreeMap<KpiKey, String>,
}

impl WeightPanel {
    /// Starts from the configured default preset, or 5 everywhere when the
    /// default names no known preset.
    pub fn new(config: &DashboardConfig) -> Self {
        let weights = WeightVector::uniform(config.kpi_keys().cloned(), DEFAULT_WEIGHT);
        let readouts = config
            .kpis
            .iter()
            .filter(|kpi| kpi.readout)
            .map(|kpi| (kpi.key.clone(), DEFAULT_WEIGHT.to_string()))
            .collect();

        let mut panel = Self {
            kpis: config.kpis.clone(),
            presets: config.presets.clone(),
            weights,
            selected: PresetSelection::Custom,
            readouts,
        };

        if let Some(preset) = config.preset(&config.default_preset) {
            panel.apply_preset(preset);
        }
        panel
    }

    /// Overwrites every weight from a known preset.
    ///
    /// `"Custom"` and unknown names change nothing and trigger nothing.
    pub fn select_preset(&mut self, name: &str) -> Option<RefreshTrigger> {
        if name == CUSTOM_PRESET {
            return None;
        }
        let Some(preset) = self.presets.iter().find(|preset| preset.name == name).cloned() else {
            debug!(preset = name, "ignoring unknown preset");
            return None;
        };

        self.apply_preset(&preset);
        Some(RefreshTrigger::Immediate)
    }

    /// A slider moved: the vector is now hand-edited.
    pub fn on_slider_input(&mut self, key: &KpiKey, value: u8) -> Option<RefreshTrigger> {
        let value = value.min(MAX_WEIGHT);
        if !self.weights.set(key, value) {
            debug!(kpi = %key, "ignoring input for unknown KPI");
            return None;
        }

        self.selected = PresetSelection::Custom;
        self.update_readout(key, value);
        Some(RefreshTrigger::Debounced)
    }

    /// Moves the slider at `index` by `delta` steps.
    pub fn step_slider(&mut self, index: usize, delta: i16) -> Option<RefreshTrigger> {
        let key = self.kpis.get(index)?.key.clone();
        let current = i16::from(self.weights.get(&key)?);
        let next = (current + delta).clamp(0, i16::from(MAX_WEIGHT));
        if next == current {
            return None;
        }
        self.on_slider_input(&key, u8::try_from(next).ok()?)
    }

    fn apply_preset(&mut self, preset: &Preset) {
        for kpi in &self.kpis {
            let value = preset.weight_for(&kpi.key);
            self.weights.set(&kpi.key, value);
            if let Some(readout) = self.readouts.get_mut(&kpi.key) {
                *readout = value.to_string();
            }
        }
        self.selected = PresetSelection::Named(preset.name.clone());
    }

    fn update_readout(&mut self, key: &KpiKey, value: u8) {
        if let Some(readout) = self.readouts.get_mut(key) {
            *readout = value.to_string();
        }
    }

    pub const fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub const fn selected(&self) -> &PresetSelection {
        &self.selected
    }

    pub fn kpis(&self) -> &[KpiDefinition] {
        &self.kpis
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Readout text for a slider, if that slider has one.
    pub fn readout(&self, key: &KpiKey) -> Option<&str> {
        self.readouts.get(key).map(String::as_str)
    }
}
