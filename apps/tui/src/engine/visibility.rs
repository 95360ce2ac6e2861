use super::chart::UpdateMode;
use super::radar::RadarChart;
use super::radar_store::{RadarDataStore, SeriesHandle};
use crate::domain::ColorToken;
use tracing::debug;

pub const VENDOR_PANEL_TITLE: &str = "Show Vendors on Radar:";
pub const NO_VENDORS_PLACEHOLDER: &str = "No vendor data for radar.";

/// One checkbox row as drawn: checked means visible.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRow<'a> {
    pub handle: SeriesHandle,
    pub label: &'a str,
    pub swatch: &'a ColorToken,
    pub checked: bool,
}

/// One toggle per loaded radar vendor.
///
/// The panel keeps only handles into the store; hidden flags live in the
/// store and are read back on every draw.
#[derive(Debug, Clone, Default)]
pub struct VendorVisibilityPanel {
    rows: Vec<SeriesHandle>,
    cursor: usize,
}

impl VendorVisibilityPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the rows from the store, dropping any previous ones.
    pub fn populate(&mut self, store: &RadarDataStore) {
        self.rows = store.handles();
        self.cursor = 0;
        debug!(rows = self.rows.len(), "vendor toggles populated");
    }

    pub fn rows<'a>(&self, store: &'a RadarDataStore) -> Vec<VendorRow<'a>> {
        self.rows
            .iter()
            .filter_map(|handle| {
                store.get(*handle).map(|series| VendorRow {
                    handle: *handle,
                    label: &series.label,
                    swatch: &series.color,
                    checked: !series.hidden,
                })
            })
            .collect()
    }

    /// Shown instead of rows when there is nothing to toggle.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(NO_VENDORS_PLACEHOLDER)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn select_next(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + 1) % self.rows.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + self.rows.len() - 1) % self.rows.len();
        }
    }

    /// Checkbox change handler.
    ///
    /// Writes the flag to the store, then mirrors it onto the live chart with
    /// a single quiet render. Returns false when the row or handle is gone.
    pub fn on_change(
        &self,
        row: usize,
        checked: bool,
        store: &mut RadarDataStore,
        chart: Option<&mut RadarChart>,
    ) -> bool {
        let Some(handle) = self.rows.get(row).copied() else {
            return false;
        };
        if !store.set_hidden(handle, !checked) {
            return false;
        }

        if let Some(chart) = chart {
            chart.set_dataset_visibility(handle.index(), checked);
            chart.update(UpdateMode::Quiet);
        }
        true
    }

    /// Flips the row under the cursor.
    pub fn toggle_selected(
        &self,
        store: &mut RadarDataStore,
        chart: Option<&mut RadarChart>,
    ) -> bool {
        let Some(hidden) = self
            .rows
            .get(self.cursor)
            .and_then(|handle| store.get(*handle))
            .map(|series| series.hidden)
        else {
            return false;
        };
        self.on_change(self.cursor, hidden, store, chart)
    }
}
