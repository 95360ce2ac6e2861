use crate::api::RadarScores;
use crate::domain::ColorToken;
use crate::error::Result;
use tracing::{debug, info};

/// Stable reference to one loaded radar series.
///
/// A handle is only valid for the load that issued it; after a reload the
/// store rejects handles from earlier generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesHandle {
    generation: u64,
    index: usize,
}

impl SeriesHandle {
    pub const fn index(self) -> usize {
        self.index
    }

    pub const fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarSeries {
    pub label: String,
    /// Border, point and swatch colour.
    pub color: ColorToken,
    pub scores: Vec<f64>,
    pub hidden: bool,
}

/// Owns the fetched radar series and their visibility flags.
#[derive(Debug, Clone, Default)]
pub struct RadarDataStore {
    labels: Vec<String>,
    series: Vec<RadarSeries>,
    generation: u64,
}

impl RadarDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection. Every flag starts visible.
    ///
    /// Malformed scores leave the store untouched.
    pub fn load(&mut self, scores: RadarScores) -> Result<Vec<SeriesHandle>> {
        scores.validate()?;

        self.generation += 1;
        self.labels = scores.labels;
        self.series = scores
            .datasets
            .into_iter()
            .map(|payload| RadarSeries {
                label: payload.label,
                color: payload.border_color,
                scores: payload.data,
                hidden: false,
            })
            .collect();

        info!(
            series = self.series.len(),
            labels = self.labels.len(),
            generation = self.generation,
            "radar scores loaded"
        );
        Ok(self.handles())
    }

    pub fn set_hidden(&mut self, handle: SeriesHandle, hidden: bool) -> bool {
        if handle.generation != self.generation {
            debug!(?handle, current = self.generation, "ignoring handle from earlier load");
            return false;
        }
        match self.series.get_mut(handle.index) {
            Some(series) => {
                series.hidden = hidden;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, handle: SeriesHandle) -> Option<&RadarSeries> {
        if handle.generation != self.generation {
            return None;
        }
        self.series.get(handle.index)
    }

    pub fn handle(&self, index: usize) -> Option<SeriesHandle> {
        (index < self.series.len()).then_some(SeriesHandle {
            generation: self.generation,
            index,
        })
    }

    pub fn handles(&self) -> Vec<SeriesHandle> {
        (0..self.series.len())
            .map(|index| SeriesHandle {
                generation: self.generation,
                index,
            })
            .collect()
    }

    /// Loaded series in fetch order.
    pub fn all(&self) -> &[RadarSeries] {
        &self.series
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Zero until the first successful load.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RadarSeriesPayload;

    fn payload(label: &str, data: Vec<f64>) -> RadarSeriesPayload {
        RadarSeriesPayload {
            label: label.to_string(),
            data,
            border_color: ColorToken::new("rgb(54, 162, 235)"),
            background_color: ColorToken::new("rgba(54, 162, 235, 0.2)"),
        }
    }

    fn scores(vendors: &[&str]) -> RadarScores {
        RadarScores {
            labels: vec!["A".to_string(), "B".to_string()],
            datasets: vendors
                .iter()
                .map(|vendor| payload(vendor, vec![4.0, 8.0]))
                .collect(),
        }
    }

    #[test]
    fn load_then_hide_sets_only_that_flag() -> crate::error::Result<()> {
        let mut store = RadarDataStore::new();
        let first = store.load(scores(&["Acme", "Globex", "Initech", "Umbrella"]))?;
        store.set_hidden(first[0], true);
        store.set_hidden(first[3], true);

        let handles = store.load(scores(&["Acme", "Globex", "Initech", "Umbrella"]))?;
        assert!(store.set_hidden(handles[2], true));

        let hidden: Vec<bool> = store.all().iter().map(|series| series.hidden).collect();
        assert_eq!(hidden, vec![false, false, true, false]);
        Ok(())
    }

    #[test]
    fn keeps_fetch_order() -> crate::error::Result<()> {
        let mut store = RadarDataStore::new();
        store.load(scores(&["Zeta", "Alpha", "Mid"]))?;

        let labels: Vec<&str> = store.all().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(store.all()[0].color.as_str(), "rgb(54, 162, 235)");
        Ok(())
    }

    #[test]
    fn out_of_range_and_stale_handles_are_no_ops() -> crate::error::Result<()> {
        let mut store = RadarDataStore::new();
        let old = store.load(scores(&["Acme", "Globex"]))?;
        store.load(scores(&["Acme"]))?;

        assert!(!store.set_hidden(old[0], true));
        assert!(store.handle(1).is_none());
        assert!(store.get(old[0]).is_none());
        assert!(store.all().iter().all(|series| !series.hidden));
        Ok(())
    }

    #[test]
    fn malformed_load_keeps_previous_contents() -> crate::error::Result<()> {
        let mut store = RadarDataStore::new();
        store.load(scores(&["Acme"]))?;

        let mut bad = scores(&["Globex"]);
        bad.datasets[0].data.pop();

        assert!(store.load(bad).is_err());
        assert_eq!(store.all()[0].label, "Acme");
        assert_eq!(store.generation(), 1);
        Ok(())
    }
}
