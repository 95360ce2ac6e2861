//! Typed request/response contracts for the scoring endpoints.
//!
//! Responses are validated here, before any controller sees them.

use crate::domain::{ColorToken, NOT_AVAILABLE};
use crate::error::{DashboardError, Result, RADAR_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Optional per-point metric: a number, free text, or the `"N/A"` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Text(text) if text == NOT_AVAILABLE)
    }
}

impl Default for MetricValue {
    fn default() -> Self {
        Self::Text(NOT_AVAILABLE.to_string())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub fp_rate: MetricValue,
    #[serde(default)]
    pub fn_rate: MetricValue,
    #[serde(default)]
    pub avg_speed: MetricValue,
    #[serde(default)]
    pub test_date: MetricValue,
}

const fn default_point_radius() -> f64 {
    7.0
}

/// One chart-ready scatter series, usually one vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterDataset {
    pub label: String,
    pub data: Vec<ScatterPoint>,
    #[serde(default)]
    pub background_color: ColorToken,
    #[serde(default)]
    pub border_color: ColorToken,
    #[serde(default = "default_point_radius")]
    pub point_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarSeriesPayload {
    pub label: String,
    #[serde(alias = "scores")]
    pub data: Vec<f64>,
    #[serde(default)]
    pub border_color: ColorToken,
    #[serde(default)]
    pub background_color: ColorToken,
}

/// Raw per-vendor scores aligned to a shared label sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarScores {
    pub labels: Vec<String>,
    pub datasets: Vec<RadarSeriesPayload>,
}

impl RadarScores {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for series in &self.datasets {
            if series.data.len() != self.labels.len() {
                return Err(DashboardError::malformed(
                    RADAR_ENDPOINT,
                    format!(
                        "series '{}' has {} scores for {} labels",
                        series.label,
                        series.data.len(),
                        self.labels.len()
                    ),
                ));
            }
            if !seen.insert(series.label.as_str()) {
                return Err(DashboardError::malformed(
                    RADAR_ENDPOINT,
                    format!("duplicate series label '{}'", series.label),
                ));
            }
        }
        Ok(())
    }
}
