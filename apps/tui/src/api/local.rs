//! In-process scoring over a vendor results file.
//!
//! Produces the same payloads as the remote scoring service so the dashboard
//! can run without one.

use super::types::{MetricValue, RadarScores, RadarSeriesPayload, ScatterDataset, ScatterPoint};
use super::DashboardApi;
use crate::config::DashboardConfig;
use crate::domain::{ColorToken, KpiKey, WeightVector, MAX_WEIGHT};
use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const RESULTS_SOURCE: &str = "results file";

/// Keeps points away from the chart edges so their labels stay readable.
const EDGE_NUDGE: f64 = 3.5;
const POINT_RADIUS: f64 = 7.0;
const MAX_SCORE: f64 = 10.0;

const VENDOR_BACKGROUNDS: [&str; 10] = [
    "rgba(255, 99, 132, 0.6)",
    "rgba(54, 162, 235, 0.6)",
    "rgba(255, 206, 86, 0.6)",
    "rgba(75, 192, 192, 0.6)",
    "rgba(153, 102, 255, 0.6)",
    "rgba(255, 159, 64, 0.6)",
    "rgba(46, 204, 113, 0.6)",
    "rgba(231, 76, 60, 0.6)",
    "rgba(41, 128, 185, 0.6)",
    "rgba(241, 196, 15, 0.6)",
];

const VENDOR_BORDERS: [&str; 10] = [
    "rgb(255, 99, 132)",
    "rgb(54, 162, 235)",
    "rgb(255, 206, 86)",
    "rgb(75, 192, 192)",
    "rgb(153, 102, 255)",
    "rgb(255, 159, 64)",
    "rgb(46, 204, 113)",
    "rgb(231, 76, 60)",
    "rgb(41, 128, 185)",
    "rgb(241, 196, 15)",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VendorRecord {
    test_metadata: TestMetadata,
    kpi_scores: HashMap<String, f64>,
    #[serde(default)]
    key_performance_metrics: PerformanceMetrics,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestMetadata {
    vendor_name: String,
    #[serde(default)]
    test_date: MetricValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PerformanceMetrics {
    #[serde(default)]
    false_positive_rate_percent: MetricValue,
    #[serde(default)]
    false_negative_rate_percent: MetricValue,
    #[serde(default)]
    average_processing_time_seconds: MetricValue,
}

#[derive(Debug, Clone)]
struct VendorColors {
    background: ColorToken,
    border: ColorToken,
}

#[derive(Debug, Clone)]
pub struct LocalApi {
    path: PathBuf,
    records: Vec<VendorRecord>,
    colors: BTreeMap<String, VendorColors>,
    radar_keys: Vec<KpiKey>,
    radar_labels: Vec<String>,
    x_axis: Vec<KpiKey>,
    y_axis: Vec<KpiKey>,
}

impl LocalApi {
    pub fn open(path: impl AsRef<Path>, config: &DashboardConfig) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read(path)?;
        let document: serde_json::Value = serde_json::from_slice(&contents)
            .map_err(|e| DashboardError::malformed(RESULTS_SOURCE, e.to_string()))?;
        let serde_json::Value::Array(items) = document else {
            return Err(DashboardError::malformed(
                RESULTS_SOURCE,
                "expected a JSON list of vendor records",
            ));
        };

        let total = items.len();
        let records: Vec<VendorRecord> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed vendor record");
                    None
                }
            })
            .collect();
        info!(
            path = %path.display(),
            loaded = records.len(),
            total,
            "loaded vendor records"
        );

        let colors = assign_colors(&records);

        Ok(Self {
            path: path.to_path_buf(),
            records,
            colors,
            radar_keys: config.kpi_keys().cloned().collect(),
            radar_labels: config.kpis.iter().map(|kpi| kpi.label.clone()).collect(),
            x_axis: config.x_axis_kpis.clone(),
            y_axis: config.y_axis_kpis.clone(),
        })
    }

    fn colors_for(&self, vendor: &str) -> VendorColors {
        self.colors.get(vendor).cloned().unwrap_or_else(|| VendorColors {
            background: ColorToken::new("#808080"),
            border: ColorToken::new("#606060"),
        })
    }

    fn scatter_datasets(&self, weights: &WeightVector) -> Vec<ScatterDataset> {
        let mut datasets: Vec<ScatterDataset> = Vec::new();
        let mut by_vendor: HashMap<&str, usize> = HashMap::new();

        for record in &self.records {
            let vendor = record.test_metadata.vendor_name.as_str();
            let (sum_x, max_x) = axis_score(&record.kpi_scores, weights, &self.x_axis);
            let (sum_y, max_y) = axis_score(&record.kpi_scores, weights, &self.y_axis);
            let x = round2(nudge(normalize_score(sum_x, max_x)));
            let y = round2(nudge(normalize_score(sum_y, max_y)));

            let index = *by_vendor.entry(vendor).or_insert_with(|| {
                let colors = self.colors_for(vendor);
                datasets.push(ScatterDataset {
                    label: vendor.to_string(),
                    data: Vec::new(),
                    background_color: colors.background,
                    border_color: colors.border,
                    point_radius: POINT_RADIUS,
                });
                datasets.len() - 1
            });

            let metrics = &record.key_performance_metrics;
            datasets[index].data.push(ScatterPoint {
                x,
                y,
                vendor: Some(vendor.to_string()),
                fp_rate: metrics.false_positive_rate_percent.clone(),
                fn_rate: metrics.false_negative_rate_percent.clone(),
                avg_speed: metrics.average_processing_time_seconds.clone(),
                test_date: record.test_metadata.test_date.clone(),
            });
        }

        datasets
    }

    fn radar_scores(&self) -> RadarScores {
        let mut datasets: Vec<RadarSeriesPayload> = Vec::new();

        for record in &self.records {
            let vendor = &record.test_metadata.vendor_name;
            // Series labels must be unique; the first record per vendor wins.
            if datasets.iter().any(|series| &series.label == vendor) {
                debug!(vendor = %vendor, "duplicate vendor record left out of radar scores");
                continue;
            }

            let colors = self.colors_for(vendor);
            datasets.push(RadarSeriesPayload {
                label: vendor.clone(),
                data: self
                    .radar_keys
                    .iter()
                    .map(|key| clamp_score(record.kpi_scores.get(key.as_str()).copied()))
                    .collect(),
                border_color: colors.border,
                background_color: colors.background,
            });
        }

        RadarScores {
            labels: self.radar_labels.clone(),
            datasets,
        }
    }
}

#[async_trait]
impl DashboardApi for LocalApi {
    async fn scatter(&self, weights: &WeightVector) -> Result<Vec<ScatterDataset>> {
        Ok(self.scatter_datasets(weights))
    }

    async fn raw_scores(&self) -> Result<RadarScores> {
        let scores = self.radar_scores();
        scores.validate()?;
        Ok(scores)
    }

    async fn raw_data(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

fn assign_colors(records: &[VendorRecord]) -> BTreeMap<String, VendorColors> {
    let mut names: Vec<&str> = records
        .iter()
        .map(|record| record.test_metadata.vendor_name.as_str())
        .collect();
    names.sort_unstable();

    // Every record takes a palette slot; a repeated vendor keeps its last one.
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let slot = index % VENDOR_BORDERS.len();
            (
                name.to_string(),
                VendorColors {
                    background: ColorToken::new(VENDOR_BACKGROUNDS[slot]),
                    border: ColorToken::new(VENDOR_BORDERS[slot]),
                },
            )
        })
        .collect()
}

fn clamp_score(score: Option<f64>) -> f64 {
    score.unwrap_or(0.0).clamp(0.0, MAX_SCORE)
}

/// Weighted sum over the axis KPIs and the best sum those weights allow.
fn axis_score(
    scores: &HashMap<String, f64>,
    weights: &WeightVector,
    axis: &[KpiKey],
) -> (f64, f64) {
    axis.iter().fold((0.0, 0.0), |(sum, max), key| {
        let score = clamp_score(scores.get(key.as_str()).copied());
        let weight = f64::from(weights.get(key).unwrap_or(0).min(MAX_WEIGHT));
        (
            score.mul_add(weight, sum),
            MAX_SCORE.mul_add(weight, max),
        )
    })
}

fn normalize_score(weighted_sum: f64, max_possible: f64) -> f64 {
    if max_possible <= 0.0 {
        return 0.0;
    }
    round2((weighted_sum / max_possible * 100.0).clamp(0.0, 100.0))
}

fn nudge(value: f64) -> f64 {
    if value >= 100.0 - EDGE_NUDGE / 2.0 {
        100.0 - EDGE_NUDGE
    } else if value <= EDGE_NUDGE / 2.0 {
        EDGE_NUDGE
    } else {
        value
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
