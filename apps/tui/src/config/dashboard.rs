use crate::domain::{KpiDefinition, KpiKey, Preset, CUSTOM_PRESET, MAX_WEIGHT};
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

/// Fixed external configuration: KPI keys, axis labels and the preset catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub kpis: Vec<KpiDefinition>,
    pub axis_labels: AxisLabels,
    /// KPIs feeding the horizontal quadrant axis (local scoring only).
    pub x_axis_kpis: Vec<KpiKey>,
    /// KPIs feeding the vertical quadrant axis (local scoring only).
    pub y_axis_kpis: Vec<KpiKey>,
    pub presets: Vec<Preset>,
    pub default_preset: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let kpis = vec![
            KpiDefinition::new("analysisCapability", "Analysis"),
            KpiDefinition::new("antiEvasionTechnology", "Anti-Evasion"),
            KpiDefinition::new("speedThroughputScale", "Speed/Scale"),
            KpiDefinition::new("reportingThreatIntelligence", "Reporting/TI"),
            KpiDefinition::new("integrationsAutomation", "Integration"),
            KpiDefinition::new("securityDeploymentMaintenance", "Security/Deploy"),
        ];

        let presets = vec![
            preset("Large-Scale Processing", [8, 6, 9, 3, 3, 6]),
            preset("Zero-Day Detection", [9, 9, 4, 8, 6, 6]),
            preset("Air-Gapped / Critical Infra", [6, 6, 7, 5, 2, 9]),
            preset("Malware/Phishing Triage", [6, 8, 5, 9, 9, 5]),
            preset("Threat Intel Generation", [9, 9, 3, 9, 7, 5]),
            preset("Balanced (Equal Weight)", [5, 5, 5, 5, 5, 5]),
        ];

        Self {
            kpis,
            axis_labels: AxisLabels {
                x: "Detection & Evasion Capability (%)".to_string(),
                y: "Speed & Operational Efficiency (%)".to_string(),
            },
            x_axis_kpis: vec![
                KpiKey::from("analysisCapability"),
                KpiKey::from("antiEvasionTechnology"),
            ],
            y_axis_kpis: vec![
                KpiKey::from("speedThroughputScale"),
                KpiKey::from("securityDeploymentMaintenance"),
            ],
            presets,
            default_preset: "Balanced (Equal Weight)".to_string(),
        }
    }
}

fn preset(name: &str, weights: [u8; 6]) -> Preset {
    const KEYS: [&str; 6] = [
        "analysisCapability",
        "antiEvasionTechnology",
        "speedThroughputScale",
        "reportingThreatIntelligence",
        "integrationsAutomation",
        "securityDeploymentMaintenance",
    ];
    let pairs: Vec<(&str, u8)> = KEYS.into_iter().zip(weights).collect();
    Preset::new(name, &pairs)
}

impl DashboardConfig {
    /// Loads a JSON configuration file and validates it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            DashboardError::Config(format!("{}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.kpis.is_empty() {
            return Err(DashboardError::ElementsMissing(
                "no KPI sliders configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for kpi in &self.kpis {
            if !seen.insert(&kpi.key) {
                return Err(DashboardError::Config(format!(
                    "duplicate KPI key '{}'",
                    kpi.key
                )));
            }
        }

        for key in self.x_axis_kpis.iter().chain(&self.y_axis_kpis) {
            if !seen.contains(key) {
                return Err(DashboardError::Config(format!(
                    "axis KPI '{key}' is not a configured KPI"
                )));
            }
        }

        for preset in &self.presets {
            if preset.name == CUSTOM_PRESET {
                return Err(DashboardError::Config(format!(
                    "preset name '{CUSTOM_PRESET}' is reserved"
                )));
            }
            if let Some((key, weight)) = preset.weights.iter().find(|(_, w)| **w > MAX_WEIGHT) {
                return Err(DashboardError::Config(format!(
                    "preset '{}' weight {weight} for '{key}' is outside 0..={MAX_WEIGHT}",
                    preset.name
                )));
            }
        }

        Ok(())
    }

    pub fn kpi_keys(&self) -> impl Iterator<Item = &KpiKey> {
        self.kpis.iter().map(|kpi| &kpi.key)
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.kpis.len(), 6);
        assert!(config.preset(&config.default_preset).is_some());
    }

    #[test]
    fn custom_is_not_a_storable_preset() {
        let mut config = DashboardConfig::default();
        config.presets.push(Preset::new(CUSTOM_PRESET, &[]));

        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));
    }

    #[test]
    fn empty_kpi_list_means_missing_sliders() {
        let mut config = DashboardConfig::default();
        config.kpis.clear();
        config.x_axis_kpis.clear();
        config.y_axis_kpis.clear();

        assert!(matches!(
            config.validate(),
            Err(DashboardError::ElementsMissing(_))
        ));
    }

    #[test]
    fn loads_from_json_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        let json = serde_json::json!({
            "kpis": [
                { "key": "kpiA", "label": "A" },
                { "key": "kpiB", "label": "B", "readout": false }
            ],
            "axis_labels": { "x": "X", "y": "Y" },
            "x_axis_kpis": ["kpiA"],
            "y_axis_kpis": ["kpiB"],
            "presets": [{ "name": "Balanced", "weights": { "kpiA": 5, "kpiB": 5 } }],
            "default_preset": "Balanced"
        });
        write!(file, "{json}")?;

        let config = DashboardConfig::from_file(file.path())?;
        assert_eq!(config.kpis.len(), 2);
        assert!(config.kpis[0].readout);
        assert!(!config.kpis[1].readout);
        Ok(())
    }
}
