use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const MAX_WEIGHT: u8 = 10;
pub const DEFAULT_WEIGHT: u8 = 5;

/// Reserved selection name for a hand-edited weight vector.
pub const CUSTOM_PRESET: &str = "Custom";

/// Sentinel shown for optional point metrics the scoring endpoint left out.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiKey(String);

impl KpiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KpiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KpiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

const fn default_readout() -> bool {
    true
}

/// One configured metric dimension with an adjustable weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDefinition {
    pub key: KpiKey,
    pub label: String,
    /// Whether the slider row carries a numeric readout.
    #[serde(default = "default_readout")]
    pub readout: bool,
}

impl KpiDefinition {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: KpiKey::new(key),
            label: label.to_string(),
            readout: true,
        }
    }
}

/// The live weight per configured KPI key.
///
/// The key set is fixed at construction; `set` never inserts a new key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightVector {
    entries: Vec<(KpiKey, u8)>,
}

impl WeightVector {
    pub fn uniform<I>(keys: I, weight: u8) -> Self
    where
        I: IntoIterator<Item = KpiKey>,
    {
        let weight = weight.min(MAX_WEIGHT);
        Self {
            entries: keys.into_iter().map(|key| (key, weight)).collect(),
        }
    }

    pub fn get(&self, key: &KpiKey) -> Option<u8> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, weight)| *weight)
    }

    /// Sets a weight, clamped to 0..=10. Returns `false` for unknown keys.
    pub fn set(&mut self, key: &KpiKey, weight: u8) -> bool {
        match self.entries.iter_mut().find(|(candidate, _)| candidate == key) {
            Some(entry) => {
                entry.1 = weight.min(MAX_WEIGHT);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KpiKey, u8)> {
        self.entries.iter().map(|(key, weight)| (key, *weight))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Request parameters carrying every weight, in configured order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(key, weight)| (key.to_string(), weight.to_string()))
            .collect()
    }
}

/// A named, pre-defined weight vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub weights: BTreeMap<KpiKey, u8>,
}

impl Preset {
    pub fn new(name: &str, weights: &[(&str, u8)]) -> Self {
        Self {
            name: name.to_string(),
            weights: weights
                .iter()
                .map(|(key, weight)| (KpiKey::from(*key), *weight))
                .collect(),
        }
    }

    /// Weight for `key`, falling back to the default when the preset omits it.
    pub fn weight_for(&self, key: &KpiKey) -> u8 {
        self.weights.get(key).copied().unwrap_or(DEFAULT_WEIGHT)
    }
}

/// Which preset the weight panel currently reflects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetSelection {
    Custom,
    Named(String),
}

impl PresetSelection {
    pub fn name(&self) -> &str {
        match self {
            Self::Custom => CUSTOM_PRESET,
            Self::Named(name) => name,
        }
    }

    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for PresetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Colour token as sent by the endpoints, e.g. `rgb(54, 162, 235)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ColorToken {
    fn default() -> Self {
        Self::new("#808080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> Vec<KpiKey> {
        vec![KpiKey::from("speed"), KpiKey::from("analysis")]
    }

    #[test]
    fn set_clamps_and_rejects_unknown_keys() {
        let mut weights = WeightVector::uniform(keys(), DEFAULT_WEIGHT);

        assert!(weights.set(&KpiKey::from("speed"), 42));
        assert_eq!(weights.get(&KpiKey::from("speed")), Some(MAX_WEIGHT));

        assert!(!weights.set(&KpiKey::from("price"), 3));
        assert_eq!(weights.len(), 2);
        assert_eq!(weights.get(&KpiKey::from("price")), None);
    }

    #[test]
    fn query_keeps_configured_order() {
        let mut weights = WeightVector::uniform(keys(), 5);
        weights.set(&KpiKey::from("analysis"), 9);

        assert_eq!(
            weights.to_query(),
            vec![
                ("speed".to_string(), "5".to_string()),
                ("analysis".to_string(), "9".to_string()),
            ]
        );
    }

    #[test]
    fn preset_falls_back_to_default_weight() {
        let preset = Preset::new("Speed First", &[("speed", 9)]);
        assert_eq!(preset.weight_for(&KpiKey::from("speed")), 9);
        assert_eq!(preset.weight_for(&KpiKey::from("analysis")), DEFAULT_WEIGHT);
    }

    #[test]
    fn custom_selection_uses_reserved_name() {
        assert_eq!(PresetSelection::Custom.name(), CUSTOM_PRESET);
        assert_eq!(
            PresetSelection::Named("Balanced".to_string()).to_string(),
            "Balanced"
        );
    }
}
