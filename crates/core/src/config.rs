use std::path::Path;

use dynlights_common::ItemId;
use serde::{Deserialize, Serialize};

/// Errors from loading a dynamic lights configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Global dynamic lighting quality. Lower qualities refresh less often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicLightsMode {
    Off,
    Fastest,
    Fast,
    #[default]
    Fancy,
}

impl DynamicLightsMode {
    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }

    /// Minimum number of ticks between two updates of the same source.
    ///
    /// At 20 ticks per second: fastest = 500 ms, fast = 250 ms, fancy = every tick.
    pub fn update_interval_ticks(self) -> u64 {
        match self {
            Self::Off | Self::Fancy => 1,
            Self::Fast => 5,
            Self::Fastest => 10,
        }
    }
}

/// How igniting explosives (creepers) light up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplosiveLightingMode {
    Off,
    #[default]
    Simple,
    Fancy,
}

/// Luminance of one item type, used to seed an item lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLightEntry {
    pub item: ItemId,
    pub luminance: u8,
    #[serde(default)]
    pub water_sensitive: bool,
}

/// Read-only options consulted during luminance resolution and updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicLightsConfig {
    pub mode: DynamicLightsMode,
    pub creeper_lighting: ExplosiveLightingMode,
    /// Whether entities other than the local player may emit light.
    pub entities_light_source: bool,
    /// Whether the local player may emit light.
    pub self_light_source: bool,
    /// Suppress water-sensitive sources whose eye is submerged.
    pub water_sensitive_check: bool,
    pub items: Vec<ItemLightEntry>,
}

impl Default for DynamicLightsConfig {
    fn default() -> Self {
        Self {
            mode: DynamicLightsMode::default(),
            creeper_lighting: ExplosiveLightingMode::default(),
            entities_light_source: true,
            self_light_source: true,
            water_sensitive_check: true,
            items: Vec::new(),
        }
    }
}

impl DynamicLightsConfig {
    /// Load a config file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&data),
            Some("json") => Ok(serde_json::from_str(&data)?),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    pub fn from_yaml_str(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = DynamicLightsConfig::default();
        assert_eq!(config.mode, DynamicLightsMode::Fancy);
        assert_eq!(config.creeper_lighting, ExplosiveLightingMode::Simple);
        assert!(config.entities_light_source);
        assert!(config.self_light_source);
        assert!(config.water_sensitive_check);
        assert!(config.items.is_empty());
    }

    #[test]
    fn mode_intervals() {
        assert!(!DynamicLightsMode::Off.is_enabled());
        assert!(DynamicLightsMode::Fastest.is_enabled());
        assert_eq!(DynamicLightsMode::Fancy.update_interval_ticks(), 1);
        assert_eq!(DynamicLightsMode::Fast.update_interval_ticks(), 5);
        assert_eq!(DynamicLightsMode::Fastest.update_interval_ticks(), 10);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = DynamicLightsConfig::from_yaml_str(
            "mode: fast\ncreeper_lighting: fancy\nitems:\n  - item: torch\n    luminance: 14\n    water_sensitive: true\n",
        )
        .unwrap();
        assert_eq!(config.mode, DynamicLightsMode::Fast);
        assert_eq!(config.creeper_lighting, ExplosiveLightingMode::Fancy);
        assert!(config.entities_light_source);
        assert_eq!(config.items.len(), 1);
        assert_eq!(config.items[0].item, ItemId::new("torch"));
        assert!(config.items[0].water_sensitive);
    }

    #[test]
    fn load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"mode": "off", "self_light_source": false}}"#).unwrap();
        let config = DynamicLightsConfig::load(file.path()).unwrap();
        assert_eq!(config.mode, DynamicLightsMode::Off);
        assert!(!config.self_light_source);
        assert_eq!(config.creeper_lighting, ExplosiveLightingMode::Simple);
    }

    #[test]
    fn load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "water_sensitive_check: false").unwrap();
        let config = DynamicLightsConfig::load(file.path()).unwrap();
        assert!(!config.water_sensitive_check);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = DynamicLightsConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "toml"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DynamicLightsConfig::load("/nonexistent/dynlights.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
