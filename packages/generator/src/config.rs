use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "stylesmith.config.json";

/// How unknown CSS properties in literal classes are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnknownPropertyPolicy {
    /// Error for explicit classes, warning for everything else
    #[default]
    WarnUnlessExplicit,
    AlwaysError,
}

/// Generator configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default)]
    pub unknown_property_policy: UnknownPropertyPolicy,

    /// Render definition comments above their rules
    #[serde(default = "default_emit_comments")]
    pub emit_comments: bool,

    /// How many times `:root` is repeated in theme blocks
    #[serde(default = "default_theme_specificity")]
    pub theme_specificity: usize,
}

fn default_emit_comments() -> bool {
    true
}

fn default_theme_specificity() -> usize {
    1
}

impl GeneratorConfig {
    /// Load `stylesmith.config.json` from `dir`, or defaults if there is none
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_json(&content)
                .with_context(|| format!("Invalid config in {}", config_path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            unknown_property_policy: UnknownPropertyPolicy::default(),
            emit_comments: default_emit_comments(),
            theme_specificity: default_theme_specificity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "unknownPropertyPolicy": "alwaysError",
            "emitComments": false,
            "themeSpecificity": 2
        }"#;

        let config = GeneratorConfig::from_json(json).unwrap();
        assert_eq!(config.unknown_property_policy, UnknownPropertyPolicy::AlwaysError);
        assert!(!config.emit_comments);
        assert_eq!(config.theme_specificity, 2);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.unknown_property_policy, UnknownPropertyPolicy::WarnUnlessExplicit);
        assert!(config.emit_comments);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = std::env::temp_dir().join("stylesmith-config-missing");
        let config = GeneratorConfig::load(&dir).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = std::env::temp_dir().join(format!("stylesmith-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(DEFAULT_CONFIG_NAME), r#"{ "themeSpecificity": 3 }"#).unwrap();

        let config = GeneratorConfig::load(&dir).unwrap();
        assert_eq!(config.theme_specificity, 3);

        std::fs::write(dir.join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();
        assert!(GeneratorConfig::load(&dir).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
