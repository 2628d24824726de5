//! # Theme Configuration
//!
//! Selects the default and fallback variants and whether auto-switching
//! starts enabled. Configuration can come from three places, later ones
//! overriding earlier ones:
//!
//! 1. Built-in defaults (night, night, off).
//! 2. A TOML file named by `NIGHTSHADE_THEME_CONFIG`.
//! 3. The `NIGHTSHADE_THEME` / `NIGHTSHADE_THEME_FALLBACK` environment
//!    variables.
//!
//! ```toml
//! [theme]
//! default = "storm"
//! fallback = "night"
//! auto_switch = true
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ThemeError, ThemeResult};
use crate::theme::{parse_variant, Variant};

/// Environment variable naming the default variant.
pub const ENV_THEME: &str = "NIGHTSHADE_THEME";
/// Environment variable naming the fallback variant.
pub const ENV_FALLBACK: &str = "NIGHTSHADE_THEME_FALLBACK";
/// Environment variable pointing at a TOML config file.
pub const ENV_CONFIG: &str = "NIGHTSHADE_THEME_CONFIG";

/// Engine configuration resolved before construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Variant applied at load when no stored settings say otherwise.
    pub default_variant: Variant,
    /// Variant the supervisor forces during fallback measures.
    pub fallback_variant: Variant,
    /// Whether auto-switching starts enabled.
    pub auto_switch: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_variant: Variant::Night,
            fallback_variant: Variant::Night,
            auto_switch: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    theme: ThemeTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeTable {
    default: Option<String>,
    fallback: Option<String>,
    auto_switch: Option<bool>,
}

impl ThemeConfig {
    /// Create a configuration with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default variant.
    pub fn with_default_variant(mut self, variant: Variant) -> Self {
        self.default_variant = variant;
        self
    }

    /// Set the fallback variant.
    pub fn with_fallback_variant(mut self, variant: Variant) -> Self {
        self.fallback_variant = variant;
        self
    }

    /// Set whether auto-switching starts enabled.
    pub fn with_auto_switch(mut self, enabled: bool) -> Self {
        self.auto_switch = enabled;
        self
    }

    /// Resolve configuration from the environment, or fall back to the
    /// defaults. A config file named by `NIGHTSHADE_THEME_CONFIG` is read
    /// first; the plain variables override it. Unreadable values are
    /// logged and skipped rather than failing startup.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var(ENV_CONFIG) {
            match Self::from_file(&path) {
                Ok(file_config) => config = file_config,
                Err(err) => log::warn!("ignoring config file {path}: {err}"),
            }
        }

        if let Ok(value) = env::var(ENV_THEME) {
            match parse_variant(value.trim()) {
                Ok(variant) => config.default_variant = variant,
                Err(err) => log::warn!("ignoring {ENV_THEME}: {err}"),
            }
        }
        if let Ok(value) = env::var(ENV_FALLBACK) {
            match parse_variant(value.trim()) {
                Ok(variant) => config.fallback_variant = variant,
                Err(err) => log::warn!("ignoring {ENV_FALLBACK}: {err}"),
            }
        }

        config
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| ThemeError::ThemeLoading {
            details: format!("reading {}: {err}", path.display()),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML content.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|err| ThemeError::ThemeLoading {
            details: format!("parsing config: {err}"),
        })?;

        let mut config = Self::default();
        if let Some(default) = file.theme.default {
            config.default_variant = parse_variant(&default)?;
        }
        if let Some(fallback) = file.theme.fallback {
            config.fallback_variant = parse_variant(&fallback)?;
        }
        if let Some(auto_switch) = file.theme.auto_switch {
            config.auto_switch = auto_switch;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_night_without_auto_switch() {
        let config = ThemeConfig::default();
        assert_eq!(config.default_variant, Variant::Night);
        assert_eq!(config.fallback_variant, Variant::Night);
        assert!(!config.auto_switch);
    }

    #[test]
    fn builder_overrides_each_field() {
        let config = ThemeConfig::new()
            .with_default_variant(Variant::Storm)
            .with_fallback_variant(Variant::Light)
            .with_auto_switch(true);
        assert_eq!(config.default_variant, Variant::Storm);
        assert_eq!(config.fallback_variant, Variant::Light);
        assert!(config.auto_switch);
    }

    #[test]
    fn toml_round_trip() {
        let config = ThemeConfig::from_toml(
            r#"
            [theme]
            default = "storm"
            fallback = "light"
            auto_switch = true
            "#,
        )
        .unwrap();
        assert_eq!(config.default_variant, Variant::Storm);
        assert_eq!(config.fallback_variant, Variant::Light);
        assert!(config.auto_switch);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ThemeConfig::from_toml("[theme]\ndefault = \"light\"\n").unwrap();
        assert_eq!(config.default_variant, Variant::Light);
        assert_eq!(config.fallback_variant, Variant::Night);
    }

    #[test]
    fn unknown_variant_in_toml_is_an_error() {
        let err = ThemeConfig::from_toml("[theme]\ndefault = \"midnight\"\n").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidVariant { .. }));
    }
}
