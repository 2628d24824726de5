//! # Host Integration Surface
//!
//! Everything the host application provides is modeled here as a trait or
//! a plain data type: the theme registry, the settings-schema API, the
//! active-theme broadcast payload, and the capability probe that replaces
//! scattered feature detection with one typed snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ThemeResult;
use crate::theme::Variant;

/// The host's theme registry.
pub trait ThemeRegistry: Send {
    /// Register a theme under its display name with a CSS resource path.
    fn register(&mut self, id: &str, display_name: &str, css_resource_path: &str)
        -> ThemeResult<()>;

    /// Remove a previously registered theme.
    fn unregister(&mut self, display_name: &str) -> ThemeResult<()>;
}

/// The host's settings-schema API plus current settings state.
pub trait SettingsHost: Send {
    /// Register the plugin's settings schema.
    fn register_settings_schema(&mut self, plugin_id: &str, schema: &SettingsSchema)
        -> ThemeResult<()>;

    /// Current settings values for the plugin, if any were stored.
    fn settings_state(&self, plugin_id: &str) -> Option<Value>;
}

/// Type of one settings option.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum OptionKind {
    /// On/off switch.
    Toggle,
    /// Single choice among fixed values.
    Choice {
        /// The accepted values.
        choices: Vec<String>,
    },
}

/// One recognized settings option.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsOption {
    /// Settings key as stored by the host.
    pub key: String,
    /// Short label shown in the settings dialog.
    pub label: String,
    /// Longer description shown under the label.
    pub description: String,
    /// Option type.
    pub kind: OptionKind,
    /// Default value.
    pub default: Value,
}

/// The plugin's full settings schema.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsSchema {
    /// All recognized options, in display order.
    pub options: Vec<SettingsOption>,
}

/// Current values of the plugin's settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeSettings {
    /// Whether the base background generator is enabled.
    pub enable_base_background: bool,
    /// Whether the sidebar gets its tinted background.
    pub enable_sidebar_color: bool,
    /// The selected variant.
    pub theme_variant: Variant,
    /// Whether to follow the platform light/dark preference.
    pub auto_switch_system: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            enable_base_background: true,
            enable_sidebar_color: true,
            theme_variant: Variant::Night,
            auto_switch_system: false,
        }
    }
}

impl ThemeSettings {
    /// Decode settings from host-provided state, falling back to defaults
    /// for anything missing or malformed.
    pub fn from_state(state: &Value) -> Self {
        match serde_json::from_value(state.clone()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("malformed settings state ({err}); using defaults");
                Self::default()
            }
        }
    }

    /// The schema describing these settings to the host.
    pub fn schema() -> SettingsSchema {
        SettingsSchema {
            options: vec![
                SettingsOption {
                    key: "enableBaseBackground".to_string(),
                    label: "Base background".to_string(),
                    description: "Color the main canvas with the theme background.".to_string(),
                    kind: OptionKind::Toggle,
                    default: Value::Bool(true),
                },
                SettingsOption {
                    key: "enableSidebarColor".to_string(),
                    label: "Sidebar color".to_string(),
                    description: "Tint the sidebar with the theme surface color.".to_string(),
                    kind: OptionKind::Toggle,
                    default: Value::Bool(true),
                },
                SettingsOption {
                    key: "themeVariant".to_string(),
                    label: "Variant".to_string(),
                    description: "Which Nightshade variant to use.".to_string(),
                    kind: OptionKind::Choice {
                        choices: crate::theme::list_variants()
                            .map(|v| v.as_str().to_string())
                            .collect(),
                    },
                    default: Value::String(Variant::Night.as_str().to_string()),
                },
                SettingsOption {
                    key: "autoSwitchSystem".to_string(),
                    label: "Follow system".to_string(),
                    description: "Switch variants with the system light/dark preference."
                        .to_string(),
                    kind: OptionKind::Toggle,
                    default: Value::Bool(false),
                },
            ],
        }
    }
}

/// Payload of the host's `themeChanged` broadcast: either the active
/// theme's name or an index into the host's theme list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeBroadcast {
    /// Active theme reported by display name.
    Name(String),
    /// Active theme reported as an index into the host theme list.
    Index(usize),
}

/// Typed snapshot of which host capabilities are present, probed once at
/// construction and consumed everywhere else.
#[derive(Debug, Clone, Default)]
pub struct HostCapabilities {
    /// Theme registry API present.
    pub theme_registry: bool,
    /// Settings-schema API present.
    pub settings: bool,
    /// Platform preference signal present.
    pub preference_source: bool,
    /// Theme names in host order, for resolving index broadcasts.
    pub theme_names: Vec<String>,
}

impl HostCapabilities {
    /// Resolve a broadcast payload to a theme name.
    pub fn resolve_broadcast(&self, payload: &ThemeBroadcast) -> Option<String> {
        match payload {
            ThemeBroadcast::Name(name) => Some(name.clone()),
            ThemeBroadcast::Index(index) => self.theme_names.get(*index).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn settings_decode_with_defaults_for_missing_fields() {
        let state = json!({ "themeVariant": "storm" });
        let settings = ThemeSettings::from_state(&state);
        assert_eq!(settings.theme_variant, Variant::Storm);
        assert!(settings.enable_base_background);
        assert!(!settings.auto_switch_system);
    }

    #[test]
    fn malformed_state_falls_back_to_defaults() {
        let state = json!({ "themeVariant": "midnight" });
        assert_eq!(ThemeSettings::from_state(&state), ThemeSettings::default());
        assert_eq!(ThemeSettings::from_state(&json!(42)), ThemeSettings::default());
    }

    #[test]
    fn schema_lists_all_four_options() {
        let schema = ThemeSettings::schema();
        let keys: Vec<&str> = schema.options.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "enableBaseBackground",
                "enableSidebarColor",
                "themeVariant",
                "autoSwitchSystem"
            ]
        );
    }

    #[test]
    fn broadcast_index_resolves_against_the_host_list() {
        let capabilities = HostCapabilities {
            theme_names: vec!["Plain".to_string(), "Nightshade".to_string()],
            ..Default::default()
        };
        assert_eq!(
            capabilities.resolve_broadcast(&ThemeBroadcast::Index(1)).as_deref(),
            Some("Nightshade")
        );
        assert_eq!(capabilities.resolve_broadcast(&ThemeBroadcast::Index(9)), None);
        assert_eq!(
            capabilities
                .resolve_broadcast(&ThemeBroadcast::Name("Nightshade Storm".to_string()))
                .as_deref(),
            Some("Nightshade Storm")
        );
    }
}
