//! # System Integrator
//!
//! The composition root. Owns exactly one [VariantManager] (which owns the
//! only generator set), the [ErrorSupervisor], and the probed
//! [HostCapabilities]; exposes the plugin's load/unload lifecycle, variant
//! switching, settings updates, the host `themeChanged` broadcast handler,
//! and the consistency/health checks.
//!
//! Activation is an instance field toggled by the broadcast handler — the
//! engine never stashes state on a shared global.

use crate::bridge::{BridgeState, PreferenceBridge, PreferenceSource, SystemPreference};
use crate::config::ThemeConfig;
use crate::error::{ErrorKind, ThemeError, ThemeResult};
use crate::host::{HostCapabilities, SettingsHost, ThemeBroadcast, ThemeRegistry, ThemeSettings};
use crate::manager::VariantManager;
use crate::sink::SharedSink;
use crate::style::StyleConcern;
use crate::supervisor::{ErrorSupervisor, SystemHealth};
use crate::theme::{list_variants, palette_for, Variant};

/// Result of [SystemIntegrator::validate_system_consistency].
#[derive(Debug, Clone)]
pub struct ConsistencyReport {
    /// The current variant resolves in the palette registry.
    pub variant_valid: bool,
    /// Every registered palette is complete, well-formed hex throughout.
    pub palettes_complete: bool,
    /// The hierarchy generator is constructed and tracked.
    pub hierarchy_ready: bool,
    /// The preference bridge is live (detecting or listening).
    pub bridge_live: bool,
    /// Blocking inconsistencies.
    pub errors: Vec<String>,
    /// Non-blocking degradations.
    pub warnings: Vec<String>,
}

impl ConsistencyReport {
    /// Whether the system is internally consistent (warnings allowed).
    pub fn is_consistent(&self) -> bool {
        self.variant_valid && self.palettes_complete && self.hierarchy_ready
            && self.errors.is_empty()
    }
}

/// Composes the engine against a host's capability set.
pub struct SystemIntegrator {
    manager: VariantManager,
    supervisor: ErrorSupervisor,
    settings_host: Option<Box<dyn SettingsHost>>,
    capabilities: HostCapabilities,
    config: ThemeConfig,
    is_active: bool,
}

impl SystemIntegrator {
    /// Compose the engine. Absent host capabilities never fail
    /// construction: they are recorded in the capability snapshot and the
    /// operations that need them fail with
    /// [ThemeError::HostApiUnavailable] when called.
    pub fn new(
        sink: SharedSink,
        registry: Option<Box<dyn ThemeRegistry>>,
        settings_host: Option<Box<dyn SettingsHost>>,
        preference_source: Option<Box<dyn PreferenceSource>>,
        config: ThemeConfig,
    ) -> Self {
        let capabilities = HostCapabilities {
            theme_registry: registry.is_some(),
            settings: settings_host.is_some(),
            preference_source: preference_source.is_some(),
            theme_names: list_variants()
                .map(|v| palette_for(v).display_name.to_string())
                .collect(),
        };

        let bridge = PreferenceBridge::new(preference_source);
        let manager = VariantManager::new(sink, registry, Some(bridge), &config);

        let mut supervisor = ErrorSupervisor::new(config.fallback_variant);
        // Degraded-mode conditions are resolved by reporting them; a
        // missing host API must not trigger fallback injection.
        supervisor.register_handler(ErrorKind::HostApiUnavailable, Box::new(|_| true));
        supervisor.register_handler(ErrorKind::StateValidationFailed, Box::new(|_| true));
        supervisor.register_strategy(
            ErrorKind::DomOperationFailed,
            Box::new(|event, host| host.reset_component(event.kind)),
        );
        supervisor.register_strategy(
            ErrorKind::ComponentUpdateFailed,
            Box::new(|event, host| host.reset_component(event.kind)),
        );
        supervisor.register_strategy(
            ErrorKind::VariantSwitchFailed,
            // The switch already rolled back; re-apply the restored
            // variant so every node is known-good again.
            Box::new(|_, host| host.reset_component(ErrorKind::ComponentUpdateFailed)),
        );

        supervisor.set_host_api_available(capabilities.theme_registry);

        Self {
            manager,
            supervisor,
            settings_host,
            capabilities,
            config,
            is_active: false,
        }
    }

    /// The authoritative current variant.
    pub fn current_variant(&self) -> Variant {
        self.manager.current_variant()
    }

    /// Whether this theme is the host's active theme.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// The probed host capability snapshot.
    pub fn capabilities(&self) -> &HostCapabilities {
        &self.capabilities
    }

    /// Read-only view of the variant manager.
    pub fn manager(&self) -> &VariantManager {
        &self.manager
    }

    /// Read-only view of the error supervisor.
    pub fn supervisor(&self) -> &ErrorSupervisor {
        &self.supervisor
    }

    /// Replace the host theme list used for index broadcasts.
    pub fn set_host_theme_names(&mut self, names: Vec<String>) {
        self.capabilities.theme_names = names;
    }

    fn report(&mut self, error: &ThemeError, context: &str) {
        self.supervisor.report_error(error, context, &mut self.manager);
    }

    fn read_settings(&self) -> ThemeSettings {
        let stored = self
            .settings_host
            .as_ref()
            .and_then(|host| host.settings_state(crate::PLUGIN_ID));
        match stored {
            Some(state) => ThemeSettings::from_state(&state),
            None => ThemeSettings {
                theme_variant: self.config.default_variant,
                auto_switch_system: self.config.auto_switch,
                ..ThemeSettings::default()
            },
        }
    }

    /// Plugin load: register the settings schema and every variant, then
    /// apply the stored (or default) settings and inject all styles.
    /// Missing host APIs degrade rather than abort the load.
    pub fn load(&mut self) -> ThemeResult<()> {
        log::info!("loading {}", crate::PLUGIN_ID);

        if let Some(host) = self.settings_host.as_mut() {
            if let Err(err) = host.register_settings_schema(crate::PLUGIN_ID, &ThemeSettings::schema())
            {
                self.report(&err, "register_settings_schema");
            }
        }

        if let Err(err) = self.manager.register_all_variants() {
            self.report(&err, "register_all_variants");
        }

        let settings = self.read_settings();
        self.is_active = true;
        if let Err(err) = self.manager.apply_settings(&settings) {
            self.report(&err, "load/apply_settings");
            return Err(err);
        }
        self.manager.apply_variant(self.manager.current_variant())?;
        log::info!("{} loaded with variant {}", crate::PLUGIN_ID, self.current_variant());
        Ok(())
    }

    /// Plugin unload: unregister every variant and tear the engine down.
    pub fn unload(&mut self) -> ThemeResult<()> {
        log::info!("unloading {}", crate::PLUGIN_ID);
        if self.capabilities.theme_registry {
            if let Err(err) = self.manager.unregister_all_variants() {
                self.report(&err, "unregister_all_variants");
            }
        }
        self.is_active = false;
        self.manager.cleanup()
    }

    /// Switch the active variant, reporting failures to the supervisor.
    pub fn switch_variant(&mut self, variant: Variant) -> ThemeResult<()> {
        match self.manager.switch_variant(variant) {
            Ok(()) => Ok(()),
            Err(err) => {
                if let Some(rollback_err) = self.manager.take_rollback_failure() {
                    self.report(&rollback_err, "switch_variant/rollback");
                }
                self.report(&err, "switch_variant");
                Err(err)
            }
        }
    }

    /// Switch by string identifier.
    pub fn switch_variant_named(&mut self, id: &str) -> ThemeResult<()> {
        match crate::theme::parse_variant(id) {
            Ok(variant) => self.switch_variant(variant),
            Err(err) => {
                self.report(&err, "switch_variant_named");
                Err(err)
            }
        }
    }

    /// Register every variant with the host theme registry.
    pub fn register_all_variants(&mut self) -> ThemeResult<()> {
        match self.manager.register_all_variants() {
            Ok(()) => Ok(()),
            Err(err) => {
                self.report(&err, "register_all_variants");
                Err(err)
            }
        }
    }

    /// Re-read settings from the host and apply them.
    pub fn handle_settings_update(&mut self) -> ThemeResult<()> {
        let settings = self.read_settings();
        log::debug!("settings update: {settings:?}");
        match self.manager.apply_settings(&settings) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.report(&err, "handle_settings_update");
                Err(err)
            }
        }
    }

    /// Handle the host's `themeChanged` broadcast.
    ///
    /// A payload naming one of this plugin's variants activates the theme
    /// (switching to that variant when needed); any other name deactivates
    /// it and removes every injected style. Redundant broadcasts are
    /// no-ops.
    pub fn handle_theme_broadcast(&mut self, payload: ThemeBroadcast) -> ThemeResult<()> {
        let Some(name) = self.capabilities.resolve_broadcast(&payload) else {
            log::debug!("broadcast index out of range: {payload:?}");
            return Ok(());
        };

        let matched = list_variants().find(|v| palette_for(*v).display_name == name);
        match matched {
            Some(variant) => {
                let newly_active = !self.is_active;
                self.is_active = true;
                if variant != self.manager.current_variant() {
                    self.switch_variant(variant)
                } else if newly_active {
                    log::info!("activated as '{name}'");
                    match self.manager.apply_variant(variant) {
                        Ok(()) => Ok(()),
                        Err(err) => {
                            self.report(&err, "handle_theme_broadcast");
                            Err(err)
                        }
                    }
                } else {
                    Ok(())
                }
            }
            None => {
                if self.is_active {
                    log::info!("deactivated; host switched to '{name}'");
                    self.is_active = false;
                    if let Err(err) = self.manager.remove_all_styles() {
                        self.report(&err, "handle_theme_broadcast");
                        return Err(err);
                    }
                }
                Ok(())
            }
        }
    }

    /// Drain pending platform preference events.
    pub fn pump_events(&mut self) -> usize {
        match self.manager.pump_preference_events() {
            Ok(switched) => switched,
            Err(err) => {
                self.report(&err, "pump_events");
                0
            }
        }
    }

    /// Read the platform preference, when a bridge source exists.
    pub fn detect_system_preference(&mut self) -> Option<SystemPreference> {
        self.manager.detect_system_preference()
    }

    /// Enable or disable following the platform preference.
    pub fn set_auto_switch_enabled(&mut self, enabled: bool) -> ThemeResult<()> {
        match self.manager.set_auto_switch_enabled(enabled) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.report(&err, "set_auto_switch_enabled");
                Err(err)
            }
        }
    }

    /// Recompute variant validity, palette completeness, hierarchy shape
    /// and bridge liveness from live state.
    pub fn validate_system_consistency(&self) -> ConsistencyReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let current = self.manager.current_variant();
        let variant_valid = crate::theme::is_valid_variant(current.as_str());
        if !variant_valid {
            errors.push(format!("current variant '{current}' is not registered"));
        }

        let palettes_complete = list_variants().all(|v| palette_for(v).is_complete());
        if !palettes_complete {
            errors.push("a registered palette has a malformed color".to_string());
        }

        let hierarchy_ready = self
            .manager
            .state()
            .ready
            .contains_key(&StyleConcern::Hierarchy);
        if !hierarchy_ready {
            errors.push("hierarchy generator is not constructed".to_string());
        }

        let bridge_live = matches!(
            self.manager.bridge_state(),
            Some(BridgeState::Detecting | BridgeState::Listening)
        );
        if !bridge_live {
            warnings.push("preference bridge unavailable; auto-switch degraded".to_string());
        }
        if !self.capabilities.theme_registry {
            warnings.push("theme registry absent; variants are unregistered".to_string());
        }

        ConsistencyReport {
            variant_valid,
            palettes_complete,
            hierarchy_ready,
            bridge_live,
            errors,
            warnings,
        }
    }

    /// Score system health from live readiness and the error log.
    pub fn system_health(&mut self) -> SystemHealth {
        let manager_ready =
            self.manager.state().initialized && !self.manager.is_cleaned_up();
        self.supervisor.set_component_ready("variant-manager", manager_ready);

        let bridge_live = matches!(
            self.manager.bridge_state(),
            Some(BridgeState::Detecting | BridgeState::Listening)
        );
        self.supervisor.set_component_ready("preference-bridge", bridge_live);

        let generators_ready =
            !self.is_active || self.manager.state().ready.values().all(|ready| *ready);
        self.supervisor.set_component_ready("style-generators", generators_ready);

        self.supervisor
            .set_host_api_available(self.capabilities.theme_registry);
        self.supervisor.system_health()
    }
}
