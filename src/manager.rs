//! # Variant Manager
//!
//! The single source of truth for "which variant is active". The manager
//! walks every style generator in the same fixed order on every switch,
//! confirms with the host theme registry, and rolls the whole set back to
//! the previous variant when any step fails. A single-flight guard makes
//! `switch_variant` non-reentrant: a second call issued while one is in
//! flight is rejected with [ThemeError::SwitchInProgress] rather than
//! interleaving two partial applications.
//!
//! Generators hold cached variant copies for CSS generation only; nothing
//! but this manager tells them to change.

use indexmap::IndexMap;

use crate::bridge::{BridgeState, PreferenceBridge, SystemPreference};
use crate::config::ThemeConfig;
use crate::contrast::ContrastReport;
use crate::error::{ErrorKind, ThemeError, ThemeResult};
use crate::host::{ThemeRegistry, ThemeSettings};
use crate::sink::SharedSink;
use crate::style::{
    default_generators, BaseStyles, SidebarStyles, StyleConcern, StyleGenerator, StyleHandle,
};
use crate::supervisor::RecoveryHost;
use crate::theme::{palette_for, parse_variant, Variant};

/// Observable state of a [VariantManager].
#[derive(Debug)]
pub struct VariantManagerState {
    /// The authoritative current variant.
    pub current: Variant,
    /// Whether construction completed.
    pub initialized: bool,
    /// Per-generator readiness, in walk order.
    pub ready: IndexMap<StyleConcern, bool>,
    /// Snapshot of the last variant every generator reached, used as the
    /// rollback target.
    pub last_successful: Option<Variant>,
}

/// Owns the current variant and orchestrates every style generator.
pub struct VariantManager {
    state: VariantManagerState,
    generators: Vec<Box<dyn StyleGenerator>>,
    sink: SharedSink,
    registry: Option<Box<dyn ThemeRegistry>>,
    bridge: Option<PreferenceBridge>,
    auto_switch: bool,
    switch_in_flight: bool,
    fallback_handle: StyleHandle,
    rollback_failure: Option<ThemeError>,
    cleaned_up: bool,
}

impl VariantManager {
    /// Construct the manager with the default generator set.
    pub fn new(
        sink: SharedSink,
        registry: Option<Box<dyn ThemeRegistry>>,
        bridge: Option<PreferenceBridge>,
        config: &ThemeConfig,
    ) -> Self {
        let generators = default_generators(config.default_variant, &sink);
        Self::with_generators(generators, sink, registry, bridge, config)
    }

    /// Construct the manager around an explicit generator set. The given
    /// order is the walk order.
    pub(crate) fn with_generators(
        generators: Vec<Box<dyn StyleGenerator>>,
        sink: SharedSink,
        registry: Option<Box<dyn ThemeRegistry>>,
        bridge: Option<PreferenceBridge>,
        config: &ThemeConfig,
    ) -> Self {
        let ready: IndexMap<StyleConcern, bool> =
            generators.iter().map(|g| (g.concern(), false)).collect();
        let mut manager = Self {
            state: VariantManagerState {
                current: config.default_variant,
                initialized: true,
                ready,
                last_successful: None,
            },
            generators,
            sink,
            registry,
            bridge,
            auto_switch: false,
            switch_in_flight: false,
            fallback_handle: StyleHandle::new(StyleConcern::Fallback),
            rollback_failure: None,
            cleaned_up: false,
        };
        if config.auto_switch {
            if let Err(err) = manager.set_auto_switch_enabled(true) {
                log::warn!("auto-switch could not be enabled at construction: {err}");
            }
        }
        manager
    }

    /// The authoritative current variant.
    pub fn current_variant(&self) -> Variant {
        self.state.current
    }

    /// The manager's observable state.
    pub fn state(&self) -> &VariantManagerState {
        &self.state
    }

    /// Whether [cleanup](Self::cleanup) has run.
    pub fn is_cleaned_up(&self) -> bool {
        self.cleaned_up
    }

    /// Whether auto-switching is currently enabled.
    pub fn auto_switch_enabled(&self) -> bool {
        self.auto_switch
    }

    /// The preference bridge's lifecycle state, when a bridge exists.
    pub fn bridge_state(&self) -> Option<BridgeState> {
        self.bridge.as_ref().map(|b| b.state())
    }

    /// Number of owned generators.
    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    /// A rollback failure left behind by the last failed switch, if any.
    /// Reading it clears it.
    pub fn take_rollback_failure(&mut self) -> Option<ThemeError> {
        self.rollback_failure.take()
    }

    fn ensure_live(&self, operation: &str) -> ThemeResult<()> {
        if self.cleaned_up {
            return Err(ThemeError::state_validation(format!(
                "{operation} after cleanup; the manager must be reconstructed"
            )));
        }
        Ok(())
    }

    /// Switch by string identifier, validating against the registry.
    pub fn switch_variant_named(&mut self, id: &str) -> ThemeResult<()> {
        self.switch_variant(parse_variant(id)?)
    }

    /// Switch the active variant.
    ///
    /// No-ops when `target` is already current. On failure every advanced
    /// generator is restored to the previous variant and the original
    /// error is re-raised, wrapped as [ThemeError::VariantSwitch]. A
    /// rollback failure is logged at critical severity and retrievable via
    /// [take_rollback_failure](Self::take_rollback_failure); the original
    /// error is still the one returned.
    pub fn switch_variant(&mut self, target: Variant) -> ThemeResult<()> {
        self.ensure_live("switch_variant")?;
        if self.switch_in_flight {
            return Err(ThemeError::SwitchInProgress);
        }
        if target == self.state.current {
            log::debug!("switch_variant({target}) is a no-op");
            return Ok(());
        }

        self.switch_in_flight = true;
        let result = self.run_switch(target);
        self.switch_in_flight = false;
        result
    }

    fn run_switch(&mut self, target: Variant) -> ThemeResult<()> {
        let previous = self.state.current;
        self.state.last_successful = Some(previous);
        self.state.current = target;
        log::info!("switching variant: {previous} -> {target}");

        let mut failure: Option<ThemeError> = None;
        let mut to_restore = 0;
        for (index, generator) in self.generators.iter_mut().enumerate() {
            let concern = generator.concern();
            match generator.update_variant(target) {
                Ok(()) => {
                    self.state.ready.insert(concern, true);
                }
                Err(err) => {
                    self.state.ready.insert(concern, false);
                    // The failing generator advanced its cached variant
                    // before its apply failed, so it is restored too.
                    to_restore = index + 1;
                    failure = Some(err);
                    break;
                }
            }
        }

        if failure.is_none() {
            if let Some(registry) = self.registry.as_mut() {
                let palette = palette_for(target);
                if let Err(err) = registry.register(
                    crate::PLUGIN_ID,
                    palette.display_name,
                    &target.css_resource_path(),
                ) {
                    to_restore = self.generators.len();
                    failure = Some(err);
                }
            }
        }

        match failure {
            None => {
                self.state.last_successful = Some(target);
                log::info!("variant switch to {target} complete");
                Ok(())
            }
            Some(err) => {
                log::error!("variant switch to {target} failed: {err}; rolling back to {previous}");
                self.rollback(previous, to_restore);
                Err(ThemeError::variant_switch(target.as_str(), err))
            }
        }
    }

    /// Best-effort restoration of `previous` on the manager and the first
    /// `count` generators.
    fn rollback(&mut self, previous: Variant, count: usize) {
        self.state.current = previous;
        for generator in self.generators.iter_mut().take(count) {
            let concern = generator.concern();
            match generator.update_variant(previous) {
                Ok(()) => {
                    self.state.ready.insert(concern, true);
                }
                Err(err) => {
                    log::error!("rollback of '{concern}' to {previous} failed: {err}");
                    self.state.ready.insert(concern, false);
                    self.rollback_failure = Some(ThemeError::recovery(format!(
                        "rollback of '{concern}' to {previous} failed: {err}"
                    )));
                }
            }
        }
    }

    /// Re-render and re-inject all CSS for `variant` without switch
    /// bookkeeping; used to refresh visuals after a settings change.
    pub fn apply_variant(&mut self, variant: Variant) -> ThemeResult<()> {
        self.ensure_live("apply_variant")?;
        for generator in self.generators.iter_mut() {
            let concern = generator.concern();
            let result = if generator.variant() == variant {
                generator.apply()
            } else {
                generator.update_variant(variant)
            };
            match result {
                Ok(()) => {
                    self.state.ready.insert(concern, true);
                }
                Err(err) => {
                    self.state.ready.insert(concern, false);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Remove every owned style node, including the fallback sheet. The
    /// generator set stays constructed; this is deactivation, not
    /// teardown.
    pub fn remove_all_styles(&mut self) -> ThemeResult<()> {
        let mut first_error = None;
        for generator in self.generators.iter_mut() {
            let concern = generator.concern();
            if let Err(err) = generator.remove() {
                log::warn!("removing '{concern}' styles failed: {err}");
                first_error.get_or_insert(err);
            }
            self.state.ready.insert(concern, false);
        }
        if let Err(err) = self.fallback_handle.remove(&self.sink) {
            log::warn!("removing fallback styles failed: {err}");
            first_error.get_or_insert(err);
        }
        match first_error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Apply host settings: variant, base-background and sidebar toggles,
    /// auto-switch. Bridge failures are logged rather than raised; the
    /// settings update as a whole still succeeds without the capability.
    pub fn apply_settings(&mut self, settings: &ThemeSettings) -> ThemeResult<()> {
        self.ensure_live("apply_settings")?;
        if settings.theme_variant != self.state.current {
            self.switch_variant(settings.theme_variant)?;
        }
        for generator in self.generators.iter_mut() {
            if let Some(base) = generator.as_any_mut().downcast_mut::<BaseStyles>() {
                base.set_enabled(settings.enable_base_background)?;
            } else if let Some(sidebar) = generator.as_any_mut().downcast_mut::<SidebarStyles>() {
                sidebar.set_colored(settings.enable_sidebar_color)?;
            }
        }
        if let Err(err) = self.set_auto_switch_enabled(settings.auto_switch_system) {
            log::warn!("auto-switch setting could not be applied: {err}");
        }
        Ok(())
    }

    /// Read the platform preference through the bridge, when present.
    pub fn detect_system_preference(&mut self) -> Option<SystemPreference> {
        self.bridge.as_mut().map(|bridge| bridge.detect())
    }

    /// Enable or disable following the platform preference.
    pub fn set_auto_switch_enabled(&mut self, enabled: bool) -> ThemeResult<()> {
        self.auto_switch = enabled;
        match self.bridge.as_mut() {
            Some(bridge) => bridge.set_listening(enabled),
            None if enabled => Err(ThemeError::host_api_unavailable("preference media query")),
            None => Ok(()),
        }
    }

    /// Drain pending platform preference events, switching variant when
    /// auto-switch is on and the suggestion differs from current. Returns
    /// how many switches were performed.
    pub fn pump_preference_events(&mut self) -> ThemeResult<usize> {
        self.ensure_live("pump_preference_events")?;
        let mut switched = 0;
        loop {
            let change = match self.bridge.as_mut() {
                Some(bridge) => bridge.poll_change(),
                None => None,
            };
            let Some(change) = change else {
                break;
            };
            if !self.auto_switch {
                continue;
            }
            if change.suggested_variant == self.state.current {
                continue;
            }
            self.switch_variant(change.suggested_variant)?;
            switched += 1;
        }
        Ok(switched)
    }

    /// Register every variant with the host theme registry. Every variant
    /// is attempted even after an earlier failure; the first error
    /// surfaces only after all attempts have been issued.
    pub fn register_all_variants(&mut self) -> ThemeResult<()> {
        let Some(registry) = self.registry.as_mut() else {
            return Err(ThemeError::host_api_unavailable("theme registry"));
        };
        let mut first_error = None;
        for variant in crate::theme::list_variants() {
            let palette = palette_for(variant);
            if let Err(err) = registry.register(
                crate::PLUGIN_ID,
                palette.display_name,
                &variant.css_resource_path(),
            ) {
                log::warn!("registering '{}' failed: {err}", palette.display_name);
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Unregister every variant from the host theme registry, with the
    /// same all-attempts semantics as registration.
    pub fn unregister_all_variants(&mut self) -> ThemeResult<()> {
        let Some(registry) = self.registry.as_mut() else {
            return Err(ThemeError::host_api_unavailable("theme registry"));
        };
        let mut first_error = None;
        for variant in crate::theme::list_variants() {
            let palette = palette_for(variant);
            if let Err(err) = registry.unregister(palette.display_name) {
                log::warn!("unregistering '{}' failed: {err}", palette.display_name);
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Advisory accessibility reports from the generators that produce
    /// them.
    pub fn validate_accessibility(&self) -> Vec<ContrastReport> {
        self.generators
            .iter()
            .filter_map(|g| g.validate_accessibility())
            .collect()
    }

    /// Remove every owned style node, drop the generators and tear down
    /// the preference listener. Idempotent; the manager is terminal
    /// afterwards.
    pub fn cleanup(&mut self) -> ThemeResult<()> {
        if self.cleaned_up {
            return Ok(());
        }
        log::info!("cleaning up variant manager");
        if let Err(err) = self.remove_all_styles() {
            log::warn!("cleanup could not remove every style node: {err}");
        }
        if let Some(bridge) = self.bridge.as_mut() {
            if let Err(err) = bridge.set_listening(false) {
                log::warn!("cleanup could not tear down the preference listener: {err}");
            }
        }
        self.generators.clear();
        self.state.ready.clear();
        self.state.initialized = false;
        self.auto_switch = false;
        self.cleaned_up = true;
        Ok(())
    }
}

impl RecoveryHost for VariantManager {
    fn force_default_variant(&mut self, variant: Variant) -> ThemeResult<()> {
        self.ensure_live("force_default_variant")?;
        if self.state.current == variant {
            self.apply_variant(variant)
        } else {
            self.switch_variant(variant)
        }
    }

    fn inject_fallback_css(&mut self, css: &str) -> ThemeResult<()> {
        self.fallback_handle.upsert(&self.sink, css)
    }

    fn reset_component(&mut self, kind: ErrorKind) -> ThemeResult<()> {
        match kind {
            ErrorKind::DomOperationFailed
            | ErrorKind::ComponentUpdateFailed
            | ErrorKind::ThemeLoadingFailed => self.apply_variant(self.state.current),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::sync::{Arc, Mutex};

    use crate::bridge::{
        PreferenceCallback, PreferenceSource, SubscribeStrategy, SubscriptionToken,
    };
    use crate::sink::{shared, MemorySink, SharedSink};
    use crate::style::{GeneratorState, HierarchyStyles};

    /// Generator that fails `apply` while caching a specific variant.
    struct FlakyStyles {
        state: GeneratorState,
        fail_on: Option<Variant>,
    }

    impl FlakyStyles {
        fn new(sink: SharedSink, fail_on: Option<Variant>) -> Self {
            Self {
                state: GeneratorState::new(StyleConcern::UiComponents, Variant::Night, sink),
                fail_on,
            }
        }
    }

    impl StyleGenerator for FlakyStyles {
        fn state(&self) -> &GeneratorState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut GeneratorState {
            &mut self.state
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn generate_css(&self, variant: Variant) -> String {
            format!("/* flaky {variant} */\n")
        }

        fn apply(&mut self) -> ThemeResult<()> {
            if Some(self.variant()) == self.fail_on {
                return Err(ThemeError::dom_operation("components", "injected fault"));
            }
            let css = self.generate_css(self.variant());
            self.state_mut().inject(&css)
        }
    }

    #[derive(Default)]
    struct RecordingRegistry {
        registered: Vec<String>,
        unregistered: Vec<String>,
        fail_for: Option<String>,
    }

    impl ThemeRegistry for RecordingRegistry {
        fn register(&mut self, _id: &str, display_name: &str, _path: &str) -> ThemeResult<()> {
            if self.fail_for.as_deref() == Some(display_name) {
                return Err(ThemeError::host_api_unavailable("theme registry rejected"));
            }
            self.registered.push(display_name.to_string());
            Ok(())
        }

        fn unregister(&mut self, display_name: &str) -> ThemeResult<()> {
            self.unregistered.push(display_name.to_string());
            Ok(())
        }
    }

    struct TestSource {
        callbacks: Arc<Mutex<Vec<PreferenceCallback>>>,
        preference: SystemPreference,
    }

    impl TestSource {
        fn new(preference: SystemPreference) -> Self {
            Self {
                callbacks: Arc::new(Mutex::new(Vec::new())),
                preference,
            }
        }

        fn fire(callbacks: &Arc<Mutex<Vec<PreferenceCallback>>>, preference: SystemPreference) {
            for callback in callbacks.lock().unwrap().iter_mut() {
                callback(preference);
            }
        }
    }

    impl PreferenceSource for TestSource {
        fn is_available(&self) -> bool {
            true
        }

        fn current(&self) -> ThemeResult<SystemPreference> {
            Ok(self.preference)
        }

        fn subscribe(
            &mut self,
            _strategy: SubscribeStrategy,
            callback: PreferenceCallback,
        ) -> ThemeResult<SubscriptionToken> {
            self.callbacks.lock().unwrap().push(callback);
            Ok(SubscriptionToken(1))
        }

        fn unsubscribe(
            &mut self,
            _strategy: SubscribeStrategy,
            _token: SubscriptionToken,
        ) -> ThemeResult<()> {
            Ok(())
        }
    }

    fn manager_with_default_generators(sink: &SharedSink) -> VariantManager {
        VariantManager::new(sink.clone(), None, None, &ThemeConfig::default())
    }

    #[test]
    fn default_load_is_night_without_an_explicit_switch() {
        let sink = shared(MemorySink::new());
        let mut manager = manager_with_default_generators(&sink);
        assert_eq!(manager.current_variant(), Variant::Night);

        manager.apply_variant(Variant::Night).unwrap();
        let base_css = sink
            .read()
            .unwrap()
            .content(&StyleConcern::BaseBackground.element_id())
            .unwrap();
        assert!(base_css.contains("#1a1b26"));
    }

    #[test]
    fn unknown_identifier_fails_synchronously_and_changes_nothing() {
        let sink = shared(MemorySink::new());
        let mut manager = manager_with_default_generators(&sink);
        let err = manager.switch_variant_named("midnight").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidVariant { ref name } if name == "midnight"));
        assert_eq!(manager.current_variant(), Variant::Night);
    }

    #[test]
    fn switch_to_current_variant_is_a_no_op() {
        let sink = shared(MemorySink::new());
        let mut manager = manager_with_default_generators(&sink);
        manager.switch_variant(Variant::Night).unwrap();
        assert!(sink.read().unwrap().is_empty());
    }

    #[test]
    fn failed_switch_rolls_back_manager_and_advanced_generators() {
        let sink = shared(MemorySink::new());
        let generators: Vec<Box<dyn StyleGenerator>> = vec![
            Box::new(HierarchyStyles::new(Variant::Night, sink.clone())),
            Box::new(FlakyStyles::new(sink.clone(), Some(Variant::Storm))),
            Box::new(SidebarStyles::new(Variant::Night, sink.clone())),
        ];
        let mut manager = VariantManager::with_generators(
            generators,
            sink.clone(),
            None,
            None,
            &ThemeConfig::default(),
        );
        manager.apply_variant(Variant::Night).unwrap();

        let err = manager.switch_variant(Variant::Storm).unwrap_err();
        assert!(matches!(err, ThemeError::VariantSwitch { ref target, .. } if target == "storm"));
        assert_eq!(manager.current_variant(), Variant::Night);
        assert!(manager.take_rollback_failure().is_none());

        // The generator that advanced before the fault is back on night.
        let hierarchy_css = sink
            .read()
            .unwrap()
            .content(&StyleConcern::Hierarchy.element_id())
            .unwrap();
        let expected = HierarchyStyles::new(Variant::Night, sink.clone())
            .generate_css(Variant::Night);
        assert_eq!(hierarchy_css, expected);

        // The generator after the fault never advanced.
        let sidebar_css = sink
            .read()
            .unwrap()
            .content(&StyleConcern::Sidebar.element_id())
            .unwrap();
        assert!(sidebar_css.contains("#16161e"));
    }

    #[test]
    fn registry_failure_on_switch_rolls_back_every_generator() {
        let sink = shared(MemorySink::new());
        let registry = RecordingRegistry {
            fail_for: Some("Nightshade Storm".to_string()),
            ..Default::default()
        };
        let mut manager = VariantManager::new(
            sink.clone(),
            Some(Box::new(registry)),
            None,
            &ThemeConfig::default(),
        );
        manager.apply_variant(Variant::Night).unwrap();

        let err = manager.switch_variant(Variant::Storm).unwrap_err();
        assert!(matches!(err, ThemeError::VariantSwitch { .. }));
        assert_eq!(manager.current_variant(), Variant::Night);
        let base_css = sink
            .read()
            .unwrap()
            .content(&StyleConcern::BaseBackground.element_id())
            .unwrap();
        assert!(base_css.contains("#1a1b26"));
    }

    #[test]
    fn register_all_attempts_every_variant_before_surfacing_the_error() {
        let sink = shared(MemorySink::new());
        let registry = RecordingRegistry {
            fail_for: Some("Nightshade Storm".to_string()),
            ..Default::default()
        };
        let mut manager = VariantManager::with_generators(
            Vec::new(),
            sink,
            Some(Box::new(registry)),
            None,
            &ThemeConfig::default(),
        );
        let err = manager.register_all_variants().unwrap_err();
        assert!(matches!(err, ThemeError::HostApiUnavailable { .. }));
        // Night and Light both still went through.
        // (The registry mock records successful attempts only.)
    }

    #[test]
    fn register_all_without_a_registry_is_host_api_unavailable() {
        let sink = shared(MemorySink::new());
        let mut manager = manager_with_default_generators(&sink);
        let err = manager.register_all_variants().unwrap_err();
        assert!(matches!(err, ThemeError::HostApiUnavailable { .. }));
        assert!(sink.read().unwrap().is_empty());
    }

    #[test]
    fn auto_switch_follows_a_preference_flip_exactly_once() {
        let source = TestSource::new(SystemPreference::Dark);
        let callbacks = Arc::clone(&source.callbacks);
        let bridge = PreferenceBridge::new(Some(Box::new(source)));
        let sink = shared(MemorySink::new());
        let config = ThemeConfig::default().with_auto_switch(true);
        let mut manager = VariantManager::new(sink, None, Some(bridge), &config);
        assert_eq!(manager.current_variant(), Variant::Night);

        TestSource::fire(&callbacks, SystemPreference::Light);
        let switched = manager.pump_preference_events().unwrap();
        assert_eq!(switched, 1);
        assert_eq!(manager.current_variant(), Variant::Light);

        // Nothing pending; no further transitions (and never storm).
        assert_eq!(manager.pump_preference_events().unwrap(), 0);
        assert_eq!(manager.current_variant(), Variant::Light);
    }

    #[test]
    fn auto_switch_disabled_ignores_platform_events() {
        let source = TestSource::new(SystemPreference::Dark);
        let callbacks = Arc::clone(&source.callbacks);
        let mut bridge = PreferenceBridge::new(Some(Box::new(source)));
        bridge.set_listening(true).unwrap();
        let sink = shared(MemorySink::new());
        let mut manager = VariantManager::new(sink, None, Some(bridge), &ThemeConfig::default());

        TestSource::fire(&callbacks, SystemPreference::Light);
        assert_eq!(manager.pump_preference_events().unwrap(), 0);
        assert_eq!(manager.current_variant(), Variant::Night);
    }

    #[test]
    fn settings_toggle_base_background_and_sidebar_tint() {
        let sink = shared(MemorySink::new());
        let mut manager = manager_with_default_generators(&sink);
        manager.apply_variant(Variant::Night).unwrap();
        assert!(sink
            .read()
            .unwrap()
            .contains(&StyleConcern::BaseBackground.element_id()));

        let settings = ThemeSettings {
            enable_base_background: false,
            enable_sidebar_color: false,
            theme_variant: Variant::Storm,
            auto_switch_system: false,
        };
        manager.apply_settings(&settings).unwrap();
        assert_eq!(manager.current_variant(), Variant::Storm);
        assert!(!sink
            .read()
            .unwrap()
            .contains(&StyleConcern::BaseBackground.element_id()));
        let sidebar_css = sink
            .read()
            .unwrap()
            .content(&StyleConcern::Sidebar.element_id())
            .unwrap();
        assert!(!sidebar_css.contains("background-color: #1f2335"));
    }

    #[test]
    fn cleanup_is_idempotent_and_terminal() {
        let sink = shared(MemorySink::new());
        let mut manager = manager_with_default_generators(&sink);
        manager.apply_variant(Variant::Night).unwrap();
        assert!(!sink.read().unwrap().is_empty());

        manager.cleanup().unwrap();
        manager.cleanup().unwrap();
        assert!(sink.read().unwrap().is_empty());
        assert!(manager.is_cleaned_up());

        let err = manager.switch_variant(Variant::Storm).unwrap_err();
        assert!(matches!(err, ThemeError::StateValidation { .. }));
    }

    #[test]
    fn accessibility_reports_come_from_both_reading_generators() {
        let sink = shared(MemorySink::new());
        let manager = manager_with_default_generators(&sink);
        let reports = manager.validate_accessibility();
        let components: Vec<&str> = reports.iter().map(|r| r.component.as_str()).collect();
        assert_eq!(components, vec!["hierarchy", "typography"]);
        assert!(reports.iter().all(|r| r.meets_wcag));
    }
}
