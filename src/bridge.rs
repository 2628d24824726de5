//! # System-Preference Bridge
//!
//! Wraps the platform's dark/light signal behind the [PreferenceSource]
//! trait. The bridge detects the current preference, caches it, and — once
//! auto-switching is turned on — subscribes for changes, trying the modern
//! registration API first and falling back to the legacy one. Platform
//! events land in a pending queue the variant manager drains explicitly,
//! which keeps the whole engine single-threaded and event-driven.
//!
//! Failures are funneled through a bounded per-error-kind retry counter;
//! once the budget is exhausted the bridge stays quiet until
//! [PreferenceBridge::reset_error_state] is called.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::error::{ErrorKind, ThemeError, ThemeResult};
use crate::theme::Variant;

/// Retry budget per error kind.
const MAX_RETRIES: u32 = 3;
/// Advisory delay between retries; logged, never slept on.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// The platform's color-scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPreference {
    /// The platform prefers a light scheme.
    Light,
    /// The platform prefers a dark scheme.
    Dark,
}

impl SystemPreference {
    /// The variant this preference suggests. Dark always maps to the
    /// darkest default rather than picking among the dark variants.
    pub fn suggested_variant(&self) -> Variant {
        match self {
            Self::Light => Variant::Light,
            Self::Dark => Variant::Night,
        }
    }

    /// Stable identifier for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Bridge lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Not yet constructed against a source.
    Uninitialized,
    /// Source probed, not listening for changes.
    Detecting,
    /// Subscribed to platform change events.
    Listening,
    /// The platform capability is absent; the cached default is served.
    Unavailable,
}

/// Which registration API a subscription went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeStrategy {
    /// The current registration API.
    Modern,
    /// The deprecated registration API kept for older hosts.
    Legacy,
}

/// Opaque token minted by a [PreferenceSource] on subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionToken(pub u64);

/// Callback invoked by the platform on every preference change.
pub type PreferenceCallback = Box<dyn FnMut(SystemPreference) + Send>;

/// The platform dark/light signal, as the host exposes it.
pub trait PreferenceSource: Send {
    /// Whether the capability exists at all.
    fn is_available(&self) -> bool;

    /// Read the current preference.
    fn current(&self) -> ThemeResult<SystemPreference>;

    /// Register a change listener through the given strategy.
    fn subscribe(
        &mut self,
        strategy: SubscribeStrategy,
        callback: PreferenceCallback,
    ) -> ThemeResult<SubscriptionToken>;

    /// Remove a previously registered listener.
    fn unsubscribe(
        &mut self,
        strategy: SubscribeStrategy,
        token: SubscriptionToken,
    ) -> ThemeResult<()>;
}

/// Notification delivered to bridge observers on a preference change.
#[derive(Debug, Clone)]
pub struct PreferenceChange {
    /// The new platform preference.
    pub preference: SystemPreference,
    /// The variant the bridge suggests for it.
    pub suggested_variant: Variant,
    /// When the change was observed.
    pub timestamp: Instant,
}

/// Wraps a [PreferenceSource] with caching, subscription fallback and
/// bounded retry bookkeeping.
pub struct PreferenceBridge {
    source: Option<Box<dyn PreferenceSource>>,
    state: BridgeState,
    cached: SystemPreference,
    subscription: Option<(SubscribeStrategy, SubscriptionToken)>,
    pending: Arc<Mutex<VecDeque<SystemPreference>>>,
    observers: Vec<Box<dyn FnMut(&PreferenceChange) + Send>>,
    retries: HashMap<ErrorKind, u32>,
}

impl PreferenceBridge {
    /// Probe the source and cache the starting preference.
    ///
    /// An absent or failing capability leaves the bridge `Unavailable`
    /// with `Dark` cached; detection calls then serve the cached default
    /// instead of re-probing.
    pub fn new(source: Option<Box<dyn PreferenceSource>>) -> Self {
        let mut bridge = Self {
            source,
            state: BridgeState::Uninitialized,
            cached: SystemPreference::Dark,
            subscription: None,
            pending: Arc::new(Mutex::new(VecDeque::new())),
            observers: Vec::new(),
            retries: HashMap::new(),
        };
        bridge.state = BridgeState::Detecting;

        match &bridge.source {
            Some(source) if source.is_available() => match source.current() {
                Ok(preference) => {
                    bridge.cached = preference;
                    log::debug!("platform preference detected: {}", preference.as_str());
                }
                Err(err) => {
                    bridge.note_failure(&err);
                    bridge.state = BridgeState::Unavailable;
                }
            },
            _ => {
                let err = ThemeError::host_api_unavailable("preference media query");
                bridge.note_failure(&err);
                bridge.state = BridgeState::Unavailable;
            }
        }
        bridge
    }

    /// The bridge's lifecycle state.
    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// The last-known preference.
    pub fn cached_preference(&self) -> SystemPreference {
        self.cached
    }

    /// Whether a change listener is currently registered.
    pub fn is_listening(&self) -> bool {
        self.state == BridgeState::Listening
    }

    /// Read the platform preference, serving the cached default when the
    /// capability is unavailable.
    pub fn detect(&mut self) -> SystemPreference {
        if self.state == BridgeState::Unavailable {
            return self.cached;
        }
        if let Some(source) = &self.source {
            match source.current() {
                Ok(preference) => self.cached = preference,
                Err(err) => self.note_failure(&err),
            }
        }
        self.cached
    }

    /// Register an observer invoked on every accepted preference change.
    pub fn add_observer(&mut self, observer: Box<dyn FnMut(&PreferenceChange) + Send>) {
        self.observers.push(observer);
    }

    /// Turn change listening on or off. Both directions are idempotent.
    pub fn set_listening(&mut self, enabled: bool) -> ThemeResult<()> {
        if enabled {
            self.start_listening()
        } else {
            self.stop_listening();
            Ok(())
        }
    }

    fn start_listening(&mut self) -> ThemeResult<()> {
        if self.state == BridgeState::Listening {
            return Ok(());
        }
        if self.budget_exhausted(ErrorKind::HostApiUnavailable) {
            return Err(ThemeError::host_api_unavailable(
                "preference media query (retry budget exhausted)",
            ));
        }
        if self.state == BridgeState::Unavailable {
            let err = ThemeError::host_api_unavailable("preference media query");
            self.note_failure(&err);
            return Err(err);
        }

        let modern_cb = self.queue_callback();
        let legacy_cb = self.queue_callback();
        let Some(source) = self.source.as_mut() else {
            let err = ThemeError::host_api_unavailable("preference media query");
            self.note_failure(&err);
            return Err(err);
        };

        let chosen = match source.subscribe(SubscribeStrategy::Modern, modern_cb) {
            Ok(token) => Some((SubscribeStrategy::Modern, token)),
            Err(modern_err) => {
                log::debug!("modern preference subscription failed ({modern_err}); trying legacy");
                match source.subscribe(SubscribeStrategy::Legacy, legacy_cb) {
                    Ok(token) => Some((SubscribeStrategy::Legacy, token)),
                    Err(legacy_err) => {
                        self.note_failure(&legacy_err);
                        return Err(legacy_err);
                    }
                }
            }
        };

        self.subscription = chosen;
        self.state = BridgeState::Listening;
        log::debug!("preference bridge listening via {:?}", self.subscription);
        Ok(())
    }

    fn stop_listening(&mut self) {
        let Some((strategy, token)) = self.subscription.take() else {
            return;
        };
        if let Some(source) = self.source.as_mut() {
            if let Err(err) = source.unsubscribe(strategy, token) {
                log::warn!("preference unsubscribe failed: {err}");
            }
        }
        if self.state == BridgeState::Listening {
            self.state = BridgeState::Detecting;
        }
    }

    /// Pop the next accepted preference change, if any.
    ///
    /// Redundant events (same preference as cached) are swallowed here so
    /// callers never see back-to-back notifications for one state.
    pub fn poll_change(&mut self) -> Option<PreferenceChange> {
        loop {
            let next = {
                let mut queue = self.pending.lock().ok()?;
                queue.pop_front()
            };
            let next = next?;
            if next == self.cached {
                continue;
            }
            self.cached = next;
            let change = PreferenceChange {
                preference: next,
                suggested_variant: next.suggested_variant(),
                timestamp: Instant::now(),
            };
            log::debug!(
                "platform preference changed to {}; suggesting {}",
                next.as_str(),
                change.suggested_variant
            );
            for observer in &mut self.observers {
                observer(&change);
            }
            return Some(change);
        }
    }

    /// Clear the retry bookkeeping so failed capabilities are probed again.
    pub fn reset_error_state(&mut self) {
        self.retries.clear();
        if self.state == BridgeState::Unavailable && self.source.is_some() {
            self.state = BridgeState::Detecting;
        }
    }

    fn queue_callback(&self) -> PreferenceCallback {
        let pending = Arc::clone(&self.pending);
        Box::new(move |preference| {
            if let Ok(mut queue) = pending.lock() {
                queue.push_back(preference);
            }
        })
    }

    fn budget_exhausted(&self, kind: ErrorKind) -> bool {
        self.retries.get(&kind).copied().unwrap_or(0) >= MAX_RETRIES
    }

    fn note_failure(&mut self, err: &ThemeError) {
        let kind = err.kind();
        let count = self.retries.entry(kind).or_insert(0);
        if *count < MAX_RETRIES {
            *count += 1;
            log::warn!(
                "preference bridge failure ({err}); attempt {}/{}, next retry after {:?}",
                count,
                MAX_RETRIES,
                RETRY_DELAY
            );
        } else {
            log::error!(
                "preference bridge retry budget exhausted for {}; waiting for reset",
                kind.as_str()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type FiredCallbacks = Arc<Mutex<Vec<PreferenceCallback>>>;

    struct MockSource {
        available: bool,
        preference: SystemPreference,
        modern_works: bool,
        legacy_works: bool,
        callbacks: FiredCallbacks,
        unsubscribed: Arc<Mutex<Vec<SubscribeStrategy>>>,
        next_token: u64,
    }

    impl MockSource {
        fn new(preference: SystemPreference) -> Self {
            Self {
                available: true,
                preference,
                modern_works: true,
                legacy_works: true,
                callbacks: Arc::new(Mutex::new(Vec::new())),
                unsubscribed: Arc::new(Mutex::new(Vec::new())),
                next_token: 0,
            }
        }

        fn fire(callbacks: &FiredCallbacks, preference: SystemPreference) {
            for callback in callbacks.lock().unwrap().iter_mut() {
                callback(preference);
            }
        }
    }

    impl PreferenceSource for MockSource {
        fn is_available(&self) -> bool {
            self.available
        }

        fn current(&self) -> ThemeResult<SystemPreference> {
            Ok(self.preference)
        }

        fn subscribe(
            &mut self,
            strategy: SubscribeStrategy,
            callback: PreferenceCallback,
        ) -> ThemeResult<SubscriptionToken> {
            let works = match strategy {
                SubscribeStrategy::Modern => self.modern_works,
                SubscribeStrategy::Legacy => self.legacy_works,
            };
            if !works {
                return Err(ThemeError::host_api_unavailable(format!(
                    "{strategy:?} subscription"
                )));
            }
            self.callbacks.lock().unwrap().push(callback);
            self.next_token += 1;
            Ok(SubscriptionToken(self.next_token))
        }

        fn unsubscribe(
            &mut self,
            strategy: SubscribeStrategy,
            _token: SubscriptionToken,
        ) -> ThemeResult<()> {
            self.unsubscribed.lock().unwrap().push(strategy);
            Ok(())
        }
    }

    #[test]
    fn absent_capability_defaults_to_dark_and_stays_unavailable() {
        let mut bridge = PreferenceBridge::new(None);
        assert_eq!(bridge.state(), BridgeState::Unavailable);
        assert_eq!(bridge.detect(), SystemPreference::Dark);
        assert!(bridge.set_listening(true).is_err());
    }

    #[test]
    fn falls_back_to_legacy_subscription_and_unsubscribes_with_it() {
        let mut source = MockSource::new(SystemPreference::Dark);
        source.modern_works = false;
        let unsubscribed = Arc::clone(&source.unsubscribed);

        let mut bridge = PreferenceBridge::new(Some(Box::new(source)));
        bridge.set_listening(true).unwrap();
        assert!(bridge.is_listening());

        bridge.set_listening(false).unwrap();
        assert_eq!(
            unsubscribed.lock().unwrap().as_slice(),
            &[SubscribeStrategy::Legacy]
        );
    }

    #[test]
    fn redundant_platform_events_notify_nobody() {
        let source = MockSource::new(SystemPreference::Dark);
        let callbacks = Arc::clone(&source.callbacks);
        let mut bridge = PreferenceBridge::new(Some(Box::new(source)));
        bridge.set_listening(true).unwrap();

        MockSource::fire(&callbacks, SystemPreference::Dark);
        assert!(bridge.poll_change().is_none());

        MockSource::fire(&callbacks, SystemPreference::Light);
        let change = bridge.poll_change().unwrap();
        assert_eq!(change.preference, SystemPreference::Light);
        assert_eq!(change.suggested_variant, Variant::Light);
        assert!(bridge.poll_change().is_none());
    }

    #[test]
    fn dark_always_suggests_the_darkest_default() {
        assert_eq!(SystemPreference::Dark.suggested_variant(), Variant::Night);
        assert_eq!(SystemPreference::Light.suggested_variant(), Variant::Light);
    }

    #[test]
    fn retry_budget_is_bounded_until_reset() {
        let mut bridge = PreferenceBridge::new(None);
        // Construction already burned one attempt; exhaust the rest.
        for _ in 0..MAX_RETRIES {
            let _ = bridge.set_listening(true);
        }
        let err = bridge.set_listening(true).unwrap_err();
        assert!(err.to_string().contains("retry budget exhausted"));

        bridge.reset_error_state();
        // Still no source, but the bridge probes again instead of
        // short-circuiting.
        let err = bridge.set_listening(true).unwrap_err();
        assert!(!err.to_string().contains("retry budget exhausted"));
    }
}
