//! # Error/Health Supervisor
//!
//! Keeps the bounded, timestamped error log, deduplicates cascades, runs
//! kind-specific handlers and recovery strategies, and scores overall
//! system health. Recovery actions run against a [RecoveryHost] — the
//! variant manager in production — so the supervisor never owns the
//! components it repairs.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::error::{ErrorEvent, ErrorKind, Severity, ThemeError, ThemeResult};
use crate::theme::Variant;

/// Same-kind events inside this window count toward dedup.
const DEDUP_WINDOW: Duration = Duration::from_secs(5);
/// Same-kind events allowed per window before new ones are dropped.
const DEDUP_LIMIT: usize = 3;
/// Log size that triggers trimming.
const LOG_HARD_CAP: usize = 100;
/// Entries kept after a trim.
const LOG_TRIM_TO: usize = 50;
/// Window for the "error burst" health penalty.
const HEALTH_WINDOW: Duration = Duration::from_secs(300);
/// Errors inside the window before the burst penalty applies.
const HEALTH_ERROR_BURST: usize = 5;

/// Static safety net injected when recovery fails: enough base background,
/// sidebar, button and input styling that the host never renders fully
/// unstyled. Self-contained on purpose — it must not depend on the
/// generation pipeline that just failed.
pub const FALLBACK_CSS: &str = r#"/* nightshade fallback */
body,
.orca-app,
.orca-main {
  background-color: #1a1b26 !important;
  color: #c0caf5 !important;
}
.orca-sidebar {
  background-color: #16161e !important;
  color: #a9b1d6 !important;
}
.orca-button {
  color: #c0caf5 !important;
  background-color: #16161e !important;
  border: 1px solid #3b4261 !important;
}
.orca-input,
.orca-textarea {
  color: #c0caf5 !important;
  background-color: #16161e !important;
  border: 1px solid #3b4261 !important;
}
"#;

/// Best-effort repair surface the supervisor drives during recovery.
pub trait RecoveryHost {
    /// Force-switch to the configured default variant.
    fn force_default_variant(&mut self, variant: Variant) -> ThemeResult<()>;

    /// Inject the static fallback stylesheet.
    fn inject_fallback_css(&mut self, css: &str) -> ThemeResult<()>;

    /// Reset whatever component the error kind points at.
    fn reset_component(&mut self, kind: ErrorKind) -> ThemeResult<()>;
}

/// Kind-specific handler; returns `true` when it resolved the condition.
pub type ErrorHandler = Box<dyn FnMut(&ErrorEvent) -> bool + Send>;

/// Kind-specific recovery strategy run against the [RecoveryHost].
pub type RecoveryStrategy =
    Box<dyn FnMut(&ErrorEvent, &mut dyn RecoveryHost) -> ThemeResult<()> + Send>;

/// Snapshot of overall system health.
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// 0–100 score after penalties.
    pub score: i32,
    /// Score ≥ 70 and no Critical errors present.
    pub is_healthy: bool,
    /// Human-readable reasons for each penalty.
    pub issues: Vec<String>,
}

/// Records structured error events, retries recovery within bounds, and
/// applies fallback measures when recovery cannot restore a working state.
pub struct ErrorSupervisor {
    log: Vec<ErrorEvent>,
    handlers: HashMap<ErrorKind, ErrorHandler>,
    strategies: HashMap<ErrorKind, RecoveryStrategy>,
    recovery_in_progress: bool,
    fallback_variant: Variant,
    component_ready: IndexMap<String, bool>,
    dom_ready: bool,
    host_api_available: bool,
}

impl ErrorSupervisor {
    /// Create a supervisor that falls back to the given variant.
    pub fn new(fallback_variant: Variant) -> Self {
        Self {
            log: Vec::new(),
            handlers: HashMap::new(),
            strategies: HashMap::new(),
            recovery_in_progress: false,
            fallback_variant,
            component_ready: IndexMap::new(),
            dom_ready: true,
            host_api_available: true,
        }
    }

    /// Register a handler for an error kind, replacing any previous one.
    pub fn register_handler(&mut self, kind: ErrorKind, handler: ErrorHandler) {
        self.handlers.insert(kind, handler);
    }

    /// Register a recovery strategy for an error kind.
    pub fn register_strategy(&mut self, kind: ErrorKind, strategy: RecoveryStrategy) {
        self.strategies.insert(kind, strategy);
    }

    /// Report an error with its operation context.
    pub fn report_error(&mut self, error: &ThemeError, context: &str, host: &mut dyn RecoveryHost) {
        self.report(ErrorEvent::from_error(error, context), host);
    }

    /// Report a prebuilt event.
    ///
    /// Three or more same-kind events within the last five seconds mean
    /// the new one is dropped (logged only) to stop cascades. Otherwise
    /// the event is appended, its handler is invoked, and — when nothing
    /// resolved it — a single-flight recovery is attempted.
    pub fn report(&mut self, event: ErrorEvent, host: &mut dyn RecoveryHost) {
        let now = event.timestamp;
        let recent_same = self
            .log
            .iter()
            .filter(|e| e.kind == event.kind && now.duration_since(e.timestamp) <= DEDUP_WINDOW)
            .count();
        if recent_same >= DEDUP_LIMIT {
            log::debug!(
                "suppressed duplicate {} event ({} recent): {}",
                event.kind.as_str(),
                recent_same,
                event.message
            );
            return;
        }

        match event.severity {
            Severity::Critical | Severity::High => {
                log::error!("[{}] {} ({})", event.kind.as_str(), event.message, event.context)
            }
            _ => log::warn!("[{}] {} ({})", event.kind.as_str(), event.message, event.context),
        }

        let kind = event.kind;
        let index = self.append(event);

        let handled = match self.handlers.get_mut(&kind) {
            Some(handler) => handler(&self.log[index]),
            None => false,
        };
        if handled {
            return;
        }
        if self.recovery_in_progress {
            log::debug!("recovery already in progress; deferring {}", kind.as_str());
            return;
        }
        self.attempt_recovery(index, host);
    }

    /// Run the recovery strategy for the event at `index`, recording the
    /// outcome on the stored event and applying fallback measures when the
    /// strategy is absent or fails.
    fn attempt_recovery(&mut self, index: usize, host: &mut dyn RecoveryHost) {
        self.recovery_in_progress = true;
        let event = self.log[index].clone();
        let kind = event.kind;

        let result = match self.strategies.get_mut(&kind) {
            Some(strategy) => strategy(&event, host),
            None => Err(ThemeError::recovery(format!(
                "no recovery strategy for {}",
                kind.as_str()
            ))),
        };
        let succeeded = result.is_ok();

        if let Some(stored) = self.log.get_mut(index) {
            stored.recovery_attempted = true;
            stored.recovery_successful = succeeded;
        }

        if let Err(err) = result {
            log::warn!("recovery for {} failed: {err}", kind.as_str());
            self.apply_fallback_measures(host);
        } else {
            log::debug!("recovery for {} succeeded", kind.as_str());
        }
        self.recovery_in_progress = false;
    }

    /// Force the default variant and inject the static fallback sheet.
    fn apply_fallback_measures(&mut self, host: &mut dyn RecoveryHost) {
        log::warn!(
            "applying fallback measures: forcing '{}' and injecting the fallback stylesheet",
            self.fallback_variant
        );
        if let Err(err) = host.force_default_variant(self.fallback_variant) {
            log::error!("fallback variant switch failed: {err}");
        }
        if let Err(err) = host.inject_fallback_css(FALLBACK_CSS) {
            log::error!("fallback stylesheet injection failed: {err}");
        }
    }

    fn append(&mut self, event: ErrorEvent) -> usize {
        self.log.push(event);
        if self.log.len() > LOG_HARD_CAP {
            let excess = self.log.len() - LOG_TRIM_TO;
            self.log.drain(..excess);
        }
        self.log.len() - 1
    }

    /// Mark a component ready or not for health scoring.
    pub fn set_component_ready(&mut self, component: impl Into<String>, ready: bool) {
        self.component_ready.insert(component.into(), ready);
    }

    /// Record whether the document is ready.
    pub fn set_dom_ready(&mut self, ready: bool) {
        self.dom_ready = ready;
    }

    /// Record whether the host API surface is reachable.
    pub fn set_host_api_available(&mut self, available: bool) {
        self.host_api_available = available;
    }

    /// Score system health from the log and readiness flags.
    pub fn system_health(&self) -> SystemHealth {
        let mut score = 100i32;
        let mut issues = Vec::new();
        let now = Instant::now();

        let recent = self
            .log
            .iter()
            .filter(|e| now.duration_since(e.timestamp) <= HEALTH_WINDOW)
            .count();
        if recent > HEALTH_ERROR_BURST {
            score -= 20;
            issues.push(format!("{recent} errors in the last 5 minutes"));
        }

        let critical = self.log.iter().any(|e| e.severity == Severity::Critical);
        if critical {
            score -= 30;
            issues.push("critical error present".to_string());
        }

        for (component, ready) in &self.component_ready {
            if !ready {
                score -= 10;
                issues.push(format!("component '{component}' not ready"));
            }
        }
        if !self.dom_ready {
            score -= 15;
            issues.push("document not ready".to_string());
        }
        if !self.host_api_available {
            score -= 15;
            issues.push("host API unavailable".to_string());
        }

        let score = score.max(0);
        SystemHealth {
            score,
            is_healthy: score >= 70 && !critical,
            issues,
        }
    }

    /// The recorded events, oldest first.
    pub fn error_log(&self) -> &[ErrorEvent] {
        &self.log
    }

    /// Whether a recovery is currently in flight.
    pub fn recovery_in_progress(&self) -> bool {
        self.recovery_in_progress
    }

    /// Drop all recorded events.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    #[cfg(test)]
    fn append_raw(&mut self, event: ErrorEvent) {
        self.append(event);
    }

    #[cfg(test)]
    fn set_recovery_in_progress(&mut self, value: bool) {
        self.recovery_in_progress = value;
    }
}
