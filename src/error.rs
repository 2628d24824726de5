//! # Theme Error Types
//!
//! This module provides the error types for the theme engine: the closed
//! [ErrorKind] taxonomy, per-error [Severity] levels, the [ThemeError] enum
//! raised by fallible operations, and the [ErrorEvent] record kept by the
//! error supervisor.

use std::time::Instant;

use thiserror::Error;

/// The closed taxonomy of error kinds tracked by the error supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A theme resource or palette failed to load.
    ThemeLoadingFailed,
    /// A variant switch could not be completed.
    VariantSwitchFailed,
    /// A style node could not be created, updated or removed.
    DomOperationFailed,
    /// A required host API is missing or rejected a call.
    HostApiUnavailable,
    /// Wiring the composed system together failed.
    SystemIntegrationFailed,
    /// A style generator failed to update to a new variant.
    ComponentUpdateFailed,
    /// Internal state failed a validation check.
    StateValidationFailed,
    /// A recovery attempt itself failed.
    RecoveryFailed,
}

impl ErrorKind {
    /// Stable identifier used in logs and error contexts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThemeLoadingFailed => "theme-loading-failed",
            Self::VariantSwitchFailed => "variant-switch-failed",
            Self::DomOperationFailed => "dom-operation-failed",
            Self::HostApiUnavailable => "host-api-unavailable",
            Self::SystemIntegrationFailed => "system-integration-failed",
            Self::ComponentUpdateFailed => "component-update-failed",
            Self::StateValidationFailed => "state-validation-failed",
            Self::RecoveryFailed => "recovery-failed",
        }
    }
}

/// Severity attached to every reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Cosmetic or advisory.
    Low,
    /// Degraded behavior, no user-visible breakage expected.
    Medium,
    /// User-visible breakage in one concern.
    High,
    /// The styling pipeline as a whole is at risk.
    Critical,
}

/// Errors that can occur in the theme engine.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// The given identifier names no registered variant.
    #[error("unknown theme variant '{name}'")]
    InvalidVariant {
        /// The identifier that failed to resolve.
        name: String,
    },

    /// A host API required by the operation is absent or failing.
    #[error("host API unavailable: {api}")]
    HostApiUnavailable {
        /// Which host capability was missing.
        api: String,
    },

    /// A style-sink mutation failed.
    #[error("style injection failed for '{concern}': {details}")]
    DomOperation {
        /// The style concern whose node was being mutated.
        concern: String,
        /// Details from the failing sink.
        details: String,
    },

    /// A style generator failed to regenerate or re-inject its CSS.
    #[error("component '{component}' failed to update: {details}")]
    ComponentUpdate {
        /// The failing generator's concern.
        component: String,
        /// Details about the failure.
        details: String,
    },

    /// A variant switch failed and was rolled back.
    #[error("switch to variant '{target}' failed: {source}")]
    VariantSwitch {
        /// The variant that could not be applied.
        target: String,
        /// The error that interrupted the switch sequence.
        #[source]
        source: Box<ThemeError>,
    },

    /// A second switch was issued while one was still in flight.
    #[error("a variant switch is already in progress")]
    SwitchInProgress,

    /// A theme resource could not be loaded.
    #[error("theme loading failed: {details}")]
    ThemeLoading {
        /// Details about the failure.
        details: String,
    },

    /// Composing or validating the integrated system failed.
    #[error("system integration failed: {details}")]
    SystemIntegration {
        /// Details about the failure.
        details: String,
    },

    /// Internal state failed validation.
    #[error("state validation failed: {details}")]
    StateValidation {
        /// What was expected and what was found.
        details: String,
    },

    /// A recovery action could not restore a working state.
    #[error("recovery failed: {details}")]
    Recovery {
        /// Details about the failed recovery.
        details: String,
    },
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create an invalid-variant error.
    pub fn invalid_variant(name: impl Into<String>) -> Self {
        Self::InvalidVariant { name: name.into() }
    }

    /// Create a host-API-unavailable error.
    pub fn host_api_unavailable(api: impl Into<String>) -> Self {
        Self::HostApiUnavailable { api: api.into() }
    }

    /// Create a DOM-operation error for a style concern.
    pub fn dom_operation(concern: impl Into<String>, details: impl Into<String>) -> Self {
        Self::DomOperation {
            concern: concern.into(),
            details: details.into(),
        }
    }

    /// Create a component-update error.
    pub fn component_update(component: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ComponentUpdate {
            component: component.into(),
            details: details.into(),
        }
    }

    /// Wrap an interrupting error into a variant-switch failure.
    pub fn variant_switch(target: impl Into<String>, source: ThemeError) -> Self {
        Self::VariantSwitch {
            target: target.into(),
            source: Box::new(source),
        }
    }

    /// Create a state-validation error.
    pub fn state_validation(details: impl Into<String>) -> Self {
        Self::StateValidation {
            details: details.into(),
        }
    }

    /// Create a recovery error.
    pub fn recovery(details: impl Into<String>) -> Self {
        Self::Recovery {
            details: details.into(),
        }
    }

    /// The taxonomy kind this error maps into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidVariant { .. } => ErrorKind::StateValidationFailed,
            Self::HostApiUnavailable { .. } => ErrorKind::HostApiUnavailable,
            Self::DomOperation { .. } => ErrorKind::DomOperationFailed,
            Self::ComponentUpdate { .. } => ErrorKind::ComponentUpdateFailed,
            Self::VariantSwitch { .. } | Self::SwitchInProgress => ErrorKind::VariantSwitchFailed,
            Self::ThemeLoading { .. } => ErrorKind::ThemeLoadingFailed,
            Self::SystemIntegration { .. } => ErrorKind::SystemIntegrationFailed,
            Self::StateValidation { .. } => ErrorKind::StateValidationFailed,
            Self::Recovery { .. } => ErrorKind::RecoveryFailed,
        }
    }

    /// The default severity this error is reported at.
    pub fn severity(&self) -> Severity {
        match self {
            Self::InvalidVariant { .. } | Self::SwitchInProgress => Severity::Low,
            Self::HostApiUnavailable { .. } | Self::StateValidation { .. } => Severity::Medium,
            Self::DomOperation { .. } | Self::ComponentUpdate { .. } => Severity::High,
            Self::VariantSwitch { .. }
            | Self::ThemeLoading { .. }
            | Self::SystemIntegration { .. } => Severity::High,
            Self::Recovery { .. } => Severity::Critical,
        }
    }
}

/// A structured, timestamped record of a reported error.
///
/// Events are append-only once recorded; only the recovery outcome fields
/// are written after creation, by the supervisor that attempted recovery.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    /// Taxonomy kind of the underlying error.
    pub kind: ErrorKind,
    /// Severity the error was reported at.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// When the event was recorded.
    pub timestamp: Instant,
    /// Free-form context, usually the operation that was running.
    pub context: String,
    /// Whether a recovery was attempted for this event.
    pub recovery_attempted: bool,
    /// Whether the attempted recovery succeeded.
    pub recovery_successful: bool,
}

impl ErrorEvent {
    /// Build an event from an error plus the operation context.
    pub fn from_error(error: &ThemeError, context: impl Into<String>) -> Self {
        Self {
            kind: error.kind(),
            severity: error.severity(),
            message: error.to_string(),
            timestamp: Instant::now(),
            context: context.into(),
            recovery_attempted: false,
            recovery_successful: false,
        }
    }

    /// Build an event directly from its parts.
    pub fn new(kind: ErrorKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            timestamp: Instant::now(),
            context: String::new(),
            recovery_attempted: false,
            recovery_successful: false,
        }
    }
}
