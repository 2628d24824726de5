#![warn(missing_docs)]

//! # Nightshade Theme Engine
//!
//! The engine of the Nightshade visual theme plugin for the Orca
//! note-taking application. It generates CSS text for the built-in theme
//! variants (night, storm, light), injects and removes style elements
//! through an abstract style sink, follows host settings and the host's
//! active-theme broadcast, and keeps the injected styles consistent when
//! anything in that pipeline fails.
//!
//! ## Overview
//!
//! The engine is built from a few components, leaf to root:
//!
//! - **[Palette registry](theme)**: pure lookup from a [Variant](theme::Variant)
//!   to its immutable [Palette](theme::Palette).
//! - **[Style generators](style)**: one per styling concern (hierarchy,
//!   typography, sidebar, components, semantic colors, base background,
//!   motion, settings modal), each producing CSS for the current variant
//!   and owning exactly one injected style node.
//! - **[Contrast checker](contrast)**: WCAG contrast ratios, surfaced as
//!   advisory accessibility reports.
//! - **[Preference bridge](bridge)**: the platform light/dark signal, with
//!   modern/legacy subscription fallback and bounded retries.
//! - **[Variant manager](manager)**: the single source of truth for the
//!   current variant; walks every generator in a fixed order and rolls the
//!   whole set back when a switch fails partway.
//! - **[Error supervisor](supervisor)**: bounded error log, deduplication,
//!   recovery strategies and the static fallback stylesheet.
//! - **[System integrator](integrator)**: the composition root wired to the
//!   host's capability set, exposing the plugin's load/unload lifecycle.
//!
//! The host application's theme registry, settings API, broadcast channel,
//! platform preference signal and the document itself are external
//! collaborators modeled as traits in [host], [bridge] and [sink]; the
//! crate ships in-memory implementations for headless use and tests.
//!
//! ## Quick Start
//!
//! ```rust
//! use nightshade_theme::config::ThemeConfig;
//! use nightshade_theme::integrator::SystemIntegrator;
//! use nightshade_theme::sink::{shared, MemorySink};
//! use nightshade_theme::theme::Variant;
//!
//! // Compose the engine against an in-memory sink; host APIs are optional.
//! let sink = shared(MemorySink::new());
//! let mut integrator =
//!     SystemIntegrator::new(sink.clone(), None, None, None, ThemeConfig::default());
//!
//! // Load applies the default variant and injects every style node.
//! integrator.load().unwrap();
//! assert_eq!(integrator.current_variant(), Variant::Night);
//!
//! // Switching re-renders every concern; a failure would roll all of
//! // them back to night.
//! integrator.switch_variant(Variant::Storm).unwrap();
//! assert_eq!(integrator.current_variant(), Variant::Storm);
//! ```
//!
//! ## Configuration
//!
//! The default and fallback variants and the auto-switch start state come
//! from [config::ThemeConfig]: programmatically, from a TOML file, or from
//! environment variables:
//!
//! ```bash
//! export NIGHTSHADE_THEME=storm          # default variant
//! export NIGHTSHADE_THEME_FALLBACK=night # forced during recovery
//! export NIGHTSHADE_THEME_CONFIG=nightshade.toml
//! ```
//!
//! ## Failure model
//!
//! Every fallible operation returns a [ThemeResult](error::ThemeResult).
//! A variant switch that fails mid-sequence restores the previous variant
//! on every generator that had already advanced and re-raises the original
//! error; the [supervisor](supervisor::ErrorSupervisor) records the event,
//! runs a bounded recovery, and as a last resort forces the fallback
//! variant plus a static, self-contained stylesheet so the host never
//! renders fully unstyled.

/// The plugin's stable identifier, used to scope style-element ids and as
/// the id reported to the host.
pub const PLUGIN_ID: &str = "nightshade-theme";

/// Contains the system-preference bridge around the platform light/dark signal.
pub mod bridge;
/// Contains hex color parsing and the shade math used by the generators.
pub mod color;
/// Contains the [config::ThemeConfig] struct for engine configuration.
pub mod config;
/// Contains WCAG contrast checking and the advisory accessibility report.
pub mod contrast;
/// Contains the error taxonomy, [error::ThemeError] and [error::ErrorEvent].
pub mod error;
/// Contains the host-facing traits, settings types and the capability probe.
pub mod host;
/// Contains the [integrator::SystemIntegrator] composition root.
pub mod integrator;
/// Contains the [manager::VariantManager] and its rollback logic.
pub mod manager;
/// Contains the [sink::StyleSink] trait and the in-memory sink.
pub mod sink;
/// Contains the style generators and their shared injection contract.
pub mod style;
/// Contains error recovery, health scoring and the fallback stylesheet.
pub mod supervisor;
/// Contains the [theme::Variant] identifier and the built-in palettes.
pub mod theme;
