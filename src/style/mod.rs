//! # Style Generators
//!
//! Each generator owns one styling concern: it produces CSS text for the
//! current variant and owns the single style node that makes that CSS
//! visible. Generators share a contract — [StyleGenerator] — and shared
//! injection bookkeeping — [GeneratorState] — so every concern gets the
//! same idempotency guarantees:
//!
//! - `generate_css` is pure: deterministic for a variant plus the
//!   generator's own configuration, and never touches the sink.
//! - `apply` regenerates and upserts the owned node; applying twice in a
//!   row leaves exactly one node with identical content.
//! - `remove` is idempotent when the node is already gone.
//! - `update_variant` is the only path by which visible output changes.

use std::any::Any;

use crate::contrast::ContrastReport;
use crate::error::ThemeResult;
use crate::sink::SharedSink;
use crate::theme::Variant;

/// Structural hierarchy styles.
pub mod hierarchy;
/// Typography styles.
pub mod typography;
/// Sidebar styles.
pub mod sidebar;
/// Generic UI component styles.
pub mod components;
/// Semantic/status color styles.
pub mod semantic;
/// Base background styles.
pub mod base;
/// Motion and animation styles.
pub mod motion;
/// Settings modal styles.
pub mod settings_modal;

pub use base::BaseStyles;
pub use components::ComponentStyles;
pub use hierarchy::HierarchyStyles;
pub use motion::MotionStyles;
pub use semantic::SemanticStyles;
pub use settings_modal::SettingsModalStyles;
pub use sidebar::SidebarStyles;
pub use typography::TypographyStyles;

/// A logical styling concern, each owning exactly one style node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleConcern {
    /// Heading levels and nested block structure.
    Hierarchy,
    /// Body text, code and links.
    Typography,
    /// The navigation sidebar.
    Sidebar,
    /// Buttons, inputs, menus and other generic chrome.
    UiComponents,
    /// Status and accent colors.
    SemanticColors,
    /// The application's base background.
    BaseBackground,
    /// Transitions and keyframe animations.
    Animations,
    /// The plugin settings dialog.
    SettingsModal,
    /// The static safety-net stylesheet.
    Fallback,
}

impl StyleConcern {
    /// Stable identifier used in element ids and error contexts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hierarchy => "hierarchy",
            Self::Typography => "typography",
            Self::Sidebar => "sidebar",
            Self::UiComponents => "components",
            Self::SemanticColors => "semantic-colors",
            Self::BaseBackground => "base-background",
            Self::Animations => "animations",
            Self::SettingsModal => "settings-modal",
            Self::Fallback => "fallback",
        }
    }

    /// Element id of the style node owned by this concern, scoped to the
    /// plugin so stale nodes from a prior session are recognizable.
    pub fn element_id(&self) -> String {
        format!("{}-{}", crate::PLUGIN_ID, self.as_str())
    }
}

impl std::fmt::Display for StyleConcern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ownership record binding a concern to at most one live style node.
#[derive(Debug)]
pub struct StyleHandle {
    concern: StyleConcern,
    element_id: String,
    injected: bool,
}

impl StyleHandle {
    /// Create a handle for a concern. No node exists until `upsert`.
    pub fn new(concern: StyleConcern) -> Self {
        Self {
            concern,
            element_id: concern.element_id(),
            injected: false,
        }
    }

    /// The concern this handle owns.
    pub fn concern(&self) -> StyleConcern {
        self.concern
    }

    /// The owned node's element id.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Whether the owned node is currently injected.
    pub fn is_injected(&self) -> bool {
        self.injected
    }

    /// Create or replace the owned node. Superseding any node with the
    /// same id is the sink's contract, so no duplicate can survive this.
    pub fn upsert(&mut self, sink: &SharedSink, css: &str) -> ThemeResult<()> {
        let mut guard = crate::sink::write_sink(sink, self.concern.as_str())?;
        guard.upsert(&self.element_id, css)?;
        self.injected = true;
        Ok(())
    }

    /// Remove the owned node. Idempotent when already removed, and also
    /// clears a stale node with the same id from a prior session.
    pub fn remove(&mut self, sink: &SharedSink) -> ThemeResult<()> {
        let mut guard = crate::sink::write_sink(sink, self.concern.as_str())?;
        guard.remove(&self.element_id)?;
        self.injected = false;
        Ok(())
    }
}

/// State shared by every generator: the cached variant, the owned style
/// handle, and the shared sink.
///
/// Generators hold a cached copy of the variant for their own CSS
/// generation only; the variant manager owns the authoritative value and
/// pushes updates through `update_variant`.
pub struct GeneratorState {
    variant: Variant,
    handle: StyleHandle,
    sink: SharedSink,
}

impl GeneratorState {
    /// Create state for a concern, starting at the given variant.
    pub fn new(concern: StyleConcern, variant: Variant, sink: SharedSink) -> Self {
        Self {
            variant,
            handle: StyleHandle::new(concern),
            sink,
        }
    }

    /// The cached variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Replace the cached variant without touching the sink.
    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
    }

    /// The owned style handle.
    pub fn handle(&self) -> &StyleHandle {
        &self.handle
    }

    /// Upsert the owned node with the given CSS.
    pub fn inject(&mut self, css: &str) -> ThemeResult<()> {
        self.handle.upsert(&self.sink, css)
    }

    /// Remove the owned node.
    pub fn clear(&mut self) -> ThemeResult<()> {
        self.handle.remove(&self.sink)
    }
}

/// Shared contract of every style generator.
pub trait StyleGenerator: Send {
    /// The generator's shared state.
    fn state(&self) -> &GeneratorState;

    /// The generator's shared state, mutably.
    fn state_mut(&mut self) -> &mut GeneratorState;

    /// Produce CSS text for the given variant. Pure: no sink access, same
    /// output for the same variant and generator configuration.
    fn generate_css(&self, variant: Variant) -> String;

    /// Downcasting hook for configuration toggles.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The concern this generator owns.
    fn concern(&self) -> StyleConcern {
        self.state().handle().concern()
    }

    /// The generator's cached variant.
    fn variant(&self) -> Variant {
        self.state().variant()
    }

    /// Whether the owned node is currently injected.
    fn is_injected(&self) -> bool {
        self.state().handle().is_injected()
    }

    /// Regenerate CSS for the cached variant and upsert the owned node.
    fn apply(&mut self) -> ThemeResult<()> {
        let css = self.generate_css(self.variant());
        self.state_mut().inject(&css)
    }

    /// Remove the owned node if present.
    fn remove(&mut self) -> ThemeResult<()> {
        self.state_mut().clear()
    }

    /// Update the cached variant, then apply.
    fn update_variant(&mut self, variant: Variant) -> ThemeResult<()> {
        self.state_mut().set_variant(variant);
        self.apply()
    }

    /// Advisory accessibility report; `Some` only for generators whose
    /// output carries reading text. Never blocks `apply`.
    fn validate_accessibility(&self) -> Option<ContrastReport> {
        None
    }
}

/// The full generator set in the fixed order the variant manager walks:
/// hierarchy, typography, sidebar, components, semantic colors, base
/// background, animations, settings modal. The same order every switch.
pub fn default_generators(variant: Variant, sink: &SharedSink) -> Vec<Box<dyn StyleGenerator>> {
    vec![
        Box::new(HierarchyStyles::new(variant, sink.clone())),
        Box::new(TypographyStyles::new(variant, sink.clone())),
        Box::new(SidebarStyles::new(variant, sink.clone())),
        Box::new(ComponentStyles::new(variant, sink.clone())),
        Box::new(SemanticStyles::new(variant, sink.clone())),
        Box::new(BaseStyles::new(variant, sink.clone())),
        Box::new(MotionStyles::new(variant, sink.clone())),
        Box::new(SettingsModalStyles::new(variant, sink.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{shared, MemorySink};

    fn sink_len(sink: &SharedSink) -> usize {
        sink.read().unwrap().len()
    }

    fn sink_content(sink: &SharedSink, id: &str) -> Option<String> {
        sink.read().unwrap().content(id)
    }

    #[test]
    fn element_ids_are_plugin_scoped() {
        assert_eq!(
            StyleConcern::Sidebar.element_id(),
            "nightshade-theme-sidebar"
        );
        assert_eq!(
            StyleConcern::SemanticColors.element_id(),
            "nightshade-theme-semantic-colors"
        );
    }

    #[test]
    fn double_apply_leaves_one_identical_node_per_concern() {
        let sink = shared(MemorySink::new());
        let mut generators = default_generators(Variant::Night, &sink);
        for generator in &mut generators {
            generator.apply().unwrap();
            let first = sink_content(&sink, generator.state().handle().element_id()).unwrap();
            generator.apply().unwrap();
            let second = sink_content(&sink, generator.state().handle().element_id()).unwrap();
            assert_eq!(first, second);
        }
        assert_eq!(sink_len(&sink), generators.len());
    }

    #[test]
    fn update_variant_round_trip_is_byte_identical() {
        let sink = shared(MemorySink::new());
        let mut generators = default_generators(Variant::Night, &sink);
        for generator in &mut generators {
            let fresh = generator.generate_css(Variant::Night);
            generator.update_variant(Variant::Night).unwrap();
            generator.update_variant(Variant::Storm).unwrap();
            generator.update_variant(Variant::Night).unwrap();
            let id = generator.state().handle().element_id().to_string();
            assert_eq!(sink_content(&sink, &id).unwrap(), fresh);
        }
    }

    #[test]
    fn remove_is_idempotent_per_generator() {
        let sink = shared(MemorySink::new());
        let mut generator = HierarchyStyles::new(Variant::Night, sink.clone());
        generator.apply().unwrap();
        assert!(generator.is_injected());
        generator.remove().unwrap();
        generator.remove().unwrap();
        assert!(!generator.is_injected());
        assert_eq!(sink_len(&sink), 0);
    }

    #[test]
    fn generated_css_differs_across_variants() {
        let sink = shared(MemorySink::new());
        for generator in default_generators(Variant::Night, &sink) {
            let night = generator.generate_css(Variant::Night);
            let light = generator.generate_css(Variant::Light);
            assert_ne!(night, light, "{} output is variant-blind", generator.concern());
        }
    }
}
