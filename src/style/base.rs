use std::any::Any;

use super::{GeneratorState, StyleConcern, StyleGenerator};
use crate::error::ThemeResult;
use crate::sink::SharedSink;
use crate::theme::{palette_for, Variant};

/// The base background: application canvas, default text color and text
/// selection.
///
/// Users who prefer the host's own background can turn this generator off
/// (`enableBaseBackground`); the owned node is then removed rather than
/// injected empty.
pub struct BaseStyles {
    state: GeneratorState,
    enabled: bool,
}

impl BaseStyles {
    /// Create the generator at the given variant, enabled.
    pub fn new(variant: Variant, sink: SharedSink) -> Self {
        Self {
            state: GeneratorState::new(StyleConcern::BaseBackground, variant, sink),
            enabled: true,
        }
    }

    /// Whether the base background is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle the base background, re-injecting or removing the node.
    pub fn set_enabled(&mut self, enabled: bool) -> ThemeResult<()> {
        if self.enabled == enabled {
            return Ok(());
        }
        self.enabled = enabled;
        self.apply()
    }
}

impl StyleGenerator for BaseStyles {
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
        let p = palette_for(variant);
        format!(
            r#"/* {name} base */
body,
.orca-app,
.orca-main {{
  color: {text} !important;
  background-color: {bg} !important;
}}
.orca-panel {{
  background-color: {panel} !important;
  border-color: {border} !important;
}}
::selection {{
  background-color: {selection} !important;
}}
.orca-headbar {{
  background-color: {bg} !important;
  border-bottom: 1px solid {border} !important;
}}
"#,
            name = p.display_name,
            text = p.text.primary,
            bg = p.background.primary,
            panel = p.background.secondary,
            border = p.ui.border,
            selection = p.ui.selection,
        )
    }

    fn apply(&mut self) -> ThemeResult<()> {
        if self.enabled {
            let css = self.generate_css(self.variant());
            self.state_mut().inject(&css)
        } else {
            self.state_mut().clear()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{shared, MemorySink};

    #[test]
    fn night_base_carries_the_canvas_color() {
        let sink = shared(MemorySink::new());
        let generator = BaseStyles::new(Variant::Night, sink);
        assert!(generator.generate_css(Variant::Night).contains("#1a1b26"));
    }

    #[test]
    fn disabling_removes_the_owned_node() {
        let sink = shared(MemorySink::new());
        let mut generator = BaseStyles::new(Variant::Night, sink.clone());
        generator.apply().unwrap();
        assert!(generator.is_injected());

        generator.set_enabled(false).unwrap();
        assert!(!generator.is_injected());
        assert_eq!(sink.read().unwrap().len(), 0);

        // Re-enabling injects again; update_variant keeps respecting the
        // disabled state in between.
        generator.set_enabled(true).unwrap();
        assert!(generator.is_injected());
    }

    #[test]
    fn update_variant_respects_disabled_state() {
        let sink = shared(MemorySink::new());
        let mut generator = BaseStyles::new(Variant::Night, sink.clone());
        generator.set_enabled(false).unwrap();
        generator.update_variant(Variant::Light).unwrap();
        assert_eq!(sink.read().unwrap().len(), 0);
        assert_eq!(generator.variant(), Variant::Light);
    }
}
