use std::any::Any;

use super::{GeneratorState, StyleConcern, StyleGenerator};
use crate::color::{mix, rgba};
use crate::sink::SharedSink;
use crate::theme::{palette_for, Variant};

/// Styles for generic UI chrome: buttons, inputs, menus, tooltips and
/// scrollbars.
pub struct ComponentStyles {
    state: GeneratorState,
}

impl ComponentStyles {
    /// Create the generator at the given variant.
    pub fn new(variant: Variant, sink: SharedSink) -> Self {
        Self {
            state: GeneratorState::new(StyleConcern::UiComponents, variant, sink),
        }
    }
}

impl StyleGenerator for ComponentStyles {
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
        // The pressed shade is derived rather than stored: palettes only
        // carry one accent per role.
        let pressed = mix(p.semantic.blue, p.background.primary, 0.25);
        format!(
            r#"/* {name} components */
.orca-button {{
  color: {text} !important;
  background-color: {surface} !important;
  border: 1px solid {border} !important;
}}
.orca-button:hover {{
  background-color: {hover} !important;
}}
.orca-button.orca-primary {{
  color: {on_accent} !important;
  background-color: {blue} !important;
  border-color: {blue} !important;
}}
.orca-button.orca-primary:active {{
  background-color: {pressed} !important;
}}
.orca-input,
.orca-textarea,
.orca-select {{
  color: {text} !important;
  background-color: {surface} !important;
  border: 1px solid {border} !important;
}}
.orca-input:focus,
.orca-textarea:focus,
.orca-select:focus {{
  border-color: {focus} !important;
  box-shadow: 0 0 0 2px {focus_ring} !important;
}}
.orca-input::placeholder {{
  color: {muted} !important;
}}
.orca-menu,
.orca-popup,
.orca-tooltip {{
  color: {text} !important;
  background-color: {raised} !important;
  border: 1px solid {border} !important;
}}
.orca-menu-item:hover {{
  background-color: {hover} !important;
}}
.orca-menu-separator {{
  background-color: {border} !important;
}}
::-webkit-scrollbar-thumb {{
  background-color: {border} !important;
}}
::-webkit-scrollbar-thumb:hover {{
  background-color: {muted} !important;
}}
"#,
            name = p.display_name,
            text = p.text.primary,
            surface = p.background.secondary,
            border = p.ui.border,
            hover = p.ui.hover,
            on_accent = p.background.primary,
            blue = p.semantic.blue,
            pressed = pressed,
            focus = p.ui.focus,
            focus_ring = rgba(p.ui.focus, 0.35),
            muted = p.text.muted,
            raised = p.background.tertiary,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{shared, MemorySink};

    #[test]
    fn pressed_shade_is_derived_from_the_accent() {
        let sink = shared(MemorySink::new());
        let generator = ComponentStyles::new(Variant::Night, sink);
        let css = generator.generate_css(Variant::Night);
        assert!(css.contains("#7aa2f7"));
        // Derived shade sits between accent and background.
        assert!(css.contains(&mix("#7aa2f7", "#1a1b26", 0.25)));
    }
}
