use std::any::Any;

use super::{GeneratorState, StyleConcern, StyleGenerator};
use crate::color::rgba;
use crate::sink::SharedSink;
use crate::theme::{palette_for, Variant};

/// Styles for the plugin settings dialog rendered by the host.
pub struct SettingsModalStyles {
    state: GeneratorState,
}

impl SettingsModalStyles {
    /// Create the generator at the given variant.
    pub fn new(variant: Variant, sink: SharedSink) -> Self {
        Self {
            state: GeneratorState::new(StyleConcern::SettingsModal, variant, sink),
        }
    }
}

impl StyleGenerator for SettingsModalStyles {
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
            r#"/* {name} settings modal */
.orca-settings-modal {{
  color: {text} !important;
  background-color: {raised} !important;
  border: 1px solid {border} !important;
  box-shadow: 0 8px 32px {shadow} !important;
}}
.orca-settings-modal .orca-settings-title {{
  color: {text} !important;
  border-bottom: 1px solid {border} !important;
}}
.orca-settings-modal .orca-settings-label {{
  color: {secondary} !important;
}}
.orca-settings-modal .orca-settings-description {{
  color: {muted} !important;
}}
.orca-settings-modal .orca-toggle.orca-on {{
  background-color: {accent} !important;
}}
.orca-settings-modal .orca-toggle {{
  background-color: {border} !important;
}}
.orca-settings-backdrop {{
  background-color: {backdrop} !important;
}}
"#,
            name = p.display_name,
            text = p.text.primary,
            raised = p.background.tertiary,
            border = p.ui.border,
            shadow = rgba("#000000", if p.is_dark { 0.6 } else { 0.25 }),
            secondary = p.text.secondary,
            muted = p.text.muted,
            accent = p.semantic.blue,
            backdrop = rgba(p.background.primary, 0.7),
        )
    }
}
