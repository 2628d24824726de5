use std::any::Any;

use super::{GeneratorState, StyleConcern, StyleGenerator};
use crate::color::rgba;
use crate::sink::SharedSink;
use crate::theme::{palette_for, Variant};

/// Styles for the navigation sidebar.
///
/// The tinted background can be turned off through the host settings
/// (`enableSidebarColor`); the item and text rules stay either way.
pub struct SidebarStyles {
    state: GeneratorState,
    colored: bool,
}

impl SidebarStyles {
    /// Create the generator at the given variant, with the tinted
    /// background enabled.
    pub fn new(variant: Variant, sink: SharedSink) -> Self {
        Self {
            state: GeneratorState::new(StyleConcern::Sidebar, variant, sink),
            colored: true,
        }
    }

    /// Whether the tinted background is enabled.
    pub fn is_colored(&self) -> bool {
        self.colored
    }

    /// Toggle the tinted background and re-inject.
    pub fn set_colored(&mut self, colored: bool) -> crate::error::ThemeResult<()> {
        if self.colored == colored {
            return Ok(());
        }
        self.colored = colored;
        self.apply()
    }
}

impl StyleGenerator for SidebarStyles {
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
        let surface = if self.colored {
            format!(
                r#".orca-sidebar {{
  background-color: {bg} !important;
  border-right: 1px solid {border} !important;
}}
"#,
                bg = p.background.secondary,
                border = p.ui.border,
            )
        } else {
            String::new()
        };
        format!(
            r#"/* {name} sidebar */
{surface}.orca-sidebar,
.orca-sidebar-section-title {{
  color: {secondary} !important;
}}
.orca-sidebar-item {{
  color: {secondary} !important;
}}
.orca-sidebar-item:hover {{
  color: {text} !important;
  background-color: {hover} !important;
}}
.orca-sidebar-item.orca-active {{
  color: {text} !important;
  background-color: {selection} !important;
  border-left: 2px solid {focus} !important;
}}
.orca-sidebar-item .orca-sidebar-icon {{
  color: {muted} !important;
}}
.orca-sidebar-item.orca-active .orca-sidebar-icon {{
  color: {focus} !important;
}}
.orca-sidebar-count {{
  color: {muted} !important;
  background-color: {badge} !important;
}}
.orca-sidebar-resizer:hover {{
  background-color: {focus} !important;
}}
"#,
            name = p.display_name,
            surface = surface,
            secondary = p.text.secondary,
            text = p.text.primary,
            hover = p.ui.hover,
            selection = p.ui.selection,
            focus = p.ui.focus,
            muted = p.text.muted,
            badge = rgba(p.ui.border, 0.35),
        )
    }
}
