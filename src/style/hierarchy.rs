use std::any::Any;

use super::{GeneratorState, StyleConcern, StyleGenerator};
use crate::color::rgba;
use crate::contrast::{
    ContrastPair, ContrastReport, MIN_FOCUS_INDICATOR, MIN_PRIMARY_TEXT, MIN_SECONDARY_TEXT,
};
use crate::sink::SharedSink;
use crate::theme::{palette_for, Variant};

/// Styles for the structural hierarchy of a note: heading levels, nested
/// block indentation and block selection.
pub struct HierarchyStyles {
    state: GeneratorState,
}

impl HierarchyStyles {
    /// Create the generator at the given variant.
    pub fn new(variant: Variant, sink: SharedSink) -> Self {
        Self {
            state: GeneratorState::new(StyleConcern::Hierarchy, variant, sink),
        }
    }
}

impl StyleGenerator for HierarchyStyles {
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
            r#"/* {name} hierarchy */
.orca-editor h1,
.orca-block[data-level="1"] > .orca-block-heading {{
  color: {blue} !important;
  border-bottom: 1px solid {border} !important;
}}
.orca-editor h2,
.orca-block[data-level="2"] > .orca-block-heading {{
  color: {cyan} !important;
}}
.orca-editor h3,
.orca-block[data-level="3"] > .orca-block-heading {{
  color: {purple} !important;
}}
.orca-editor h4,
.orca-editor h5,
.orca-editor h6 {{
  color: {secondary} !important;
}}
.orca-block .orca-block {{
  border-left: 1px solid {guide} !important;
}}
.orca-block .orca-block:hover {{
  border-left-color: {border} !important;
}}
.orca-block-selected,
.orca-block.orca-selected {{
  background-color: {selection} !important;
  outline: 1px solid {focus} !important;
}}
.orca-block-bullet {{
  color: {muted} !important;
}}
.orca-block-bullet:hover {{
  color: {focus} !important;
  background-color: {hover} !important;
}}
.orca-block-collapsed > .orca-block-bullet {{
  background-color: {guide} !important;
}}
"#,
            name = p.display_name,
            blue = p.semantic.blue,
            cyan = p.semantic.cyan,
            purple = p.semantic.purple,
            secondary = p.text.secondary,
            border = p.ui.border,
            guide = rgba(p.ui.border, 0.45),
            selection = p.ui.selection,
            focus = p.ui.focus,
            muted = p.text.muted,
            hover = p.ui.hover,
        )
    }

    fn validate_accessibility(&self) -> Option<ContrastReport> {
        let p = palette_for(self.variant());
        let mut pairs: Vec<ContrastPair> = Vec::new();
        ContrastReport::check_pair(
            &mut pairs,
            "primary text on primary background",
            p.text.primary,
            p.background.primary,
            MIN_PRIMARY_TEXT,
        );
        ContrastReport::check_pair(
            &mut pairs,
            "secondary text on secondary background",
            p.text.secondary,
            p.background.secondary,
            MIN_SECONDARY_TEXT,
        );
        ContrastReport::check_pair(
            &mut pairs,
            "focus indicator on primary background",
            p.ui.focus,
            p.background.primary,
            MIN_FOCUS_INDICATOR,
        );
        Some(ContrastReport::new("hierarchy", pairs))
    }
}
