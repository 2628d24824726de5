use std::any::Any;

use super::{GeneratorState, StyleConcern, StyleGenerator};
use crate::contrast::{
    ContrastPair, ContrastReport, MIN_CODE_TEXT, MIN_PRIMARY_TEXT, MIN_SECONDARY_TEXT,
};
use crate::sink::SharedSink;
use crate::theme::{palette_for, Variant};

/// Styles for reading text: body copy, links, inline code, code blocks and
/// quotes.
pub struct TypographyStyles {
    state: GeneratorState,
}

impl TypographyStyles {
    /// Create the generator at the given variant.
    pub fn new(variant: Variant, sink: SharedSink) -> Self {
        Self {
            state: GeneratorState::new(StyleConcern::Typography, variant, sink),
        }
    }
}

impl StyleGenerator for TypographyStyles {
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
            r#"/* {name} typography */
.orca-editor,
.orca-block-content {{
  color: {text} !important;
}}
.orca-editor a,
.orca-ref-link {{
  color: {cyan} !important;
  text-decoration-color: {cyan} !important;
}}
.orca-editor a:hover {{
  color: {blue} !important;
}}
.orca-editor code,
.orca-inline-code {{
  color: {code} !important;
  background-color: {code_bg} !important;
  border: 1px solid {border} !important;
}}
.orca-editor pre,
.orca-code-block {{
  color: {code} !important;
  background-color: {code_bg} !important;
  border: 1px solid {border} !important;
}}
.orca-editor blockquote {{
  color: {secondary} !important;
  border-left: 3px solid {orange} !important;
}}
.orca-editor mark {{
  color: {mark_text} !important;
  background-color: {yellow} !important;
}}
.orca-editor .orca-placeholder {{
  color: {muted} !important;
}}
"#,
            name = p.display_name,
            text = p.text.primary,
            cyan = p.semantic.cyan,
            blue = p.semantic.blue,
            code = p.text.primary,
            code_bg = p.background.secondary,
            border = p.ui.border,
            secondary = p.text.secondary,
            orange = p.semantic.orange,
            yellow = p.semantic.yellow,
            mark_text = p.background.primary,
            muted = p.text.muted,
        )
    }

    fn validate_accessibility(&self) -> Option<ContrastReport> {
        let p = palette_for(self.variant());
        let mut pairs: Vec<ContrastPair> = Vec::new();
        ContrastReport::check_pair(
            &mut pairs,
            "body text on primary background",
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
            "code text on code background",
            p.text.primary,
            p.background.secondary,
            MIN_CODE_TEXT,
        );
        Some(ContrastReport::new("typography", pairs))
    }
}
