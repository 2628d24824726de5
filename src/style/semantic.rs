use std::any::Any;

use super::{GeneratorState, StyleConcern, StyleGenerator};
use crate::color::rgba;
use crate::sink::SharedSink;
use crate::theme::{palette_for, Variant};

/// Styles for status and accent colors: tags, task states, toasts and
/// highlight chips.
pub struct SemanticStyles {
    state: GeneratorState,
}

impl SemanticStyles {
    /// Create the generator at the given variant.
    pub fn new(variant: Variant, sink: SharedSink) -> Self {
        Self {
            state: GeneratorState::new(StyleConcern::SemanticColors, variant, sink),
        }
    }
}

impl StyleGenerator for SemanticStyles {
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
        let mut css = format!("/* {} semantic colors */\n", p.display_name);
        for (role, color) in [
            ("red", p.semantic.red),
            ("orange", p.semantic.orange),
            ("yellow", p.semantic.yellow),
            ("green", p.semantic.green),
            ("cyan", p.semantic.cyan),
            ("blue", p.semantic.blue),
            ("purple", p.semantic.purple),
        ] {
            css.push_str(&format!(
                r#".orca-tag-{role} {{
  color: {color} !important;
  background-color: {chip} !important;
}}
"#,
                role = role,
                color = color,
                chip = rgba(color, 0.15),
            ));
        }
        css.push_str(&format!(
            r#".orca-task-done {{
  color: {green} !important;
}}
.orca-task-overdue {{
  color: {red} !important;
}}
.orca-task-pending {{
  color: {orange} !important;
}}
.orca-toast-error {{
  color: {red} !important;
  border-left: 3px solid {red} !important;
}}
.orca-toast-success {{
  color: {green} !important;
  border-left: 3px solid {green} !important;
}}
.orca-toast-warning {{
  color: {yellow} !important;
  border-left: 3px solid {yellow} !important;
}}
"#,
            green = p.semantic.green,
            red = p.semantic.red,
            orange = p.semantic.orange,
            yellow = p.semantic.yellow,
        ));
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{shared, MemorySink};

    #[test]
    fn every_semantic_role_gets_a_tag_rule() {
        let sink = shared(MemorySink::new());
        let generator = SemanticStyles::new(Variant::Light, sink);
        let css = generator.generate_css(Variant::Light);
        for role in ["red", "orange", "yellow", "green", "cyan", "blue", "purple"] {
            assert!(css.contains(&format!(".orca-tag-{role}")), "missing {role}");
        }
    }
}
