use std::any::Any;

use super::{GeneratorState, StyleConcern, StyleGenerator};
use crate::color::rgba;
use crate::sink::SharedSink;
use crate::theme::{palette_for, Variant};

/// Motion rules: hover/focus transitions, the block-reveal animation and a
/// reduced-motion escape hatch.
pub struct MotionStyles {
    state: GeneratorState,
}

impl MotionStyles {
    /// Create the generator at the given variant.
    pub fn new(variant: Variant, sink: SharedSink) -> Self {
        Self {
            state: GeneratorState::new(StyleConcern::Animations, variant, sink),
        }
    }
}

impl StyleGenerator for MotionStyles {
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
            r#"/* {name} motion */
.orca-sidebar-item,
.orca-button,
.orca-block-bullet {{
  transition: background-color 150ms ease, color 150ms ease,
    border-color 150ms ease !important;
}}
.orca-menu,
.orca-popup {{
  animation: nightshade-pop 120ms ease-out !important;
}}
@keyframes nightshade-pop {{
  from {{
    opacity: 0;
    transform: translateY(-4px);
  }}
  to {{
    opacity: 1;
    transform: translateY(0);
  }}
}}
.orca-block-highlighted {{
  animation: nightshade-flash 900ms ease-out !important;
}}
@keyframes nightshade-flash {{
  from {{
    background-color: {flash} !important;
  }}
  to {{
    background-color: transparent !important;
  }}
}}
@media (prefers-reduced-motion: reduce) {{
  .orca-sidebar-item,
  .orca-button,
  .orca-block-bullet,
  .orca-menu,
  .orca-popup,
  .orca-block-highlighted {{
    transition: none !important;
    animation: none !important;
  }}
}}
"#,
            name = p.display_name,
            flash = rgba(p.ui.selection, 0.8),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{shared, MemorySink};

    #[test]
    fn keyframes_are_plugin_prefixed() {
        let sink = shared(MemorySink::new());
        let generator = MotionStyles::new(Variant::Night, sink);
        let css = generator.generate_css(Variant::Night);
        assert!(css.contains("@keyframes nightshade-pop"));
        assert!(css.contains("prefers-reduced-motion"));
    }
}
