use serde::Serialize;

use crate::color::is_well_formed_hex;

/// Background colors, from the canvas outward.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BackgroundColors {
    /// Main editor/canvas background.
    pub primary: &'static str,
    /// Panels, code blocks, raised surfaces.
    pub secondary: &'static str,
    /// Popovers, hover layers, highest surfaces.
    pub tertiary: &'static str,
}

/// Text colors by emphasis.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TextColors {
    /// Body text.
    pub primary: &'static str,
    /// Secondary labels.
    pub secondary: &'static str,
    /// Placeholders, timestamps, disabled text.
    pub muted: &'static str,
}

/// Semantic/status accent colors.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SemanticColors {
    /// Errors, deletions.
    pub red: &'static str,
    /// Warnings, pending states.
    pub orange: &'static str,
    /// Highlights, attention.
    pub yellow: &'static str,
    /// Success, additions.
    pub green: &'static str,
    /// Links, informational accents.
    pub cyan: &'static str,
    /// Primary accent.
    pub blue: &'static str,
    /// Tags, secondary accent.
    pub purple: &'static str,
}

/// Chrome colors for borders and interaction states.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UiColors {
    /// Separators and outlines.
    pub border: &'static str,
    /// Hover surfaces.
    pub hover: &'static str,
    /// Text/block selection.
    pub selection: &'static str,
    /// Focus indicator.
    pub focus: &'static str,
}

/// An immutable set of named colors for one theme variant.
///
/// Palettes are constructed once as statics, looked up by
/// [Variant](super::Variant), and never mutated. Every color is a 6-digit
/// lowercase hex string with a leading `#`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Palette {
    /// Background color group.
    pub background: BackgroundColors,
    /// Text color group.
    pub text: TextColors,
    /// Semantic color group.
    pub semantic: SemanticColors,
    /// UI chrome color group.
    pub ui: UiColors,
    /// Name shown to the user in the host theme picker.
    pub display_name: &'static str,
    /// Whether the variant is a dark theme.
    pub is_dark: bool,
}

impl Palette {
    /// Every color in the palette, for validation and diagnostics.
    pub fn all_colors(&self) -> [&'static str; 17] {
        [
            self.background.primary,
            self.background.secondary,
            self.background.tertiary,
            self.text.primary,
            self.text.secondary,
            self.text.muted,
            self.semantic.red,
            self.semantic.orange,
            self.semantic.yellow,
            self.semantic.green,
            self.semantic.cyan,
            self.semantic.blue,
            self.semantic.purple,
            self.ui.border,
            self.ui.hover,
            self.ui.selection,
            self.ui.focus,
        ]
    }

    /// Whether every color is a well-formed `#rrggbb` value.
    pub fn is_complete(&self) -> bool {
        self.all_colors().iter().all(|c| is_well_formed_hex(c))
    }
}
