use super::palette::{BackgroundColors, Palette, SemanticColors, TextColors, UiColors};

/// The light variant. Cool gray paper with the night accents darkened far
/// enough to hold contrast on a bright background.
pub static LIGHT: Palette = Palette {
    background: BackgroundColors {
        primary: "#d5d6db",
        secondary: "#e1e2e7",
        tertiary: "#c8c9ce",
    },
    text: TextColors {
        primary: "#343b58",
        secondary: "#484c61",
        muted: "#8990b3",
    },
    semantic: SemanticColors {
        red: "#8c4351",
        orange: "#965027",
        yellow: "#8f5e15",
        green: "#485e30",
        cyan: "#166775",
        blue: "#34548a",
        purple: "#5a4a78",
    },
    ui: UiColors {
        border: "#a8aecb",
        hover: "#c4c8da",
        selection: "#b7c1e3",
        focus: "#34548a",
    },
    display_name: "Nightshade Light",
    is_dark: false,
};
