use super::palette::{BackgroundColors, Palette, SemanticColors, TextColors, UiColors};

/// The default dark variant. Deep indigo backgrounds with soft periwinkle
/// text, tuned for long writing sessions in low light.
pub static NIGHT: Palette = Palette {
    background: BackgroundColors {
        primary: "#1a1b26",
        secondary: "#16161e",
        tertiary: "#292e42",
    },
    text: TextColors {
        primary: "#c0caf5",
        secondary: "#a9b1d6",
        muted: "#565f89",
    },
    semantic: SemanticColors {
        red: "#f7768e",
        orange: "#ff9e64",
        yellow: "#e0af68",
        green: "#9ece6a",
        cyan: "#7dcfff",
        blue: "#7aa2f7",
        purple: "#bb9af7",
    },
    ui: UiColors {
        border: "#3b4261",
        hover: "#292e42",
        selection: "#283457",
        focus: "#7aa2f7",
    },
    display_name: "Nightshade",
    is_dark: true,
};
