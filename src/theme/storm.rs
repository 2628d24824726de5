use super::palette::{BackgroundColors, Palette, SemanticColors, TextColors, UiColors};

/// The softened dark variant. Same accents as night on a lifted slate
/// background, for dim rather than dark rooms.
pub static STORM: Palette = Palette {
    background: BackgroundColors {
        primary: "#24283b",
        secondary: "#1f2335",
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
        hover: "#2e3450",
        selection: "#364a82",
        focus: "#7aa2f7",
    },
    display_name: "Nightshade Storm",
    is_dark: true,
};
