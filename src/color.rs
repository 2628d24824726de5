//! Color helpers for CSS generation.
//!
//! Palette colors are 6-digit hex strings end to end; this module provides
//! the parsing and the small amount of shade math the style generators need
//! to derive hover/selection overlays from palette values.

/// An sRGB color decomposed into 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Parse a hex color string. Accepts `#rrggbb` and the `#rgb` shorthand;
    /// returns `None` for anything else.
    pub fn parse(color: &str) -> Option<Self> {
        let color = color.trim().trim_start_matches('#');

        // Expand shorthand (e.g. "fff" -> "ffffff")
        let color = if color.len() == 3 {
            color.chars().flat_map(|c| [c, c]).collect::<String>()
        } else {
            color.to_string()
        };

        if color.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&color[0..2], 16).ok()?;
        let g = u8::from_str_radix(&color[2..4], 16).ok()?;
        let b = u8::from_str_radix(&color[4..6], 16).ok()?;

        Some(Self { r, g, b })
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Whether a string is a well-formed 6-digit hex color with leading `#`.
pub fn is_well_formed_hex(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// CSS `rgba()` string for a hex color at the given opacity.
///
/// Falls back to the input unchanged when it does not parse; palette values
/// are validated at construction so that path only fires on caller error.
pub fn rgba(color: &str, alpha: f64) -> String {
    match Rgb::parse(color) {
        Some(rgb) => format!(
            "rgba({}, {}, {}, {:.3})",
            rgb.r,
            rgb.g,
            rgb.b,
            alpha.clamp(0.0, 1.0)
        ),
        None => color.to_string(),
    }
}

/// Blend two hex colors, `weight` being the share of `b` in the result.
pub fn mix(a: &str, b: &str, weight: f64) -> String {
    let (Some(a), Some(b)) = (Rgb::parse(a), Rgb::parse(b)) else {
        return a.to_string();
    };
    let t = weight.clamp(0.0, 1.0);
    Rgb {
        r: lerp(a.r, b.r, t),
        g: lerp(a.g, b.g, t),
        b: lerp(a.b, b.b, t),
    }
    .to_hex()
}

fn lerp(start: u8, end: u8, t: f64) -> u8 {
    (f64::from(start) + (f64::from(end) - f64::from(start)) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_shorthand_hex() {
        assert_eq!(Rgb::parse("#1a1b26"), Some(Rgb { r: 0x1a, g: 0x1b, b: 0x26 }));
        assert_eq!(Rgb::parse("fff"), Some(Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(Rgb::parse("#12345"), None);
        assert_eq!(Rgb::parse("#gggggg"), None);
    }

    #[test]
    fn hex_round_trip_is_lowercase() {
        let rgb = Rgb::parse("#C0CAF5").unwrap();
        assert_eq!(rgb.to_hex(), "#c0caf5");
    }

    #[test]
    fn well_formed_hex_rejects_shorthand() {
        assert!(is_well_formed_hex("#1a1b26"));
        assert!(!is_well_formed_hex("#fff"));
        assert!(!is_well_formed_hex("1a1b26"));
    }

    #[test]
    fn mix_endpoints_return_inputs() {
        assert_eq!(mix("#000000", "#ffffff", 0.0), "#000000");
        assert_eq!(mix("#000000", "#ffffff", 1.0), "#ffffff");
        assert_eq!(mix("#000000", "#ffffff", 0.5), "#808080");
    }

    #[test]
    fn rgba_clamps_alpha() {
        assert_eq!(rgba("#ff0000", 2.0), "rgba(255, 0, 0, 1.000)");
    }
}
