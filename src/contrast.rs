//! WCAG contrast checking.
//!
//! Implements the WCAG 2.x relative-luminance formula and the contrast
//! ratio built on it, plus the advisory [ContrastReport] the
//! accessibility-relevant style generators produce.

use crate::color::Rgb;

/// Minimum ratio for primary text on primary background.
pub const MIN_PRIMARY_TEXT: f64 = 4.5;
/// Minimum ratio for secondary text on secondary background.
pub const MIN_SECONDARY_TEXT: f64 = 3.0;
/// Minimum ratio for the focus indicator on primary background.
pub const MIN_FOCUS_INDICATOR: f64 = 3.0;
/// Minimum ratio for code text on its background.
pub const MIN_CODE_TEXT: f64 = 7.0;

/// Relative luminance per the WCAG formula (0.0 = black, 1.0 = white).
pub fn relative_luminance(rgb: Rgb) -> f64 {
    fn channel(c: u8) -> f64 {
        let c_srgb = f64::from(c) / 255.0;
        if c_srgb <= 0.03928 {
            c_srgb / 12.92
        } else {
            ((c_srgb + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel(rgb.r) + 0.7152 * channel(rgb.g) + 0.0722 * channel(rgb.b)
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio for two hex color strings.
///
/// Returns `None` when either input is not a parseable hex color; malformed
/// input is a caller error, not a runtime fault to recover from.
pub fn contrast_ratio_hex(a: &str, b: &str) -> Option<f64> {
    Some(contrast_ratio(Rgb::parse(a)?, Rgb::parse(b)?))
}

/// One checked foreground/background pair.
#[derive(Debug, Clone)]
pub struct ContrastPair {
    /// What the pair covers, e.g. "primary text on primary background".
    pub label: String,
    /// Measured contrast ratio.
    pub ratio: f64,
    /// Required minimum for this pair.
    pub minimum: f64,
    /// Whether the measured ratio meets the minimum.
    pub passes: bool,
}

/// Advisory accessibility report for one style generator.
#[derive(Debug, Clone)]
pub struct ContrastReport {
    /// The generator the report covers.
    pub component: String,
    /// Every checked pair.
    pub pairs: Vec<ContrastPair>,
    /// Whether all pairs meet their minimums.
    pub meets_wcag: bool,
}

impl ContrastReport {
    /// Build a report from checked pairs.
    pub fn new(component: impl Into<String>, pairs: Vec<ContrastPair>) -> Self {
        let meets_wcag = pairs.iter().all(|p| p.passes);
        Self {
            component: component.into(),
            pairs,
            meets_wcag,
        }
    }

    /// Check one pair and append it to `pairs`.
    pub fn check_pair(pairs: &mut Vec<ContrastPair>, label: &str, fg: &str, bg: &str, minimum: f64) {
        // A malformed palette entry reads as a failing pair rather than a panic.
        let ratio = contrast_ratio_hex(fg, bg).unwrap_or(0.0);
        pairs.push(ContrastPair {
            label: label.to_string(),
            ratio,
            minimum,
            passes: ratio >= minimum,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_on_white_is_twenty_one() {
        let ratio = contrast_ratio_hex("#000000", "#ffffff").unwrap();
        assert!((ratio - 21.0).abs() < 1e-2);
    }

    #[test]
    fn identical_colors_are_one() {
        for color in ["#1a1b26", "#c0caf5", "#7aa2f7", "#ffffff"] {
            let ratio = contrast_ratio_hex(color, color).unwrap();
            assert!((ratio - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn ratio_is_symmetric() {
        let ab = contrast_ratio_hex("#1a1b26", "#c0caf5").unwrap();
        let ba = contrast_ratio_hex("#c0caf5", "#1a1b26").unwrap();
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn malformed_input_is_a_caller_error() {
        assert!(contrast_ratio_hex("#zzzzzz", "#ffffff").is_none());
        assert!(contrast_ratio_hex("", "#ffffff").is_none());
    }

    #[test]
    fn report_aggregates_pass_state() {
        let mut pairs = Vec::new();
        ContrastReport::check_pair(&mut pairs, "text", "#ffffff", "#000000", 4.5);
        ContrastReport::check_pair(&mut pairs, "dim", "#777777", "#888888", 4.5);
        let report = ContrastReport::new("hierarchy", pairs);
        assert!(!report.meets_wcag);
        assert!(report.pairs[0].passes);
        assert!(!report.pairs[1].passes);
    }
}
