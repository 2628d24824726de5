//! # Theme Variants
//!
//! The [Variant] identifier, the built-in palettes, and the registry that
//! maps one to the other.
//!
//! Each variant lives in its own module and contributes exactly one static
//! [Palette]; the registry is an insertion-ordered map so
//! [list_variants] is stable across calls. Lookup is a total function over
//! [Variant] — only string identifiers can fail to resolve, and that is a
//! caller error ([ThemeError::InvalidVariant](crate::error::ThemeError)).

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ThemeError, ThemeResult};

/// The Night palette.
pub mod night;
/// The Storm palette.
pub mod storm;
/// The Light palette.
pub mod light;
/// The shared palette record.
pub mod palette;

pub use palette::Palette;

/// A named theme configuration, mapping 1:1 to a [Palette].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Deep dark variant, the default.
    Night,
    /// Softened dark variant.
    Storm,
    /// Light variant.
    Light,
}

impl Variant {
    /// The wire identifier used in settings, element ids and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::Storm => "storm",
            Self::Light => "light",
        }
    }

    /// Path of the CSS resource registered with the host theme registry.
    pub fn css_resource_path(&self) -> String {
        format!("themes/{}.css", self.as_str())
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::Night
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "night" => Ok(Self::Night),
            "storm" => Ok(Self::Storm),
            "light" => Ok(Self::Light),
            other => Err(ThemeError::invalid_variant(other)),
        }
    }
}

fn registry() -> &'static IndexMap<Variant, &'static Palette> {
    static REGISTRY: OnceLock<IndexMap<Variant, &'static Palette>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = IndexMap::new();
        map.insert(Variant::Night, &night::NIGHT);
        map.insert(Variant::Storm, &storm::STORM);
        map.insert(Variant::Light, &light::LIGHT);
        map
    })
}

/// Look up the palette for a variant. Total over [Variant].
pub fn palette_for(variant: Variant) -> &'static Palette {
    registry()[&variant]
}

/// All registered variants, in stable insertion order.
pub fn list_variants() -> impl Iterator<Item = Variant> {
    registry().keys().copied()
}

/// Whether a string identifier names a registered variant.
pub fn is_valid_variant(id: &str) -> bool {
    id.parse::<Variant>().is_ok()
}

/// Resolve a string identifier to a [Variant].
pub fn parse_variant(id: &str) -> ThemeResult<Variant> {
    id.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_palette_is_complete_hex() {
        for variant in list_variants() {
            let palette = palette_for(variant);
            assert!(
                palette.is_complete(),
                "palette for {variant} has a malformed color"
            );
            assert!(!palette.display_name.is_empty());
        }
    }

    #[test]
    fn variant_order_is_stable() {
        let order: Vec<Variant> = list_variants().collect();
        assert_eq!(order, vec![Variant::Night, Variant::Storm, Variant::Light]);
    }

    #[test]
    fn night_is_the_default_and_dark() {
        assert_eq!(Variant::default(), Variant::Night);
        assert_eq!(palette_for(Variant::Night).background.primary, "#1a1b26");
        assert!(palette_for(Variant::Night).is_dark);
        assert!(palette_for(Variant::Storm).is_dark);
        assert!(!palette_for(Variant::Light).is_dark);
    }

    #[test]
    fn unknown_identifier_is_a_caller_error() {
        assert!(is_valid_variant("storm"));
        assert!(!is_valid_variant("midnight"));
        let err = parse_variant("midnight").unwrap_err();
        assert!(matches!(err, ThemeError::InvalidVariant { ref name } if name == "midnight"));
    }

    #[test]
    fn identifiers_round_trip() {
        for variant in list_variants() {
            assert_eq!(parse_variant(variant.as_str()).unwrap(), variant);
        }
    }
}
