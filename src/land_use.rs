//! Land-use vocabulary for city layout grids
//!
//! Every grid cell carries exactly one `LandUse` tag. The enum is closed:
//! tags arriving from outside (model output, save files) are resolved
//! through `from_tag`, which is the only place an unknown string can be
//! rejected.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use std::fmt;

/// Zoning category for a single grid cell.
///
/// The first fifteen variants are offered to the generator; the reserved
/// variants are kept for old save files but never requested in prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LandUse {
    // Core urban zones
    Residential,
    Commercial,
    MixedUse,
    CentralHub,

    // Green and sustainable infrastructure
    Park,
    Water,
    GreenCorridor,
    SolarField,
    RooftopGarden,

    // Transport and utilities
    MainRoad,
    SecondaryRoad,
    EvChargingZone,

    // Misc
    Public,
    Landmark,
    Empty,

    // Reserved, not offered to the generator
    Industrial,
    InnovationHub,
    TechDistrict,
    AutomatedTransportCorridor,
    SmartGridNode,
    WindTurbine,
}

impl LandUse {
    /// The kebab-case tag used in model output and save files.
    pub fn as_tag(&self) -> &'static str {
        match self {
            LandUse::Residential => "residential",
            LandUse::Commercial => "commercial",
            LandUse::MixedUse => "mixed-use",
            LandUse::CentralHub => "central-hub",
            LandUse::Park => "park",
            LandUse::Water => "water",
            LandUse::GreenCorridor => "green-corridor",
            LandUse::SolarField => "solar-field",
            LandUse::RooftopGarden => "rooftop-garden",
            LandUse::MainRoad => "main-road",
            LandUse::SecondaryRoad => "secondary-road",
            LandUse::EvChargingZone => "ev-charging-zone",
            LandUse::Public => "public",
            LandUse::Landmark => "landmark",
            LandUse::Empty => "empty",
            LandUse::Industrial => "industrial",
            LandUse::InnovationHub => "innovation-hub",
            LandUse::TechDistrict => "tech-district",
            LandUse::AutomatedTransportCorridor => "automated-transport-corridor",
            LandUse::SmartGridNode => "smart-grid-node",
            LandUse::WindTurbine => "wind-turbine",
        }
    }

    /// Resolve a tag string. Unknown tags return `None`.
    pub fn from_tag(tag: &str) -> Option<LandUse> {
        LandUse::all().iter().copied().find(|lu| lu.as_tag() == tag)
    }

    /// Every variant, including reserved ones.
    pub fn all() -> &'static [LandUse] {
        &[
            LandUse::Residential,
            LandUse::Commercial,
            LandUse::MixedUse,
            LandUse::CentralHub,
            LandUse::Park,
            LandUse::Water,
            LandUse::GreenCorridor,
            LandUse::SolarField,
            LandUse::RooftopGarden,
            LandUse::MainRoad,
            LandUse::SecondaryRoad,
            LandUse::EvChargingZone,
            LandUse::Public,
            LandUse::Landmark,
            LandUse::Empty,
            LandUse::Industrial,
            LandUse::InnovationHub,
            LandUse::TechDistrict,
            LandUse::AutomatedTransportCorridor,
            LandUse::SmartGridNode,
            LandUse::WindTurbine,
        ]
    }

    /// Variants the generator is allowed to emit.
    pub fn active() -> &'static [LandUse] {
        &[
            LandUse::Residential,
            LandUse::Commercial,
            LandUse::MixedUse,
            LandUse::CentralHub,
            LandUse::Park,
            LandUse::Water,
            LandUse::GreenCorridor,
            LandUse::SolarField,
            LandUse::RooftopGarden,
            LandUse::MainRoad,
            LandUse::SecondaryRoad,
            LandUse::EvChargingZone,
            LandUse::Public,
            LandUse::Landmark,
            LandUse::Empty,
        ]
    }
}

impl fmt::Display for LandUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

// Serialized form is the bare tag string, so the wire shape cannot drift
// from the from_tag/as_tag mapping.
impl Serialize for LandUse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for LandUse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagVisitor;

        impl<'de> Visitor<'de> for TagVisitor {
            type Value = LandUse;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a land-use tag string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<LandUse, E> {
                LandUse::from_tag(value)
                    .ok_or_else(|| E::custom(format!("unknown land-use tag: {}", value)))
            }
        }

        deserializer.deserialize_str(TagVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for &lu in LandUse::all() {
            assert_eq!(LandUse::from_tag(lu.as_tag()), Some(lu));
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(LandUse::from_tag("not-a-real-tag"), None);
        assert_eq!(LandUse::from_tag(""), None);
        assert_eq!(LandUse::from_tag("Park"), None); // tags are lowercase
    }

    #[test]
    fn test_active_is_subset_without_reserved() {
        assert_eq!(LandUse::active().len(), 15);
        assert_eq!(LandUse::all().len(), 21);
        for lu in LandUse::active() {
            assert!(LandUse::all().contains(lu));
        }
        assert!(!LandUse::active().contains(&LandUse::Industrial));
        assert!(!LandUse::active().contains(&LandUse::WindTurbine));
    }

    #[test]
    fn test_serde_is_bare_tag() {
        let json = serde_json::to_string(&LandUse::EvChargingZone).unwrap();
        assert_eq!(json, "\"ev-charging-zone\"");
        let back: LandUse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LandUse::EvChargingZone);
        assert!(serde_json::from_str::<LandUse>("\"atlantis\"").is_err());
    }
}
