//! Land-use appearance table
//!
//! Static mapping from land use to fill color, legend label, and optional
//! icon glyph. The mapping is an exhaustive match, so adding a `LandUse`
//! variant without an appearance fails to compile. Unknown tags never reach
//! this table; they are eliminated at the normalization boundary.
//!
//! Icons are 24x24 coverage masks ('#' = covered) with their own RGBA tint,
//! drawn on top of the shaded cell fill.

use crate::land_use::LandUse;

/// Native side length of an icon mask.
pub const ICON_MASK_SIZE: u32 = 24;

/// A monochrome icon stencil plus its tint color.
pub struct IconGlyph {
    /// 24 rows of 24 characters; '#' marks covered pixels.
    pub rows: [&'static str; 24],
    /// RGBA tint applied where the mask is covered.
    pub color: [u8; 4],
}

impl IconGlyph {
    /// Whether the mask covers the given native-space pixel.
    pub fn covers(&self, x: u32, y: u32) -> bool {
        self.rows
            .get(y as usize)
            .and_then(|row| row.as_bytes().get(x as usize))
            .map(|&b| b == b'#')
            .unwrap_or(false)
    }
}

/// How one land use is painted: fill color, legend label, optional icon.
#[derive(Clone, Copy)]
pub struct Appearance {
    pub fill: [u8; 3],
    pub label: &'static str,
    pub icon: Option<&'static IconGlyph>,
}

/// Five-pointed star, used for the central hub and landmarks.
static STAR: IconGlyph = IconGlyph {
    rows: [
        "........................",
        "...........##...........",
        "...........##...........",
        "..........####..........",
        "..........####..........",
        ".........######.........",
        ".........######.........",
        "........########........",
        ".######################.",
        "..####################..",
        "...##################...",
        "....################....",
        ".....##############.....",
        "......############......",
        "......############......",
        ".....######..######.....",
        "....#####......#####....",
        "....####........####....",
        "...####..........####...",
        "...###............###...",
        "..###..............###..",
        "..##................##..",
        "........................",
        "........................",
    ],
    color: [113, 63, 18, 179],
};

/// Solar panel: 2x3 grid of panes in a frame.
static SOLAR_PANEL: IconGlyph = IconGlyph {
    rows: [
        "........................",
        "........................",
        "....################....",
        "....#######..#######....",
        "....#######..#######....",
        "....#######..#######....",
        "....#######..#######....",
        "....#######..#######....",
        "....################....",
        "....#######..#######....",
        "....#######..#######....",
        "....#######..#######....",
        "....#######..#######....",
        "....#######..#######....",
        "....################....",
        "....#######..#######....",
        "....#######..#######....",
        "....#######..#######....",
        "....#######..#######....",
        "....################....",
        "....################....",
        "........................",
        "........................",
        "........................",
    ],
    color: [186, 230, 253, 204],
};

/// Lightning bolt for EV charging zones.
static BOLT: IconGlyph = IconGlyph {
    rows: [
        "........................",
        "........................",
        "........................",
        ".............####.......",
        "............####........",
        "...........####.........",
        "..........####..........",
        ".........####...........",
        "........####............",
        ".......##########.......",
        "........########........",
        "............####........",
        "...........####.........",
        "..........####..........",
        ".........####...........",
        "........####............",
        ".......####.............",
        ".......###..............",
        ".......##...............",
        ".......#................",
        "........................",
        "........................",
        "........................",
        "........................",
    ],
    color: [30, 58, 138, 204],
};

/// Leaf with a stem, for rooftop gardens.
static LEAF: IconGlyph = IconGlyph {
    rows: [
        "........................",
        "........................",
        "........................",
        "........................",
        "...............##.......",
        ".............#####......",
        "...........#######......",
        "..........########......",
        ".........#########......",
        "........#########.......",
        ".......##########.......",
        ".......#########........",
        "......##########........",
        "......#########.........",
        "......########..........",
        "......#######...........",
        "......#####.............",
        ".......###..............",
        "......##................",
        ".....##.................",
        "........................",
        "........................",
        "........................",
        "........................",
    ],
    color: [20, 83, 45, 179],
};

/// Look up how a land use is painted.
pub fn appearance(land_use: LandUse) -> Appearance {
    match land_use {
        LandUse::Residential => Appearance {
            fill: [3, 105, 161],
            label: "Residential",
            icon: None,
        },
        LandUse::Commercial => Appearance {
            fill: [30, 64, 175],
            label: "Commercial",
            icon: None,
        },
        LandUse::MixedUse => Appearance {
            fill: [79, 70, 229],
            label: "Mixed-Use",
            icon: None,
        },
        LandUse::CentralHub => Appearance {
            fill: [20, 184, 166],
            label: "Central Hub",
            icon: Some(&STAR),
        },
        LandUse::Park => Appearance {
            fill: [22, 163, 74],
            label: "Park",
            icon: None,
        },
        LandUse::Water => Appearance {
            fill: [21, 94, 117],
            label: "Water",
            icon: None,
        },
        LandUse::GreenCorridor => Appearance {
            fill: [101, 163, 13],
            label: "Green Corridor",
            icon: None,
        },
        LandUse::SolarField => Appearance {
            fill: [51, 65, 85],
            label: "Solar Field",
            icon: Some(&SOLAR_PANEL),
        },
        LandUse::RooftopGarden => Appearance {
            fill: [16, 185, 129],
            label: "Green Building",
            icon: Some(&LEAF),
        },
        LandUse::MainRoad => Appearance {
            fill: [107, 114, 128],
            label: "Main Road",
            icon: None,
        },
        LandUse::SecondaryRoad => Appearance {
            fill: [75, 85, 99],
            label: "Secondary Road",
            icon: None,
        },
        LandUse::EvChargingZone => Appearance {
            fill: [6, 182, 212],
            label: "EV Charging",
            icon: Some(&BOLT),
        },
        LandUse::Public => Appearance {
            fill: [225, 29, 72],
            label: "Public/Civic",
            icon: None,
        },
        LandUse::Landmark => Appearance {
            fill: [250, 204, 21],
            label: "Landmark",
            icon: Some(&STAR),
        },
        LandUse::Empty => Appearance {
            fill: [17, 24, 39],
            label: "Empty",
            icon: None,
        },
        LandUse::Industrial => Appearance {
            fill: [30, 41, 59],
            label: "Industrial",
            icon: None,
        },
        LandUse::InnovationHub => Appearance {
            fill: [192, 38, 211],
            label: "Innovation Hub",
            icon: None,
        },
        LandUse::TechDistrict => Appearance {
            fill: [91, 33, 182],
            label: "Tech District",
            icon: None,
        },
        LandUse::AutomatedTransportCorridor => Appearance {
            fill: [55, 65, 81],
            label: "Transport Corridor",
            icon: None,
        },
        LandUse::SmartGridNode => Appearance {
            fill: [59, 130, 246],
            label: "Smart Grid Node",
            icon: None,
        },
        LandUse::WindTurbine => Appearance {
            fill: [148, 163, 184],
            label: "Wind Turbine",
            icon: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_are_square() {
        for &lu in LandUse::all() {
            if let Some(icon) = appearance(lu).icon {
                assert_eq!(icon.rows.len() as u32, ICON_MASK_SIZE);
                for row in &icon.rows {
                    assert_eq!(row.len() as u32, ICON_MASK_SIZE, "bad row in {} icon", lu);
                    assert!(row.bytes().all(|b| b == b'#' || b == b'.'));
                }
            }
        }
    }

    #[test]
    fn test_icon_coverage_matches_original_set() {
        let with_icons: Vec<LandUse> = LandUse::all()
            .iter()
            .copied()
            .filter(|&lu| appearance(lu).icon.is_some())
            .collect();
        assert_eq!(
            with_icons,
            vec![
                LandUse::CentralHub,
                LandUse::SolarField,
                LandUse::RooftopGarden,
                LandUse::EvChargingZone,
                LandUse::Landmark,
            ]
        );
    }

    #[test]
    fn test_covers_is_safe_out_of_bounds() {
        assert!(!STAR.covers(100, 100));
        assert!(STAR.covers(11, 1));
    }

    #[test]
    fn test_labels_are_distinct_for_active_uses() {
        let mut labels: Vec<&str> = LandUse::active()
            .iter()
            .map(|&lu| appearance(lu).label)
            .collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), LandUse::active().len());
    }
}
