//! ASCII rendering of layout grids
//!
//! Quick terminal preview of a generated layout, one character per cell.

use crate::appearance::appearance;
use crate::grid::CityGrid;
use crate::land_use::LandUse;

/// Get the preview character for a land use
pub fn land_use_char(land_use: LandUse) -> char {
    match land_use {
        LandUse::Residential => 'r',
        LandUse::Commercial => 'c',
        LandUse::MixedUse => 'm',
        LandUse::CentralHub => '@',
        LandUse::Park => '"',
        LandUse::Water => '~',
        LandUse::GreenCorridor => ':',
        LandUse::SolarField => '#',
        LandUse::RooftopGarden => 'g',
        LandUse::MainRoad => '=',
        LandUse::SecondaryRoad => '-',
        LandUse::EvChargingZone => 'e',
        LandUse::Public => 'p',
        LandUse::Landmark => '*',
        LandUse::Empty => '.',
        LandUse::Industrial => 'I',
        LandUse::InnovationHub => 'H',
        LandUse::TechDistrict => 'T',
        LandUse::AutomatedTransportCorridor => 'A',
        LandUse::SmartGridNode => 'S',
        LandUse::WindTurbine => 'W',
    }
}

/// Render a grid as lines of preview characters.
pub fn render_ascii(grid: &CityGrid) -> String {
    let mut out = String::with_capacity(grid.size() * (grid.size() + 1));
    for row in grid.rows() {
        for cell in row {
            out.push(land_use_char(cell.land_use));
        }
        out.push('\n');
    }
    out
}

/// Legend mapping preview characters to labels, active land uses only.
pub fn legend() -> String {
    let mut out = String::new();
    for &lu in LandUse::active() {
        out.push_str(&format!("  {} {}\n", land_use_char(lu), appearance(lu).label));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_chars_are_unique() {
        let mut chars: Vec<char> = LandUse::all().iter().map(|&lu| land_use_char(lu)).collect();
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), LandUse::all().len());
    }

    #[test]
    fn test_render_shape() {
        let mut grid = CityGrid::empty(3);
        grid.set(1, 0, Cell {
            land_use: LandUse::CentralHub,
            density: 0.9,
        });
        let text = render_ascii(&grid);
        assert_eq!(text, ".@.\n...\n...\n");
    }

    #[test]
    fn test_legend_covers_active_uses() {
        let text = legend();
        assert_eq!(text.lines().count(), LandUse::active().len());
        assert!(text.contains("@ Central Hub"));
        assert!(text.contains(". Empty"));
    }
}
