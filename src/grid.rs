//! City layout grid
//!
//! A `CityGrid` is always exactly `size x size`. Construction goes through
//! `filled` or the normalizer, so the invariant holds for every value that
//! escapes this module. Storage is a flat row-major vector.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::land_use::LandUse;

/// One cell of the layout grid.
///
/// `density` modulates the cell's visual intensity and is kept in
/// [0.0, 1.0] by the normalizer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub land_use: LandUse,
    pub density: f32,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            land_use: LandUse::Empty,
            density: 0.0,
        }
    }
}

/// A square grid of layout cells, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct CityGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl CityGrid {
    /// Create a grid with every cell set to `cell`.
    pub fn filled(size: usize, cell: Cell) -> Self {
        CityGrid {
            size,
            cells: vec![cell; size * size],
        }
    }

    /// Create a grid of default (empty, zero-density) cells.
    pub fn empty(size: usize) -> Self {
        Self::filled(size, Cell::default())
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, x: usize, y: usize) -> &Cell {
        &self.cells[y * self.size + x]
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.size + x] = cell;
    }

    /// Iterate over rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }
}

// The wire shape is an array of row arrays, matching the generation schema
// and the save-file format.
impl Serialize for CityGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for row in self.rows().take(self.size) {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

// Save files are written by us, so a ragged or non-square payload is data
// corruption and fails the load. Untrusted payloads take the normalizer
// path instead, which never fails.
impl<'de> Deserialize<'de> for CityGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows: Vec<Vec<Cell>> = Vec::deserialize(deserializer)?;
        let size = rows.len();
        for row in &rows {
            if row.len() != size {
                return Err(de::Error::custom(format!(
                    "grid is not square: {} rows but a row of {} cells",
                    size,
                    row.len()
                )));
            }
        }
        Ok(CityGrid {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_dimensions() {
        let grid = CityGrid::empty(4);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.rows().count(), 4);
        for row in grid.rows() {
            assert_eq!(row.len(), 4);
            for cell in row {
                assert_eq!(*cell, Cell::default());
            }
        }
    }

    #[test]
    fn test_get_set() {
        let mut grid = CityGrid::empty(3);
        let park = Cell {
            land_use: LandUse::Park,
            density: 0.5,
        };
        grid.set(2, 1, park);
        assert_eq!(*grid.get(2, 1), park);
        assert_eq!(*grid.get(1, 2), Cell::default());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut grid = CityGrid::empty(2);
        grid.set(0, 0, Cell {
            land_use: LandUse::MainRoad,
            density: 0.8,
        });
        let json = serde_json::to_string(&grid).unwrap();
        let back: CityGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_serialized_shape() {
        let grid = CityGrid::empty(1);
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(
            json,
            serde_json::json!([[{ "landUse": "empty", "density": 0.0 }]])
        );
    }

    #[test]
    fn test_ragged_payload_rejected() {
        let json = r#"[[{"landUse":"park","density":0.1}],[]]"#;
        assert!(serde_json::from_str::<CityGrid>(json).is_err());
    }
}
