//! Normalization of untrusted layout grids
//!
//! The generative model is untrusted: it may return a truncated grid, extra
//! rows, ragged rows, unknown tags, or garbage in place of cells. This module
//! is the single boundary where that loosely-shaped data is coerced into a
//! `CityGrid`. Normalization is total: it never fails and never panics,
//! whatever the payload looks like.

use serde_json::Value;

use crate::grid::{Cell, CityGrid};
use crate::land_use::LandUse;

/// Coerce an untrusted JSON value into a valid `size x size` grid.
///
/// Shape correction keeps the leading rows/cells and drops trailing excess;
/// missing rows/cells are appended as default (empty, zero-density) cells.
/// A row that is not an array contributes zero cells. Invalid cells are
/// replaced wholesale, never partially repaired.
pub fn normalize_grid(raw: &Value, size: usize) -> CityGrid {
    let mut grid = CityGrid::empty(size);

    let Some(rows) = raw.as_array() else {
        return grid;
    };

    for (y, row) in rows.iter().take(size).enumerate() {
        let cells = match row.as_array() {
            Some(cells) => cells.as_slice(),
            None => &[],
        };
        for (x, cell) in cells.iter().take(size).enumerate() {
            grid.set(x, y, sanitize_cell(cell));
        }
    }

    grid
}

/// Validate one candidate cell.
///
/// A cell is accepted only as an object carrying a recognized `landUse` tag
/// and a numeric `density`; the density is then clamped to [0.0, 1.0].
/// Everything else becomes the default cell.
fn sanitize_cell(value: &Value) -> Cell {
    let Some(obj) = value.as_object() else {
        return Cell::default();
    };

    let land_use = obj
        .get("landUse")
        .and_then(Value::as_str)
        .and_then(LandUse::from_tag);
    let density = obj.get("density").and_then(Value::as_f64);

    match (land_use, density) {
        (Some(land_use), Some(density)) => Cell {
            land_use,
            density: density.clamp(0.0, 1.0) as f32,
        },
        _ => Cell::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn park(density: f32) -> Cell {
        Cell {
            land_use: LandUse::Park,
            density,
        }
    }

    fn assert_all_default(grid: &CityGrid) {
        for row in grid.rows() {
            for cell in row {
                assert_eq!(*cell, Cell::default());
            }
        }
    }

    #[test]
    fn test_non_array_payloads_become_default_grids() {
        for raw in [
            Value::Null,
            json!(42),
            json!("a city"),
            json!({ "layoutGrid": [] }),
            json!(true),
        ] {
            let grid = normalize_grid(&raw, 3);
            assert_eq!(grid.size(), 3);
            assert_all_default(&grid);
        }
    }

    #[test]
    fn test_totality_on_deeply_malformed_arrays() {
        let raw = json!([
            [null, 7, "x", {}, { "landUse": 3, "density": "high" }],
            "not a row",
            { "cells": [] },
            [[{ "landUse": "park", "density": 0.5 }]]
        ]);
        for size in 1..6 {
            let grid = normalize_grid(&raw, size);
            assert_eq!(grid.size(), size);
            assert_eq!(grid.rows().count(), size);
            assert_all_default(&grid);
        }
    }

    #[test]
    fn test_idempotent_on_well_formed_input() {
        let mut expected = CityGrid::empty(3);
        expected.set(0, 0, park(0.3));
        expected.set(2, 1, Cell {
            land_use: LandUse::CentralHub,
            density: 1.0,
        });
        let raw = serde_json::to_value(&expected).unwrap();
        assert_eq!(normalize_grid(&raw, 3), expected);
    }

    #[test]
    fn test_prefix_truncation_keeps_leading_rows() {
        let raw = json!([
            [{ "landUse": "park", "density": 0.1 }, { "landUse": "park", "density": 0.2 }],
            [{ "landUse": "water", "density": 0.3 }, { "landUse": "water", "density": 0.4 }],
            [{ "landUse": "landmark", "density": 0.9 }, { "landUse": "landmark", "density": 0.9 }]
        ]);
        let grid = normalize_grid(&raw, 2);
        assert_eq!(grid.size(), 2);
        assert_eq!(*grid.get(0, 0), park(0.1));
        assert_eq!(*grid.get(1, 0), park(0.2));
        assert_eq!(grid.get(0, 1).land_use, LandUse::Water);
        assert_eq!(grid.get(1, 1).land_use, LandUse::Water);
    }

    #[test]
    fn test_suffix_padding_appends_default_rows() {
        let raw = json!([
            [{ "landUse": "park", "density": 0.5 }, { "landUse": "park", "density": 0.5 }]
        ]);
        let grid = normalize_grid(&raw, 3);
        assert_eq!(*grid.get(0, 0), park(0.5));
        assert_eq!(*grid.get(1, 0), park(0.5));
        // Short row is padded at the end.
        assert_eq!(*grid.get(2, 0), Cell::default());
        // Missing rows are appended after the existing ones.
        for y in 1..3 {
            for x in 0..3 {
                assert_eq!(*grid.get(x, y), Cell::default());
            }
        }
    }

    #[test]
    fn test_oversized_rows_are_truncated() {
        let raw = json!([[
            { "landUse": "park", "density": 0.1 },
            { "landUse": "water", "density": 0.2 },
            { "landUse": "landmark", "density": 0.3 }
        ]]);
        let grid = normalize_grid(&raw, 2);
        assert_eq!(grid.get(0, 0).land_use, LandUse::Park);
        assert_eq!(grid.get(1, 0).land_use, LandUse::Water);
    }

    #[test]
    fn test_non_array_row_counts_as_empty() {
        let raw = json!([
            "garbage",
            [{ "landUse": "park", "density": 0.5 }]
        ]);
        let grid = normalize_grid(&raw, 2);
        assert_eq!(*grid.get(0, 0), Cell::default());
        assert_eq!(*grid.get(1, 0), Cell::default());
        assert_eq!(*grid.get(0, 1), park(0.5));
    }

    #[test]
    fn test_unknown_tag_discards_cell_even_with_valid_density() {
        let raw = json!([[{ "landUse": "not-a-real-tag", "density": 0.5 }]]);
        let grid = normalize_grid(&raw, 1);
        assert_eq!(*grid.get(0, 0), Cell::default());
    }

    #[test]
    fn test_density_clamped_only_on_valid_cells() {
        let raw = json!([[
            { "landUse": "park", "density": 5 },
            { "landUse": "park", "density": -5 },
            { "landUse": "park", "density": "1000" }
        ]]);
        let grid = normalize_grid(&raw, 3);
        assert_eq!(*grid.get(0, 0), park(1.0));
        assert_eq!(*grid.get(1, 0), park(0.0));
        // Non-numeric density is not clamped into validity.
        assert_eq!(*grid.get(2, 0), Cell::default());
    }

    #[test]
    fn test_missing_fields_discard_cell() {
        let raw = json!([[
            { "density": 0.5 },
            { "landUse": "park" },
            { "landUse": "park", "density": null }
        ]]);
        let grid = normalize_grid(&raw, 3);
        for x in 0..3 {
            assert_eq!(*grid.get(x, 0), Cell::default());
        }
    }

    #[test]
    fn test_reserved_tags_are_still_valid_cells() {
        let raw = json!([[{ "landUse": "industrial", "density": 0.4 }]]);
        let grid = normalize_grid(&raw, 1);
        assert_eq!(grid.get(0, 0).land_use, LandUse::Industrial);
    }

    #[test]
    fn test_single_cell_into_two_by_two() {
        let raw = json!([[{ "landUse": "park", "density": 0.3 }]]);
        let grid = normalize_grid(&raw, 2);
        assert_eq!(*grid.get(0, 0), park(0.3));
        assert_eq!(*grid.get(1, 0), Cell::default());
        assert_eq!(*grid.get(0, 1), Cell::default());
        assert_eq!(*grid.get(1, 1), Cell::default());
    }
}
